/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template AST types.
//!
//! This module defines the abstract syntax tree for parsed templates.
//! Each node carries the byte span it was parsed from, for error reporting.

/// Byte range of a node in the template source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text to be output as-is.
    Literal(Literal),

    /// Variable interpolation: `$var$`, `$obj.field$` or `$"literal"$`
    Variable(VariableRef),

    /// Conditional block: `$if(var)$...$else$...$endif$`
    Conditional(Conditional),

    /// For loop: `$for(var)$...$sep$...$endfor$`
    ForLoop(ForLoop),

    /// Partial (sub-template): `$partial()$` or `$var:partial()$`
    Partial(Partial),

    /// Comment (not rendered): `$-- comment`
    Comment(Comment),
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The literal text content.
    pub text: String,
    pub span: Span,
}

/// Conditional block: `$if(var)$...$else$...$endif$`
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    /// List of (condition, body) pairs for if/elseif branches.
    pub branches: Vec<(VariableRef, Vec<TemplateNode>)>,
    /// Optional else branch.
    pub else_branch: Option<Vec<TemplateNode>>,
    pub span: Span,
}

/// For loop: `$for(var)$...$sep$...$endfor$`
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// Value to iterate over. Pipes are applied before iterating.
    pub var: VariableRef,
    /// Loop body.
    pub body: Vec<TemplateNode>,
    /// Optional separator between iterations (from `$sep$`).
    pub separator: Option<Vec<TemplateNode>>,
    pub span: Span,
}

/// Partial (sub-template): `$partial()$` or `$var:partial()$`
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    /// Partial template name.
    pub name: String,
    /// Optional variable to apply partial to.
    pub var: Option<VariableRef>,
    /// Optional literal separator for array iteration (from `[sep]` syntax).
    pub separator: Option<String>,
    /// Pipes to apply to partial output.
    pub pipes: Vec<Pipe>,
    pub span: Span,
}

/// Comment (not rendered): `$-- comment`
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// The comment text, without the `$--` marker.
    pub text: String,
    pub span: Span,
}

/// Where the value of a [`VariableRef`] comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// Path components (e.g., `["employee", "salary"]` for `employee.salary`).
    Path(Vec<String>),
    /// A quoted string literal (e.g., `"error"` in `$"error"/bold-red$`).
    Literal(String),
}

/// A reference to a value, possibly with pipes and separator.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    pub source: ValueSource,
    /// Pipes to apply to the value, in order.
    pub pipes: Vec<Pipe>,
    /// Optional literal separator for array iteration (from `$var[, ]$` syntax).
    /// When present, the variable is iterated as an array with this separator.
    pub separator: Option<String>,
    pub span: Span,
}

impl VariableRef {
    /// Create a new variable reference with no pipes or separator.
    pub fn new(path: Vec<String>, span: Span) -> Self {
        Self {
            source: ValueSource::Path(path),
            pipes: Vec::new(),
            separator: None,
            span,
        }
    }

    /// Create a reference to a string literal.
    pub fn literal(text: impl Into<String>, span: Span) -> Self {
        Self {
            source: ValueSource::Literal(text.into()),
            pipes: Vec::new(),
            separator: None,
            span,
        }
    }

    /// Add pipes to this reference.
    pub fn with_pipes(mut self, pipes: Vec<Pipe>) -> Self {
        self.pipes = pipes;
        self
    }

    /// Add a literal separator to this reference.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// The name a loop over this reference binds, besides `it`.
    ///
    /// This is the last path component; literals bind only `it`.
    pub fn binding_name(&self) -> Option<&str> {
        match &self.source {
            ValueSource::Path(path) => path.last().map(String::as_str),
            ValueSource::Literal(_) => None,
        }
    }
}

/// A pipe transformation applied to a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Pipe name (e.g., "uppercase", "bold-red").
    pub name: String,
    /// Pipe arguments (for pipes like `split "\n"`).
    pub args: Vec<PipeArg>,
    pub span: Span,
}

impl Pipe {
    /// Create a new pipe with no arguments.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            span,
        }
    }

    /// Create a new pipe with arguments.
    pub fn with_args(name: impl Into<String>, args: Vec<PipeArg>, span: Span) -> Self {
        Self {
            name: name.into(),
            args,
            span,
        }
    }
}

/// An argument to a pipe.
#[derive(Debug, Clone, PartialEq)]
pub enum PipeArg {
    /// Integer argument.
    Integer(i64),
    /// String argument (e.g., the separator in `split ", "`).
    String(String),
}
