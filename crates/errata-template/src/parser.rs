/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template parser.
//!
//! Parsing happens in two passes. The scanner splits the source into literal
//! text, comments, and directives (`$...$` or `${...}`). The tree builder then
//! matches block directives (`if`/`elseif`/`else`/`endif`, `for`/`sep`/`endfor`)
//! into the nested AST.
//!
//! Output is whitespace-exact: no lines are stripped around block directives.

use crate::ast::{
    Comment, Conditional, ForLoop, Literal, Partial, Pipe, PipeArg, Span, TemplateNode,
    ValueSource, VariableRef,
};
use crate::error::{TemplateError, TemplateResult};

/// A compiled template ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// The parsed template AST.
    pub(crate) nodes: Vec<TemplateNode>,

    /// Original source (for error reporting).
    pub(crate) source: String,

    /// Name used in error messages.
    pub(crate) name: String,
}

impl Template {
    /// Compile a template from source text.
    ///
    /// # Arguments
    /// * `source` - The template source text
    ///
    /// # Returns
    /// A compiled template, or an error if parsing fails.
    pub fn compile(source: &str) -> TemplateResult<Self> {
        Self::compile_named(source, "<template>")
    }

    /// Compile a template from source text with a name for error reporting.
    pub fn compile_named(source: &str, name: &str) -> TemplateResult<Self> {
        let tokens = Scanner::new(source, name).tokens()?;
        let nodes = TreeBuilder::new(tokens, name).build()?;
        Ok(Self {
            nodes,
            source: source.to_string(),
            name: name.to_string(),
        })
    }

    /// Get the parsed AST nodes.
    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
enum Token {
    Text(String, Span),
    Comment(String, Span),
    Directive(Directive, Span),
}

#[derive(Debug)]
enum Directive {
    Value(VariableRef),
    Partial(Partial),
    If(VariableRef),
    ElseIf(VariableRef),
    Else,
    EndIf,
    For(VariableRef),
    Sep,
    EndFor,
}

impl Directive {
    fn keyword(&self) -> &'static str {
        match self {
            Directive::Value(_) => "variable",
            Directive::Partial(_) => "partial",
            Directive::If(_) => "$if$",
            Directive::ElseIf(_) => "$elseif$",
            Directive::Else => "$else$",
            Directive::EndIf => "$endif$",
            Directive::For(_) => "$for$",
            Directive::Sep => "$sep$",
            Directive::EndFor => "$endfor$",
        }
    }
}

/// Splits template source into tokens.
struct Scanner<'a> {
    source: &'a str,
    template: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, template: &'a str) -> Self {
        Self {
            source,
            template,
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn error<T>(&self, offset: usize, message: impl Into<String>) -> TemplateResult<T> {
        Err(TemplateError::ParseError {
            template: self.template.to_string(),
            offset,
            message: message.into(),
        })
    }

    fn tokens(mut self) -> TemplateResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut text_start = 0;

        while let Some(c) = self.peek() {
            if c != '$' {
                text.push(c);
                self.pos += c.len_utf8();
                continue;
            }
            if self.eat("$$") {
                text.push('$');
                continue;
            }

            let start = self.pos;
            if !text.is_empty() {
                tokens.push(Token::Text(
                    std::mem::take(&mut text),
                    Span::new(text_start, start),
                ));
            }

            if self.eat("$--") {
                let rest = self.rest();
                let comment = match rest.find('\n') {
                    Some(end) => {
                        self.pos += end + 1;
                        &rest[..end]
                    }
                    None => {
                        self.pos = self.source.len();
                        rest
                    }
                };
                tokens.push(Token::Comment(
                    comment.to_string(),
                    Span::new(start, self.pos),
                ));
            } else {
                let directive = self.directive()?;
                tokens.push(Token::Directive(directive, Span::new(start, self.pos)));
            }
            text_start = self.pos;
        }

        if !text.is_empty() {
            tokens.push(Token::Text(text, Span::new(text_start, self.pos)));
        }
        Ok(tokens)
    }

    fn directive(&mut self) -> TemplateResult<Directive> {
        let start = self.pos;
        self.pos += 1;
        let closing = if self.eat("{") { '}' } else { '$' };

        let directive = self.directive_body(closing)?;

        match self.bump() {
            Some(c) if c == closing => Ok(directive),
            Some(c) => self.error(
                self.pos - c.len_utf8(),
                format!("unexpected '{}' in directive, expected '{}'", c, closing),
            ),
            None => self.error(start, "unterminated directive"),
        }
    }

    fn directive_body(&mut self, closing: char) -> TemplateResult<Directive> {
        if self.eat("if(") {
            return Ok(Directive::If(self.condition()?));
        }
        if self.eat("elseif(") {
            return Ok(Directive::ElseIf(self.condition()?));
        }
        if self.eat("for(") {
            return Ok(Directive::For(self.condition()?));
        }

        let word = self.peek_word();
        let after = self.rest()[word.len()..].chars().next();
        if after == Some(closing) {
            let keyword = match word {
                "else" => Some(Directive::Else),
                "endif" => Some(Directive::EndIf),
                "sep" => Some(Directive::Sep),
                "endfor" => Some(Directive::EndFor),
                _ => None,
            };
            if let Some(keyword) = keyword {
                self.pos += word.len();
                return Ok(keyword);
            }
        }

        self.value_or_partial()
    }

    /// Parse the parenthesized reference of `if(...)`, `elseif(...)` and `for(...)`.
    fn condition(&mut self) -> TemplateResult<VariableRef> {
        let var = self.value_ref()?;
        if self.eat(")") {
            Ok(var)
        } else {
            self.error(self.pos, "expected ')'")
        }
    }

    fn value_or_partial(&mut self) -> TemplateResult<Directive> {
        let start = self.pos;
        let source = self.value_source()?;

        if let ValueSource::Path(path) = &source {
            if self.eat("()") {
                let name = path.join(".");
                return self.partial(name, None, start);
            }
            if self.peek() == Some(':') {
                let var = VariableRef::new(path.clone(), Span::new(start, self.pos));
                self.bump();
                let name = self.path()?.join(".");
                if !self.eat("()") {
                    return self.error(self.pos, "expected '()' after partial name");
                }
                return self.partial(name, Some(var), start);
            }
        }

        let (separator, pipes) = self.modifiers()?;
        Ok(Directive::Value(VariableRef {
            source,
            pipes,
            separator,
            span: Span::new(start, self.pos),
        }))
    }

    fn partial(
        &mut self,
        name: String,
        var: Option<VariableRef>,
        start: usize,
    ) -> TemplateResult<Directive> {
        let (separator, pipes) = self.modifiers()?;
        Ok(Directive::Partial(Partial {
            name,
            var,
            separator,
            pipes,
            span: Span::new(start, self.pos),
        }))
    }

    fn value_ref(&mut self) -> TemplateResult<VariableRef> {
        let start = self.pos;
        let source = self.value_source()?;
        let (separator, pipes) = self.modifiers()?;
        Ok(VariableRef {
            source,
            pipes,
            separator,
            span: Span::new(start, self.pos),
        })
    }

    fn value_source(&mut self) -> TemplateResult<ValueSource> {
        if self.peek() == Some('"') {
            Ok(ValueSource::Literal(self.string_literal()?))
        } else {
            Ok(ValueSource::Path(self.path()?))
        }
    }

    /// Parse any `[sep]` literal separator and `/pipe` suffixes.
    fn modifiers(&mut self) -> TemplateResult<(Option<String>, Vec<Pipe>)> {
        let mut separator = None;
        let mut pipes = Vec::new();
        loop {
            match self.peek() {
                Some('[') if separator.is_none() => {
                    let start = self.pos;
                    self.bump();
                    let rest = self.rest();
                    let Some(end) = rest.find(']') else {
                        return self.error(start, "unterminated separator");
                    };
                    separator = Some(rest[..end].to_string());
                    self.pos += end + 1;
                }
                Some('/') => pipes.push(self.pipe()?),
                _ => break,
            }
        }
        Ok((separator, pipes))
    }

    fn pipe(&mut self) -> TemplateResult<Pipe> {
        let start = self.pos;
        self.bump();
        let name = self.identifier()?;

        let mut args = Vec::new();
        loop {
            let before_spaces = self.pos;
            while self.peek() == Some(' ') {
                self.bump();
            }
            if self.pos == before_spaces {
                break;
            }
            match self.peek() {
                Some('"') => args.push(PipeArg::String(self.string_literal()?)),
                Some(c) if c.is_ascii_digit() || c == '-' => {
                    args.push(PipeArg::Integer(self.integer()?))
                }
                _ => {
                    self.pos = before_spaces;
                    break;
                }
            }
        }

        Ok(Pipe::with_args(name, args, Span::new(start, self.pos)))
    }

    fn path(&mut self) -> TemplateResult<Vec<String>> {
        let mut path = vec![self.identifier()?];
        while self.eat(".") {
            path.push(self.identifier()?);
        }
        Ok(path)
    }

    fn peek_word(&self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(rest.len());
        &rest[..len]
    }

    fn identifier(&mut self) -> TemplateResult<String> {
        let word = self.peek_word();
        if word.is_empty() {
            return match self.peek() {
                Some(c) => self.error(self.pos, format!("expected identifier, found '{}'", c)),
                None => self.error(self.pos, "expected identifier, found end of template"),
            };
        }
        self.pos += word.len();
        Ok(word.to_string())
    }

    fn string_literal(&mut self) -> TemplateResult<String> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => return self.error(start, "unterminated string literal"),
                },
                Some(c) => value.push(c),
                None => return self.error(start, "unterminated string literal"),
            }
        }
    }

    fn integer(&mut self) -> TemplateResult<i64> {
        let start = self.pos;
        self.eat("-");
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.source[start..self.pos];
        match text.parse() {
            Ok(n) => Ok(n),
            Err(_) => self.error(start, format!("invalid integer argument '{}'", text)),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Matches block directives into nested nodes.
struct TreeBuilder<'a> {
    tokens: std::vec::IntoIter<Token>,
    template: &'a str,
}

impl<'a> TreeBuilder<'a> {
    fn new(tokens: Vec<Token>, template: &'a str) -> Self {
        Self {
            tokens: tokens.into_iter(),
            template,
        }
    }

    fn error<T>(&self, offset: usize, message: impl Into<String>) -> TemplateResult<T> {
        Err(TemplateError::ParseError {
            template: self.template.to_string(),
            offset,
            message: message.into(),
        })
    }

    fn build(mut self) -> TemplateResult<Vec<TemplateNode>> {
        let (nodes, stop) = self.nodes()?;
        match stop {
            None => Ok(nodes),
            Some((directive, span)) => self.error(
                span.start,
                format!("unexpected {} outside of a block", directive.keyword()),
            ),
        }
    }

    /// Collect nodes until a block-closing directive or the end of input.
    fn nodes(&mut self) -> TemplateResult<(Vec<TemplateNode>, Option<(Directive, Span)>)> {
        let mut nodes = Vec::new();
        while let Some(token) = self.tokens.next() {
            let node = match token {
                Token::Text(text, span) => TemplateNode::Literal(Literal { text, span }),
                Token::Comment(text, span) => TemplateNode::Comment(Comment { text, span }),
                Token::Directive(directive, span) => match directive {
                    Directive::Value(var) => TemplateNode::Variable(var),
                    Directive::Partial(partial) => TemplateNode::Partial(partial),
                    Directive::If(condition) => self.conditional(condition, span)?,
                    Directive::For(var) => self.for_loop(var, span)?,
                    closing => return Ok((nodes, Some((closing, span)))),
                },
            };
            nodes.push(node);
        }
        Ok((nodes, None))
    }

    fn conditional(
        &mut self,
        mut condition: VariableRef,
        start: Span,
    ) -> TemplateResult<TemplateNode> {
        let mut branches = Vec::new();
        loop {
            let (body, stop) = self.nodes()?;
            match stop {
                Some((Directive::ElseIf(next), _)) => {
                    branches.push((condition, body));
                    condition = next;
                }
                Some((Directive::Else, else_span)) => {
                    branches.push((condition, body));
                    let (else_body, stop) = self.nodes()?;
                    return match stop {
                        Some((Directive::EndIf, end)) => {
                            Ok(TemplateNode::Conditional(Conditional {
                                branches,
                                else_branch: Some(else_body),
                                span: Span::new(start.start, end.end),
                            }))
                        }
                        Some((other, span)) => self.error(
                            span.start,
                            format!("unexpected {} after $else$", other.keyword()),
                        ),
                        None => self.error(else_span.start, "$else$ without matching $endif$"),
                    };
                }
                Some((Directive::EndIf, end)) => {
                    branches.push((condition, body));
                    return Ok(TemplateNode::Conditional(Conditional {
                        branches,
                        else_branch: None,
                        span: Span::new(start.start, end.end),
                    }));
                }
                Some((other, span)) => {
                    return self.error(
                        span.start,
                        format!("unexpected {} inside $if$", other.keyword()),
                    );
                }
                None => return self.error(start.start, "$if$ without matching $endif$"),
            }
        }
    }

    fn for_loop(&mut self, var: VariableRef, start: Span) -> TemplateResult<TemplateNode> {
        let (body, stop) = self.nodes()?;
        let (separator, end) = match stop {
            Some((Directive::EndFor, end)) => (None, end),
            Some((Directive::Sep, sep_span)) => {
                let (separator, stop) = self.nodes()?;
                match stop {
                    Some((Directive::EndFor, end)) => (Some(separator), end),
                    Some((other, span)) => {
                        return self.error(
                            span.start,
                            format!("unexpected {} after $sep$", other.keyword()),
                        );
                    }
                    None => return self.error(sep_span.start, "$sep$ without matching $endfor$"),
                }
            }
            Some((other, span)) => {
                return self.error(
                    span.start,
                    format!("unexpected {} inside $for$", other.keyword()),
                );
            }
            None => return self.error(start.start, "$for$ without matching $endfor$"),
        };

        Ok(TemplateNode::ForLoop(ForLoop {
            var,
            body,
            separator,
            span: Span::new(start.start, end.end),
        }))
    }
}
