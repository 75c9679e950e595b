/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Pandoc-style template engine for errata diagnostics.
//!
//! This crate provides the template engine that renders diagnostic fragments.
//! It follows the syntax of Pandoc's
//! [doctemplates](https://github.com/jgm/doctemplates) library, restricted to
//! what diagnostic layouts need:
//!
//! - Variable interpolation: `$variable$` or `${variable}`
//! - Nested field access: `$employee.salary$`
//! - String literals: `$"--> "/bold-blue$`
//! - Conditionals: `$if(var)$...$elseif(other)$...$else$...$endif$`
//! - For loops: `$for(items)$...$sep$...$endfor$`
//! - Partials: `$partial()$` or `$var:partial()$`
//! - Pipes: `$var/uppercase$`, `$var/split "\n"/first$`
//! - Comments: `$-- comment`
//!
//! Unlike Pandoc, templates are whitespace-exact: a directive on a line of its
//! own keeps its surrounding newlines.
//!
//! # Example
//!
//! ```
//! use errata_template::{Template, TemplateContext, TemplateValue};
//!
//! let template = Template::compile("Hello, $name/uppercase$!").unwrap();
//!
//! let mut ctx = TemplateContext::new();
//! ctx.insert("name", TemplateValue::String("World".to_string()));
//!
//! assert_eq!(template.render(&ctx).unwrap(), "Hello, WORLD!");
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod eval_context;
pub mod evaluator;
pub mod parser;
pub mod pipes;
pub mod resolver;

// Re-export main types at crate root
pub use ast::{
    Comment, Conditional, ForLoop, Literal, Partial, Pipe, PipeArg, Span, TemplateNode,
    ValueSource, VariableRef,
};
pub use context::{TemplateContext, TemplateValue};
pub use error::{TemplateError, TemplateResult};
pub use eval_context::EvalContext;
pub use parser::Template;
pub use pipes::{PipeFn, PipeTable};
pub use resolver::{MemoryResolver, NullResolver, PartialResolver};
