//! Composable, compiler-style diagnostic errors.
//!
//! A [`Diagnostic`] carries a message, an optional cause, an optional code,
//! notes, helps, and any number of wrapped sibling errors. Rendering follows
//! the layout of the Rust compiler:
//!
//! ```text
//! error[E0277]: 'Foo' is not an iterator
//!   --> src/main.rs:4:16
//!    |
//!    |      for foo in Foo {}
//!    |                 ^^^ 'Foo' is not an iterator
//!    = note: required by 'std::iter::IntoIterator::into_iter'
//!    = help: the trait 'std::iter::Iterator' is not implemented for 'Foo'
//!
//! error[E0277]: '&str' is not an iterator
//!   --> src/main.rs:5:16
//! ```
//!
//! # Architecture
//!
//! - [`diagnostic`]: the [`Diagnostic`] node and its builder methods
//! - [`registry`]: [`Registry`], the fragment templates and functions that
//!   turn a diagnostic into text
//! - [`global`]: the process default registry and its setters
//! - [`fragments`]: the built-in fragment templates
//! - [`suggest`]: "did you mean" suggestions by edit distance
//! - [`warnings`]: diagnostics rendered as `warning`
//! - [`style`]: ANSI decoration
//!
//! Fragments are templates for the `errata-template` engine. Override them
//! per registry with [`RegistryBuilder::fragment`], or process-wide with
//! [`set_fragment`] and friends.
//!
//! # Example
//!
//! ```
//! use errata::{Diagnostic, set_decoration};
//!
//! set_decoration(false);
//!
//! let err = Diagnostic::new("failed to load config")
//!     .cause(std::io::Error::other("permission denied"))
//!     .suggest_value("yml", &["yaml", "json"]);
//!
//! assert_eq!(
//!     err.to_string(),
//!     "error: failed to load config\n  --> permission denied\n   = help: did you mean: 'yaml'?"
//! );
//! ```

pub mod diagnostic;
pub mod fragments;
pub mod global;
pub mod macros;
pub mod registry;
pub mod style;
pub mod suggest;
pub mod warnings;

pub use diagnostic::{BoxError, CauseMessage, Diagnostic, ErrorCode};
pub use fragments::Fragment;
pub use global::{
    add_function, add_functions, default_registry, reset, set_cause_fragment, set_fragment,
    set_helps_fragment, set_message_prefix_fragment, set_notes_fragment,
};
pub use registry::{Registry, RegistryBuilder};
pub use style::{Style, reset_decoration, set_decoration};
pub use suggest::suggest_help;

// Template types needed to write custom functions
pub use errata_template::{
    PipeArg, PipeFn, PipeTable, TemplateError, TemplateResult, TemplateValue, pipes::string_pipe,
};
