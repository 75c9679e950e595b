//! Core diagnostic type.
//!
//! A [`Diagnostic`] is one error: a message, an optional cause, an optional
//! numeric code, notes, helps, and the sibling errors it wraps. Diagnostics are
//! composed with consuming builder methods and rendered through a
//! [`Registry`](crate::Registry).

use crate::registry::Registry;
use crate::suggest::suggest_help;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Any error that can be carried as a cause or wrapped entry.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A numeric diagnostic code, displayed as `E` plus four digits (`E0277`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Largest valid code.
    pub const MAX: u16 = 9999;

    /// Create a code.
    ///
    /// # Panics
    ///
    /// Panics if `code` is greater than [`ErrorCode::MAX`].
    pub fn new(code: u16) -> Self {
        match Self::try_new(code) {
            Some(code) => code,
            None => panic!("number out of range: {}", code),
        }
    }

    /// Create a code, or `None` if `code` is greater than [`ErrorCode::MAX`].
    pub fn try_new(code: u16) -> Option<Self> {
        (code <= Self::MAX).then_some(Self(code))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.0)
    }
}

/// A cause given as formatted text rather than as an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CauseMessage(pub String);

/// A composable, renderable error.
///
/// # Example
///
/// ```
/// use errata::{Diagnostic, set_decoration};
///
/// set_decoration(false);
///
/// let err = Diagnostic::new("'Foo' is not an iterator")
///     .with_code(277)
///     .cause(std::io::Error::other("src/main.rs:4:16"))
///     .note("required by 'std::iter::IntoIterator::into_iter'")
///     .help("maybe try calling '.iter()'");
///
/// assert_eq!(
///     err.render(),
///     "error[E0277]: 'Foo' is not an iterator\n  \
///      --> src/main.rs:4:16\n   \
///      = note: required by 'std::iter::IntoIterator::into_iter'\n   \
///      = help: maybe try calling '.iter()'"
/// );
/// ```
#[derive(Debug)]
pub struct Diagnostic {
    message: String,
    cause: Option<BoxError>,
    code: Option<ErrorCode>,
    notes: Vec<String>,
    helps: Vec<String>,
    wrapped: Vec<BoxError>,
    extra_data: HashMap<String, serde_json::Value>,

    /// Registry used to render this diagnostic.
    ///
    /// `None` renders with the process default as it is at render time.
    registry: Option<Arc<Registry>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            wrapped: Vec::new(),
            extra_data: HashMap::new(),
            registry: None,
        }
    }

    /// Upgrade any error to a diagnostic.
    ///
    /// A boxed `Diagnostic` is returned as is; any other error becomes a new
    /// diagnostic whose message is the error's text.
    pub fn extend(err: impl Into<BoxError>) -> Self {
        match err.into().downcast::<Diagnostic>() {
            Ok(diagnostic) => *diagnostic,
            Err(other) => Self::new(other.to_string()),
        }
    }

    /// Like [`Diagnostic::extend`], but with `message` as the message.
    ///
    /// An existing diagnostic keeps everything else it carries.
    pub fn extend_with_message(err: impl Into<BoxError>, message: impl Into<String>) -> Self {
        match err.into().downcast::<Diagnostic>() {
            Ok(diagnostic) => {
                let mut diagnostic = *diagnostic;
                diagnostic.message = message.into();
                diagnostic
            }
            Err(_) => Self::new(message),
        }
    }

    /// Render with `registry` instead of the process default.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Attach a sibling error, rendered after this one.
    pub fn wrap(mut self, err: impl Into<BoxError>) -> Self {
        self.wrapped.push(err.into());
        self
    }

    /// Set the underlying cause, replacing any previous one.
    pub fn cause(mut self, err: impl Into<BoxError>) -> Self {
        self.cause = Some(err.into());
        self
    }

    /// Set the cause from formatted text.
    pub fn causef(self, args: fmt::Arguments<'_>) -> Self {
        self.cause(CauseMessage(args.to_string()))
    }

    /// Set the diagnostic code.
    ///
    /// # Panics
    ///
    /// Panics if `code` is greater than 9999.
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(ErrorCode::new(code));
        self
    }

    /// Add a help line. Empty text is ignored.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        let help = help.into();
        if !help.is_empty() {
            self.helps.push(help);
        }
        self
    }

    pub fn helpf(self, args: fmt::Arguments<'_>) -> Self {
        self.help(args.to_string())
    }

    /// Add a help line if `condition` returns true.
    pub fn help_if(self, help: impl Into<String>, condition: impl FnOnce() -> bool) -> Self {
        if condition() { self.help(help) } else { self }
    }

    /// Add the help line produced by `f`, unless it is empty.
    pub fn help_from(self, f: impl FnOnce() -> String) -> Self {
        self.help(f())
    }

    /// Add a note. Empty text is ignored.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        if !note.is_empty() {
            self.notes.push(note);
        }
        self
    }

    pub fn notef(self, args: fmt::Arguments<'_>) -> Self {
        self.note(args.to_string())
    }

    /// Add values visible to fragments by name.
    ///
    /// Values are merged over the built-in names (`message`, `cause`, ...),
    /// so they can shadow them. Setting a key twice keeps the last value.
    pub fn extra_data<I, K, V>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.extra_data
            .extend(data.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a help suggesting the closest of `candidates` to `input`.
    ///
    /// See [`suggest_help`] for the wording.
    pub fn suggest_value<S: AsRef<str>>(self, input: &str, candidates: &[S]) -> Self {
        match suggest_help(input, candidates) {
            Some(help) => self.help(help),
            None => self,
        }
    }

    /// Render with the bound registry, or the process default.
    pub fn render(&self) -> String {
        match &self.registry {
            Some(registry) => registry.render(self),
            None => crate::default_registry().render(self),
        }
    }

    /// Render with `registry`, ignoring the bound one.
    ///
    /// Causes and wrapped diagnostics still render with their own registries.
    pub fn render_with(&self, registry: &Registry) -> String {
        registry.render(self)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause_ref(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn helps(&self) -> &[String] {
        &self.helps
    }

    /// The wrapped errors, in attachment order.
    pub fn wrapped(&self) -> &[BoxError] {
        &self.wrapped
    }

    pub fn extra(&self) -> &HashMap<String, serde_json::Value> {
        &self.extra_data
    }

    pub fn registry(&self) -> Option<&Arc<Registry>> {
        self.registry.as_ref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
