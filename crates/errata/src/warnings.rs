//! Warnings: diagnostics rendered with a `warning` prefix.
//!
//! Warnings are ordinary [`Diagnostic`]s bound to a registry whose
//! `message-prefix` fragment prints a bold yellow `warning` (or
//! `warning[E0123]`).

use crate::diagnostic::{BoxError, Diagnostic};
use crate::fragments::Fragment;
use crate::registry::Registry;
use crate::style::Style;
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub const MESSAGE_PREFIX: &str = concat!(
    r#"$if(code)$$code/prepend "warning["/append "]"/bold-yellow$"#,
    r#"$else$$"warning"/bold-yellow$$endif$"#,
);

static WARNINGS: Lazy<Arc<Registry>> = Lazy::new(|| {
    Arc::new(
        Registry::builder()
            .fragment(Fragment::MessagePrefix, MESSAGE_PREFIX)
            .add_functions([(Style::BoldYellow.name(), Style::BoldYellow.pipe())])
            .build(),
    )
});

/// The registry warnings render with.
pub fn registry() -> Arc<Registry> {
    Arc::clone(&WARNINGS)
}

/// Create a warning.
pub fn new(message: impl Into<String>) -> Diagnostic {
    WARNINGS.new_error(message)
}

pub fn newf(args: fmt::Arguments<'_>) -> Diagnostic {
    WARNINGS.new_errorf(args)
}

/// Turn any error into a warning.
///
/// A `Diagnostic` keeps its contents and is rebound to the warnings registry.
pub fn from(err: impl Into<BoxError>) -> Diagnostic {
    WARNINGS.extend(err)
}

/// Whether `err` is a diagnostic whose rendered first line mentions `warning`.
pub fn is(err: &(dyn Error + 'static)) -> bool {
    err.downcast_ref::<Diagnostic>().is_some_and(|diagnostic| {
        diagnostic
            .render()
            .lines()
            .next()
            .is_some_and(|line| line.contains("warning"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::set_decoration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warning_prefix() {
        set_decoration(false);
        assert_eq!(new("test").render(), "warning: test");
        assert_eq!(newf(format_args!("test {}", "format")).render(), "warning: test format");
        assert_eq!(new("test").with_code(42).render(), "warning[E0042]: test");
    }

    #[test]
    fn test_registry_has_yellow() {
        let registry = registry();
        assert!(registry.function_names().any(|name| name == "bold-yellow"));
        assert_eq!(registry.fragment("message-prefix"), Some(MESSAGE_PREFIX));
    }

    #[test]
    fn test_from_rebinds_diagnostic() {
        set_decoration(false);
        let warning = from(Diagnostic::new("was an error").note("kept"));
        assert_eq!(warning.render(), "warning: was an error\n   = note: kept");
        assert!(warning.registry().is_some_and(|r| Arc::ptr_eq(r, &registry())));

        let foreign = from(std::io::Error::other("io failed"));
        assert_eq!(foreign.render(), "warning: io failed");
    }

    #[test]
    fn test_is() {
        assert!(is(&new("test")));
        assert!(is(&new("wrapper").cause(Diagnostic::new("error"))));
        assert!(is(&new("coded").with_code(7)));

        assert!(!is(&Diagnostic::new("test")));
        assert!(!is(&std::io::Error::other("warning: not a diagnostic")));
        // Only the first line counts
        assert!(!is(&Diagnostic::new("error").note("warning")));
    }
}
