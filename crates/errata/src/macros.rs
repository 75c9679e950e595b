//! Macros for creating diagnostics from format strings.

/// Create a [`Diagnostic`](crate::Diagnostic) with a formatted message.
///
/// # Example
///
/// ```
/// use errata::diagnostic;
///
/// let err = diagnostic!("unknown key '{}'", "colour");
/// assert_eq!(err.message(), "unknown key 'colour'");
/// ```
#[macro_export]
macro_rules! diagnostic {
    ($($arg:tt)*) => {
        $crate::Diagnostic::new(::std::format!($($arg)*))
    };
}

/// Create a warning with a formatted message.
///
/// # Example
///
/// ```
/// use errata::warning;
///
/// let warn = warning!("{} is deprecated", "format");
/// assert!(errata::warnings::is(&warn));
/// ```
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        $crate::warnings::new(::std::format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use crate::style::set_decoration;

    #[test]
    fn test_diagnostic_macro() {
        set_decoration(false);
        let value = 42;
        let err = diagnostic!("invalid value: {value}");
        assert_eq!(err.message(), "invalid value: 42");
        assert!(err.registry().is_none());
    }

    #[test]
    fn test_warning_macro() {
        set_decoration(false);
        let warn = warning!("{} is deprecated", "format");
        assert_eq!(warn.render(), "warning: format is deprecated");
    }
}
