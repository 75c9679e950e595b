//! Rendering of diagnostics with the built-in fragments.
//!
//! These tests never change the process default registry; see
//! `default_overrides.rs` for that.

use errata::{Diagnostic, diagnostic, set_decoration, warnings};
use pretty_assertions::assert_eq;
use std::io;

fn render(err: &Diagnostic) -> String {
    set_decoration(false);
    err.render()
}

#[test]
fn test_no_wrapped_errors() {
    assert_eq!(render(&Diagnostic::new("test")), "error: test");
}

#[test]
fn test_formatted_message() {
    assert_eq!(
        render(&diagnostic!("formatted {}", "message")),
        "error: formatted message"
    );
}

#[test]
fn test_with_error_code() {
    assert_eq!(
        render(&Diagnostic::new("test").with_code(123)),
        "error[E0123]: test"
    );
}

#[test]
fn test_wrapped_diagnostic() {
    let err = Diagnostic::new("test").wrap(Diagnostic::new("wrapped"));
    assert_eq!(render(&err), "error: test\n\nerror: wrapped");
}

#[test]
fn test_wrapped_foreign_error_uses_display() {
    let err = Diagnostic::new("test").wrap(io::Error::other("plain"));
    assert_eq!(render(&err), "error: test\n\nplain");
}

#[test]
fn test_nested_wraps() {
    let err = Diagnostic::new("test")
        .wrap(Diagnostic::new("wrapped").wrap(io::Error::other("wrapped plain error")))
        .wrap(Diagnostic::new("sibling"));
    assert_eq!(
        render(&err),
        "error: test\n\nerror: wrapped\n\nwrapped plain error\n\nerror: sibling"
    );
}

#[test]
fn test_cause() {
    let err = Diagnostic::new("test")
        .cause(io::Error::other("cause of the 1st error\nplain error"))
        .wrap(
            Diagnostic::new("wrapped")
                .cause(Diagnostic::new("cause of the 2nd error\nerrors.New error")),
        );
    let expected = "\
error: test
  --> cause of the 1st error
   | plain error

error: wrapped
  --> error: cause of the 2nd error
   | errors.New error";
    assert_eq!(render(&err), expected);
}

#[test]
fn test_notes() {
    let err = Diagnostic::new("notes")
        .cause(io::Error::other("cause of the 1st error\nplain error"))
        .note("this is because \nthis and this")
        .note("also \nthat");
    let expected = concat!(
        "error: notes\n",
        "  --> cause of the 1st error\n",
        "   | plain error\n",
        "   = note: this is because \n",
        "           this and this\n",
        "   = note: also \n",
        "           that",
    );
    assert_eq!(render(&err), expected);
}

#[test]
fn test_helps() {
    let err = Diagnostic::new("helps")
        .cause(io::Error::other("cause of the 1st error\nplain error"))
        .help("do this \nbecause of reasons")
        .help("also \ndo that");
    let expected = concat!(
        "error: helps\n",
        "  --> cause of the 1st error\n",
        "   | plain error\n",
        "   = help: do this \n",
        "           because of reasons\n",
        "   = help: also \n",
        "           do that",
    );
    assert_eq!(render(&err), expected);
}

#[test]
fn test_help_from_skips_empty() {
    let err = Diagnostic::new("helps")
        .cause(io::Error::other("cause of the 1st error\nplain error"))
        .help_from(|| "do this \nbecause of reasons".to_string())
        .help_from(String::new);
    let expected = concat!(
        "error: helps\n",
        "  --> cause of the 1st error\n",
        "   | plain error\n",
        "   = help: do this \n",
        "           because of reasons",
    );
    assert_eq!(render(&err), expected);
}

#[test]
fn test_help_if() {
    let plain = Diagnostic::new("test");
    let skipped = Diagnostic::new("test").help_if("never", || false);
    assert_eq!(render(&skipped), render(&plain));

    let earlier = Diagnostic::new("with code");
    let shown = Diagnostic::new("test").help_if("do this", || {
        earlier.to_string().contains("with code")
    });
    assert_eq!(render(&shown), "error: test\n   = help: do this");
}

#[test]
fn test_notes_and_helps_without_cause() {
    let err = Diagnostic::new("first").help("do this!").wrap(
        Diagnostic::new("second").note("this might be happening because"),
    );
    let expected = "\
error: first
   = help: do this!

error: second
   = note: this might be happening because";
    assert_eq!(render(&err), expected);
}

#[test]
fn test_rust_like_error() {
    let err = Diagnostic::new("'Foo' is not an iterator")
        .with_code(277)
        .causef(format_args!(
            "src/main.rs:4:16\n\n     for foo in Foo {{}}\n                ^^^ 'Foo' is not an iterator\n"
        ))
        .note("maybe try calling '.iter()' or a similar method")
        .help("the trait 'std::iter::Iterator' is not implemented for 'Foo'")
        .note("required by 'std::iter::IntoIterator::into_iter'")
        .wrap(
            Diagnostic::new("'&str' is not an iterator")
                .with_code(277)
                .causef(format_args!(
                    "src/main.rs:5:16\n\n\t for foo in \"\" {{}}\n\t\t\t\t^^ '&str' is not an iterator\n"
                ))
                .help("call '.chars()' or '.bytes() on '&str'")
                .help("the trait 'std::iter::Iterator' is not implemented for '&str'")
                .note("required by 'std::iter::IntoIterator::into_iter'"),
        );

    // Cause lines keep the "| " marker even when the line itself is empty
    let expected = concat!(
        "error[E0277]: 'Foo' is not an iterator\n",
        "  --> src/main.rs:4:16\n",
        "   | \n",
        "   |      for foo in Foo {}\n",
        "   |                 ^^^ 'Foo' is not an iterator\n",
        "   | \n",
        "   = note: maybe try calling '.iter()' or a similar method\n",
        "   = note: required by 'std::iter::IntoIterator::into_iter'\n",
        "   = help: the trait 'std::iter::Iterator' is not implemented for 'Foo'\n",
        "\n",
        "error[E0277]: '&str' is not an iterator\n",
        "  --> src/main.rs:5:16\n",
        "   | \n",
        "   | \t for foo in \"\" {}\n",
        "   | \t\t\t\t^^ '&str' is not an iterator\n",
        "   | \n",
        "   = note: required by 'std::iter::IntoIterator::into_iter'\n",
        "   = help: call '.chars()' or '.bytes() on '&str'\n",
        "   = help: the trait 'std::iter::Iterator' is not implemented for '&str'",
    );
    assert_eq!(render(&err), expected);
}

#[test]
fn test_extend() {
    let err = Diagnostic::extend(
        Diagnostic::new("original").causef(format_args!("original cause")),
    )
    .causef(format_args!("override original cause"));
    assert_eq!(render(&err), "error: original\n  --> override original cause");
}

#[test]
fn test_extend_is_idempotent() {
    let once = Diagnostic::extend(Diagnostic::new("original").note("n"));
    let expected = render(&once);
    let twice = Diagnostic::extend(Diagnostic::extend(once));
    assert_eq!(render(&twice), expected);
}

#[test]
fn test_empty_cause_keeps_marker() {
    let err = Diagnostic::new("x").cause(io::Error::other(""));
    assert!(err.cause_ref().is_some());
    assert_eq!(render(&err), "error: x\n  --> ");

    let err = Diagnostic::new("x").causef(format_args!("")).note("n");
    assert_eq!(render(&err), "error: x\n  --> \n   = note: n");
}

#[test]
fn test_extend_foreign_error() {
    let err = Diagnostic::extend(io::Error::other("disk full"));
    assert_eq!(render(&err), "error: disk full");
}

#[test]
fn test_extend_with_message() {
    let err = Diagnostic::extend_with_message(
        Diagnostic::new("original").causef(format_args!("original cause")),
        "overridden message",
    );
    assert_eq!(
        render(&err),
        "error: overridden message\n  --> original cause"
    );
}

#[test]
fn test_suggest_value() {
    let err = Diagnostic::new("unknown format").suggest_value("fo", &["foo", "bar", "foobar"]);
    assert_eq!(
        render(&err),
        "error: unknown format\n   = help: did you mean: 'foo'?"
    );

    let err = Diagnostic::new("missing format").suggest_value("", &["b", "a"]);
    assert_eq!(
        render(&err),
        "error: missing format\n   = help: available values:\n           - a\n           - b"
    );
}

#[test]
fn test_extra_data_is_visible_to_fragments() {
    let registry = std::sync::Arc::new(
        errata::Registry::builder()
            .fragment(errata::Fragment::Cause, "$if(path)$\n  --> $path$:$line$$endif$")
            .build(),
    );
    let err = registry
        .new_error("bad value")
        .extra_data([("path", serde_json::json!("config.toml")), ("line", serde_json::json!(12))]);
    assert_eq!(render(&err), "error: bad value\n  --> config.toml:12");
}

#[test]
fn test_warnings() {
    assert_eq!(render(&warnings::new("test")), "warning: test");
    assert_eq!(
        render(&warnings::newf(format_args!("test {}", "format"))),
        "warning: test format"
    );
    assert_eq!(
        render(&warnings::new("wrapper").cause(Diagnostic::new("error"))),
        "warning: wrapper\n  --> error: error"
    );
    assert_eq!(
        render(&warnings::new("wrapper").wrap(Diagnostic::new("error"))),
        "warning: wrapper\n\nerror: error"
    );
}

#[test]
fn test_warnings_is() {
    assert!(warnings::is(&warnings::new("test")));
    assert!(warnings::is(
        &warnings::new("wrapper").cause(Diagnostic::new("error"))
    ));
    assert!(!warnings::is(&Diagnostic::new("test")));
}

#[test]
fn test_display_matches_render() {
    let err = Diagnostic::new("test").with_code(1).note("n");
    assert_eq!(err.to_string(), render(&err));
}
