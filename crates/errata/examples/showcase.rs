//! Rendering showcase.
//!
//! Prints a series of diagnostics, from a bare message to a compiler-style
//! report with causes, notes, helps and wrapped errors.
//!
//! Run with `RUST_LOG=errata=debug` to see registry changes and render
//! fallbacks.

use errata::{Diagnostic, Registry, warnings};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn separator() {
    print!("\n----\n");
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "errata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    print!("{}", Diagnostic::new("test"));
    separator();

    print!(
        "{}",
        Diagnostic::new("test").wrap(io::Error::other("wrapped plain error"))
    );
    separator();

    print!(
        "{}",
        Diagnostic::new("test")
            .wrap(Diagnostic::new("wrapped").wrap(io::Error::other("wrapped plain error")))
    );
    separator();

    print!(
        "{}",
        Diagnostic::new("test")
            .cause(io::Error::other("cause of the 1st error\nsecond line"))
            .wrap(
                Diagnostic::new("wrapped")
                    .cause(io::Error::other("cause of the 2nd error\nsecond line"))
            )
    );
    separator();

    print!(
        "{}",
        Diagnostic::new("test notes")
            .cause(io::Error::other("cause \nsecond line"))
            .note("this is because \nthis and this")
            .note("also \nthat")
            .help("do this \nbecause of reasons")
            .help("also \ndo that")
    );
    separator();

    print!(
        "{}",
        Diagnostic::new("with code")
            .cause(io::Error::other("cause \nsecond line"))
            .with_code(404)
    );
    separator();

    let earlier = Diagnostic::new("with code");
    print!(
        "{}",
        Diagnostic::new("test").help_if("do this \nbecause the condition is true", || {
            earlier.to_string().contains("with code")
        })
    );
    separator();

    print!("{}", rust_like());
    separator();

    print!(
        "{}",
        Diagnostic::new("this is the main message")
            .note("this is the 1st note\nthis is the second line of the first note")
            .note("this is the 2nd note\nthis is the second line of the second note")
    );
    separator();

    let other = Diagnostic::new("second").note("this might be happening because");
    print!("{}", Diagnostic::new("first").help("do this!").wrap(other));
    separator();

    print!(
        "{}",
        Diagnostic::new("unknown output format")
            .cause(io::Error::other("format: jsn"))
            .suggest_value("jsn", &["json", "yaml", "toml"])
    );
    separator();

    print!(
        "{}",
        warnings::new("deprecated option 'colour'").suggest_value("colour", &["color", "columns"])
    );
    separator();

    let plain = Arc::new(
        Registry::builder()
            .fragment(errata::Fragment::Cause, "\n  caused by: $cause$")
            .build(),
    );
    print!(
        "{}",
        plain
            .new_error("scoped registry")
            .cause(io::Error::other("a custom cause layout"))
    );
    separator();

    if let Err(err) = call_function() {
        print!("{}", err);
    }
    println!();
}

fn rust_like() -> Diagnostic {
    Diagnostic::new("'Foo' is not an iterator")
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
        )
}

fn call_function() -> Result<(), Diagnostic> {
    call_third_party().map_err(|err| {
        Diagnostic::new("failed to execute our own function")
            .causef(format_args!("some additional details about the error"))
            .wrap(err)
            .help("do this to fix the error")
    })
}

fn call_third_party() -> Result<(), Diagnostic> {
    let result: Result<(), io::Error> = Err(io::Error::other("something went wrong"));
    result.map_err(|err| Diagnostic::new("failed to execute third party library").cause(err))
}
