/*
 * pipes.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Pipe functions.
//!
//! A pipe transforms a value: `$name/uppercase$` passes the value of `name`
//! through the `uppercase` pipe. Pipes are looked up by name in a
//! [`PipeTable`]. The built-in table provides the list and string utilities
//! that templates need regardless of what the host application registers.

use crate::ast::PipeArg;
use crate::context::TemplateValue;
use crate::error::{TemplateError, TemplateResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A named pipe function.
///
/// Receives the piped value and the pipe's arguments, and returns the
/// transformed value.
pub type PipeFn =
    Arc<dyn Fn(&TemplateValue, &[PipeArg]) -> TemplateResult<TemplateValue> + Send + Sync>;

/// Table of pipe functions keyed by name.
#[derive(Clone, Default)]
pub struct PipeTable {
    pipes: BTreeMap<String, PipeFn>,
}

impl PipeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the built-in pipes.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert("first", |value, args| {
            expect_no_args("first", args)?;
            Ok(as_list(value).into_iter().next().unwrap_or_default())
        });
        table.insert("last", |value, args| {
            expect_no_args("last", args)?;
            Ok(as_list(value).pop().unwrap_or_default())
        });
        table.insert("rest", |value, args| {
            expect_no_args("rest", args)?;
            Ok(TemplateValue::List(as_list(value).into_iter().skip(1).collect()))
        });
        table.insert("allbutlast", |value, args| {
            expect_no_args("allbutlast", args)?;
            let mut items = as_list(value);
            items.pop();
            Ok(TemplateValue::List(items))
        });
        table.insert("length", |value, args| {
            expect_no_args("length", args)?;
            let len = match value {
                TemplateValue::String(s) => s.chars().count(),
                TemplateValue::List(items) => items.len(),
                TemplateValue::Map(m) => m.len(),
                TemplateValue::Bool(_) => 1,
                TemplateValue::Null => 0,
            };
            Ok(TemplateValue::String(len.to_string()))
        });
        table.insert("reverse", |value, args| {
            expect_no_args("reverse", args)?;
            Ok(match value {
                TemplateValue::String(s) => TemplateValue::String(s.chars().rev().collect()),
                other => TemplateValue::List(as_list(other).into_iter().rev().collect()),
            })
        });
        table.insert("uppercase", |value, args| {
            expect_no_args("uppercase", args)?;
            Ok(map_strings(value, &|s: &str| s.to_uppercase()))
        });
        table.insert("lowercase", |value, args| {
            expect_no_args("lowercase", args)?;
            Ok(map_strings(value, &|s: &str| s.to_lowercase()))
        });
        table.insert("chomp", |value, args| {
            expect_no_args("chomp", args)?;
            Ok(map_strings(value, &|s: &str| s.trim_end_matches('\n').to_string()))
        });
        table.insert("lines", |value, args| {
            expect_no_args("lines", args)?;
            Ok(split_value(value, "\n"))
        });
        table.insert("split", |value, args| {
            let separator = single_string_arg("split", args)?;
            if separator.is_empty() {
                return Err(TemplateError::InvalidPipeArgs {
                    pipe: "split".to_string(),
                    message: "separator must not be empty".to_string(),
                });
            }
            Ok(split_value(value, separator))
        });
        table.insert("prepend", |value, args| {
            let prefix = single_string_arg("prepend", args)?;
            Ok(TemplateValue::String(format!("{}{}", prefix, value.render())))
        });
        table.insert("append", |value, args| {
            let suffix = single_string_arg("append", args)?;
            Ok(TemplateValue::String(format!("{}{}", value.render(), suffix)))
        });
        table
    }

    /// Register a pipe, replacing any previous pipe of the same name.
    pub fn insert<F>(&mut self, name: impl Into<String>, pipe: F)
    where
        F: Fn(&TemplateValue, &[PipeArg]) -> TemplateResult<TemplateValue> + Send + Sync + 'static,
    {
        self.pipes.insert(name.into(), Arc::new(pipe));
    }

    /// Register an already shared pipe function.
    pub fn insert_shared(&mut self, name: impl Into<String>, pipe: PipeFn) {
        self.pipes.insert(name.into(), pipe);
    }

    /// Copy every pipe of `other` into this table; `other` wins on name clashes.
    pub fn extend_from(&mut self, other: &PipeTable) {
        for (name, pipe) in &other.pipes {
            self.pipes.insert(name.clone(), Arc::clone(pipe));
        }
    }

    /// Look up a pipe by name.
    pub fn get(&self, name: &str) -> Option<&PipeFn> {
        self.pipes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pipes.contains_key(name)
    }

    /// Names of all registered pipes, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pipes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Apply the named pipe to a value.
    pub fn apply(
        &self,
        name: &str,
        value: &TemplateValue,
        args: &[PipeArg],
    ) -> TemplateResult<TemplateValue> {
        let pipe = self.get(name).ok_or_else(|| TemplateError::UnknownPipe {
            name: name.to_string(),
        })?;
        pipe(value, args)
    }
}

impl fmt::Debug for PipeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.pipes.keys()).finish()
    }
}

/// Wrap a plain string transformation as a pipe function.
///
/// The value is rendered to text first; lists are transformed element-wise.
/// Arguments are rejected.
pub fn string_pipe<F>(name: impl Into<String>, transform: F) -> PipeFn
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    let name = name.into();
    Arc::new(
        move |value: &TemplateValue, args: &[PipeArg]| -> TemplateResult<TemplateValue> {
            expect_no_args(&name, args)?;
            Ok(match value {
                TemplateValue::List(_) => map_strings(value, &transform),
                other => TemplateValue::String(transform(&other.render())),
            })
        },
    )
}

fn as_list(value: &TemplateValue) -> Vec<TemplateValue> {
    match value {
        TemplateValue::List(items) => items.clone(),
        TemplateValue::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

fn map_strings(value: &TemplateValue, transform: &dyn Fn(&str) -> String) -> TemplateValue {
    match value {
        TemplateValue::String(s) => TemplateValue::String(transform(s)),
        TemplateValue::List(items) => {
            TemplateValue::List(items.iter().map(|v| map_strings(v, transform)).collect())
        }
        other => other.clone(),
    }
}

fn split_value(value: &TemplateValue, separator: &str) -> TemplateValue {
    match value {
        TemplateValue::Null => TemplateValue::List(Vec::new()),
        other => TemplateValue::List(
            other
                .render()
                .split(separator)
                .map(|part| TemplateValue::String(part.to_string()))
                .collect(),
        ),
    }
}

fn expect_no_args(pipe: &str, args: &[PipeArg]) -> TemplateResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::InvalidPipeArgs {
            pipe: pipe.to_string(),
            message: format!("expected no arguments, got {}", args.len()),
        })
    }
}

fn single_string_arg<'a>(pipe: &str, args: &'a [PipeArg]) -> TemplateResult<&'a str> {
    match args {
        [PipeArg::String(s)] => Ok(s.as_str()),
        _ => Err(TemplateError::InvalidPipeArgs {
            pipe: pipe.to_string(),
            message: "expected a single string argument".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, value: TemplateValue, args: &[PipeArg]) -> TemplateValue {
        PipeTable::builtin().apply(name, &value, args).unwrap()
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        let value = apply(
            "split",
            TemplateValue::from("a\n\nb\n"),
            &[PipeArg::String("\n".to_string())],
        );
        assert_eq!(value, TemplateValue::from(vec!["a", "", "b", ""]));
    }

    #[test]
    fn test_first_and_rest() {
        let list = TemplateValue::from(vec!["one", "two", "three"]);
        assert_eq!(apply("first", list.clone(), &[]), TemplateValue::from("one"));
        assert_eq!(
            apply("rest", list.clone(), &[]),
            TemplateValue::from(vec!["two", "three"])
        );
        assert_eq!(apply("last", list.clone(), &[]), TemplateValue::from("three"));
        assert_eq!(
            apply("allbutlast", list, &[]),
            TemplateValue::from(vec!["one", "two"])
        );
    }

    #[test]
    fn test_first_of_empty_list_is_null() {
        assert_eq!(
            apply("first", TemplateValue::List(vec![]), &[]),
            TemplateValue::Null
        );
    }

    #[test]
    fn test_scalar_treated_as_single_item_list() {
        assert_eq!(
            apply("rest", TemplateValue::from("only"), &[]),
            TemplateValue::List(vec![])
        );
        assert_eq!(
            apply("first", TemplateValue::from("only"), &[]),
            TemplateValue::from("only")
        );
    }

    #[test]
    fn test_prepend_and_append() {
        let args = [PipeArg::String("[".to_string())];
        assert_eq!(
            apply("prepend", TemplateValue::from("E0001"), &args),
            TemplateValue::from("[E0001")
        );
        let args = [PipeArg::String("]".to_string())];
        assert_eq!(
            apply("append", TemplateValue::from("E0001"), &args),
            TemplateValue::from("E0001]")
        );
    }

    #[test]
    fn test_length_and_case() {
        assert_eq!(
            apply("length", TemplateValue::from(vec!["a", "b"]), &[]),
            TemplateValue::from("2")
        );
        assert_eq!(
            apply("uppercase", TemplateValue::from(vec!["a", "b"]), &[]),
            TemplateValue::from(vec!["A", "B"])
        );
    }

    #[test]
    fn test_unknown_pipe() {
        let err = PipeTable::builtin()
            .apply("nope", &TemplateValue::Null, &[])
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPipe {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_args() {
        let err = PipeTable::builtin()
            .apply("split", &TemplateValue::from("a"), &[PipeArg::Integer(1)])
            .unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPipeArgs { .. }));

        let err = PipeTable::builtin()
            .apply("first", &TemplateValue::from("a"), &[PipeArg::Integer(1)])
            .unwrap_err();
        assert!(matches!(err, TemplateError::InvalidPipeArgs { .. }));
    }

    #[test]
    fn test_string_pipe_and_extend() {
        let mut table = PipeTable::builtin();
        let mut custom = PipeTable::new();
        custom.insert_shared("shout", string_pipe("shout", |s| format!("{}!", s)));
        custom.insert_shared("first", string_pipe("first", |_| "overridden".to_string()));
        table.extend_from(&custom);

        assert_eq!(
            table.apply("shout", &TemplateValue::from("hey"), &[]).unwrap(),
            TemplateValue::from("hey!")
        );
        assert_eq!(
            table.apply("first", &TemplateValue::from("x"), &[]).unwrap(),
            TemplateValue::from("overridden")
        );
        assert!(table.contains("rest"));
    }
}
