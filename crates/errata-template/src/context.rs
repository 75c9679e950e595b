/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template value and context types.
//!
//! This module defines the types used to represent template variable values
//! and the context in which templates are evaluated.

use std::collections::HashMap;

/// A value that can be used in template evaluation.
///
/// This mirrors the value types supported by Pandoc's doctemplates library.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateValue {
    /// A string value.
    String(String),

    /// A boolean value.
    Bool(bool),

    /// A list of values.
    List(Vec<TemplateValue>),

    /// A map of string keys to values.
    Map(HashMap<String, TemplateValue>),

    /// A null/missing value.
    #[default]
    Null,
}

impl TemplateValue {
    /// Check if this value is "truthy" for conditional evaluation.
    ///
    /// Truthiness rules (matching Pandoc):
    /// - Any non-empty map is truthy
    /// - Any array containing at least one truthy value is truthy
    /// - Any non-empty string is truthy (even "false")
    /// - Boolean true is truthy
    /// - Everything else is falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            TemplateValue::Bool(b) => *b,
            TemplateValue::String(s) => !s.is_empty(),
            TemplateValue::List(items) => items.iter().any(|v| v.is_truthy()),
            TemplateValue::Map(m) => !m.is_empty(),
            TemplateValue::Null => false,
        }
    }

    /// Get a nested field by path.
    ///
    /// For example, `get_path(&["employee", "salary"])` on a Map containing
    /// `{"employee": {"salary": 50000}}` returns the salary value.
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        if path.is_empty() {
            return Some(self);
        }

        match self {
            TemplateValue::Map(m) => {
                let first = path[0];
                m.get(first).and_then(|v| v.get_path(&path[1..]))
            }
            _ => None,
        }
    }

    /// Render this value as a string for output.
    ///
    /// - String: returned as-is
    /// - Bool: "true" or "" (empty for false)
    /// - List: concatenation of rendered elements
    /// - Map: "true"
    /// - Null: ""
    pub fn render(&self) -> String {
        match self {
            TemplateValue::String(s) => s.clone(),
            TemplateValue::Bool(true) => "true".to_string(),
            TemplateValue::Bool(false) => String::new(),
            TemplateValue::List(items) => items.iter().map(|v| v.render()).collect(),
            TemplateValue::Map(_) => "true".to_string(),
            TemplateValue::Null => String::new(),
        }
    }

    /// Borrow the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TemplateValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TemplateValue>> From<Option<T>> for TemplateValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TemplateValue::Null, Into::into)
    }
}

/// JSON numbers have no template counterpart; they render as their decimal text.
impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            serde_json::Value::Number(n) => TemplateValue::String(n.to_string()),
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(fields) => TemplateValue::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A context for template evaluation containing variable bindings.
///
/// Nested scopes borrow their parent, so opening a scope costs only the
/// bindings it adds.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext<'a> {
    /// Variable bindings at this level.
    variables: HashMap<String, TemplateValue>,

    /// Parent context for nested scopes (e.g., inside for loops).
    parent: Option<&'a TemplateContext<'a>>,
}

impl<'a> TemplateContext<'a> {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Get a variable from the context, checking parent scopes.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.variables
            .get(key)
            .or_else(|| self.parent.and_then(|p| p.get(key)))
    }

    /// Get a variable by path (e.g., `["employee", "salary"]`).
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        if path.is_empty() {
            return None;
        }

        self.get(path[0]).and_then(|v| v.get_path(&path[1..]))
    }

    /// Create a child context for a nested scope (e.g., for loop iteration).
    ///
    /// The child borrows this context and sees its variables.
    pub fn child(&self) -> TemplateContext<'_> {
        TemplateContext {
            variables: HashMap::new(),
            parent: Some(self),
        }
    }
}
