/*
 * resolver.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Partial template resolution.
//!
//! Partials are resolved by name at evaluation time, so a partial may refer to
//! partials that are registered after it was compiled.

use crate::error::TemplateResult;
use crate::parser::Template;
use std::collections::HashMap;

/// Trait for looking up compiled partial templates.
pub trait PartialResolver {
    /// Look up a partial template by name.
    ///
    /// Returns `None` if no partial with that name exists.
    fn get_partial(&self, name: &str) -> Option<&Template>;
}

/// Resolver that returns nothing.
///
/// Use this resolver for templates that don't use partials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl PartialResolver for NullResolver {
    fn get_partial(&self, _name: &str) -> Option<&Template> {
        None
    }
}

/// Resolver that holds compiled partials in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    partials: HashMap<String, Template>,
}

impl MemoryResolver {
    /// Create a new empty memory resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compiled partial to the resolver.
    pub fn add(&mut self, name: impl Into<String>, template: Template) -> &mut Self {
        self.partials.insert(name.into(), template);
        self
    }

    /// Compile `source` and add it under `name`.
    ///
    /// The partial name is used as the template name in parse errors.
    pub fn add_source(&mut self, name: impl Into<String>, source: &str) -> TemplateResult<&mut Self> {
        let name = name.into();
        let template = Template::compile_named(source, &name)?;
        Ok(self.add(name, template))
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}

impl PartialResolver for MemoryResolver {
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.partials.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;

    #[test]
    fn test_null_resolver() {
        assert!(NullResolver.get_partial("anything").is_none());
    }

    #[test]
    fn test_memory_resolver() {
        let mut resolver = MemoryResolver::new();
        resolver.add_source("header", "# $title$").unwrap();

        assert_eq!(resolver.len(), 1);
        assert!(resolver.get_partial("header").is_some());
        assert!(resolver.get_partial("footer").is_none());
    }

    #[test]
    fn test_memory_resolver_reports_partial_name_on_parse_error() {
        let mut resolver = MemoryResolver::new();
        let err = resolver.add_source("broken", "$if(x)$never closed").unwrap_err();

        match err {
            TemplateError::ParseError { template, .. } => assert_eq!(template, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
