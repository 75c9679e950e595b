/*
 * eval_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Evaluation context for template rendering.
//!
//! This module provides [`EvalContext`], which is threaded through all evaluation
//! functions. It carries:
//!
//! 1. **Variables**: the bindings visible at the current scope
//! 2. **Lookups**: the pipe table and the partial resolver
//! 3. **State tracking**: partial nesting depth for recursion protection

use crate::context::TemplateContext;
use crate::pipes::PipeTable;
use crate::resolver::{NullResolver, PartialResolver};

/// Default maximum partial nesting depth.
pub const DEFAULT_MAX_PARTIAL_DEPTH: usize = 50;

/// Context for template evaluation.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    /// Variable bindings for template interpolation.
    pub variables: &'a TemplateContext<'a>,

    /// Pipes available to `$value/pipe$` expressions.
    pub pipes: &'a PipeTable,

    /// Partials available to `$name()$` expressions.
    pub partials: &'a dyn PartialResolver,

    /// Current partial nesting depth (for recursion protection).
    pub partial_depth: usize,

    /// Maximum partial nesting depth before error.
    pub max_partial_depth: usize,
}

impl<'a> EvalContext<'a> {
    /// Create a new evaluation context with no partials.
    pub fn new(variables: &'a TemplateContext<'a>, pipes: &'a PipeTable) -> Self {
        Self {
            variables,
            pipes,
            partials: &NullResolver,
            partial_depth: 0,
            max_partial_depth: DEFAULT_MAX_PARTIAL_DEPTH,
        }
    }

    /// Set the resolver used for partials.
    pub fn with_partials(mut self, partials: &'a dyn PartialResolver) -> Self {
        self.partials = partials;
        self
    }

    /// Set maximum partial nesting depth.
    pub fn with_max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = depth;
        self
    }

    /// Create a context for a nested scope with different variable bindings.
    ///
    /// Pipes, partials and depth tracking are shared with the parent.
    pub fn child<'b>(&self, variables: &'b TemplateContext<'b>) -> EvalContext<'b>
    where
        'a: 'b,
    {
        EvalContext {
            variables,
            pipes: self.pipes,
            partials: self.partials,
            partial_depth: self.partial_depth,
            max_partial_depth: self.max_partial_depth,
        }
    }

    /// Create a context one partial level deeper.
    pub fn nested(&self) -> Self {
        Self {
            partial_depth: self.partial_depth + 1,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let vars = TemplateContext::new();
        let pipes = PipeTable::builtin();
        let ctx = EvalContext::new(&vars, &pipes);

        assert_eq!(ctx.partial_depth, 0);
        assert_eq!(ctx.max_partial_depth, DEFAULT_MAX_PARTIAL_DEPTH);
        assert!(ctx.partials.get_partial("anything").is_none());
    }

    #[test]
    fn test_nested_and_child_track_depth() {
        let vars = TemplateContext::new();
        let pipes = PipeTable::builtin();
        let ctx = EvalContext::new(&vars, &pipes).with_max_partial_depth(3);

        let nested = ctx.nested().nested();
        assert_eq!(nested.partial_depth, 2);

        let inner = vars.child();
        let child = nested.child(&inner);
        assert_eq!(child.partial_depth, 2);
        assert_eq!(child.max_partial_depth, 3);
    }
}
