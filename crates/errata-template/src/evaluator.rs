/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template evaluation engine.
//!
//! This module implements the evaluation of parsed templates against a context.
//! Output is appended to a single string buffer.

use crate::ast::{Conditional, ForLoop, Partial, TemplateNode, ValueSource, VariableRef};
use crate::context::{TemplateContext, TemplateValue};
use crate::error::{TemplateError, TemplateResult};
use crate::eval_context::EvalContext;
use crate::parser::Template;
use crate::pipes::PipeTable;

impl Template {
    /// Render this template with the given context.
    ///
    /// Only the built-in pipes are available and partials are not resolved.
    ///
    /// # Arguments
    /// * `context` - The variable context for evaluation
    ///
    /// # Returns
    /// The rendered output string, or an error if evaluation fails.
    pub fn render(&self, context: &TemplateContext<'_>) -> TemplateResult<String> {
        let pipes = PipeTable::builtin();
        self.render_with(&EvalContext::new(context, &pipes))
    }

    /// Render this template with an explicit evaluation context.
    pub fn render_with(&self, ctx: &EvalContext) -> TemplateResult<String> {
        let mut out = String::new();
        evaluate(&self.nodes, ctx, &mut out)?;
        Ok(out)
    }
}

/// Evaluate a list of template nodes, appending to `out`.
pub fn evaluate(nodes: &[TemplateNode], ctx: &EvalContext, out: &mut String) -> TemplateResult<()> {
    for node in nodes {
        evaluate_node(node, ctx, out)?;
    }
    Ok(())
}

fn evaluate_node(node: &TemplateNode, ctx: &EvalContext, out: &mut String) -> TemplateResult<()> {
    match node {
        TemplateNode::Literal(literal) => {
            out.push_str(&literal.text);
            Ok(())
        }
        TemplateNode::Variable(var) => {
            let value = resolve_value(var, ctx)?;
            out.push_str(&render_value(&value, var.separator.as_deref()));
            Ok(())
        }
        TemplateNode::Conditional(conditional) => evaluate_conditional(conditional, ctx, out),
        TemplateNode::ForLoop(for_loop) => evaluate_for_loop(for_loop, ctx, out),
        TemplateNode::Partial(partial) => evaluate_partial(partial, ctx, out),
        // Comments produce no output
        TemplateNode::Comment(_) => Ok(()),
    }
}

/// Resolve a reference to its value, with pipes applied in order.
///
/// Missing variables resolve to [`TemplateValue::Null`].
fn resolve_value(var: &VariableRef, ctx: &EvalContext) -> TemplateResult<TemplateValue> {
    let base = match &var.source {
        ValueSource::Path(path) => {
            let path: Vec<&str> = path.iter().map(String::as_str).collect();
            ctx.variables.get_path(&path).cloned().unwrap_or_default()
        }
        ValueSource::Literal(text) => TemplateValue::String(text.clone()),
    };

    var.pipes.iter().try_fold(base, |value, pipe| {
        ctx.pipes.apply(&pipe.name, &value, &pipe.args)
    })
}

fn render_value(value: &TemplateValue, separator: Option<&str>) -> String {
    match (value, separator) {
        (TemplateValue::List(items), Some(sep)) => items
            .iter()
            .map(TemplateValue::render)
            .collect::<Vec<_>>()
            .join(sep),
        (value, _) => value.render(),
    }
}

/// The values a loop iterates: lists item by item, other truthy values once.
fn iteration_items(value: TemplateValue) -> Vec<TemplateValue> {
    match value {
        TemplateValue::List(items) => items,
        value if value.is_truthy() => vec![value],
        _ => Vec::new(),
    }
}

fn evaluate_conditional(
    conditional: &Conditional,
    ctx: &EvalContext,
    out: &mut String,
) -> TemplateResult<()> {
    for (condition, body) in &conditional.branches {
        if resolve_value(condition, ctx)?.is_truthy() {
            return evaluate(body, ctx, out);
        }
    }

    match &conditional.else_branch {
        Some(body) => evaluate(body, ctx, out),
        None => Ok(()),
    }
}

fn evaluate_for_loop(for_loop: &ForLoop, ctx: &EvalContext, out: &mut String) -> TemplateResult<()> {
    let items = iteration_items(resolve_value(&for_loop.var, ctx)?);
    let binding = for_loop.var.binding_name();

    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            if let Some(separator) = &for_loop.separator {
                evaluate(separator, ctx, out)?;
            }
        }

        // Bind to the variable name AND "it"
        let mut scope = ctx.variables.child();
        if let Some(name) = binding {
            scope.insert(name, item.clone());
        }
        scope.insert("it", item);

        evaluate(&for_loop.body, &ctx.child(&scope), out)?;
    }
    Ok(())
}

fn evaluate_partial(partial: &Partial, ctx: &EvalContext, out: &mut String) -> TemplateResult<()> {
    if ctx.partial_depth >= ctx.max_partial_depth {
        return Err(TemplateError::RecursivePartial {
            name: partial.name.clone(),
            max_depth: ctx.max_partial_depth,
        });
    }
    let template =
        ctx.partials
            .get_partial(&partial.name)
            .ok_or_else(|| TemplateError::PartialNotFound {
                name: partial.name.clone(),
            })?;
    let nested = ctx.nested();

    let mut rendered = String::new();
    match &partial.var {
        None => evaluate(&template.nodes, &nested, &mut rendered)?,
        Some(var) => {
            let items = iteration_items(resolve_value(var, ctx)?);
            for (index, item) in items.into_iter().enumerate() {
                if index > 0 {
                    if let Some(separator) = &partial.separator {
                        rendered.push_str(separator);
                    }
                }

                // Map fields become top-level names inside the partial
                let mut scope = ctx.variables.child();
                if let TemplateValue::Map(fields) = &item {
                    for (key, value) in fields {
                        scope.insert(key.clone(), value.clone());
                    }
                }
                scope.insert("it", item);

                evaluate(&template.nodes, &nested.child(&scope), &mut rendered)?;
            }
        }
    }

    let value = partial
        .pipes
        .iter()
        .try_fold(TemplateValue::String(rendered), |value, pipe| {
            ctx.pipes.apply(&pipe.name, &value, &pipe.args)
        })?;
    out.push_str(&value.render());
    Ok(())
}
