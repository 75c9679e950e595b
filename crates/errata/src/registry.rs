//! Rendering configuration.
//!
//! A [`Registry`] holds the fragment templates and the formatting functions
//! (template pipes) used to render diagnostics. Registries are built with
//! [`RegistryBuilder`] and immutable afterwards; share them as
//! `Arc<Registry>` and bind diagnostics to them with [`Registry::new_error`]
//! or [`Registry::extend`].
//!
//! The process default registry lives in [`crate::global`].

use crate::diagnostic::{BoxError, Diagnostic};
use crate::fragments::{Fragment, LAYOUT};
use crate::style::Style;
use errata_template::{
    EvalContext, MemoryResolver, PipeArg, PipeFn, PipeTable, Template, TemplateContext,
    TemplateError, TemplateResult, TemplateValue,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Compiled form of a registry.
#[derive(Debug)]
struct RenderPlan {
    layout: Template,
    fragments: MemoryResolver,
    pipes: PipeTable,
}

impl RenderPlan {
    fn compile(fragments: &BTreeMap<String, String>, functions: &PipeTable) -> TemplateResult<Self> {
        let mut resolver = MemoryResolver::new();
        for (name, text) in fragments {
            resolver.add_source(name.clone(), text)?;
        }

        // Registry functions win over built-in pipes of the same name
        let mut pipes = PipeTable::builtin();
        pipes.extend_from(functions);

        Ok(Self {
            layout: Template::compile_named(LAYOUT, "layout")?,
            fragments: resolver,
            pipes,
        })
    }
}

/// Fragments and functions used to render diagnostics.
#[derive(Clone)]
pub struct Registry {
    fragments: BTreeMap<String, String>,
    functions: PipeTable,
    plan: Result<Arc<RenderPlan>, TemplateError>,
}

impl Registry {
    /// Start from the built-in fragments and functions.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Start from this registry's fragments and functions.
    pub fn to_builder(&self) -> RegistryBuilder {
        RegistryBuilder {
            fragments: self.fragments.clone(),
            functions: self.functions.clone(),
        }
    }

    /// Create a diagnostic rendered with this registry.
    pub fn new_error(self: &Arc<Self>, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(message).with_registry(Arc::clone(self))
    }

    pub fn new_errorf(self: &Arc<Self>, args: fmt::Arguments<'_>) -> Diagnostic {
        self.new_error(args.to_string())
    }

    /// Upgrade `err` to a diagnostic (see [`Diagnostic::extend`]) and bind it
    /// to this registry.
    pub fn extend(self: &Arc<Self>, err: impl Into<BoxError>) -> Diagnostic {
        Diagnostic::extend(err).with_registry(Arc::clone(self))
    }

    /// Render `diagnostic` with this registry.
    ///
    /// If a fragment fails to compile or evaluate, the failure is logged and
    /// the bare message is returned instead.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        match self.try_render(diagnostic) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "failed to render diagnostic, falling back to its message");
                diagnostic.message().to_string()
            }
        }
    }

    /// Render `diagnostic`, reporting template failures.
    pub fn try_render(&self, diagnostic: &Diagnostic) -> TemplateResult<String> {
        let plan = self.plan.as_ref().map_err(Clone::clone)?;
        let variables = render_context(diagnostic);
        let ctx = EvalContext::new(&variables, &plan.pipes).with_partials(&plan.fragments);
        plan.layout.render_with(&ctx)
    }

    /// The compile error of this registry's fragments, if any.
    pub fn compile_error(&self) -> Option<&TemplateError> {
        self.plan.as_ref().err()
    }

    /// Names of all fragments, in sorted order.
    pub fn fragment_names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    /// Names of all registry functions, in sorted order.
    ///
    /// Built-in template pipes (`first`, `rest`, ...) are not included.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.names()
    }

    /// The template text of a fragment.
    pub fn fragment(&self, name: &str) -> Option<&str> {
        self.fragments.get(name).map(String::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        RegistryBuilder::default().build()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("fragments", &self.fragments.keys().collect::<Vec<_>>())
            .field("functions", &self.functions)
            .field("compile_error", &self.compile_error())
            .finish()
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    fragments: BTreeMap<String, String>,
    functions: PipeTable,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            fragments: Fragment::ALL
                .into_iter()
                .map(|f| (f.as_str().to_string(), f.default_text().to_string()))
                .collect(),
            functions: default_functions(),
        }
    }
}

impl RegistryBuilder {
    /// Replace the whole function set.
    pub fn functions(mut self, functions: PipeTable) -> Self {
        self.functions = functions;
        self
    }

    /// Add or replace one function.
    pub fn add_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&TemplateValue, &[PipeArg]) -> TemplateResult<TemplateValue> + Send + Sync + 'static,
    {
        self.functions.insert(name, function);
        self
    }

    /// Add or replace several functions.
    pub fn add_functions<I, K>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = (K, PipeFn)>,
        K: Into<String>,
    {
        for (name, function) in functions {
            self.functions.insert_shared(name, function);
        }
        self
    }

    /// Set the template text of a fragment.
    ///
    /// Built-in fragments are replaced; other names add a fragment that the
    /// rest can call as a partial.
    pub fn fragment(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fragments.insert(name.into(), text.into());
        self
    }

    /// Compile the fragments.
    ///
    /// Compile failures don't fail the build; they are kept and reported each
    /// time the registry renders.
    pub fn build(self) -> Registry {
        let plan = RenderPlan::compile(&self.fragments, &self.functions).map(Arc::new);
        if let Err(err) = &plan {
            tracing::warn!(error = %err, "diagnostic fragments failed to compile");
        }
        Registry {
            fragments: self.fragments,
            functions: self.functions,
            plan,
        }
    }
}

/// The functions every registry starts with: the default styles and `split`.
fn default_functions() -> PipeTable {
    let mut functions = PipeTable::new();
    for style in Style::DEFAULTS {
        functions.insert_shared(style.name(), style.pipe());
    }
    if let Some(split) = PipeTable::builtin().get("split") {
        functions.insert_shared("split", Arc::clone(split));
    }
    functions
}

/// Values visible to fragments when rendering `diagnostic`.
fn render_context(diagnostic: &Diagnostic) -> TemplateContext<'static> {
    let mut ctx = TemplateContext::new();
    ctx.insert("message", diagnostic.message());
    ctx.insert("code", diagnostic.error_code().map(|code| code.to_string()));
    ctx.insert("cause", diagnostic.cause_ref().map(|cause| cause.to_string()));
    ctx.insert("has-cause", diagnostic.cause_ref().is_some());
    ctx.insert("notes", diagnostic.notes().to_vec());
    ctx.insert("helps", diagnostic.helps().to_vec());
    // Wrapped diagnostics render through Display, with their own registry
    ctx.insert(
        "wrapped",
        diagnostic
            .wrapped()
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>(),
    );
    for (key, value) in diagnostic.extra() {
        ctx.insert(key.clone(), TemplateValue::from(value.clone()));
    }
    ctx
}
