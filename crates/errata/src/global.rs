//! The process default registry.
//!
//! Diagnostics not bound to a registry render with the default as it is at
//! render time. Changing the default affects every such diagnostic, so
//! configure it once at startup; prefer explicit `Arc<Registry>` handles for
//! anything scoped.
//!
//! Each mutation rebuilds the default under a write lock. Rendering holds the
//! read lock only long enough to clone the `Arc`.

use crate::fragments::Fragment;
use crate::registry::{Registry, RegistryBuilder};
use errata_template::{PipeArg, PipeFn, TemplateResult, TemplateValue};
use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};

static DEFAULT_REGISTRY: Lazy<RwLock<Arc<Registry>>> =
    Lazy::new(|| RwLock::new(Arc::new(Registry::default())));

/// The current process default registry.
pub fn default_registry() -> Arc<Registry> {
    // The lock only ever guards a whole-value swap, so a poisoned lock still
    // holds a complete registry.
    let guard = DEFAULT_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

fn replace_default(registry: Registry) {
    let mut guard = DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Arc::new(registry);
}

fn update_default(update: impl FnOnce(RegistryBuilder) -> RegistryBuilder) {
    let mut guard = DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let registry = update(guard.to_builder()).build();
    *guard = Arc::new(registry);
}

/// Restore the built-in fragments and functions, discarding all overrides.
pub fn reset() {
    replace_default(Registry::default());
    tracing::debug!("reset default diagnostic registry");
}

/// Set a fragment of the default registry.
pub fn set_fragment(name: impl Into<String>, text: impl Into<String>) {
    let name = name.into();
    tracing::debug!(fragment = %name, "overriding default diagnostic fragment");
    update_default(|builder| builder.fragment(name, text));
}

pub fn set_message_prefix_fragment(text: impl Into<String>) {
    set_fragment(Fragment::MessagePrefix, text);
}

pub fn set_cause_fragment(text: impl Into<String>) {
    set_fragment(Fragment::Cause, text);
}

pub fn set_notes_fragment(text: impl Into<String>) {
    set_fragment(Fragment::Notes, text);
}

pub fn set_helps_fragment(text: impl Into<String>) {
    set_fragment(Fragment::Helps, text);
}

/// Add or replace a function of the default registry.
pub fn add_function<F>(name: impl Into<String>, function: F)
where
    F: Fn(&TemplateValue, &[PipeArg]) -> TemplateResult<TemplateValue> + Send + Sync + 'static,
{
    let name = name.into();
    tracing::debug!(function = %name, "adding default diagnostic function");
    update_default(|builder| builder.add_function(name, function));
}

/// Add or replace several functions of the default registry.
pub fn add_functions<I, K>(functions: I)
where
    I: IntoIterator<Item = (K, PipeFn)>,
    K: Into<String>,
{
    update_default(|builder| builder.add_functions(functions));
    tracing::debug!("added default diagnostic functions");
}
