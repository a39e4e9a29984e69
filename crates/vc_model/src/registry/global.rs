use std::sync::LazyLock;

use crate::registry::{ClassRegistry, ClassRegistryArc};

static GLOBAL_REGISTRY: LazyLock<ClassRegistryArc> =
    LazyLock::new(|| ClassRegistryArc::new(ClassRegistry::new()));

/// Returns the process-wide registry.
///
/// Created on first access with every automatically registered class, see
/// [`ClassRegistry::auto_register`]. Other classes can be added at any time:
///
/// ```
/// use vc_model::{derive::Model, registry};
///
/// #[derive(Model)]
/// struct Tag {
///     label: String,
/// }
///
/// registry::global().write().register::<Tag>();
/// assert!(registry::global().read().class_named("Tag").is_some());
/// ```
///
/// Do not hold a guard while calling back into code that may lock the
/// registry again.
#[inline]
pub fn global() -> &'static ClassRegistryArc {
    &GLOBAL_REGISTRY
}
