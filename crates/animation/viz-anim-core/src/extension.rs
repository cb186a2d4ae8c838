//! Adapter extensions: registration closures that travel with a compiled spec.
//!
//! A spec may need host properties that the current adapter build does not know
//! about (a custom `glow` channel on nodes, say). The author attaches an
//! extension to the spec; whoever drives playback applies it to the concrete
//! adapter before the first evaluation. Extensions are typed against a concrete
//! adapter type and are skipped for any other adapter.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

type ApplyFn = dyn Fn(&mut dyn Any) -> bool + Send + Sync;

/// One registration closure for a concrete adapter type.
#[derive(Clone)]
pub struct AdapterExtension {
    label: &'static str,
    apply: Arc<ApplyFn>,
}

impl AdapterExtension {
    /// Wrap a closure that configures adapters of type `A`.
    pub fn new<A, F>(f: F) -> Self
    where
        A: 'static,
        F: Fn(&mut A) + Send + Sync + 'static,
    {
        Self {
            label: type_name::<A>(),
            apply: Arc::new(move |adapter: &mut dyn Any| match adapter.downcast_mut::<A>() {
                Some(concrete) => {
                    f(concrete);
                    true
                }
                None => false,
            }),
        }
    }

    /// Apply to `adapter`; returns `false` when the adapter type does not match.
    pub fn apply_to(&self, adapter: &mut dyn Any) -> bool {
        (self.apply)(adapter)
    }

    /// Type name of the adapter this extension targets.
    pub fn adapter_type(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for AdapterExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterExtension")
            .field("adapter", &self.label)
            .finish()
    }
}

/// Ordered extension list carried by an [`AnimationSpec`](crate::AnimationSpec).
#[derive(Clone, Debug, Default)]
pub struct AdapterExtensions {
    items: Vec<AdapterExtension>,
}

impl AdapterExtensions {
    pub fn push(&mut self, ext: AdapterExtension) {
        self.items.push(ext);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdapterExtension> {
        self.items.iter()
    }

    /// Apply every extension in registration order. Returns how many matched.
    pub fn apply<A: 'static>(&self, adapter: &mut A) -> usize {
        let mut applied = 0;
        for ext in &self.items {
            if ext.apply_to(&mut *adapter as &mut dyn Any) {
                applied += 1;
            } else {
                log::trace!(
                    "skipping adapter extension for {} (adapter is {})",
                    ext.adapter_type(),
                    type_name::<A>()
                );
            }
        }
        if applied > 0 {
            log::debug!("applied {applied} adapter extension(s)");
        }
        applied
    }
}

impl Extend<AdapterExtension> for AdapterExtensions {
    fn extend<I: IntoIterator<Item = AdapterExtension>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
