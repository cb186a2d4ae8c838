//! Registry adapter: resolves `kind:id` targets to host elements and routes
//! each property through per-kind reader/writer functions.
//!
//! Anything unregistered (kind, property, or an id the resolver cannot find)
//! makes `get` return `None` and `set` do nothing, so a spec may reference
//! channels the running host build does not support.

use hashbrown::HashMap;

use crate::adapter::HostAdapter;
use crate::ids::{AnimProperty, AnimationTarget};

type Resolver<E> = Box<dyn Fn(&str) -> Option<E>>;
type Getter<E> = Box<dyn Fn(&E) -> Option<f64>>;
type Setter<E> = Box<dyn Fn(&E, f64)>;

/// Reader/writer pair for one (kind, property). Either side may be absent.
pub struct PropertyAccess<E> {
    pub get: Option<Getter<E>>,
    pub set: Option<Setter<E>>,
}

impl<E> Default for PropertyAccess<E> {
    fn default() -> Self {
        Self {
            get: None,
            set: None,
        }
    }
}

impl<E> PropertyAccess<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn getter(mut self, f: impl Fn(&E) -> Option<f64> + 'static) -> Self {
        self.get = Some(Box::new(f));
        self
    }

    pub fn setter(mut self, f: impl Fn(&E, f64) + 'static) -> Self {
        self.set = Some(Box::new(f));
        self
    }
}

/// Adapter over a host element type `E` (typically a cheap handle with
/// interior mutability, as writes go through `&E`).
pub struct RegistryAdapter<E> {
    kinds: HashMap<String, Resolver<E>>,
    /// kind -> property -> accessors
    properties: HashMap<String, HashMap<AnimProperty, PropertyAccess<E>>>,
    on_flush: Option<Box<dyn FnMut()>>,
}

impl<E> Default for RegistryAdapter<E> {
    fn default() -> Self {
        Self {
            kinds: HashMap::new(),
            properties: HashMap::new(),
            on_flush: None,
        }
    }
}

impl<E> std::fmt::Debug for RegistryAdapter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("RegistryAdapter")
            .field("kinds", &kinds)
            .field(
                "properties",
                &self.properties.values().map(HashMap::len).sum::<usize>(),
            )
            .finish()
    }
}

impl<E> RegistryAdapter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) how ids of `kind` resolve to elements.
    pub fn register_target_kind(
        &mut self,
        kind: impl Into<String>,
        resolver: impl Fn(&str) -> Option<E> + 'static,
    ) -> &mut Self {
        self.kinds.insert(kind.into(), Box::new(resolver));
        self
    }

    /// Register (or replace) the accessors of `property` for targets of `kind`.
    pub fn register_property(
        &mut self,
        kind: impl Into<String>,
        property: impl Into<AnimProperty>,
        access: PropertyAccess<E>,
    ) -> &mut Self {
        self.properties
            .entry(kind.into())
            .or_default()
            .insert(property.into(), access);
        self
    }

    /// Hook invoked from `flush`, for batching expensive redraw work.
    pub fn on_flush(&mut self, hook: impl FnMut() + 'static) -> &mut Self {
        self.on_flush = Some(Box::new(hook));
        self
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn has_property(&self, kind: &str, property: &AnimProperty) -> bool {
        self.properties
            .get(kind)
            .is_some_and(|props| props.contains_key(property))
    }

    /// Resolve a target through its kind's resolver.
    pub fn resolve(&self, target: &AnimationTarget) -> Option<E> {
        let resolver = self.kinds.get(target.kind())?;
        resolver(target.id())
    }

    fn access(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<&PropertyAccess<E>> {
        self.properties.get(target.kind())?.get(property)
    }
}

impl<E> HostAdapter for RegistryAdapter<E> {
    fn get(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<f64> {
        let Some(getter) = self.access(target, property).and_then(|a| a.get.as_ref()) else {
            log::trace!("no reader for {target}.{property}");
            return None;
        };
        let element = self.resolve(target)?;
        getter(&element)
    }

    fn set(&mut self, target: &AnimationTarget, property: &AnimProperty, value: f64) {
        let Some(setter) = self.access(target, property).and_then(|a| a.set.as_ref()) else {
            log::trace!("no writer for {target}.{property}");
            return;
        };
        match self.resolve(target) {
            Some(element) => setter(&element, value),
            None => log::trace!("target {target} did not resolve"),
        }
    }

    fn flush(&mut self) {
        if let Some(hook) = self.on_flush.as_mut() {
            hook();
        }
    }
}
