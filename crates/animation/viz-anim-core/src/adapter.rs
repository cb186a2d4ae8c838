//! Host adapter contract and the in-memory ("direct") adapter.
//!
//! The engine only ever talks to the host through `get`/`set`/`flush`. Hosts
//! implement [`HostAdapter`] directly, or use [`RegistryAdapter`](crate::RegistryAdapter)
//! to map `kind:id` targets onto their own element type.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::{AnimProperty, AnimationTarget};

/// Capability set the evaluator writes through.
///
/// `get` returning `None` is not an error: it means the host has no live value
/// (yet) and the engine falls back to its configured default.
pub trait HostAdapter {
    fn get(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<f64>;

    fn set(&mut self, target: &AnimationTarget, property: &AnimProperty, value: f64);

    /// Called once per evaluation, after every `set`.
    fn flush(&mut self) {}
}

impl<A: HostAdapter + ?Sized> HostAdapter for &mut A {
    fn get(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<f64> {
        (**self).get(target, property)
    }

    fn set(&mut self, target: &AnimationTarget, property: &AnimProperty, value: f64) {
        (**self).set(target, property, value)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

impl<A: HostAdapter + ?Sized> HostAdapter for Box<A> {
    fn get(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<f64> {
        (**self).get(target, property)
    }

    fn set(&mut self, target: &AnimationTarget, property: &AnimProperty, value: f64) {
        (**self).set(target, property, value)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

/// Shared adapter: several players on one thread may drive the same host.
impl<A: HostAdapter + ?Sized> HostAdapter for Rc<RefCell<A>> {
    fn get(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<f64> {
        self.borrow().get(target, property)
    }

    fn set(&mut self, target: &AnimationTarget, property: &AnimProperty, value: f64) {
        self.borrow_mut().set(target, property, value)
    }

    fn flush(&mut self) {
        self.borrow_mut().flush()
    }
}

/// One recorded `set` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Write {
    pub target: AnimationTarget,
    pub property: AnimProperty,
    pub value: f64,
}

/// Adapter backed by a plain value map. Every `set` is also appended to a write
/// log so headless hosts and tests can inspect exactly what was emitted.
#[derive(Clone, Debug, Default)]
pub struct MemoryAdapter {
    values: HashMap<(AnimationTarget, AnimProperty), f64>,
    writes: Vec<Write>,
    flushes: usize,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a live host value (what `get` will report).
    pub fn insert(
        &mut self,
        target: impl Into<AnimationTarget>,
        property: impl Into<AnimProperty>,
        value: f64,
    ) {
        self.values.insert((target.into(), property.into()), value);
    }

    pub fn with_value(
        mut self,
        target: impl Into<AnimationTarget>,
        property: impl Into<AnimProperty>,
        value: f64,
    ) -> Self {
        self.insert(target, property, value);
        self
    }

    pub fn value(
        &self,
        target: impl Into<AnimationTarget>,
        property: impl Into<AnimProperty>,
    ) -> Option<f64> {
        self.values.get(&(target.into(), property.into())).copied()
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    /// Take the write log, leaving it empty.
    pub fn take_writes(&mut self) -> Vec<Write> {
        std::mem::take(&mut self.writes)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl HostAdapter for MemoryAdapter {
    fn get(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<f64> {
        self.values.get(&(target.clone(), property.clone())).copied()
    }

    fn set(&mut self, target: &AnimationTarget, property: &AnimProperty, value: f64) {
        self.values.insert((target.clone(), property.clone()), value);
        self.writes.push(Write {
            target: target.clone(),
            property: property.clone(),
            value,
        });
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
