use std::collections::HashMap;

use crate::error::EngineError;
use crate::error::ErrorKind;
use crate::value::Value;

/// fixed-length, index-addressed mapping from slot index to [`Value`].
///
/// cloning a `Context` is the sole per-trial allocation in the hot loop:
/// cost is `O(context.len())`, never `O(step count)`.
#[derive(Debug, Clone)]
pub struct Context(Vec<Value>);

impl Context {
    pub fn new(len: usize) -> Self {
        Self(vec![Value::Scalar(0.0); len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, slot: usize) -> Result<&Value, EngineError> {
        self.0.get(slot).ok_or_else(|| {
            EngineError::new(
                ErrorKind::IndexOutOfBounds,
                format!("slot index {slot} out of bounds (context has {} slots)", self.0.len()),
            )
        })
    }

    pub fn set(&mut self, slot: usize, value: Value) {
        self.0[slot] = value;
    }
}

/// name -> slot index, assigned in first-appearance order across
/// pre-trial then per-trial steps. also records the output slot.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    slots: HashMap<String, usize>,
    next: usize,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// assigns `name` the next free slot index if it hasn't been seen,
    /// returning the (possibly newly-assigned) index either way.
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.next;
        self.next += 1;
        self.slots.insert(name.to_string(), slot);
        slot
    }

    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_assigns_first_appearance_order() {
        let mut reg = VariableRegistry::new();
        assert_eq!(reg.intern("a"), 0);
        assert_eq!(reg.intern("b"), 1);
        assert_eq!(reg.intern("a"), 0);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn context_bounds_check() {
        let ctx = Context::new(2);
        assert!(ctx.get(1).is_ok());
        assert_eq!(ctx.get(2).unwrap_err().kind, ErrorKind::IndexOutOfBounds);
    }
}
