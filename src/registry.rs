use std::collections::HashMap;

use crate::error::EngineError;
use crate::error::ErrorKind;
use crate::executable::Executable;

type Factory = Box<dyn Fn() -> Box<dyn Executable> + Send + Sync>;

/// name -> factory mapping for built-in [`Executable`]s.
///
/// registration happens once at process start (see [`FunctionRegistry::with_builtins`]);
/// lookups afterwards are read-only, so the registry can be shared behind
/// an `Arc` across worker threads without locking.
#[derive(Default)]
pub struct FunctionRegistry {
    factories: HashMap<&'static str, Factory>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// a fresh registry with every domain module's built-ins registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::functions::register_all(&mut registry);
        registry
    }

    /// registers `name`, panicking if it is already taken -- a duplicate
    /// registration is a programmer error at startup, never a runtime
    /// condition a recipe can trigger.
    pub fn register<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn() -> Box<dyn Executable> + Send + Sync + 'static,
    {
        if self.factories.insert(name, Box::new(factory)).is_some() {
            panic!("duplicate function registration for '{name}'");
        }
    }

    pub fn build(&self, name: &str) -> Result<Box<dyn Executable>, EngineError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| EngineError::new(ErrorKind::UnknownFunction, format!("unknown function '{name}'")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
