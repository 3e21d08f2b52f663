//! Name-keyed registries for distributions and functions, populated at
//! module-load time (§4.B). Construction of the built-in set stands in
//! for the external module loader (§1 Non-goals).

use std::collections::HashMap;
use std::sync::Arc;

use crate::distributions::{Categorical, Dirichlet, Gamma, MNorm, Multinomial, Norm, Sum};
use crate::functions::{Add, Divide, Logit, Multiply, Negate, Power, Subtract};
use crate::{Distribution, Function};

#[derive(Clone, Default)]
pub struct DistRegistry {
    entries: HashMap<&'static str, Arc<dyn Distribution>>,
}

impl DistRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, dist: Arc<dyn Distribution>) {
        self.entries.insert(dist.name(), dist);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Distribution>> {
        self.entries.get(name).cloned()
    }

    /// The `base` + `bugs` module distributions this core implements.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(Arc::new(Norm));
        reg.register(Arc::new(MNorm));
        reg.register(Arc::new(Dirichlet));
        reg.register(Arc::new(Categorical));
        reg.register(Arc::new(Multinomial));
        reg.register(Arc::new(Gamma));
        reg.register(Arc::new(Sum));
        reg
    }
}

#[derive(Clone, Default)]
pub struct FnRegistry {
    entries: HashMap<&'static str, Arc<dyn Function>>,
}

impl FnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, func: Arc<dyn Function>) {
        self.entries.insert(func.name(), func);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.entries.get(name).cloned()
    }

    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(Arc::new(Add));
        reg.register(Arc::new(Subtract));
        reg.register(Arc::new(Multiply));
        reg.register(Arc::new(Divide));
        reg.register(Arc::new(Power));
        reg.register(Arc::new(Negate));
        reg.register(Arc::new(Logit));
        reg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_distributions_are_addressable_by_name() {
        let reg = DistRegistry::with_builtins();
        assert!(reg.get("dnorm").is_some());
        assert!(reg.get("ddirch").is_some());
        assert!(reg.get("dcat").is_some());
        assert!(reg.get("dunknown").is_none());
    }

    #[test]
    fn builtin_functions_are_addressable_by_name() {
        let reg = FnRegistry::with_builtins();
        assert!(reg.get("+").is_some());
        assert!(reg.get("logit").is_some());
    }
}
