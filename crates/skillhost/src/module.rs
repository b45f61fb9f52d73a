//! Host-registered script-module loaders.
//!
//! Each file in a skill's `scripts/` folder names a module; the host
//! registers one loader per module name (the file stem). Invoking a loader
//! is the moment "module-level code" runs: it may do arbitrary work before
//! returning its tool descriptors, and nothing sandboxes or time-limits it.

use crate::error::SkillError;
use crate::tool::ToolDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a module's tool descriptors. May run arbitrary code.
pub type ModuleLoader = Arc<dyn Fn() -> Result<Vec<ToolDescriptor>, SkillError> + Send + Sync>;

/// Registry of module loaders, keyed by module name.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    loaders: HashMap<String, ModuleLoader>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        module: impl Into<String>,
        loader: impl Fn() -> Result<Vec<ToolDescriptor>, SkillError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.loaders.insert(module.into(), Arc::new(loader));
        self
    }

    pub fn find(&self, module: &str) -> Option<ModuleLoader> {
        self.loaders.get(module).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loaders.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_find() {
        let mut modules = ModuleRegistry::new();
        modules.register("calendar_skill", || Ok(vec![]));

        assert!(modules.find("calendar_skill").is_some());
        assert!(modules.find("unknown").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let mut modules = ModuleRegistry::new();
        modules.register("zeta", || Ok(vec![]));
        modules.register("alpha", || Ok(vec![]));

        assert_eq!(modules.names(), ["alpha", "zeta"]);
    }

    #[test]
    fn loader_errors_pass_through() {
        let mut modules = ModuleRegistry::new();
        modules.register("broken", || {
            Err(SkillError::load("broken", "init failed"))
        });

        let loader = modules.find("broken").unwrap();
        assert!(loader().is_err());
    }
}
