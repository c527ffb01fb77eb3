//! Operator extension points.
//!
//! Each hook receives the value computed by the library and returns the value
//! to use. The default implementations pass the computed value through.

use crate::config::{AppConfig, HookOverrides};

/// Filters applied to debug mode and the loader asset reference.
pub trait Hooks: Send + Sync {
    /// Final say over debug mode after the configuration tiers were applied.
    fn debug_mode(&self, computed: bool) -> bool {
        computed
    }

    fn loader_url(&self, default: String) -> String {
        default
    }

    fn loader_version(&self, default: String) -> String {
        default
    }
}

/// Pass-through hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl Hooks for NoHooks {}

/// Hooks answering from the `[hooks]` configuration table.
#[derive(Debug, Clone, Default)]
pub struct ConfigHooks {
    overrides: HookOverrides,
}

impl ConfigHooks {
    pub fn new(overrides: HookOverrides) -> Self {
        Self { overrides }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.hooks.clone())
    }
}

impl Hooks for ConfigHooks {
    fn debug_mode(&self, computed: bool) -> bool {
        self.overrides.debug_mode.unwrap_or(computed)
    }

    fn loader_url(&self, default: String) -> String {
        self.overrides.loader_url.clone().unwrap_or(default)
    }

    fn loader_version(&self, default: String) -> String {
        self.overrides.loader_version.clone().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hooks_pass_through() {
        let hooks = NoHooks;
        assert!(hooks.debug_mode(true));
        assert!(!hooks.debug_mode(false));
        assert_eq!(hooks.loader_url("https://cdn.test/l.js".into()), "https://cdn.test/l.js");
        assert_eq!(hooks.loader_version("1.0".into()), "1.0");
    }

    #[test]
    fn test_config_hooks_override() {
        let hooks = ConfigHooks::new(HookOverrides {
            debug_mode: Some(false),
            loader_url: Some("https://mirror.test/loader.js".into()),
            loader_version: None,
        });
        assert!(!hooks.debug_mode(true));
        assert_eq!(hooks.loader_url("https://cdn.test/l.js".into()), "https://mirror.test/loader.js");
        assert_eq!(hooks.loader_version("1.0".into()), "1.0");
    }

    #[test]
    fn test_config_hooks_from_default_config_pass_through() {
        let hooks = ConfigHooks::from_config(&AppConfig::default());
        assert!(hooks.debug_mode(true));
        assert_eq!(hooks.loader_version("2.1".into()), "2.1");
    }
}
