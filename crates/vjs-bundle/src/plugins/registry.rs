//! Plugin registry with execution phases.
//!
//! Rolldown runs `resolve_id` and `load` hooks in plugin order, so the order
//! plugins are handed over in is the order the pipeline stages take effect.

use rolldown_plugin::Plugin;
use rolldown_plugin::__inner::SharedPluginable;
use std::sync::Arc;

/// Plugin execution phases, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluginPhase {
    /// In-memory modules that do not exist on disk (the synthesized entry).
    Virtual = 0,

    /// Specifier rewriting: module exclusion and aliasing.
    ///
    /// Must run before module resolution sees the original specifiers.
    Rewrite = 10,

    /// Node-style module resolution. Configured through the resolver
    /// options, not a plugin.
    Resolve = 20,

    /// Format interop on resolved modules (JSON, host globals, CommonJS).
    Interop = 30,

    /// Syntax downleveling to the browser matrix, done by the transform
    /// options.
    Downlevel = 40,

    /// Inline embedding of non-JS assets; always last.
    Embed = 50,
}

/// A Rolldown plugin that knows which phase it belongs to.
pub trait StagePlugin: Plugin {
    fn phase(&self) -> PluginPhase;
}

/// Plugins kept in phase order.
pub struct PluginRegistry {
    plugins: Vec<(PluginPhase, SharedPluginable)>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Add a plugin under its own phase.
    pub fn add<P: StagePlugin + 'static>(&mut self, plugin: P) {
        let phase = plugin.phase();
        self.plugins.push((phase, Arc::new(plugin)));
    }

    /// Phases of the registered plugins, in registration order.
    pub fn phases(&self) -> Vec<PluginPhase> {
        self.plugins.iter().map(|(phase, _)| *phase).collect()
    }

    /// Convert to Rolldown plugins sorted by phase.
    ///
    /// The sort is stable, so plugins within one phase keep registration order.
    pub fn into_rolldown_plugins(mut self) -> Vec<SharedPluginable> {
        self.sort();
        self.plugins.into_iter().map(|(_, plugin)| plugin).collect()
    }

    fn sort(&mut self) {
        self.plugins.sort_by_key(|(phase, _)| *phase);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{ExcludeModulesPlugin, InlineSvgPlugin, VirtualEntryPlugin};

    #[test]
    fn test_phase_ordering() {
        assert!(PluginPhase::Virtual < PluginPhase::Rewrite);
        assert!(PluginPhase::Rewrite < PluginPhase::Resolve);
        assert!(PluginPhase::Resolve < PluginPhase::Downlevel);
        assert!(PluginPhase::Downlevel < PluginPhase::Embed);
    }

    #[test]
    fn test_plugins_sorted_by_phase() {
        let mut registry = PluginRegistry::new();
        registry.add(InlineSvgPlugin::new());
        registry.add(ExcludeModulesPlugin::new(["videojs-vtt.js"]));
        registry.add(VirtualEntryPlugin::new("/p/entry.js", "export default 1;"));

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.phases(),
            vec![PluginPhase::Embed, PluginPhase::Rewrite, PluginPhase::Virtual]
        );

        registry.sort();
        assert_eq!(
            registry.phases(),
            vec![PluginPhase::Virtual, PluginPhase::Rewrite, PluginPhase::Embed]
        );
        assert_eq!(registry.into_rolldown_plugins().len(), 3);
    }
}
