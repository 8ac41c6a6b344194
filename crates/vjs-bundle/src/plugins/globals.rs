//! Maps host-environment shim packages onto browser globals.

use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, Plugin, PluginContext,
};
use rustc_hash::FxHashMap;
use std::borrow::Cow;

use super::{PluginPhase, StagePlugin};

const GLOBAL_PREFIX: &str = "\0vjs-global:";

/// Shim packages and the browser global each one stands for.
pub const BROWSER_GLOBALS: &[(&str, &str)] = &[
    ("global", "window"),
    ("global/window", "window"),
    ("global/document", "document"),
];

/// Resolves `global`, `global/window` and `global/document` to a module whose
/// export is the matching browser global, so no shim code ships.
#[derive(Debug, Clone)]
pub struct BrowserGlobalsPlugin {
    globals: FxHashMap<String, String>,
}

impl BrowserGlobalsPlugin {
    pub fn new<'a, I>(globals: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            globals: globals
                .into_iter()
                .map(|(module, global)| (module.to_string(), global.to_string()))
                .collect(),
        }
    }

    fn global_for_id(&self, id: &str) -> Option<&str> {
        let module = id.strip_prefix(GLOBAL_PREFIX)?;
        self.globals.get(module).map(String::as_str)
    }
}

/// Module body exposing `global` to both ESM and CommonJS importers.
fn global_module(global: &str) -> String {
    format!("module.exports = {global};\n")
}

impl Plugin for BrowserGlobalsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "vjs:browser-globals".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::ResolveId | HookUsage::Load
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let id = self
            .globals
            .contains_key(args.specifier)
            .then(|| format!("{GLOBAL_PREFIX}{}", args.specifier));

        async move {
            Ok(id.map(|id| HookResolveIdOutput {
                id: id.into(),
                external: Some(ResolvedExternal::Bool(false)),
                ..Default::default()
            }))
        }
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let code = self.global_for_id(args.id).map(global_module);

        async move {
            Ok(code.map(|code| HookLoadOutput {
                code: code.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

impl StagePlugin for BrowserGlobalsPlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Interop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_mapping() {
        let plugin = BrowserGlobalsPlugin::new(BROWSER_GLOBALS.iter().copied());
        assert_eq!(plugin.global_for_id("\0vjs-global:global"), Some("window"));
        assert_eq!(plugin.global_for_id("\0vjs-global:global/window"), Some("window"));
        assert_eq!(
            plugin.global_for_id("\0vjs-global:global/document"),
            Some("document")
        );
        assert_eq!(plugin.global_for_id("global/window"), None);
        assert_eq!(plugin.global_for_id("\0vjs-global:global/console"), None);
    }

    #[test]
    fn test_global_module_source() {
        assert_eq!(global_module("document"), "module.exports = document;\n");
    }
}
