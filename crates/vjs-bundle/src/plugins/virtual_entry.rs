//! Serves the synthesized entry module to Rolldown from memory.

use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, Plugin, PluginContext,
};
use std::borrow::Cow;
use std::sync::Arc;

use super::{PluginPhase, StagePlugin};

/// Claims exactly one module id and answers `load` with in-memory source.
///
/// The id is an absolute path inside the project root, so relative imports in
/// the entry resolve against the root like they would from a file on disk.
#[derive(Debug, Clone)]
pub struct VirtualEntryPlugin {
    id: Arc<str>,
    source: Arc<str>,
}

impl VirtualEntryPlugin {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Arc::from(id.into()),
            source: Arc::from(source.into()),
        }
    }

    fn claims(&self, id: &str) -> bool {
        id == &*self.id
    }
}

impl Plugin for VirtualEntryPlugin {
    fn name(&self) -> Cow<'static, str> {
        "vjs:virtual-entry".into()
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
        let claimed = self.claims(args.specifier);
        let id = self.id.to_string();

        async move {
            if !claimed {
                return Ok(None);
            }
            Ok(Some(HookResolveIdOutput {
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
        let claimed = self.claims(args.id);
        let source = self.source.to_string();

        async move {
            if !claimed {
                return Ok(None);
            }
            Ok(Some(HookLoadOutput {
                code: source.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

impl StagePlugin for VirtualEntryPlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Virtual
    }
}
