//! Replaces excluded modules with an empty stub.

use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, Plugin, PluginContext,
};
use rustc_hash::FxHashSet;
use std::borrow::Cow;

use super::{PluginPhase, StagePlugin};

const STUB_PREFIX: &str = "\0vjs-stub:";

/// Stub body. `module.exports` keeps both `import x from` and `require()`
/// callers working against the same empty object.
const STUB_SOURCE: &str = "module.exports = {};\n";

/// Resolves each listed bare specifier to an empty module so it contributes no
/// code to the bundle.
#[derive(Debug, Clone)]
pub struct ExcludeModulesPlugin {
    modules: FxHashSet<String>,
}

impl ExcludeModulesPlugin {
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    fn stub_id(&self, specifier: &str) -> Option<String> {
        self.modules
            .contains(specifier)
            .then(|| format!("{STUB_PREFIX}{specifier}"))
    }
}

impl Plugin for ExcludeModulesPlugin {
    fn name(&self) -> Cow<'static, str> {
        "vjs:exclude".into()
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
        let stub = self.stub_id(args.specifier);

        async move {
            let Some(id) = stub else {
                return Ok(None);
            };
            tracing::debug!(module = %&id[STUB_PREFIX.len()..], "excluding module");
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
        let is_stub = args.id.starts_with(STUB_PREFIX);

        async move {
            if !is_stub {
                return Ok(None);
            }
            Ok(Some(HookLoadOutput {
                code: STUB_SOURCE.to_string().into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

impl StagePlugin for ExcludeModulesPlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Rewrite
    }
}
