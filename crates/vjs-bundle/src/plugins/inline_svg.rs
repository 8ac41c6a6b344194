//! Inlines imported SVG files as string modules.

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use std::borrow::Cow;

use super::{PluginPhase, StagePlugin};

/// `import icon from './icon.svg'` yields the SVG markup as a string.
#[derive(Debug, Clone, Default)]
pub struct InlineSvgPlugin;

impl InlineSvgPlugin {
    pub fn new() -> Self {
        Self
    }
}

/// Strip `?query` and `#hash` suffixes and check the extension.
fn svg_path(id: &str) -> Option<&str> {
    let path = id.split(['?', '#']).next().unwrap_or(id);
    path.to_ascii_lowercase().ends_with(".svg").then_some(path)
}

fn svg_module(markup: &str) -> anyhow::Result<String> {
    let literal = serde_json::to_string(markup).context("Failed to encode SVG markup")?;
    Ok(format!("export default {literal};\n"))
}

impl Plugin for InlineSvgPlugin {
    fn name(&self) -> Cow<'static, str> {
        "vjs:inline-svg".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        rolldown_plugin::HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let path = svg_path(args.id).map(str::to_string);

        async move {
            let Some(path) = path else {
                return Ok(None);
            };

            let markup = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read SVG file: {}", path))?;

            Ok(Some(HookLoadOutput {
                code: svg_module(markup.trim())?.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

impl StagePlugin for InlineSvgPlugin {
    fn phase(&self) -> PluginPhase {
        PluginPhase::Embed
    }
}
