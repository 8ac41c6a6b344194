//! Rolldown plugins backing the build pipeline stages.

mod exclude;
mod globals;
mod inline_svg;
mod registry;
mod virtual_entry;

pub use exclude::ExcludeModulesPlugin;
pub use globals::{BROWSER_GLOBALS, BrowserGlobalsPlugin};
pub use inline_svg::InlineSvgPlugin;
pub use registry::{PluginPhase, PluginRegistry, StagePlugin};
pub use virtual_entry::VirtualEntryPlugin;
