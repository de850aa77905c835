//! `[plugins.*]` sections.
//!
//! Each plugin owns one table under `[plugins]`, named after the plugin.

mod tags;

pub use tags::{TagOrder, TagsConfig};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Tag index page settings.
    pub tags: TagsConfig,
}
