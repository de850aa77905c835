//! Configuration section definitions.
//!
//! | Module    | TOML Section      | Purpose                        |
//! |-----------|-------------------|--------------------------------|
//! | `build`   | `[build]`         | Content and output directories |
//! | `plugins` | `[plugins.*]`     | Per-plugin settings            |

pub mod build;
pub mod plugins;

pub use build::BuildSectionConfig;
pub use plugins::{PluginsConfig, TagOrder, TagsConfig};
