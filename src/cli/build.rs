//! Build command.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::host::Builder;
use crate::tags::TagsPlugin;

/// Build the site with the tags plugin.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let report = Builder::new(config).plugin(TagsPlugin::new()).run()?;
    report.log(config);
    Ok(())
}
