//! Query command: print the tag index as JSON.
//!
//! Output is a list of `{ "tag": ..., "pages": [...] }` objects in the
//! configured tag order, each page carrying the same fields templates see.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{Value as JsonValue, json};

use crate::cli::QueryArgs;
use crate::config::SiteConfig;
use crate::host::Files;
use crate::log;
use crate::tags::{TagIndex, collect_documents, page_value};
use crate::utils::plural_count;

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let files = Files::collect(&config.build.content, &config.build.output)?;
    let documents = collect_documents(&files)?;
    let index = TagIndex::build(&documents).sorted(config.plugins.tags.order);

    log!(
        "query";
        "found {} in {}",
        plural_count(index.len(), "tag"),
        plural_count(documents.len(), "document")
    );

    let output = format_index(&index);
    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("Failed to create `{}`", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// One `{ "tag", "pages" }` object per index entry.
fn format_index(index: &TagIndex<'_>) -> JsonValue {
    index
        .iter()
        .map(|entry| {
            let pages: Vec<JsonValue> = entry.documents.iter().map(|doc| page_value(doc)).collect();
            json!({ "tag": entry.tag, "pages": pages })
        })
        .collect()
}
