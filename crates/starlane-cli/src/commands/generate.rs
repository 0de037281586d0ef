//! Generate command handler.

use anyhow::Result;

use crate::commands::MapArgs;
use crate::output::{print_json, render_map_summary, MapSummary, OutputFormat};
use crate::terminal::ColorPalette;

/// Generate a map and print its summary.
pub fn handle_generate(map_args: &MapArgs, format: OutputFormat) -> Result<()> {
    let (config, map) = map_args.generate()?;
    let summary = MapSummary::new(&map, &config);

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            print!("{}", render_map_summary(&summary, &ColorPalette::detect()));
            Ok(())
        }
    }
}
