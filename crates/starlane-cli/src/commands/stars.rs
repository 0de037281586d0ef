//! Stars command handler.

use anyhow::Result;

use crate::commands::MapArgs;
use crate::output::{print_json, render_star_rows, star_rows, OutputFormat};
use crate::terminal::ColorPalette;

/// List every star of the generated map with its neighbour count.
pub fn handle_stars(map_args: &MapArgs, format: OutputFormat) -> Result<()> {
    let (_, map) = map_args.generate()?;
    let rows = star_rows(&map);

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Text => {
            print!("{}", render_star_rows(&rows, &ColorPalette::detect()));
            Ok(())
        }
    }
}
