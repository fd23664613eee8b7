//! `isogen <manifest.ron>`: render a batch manifest into an atlas image

use std::env;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use isogen::batch::{load_manifest, resolve, TileSheet};
use isogen::VERSION;

/// The single manifest argument, or the program name for the usage line
fn manifest_arg(mut args: impl Iterator<Item = String>) -> Result<String, String> {
    let program = args.next().unwrap_or_else(|| "isogen".into());
    match (args.next(), args.next()) {
        (Some(manifest), None) => Ok(manifest),
        _ => Err(program),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_file = match manifest_arg(env::args()) {
        Ok(arg) => arg,
        Err(program) => {
            eprintln!("isogen v{}", VERSION);
            eprintln!("Usage: {} <manifest.ron>", program);
            std::process::exit(1);
        }
    };

    let manifest_path = Path::new(&manifest_file);
    let manifest = load_manifest(manifest_path)?;

    let sheet_path = resolve(manifest_path, &manifest.sheet);
    let sheet = TileSheet::load(&sheet_path, manifest.tile_width, manifest.tile_height)?;
    println!(
        "Sliced {} into {}x{} tiles of {}x{}",
        sheet_path.display(),
        sheet.rows(),
        sheet.cols(),
        manifest.tile_width,
        manifest.tile_height
    );

    let pb = ProgressBar::new(manifest.tile_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} tiles ({percent}%) {msg}")?
            .progress_chars("█▉▊▋▌▍▎▏"),
    );
    pb.set_message("Rendering");

    let atlas = match manifest.render_atlas(&sheet, || pb.inc(1)) {
        Ok(atlas) => atlas,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };
    pb.finish_with_message("Tiles rendered");

    let output = resolve(manifest_path, &manifest.output);
    atlas.save(&output)?;
    println!("Saved {}x{} atlas to {}", atlas.width, atlas.height, output.display());

    Ok(())
}
