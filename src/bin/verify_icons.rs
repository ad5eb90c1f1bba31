use anyhow::{bail, Context, Result};
use image::{io::Reader as ImageReader, ColorType};
use pin_icon_gen::icon_gen::VARIANTS;
use std::path::PathBuf;

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/icons"));

    println!("Checking icons in: {}", dir.display());

    let mut failures = 0;
    for variant in &VARIANTS {
        let path = dir.join(variant.file_name);
        let img = ImageReader::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode {}", path.display()))?;

        let (width, height) = (img.width(), img.height());
        let center = img.to_rgba8().get_pixel(width / 2, height / 2).0;

        println!("\n{}:", variant.file_name);
        println!("  Dimensions: {}x{} (expected {}x{})", width, height, variant.size, variant.size);
        println!("  Color type: {:?}", img.color());
        println!("  Center RGBA: {:?}", center);

        let ok = width == variant.size
            && height == variant.size
            && img.color() == ColorType::Rgba8
            && center[3] == 255;
        if ok {
            println!("  ✓ OK");
        } else {
            println!("  ⚠ Unexpected output");
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} icons failed verification", failures, VARIANTS.len());
    }

    println!("\n✓ All {} icons verified", VARIANTS.len());
    Ok(())
}
