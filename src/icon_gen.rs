use crate::background::{add_radial_glow, apply_vignette, linear_gradient};
use crate::canvas::Canvas;
use crate::color::{BRAND_BOTTOM, BRAND_TOP, GLOW_ROSE, GLOW_SKY};
use crate::manifest::{ManifestFile, ManifestIcon, Purpose};
use crate::pin::draw_pin;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Side length every variant is rendered at before resizing.
pub const MASTER_SIZE: u32 = 512;
/// Inset of the maskable variant, as a fraction of the icon size per edge.
pub const MASKABLE_PADDING: f32 = 0.12;

pub const MANIFEST_FILE: &str = "manifest-icons.json";

// Plain options so the library does not depend on clap
#[derive(Debug)]
pub struct Args {
    pub output: PathBuf,
    pub manifest: bool,
    pub manifest_base: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Full-bleed artwork for web manifests and home screens.
    Standard,
    /// Inset artwork that survives platform shape masks.
    Maskable,
    /// Linked from HTML for iOS home screens; not part of the web manifest.
    AppleTouch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconVariant {
    pub file_name: &'static str,
    pub size: u32,
    pub kind: VariantKind,
}

impl IconVariant {
    const fn new(file_name: &'static str, size: u32, kind: VariantKind) -> Self {
        Self {
            file_name,
            size,
            kind,
        }
    }

    pub fn padding_ratio(&self) -> f32 {
        match self.kind {
            VariantKind::Maskable => MASKABLE_PADDING,
            VariantKind::Standard | VariantKind::AppleTouch => 0.0,
        }
    }

    fn manifest_purpose(&self) -> Option<Purpose> {
        match self.kind {
            VariantKind::Standard => Some(Purpose::Any),
            VariantKind::Maskable => Some(Purpose::Maskable),
            VariantKind::AppleTouch => None,
        }
    }
}

/// Every file the generator writes, in write order.
pub const VARIANTS: [IconVariant; 4] = [
    IconVariant::new("icon-192.png", 192, VariantKind::Standard),
    IconVariant::new("icon-512.png", 512, VariantKind::Standard),
    IconVariant::new("maskable-512.png", 512, VariantKind::Maskable),
    IconVariant::new("apple-touch-icon.png", 180, VariantKind::AppleTouch),
];

/// Render the full icon at `size`×`size`.
///
/// A positive `padding_ratio` crops that fraction off every edge of the
/// background and scales it back up before the pin is drawn.
pub fn make_icon(size: u32, padding_ratio: f32) -> Canvas {
    let s = size as f32;
    let mut background = linear_gradient(size, BRAND_TOP, BRAND_BOTTOM);

    add_radial_glow(
        &mut background,
        ((s * 0.25).round(), (s * 0.2).round()),
        (s * 0.32).round(),
        GLOW_ROSE,
    );
    add_radial_glow(
        &mut background,
        ((s * 0.85).round(), (s * 0.35).round()),
        (s * 0.36).round(),
        GLOW_SKY,
    );
    apply_vignette(&mut background);

    let mut icon = Canvas::new(size);
    icon.composite_over(&background, 0, 0);

    if padding_ratio > 0.0 {
        let pad = (s * padding_ratio).round() as u32;
        icon = icon.crop_inset(pad);
    }

    draw_pin(&mut icon);
    icon
}

pub fn generate_icons(args: Args) -> Result<()> {
    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    let master = make_icon(MASTER_SIZE, 0.0);
    let maskable = make_icon(MASTER_SIZE, MASKABLE_PADDING);

    for variant in &VARIANTS {
        let source = if variant.padding_ratio() > 0.0 {
            &maskable
        } else {
            &master
        };
        let icon = source.resized(variant.size);
        save_png(&icon, &args.output.join(variant.file_name))?;
    }

    println!("Wrote icons to {}", args.output.display());

    if args.manifest {
        write_manifest(&args.output, &args.manifest_base)?;
        println!("✓ Generated {MANIFEST_FILE}");
    }

    Ok(())
}

fn save_png(icon: &Canvas, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(icon.as_image().as_raw(), &mut out_file, icon.size())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

/// Manifest entries for every variant a web manifest lists
fn build_manifest(base: &str) -> ManifestFile {
    let mut manifest = ManifestFile::new();
    for variant in &VARIANTS {
        if let Some(purpose) = variant.manifest_purpose() {
            manifest.add_icon(ManifestIcon::png(
                format!("{base}{}", variant.file_name),
                variant.size,
                purpose,
            ));
        }
    }
    manifest
}

fn write_manifest(out_dir: &Path, base: &str) -> Result<()> {
    let manifest = build_manifest(base);
    let json =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize icon manifest")?;
    std::fs::write(out_dir.join(MANIFEST_FILE), json)
        .with_context(|| format!("Failed to write {MANIFEST_FILE}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_composited(icon: &Canvas) {
        let size = icon.size();
        assert_eq!(icon.as_image().dimensions(), (size, size));
        assert_eq!(icon.pixel(size / 2, size / 2)[3], 255, "center must be opaque");

        let distinct: HashSet<[u8; 4]> = [
            (0, 0),
            (size - 1, 0),
            (size / 4, size / 5),
            (size / 2, size / 2),
            (size / 2, size - 1),
        ]
        .into_iter()
        .map(|(x, y)| icon.pixel(x, y).0)
        .collect();
        assert!(distinct.len() > 2, "icon looks like a flat fill: {distinct:?}");
    }

    #[test]
    fn test_make_icon_master() {
        let icon = make_icon(MASTER_SIZE, 0.0);
        assert_eq!(icon.size(), 512);
        assert_composited(&icon);
    }

    #[test]
    fn test_make_icon_maskable() {
        let icon = make_icon(MASTER_SIZE, MASKABLE_PADDING);
        assert_eq!(icon.size(), 512);
        assert_composited(&icon);
        // cropping changes the background but the pin sits on top unchanged
        let master = make_icon(MASTER_SIZE, 0.0);
        assert_ne!(icon.pixel(0, 0), master.pixel(0, 0));
        assert_eq!(icon.pixel(256, 215), master.pixel(256, 215));
    }

    #[test]
    fn test_make_icon_is_deterministic() {
        assert_eq!(make_icon(64, 0.0), make_icon(64, 0.0));
    }

    #[test]
    fn test_resized_variant_dimensions() {
        let icon_512 = make_icon(MASTER_SIZE, 0.0);
        assert_eq!(icon_512.resized(192).as_image().dimensions(), (192, 192));
        assert_eq!(icon_512.resized(180).as_image().dimensions(), (180, 180));
    }

    #[test]
    fn test_variant_table() {
        let names: Vec<_> = VARIANTS.iter().map(|v| (v.file_name, v.size)).collect();
        assert_eq!(
            names,
            [
                ("icon-192.png", 192),
                ("icon-512.png", 512),
                ("maskable-512.png", 512),
                ("apple-touch-icon.png", 180),
            ]
        );
        assert_eq!(VARIANTS[2].padding_ratio(), MASKABLE_PADDING);
        assert_eq!(VARIANTS[3].padding_ratio(), 0.0);
    }

    #[test]
    fn test_build_manifest_skips_apple_touch() {
        let manifest = build_manifest("/icons/");
        let sources: Vec<_> = manifest.icons.iter().map(|i| i.src.as_str()).collect();
        assert_eq!(
            sources,
            ["/icons/icon-192.png", "/icons/icon-512.png", "/icons/maskable-512.png"]
        );
        assert_eq!(manifest.icons[2].purpose, Purpose::Maskable);
    }

    #[test]
    fn test_write_png_decodes() {
        let icon = make_icon(32, 0.0);
        let mut buf = Vec::new();
        write_png(icon.as_image().as_raw(), &mut buf, 32).unwrap();

        let decoded = image::load_from_memory(&buf).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), *icon.as_image());
    }
}
