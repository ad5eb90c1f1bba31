use anyhow::Result;
use clap::Parser;
use pin_icon_gen::icon_gen;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "pin-icon-gen",
    about = "Render the map-pin app icons (PWA, maskable and apple touch) as PNG files"
)]
struct Cli {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value_os_t = default_output_dir())]
    output: PathBuf,

    /// Also write manifest-icons.json with the web manifest `icons` entries
    #[clap(long)]
    manifest: bool,

    /// URL prefix of the icon files inside manifest-icons.json
    #[clap(long, value_name = "URL", default_value = "./assets/icons/")]
    manifest_base: String,
}

/// `assets/icons` next to this crate's manifest.
fn default_output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("icons")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: cli.output,
        manifest: cli.manifest,
        manifest_base: cli.manifest_base,
    })
}
