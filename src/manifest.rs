//! `icons` fragment of a Web App Manifest
//!
//! Mirrors the `icons` member of the W3C Web App Manifest so the generated
//! PNGs can be pasted straight into `manifest.webmanifest`.

use serde::Serialize;

/// Root object: `{ "icons": [...] }`
#[derive(Serialize, Debug, Clone, Default)]
pub struct ManifestFile {
    pub icons: Vec<ManifestIcon>,
}

/// One image resource of the manifest
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestIcon {
    /// URL of the image, relative to the manifest
    pub src: String,

    /// Space separated `WxH` sizes (e.g. "192x192")
    pub sizes: String,

    /// MIME type of the image
    #[serde(rename = "type")]
    pub mime_type: String,

    /// How the platform may use the icon
    pub purpose: Purpose,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Any,
    Maskable,
}

impl ManifestFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_icon(&mut self, icon: ManifestIcon) {
        self.icons.push(icon);
    }
}

impl ManifestIcon {
    /// Square PNG icon entry
    pub fn png(src: String, size: u32, purpose: Purpose) -> Self {
        Self {
            src,
            sizes: format!("{size}x{size}"),
            mime_type: "image/png".to_string(),
            purpose,
        }
    }
}
