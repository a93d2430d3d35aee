//! Embedded asset management.
//!
//! Files under the crate's `assets/` directory are compiled into the binary
//! with `rust-embed`, so the replay tool runs without any data next to it.

use anyhow::Context;
use rust_embed::Embed;

/// Path of the layout drawn when no `--hud` file is given.
pub const DEFAULT_HUD: &str = "huds/hud.json";

/// Embedded assets from the `assets/` directory.
#[derive(Embed)]
#[folder = "assets/"]
pub struct Assets;

impl Assets {
    /// Load a text asset by path.
    ///
    /// # Arguments
    /// * `path` - Relative path within the assets folder (e.g., "huds/hud.json")
    ///
    /// # Returns
    /// The file contents as a String, or None if missing or not UTF-8.
    pub fn load_string(path: &str) -> Option<String> {
        Self::get(path).and_then(|file| String::from_utf8(file.data.into_owned()).ok())
    }

    /// Like [`Assets::load_string`], failing with the missing path.
    pub fn require_string(path: &str) -> anyhow::Result<String> {
        Self::load_string(path).with_context(|| format!("embedded asset {path} is missing"))
    }
}
