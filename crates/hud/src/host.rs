use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{error, info, warn};

use crate::api::{HudApi, HudFrame, Renderer2d};
use crate::error::ScriptError;

/// A loaded HUD script, called once per frame.
pub trait HudScript {
    fn draw(&mut self, api: &mut HudApi) -> Result<(), ScriptError>;
}

/// Turns script source into something callable.
pub trait ScriptEngine {
    fn compile(&self, name: &str, source: &str) -> Result<Box<dyn HudScript>, ScriptError>;
}

/// Where the script source comes from.
pub trait ScriptAsset {
    fn name(&self) -> &str;

    fn load(&mut self) -> Result<String, ScriptError>;

    /// Whether the source changed since the last `load`.
    fn modified(&mut self) -> bool;
}

/// Source compiled into the binary. Never changes.
#[derive(Debug, Clone)]
pub struct StaticAsset {
    name: String,
    source: String,
}

impl StaticAsset {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

impl ScriptAsset for StaticAsset {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> Result<String, ScriptError> {
        Ok(self.source.clone())
    }

    fn modified(&mut self) -> bool {
        false
    }
}

/// A script on disk, reloaded when its modification time changes.
#[derive(Debug, Clone)]
pub struct FileAsset {
    path: PathBuf,
    name: String,
    loaded_at: Option<SystemTime>,
}

impl FileAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            loaded_at: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mtime(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|meta| meta.modified()).ok()
    }
}

impl ScriptAsset for FileAsset {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> Result<String, ScriptError> {
        self.loaded_at = self.mtime();
        fs::read_to_string(&self.path).map_err(|source| ScriptError::Asset {
            path: self.path.clone(),
            source,
        })
    }

    fn modified(&mut self) -> bool {
        self.mtime() != self.loaded_at
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub loads: u32,
    pub frames_drawn: u64,
    pub runtime_errors: u64,
}

/// Owns the HUD script: loads it, reloads it when its asset changes, and
/// calls it every frame. A script that fails to load disables the HUD until
/// the asset changes; a script that fails while drawing is retried on the
/// next frame.
pub struct HudHost<E: ScriptEngine> {
    engine: E,
    asset: Box<dyn ScriptAsset>,
    script: Option<Box<dyn HudScript>>,
    stats: HostStats,
}

impl<E: ScriptEngine> HudHost<E> {
    pub fn new(engine: E, asset: Box<dyn ScriptAsset>) -> Self {
        let mut host = Self {
            engine,
            asset,
            script: None,
            stats: HostStats::default(),
        };
        host.reload();
        host
    }

    pub fn is_loaded(&self) -> bool {
        self.script.is_some()
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Tears the script down and builds it again from the asset.
    pub fn reload(&mut self) {
        self.script = None;
        self.stats.loads += 1;

        let name = self.asset.name().to_string();
        let script = self
            .asset
            .load()
            .and_then(|source| self.engine.compile(&name, &source));

        match script {
            Ok(script) => {
                info!("loaded HUD script {name}");
                self.script = Some(script);
            }
            Err(err) => error!("HUD disabled: {err}"),
        }
    }

    /// Draws one frame. Returns whether the script ran to completion.
    pub fn draw(&mut self, frame: &HudFrame, renderer: &mut dyn Renderer2d) -> bool {
        if self.asset.modified() {
            info!("{} changed, reloading", self.asset.name());
            self.reload();
        }

        let Some(script) = self.script.as_mut() else {
            return false;
        };

        let mut api = HudApi::new(frame, renderer);
        match script.draw(&mut api) {
            Ok(()) => {
                self.stats.frames_drawn += 1;
                true
            }
            Err(err) => {
                self.stats.runtime_errors += 1;
                warn!("{}: {err}", self.asset.name());
                false
            }
        }
    }
}
