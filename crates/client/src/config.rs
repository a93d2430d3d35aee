use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Render tick spacing between snapshots, in milliseconds.
    pub frame_ms: i64,
    pub lerp: f32,
    /// Layout read from disk instead of the embedded one.
    pub hud_path: Option<PathBuf>,
    pub viewport: (f32, f32),
    /// Overrides the recording's prediction flag.
    pub prediction: Option<bool>,
    pub binds: HashMap<String, String>,
    /// Render ticks appended after the last snapshot so queued
    /// announcements still play.
    pub tail_ms: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            lerp: 1.0,
            hud_path: None,
            viewport: (1280.0, 720.0),
            prediction: None,
            binds: HashMap::from([
                ("+attack".to_string(), "MOUSE1".to_string()),
                ("+gadget".to_string(), "G".to_string()),
            ]),
            tail_ms: 3000,
        }
    }
}
