mod assets;
mod backends;
mod config;
mod demo;
mod replay;
mod world;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use ricochet_hud::{FileAsset, HudHost, LayoutEngine, ScriptAsset, StaticAsset};

use assets::{Assets, DEFAULT_HUD};
use config::ClientConfig;
use demo::Demo;
use replay::Replay;

#[derive(Parser)]
#[command(name = "ricochet")]
#[command(about = "Replays a recorded event stream through the client effects and HUD")]
struct Args {
    #[arg(long, help = "Recorded demo to play (JSON)")]
    demo: PathBuf,

    #[arg(long, help = "HUD layout file, reloaded when it changes")]
    hud: Option<PathBuf>,

    #[arg(long, help = "Force client-side prediction on")]
    prediction: bool,

    #[arg(long, help = "Force client-side prediction off", conflicts_with = "prediction")]
    no_prediction: bool,

    #[arg(long, default_value_t = 16, help = "Milliseconds between render ticks")]
    frame_ms: i64,

    #[arg(long, default_value_t = 1.0, help = "Interpolation fraction handed to the render tick")]
    lerp: f32,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 720.0)]
    height: f32,

    #[arg(long = "bind", value_name = "COMMAND=KEYS", help = "Key shown for a command, e.g. +attack=MOUSE1")]
    binds: Vec<String>,
}

impl Args {
    fn config(&self) -> anyhow::Result<ClientConfig> {
        if self.frame_ms <= 0 {
            bail!("--frame-ms must be positive");
        }

        let mut binds = ClientConfig::default().binds;
        binds.extend(parse_binds(&self.binds)?);

        let prediction = match (self.prediction, self.no_prediction) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        Ok(ClientConfig {
            frame_ms: self.frame_ms,
            lerp: self.lerp,
            hud_path: self.hud.clone(),
            viewport: (self.width, self.height),
            prediction,
            binds,
            ..Default::default()
        })
    }
}

fn parse_binds(binds: &[String]) -> anyhow::Result<HashMap<String, String>> {
    binds
        .iter()
        .map(|bind| {
            bind.split_once('=')
                .map(|(command, keys)| (command.to_string(), keys.to_string()))
                .with_context(|| format!("bind {bind:?} is not COMMAND=KEYS"))
        })
        .collect()
}

fn hud_asset(config: &ClientConfig) -> anyhow::Result<Box<dyn ScriptAsset>> {
    Ok(match &config.hud_path {
        Some(path) => Box::new(FileAsset::new(path.clone())),
        None => Box::new(StaticAsset::new(
            DEFAULT_HUD,
            Assets::require_string(DEFAULT_HUD)?,
        )),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config()?;

    let mut demo = Demo::load(&args.demo)?;
    info!(
        "{}: {} map blocks, {} frames",
        args.demo.display(),
        demo.map.len(),
        demo.frames.len()
    );

    let hud = HudHost::new(LayoutEngine, hud_asset(&config)?);
    let frames = std::mem::take(&mut demo.frames);
    let summary = Replay::new(config, &demo, hud).run(frames);

    println!("{summary}");
    Ok(())
}
