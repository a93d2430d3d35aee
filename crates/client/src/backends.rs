//! Headless audio, scene and 2D renderer: every call is logged and counted.

use std::collections::{BTreeMap, HashMap};

use glam::Vec3;
use log::{debug, info, trace};
use ricochet::{Audio, Effect, EntityNum, EntityState, EntityType, Scene, SoundRequest};
use ricochet_hud::{Font, PassThrough, Quad, Renderer2d, Text};

/// Height of the weapon muzzle above a player's origin.
const MUZZLE_HEIGHT: f32 = 22.0;

#[derive(Debug, Default)]
pub struct AudioLog {
    pub played: usize,
    /// Looping sounds submitted, once per render tick they stay alive.
    pub looping: usize,
}

impl Audio for AudioLog {
    fn play(&mut self, request: SoundRequest) {
        if request.immediate {
            self.looping += 1;
            trace!("loop {:?} from {:?}", request.sound, request.emitter);
            return;
        }
        self.played += 1;
        debug!(
            "sound {:?} from {:?} on {:?} vol {:.2} ({:?})",
            request.sound, request.emitter, request.channel, request.volume, request.attenuation
        );
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::Animation { .. } => "animation",
        Effect::ViewWeapon(_) => "view_weapon",
        Effect::Particles { .. } => "particles",
        Effect::ImpactPuff { .. } => "impact_puff",
        Effect::Sparks { .. } => "sparks",
        Effect::BubbleTrail { .. } => "bubble_trail",
        Effect::Beam { .. } => "beam",
        Effect::ElectroBeam { .. } => "electro_beam",
        Effect::ElectroImpact { .. } => "electro_impact",
        Effect::LaserImpact { .. } => "laser_impact",
        Effect::Light { .. } => "light",
        Effect::BulletImpact { .. } => "bullet_impact",
        Effect::Explosion { .. } => "explosion",
        Effect::Gibs { .. } => "gibs",
        Effect::BladeImpact { .. } => "blade_impact",
        Effect::Blood { .. } => "blood",
        Effect::DustCircle { .. } => "dust_circle",
        Effect::DashSmoke { .. } => "dash_smoke",
        Effect::DamageNumber { .. } => "damage_number",
        Effect::Screen(_) => "screen",
    }
}

#[derive(Debug, Default)]
pub struct SceneLog {
    pub counts: BTreeMap<&'static str, usize>,
    muzzles: HashMap<EntityNum, Vec3>,
}

impl SceneLog {
    /// Poses every player model of the snapshot.
    pub fn pose(&mut self, states: &[EntityState]) {
        self.muzzles = states
            .iter()
            .filter(|state| state.kind == EntityType::Player)
            .map(|state| (state.number, state.origin + Vec3::Z * MUZZLE_HEIGHT))
            .collect();
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl Scene for SceneLog {
    fn spawn(&mut self, effect: Effect) {
        let name = effect_name(&effect);
        *self.counts.entry(name).or_default() += 1;
        if matches!(effect, Effect::Beam { .. }) {
            trace!("{effect:?}");
        } else {
            debug!("{effect:?}");
        }
    }

    fn projection_source(&self, entity: EntityNum) -> Option<Vec3> {
        self.muzzles.get(&entity).copied()
    }
}

/// Counts HUD draw calls and keeps the texts of the last frame.
#[derive(Debug, Default)]
pub struct DrawLog {
    pub boxes: usize,
    pub texts: usize,
    pub widgets: usize,
    pub frame_texts: Vec<String>,
    binds: HashMap<String, String>,
}

impl DrawLog {
    pub fn new(binds: HashMap<String, String>) -> Self {
        Self {
            binds,
            ..Default::default()
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_texts.clear();
    }
}

impl Renderer2d for DrawLog {
    fn draw_box(&mut self, quad: &Quad<'_>) {
        self.boxes += 1;
        trace!(
            "box {:.0},{:.0} {:.0}x{:.0} {:?}",
            quad.x, quad.y, quad.w, quad.h, quad.material
        );
    }

    fn draw_text(&mut self, text: &Text<'_>) {
        self.texts += 1;
        trace!("text {:?} at {:.0},{:.0}", text.text, text.x, text.y);
        self.frame_texts.push(text.text.to_string());
    }

    fn text_width(&self, _font: Font, size: f32, text: &str) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn bound_keys(&self, command: &str) -> Option<String> {
        self.binds.get(command).cloned()
    }

    fn widget(&mut self, widget: &PassThrough) {
        self.widgets += 1;
        trace!("widget {widget:?}");
    }
}

pub fn log_counts(scene: &SceneLog) {
    for (name, count) in &scene.counts {
        info!("  {name:<16} {count}");
    }
}
