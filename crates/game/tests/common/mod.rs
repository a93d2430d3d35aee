#![allow(dead_code)]

use std::collections::HashMap;

use glam::Vec3;
use ricochet::services::{BeamStyle, PlayerAnim};
use ricochet::{
    Audio, Clock, Collision, Contents, Effect, EffectsConfig, EntityNum, Media, Reactor, Scene,
    Services, SoundId, SoundRequest, SurfaceFlags, Trace, TraceHit, TraceQuery, ViewState,
    WeaponTable, WeaponType,
};

/// Axis-aligned block of the test world.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub min: Vec3,
    pub max: Vec3,
    pub contents: Contents,
    pub surface: SurfaceFlags,
    pub entity: Option<EntityNum>,
}

impl Block {
    pub fn solid(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            contents: Contents::SOLID,
            surface: SurfaceFlags::empty(),
            entity: None,
        }
    }

    pub fn water(min: Vec3, max: Vec3) -> Self {
        Self {
            contents: Contents::WATER,
            ..Self::solid(min, max)
        }
    }

    pub fn body(min: Vec3, max: Vec3, entity: EntityNum) -> Self {
        Self {
            contents: Contents::BODY,
            surface: SurfaceFlags::FLESH,
            entity: Some(entity),
            ..Self::solid(min, max)
        }
    }

    fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Entry fraction and face normal of the segment `start + delta * t`.
    fn entry(&self, start: Vec3, delta: Vec3) -> Option<(f32, Vec3)> {
        let mut enter = 0.0f32;
        let mut exit = 1.0f32;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let (s, d) = (start[axis], delta[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < 1e-6 {
                if s < lo || s > hi {
                    return None;
                }
                continue;
            }

            let (mut t0, mut t1) = ((lo - s) / d, (hi - s) / d);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > enter {
                enter = t0;
                normal = Vec3::ZERO;
                normal[axis] = if d > 0.0 { -1.0 } else { 1.0 };
            }
            exit = exit.min(t1);
            if enter > exit {
                return None;
            }
        }

        (normal != Vec3::ZERO).then_some((enter, normal))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockWorld {
    pub blocks: Vec<Block>,
}

impl BlockWorld {
    pub fn with(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            blocks: blocks.into_iter().collect(),
        }
    }
}

impl Collision for BlockWorld {
    fn trace(&self, query: &TraceQuery) -> Trace {
        let delta = query.end - query.start;
        let hit = self
            .blocks
            .iter()
            .filter(|block| block.contents.intersects(query.mask))
            .filter(|block| block.entity.is_none() || block.entity != query.ignore)
            .filter_map(|block| block.entry(query.start, delta).map(|(t, n)| (t, n, block)))
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match hit {
            None => Trace::miss(query.end),
            Some((fraction, normal, block)) => Trace {
                fraction,
                end_pos: query.start + delta * fraction,
                normal,
                surface: block.surface,
                contents: block.contents,
                hit: block.entity.map_or(TraceHit::World, TraceHit::Entity),
            },
        }
    }

    fn point_contents(&self, point: Vec3) -> Contents {
        self.blocks
            .iter()
            .filter(|block| block.contains(point))
            .fold(Contents::empty(), |acc, block| acc | block.contents)
    }
}

#[derive(Debug, Default)]
pub struct SoundLog {
    pub requests: Vec<SoundRequest>,
}

impl SoundLog {
    pub fn count(&self, sound: Option<SoundId>) -> usize {
        self.requests
            .iter()
            .filter(|request| Some(request.sound) == sound)
            .count()
    }
}

impl Audio for SoundLog {
    fn play(&mut self, request: SoundRequest) {
        self.requests.push(request);
    }
}

#[derive(Debug, Default)]
pub struct SceneLog {
    pub effects: Vec<Effect>,
    pub muzzles: HashMap<EntityNum, Vec3>,
}

impl SceneLog {
    pub fn count(&self, pred: impl Fn(&Effect) -> bool) -> usize {
        self.effects.iter().filter(|effect| pred(effect)).count()
    }

    pub fn animations(&self, entity: EntityNum) -> Vec<PlayerAnim> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Animation {
                    entity: e, anim, ..
                } if *e == entity => Some(*anim),
                _ => None,
            })
            .collect()
    }

    pub fn beams(&self, style: BeamStyle) -> usize {
        self.count(|effect| matches!(effect, Effect::Beam { style: s, .. } if *s == style))
    }
}

impl Scene for SceneLog {
    fn spawn(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn projection_source(&self, entity: EntityNum) -> Option<Vec3> {
        self.muzzles.get(&entity).copied()
    }
}

/// A reactor, its collaborators and helpers to drive it frame by frame.
pub struct Harness {
    pub reactor: Reactor,
    pub world: BlockWorld,
    pub audio: SoundLog,
    pub scene: SceneLog,
}

impl Harness {
    pub fn new(world: BlockWorld) -> Self {
        Self::with_view(world, ViewState::default())
    }

    pub fn with_view(world: BlockWorld, view: ViewState) -> Self {
        let mut weapons = WeaponTable::default();
        for (i, weapon) in WeaponType::ALL.into_iter().enumerate() {
            weapons.info_mut(weapon).fire_sounds = vec![SoundId(900 + i as u32)];
        }

        let mut reactor = Reactor::new(
            EffectsConfig::default(),
            Media::sequential(1, 16),
            weapons,
            view,
        );
        reactor.set_clock(Clock::new(1000, 0.0));

        Self {
            reactor,
            world,
            audio: SoundLog::default(),
            scene: SceneLog::default(),
        }
    }

    pub fn at(&mut self, now: i64) -> &mut Self {
        self.reactor.set_clock(Clock::new(now, 1.0));
        self
    }

    pub fn fire_sound(weapon: WeaponType) -> Option<SoundId> {
        Some(SoundId(900 + weapon as u32))
    }

    pub fn with_services<T>(&mut self, f: impl FnOnce(&mut Reactor, &mut Services) -> T) -> T {
        let mut svc = Services::new(&self.world, &mut self.audio, &mut self.scene);
        f(&mut self.reactor, &mut svc)
    }

    pub fn clear_logs(&mut self) {
        self.audio.requests.clear();
        self.scene.effects.clear();
    }
}
