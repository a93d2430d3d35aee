use glam::{Vec3, Vec4};
use rand::Rng;

use crate::context::EffectContext;
use crate::entity::{EntityArena, EntityNum, EntityType, Team, team_color};
use crate::math::view_vectors;
use crate::services::{
    Attenuation, BeamStyle, Channel, Contents, Effect, Emitter, MASK_SHOT, MASK_WATER, Services,
    SurfaceFlags, Trace,
};
use crate::weapon::WeaponType;

/// Golden-angle step of the sunflower pellet spiral, in radians.
const SPIRAL_STEP: f32 = 2.4;

const SPARK_COLOR: Vec4 = Vec4::new(0.95, 0.97, 0.32, 1.0);
const DUST_COLOR: Vec4 = Vec4::new(0.30, 0.30, 0.25, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletTrace {
    pub trace: Trace,
    /// Where the shot entered a liquid, if it started outside one.
    pub water: Option<Trace>,
}

/// What a pellet leaves where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PelletImpact {
    /// Bullet hole, plus dust on dusty surfaces.
    Bullet,
    /// Ricochet whine and a spark burst on hard surfaces.
    Ricochet,
}

impl PelletImpact {
    fn apply<R: Rng>(
        self,
        ctx: &EffectContext,
        arena: &EntityArena,
        tr: &Trace,
        through_water: bool,
        svc: &mut Services,
        rng: &mut R,
    ) {
        match self {
            Self::Bullet => {
                let dust = tr.surface.contains(SurfaceFlags::DUST);
                svc.spawn(Effect::BulletImpact {
                    origin: tr.end_pos,
                    normal: tr.normal,
                    dust,
                });
                if ctx.config.particles && dust {
                    svc.spawn(Effect::Particles {
                        origin: tr.end_pos,
                        dir: tr.normal,
                        color: DUST_COLOR,
                        count: 1,
                    });
                }
            }
            Self::Ricochet => {
                if through_water {
                    return;
                }
                let flesh = tr.surface.contains(SurfaceFlags::FLESH)
                    || tr.hit_entity().is_some_and(|hit| {
                        arena
                            .get(hit)
                            .is_some_and(|ent| ent.current.kind == EntityType::Player)
                    });
                if flesh {
                    return;
                }

                svc.play(
                    ctx.media.ricochet[rng.gen_range(0..2)],
                    Emitter::Fixed(tr.end_pos),
                    Channel::Auto,
                    ctx.config.volume_effects,
                    Attenuation::Static,
                );
                svc.spawn(Effect::Sparks {
                    origin: tr.end_pos,
                    color: SPARK_COLOR,
                    count: 16,
                    cone_radius: 128.0,
                    lifetime: 0.1,
                });
            }
        }
    }
}

/// Sideways and vertical offsets of each pellet. Pellet `i` sits at angle
/// `i * 2.4` on a spiral whose radius grows with `sqrt(i * 2.4)`, which
/// covers a disc evenly without drawing random numbers.
pub fn pellet_offsets(count: u32, hspread: f32, vspread: f32) -> impl Iterator<Item = (f32, f32)> {
    (0..count).map(move |i| {
        let fi = i as f32 * SPIRAL_STEP;
        let r = fi.cos() * hspread * fi.sqrt();
        let u = fi.sin() * vspread * fi.sqrt();
        (r, u)
    })
}

#[allow(clippy::too_many_arguments)]
pub fn trace_bullet(
    svc: &Services,
    start: Vec3,
    dir: Vec3,
    right: Vec3,
    up: Vec3,
    r: f32,
    u: f32,
    range: f32,
    ignore: EntityNum,
) -> BulletTrace {
    let end = start + dir * range + right * r + up * u;
    let trace = svc.trace(start, end, Some(ignore), MASK_SHOT);

    let inside = svc.collision.point_contents(start);
    let water = if inside.intersects(MASK_WATER) {
        // Fired from under the surface: the liquid starts at the muzzle.
        Some(Trace {
            fraction: 0.0,
            contents: inside,
            ..Trace::miss(start)
        })
    } else {
        let water = svc.trace(start, trace.end_pos, Some(ignore), MASK_WATER);
        (water.fraction < 1.0).then_some(water)
    };

    BulletTrace { trace, water }
}

fn water_splash(water: &Trace, svc: &mut Services) {
    let color = if water.contents.contains(Contents::WATER) {
        Vec4::new(0.47, 0.48, 0.8, 1.0)
    } else if water.contents.contains(Contents::SLIME) {
        Vec4::new(0.0, 1.0, 0.0, 1.0)
    } else if water.contents.contains(Contents::LAVA) {
        Vec4::new(1.0, 0.67, 0.0, 1.0)
    } else {
        return;
    };

    svc.spawn(Effect::Particles {
        origin: water.end_pos,
        dir: water.normal,
        color,
        count: 8,
    });
}

/// Finds where the shot left the liquid it entered at `water_start` and
/// trails bubbles along the submerged part. Moves `tr.end_pos` to that exit.
fn bubble_trail(tr: &mut Trace, water_start: Vec3, svc: &mut Services) {
    let dir = (tr.end_pos - water_start).normalize_or_zero();
    let pos = tr.end_pos - dir * 2.0;

    if svc.collision.point_contents(pos).intersects(MASK_WATER) {
        tr.end_pos = pos;
    } else {
        *tr = svc.trace(pos, water_start, tr.hit_entity(), MASK_WATER);
    }

    svc.spawn(Effect::BubbleTrail {
        start: water_start,
        end: tr.end_pos,
        density: 32,
    });
}

/// Fires `count` pellets in the sunflower pattern and returns what each
/// of them hit.
#[allow(clippy::too_many_arguments)]
pub fn fire_pattern<R: Rng>(
    ctx: &EffectContext,
    arena: &EntityArena,
    start: Vec3,
    dir: Vec3,
    ignore: EntityNum,
    count: u32,
    hspread: f32,
    vspread: f32,
    range: f32,
    impact: PelletImpact,
    svc: &mut Services,
    rng: &mut R,
) -> Vec<BulletTrace> {
    let (right, up) = view_vectors(dir);

    pellet_offsets(count, hspread, vspread)
        .map(|(r, u)| {
            let mut pellet = trace_bullet(svc, start, dir, right, up, r, u, range, ignore);

            if let Some(water) = &pellet.water {
                if water.end_pos != start {
                    water_splash(water, svc);
                }
            }

            if pellet.trace.is_impact() {
                impact.apply(ctx, arena, &pellet.trace, pellet.water.is_some(), svc, rng);
            }

            if let Some(water) = pellet.water {
                bubble_trail(&mut pellet.trace, water.end_pos, svc);
            }

            pellet
        })
        .collect()
}

pub fn fire_riotgun<R: Rng>(
    ctx: &EffectContext,
    arena: &EntityArena,
    origin: Vec3,
    dir: Vec3,
    owner: EntityNum,
    svc: &mut Services,
    rng: &mut R,
) -> Vec<BulletTrace> {
    let fire = *ctx.weapons.fire(WeaponType::Riotgun);
    let pellets = fire_pattern(
        ctx,
        arena,
        origin,
        dir,
        owner,
        fire.projectile_count,
        fire.spread,
        fire.v_spread,
        fire.range,
        PelletImpact::Bullet,
        svc,
        rng,
    );

    // One impact sound for the whole volley, where the centre would land.
    let tr = svc.trace(origin, origin + dir * fire.range, Some(owner), MASK_SHOT);
    if tr.is_impact() {
        svc.play(
            ctx.media.riotgun_hit,
            Emitter::Fixed(tr.end_pos),
            Channel::Auto,
            ctx.config.volume_effects,
            Attenuation::Idle,
        );
    }

    pellets
}

#[allow(clippy::too_many_arguments)]
pub fn fire_machinegun<R: Rng>(
    ctx: &EffectContext,
    arena: &EntityArena,
    origin: Vec3,
    dir: Vec3,
    owner: EntityNum,
    team: Team,
    svc: &mut Services,
    rng: &mut R,
) -> BulletTrace {
    let range = ctx.weapons.fire(WeaponType::Machinegun).range;
    let pellets = fire_pattern(
        ctx,
        arena,
        origin,
        dir,
        owner,
        1,
        0.0,
        0.0,
        range,
        PelletImpact::Ricochet,
        svc,
        rng,
    );
    let bullet = pellets.first().copied().unwrap_or(BulletTrace {
        trace: Trace::miss(origin + dir * range),
        water: None,
    });

    let start = svc.scene.projection_source(owner).unwrap_or(origin);
    let mut color = team_color(team);
    color.w = 0.5;
    svc.spawn(Effect::Beam {
        start,
        end: bullet.trace.end_pos,
        width: 2.0,
        color,
        style: BeamStyle::Tracer,
        fade_time: 0.05,
    });

    bullet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_pellet_is_centered() {
        let offsets: Vec<_> = pellet_offsets(4, 90.0, 60.0).collect();
        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets[0], (0.0, 0.0));
        assert!(offsets[1].0.abs() > 0.0 || offsets[1].1.abs() > 0.0);
    }

    #[test]
    fn pattern_is_reproducible_bit_for_bit() {
        let a: Vec<_> = pellet_offsets(20, 90.0, 90.0).collect();
        let b: Vec<_> = pellet_offsets(20, 90.0, 90.0).collect();
        for ((ar, au), (br, bu)) in a.iter().zip(&b) {
            assert_eq!(ar.to_bits(), br.to_bits());
            assert_eq!(au.to_bits(), bu.to_bits());
        }
    }

    #[test]
    fn spreads_scale_independently() {
        let wide: Vec<_> = pellet_offsets(8, 100.0, 10.0).collect();
        let narrow: Vec<_> = pellet_offsets(8, 10.0, 10.0).collect();
        for (w, n) in wide.iter().zip(&narrow) {
            assert!((w.0 - n.0 * 10.0).abs() < 1e-2);
            assert_eq!(w.1, n.1);
        }
    }
}
