use glam::Vec3;
use log::trace;
use rand::Rng;

use crate::context::EffectContext;
use crate::entity::{BeamPhase, EntityArena, EntityEffects, EntityNum, LaserBeam, team_color};
use crate::math::{forward, vec_to_angles};
use crate::services::{
    Attenuation, BeamStyle, Channel, Effect, Emitter, MASK_SHOT, Services, TraceHit,
};
use crate::weapon::{FireDef, WeaponType};

/// Minimum impact spark interval, 20 per second.
const SPARK_INTERVAL: i64 = 1000 / 20;

/// Local refire can arrive up to ~64 ms apart; the floor keeps the beam
/// from flickering off between two refires.
pub fn laser_timeout(fire: &FireDef) -> i64 {
    (fire.reload_time as i64 + 10).max(65)
}

/// Starts or extends the beam of an entity firing from `origin` along `dir`.
pub fn fire_laser(ctx: &EffectContext, beam: &mut LaserBeam, origin: Vec3, dir: Vec3) {
    let fire = ctx.weapons.fire(WeaponType::Lasergun);

    beam.origin = origin;
    beam.point = origin + dir * fire.range;
    beam.origin_old = beam.origin;
    beam.point_old = beam.point;
    beam.phase = BeamPhase::Active {
        until: ctx.now() + laser_timeout(fire),
    };
}

/// Per-frame update of one entity's beam. Returns the phase after the tick.
pub fn render_laser<R: Rng>(
    ctx: &EffectContext,
    arena: &mut EntityArena,
    num: EntityNum,
    svc: &mut Services,
    rng: &mut R,
) -> BeamPhase {
    let now = ctx.now();
    let viewer = ctx.view.is_viewer(num);
    let Some(ent) = arena.get_mut(num) else {
        return BeamPhase::Idle;
    };

    match ent.fx.laser.phase {
        BeamPhase::Idle => return BeamPhase::Idle,
        BeamPhase::Active { until } if until <= now => {
            ent.fx.laser.phase = BeamPhase::Idle;
            trace!("laser of {num} stopped");
            let emitter = if viewer {
                Emitter::Global
            } else {
                Emitter::Entity(num)
            };
            let attenuation = if viewer {
                Attenuation::None
            } else {
                Attenuation::Norm
            };
            svc.play(
                ctx.media.lasergun_stop,
                emitter,
                Channel::Auto,
                ctx.config.volume_effects,
                attenuation,
            );
            return BeamPhase::Idle;
        }
        BeamPhase::Active { .. } => {}
    }

    let color = team_color(ent.current.team);
    let frac = ctx.clock.lerp_frac;

    let (origin, angles, point) = if ctx.view.first_person(num) {
        (
            ctx.view.eye(),
            ctx.view.predicted.view_angles,
            ent.fx.laser.lerp_point(frac),
        )
    } else {
        let origin = ent.fx.laser.lerp_origin(frac);
        let point = ent.fx.laser.lerp_point(frac);
        (origin, vec_to_angles(point - origin), point)
    };
    trace!("laser of {num} from {origin} towards {point}");

    // The trace always starts at the eye, the drawn beam at the muzzle.
    let range = ctx.weapons.fire(WeaponType::Lasergun).range;
    let dir = forward(angles);
    let tr = svc.trace(origin, origin + dir * range, Some(num), MASK_SHOT);

    if tr.hit_something() {
        let spark_due = ent
            .fx
            .laser
            .smoke_trail
            .is_none_or(|last| last + SPARK_INTERVAL < now);
        if spark_due {
            ent.fx.laser.smoke_trail = Some(now);
            svc.spawn(Effect::ImpactPuff {
                origin: tr.end_pos,
                normal: tr.normal,
                count: 8,
                scale: 0.5,
                color,
            });
            let hit = ctx.media.lasergun_hit[rng.gen_range(0..3)];
            svc.play(
                hit,
                Emitter::Fixed(tr.end_pos),
                Channel::Auto,
                ctx.config.volume_effects,
                Attenuation::Static,
            );
        }
    }

    if ctx.config.weapon_flashes {
        let flash = ctx.weapons.info(WeaponType::Lasergun).flash_time;
        ent.fx.flash_until = Some(now + flash);
    }
    let phase = ent.fx.laser.phase;

    let static_hit = match tr.hit {
        TraceHit::Nothing => false,
        TraceHit::World => true,
        TraceHit::Entity(hit) => !arena.effects(hit).contains(EntityEffects::TAKEDAMAGE),
    };
    if static_hit {
        svc.spawn(Effect::LaserImpact {
            origin: tr.end_pos,
            radius: 15.0,
            dir,
            color,
        });
        svc.spawn(Effect::Light {
            origin: tr.end_pos,
            radius: 100.0,
            color: color.truncate(),
        });
    }

    let start = svc.scene.projection_source(num).unwrap_or(origin);
    svc.spawn(Effect::Beam {
        start,
        end: tr.end_pos,
        width: 16.0,
        color,
        style: BeamStyle::Laser,
        fade_time: 0.0,
    });

    let attenuation = if viewer {
        Attenuation::None
    } else {
        Attenuation::Static
    };
    svc.play_immediate(
        ctx.media.lasergun_hum,
        num,
        ctx.config.volume_effects,
        attenuation,
    );

    phase
}
