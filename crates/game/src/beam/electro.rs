use glam::Vec3;

use crate::context::EffectContext;
use crate::entity::{EntityArena, EntityNum, PendingBeam};
use crate::services::{Effect, MASK_SOLID, Services};
use crate::weapon::WeaponType;

/// Traces an electrobolt shot, spawns the wall impact right away and
/// leaves the beam for the next render tick, once the muzzle is posed.
pub fn fire_electro(
    ctx: &EffectContext,
    arena: &mut EntityArena,
    origin: Vec3,
    dir: Vec3,
    owner: EntityNum,
    svc: &mut Services,
) {
    let dir = dir.normalize_or_zero();
    let end = origin + dir * ctx.weapons.fire(WeaponType::Electrobolt).range;
    let team = arena.team(owner) as u8;

    let tr = svc.trace(origin, end, Some(ctx.view.pov), MASK_SOLID);
    if tr.hit_something() {
        svc.spawn(Effect::ElectroImpact {
            origin: tr.end_pos,
            normal: tr.normal,
            surface: tr.surface,
            team,
        });
    }

    if let Some(ent) = arena.get_mut(owner) {
        ent.fx.weapon_beam = Some(PendingBeam {
            origin,
            end: tr.end_pos,
        });
    }
}

/// Draws and consumes the pending beam of `num`, if any.
pub fn render_electro(arena: &mut EntityArena, num: EntityNum, svc: &mut Services) -> bool {
    let Some(ent) = arena.get_mut(num) else {
        return false;
    };
    let Some(beam) = ent.fx.weapon_beam.take() else {
        return false;
    };

    let start = svc.scene.projection_source(num).unwrap_or(beam.origin);
    svc.spawn(Effect::ElectroBeam {
        start,
        end: beam.end,
        team: ent.current.team as u8,
    });
    true
}
