use glam::{Vec3, Vec4};
use log::{debug, trace};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::announcer::Announcer;
use crate::beam::{fire_electro, fire_laser, fire_machinegun, fire_riotgun};
use crate::config::{BloodTrail, EffectsConfig, ViewState};
use crate::context::{Clock, EffectContext};
use crate::entity::{EntityArena, EntityNum, EntityState, is_client};
use crate::event::{EventKind, Origin, should_fire};
use crate::frame::Frame;
use crate::math::{angle_vectors, byte_to_dir, forward};
use crate::media::{Media, PlayerSound, VSAY_TOTAL};
use crate::obituary::Obituaries;
use crate::roster::Roster;
use crate::services::{
    AnimChannel, Attenuation, Channel, Effect, Emitter, ExplosionKind, PlayerAnim, ScreenEffect,
    Services, SurfaceFlags, ViewWeaponAnim,
};
use crate::weapon::{WeaponTable, WeaponType, decode_weapon_parm};

/// Flood guard between two voice chats of the same player.
pub const VSAY_TIMEOUT: i64 = 2500;

/// Horizontal speed under which a jump counts as standing still.
const JUMP_NEUTRAL_SPEED: i32 = 100;
const JUMP_FORWARD_EPSILON: f32 = 0.25;
const WALLJUMP_SIDE_EPSILON: f32 = 0.3;

const SPARKS_COLOR: Vec4 = Vec4::new(1.0, 0.67, 0.0, 1.0);

const DEATH_ANIMATIONS: [(PlayerAnim, PlayerAnim); 3] = [
    (PlayerAnim::BothDead1, PlayerAnim::BothDeath1),
    (PlayerAnim::BothDead2, PlayerAnim::BothDeath2),
    (PlayerAnim::BothDead3, PlayerAnim::BothDeath3),
];

const PAIN_ANIMATIONS: [PlayerAnim; 3] = [
    PlayerAnim::TorsoPain1,
    PlayerAnim::TorsoPain2,
    PlayerAnim::TorsoPain3,
];

/// Owns everything the event layer keeps between frames and turns events
/// into presentation.
pub struct Reactor {
    pub config: EffectsConfig,
    pub media: Media,
    pub weapons: WeaponTable,
    pub view: ViewState,
    pub clock: Clock,
    pub arena: EntityArena,
    pub announcer: Announcer,
    pub obituaries: Obituaries,
    pub roster: Roster,
    /// Weapon the local player asked for and has not received yet.
    pub predicted_weapon_switch: Option<WeaponType>,
    pub(crate) frame: Frame,
    pub(crate) fire_events: bool,
    pub(crate) rng: ChaCha8Rng,
}

impl Reactor {
    pub fn new(config: EffectsConfig, media: Media, weapons: WeaponTable, view: ViewState) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.cosmetic_seed);
        Self {
            config,
            media,
            weapons,
            view,
            clock: Clock::default(),
            arena: EntityArena::new(),
            announcer: Announcer::new(),
            obituaries: Obituaries::new(),
            roster: Roster::default(),
            predicted_weapon_switch: None,
            frame: Frame::default(),
            fire_events: false,
            rng,
        }
    }

    pub fn context(&self) -> EffectContext<'_> {
        EffectContext {
            config: &self.config,
            media: &self.media,
            weapons: &self.weapons,
            view: &self.view,
            clock: self.clock,
        }
    }

    pub(crate) fn handler<'a, 's>(&'a mut self, svc: &'a mut Services<'s>) -> Handler<'a, 's> {
        Handler {
            ctx: EffectContext {
                config: &self.config,
                media: &self.media,
                weapons: &self.weapons,
                view: &self.view,
                clock: self.clock,
            },
            arena: &mut self.arena,
            weapon_switch: &mut self.predicted_weapon_switch,
            rng: &mut self.rng,
            svc,
        }
    }

    /// Runs the handler of one entity event unless the prediction filter
    /// says this firing belongs to the other timeline. Returns whether the
    /// handler ran.
    pub fn entity_event(
        &mut self,
        state: &EntityState,
        kind: EventKind,
        parm: u8,
        origin: Origin,
        svc: &mut Services,
    ) -> bool {
        // Temp entities carry the shooter elsewhere; the filter applies to it.
        let owner = match kind {
            EventKind::ElectroTrail => parm as EntityNum,
            EventKind::FireRiotgun => state.owner,
            _ => state.number,
        };

        let prediction = self.view.prediction;
        let fires = should_fire(kind, self.view.is_viewer(state.number), origin, prediction)
            && should_fire(kind, self.view.is_viewer(owner), origin, prediction);
        if !fires {
            trace!("{kind:?} of {} left to the other timeline", state.number);
            return false;
        }

        debug!("{kind:?} ({parm}) on entity {}, {origin:?}", state.number);
        self.handler(svc).dispatch(state, kind, parm, origin.is_predicted());
        true
    }
}

/// Mutable view of the reactor handed to the event handlers for one call.
pub(crate) struct Handler<'a, 's> {
    pub(crate) ctx: EffectContext<'a>,
    pub(crate) arena: &'a mut EntityArena,
    pub(crate) weapon_switch: &'a mut Option<WeaponType>,
    pub(crate) rng: &'a mut ChaCha8Rng,
    pub(crate) svc: &'a mut Services<'s>,
}

impl Handler<'_, '_> {
    fn dispatch(&mut self, state: &EntityState, kind: EventKind, parm: u8, predicted: bool) {
        let num = state.number;

        match kind {
            EventKind::None => {}

            EventKind::WeaponActivate => self.weapon_activate(state, parm, predicted),
            EventKind::SmoothRefireWeapon => {
                if predicted {
                    self.smooth_refire(num, parm);
                }
            }
            EventKind::FireWeapon => self.fire_weapon(state, parm, predicted),
            EventKind::ElectroTrail => {
                fire_electro(
                    &self.ctx,
                    self.arena,
                    state.origin,
                    state.origin2,
                    parm as EntityNum,
                    self.svc,
                );
            }
            EventKind::FireRiotgun => {
                fire_riotgun(
                    &self.ctx,
                    self.arena,
                    state.origin,
                    state.origin2,
                    state.owner,
                    self.svc,
                    self.rng,
                );
            }
            EventKind::NoAmmoClick => {
                let sound = self.ctx.media.weapon_up_no_ammo;
                let volume = self.ctx.config.volume_effects;
                if self.ctx.view.is_viewer(num) {
                    self.svc
                        .play(sound, Emitter::Global, Channel::Item, volume, Attenuation::None);
                } else {
                    self.svc.play(
                        sound,
                        Emitter::Fixed(state.origin),
                        Channel::Item,
                        volume,
                        Attenuation::Idle,
                    );
                }
            }
            EventKind::Dash => self.dash(state, parm),
            EventKind::WallJump => self.wall_jump(state, parm),
            EventKind::DoubleJump => self.jump_sound(state),
            EventKind::Jump => self.jump(state),
            EventKind::JumpPad => {
                self.jump_sound(state);
                self.svc
                    .animate(num, AnimChannel::Event, PlayerAnim::LegsJumpNeutral);
            }
            EventKind::Fall => self.fall(state, parm),

            EventKind::WeaponDrop => {
                self.svc
                    .animate(num, AnimChannel::Event, PlayerAnim::TorsoWeaponSwitchOut);
            }
            EventKind::Pain => self.pain(state, parm),
            EventKind::Die => self.die(state.owner, parm),
            EventKind::Explosion1 | EventKind::Explosion2 => {
                let scale = if kind == EventKind::Explosion1 { 8.0 } else { 16.0 };
                self.svc.spawn(Effect::Explosion {
                    kind: ExplosionKind::Generic,
                    origin: state.origin,
                    dir: Vec3::ZERO,
                    radius: parm as f32 * scale,
                    team: state.team as u8,
                });
            }
            EventKind::Sparks => {
                let count = if state.damage > 0 {
                    ((state.damage as f32 * 0.25) as u32).clamp(1, 10)
                } else {
                    6
                };
                self.svc.spawn(Effect::Particles {
                    origin: state.origin,
                    dir: byte_to_dir(parm),
                    color: SPARKS_COLOR,
                    count,
                });
            }
            EventKind::LaserSparks => {
                self.svc.spawn(Effect::Particles {
                    origin: state.origin,
                    dir: byte_to_dir(parm),
                    color: state.color_rgb().extend(1.0),
                    count: state.counter,
                });
            }
            EventKind::Gibs => {
                self.svc.spawn(Effect::Gibs {
                    origin: state.origin,
                    velocity: state.origin2,
                    damage: parm,
                    team: state.team as u8,
                });
            }
            EventKind::ItemRespawn => {
                if let Some(ent) = self.arena.get_mut(num) {
                    ent.fx.respawn_time = Some(self.ctx.now());
                }
                self.svc.play(
                    self.ctx.media.item_respawn,
                    Emitter::Entity(num),
                    Channel::Auto,
                    self.ctx.config.volume_effects,
                    Attenuation::Idle,
                );
            }
            EventKind::PlayerRespawn => self.player_respawn(state),
            EventKind::PlayerTeleportIn | EventKind::PlayerTeleportOut => {
                self.teleport(state, kind == EventKind::PlayerTeleportIn);
            }
            EventKind::PlasmaExplosion => {
                let radius = state.radius as f32 * 8.0;
                self.svc.spawn(Effect::Explosion {
                    kind: ExplosionKind::Plasma,
                    origin: state.origin,
                    dir: byte_to_dir(parm),
                    radius,
                    team: state.team as u8,
                });
                self.svc.play(
                    self.ctx.media.plasma_hit,
                    Emitter::Fixed(state.origin),
                    Channel::Auto,
                    self.ctx.config.volume_effects,
                    Attenuation::Idle,
                );
                self.kick(state.origin, 50.0, radius, 100);
            }
            EventKind::BoltExplosion => {
                self.svc.spawn(Effect::ElectroImpact {
                    origin: state.origin,
                    normal: byte_to_dir(parm),
                    surface: SurfaceFlags::empty(),
                    team: state.team as u8,
                });
            }
            EventKind::GrenadeExplosion => {
                // Grenades exploding in mid air carry no direction.
                let dir = if parm != 0 { byte_to_dir(parm) } else { Vec3::ZERO };
                let radius = state.radius as f32 * 8.0;
                self.svc.spawn(Effect::Explosion {
                    kind: ExplosionKind::Grenade,
                    origin: state.origin,
                    dir,
                    radius,
                    team: state.team as u8,
                });
                self.kick(state.origin, 135.0, radius, 325);
            }
            EventKind::RocketExplosion => {
                let radius = state.radius as f32 * 8.0;
                self.svc.spawn(Effect::Explosion {
                    kind: ExplosionKind::Rocket,
                    origin: state.origin,
                    dir: byte_to_dir(parm),
                    radius,
                    team: state.team as u8,
                });
                self.kick(state.origin, 135.0, radius, 300);
            }
            EventKind::GrenadeBounce => {
                let sound = self.ctx.media.grenade_bounce[self.rng.gen_range(0..2)];
                self.svc.play(
                    sound,
                    Emitter::Entity(num),
                    Channel::Auto,
                    self.ctx.config.volume_effects,
                    Attenuation::Idle,
                );
            }
            EventKind::BladeImpact => {
                self.svc.spawn(Effect::BladeImpact {
                    origin: state.origin,
                    dir: state.origin2,
                });
            }
            EventKind::Blood => {
                let hidden = match self.ctx.config.blood_trail {
                    BloodTrail::Off => true,
                    BloodTrail::On => false,
                    BloodTrail::HideOwnHits => self.ctx.view.is_viewer(state.owner),
                };
                if !hidden {
                    self.svc.spawn(Effect::Blood {
                        origin: state.origin,
                        dir: byte_to_dir(parm),
                        damage: state.damage,
                        team: state.team as u8,
                    });
                }
            }
            EventKind::PlatHitTop
            | EventKind::PlatHitBottom
            | EventKind::PlatStartMoving
            | EventKind::DoorHitTop
            | EventKind::DoorHitBottom
            | EventKind::DoorStartMoving
            | EventKind::ButtonFire
            | EventKind::TrainStop
            | EventKind::TrainStart => {
                self.svc.play(
                    self.ctx.media.indexed(parm as usize),
                    Emitter::Fixed(state.origin),
                    Channel::Auto,
                    self.ctx.config.volume_effects,
                    Attenuation::Static,
                );
            }
            EventKind::VoiceSay => self.voice_say(state.owner, parm),
            EventKind::Damage => {
                self.svc.spawn(Effect::DamageNumber {
                    origin: state.origin,
                    damage: state.damage,
                });
            }
        }
    }

    fn set_weapon(&mut self, num: EntityNum, weapon: WeaponType) {
        if let Some(ent) = self.arena.get_mut(num) {
            ent.current.weapon = weapon;
        }
    }

    fn weapon_activate(&mut self, state: &EntityState, parm: u8, predicted: bool) {
        let num = state.number;
        let (weapon, silent) = decode_weapon_parm(parm);
        let viewer = self.ctx.view.is_viewer(num);

        if predicted {
            self.set_weapon(num, weapon);
            self.svc.spawn(Effect::ViewWeapon(ViewWeaponAnim::Refresh));
        }
        if viewer {
            *self.weapon_switch = None;
        }

        if let Some(ent) = self.arena.get_mut(num) {
            ent.fx.flash_until = None;
            ent.fx.barrel_until = None;
        }

        if silent {
            return;
        }

        self.svc
            .animate(num, AnimChannel::Event, PlayerAnim::TorsoWeaponSwitchIn);
        let (emitter, attenuation) = if viewer {
            (Emitter::Global, Attenuation::None)
        } else {
            (Emitter::Fixed(state.origin), Attenuation::Norm)
        };
        self.svc.play(
            self.ctx.media.weapon_up,
            emitter,
            Channel::Auto,
            self.ctx.config.volume_effects,
            attenuation,
        );
    }

    fn smooth_refire(&mut self, num: EntityNum, parm: u8) {
        let (weapon, _) = decode_weapon_parm(parm);
        self.set_weapon(num, weapon);
        self.svc.spawn(Effect::ViewWeapon(ViewWeaponAnim::Refresh));

        if weapon == WeaponType::Lasergun {
            let origin = self.ctx.view.eye();
            let dir = forward(self.ctx.view.predicted.view_angles);
            if let Some(ent) = self.arena.get_mut(num) {
                fire_laser(&self.ctx, &mut ent.fx.laser, origin, dir);
            }
        }
    }

    fn fire_weapon(&mut self, state: &EntityState, parm: u8, predicted: bool) {
        let num = state.number;
        let (weapon, _) = decode_weapon_parm(parm);

        if predicted {
            self.set_weapon(num, weapon);
        }

        self.fire_weapon_event(num, weapon);

        if !predicted {
            return;
        }

        // The local shot starts at the predicted eye, never the lagged origin.
        let origin = self.ctx.view.eye();
        let dir = forward(self.ctx.view.predicted.view_angles);
        match weapon {
            WeaponType::Electrobolt => {
                fire_electro(&self.ctx, self.arena, origin, dir, num, self.svc);
            }
            WeaponType::Riotgun => {
                fire_riotgun(&self.ctx, self.arena, origin, dir, num, self.svc, self.rng);
            }
            WeaponType::Lasergun => {
                if let Some(ent) = self.arena.get_mut(num) {
                    fire_laser(&self.ctx, &mut ent.fx.laser, origin, dir);
                }
            }
            WeaponType::Machinegun => {
                let team = self.arena.team(num);
                fire_machinegun(
                    &self.ctx, self.arena, origin, dir, num, team, self.svc, self.rng,
                );
            }
            _ => {}
        }
    }

    /// Sound, muzzle timers and animations shared by every shot.
    fn fire_weapon_event(&mut self, num: EntityNum, weapon: WeaponType) {
        if weapon == WeaponType::None {
            return;
        }

        let now = self.ctx.now();
        let info = self.ctx.weapons.info(weapon);

        // Plasma fires fast enough to flood the mixer at normal falloff.
        let attenuation = if weapon == WeaponType::Plasmagun {
            Attenuation::Idle
        } else {
            Attenuation::Norm
        };
        let sound = info.fire_sounds.choose(&mut *self.rng).copied();
        let emitter = if self.ctx.view.is_viewer(num) {
            Emitter::Global
        } else {
            Emitter::Entity(num)
        };
        self.svc.play(
            sound,
            emitter,
            Channel::MuzzleFlash,
            self.ctx.config.volume_effects,
            attenuation,
        );

        if let Some(ent) = self.arena.get_mut(num) {
            if weapon == WeaponType::Gunblade && info.barrel_time > 0 {
                ent.fx.barrel_until = Some(now + info.barrel_time);
            } else {
                if self.ctx.config.weapon_flashes && info.flash_time > 0 {
                    ent.fx.flash_until = Some(now + info.flash_time);
                }
                if info.barrel_time > 0 {
                    ent.fx.barrel_until = Some(now + info.barrel_time);
                }
            }
        }

        let anim = match weapon {
            WeaponType::Gunblade => PlayerAnim::TorsoShootBlade,
            WeaponType::Lasergun => PlayerAnim::TorsoShootPistol,
            WeaponType::RocketLauncher | WeaponType::GrenadeLauncher => {
                PlayerAnim::TorsoShootHeavyWeapon
            }
            WeaponType::Electrobolt => PlayerAnim::TorsoShootAimWeapon,
            _ => PlayerAnim::TorsoShootLightWeapon,
        };
        self.svc.animate(num, AnimChannel::Event, anim);

        if self.ctx.view.first_person(num) {
            let anim = if weapon == WeaponType::Gunblade {
                ViewWeaponAnim::AttackWeak
            } else {
                ViewWeaponAnim::AttackStrong
            };
            self.svc.spawn(Effect::ViewWeapon(anim));
        }
    }

    fn player_sound(
        &mut self,
        num: EntityNum,
        channel: Channel,
        sound: PlayerSound,
        attenuation: Attenuation,
    ) {
        let emitter = if self.ctx.view.is_viewer(num) {
            Emitter::Global
        } else {
            Emitter::Entity(num)
        };
        self.svc.play(
            self.ctx.media.player_sound(sound),
            emitter,
            channel,
            self.ctx.config.volume_players,
            attenuation,
        );
    }

    fn jump_sound(&mut self, state: &EntityState) {
        self.player_sound(state.number, Channel::Body, PlayerSound::Jump, state.attenuation);
    }

    fn dash(&mut self, state: &EntityState, parm: u8) {
        let num = state.number;
        let anim = match parm {
            0 => Some(PlayerAnim::LegsDash),
            1 => Some(PlayerAnim::LegsDashLeft),
            2 => Some(PlayerAnim::LegsDashRight),
            3 => Some(PlayerAnim::LegsDashBack),
            _ => None,
        };
        if let Some(anim) = anim {
            self.svc.animate(num, AnimChannel::Event, anim);
        }

        self.player_sound(num, Channel::Body, PlayerSound::Dash, state.attenuation);
        self.svc.spawn(Effect::DashSmoke {
            origin: state.origin,
            angles: state.angles,
        });

        // Dashes push off the right leg, so the next jump starts on the left.
        if let Some(ent) = self.arena.get_mut(num) {
            ent.fx.jumped_left = true;
        }
    }

    fn wall_jump(&mut self, state: &EntityState, parm: u8) {
        let num = state.number;
        let normal = byte_to_dir(parm);
        let (ahead, right, _) = angle_vectors(Vec3::new(state.angles.x, state.angles.y, 0.0));

        let anim = if normal.dot(right) > WALLJUMP_SIDE_EPSILON {
            PlayerAnim::LegsWallJumpRight
        } else if -normal.dot(right) > WALLJUMP_SIDE_EPSILON {
            PlayerAnim::LegsWallJumpLeft
        } else if -normal.dot(ahead) > WALLJUMP_SIDE_EPSILON {
            PlayerAnim::LegsWallJumpBack
        } else {
            PlayerAnim::LegsWallJump
        };
        self.svc.animate(num, AnimChannel::Event, anim);

        self.player_sound(num, Channel::Body, PlayerSound::WallJump, state.attenuation);

        if self.ctx.config.cartoon_effects & 1 != 0 {
            self.svc.spawn(Effect::DustCircle {
                origin: state.origin + Vec3::Z * 15.0,
                normal,
                radius: 65.0,
                count: 12,
            });
        }
    }

    fn jump(&mut self, state: &EntityState) {
        let num = state.number;
        self.jump_sound(state);

        let planar = Vec3::new(state.velocity.x, state.velocity.y, 0.0);
        if (planar.length() as i32) < JUMP_NEUTRAL_SPEED {
            self.svc
                .animate(num, AnimChannel::Event, PlayerAnim::LegsJumpNeutral);
            return;
        }

        let facing = forward(Vec3::new(0.0, state.angles.y, 0.0));
        let anim = if planar.normalize_or_zero().dot(facing) > JUMP_FORWARD_EPSILON {
            match self.arena.get_mut(num) {
                Some(ent) => {
                    ent.fx.jumped_left = !ent.fx.jumped_left;
                    if ent.fx.jumped_left {
                        PlayerAnim::LegsJumpLeg1
                    } else {
                        PlayerAnim::LegsJumpLeg2
                    }
                }
                None => PlayerAnim::LegsJumpNeutral,
            }
        } else {
            PlayerAnim::LegsJumpNeutral
        };
        self.svc.animate(num, AnimChannel::Event, anim);
    }

    fn fall(&mut self, state: &EntityState, parm: u8) {
        let num = state.number;
        let viewer = self.ctx.view.is_viewer(num);
        if viewer {
            self.svc.screen(ScreenEffect::FallKick((parm as i32 + 5) * 10));
        }

        let volume = ((parm as f32 - 40.0) / 300.0).max(0.0);
        if viewer {
            self.svc.play(
                self.ctx.media.fall,
                Emitter::Local,
                Channel::Auto,
                volume,
                Attenuation::None,
            );
        } else {
            self.svc.play(
                self.ctx.media.fall,
                Emitter::Entity(num),
                Channel::Auto,
                volume,
                state.attenuation,
            );
        }
    }

    fn pain(&mut self, state: &EntityState, parm: u8) {
        let sound = PlayerSound::PAIN[(parm as usize).min(PlayerSound::PAIN.len() - 1)];
        self.player_sound(state.number, Channel::Pain, sound, state.attenuation);

        let anim = PAIN_ANIMATIONS[self.rng.gen_range(0..PAIN_ANIMATIONS.len())];
        self.svc.animate(state.number, AnimChannel::Event, anim);
    }

    fn die(&mut self, num: EntityNum, parm: u8) {
        let (dead, dying) = DEATH_ANIMATIONS[parm as usize % DEATH_ANIMATIONS.len()];
        self.player_sound(num, Channel::Pain, PlayerSound::Death, Attenuation::Norm);
        self.svc.animate(num, AnimChannel::Base, dead);
        self.svc.animate(num, AnimChannel::Event, dying);
    }

    fn player_respawn(&mut self, state: &EntityState) {
        if state.owner == self.ctx.view.local_entity() {
            self.svc.screen(ScreenEffect::ResetKickAngles);
            self.svc.screen(ScreenEffect::ResetColorBlend);
            self.svc.screen(ScreenEffect::ResetDamageIndicator);
        }

        if is_client(state.owner) {
            if let Some(ent) = self.arena.get_mut(state.owner) {
                ent.fx.local.teleport_in = Some(self.ctx.now());
                ent.fx.teleported_to = state.origin;
            }
        }
    }

    fn teleport(&mut self, state: &EntityState, arriving: bool) {
        let sound = if arriving {
            self.ctx.media.teleport_in
        } else {
            self.ctx.media.teleport_out
        };
        self.svc.play(
            sound,
            Emitter::Fixed(state.origin),
            Channel::Auto,
            self.ctx.config.volume_effects,
            Attenuation::Norm,
        );

        if !is_client(state.owner) {
            return;
        }
        let now = self.ctx.now();
        if let Some(ent) = self.arena.get_mut(state.owner) {
            if arriving {
                ent.fx.local.teleport_in = Some(now);
                ent.fx.teleported_to = state.origin;
            } else {
                ent.fx.local.teleport_out = Some(now);
                ent.fx.teleported_from = state.origin;
            }
        }
    }

    fn kick(&mut self, origin: Vec3, knockback: f32, radius: f32, time: i64) {
        self.svc.screen(ScreenEffect::KickAngles {
            origin,
            radius,
            knockback,
            time,
        });
    }

    fn voice_say(&mut self, owner: EntityNum, parm: u8) {
        let config = self.ctx.config;
        if !config.voice_chats || config.volume_voicechats <= 0.0 {
            return;
        }
        let index = parm as usize;
        if index >= VSAY_TOTAL {
            return;
        }

        let now = self.ctx.now();
        let Some(ent) = self.arena.get_mut(owner) else {
            return;
        };
        if ent.fx.local.vsay_until.is_some_and(|until| until > now) {
            trace!("voice chat of {owner} dropped by flood guard");
            return;
        }
        ent.fx.local.vsay_until = Some(now + VSAY_TIMEOUT);

        let sound = self.ctx.media.voice_say[index];
        if self.ctx.view.postmatch {
            self.svc.play(
                sound,
                Emitter::Global,
                Channel::Auto,
                config.volume_voicechats,
                Attenuation::None,
            );
        } else {
            self.svc.play(
                sound,
                Emitter::Entity(owner),
                Channel::Auto,
                config.volume_voicechats,
                Attenuation::Distant,
            );
        }
    }
}
