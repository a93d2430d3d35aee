mod common;

use glam::Vec3;
use ricochet::event::EntityEvent;
use ricochet::media::PlayerSound;
use ricochet::services::{AnimChannel, PlayerAnim, ScreenEffect};
use ricochet::weapon::encode_weapon_parm;
use ricochet::{
    BloodTrail, Effect, EntityState, EntityType, EventKind, Frame, PlayerStateEvent,
    PlayerStateEventKind, PlayerStateFrame, ViewState, WeaponType,
};

use common::{BlockWorld, Harness};

fn player(number: u16, events: [EntityEvent; 2]) -> EntityState {
    EntityState {
        events,
        ..EntityState::new(number, EntityType::Player)
    }
}

fn one(kind: EventKind, parm: u8) -> [EntityEvent; 2] {
    [EntityEvent::new(kind, parm), EntityEvent::default()]
}

fn frame(entities: Vec<EntityState>) -> Frame {
    Frame {
        entities,
        player_state: PlayerStateFrame {
            pov: 1,
            ..Default::default()
        },
    }
}

fn run_frame(h: &mut Harness, frame: Frame) {
    h.reactor.new_frame(frame);
    h.with_services(|reactor, svc| {
        reactor.fire_events(true, svc);
        reactor.fire_events(false, svc);
    });
}

#[test]
fn viewer_predictable_event_fires_once_per_timeline() {
    for prediction in [true, false] {
        let view = ViewState {
            prediction,
            ..Default::default()
        };
        let mut h = Harness::with_view(BlockWorld::default(), view);
        let jump = h.reactor.media.player_sound(PlayerSound::Jump);

        h.with_services(|reactor, svc| reactor.predicted_event(EventKind::Jump, 0, svc));
        run_frame(&mut h, frame(vec![player(1, one(EventKind::Jump, 0))]));

        assert_eq!(h.audio.count(jump), 1, "prediction {prediction}");
    }
}

#[test]
fn predicted_fire_is_not_repeated_by_the_snapshot() {
    let mut h = Harness::new(BlockWorld::default());
    let parm = encode_weapon_parm(WeaponType::Plasmagun, false);

    h.with_services(|reactor, svc| reactor.predicted_event(EventKind::FireWeapon, parm, svc));
    assert_eq!(
        h.reactor.arena.get(1).map(|e| e.current.weapon),
        Some(WeaponType::Plasmagun)
    );
    run_frame(&mut h, frame(vec![player(1, one(EventKind::FireWeapon, parm))]));

    assert_eq!(h.audio.count(Harness::fire_sound(WeaponType::Plasmagun)), 1);
}

#[test]
fn other_players_fire_from_the_snapshot() {
    let mut h = Harness::new(BlockWorld::default());
    let parm = encode_weapon_parm(WeaponType::RocketLauncher, false);

    run_frame(&mut h, frame(vec![player(7, one(EventKind::FireWeapon, parm))]));

    assert_eq!(h.audio.count(Harness::fire_sound(WeaponType::RocketLauncher)), 1);
    assert_eq!(h.scene.animations(7), vec![PlayerAnim::TorsoShootHeavyWeapon]);
}

#[test]
fn weapon_drop_fires_in_the_early_pass() {
    let mut h = Harness::new(BlockWorld::default());
    let state = player(
        4,
        [
            EntityEvent::new(EventKind::Pain, 1),
            EntityEvent::new(EventKind::WeaponDrop, 0),
        ],
    );
    h.reactor.new_frame(frame(vec![state]));

    h.with_services(|reactor, svc| reactor.fire_events(true, svc));
    assert_eq!(h.scene.animations(4), vec![PlayerAnim::TorsoWeaponSwitchOut]);

    h.with_services(|reactor, svc| reactor.fire_events(false, svc));
    let anims = h.scene.animations(4);
    assert_eq!(anims.len(), 2);
    assert!(matches!(
        anims[1],
        PlayerAnim::TorsoPain1 | PlayerAnim::TorsoPain2 | PlayerAnim::TorsoPain3
    ));
}

#[test]
fn events_fire_once_per_snapshot() {
    let mut h = Harness::new(BlockWorld::default());
    let pain = h.reactor.media.player_sound(PlayerSound::Pain50);
    h.reactor.new_frame(frame(vec![player(3, one(EventKind::Pain, 1))]));

    h.with_services(|reactor, svc| {
        reactor.fire_events(true, svc);
        reactor.fire_events(false, svc);
        reactor.fire_events(true, svc);
        reactor.fire_events(false, svc);
    });

    assert_eq!(h.audio.count(pain), 1);
    assert!(!h.reactor.events_pending());
}

#[test]
fn electro_trail_is_filtered_on_its_owner() {
    let mut h = Harness::new(BlockWorld::default());
    let mut trail = EntityState::new(300, EntityType::Event);
    trail.origin2 = Vec3::X;

    trail.events = one(EventKind::ElectroTrail, 1);
    run_frame(&mut h, frame(vec![trail]));
    assert!(h.reactor.arena.get(1).is_some_and(|e| e.fx.weapon_beam.is_none()));

    trail.events = one(EventKind::ElectroTrail, 5);
    run_frame(&mut h, frame(vec![trail]));
    assert!(h.reactor.arena.get(5).is_some_and(|e| e.fx.weapon_beam.is_some()));
}

#[test]
fn sound_entities_play_in_the_early_pass() {
    let mut h = Harness::new(BlockWorld::default());
    let mut speaker = EntityState::new(200, EntityType::SoundEvent);
    speaker.sound = 3;
    speaker.origin = Vec3::new(5.0, 6.0, 7.0);
    h.reactor.new_frame(frame(vec![speaker]));

    h.with_services(|reactor, svc| reactor.fire_events(true, svc));

    let sound = h.reactor.media.indexed(3);
    assert_eq!(h.audio.count(sound), 1);
    assert_eq!(
        h.audio.requests[0].emitter,
        ricochet::Emitter::Fixed(speaker.origin)
    );
}

#[test]
fn dash_then_jump_starts_on_the_left_leg() {
    let mut h = Harness::new(BlockWorld::default());
    let mut runner = player(9, one(EventKind::Dash, 2));
    runner.velocity = Vec3::new(320.0, 0.0, 0.0);
    run_frame(&mut h, frame(vec![runner]));

    runner.events = one(EventKind::Jump, 0);
    run_frame(&mut h, frame(vec![runner]));
    run_frame(&mut h, frame(vec![runner]));

    assert_eq!(
        h.scene.animations(9),
        vec![
            PlayerAnim::LegsDashRight,
            PlayerAnim::LegsJumpLeg2,
            PlayerAnim::LegsJumpLeg1,
        ]
    );
}

#[test]
fn slow_jump_is_neutral() {
    let mut h = Harness::new(BlockWorld::default());
    let mut walker = player(9, one(EventKind::Jump, 0));
    walker.velocity = Vec3::new(60.0, 60.0, 200.0);
    run_frame(&mut h, frame(vec![walker]));

    assert_eq!(h.scene.animations(9), vec![PlayerAnim::LegsJumpNeutral]);
}

#[test]
fn wall_jump_faces_away_from_the_wall() {
    let mut h = Harness::new(BlockWorld::default());
    // Facing +X with the wall behind: the wall normal points forward.
    let normal = ricochet::math::dir_to_byte(Vec3::X);
    run_frame(&mut h, frame(vec![player(6, one(EventKind::WallJump, normal))]));
    assert_eq!(h.scene.animations(6), vec![PlayerAnim::LegsWallJump]);
    assert_eq!(
        h.scene.count(|e| matches!(e, Effect::DustCircle { count: 12, .. })),
        1
    );

    h.clear_logs();
    let normal = ricochet::math::dir_to_byte(Vec3::NEG_X);
    run_frame(&mut h, frame(vec![player(6, one(EventKind::WallJump, normal))]));
    assert_eq!(h.scene.animations(6), vec![PlayerAnim::LegsWallJumpBack]);
}

#[test]
fn viewer_fall_kicks_the_view() {
    let mut h = Harness::new(BlockWorld::default());
    h.reactor.view.prediction = false;
    run_frame(&mut h, frame(vec![player(1, one(EventKind::Fall, 100))]));

    assert_eq!(
        h.scene.count(|e| *e == Effect::Screen(ScreenEffect::FallKick(1050))),
        1
    );
    let fall = &h.audio.requests[0];
    assert!((fall.volume - 0.2).abs() < 1e-6);
    assert_eq!(fall.emitter, ricochet::Emitter::Local);
}

#[test]
fn death_plays_matching_animation_pair() {
    let mut h = Harness::new(BlockWorld::default());
    let mut corpse = EntityState::new(150, EntityType::Event);
    corpse.owner = 12;
    corpse.events = one(EventKind::Die, 4);
    run_frame(&mut h, frame(vec![corpse]));

    assert_eq!(
        h.scene.effects,
        vec![
            Effect::Animation {
                entity: 12,
                channel: AnimChannel::Base,
                anim: PlayerAnim::BothDead2,
            },
            Effect::Animation {
                entity: 12,
                channel: AnimChannel::Event,
                anim: PlayerAnim::BothDeath2,
            },
        ]
    );
}

#[test]
fn voice_chats_are_flood_guarded() {
    let mut h = Harness::new(BlockWorld::default());
    let mut say = EntityState::new(140, EntityType::Event);
    say.owner = 3;
    say.events = one(EventKind::VoiceSay, 2);
    let sound = h.reactor.media.voice_say[2];

    run_frame(&mut h, frame(vec![say]));
    h.at(2000);
    run_frame(&mut h, frame(vec![say]));
    h.at(3600);
    run_frame(&mut h, frame(vec![say]));

    assert_eq!(h.audio.count(sound), 2);
}

#[test]
fn own_blood_can_be_hidden() {
    let mut h = Harness::new(BlockWorld::default());
    h.reactor.config.blood_trail = BloodTrail::HideOwnHits;
    let mut blood = EntityState::new(160, EntityType::Event);
    blood.events = one(EventKind::Blood, 0);

    blood.owner = 1;
    run_frame(&mut h, frame(vec![blood]));
    blood.owner = 8;
    run_frame(&mut h, frame(vec![blood]));

    assert_eq!(h.scene.count(|e| matches!(e, Effect::Blood { .. })), 1);
}

#[test]
fn respawn_of_local_player_resets_screen_feedback() {
    let mut h = Harness::new(BlockWorld::default());
    let mut respawn = EntityState::new(170, EntityType::Event);
    respawn.owner = 1;
    respawn.origin = Vec3::new(64.0, 0.0, 0.0);
    respawn.events = one(EventKind::PlayerRespawn, 0);
    run_frame(&mut h, frame(vec![respawn]));

    assert_eq!(
        h.scene.count(|e| matches!(e, Effect::Screen(ScreenEffect::ResetKickAngles))),
        1
    );
    let fx = &h.reactor.arena.get(1).map(|e| e.fx.clone()).unwrap_or_default();
    assert_eq!(fx.local.teleport_in, Some(1000));
    assert_eq!(fx.teleported_to, respawn.origin);
}

#[test]
fn player_state_events_need_the_matching_pov() {
    let mut h = Harness::new(BlockWorld::default());
    let hit = [
        PlayerStateEvent::new(PlayerStateEventKind::Hit, 4),
        PlayerStateEvent::new(PlayerStateEventKind::Damage20, 0),
    ];

    let mut snapshot = frame(Vec::new());
    snapshot.player_state.events = hit;
    snapshot.player_state.pov = 2;
    run_frame(&mut h, snapshot.clone());
    assert!(h.audio.requests.is_empty());
    assert!(h.scene.effects.is_empty());

    snapshot.player_state.pov = 1;
    run_frame(&mut h, snapshot);
    assert_eq!(h.audio.count(h.reactor.media.weapon_kill), 1);
    assert_eq!(
        h.scene.count(|e| matches!(e, Effect::Screen(ScreenEffect::CrosshairDamage))),
        1
    );
    assert_eq!(
        h.scene.count(|e| matches!(
            e,
            Effect::Screen(ScreenEffect::DamageIndicator { damage: 20, .. })
        )),
        1
    );
}

#[test]
fn out_of_range_hit_calibre_is_ignored() {
    let mut h = Harness::new(BlockWorld::default());
    let mut snapshot = frame(Vec::new());
    snapshot.player_state.events[0] = PlayerStateEvent::new(PlayerStateEventKind::Hit, 7);
    run_frame(&mut h, snapshot);

    assert!(h.audio.requests.is_empty());
}

#[test]
fn queued_announcements_are_spaced() {
    let mut h = Harness::new(BlockWorld::default());
    for parm in 0..3 {
        let mut snapshot = frame(Vec::new());
        snapshot.player_state.events[0] =
            PlayerStateEvent::new(PlayerStateEventKind::AnnouncerQueued, parm);
        run_frame(&mut h, snapshot);
    }
    assert!(h.audio.requests.is_empty());

    let mut released = Vec::new();
    for _ in 0..(3 * 1500 / 100) {
        released.extend(h.reactor.release_announcer(100, &mut h.audio));
    }
    assert_eq!(
        released,
        (0..3)
            .filter_map(|i| h.reactor.media.indexed(i))
            .collect::<Vec<_>>()
    );
}

#[test]
fn missing_sound_handles_are_skipped() {
    let mut h = Harness::new(BlockWorld::default());
    h.reactor.media.item_respawn = None;
    run_frame(
        &mut h,
        frame(vec![EntityState {
            events: one(EventKind::ItemRespawn, 0),
            ..EntityState::new(90, EntityType::Item)
        }]),
    );

    assert!(h.audio.requests.is_empty());
    assert_eq!(
        h.reactor.arena.get(90).and_then(|e| e.fx.respawn_time),
        Some(1000)
    );
}
