mod common;

use common::{DrawLog, Scenario};
use glam::Vec4;
use ricochet::obituary::{DamageType, Gadget, ObituaryKind, WorldDamage, compose_seeded};
use ricochet::{Clock, ObituaryMessage, Team, WeaponType};
use ricochet_hud::color::{HALF_GRAY, WHITE, ammo_color};
use ricochet_hud::{Alignment, HudApi, PassThrough, ScopeView, WeaponSlot, WeaponState};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn record(scenario: &mut Scenario, time: i64, message: ObituaryMessage) {
    scenario.reactor.set_clock(Clock::new(time, 1.0));
    scenario.reactor.obituary(&message);
}

fn kill(victim: u16, attacker: u16, damage: DamageType) -> ObituaryMessage {
    ObituaryMessage {
        victim,
        attacker,
        assistor: None,
        damage,
        wallbang: false,
        entropy: 42,
    }
}

fn named(scenario: &mut Scenario) {
    scenario.reactor.roster.set_name(0, "alice");
    scenario.reactor.roster.set_name(1, "bob");
    scenario.reactor.roster.set_name(2, "carol");
}

#[test]
fn weapon_bar_lays_out_weapons_then_bomb() {
    let mut scenario = Scenario::new(1000);
    scenario.player.weapons = vec![
        WeaponSlot {
            weapon: WeaponType::Machinegun,
            ammo: 15,
        },
        WeaponSlot {
            weapon: WeaponType::None,
            ammo: 0,
        },
        WeaponSlot {
            weapon: WeaponType::Riotgun,
            ammo: 6,
        },
    ];
    scenario.player.weapon = WeaponType::Machinegun;
    scenario.player.carrying_bomb = true;

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).weapon_bar(640.0, 700.0, 64.0, 8.0, Alignment::CenterBottom);

    // three columns of 64 with two gaps of 8, centred on 640
    let mg = log.with_material("weapons/mg/icon");
    assert!(close(mg[0].x, 536.0) && close(mg[0].y, 636.0));
    let rg = log.with_material("weapons/rg/icon");
    assert!(close(rg[0].x, 608.0));
    let bomb = log.with_material("gfx/bomb");
    assert_eq!(bomb.len(), 1);
    assert!(close(bomb[0].x, 680.0));

    // the selected weapon gets the taller border tab
    let border = &log.boxes[0];
    assert!(close(border.x, 536.0 - 64.0 * 0.06));
    assert!(close(border.h, 64.0 * 1.35 + 2.0 * 64.0 * 0.06));

    // half a clip fills the lower half of the icon
    let fill = log
        .boxes
        .iter()
        .find(|b| b.material.is_none() && b.color == ammo_color(0.5))
        .expect("ammo fill");
    assert!(close(fill.y, 668.0) && close(fill.h, 32.0));

    assert_eq!(log.text("machinegun").map(|t| t.style.color), Some(WHITE));
    assert_eq!(log.text("riotgun").map(|t| t.style.color), Some(HALF_GRAY));
    assert!(log.text("15").is_some());
    assert!(log.text("6").is_some());
    assert!(log.text("BOMB").is_some());
}

#[test]
fn weapon_bar_hotkeys_fall_back_to_slot_binds() {
    let mut scenario = Scenario::new(1000);
    scenario.player.weapons = vec![
        WeaponSlot {
            weapon: WeaponType::Machinegun,
            ammo: 30,
        },
        WeaponSlot {
            weapon: WeaponType::Electrobolt,
            ammo: 1,
        },
    ];
    scenario.player.weapon = WeaponType::Machinegun;
    scenario.player.pending_weapon = WeaponType::Electrobolt;

    let mut log = DrawLog::default().bind("use mg", "Q").bind("weapon 2", "2");

    let frame = scenario.frame();
    HudApi::new(&frame, &mut log).weapon_bar(0.0, 0.0, 64.0, 8.0, Alignment::LeftTop);
    assert!(log.text("Q").is_none(), "hotkeys are off");
    // the pending weapon is the highlighted one
    assert_eq!(log.text("electrobolt").map(|t| t.style.color), Some(WHITE));
    // no clip, no ammo count
    assert!(log.text("1").is_none());

    scenario.config.show_hotkeys = true;
    log.clear();
    let frame = scenario.frame();
    HudApi::new(&frame, &mut log).weapon_bar(0.0, 0.0, 64.0, 8.0, Alignment::LeftTop);
    let q = log.text("Q").expect("weapon bind");
    assert!(close(q.y, -64.0 * 0.2));
    assert!(log.text("2").is_some());
}

#[test]
fn reload_progress_fills_the_current_weapon() {
    let mut scenario = Scenario::new(1000);
    scenario.player.weapons = vec![WeaponSlot {
        weapon: WeaponType::Machinegun,
        ammo: 0,
    }];
    scenario.player.weapon = WeaponType::Machinegun;
    scenario.player.weapon_state = WeaponState::Reloading;
    scenario.player.weapon_state_time = 375;

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).weapon_bar(0.0, 0.0, 100.0, 0.0, Alignment::LeftTop);

    let fill = log
        .boxes
        .iter()
        .find(|b| b.material.is_none() && b.color == ammo_color(0.25))
        .expect("reload fill");
    assert!(close(fill.h, 25.0));
}

#[test]
fn perks_bar_shows_gadget_charges() {
    let mut scenario = Scenario::new(1000);
    scenario.player.gadget = Gadget::ThrowingAxe;
    scenario.player.gadget_ammo = 1;
    scenario.config.show_hotkeys = true;

    let frame = scenario.frame();
    let mut log = DrawLog::default().bind("+gadget", "G");
    HudApi::new(&frame, &mut log).perks_utility(0.0, 0.0, 50.0, 10.0, Alignment::LeftTop);

    assert_eq!(log.with_material("gfx/perks/ninja").len(), 1);
    let axe = log.with_material("gadgets/axe/icon");
    assert!(close(axe[0].x, 60.0));
    assert!(log.text("1").is_some());
    assert!(close(log.text("G").expect("gadget bind").y, -12.5));
}

#[test]
fn perks_bar_without_gadget_is_one_column() {
    let scenario = Scenario::new(1000);
    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).perks_utility(100.0, 0.0, 50.0, 10.0, Alignment::RightTop);

    let perk = log.with_material("gfx/perks/ninja");
    assert!(close(perk[0].x, 50.0));
    assert!(log.texts.is_empty());
}

#[test]
fn obituary_feed_keeps_the_newest_rows() {
    let mut scenario = Scenario::new(0);
    named(&mut scenario);

    record(&mut scenario, 4000, kill(3, 2, DamageType::weapon(WeaponType::Riotgun)));
    let mut wallbang = kill(2, 1, DamageType::weapon(WeaponType::Electrobolt));
    wallbang.wallbang = true;
    record(&mut scenario, 8000, wallbang);
    record(&mut scenario, 9000, kill(1, 3, DamageType::weapon(WeaponType::Machinegun)));
    record(&mut scenario, 9500, kill(2, 0, DamageType::world(WorldDamage::Lava)));
    scenario.reactor.set_clock(Clock::new(10_000, 1.0));

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).obituaries(0.0, 0.0, 400.0, 32.0, 16.0, 16.0, Alignment::LeftTop);

    // the first kill expired, the wallbang row does not fit
    assert_eq!(log.strings(), vec!["CAROL", "ALICE", "BOB"]);
    assert!(log.with_material("weapons/wallbang_icon").is_empty());

    // right aligned inside the feed, one line each
    let carol = log.text("CAROL").unwrap();
    assert!(close(carol.x, 400.0 - 104.0) && close(carol.y, 0.0));
    let bob = log.text("BOB").unwrap();
    assert!(close(bob.x, 376.0) && close(bob.y, 16.0));
    assert_eq!(log.with_material("gfx/lava").len(), 1);
}

#[test]
fn obituary_feed_draws_wallbang_icons() {
    let mut scenario = Scenario::new(0);
    named(&mut scenario);
    let mut wallbang = kill(2, 1, DamageType::weapon(WeaponType::Electrobolt));
    wallbang.wallbang = true;
    record(&mut scenario, 8000, wallbang);
    scenario.reactor.set_clock(Clock::new(8100, 1.0));

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).obituaries(0.0, 100.0, 400.0, 100.0, 16.0, 16.0, Alignment::LeftBottom);

    assert_eq!(log.with_material("weapons/eb/icon").len(), 1);
    let icon = log.with_material("weapons/wallbang_icon");
    assert_eq!(icon.len(), 1);
    assert!(close(icon[0].y, 0.0));
    assert_eq!(log.text("ALICE").unwrap().style.color.w, 1.0);
}

#[test]
fn self_obituary_fades_in_then_names_the_death() {
    let mut scenario = Scenario::new(0);
    named(&mut scenario);
    let damage = DamageType::weapon(WeaponType::RocketLauncher);
    record(&mut scenario, 9000, kill(1, 3, damage));
    scenario.player.health = 0;
    scenario.player.team = Team::Alpha;

    scenario.reactor.set_clock(Clock::new(9200, 1.0));
    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).obituaries(0.0, 0.0, 400.0, 0.0, 16.0, 16.0, Alignment::LeftTop);

    let banner = log
        .boxes
        .iter()
        .find(|b| close(b.w, 1280.0))
        .expect("banner");
    assert!(close(banner.y, 360.0 - 64.0));
    assert!(close(banner.color.w, 0.2));
    assert!(log.texts.is_empty());

    scenario.reactor.set_clock(Clock::new(9600, 1.0));
    let frame = scenario.frame();
    log.clear();
    HudApi::new(&frame, &mut log).obituaries(0.0, 0.0, 400.0, 0.0, 16.0, 16.0, Alignment::LeftTop);

    let word = compose_seeded(42, ObituaryKind::Normal, damage);
    let text = log.text(&word).expect("obituary word");
    assert_eq!(text.style.alignment, Alignment::CenterMiddle);
    assert!(close(text.x, 640.0) && close(text.y, 360.0));
    assert!(close(text.style.color.w, 0.2));
    assert!(text.style.size > 64.0);
}

#[test]
fn self_obituary_hidden_while_alive() {
    let mut scenario = Scenario::new(0);
    named(&mut scenario);
    record(&mut scenario, 9000, kill(1, 3, DamageType::weapon(WeaponType::Riotgun)));
    scenario.reactor.set_clock(Clock::new(9600, 1.0));

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).self_obituary();
    assert!(!log.boxes.is_empty(), "called directly it still draws");

    log.clear();
    HudApi::new(&frame, &mut log).obituaries(0.0, 0.0, 400.0, 0.0, 16.0, 16.0, Alignment::LeftTop);
    assert!(log.boxes.iter().all(|b| !close(b.w, 1280.0)));
}

#[test]
fn scope_taunts_only_players() {
    let mut scenario = Scenario::new(5000);
    scenario.player.weapon = WeaponType::Electrobolt;
    scenario.player.zoom_time = 75;
    scenario.scope = Some(ScopeView {
        distance: 336.0,
        target: Some(2),
    });

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).scope();

    assert_eq!(log.widgets, vec![PassThrough::ScopeOverlay { zoom: 1.0 }]);
    let range = log
        .texts
        .iter()
        .find(|t| t.style.alignment == Alignment::RightTop)
        .expect("range readout");
    assert!(range.text.starts_with("10.") && range.text.ends_with('m'), "{}", range.text);
    let taunt = log.texts.iter().find(|t| t.text.ends_with('?')).expect("taunt");
    assert!(close(taunt.x, 640.0 + 72.0));

    scenario.scope = Some(ScopeView {
        distance: 336.0,
        target: Some(200),
    });
    let frame = scenario.frame();
    log.clear();
    HudApi::new(&frame, &mut log).scope();
    assert_eq!(log.texts.len(), 1);
}

#[test]
fn scope_needs_a_zoomed_scoped_weapon() {
    let mut scenario = Scenario::new(5000);
    scenario.player.weapon = WeaponType::Lasergun;
    scenario.player.zoom_time = 75;

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    HudApi::new(&frame, &mut log).scope();
    assert!(log.widgets.is_empty() && log.texts.is_empty());

    scenario.player.weapon = WeaponType::Electrobolt;
    scenario.player.zoom_time = 0;
    let frame = scenario.frame();
    HudApi::new(&frame, &mut log).scope();
    assert!(log.widgets.is_empty());
}

#[test]
fn clock_rounds_up_to_the_second() {
    let mut scenario = Scenario::new(0);
    scenario.game.clock = 61_500;

    let frame = scenario.frame();
    let mut log = DrawLog::default();
    let color = Vec4::new(1.0, 1.0, 0.0, 1.0);
    HudApi::new(&frame, &mut log).clock(640.0, 8.0, 24.0, color, Alignment::CenterTop, 0.0);

    let clock = log.text("1:02").expect("clock");
    assert_eq!(clock.style.border, None);
    assert_eq!(clock.style.color, color);
}
