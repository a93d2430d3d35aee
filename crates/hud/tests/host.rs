mod common;

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use common::{DrawLog, Scenario};
use ricochet_hud::{FileAsset, HudHost, LayoutEngine, StaticAsset};

fn host(source: &str) -> HudHost<LayoutEngine> {
    HudHost::new(LayoutEngine, Box::new(StaticAsset::new("hud.json", source)))
}

fn temp_layout(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ricochet-hud-{}-{name}.json", std::process::id()));
    fs::write(&path, source).unwrap();
    path
}

fn touch(path: &PathBuf, source: &str, age: u64) {
    fs::write(path, source).unwrap();
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(age))
        .unwrap();
}

const FPS_LAYOUT: &str = r##"{ "elements": [
    { "draw": "text", "if": "show_fps", "x": "viewport_width - 8", "y": 8,
      "text": "{fps} FPS", "font": "bold", "font_size": 16, "color": "#fff",
      "alignment": "right top" }
] }"##;

#[test]
fn conditions_read_the_snapshot() {
    let mut scenario = Scenario::new(1000);
    let mut hud = host(FPS_LAYOUT);
    let mut log = DrawLog::default();

    assert!(hud.draw(&scenario.frame(), &mut log));
    assert!(log.texts.is_empty());

    scenario.config.show_fps = true;
    assert!(hud.draw(&scenario.frame(), &mut log));
    let fps = log.text("60 FPS").expect("fps counter");
    assert_eq!(fps.x, 1272.0);
    assert_eq!(hud.stats().frames_drawn, 2);
}

#[test]
fn runtime_errors_are_retried_every_frame() {
    let scenario = Scenario::new(1000);
    let mut hud = host(
        r##"{ "elements": [
            { "draw": "box", "x": 0, "y": 0, "w": 10, "h": 10, "color": "#f00" },
            { "draw": "box", "if": "no_such_field > 1", "x": 0, "y": 0, "w": 10, "h": 10 }
        ] }"##,
    );
    let mut log = DrawLog::default();

    assert!(!hud.draw(&scenario.frame(), &mut log));
    assert!(!hud.draw(&scenario.frame(), &mut log));

    assert!(hud.is_loaded());
    assert_eq!(hud.stats().runtime_errors, 2);
    assert_eq!(hud.stats().loads, 1);
    // elements before the failure still drew
    assert_eq!(log.boxes.len(), 2);
}

#[test]
fn bad_layouts_disable_the_hud() {
    let scenario = Scenario::new(1000);
    let mut log = DrawLog::default();

    for source in ["{ \"elements\": [", "42", "\"text\"", r#"{ "elements": 3 }"#] {
        let mut hud = host(source);
        assert!(!hud.is_loaded(), "{source}");
        assert!(!hud.draw(&scenario.frame(), &mut log));
        assert_eq!(hud.stats().runtime_errors, 0);
    }
    assert!(log.boxes.is_empty() && log.texts.is_empty());
}

#[test]
fn editing_the_file_reloads_the_layout() {
    let scenario = Scenario::new(1000);
    let path = temp_layout("reload", "{ broken");
    let mut hud = HudHost::new(LayoutEngine, Box::new(FileAsset::new(&path)));
    let mut log = DrawLog::default();

    assert!(!hud.is_loaded());
    assert!(!hud.draw(&scenario.frame(), &mut log));

    touch(
        &path,
        r#"{ "elements": [ { "draw": "text", "x": 0, "y": 0, "font_size": 12, "text": "v2" } ] }"#,
        10,
    );
    assert!(hud.draw(&scenario.frame(), &mut log));
    assert!(log.text("v2").is_some());
    assert_eq!(hud.stats().loads, 2);

    // unchanged file, no reload
    assert!(hud.draw(&scenario.frame(), &mut log));
    assert_eq!(hud.stats().loads, 2);

    touch(
        &path,
        r#"{ "elements": [ { "draw": "text", "x": 0, "y": 0, "font_size": 12, "text": "v3" } ] }"#,
        20,
    );
    log.clear();
    assert!(hud.draw(&scenario.frame(), &mut log));
    assert_eq!(log.strings(), vec!["v3"]);

    fs::remove_file(&path).unwrap();
}

#[test]
fn binds_names_and_constants() {
    let mut scenario = Scenario::new(1000);
    scenario.reactor.roster.set_name(1, "bob");
    scenario.player.team = ricochet::Team::Beta;

    let mut hud = host(
        r#"{ "elements": [
            { "draw": "text", "x": 0, "y": 0, "font_size": 12,
              "text": "{bind('+attack')} {bind('+gadget')}" },
            { "draw": "text", "x": 0, "y": 20, "font_size": 12,
              "text": "{player_name(2)}|{player_name(99)}" },
            { "draw": "text", "if": "team == TEAM_BETA && chasing == NOT_CHASING",
              "x": 0, "y": 40, "font_size": 12, "text": "beta",
              "color": { "team": "team" } }
        ] }"#,
    );
    let mut log = DrawLog::default().bind("+attack", "MOUSE1");

    assert!(hud.draw(&scenario.frame(), &mut log));
    assert_eq!(log.strings(), vec!["MOUSE1 [+gadget]", "bob|", "beta"]);
    assert_eq!(
        log.text("beta").unwrap().style.color,
        ricochet::entity::team_color(ricochet::Team::Beta)
    );
}

#[test]
fn widgets_run_from_layouts() {
    let mut scenario = Scenario::new(1000);
    scenario.game.clock = 125_000;

    let mut hud = host(
        r##"{ "elements": [
            { "draw": "crosshair" },
            { "draw": "damage_numbers", "x": 1, "y": 2 },
            { "draw": "bomb_indicators", "icon_size": 32, "font_size": 12 },
            { "draw": "pointed", "font_size": 14, "color": "attention", "border": 1 },
            { "draw": "clock", "x": "viewport_width / 2", "y": 4, "font_size": 24,
              "color": { "srgb": false, "r": 1, "g": 1, "b": 1 } },
            { "draw": "print", "text": "hello {health}" }
        ] }"##,
    );
    let mut log = DrawLog::default();

    assert!(hud.draw(&scenario.frame(), &mut log));
    assert_eq!(log.widgets.len(), 4);
    assert_eq!(
        log.widgets[0],
        ricochet_hud::PassThrough::Crosshair { x: 640.0, y: 360.0 }
    );
    assert!(log.text("2:05").is_some());
}
