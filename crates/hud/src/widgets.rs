//! Compound widgets: weapon bar, perk and gadget bar, kill feed, the
//! self-obituary replay, scope readouts and the match clock.

use glam::Vec4;
use rand::Rng;
use rand::seq::SliceRandom;

use ricochet::entity::{MAX_CLIENTS, team_color};
use ricochet::obituary::{DamageType, ObituaryKind, compose_seeded, obituary_rng, scope_taunt};
use ricochet::weapon::WeaponDef;
use ricochet::WeaponType;

use crate::api::{
    Alignment, FONT_EXTRA_SMALL, FONT_SMALL, FONT_TINY, Font, HudApi, PassThrough, TextStyle,
};
use crate::color::{
    BLACK, DARK_GRAY, HALF_GRAY, RED, WHITE, ammo_color, attention_color, light_gray,
    plantable_color,
};
use crate::snapshot::{PlayerHud, WeaponState, gadget_uses};

const ICON_PADDING: f32 = 4.0;
const WALLBANG_ICON: &str = "weapons/wallbang_icon";
const BOMB_ICON: &str = "gfx/bomb";

/// Milliseconds a full zoom-in takes.
pub const ZOOM_TIME: f32 = 75.0;

/// Height of the self-obituary banner.
const SELF_OBITUARY_HEIGHT: f32 = 128.0;

const GLITCHES: &[char] = &['#', '@', '~', '$'];

/// How full the clip of `weapon` is, counting reload progress when it is
/// the weapon being reloaded.
pub fn ammo_frac(player: &PlayerHud, def: &WeaponDef, weapon: WeaponType, ammo: u16) -> f32 {
    if def.clip_size == 0 {
        return 1.0;
    }

    let reloading = matches!(
        player.weapon_state,
        WeaponState::Reloading | WeaponState::StagedReloading
    );
    if weapon != player.weapon || !reloading {
        return ammo as f32 / def.clip_size as f32;
    }

    if def.staged_reload_time != 0 {
        let stage = if player.weapon_state == WeaponState::StagedReloading {
            def.staged_reload_time
        } else {
            def.reload_time
        };
        let progress = (player.weapon_state_time as f32 / stage as f32).clamp(0.0, 1.0);
        return (ammo as f32 + progress) / def.clip_size as f32;
    }

    (player.weapon_state_time as f32 / def.reload_time as f32).min(1.0)
}

/// Swaps a few characters for noise. Changes every 67 ms.
pub fn glitch_text(text: &str, now: i64) -> String {
    let mut rng = obituary_rng((now / 67) as u64);
    text.chars()
        .map(|c| {
            if rng.gen_bool(0.03) {
                GLITCHES.choose(&mut rng).copied().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn perk_icon(player: &PlayerHud) -> String {
    format!("gfx/perks/{}", player.perk.name())
}

impl HudApi<'_, '_> {
    pub fn weapon_bar(&mut self, x: f32, y: f32, size: f32, padding: f32, alignment: Alignment) {
        let frame = self.frame;
        let player = frame.player;
        let weapons = &frame.reactor.weapons;

        let slots: Vec<_> = player
            .weapons
            .iter()
            .filter(|slot| slot.weapon != WeaponType::None)
            .copied()
            .collect();
        let has_bomb = player.carrying_bomb;

        let columns = slots.len() + usize::from(has_bomb);
        let total_width = columns as f32 * size + columns.saturating_sub(1) as f32 * padding;
        let border = size * 0.06;

        let mut x = alignment.align_x(x, total_width);
        let y = alignment.align_y(y, size);

        let selected = if player.pending_weapon != WeaponType::None {
            player.pending_weapon
        } else {
            player.weapon
        };

        for (i, slot) in slots.iter().enumerate() {
            let def = weapons.def(slot.weapon);
            let icon = DamageType::weapon(slot.weapon).icon();

            let frac = ammo_frac(player, def, slot.weapon, slot.ammo);
            let color = ammo_color(frac);

            let is_selected = slot.weapon == selected;
            let name_color = if is_selected { WHITE } else { HALF_GRAY };
            let tab = if is_selected { 0.35 } else { 0.27 };

            self.draw_box_padded(x, y, size, size + size * tab, border, DARK_GRAY, None);
            self.draw_box(x, y, size, size, light_gray(), Some(&*icon));

            let y_offset = size * (1.0 - frac);
            self.draw_box(x, y + y_offset, size, size - y_offset, color, None);
            self.draw_box_partial(x, y, size, frac, DARK_GRAY, &icon);

            if def.clip_size != 0 {
                let style = TextStyle::new(Font::BoldItalic, FONT_EXTRA_SMALL, color).outlined(BLACK);
                self.text(style, x + size * 0.05, y + size * 0.05, &slot.ammo.to_string());
            }

            let name_y = y + size * if is_selected { 1.15 } else { 1.1 };
            let style = TextStyle::new(Font::BoldItalic, FONT_EXTRA_SMALL, name_color)
                .aligned(Alignment::CenterTop)
                .outlined(BLACK);
            self.text(style, x + size * 0.5, name_y, def.name);

            if frame.snapshot.show_hotkeys {
                let bind = self
                    .bound_keys(&format!("use {}", def.short_name))
                    .or_else(|| self.bound_keys(&format!("weapon {}", i + 1)))
                    .unwrap_or_default();
                let style = TextStyle::new(Font::Bold, FONT_SMALL, HALF_GRAY)
                    .aligned(Alignment::CenterMiddle)
                    .outlined(BLACK);
                self.text(style, x + size * 0.5, y - size * 0.2, &bind);
            }

            x += size + padding;
        }

        if has_bomb {
            let (background, bomb, label) = if player.can_plant {
                (plantable_color(), DARK_GRAY, plantable_color())
            } else {
                (DARK_GRAY, WHITE, WHITE)
            };

            self.draw_box_padded(x, y, size, size, border, DARK_GRAY, None);
            self.draw_box(x, y, size, size, background, None);
            self.draw_box(x, y, size, size, bomb, Some(BOMB_ICON));
            let style = TextStyle::new(Font::BoldItalic, FONT_EXTRA_SMALL, label)
                .aligned(Alignment::CenterTop)
                .outlined(BLACK);
            self.text(style, x + size * 0.5, y + size * 1.15, "BOMB");
        }
    }

    pub fn perks_utility(&mut self, x: f32, y: f32, size: f32, padding: f32, alignment: Alignment) {
        let frame = self.frame;
        let player = frame.player;

        let uses = gadget_uses(player.gadget);
        let has_gadget = uses != 0;
        let columns = 1 + usize::from(has_gadget);
        let total_width = columns as f32 * size + (columns - 1) as f32 * padding;
        let border = size * 0.08;

        let mut x = alignment.align_x(x, total_width);
        let y = alignment.align_y(y, size);

        let perk = perk_icon(player);
        self.draw_box_padded(x, y, size, size, border, DARK_GRAY, None);
        self.draw_box(x, y, size, size, light_gray(), None);
        self.draw_box(x, y, size, size, WHITE, Some(perk.as_str()));
        x += size + padding;

        if !has_gadget {
            return;
        }

        let frac = player.gadget_ammo as f32 / uses as f32;
        let color = ammo_color(frac);
        let icon = DamageType::gadget(player.gadget).icon();

        self.draw_box_padded(x, y, size, size, border, DARK_GRAY, None);
        self.draw_box(x, y, size, size, light_gray(), Some(&*icon));
        let y_offset = size * (1.0 - frac);
        self.draw_box(x, y + y_offset, size, size - y_offset, color, None);
        self.draw_box_partial(x, y, size, frac, DARK_GRAY, &icon);

        let style = TextStyle::new(Font::BoldItalic, FONT_EXTRA_SMALL, color).outlined(BLACK);
        self.text(style, x + size * 0.05, y + size * 0.05, &player.gadget_ammo.to_string());

        if frame.snapshot.show_hotkeys {
            let bind = self.bound_keys("+gadget").unwrap_or_default();
            let style = TextStyle::new(Font::Bold, FONT_TINY, HALF_GRAY)
                .aligned(Alignment::CenterMiddle)
                .outlined(BLACK);
            self.text(style, x + size * 0.5, y - size * 0.25, &bind);
        }
    }

    /// The kill feed: newest at the bottom, as many rows as fit in
    /// `height`. Also draws the self-obituary while the viewer is dead.
    #[allow(clippy::too_many_arguments)]
    pub fn obituaries(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        icon_size: f32,
        font_size: f32,
        alignment: Alignment,
    ) {
        let frame = self.frame;
        let now = frame.now();

        let line_height = icon_size.max(font_size.trunc()).max(1.0);
        let max_rows = (height / line_height) as usize;

        let visible: Vec<_> = frame.reactor.obituaries.visible(now).collect();
        let skip = visible.len().saturating_sub(max_rows);

        let y = alignment.align_y(y, height);
        let x = alignment.align_x(x, width);

        let mut y_offset = 0.0;
        for record in visible.into_iter().skip(skip) {
            let accident = record.kind == ObituaryKind::Accident;
            let icon = record.damage.icon();

            let attacker_width = self.text_width(Font::Bold, font_size, &record.attacker);
            let victim_width = self.text_width(Font::Bold, font_size, &record.victim);

            let mut w = ICON_PADDING + icon_size + ICON_PADDING + victim_width;
            if !accident {
                w += attacker_width;
            }
            if record.wallbang {
                w += icon_size + ICON_PADDING;
            }

            let mut x_offset = width - w;
            let text_y = y + y_offset + (line_height - font_size) / 2.0;
            let icon_y = y + y_offset + (line_height - icon_size) / 2.0;

            if !accident {
                let style = TextStyle::new(Font::Bold, font_size, team_color(record.attacker_team))
                    .outlined(BLACK);
                self.text(style, x + x_offset, text_y, &record.attacker);
                x_offset += attacker_width;
            }

            x_offset += ICON_PADDING;
            self.draw_box(x + x_offset, icon_y, icon_size, icon_size, attention_color(), Some(&*icon));
            x_offset += icon_size + ICON_PADDING;

            if record.wallbang {
                self.draw_box(
                    x + x_offset,
                    icon_y,
                    icon_size,
                    icon_size,
                    attention_color(),
                    Some(WALLBANG_ICON),
                );
                x_offset += icon_size + ICON_PADDING;
            }

            let style =
                TextStyle::new(Font::Bold, font_size, team_color(record.victim_team)).outlined(BLACK);
            self.text(style, x + x_offset, text_y, &record.victim);

            y_offset += line_height;
        }

        if frame.player.is_dead() {
            self.self_obituary();
        }
    }

    /// Full-width banner replaying how the viewer died: the backdrop fades
    /// in over half a second, then the obituary word grows across the
    /// screen.
    pub fn self_obituary(&mut self) {
        let frame = self.frame;
        let record = frame.reactor.obituaries.self_obituary();
        if !record.is_active() {
            return;
        }

        let viewport = frame.viewport();
        let h = SELF_OBITUARY_HEIGHT;
        let t = (frame.now() - record.time) as f32 / 500.0;

        self.draw_box(
            0.0,
            viewport.y * 0.5 - h * 0.5,
            viewport.x,
            h,
            Vec4::new(0.0, 0.0, 0.0, (t * 0.5).min(0.5)),
            None,
        );

        if t < 1.0 {
            return;
        }

        let word = compose_seeded(record.entropy, record.kind, record.damage);
        let size = h * 0.5 + (h * 5.0 - h * 0.5) * unlerp01(1.0, t, 20.0);
        let mut color = attention_color();
        color.w = unlerp01(1.0, t, 2.0);

        let style = TextStyle::new(Font::Normal, size, color).aligned(Alignment::CenterMiddle);
        self.text(style, viewport.x * 0.5, viewport.y * 0.5, &word);
    }

    /// Range readout and kill taunt drawn while zoomed with a scoped weapon.
    pub fn scope(&mut self) {
        let frame = self.frame;
        let player = frame.player;
        let def = frame.reactor.weapons.def(player.weapon);
        if def.zoom_fov == 0.0 || player.zoom_time <= 0 {
            return;
        }

        let zoom = player.zoom_time as f32 / ZOOM_TIME;
        self.pass_through(PassThrough::ScopeOverlay { zoom });

        let Some(view) = frame.scope else {
            return;
        };

        let now = frame.now();
        let viewport = frame.viewport();
        let offset = viewport.x.min(viewport.y) * 0.1;
        let centre = viewport * 0.5;

        let wobble = (now as f32 / 128.0).sin() * 0.5 + (now as f32 / 257.0).sin() * 0.25;
        let range = format!("{:.2}m", (view.distance + wobble) / 32.0);
        // only the last two digits flicker
        let split = range.len().saturating_sub(3);
        let (stable, noisy) = range.split_at(split);
        let (digits, unit) = noisy.split_at(noisy.len().saturating_sub(1));
        let range = format!("{stable}{}{unit}", glitch_text(digits, now));

        let style = TextStyle::new(Font::Italic, FONT_SMALL, RED).aligned(Alignment::RightTop);
        self.text(style, centre.x - offset, centre.y + offset, &range);

        let on_player = view
            .target
            .is_some_and(|target| target > 0 && target as usize <= MAX_CLIENTS);
        if on_player {
            let mut color = attention_color();
            color.w = zoom;
            let taunt = format!("{}?", glitch_text(scope_taunt(now), now));
            let style = TextStyle::new(Font::Italic, FONT_SMALL, color).outlined(BLACK);
            self.text(style, centre.x + offset, centre.y + offset, &taunt);
        }
    }

    /// Match clock as `m:ss`.
    pub fn clock(&mut self, x: f32, y: f32, size: f32, color: Vec4, alignment: Alignment, border: f32) {
        let seconds = (self.frame.game.clock.max(0) + 999) / 1000;
        let text = format!("{}:{:02}", seconds / 60, seconds % 60);
        let mut style = TextStyle::new(Font::Bold, size, color).aligned(alignment);
        if border > 0.0 {
            style = style.outlined(BLACK);
        }
        self.text(style, x, y, &text);
    }

    pub fn crosshair(&mut self) {
        let viewport = self.frame.viewport();
        self.pass_through(PassThrough::Crosshair {
            x: viewport.x * 0.5,
            y: viewport.y * 0.5,
        });
    }
}

fn unlerp01(lo: f32, x: f32, hi: f32) -> f32 {
    ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
}
