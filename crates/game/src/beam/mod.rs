//! Hitscan weapon presentation: the continuous laser, the instant electro
//! beam and bullet/pellet tracers.

mod bullet;
mod electro;
mod laser;

pub use bullet::{
    BulletTrace, PelletImpact, fire_machinegun, fire_pattern, fire_riotgun, pellet_offsets,
    trace_bullet,
};
pub use electro::{fire_electro, render_electro};
pub use laser::{fire_laser, laser_timeout, render_laser};
