//! Z-up angle helpers. Angles are `(pitch, yaw, roll)` in degrees.

use std::f32::consts::PI;
use std::sync::OnceLock;

use glam::Vec3;

pub const NUM_VERTEX_NORMALS: usize = 162;

pub fn angle_vectors(angles: Vec3) -> (Vec3, Vec3, Vec3) {
    let (sp, cp) = angles.x.to_radians().sin_cos();
    let (sy, cy) = angles.y.to_radians().sin_cos();
    let (sr, cr) = angles.z.to_radians().sin_cos();

    let forward = Vec3::new(cp * cy, cp * sy, -sp);
    let right = Vec3::new(
        -sr * sp * cy + cr * sy,
        -sr * sp * sy - cr * cy,
        -sr * cp,
    );
    let up = Vec3::new(cr * sp * cy + sr * sy, cr * sp * sy - sr * cy, cr * cp);

    (forward, right, up)
}

pub fn forward(angles: Vec3) -> Vec3 {
    angle_vectors(angles).0
}

/// Inverse of [`forward`], roll is always zero.
pub fn vec_to_angles(dir: Vec3) -> Vec3 {
    if dir.x == 0.0 && dir.y == 0.0 {
        let pitch = if dir.z > 0.0 { -90.0 } else { 90.0 };
        return Vec3::new(pitch, 0.0, 0.0);
    }

    let mut yaw = dir.y.atan2(dir.x).to_degrees();
    if yaw < 0.0 {
        yaw += 360.0;
    }
    let horizontal = (dir.x * dir.x + dir.y * dir.y).sqrt();
    let pitch = -dir.z.atan2(horizontal).to_degrees();

    Vec3::new(pitch, yaw, 0.0)
}

/// Right and up vectors perpendicular to `dir`, used to offset pellets.
pub fn view_vectors(dir: Vec3) -> (Vec3, Vec3) {
    let dir = dir.normalize_or_zero();
    let reference = if dir.z.abs() > 0.999 { Vec3::X } else { Vec3::Z };
    let right = dir.cross(reference).normalize_or_zero();
    let up = right.cross(dir);
    (right, up)
}

fn vertex_normals() -> &'static [Vec3; NUM_VERTEX_NORMALS] {
    static NORMALS: OnceLock<[Vec3; NUM_VERTEX_NORMALS]> = OnceLock::new();
    NORMALS.get_or_init(|| {
        let golden = PI * (3.0 - 5f32.sqrt());
        std::array::from_fn(|i| {
            let z = 1.0 - (i as f32 + 0.5) * 2.0 / NUM_VERTEX_NORMALS as f32;
            let radius = (1.0 - z * z).sqrt();
            let theta = golden * i as f32;
            Vec3::new(theta.cos() * radius, theta.sin() * radius, z)
        })
    })
}

/// Decodes a direction packed into one byte. Out-of-range values decode to
/// zero.
pub fn byte_to_dir(byte: u8) -> Vec3 {
    vertex_normals()
        .get(byte as usize)
        .copied()
        .unwrap_or(Vec3::ZERO)
}

pub fn dir_to_byte(dir: Vec3) -> u8 {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return 0;
    }

    let mut best = 0;
    let mut best_dot = f32::MIN;
    for (i, normal) in vertex_normals().iter().enumerate() {
        let dot = dir.dot(*normal);
        if dot > best_dot {
            best_dot = dot;
            best = i;
        }
    }
    best as u8
}
