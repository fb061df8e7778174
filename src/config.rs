use log::Level;

/// Scene coordinates span `[-SCENE_HALF_EXTENT, SCENE_HALF_EXTENT]` on X and Y.
pub const SCENE_HALF_EXTENT: f64 = 2.0;

pub const TUBULAR_SEGMENTS: usize = 100;
pub const TUBE_RADIUS: f64 = 0.1;
pub const RADIAL_SEGMENTS: usize = 8;

// Neon yellow, 0xFFEA00
pub const BEAM_COLOR: (u8, u8, u8) = (0xFF, 0xEA, 0x00);
pub const BEAM_OPACITY: f64 = 0.8;

pub const FOV_DEGREES: f64 = 75.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 1000.0;
pub const CAMERA_DISTANCE: f64 = 5.0;
/// How far ahead along the tangent the camera aims.
pub const CAMERA_LOOK_AHEAD: f64 = 0.5;

/// Radians added to the beam's Z rotation on every rendered frame.
pub const ROTATION_PER_FRAME: f64 = 0.005;

/// A card glows while its center sits inside this band (fractions of viewport height).
pub const GLOW_BAND: (f64, f64) = (0.2, 0.8);

/// Share of a benefit card that must be on screen before it animates in.
pub const ENTRANCE_AMOUNT: f64 = 0.5;

pub const NAV_SCROLLED_THRESHOLD: f64 = 20.0;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
