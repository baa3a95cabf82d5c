//! Weather emitter placement.

use glam::Vec3;

/// World positions of every vertex at or above `peak_level`.
pub fn place_weather_emitters(positions: &[Vec3], origin: Vec3, peak_level: f32) -> Vec<Vec3> {
    positions
        .iter()
        .map(|&p| p + origin)
        .filter(|p| p.y >= peak_level)
        .collect()
}
