//! Shared chart colors, as plain RGB so both the egui and plotters backends
//! can use them.

use crate::stats::BarRole;

pub type Rgb = (u8, u8, u8);

pub const BAR: Rgb = (72, 120, 207);
pub const PEAK: Rgb = (46, 160, 67);
pub const LOW: Rgb = (214, 69, 65);
pub const CASUAL: Rgb = (243, 156, 18);
pub const REGISTERED: Rgb = (72, 120, 207);
pub const LINE: Rgb = (68, 1, 84);

/// Heatmap gradient stops, low to high (yellow-green-blue).
const HEAT_STOPS: [Rgb; 5] = [
    (255, 255, 217),
    (199, 233, 180),
    (65, 182, 196),
    (34, 94, 168),
    (8, 29, 88),
];

pub fn bar_color(role: BarRole) -> Rgb {
    match role {
        BarRole::Peak => PEAK,
        BarRole::Low => LOW,
        BarRole::Normal => BAR,
    }
}

/// Color for `value` on a `0..=max` scale. Values are clamped; `max <= 0`
/// maps everything to the lowest stop.
pub fn heat_color(value: i64, max: i64) -> Rgb {
    if max <= 0 {
        return HEAT_STOPS[0];
    }
    let t = (value as f64 / max as f64).clamp(0.0, 1.0);
    let scaled = t * (HEAT_STOPS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(HEAT_STOPS.len() - 2);
    let frac = scaled - lower as f64;
    lerp(HEAT_STOPS[lower], HEAT_STOPS[lower + 1], frac)
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
