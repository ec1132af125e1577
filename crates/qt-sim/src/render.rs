//! Draw primitives for a tank level display.
//!
//! Frames are rebuilt from the levels on every call; nothing here holds state.
//! Coordinates are normalized to a unit canvas with the origin at the bottom left.
//! Upper tanks 3 and 4 sit above lower tanks 1 and 2, each above the tank it drains into.

use crate::dynamics::Levels;

const TANK_WIDTH: f64 = 0.3;
const TANK_HEIGHT: f64 = 0.4;

/// Bottom-left corner of each tank on the canvas.
const TANK_ORIGIN: [(f64, f64); 4] = [(0.1, 0.05), (0.6, 0.05), (0.1, 0.55), (0.6, 0.55)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Tank wall.
    Outline,
    /// Liquid column.
    Liquid,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPrimitive {
    /// Tank index, 0-based.
    pub tank: usize,
    pub layer: Layer,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fraction of the tank height that is filled, clamped to `[0, 1]`. Non-finite levels
/// draw as empty.
pub fn fill_fraction(level: f64, h_max: f64) -> f64 {
    let f = level / h_max;
    if f.is_finite() { f.clamp(0.0, 1.0) } else { 0.0 }
}

/// One outline and one liquid rectangle per tank.
pub fn frame(levels: &Levels, h_max: f64) -> Vec<DrawPrimitive> {
    let mut prims = Vec::with_capacity(8);
    for (tank, (&level, &(x, y))) in levels.iter().zip(TANK_ORIGIN.iter()).enumerate() {
        prims.push(DrawPrimitive {
            tank,
            layer: Layer::Outline,
            x,
            y,
            width: TANK_WIDTH,
            height: TANK_HEIGHT,
        });
        prims.push(DrawPrimitive {
            tank,
            layer: Layer::Liquid,
            x,
            y,
            width: TANK_WIDTH,
            height: TANK_HEIGHT * fill_fraction(level, h_max),
        });
    }
    prims
}

/// Text gauges, upper tanks first: `T3 [#####.....]  10.00`.
pub fn text_gauges(levels: &Levels, h_max: f64, width: usize) -> String {
    let mut liquid: Vec<_> = frame(levels, h_max)
        .into_iter()
        .filter(|p| p.layer == Layer::Liquid)
        .collect();
    // Top row first, left to right.
    liquid.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    liquid
        .iter()
        .map(|p| {
            let filled = ((p.height / TANK_HEIGHT) * width as f64).round() as usize;
            let filled = filled.min(width);
            format!(
                "T{} [{}{}] {:>6.2}",
                p.tank + 1,
                "#".repeat(filled),
                ".".repeat(width - filled),
                levels[p.tank]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
