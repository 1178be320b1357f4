//! @ai:module:intent Pie and bar chart geometry computed from view entries
//! @ai:module:layer domain
//! @ai:module:public_api PieChart, Sector, BarChart, Bar, MIN_BAR_FRACTION
//! @ai:module:stateless true

use crate::shaping::{Rgb, ViewEntry};
use serde::Serialize;

/// Pie sectors start at twelve o'clock.
pub const START_ANGLE_DEG: f64 = -90.0;

/// Narrowest rendered bar as a fraction of the track.
pub const MIN_BAR_FRACTION: f64 = 0.05;

/// @ai:intent One pie sector, angles in degrees, clockwise on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sector {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl Sector {
    pub fn end_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg
    }

    /// @ai:intent Closed polygon approximating the sector outline
    /// @ai:pre radius > 0
    /// @ai:effects pure
    pub fn outline(&self, center: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
        let steps = (self.sweep_deg / 3.0).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);

        for step in 0..=steps {
            let angle = (self.start_deg + self.sweep_deg * step as f64 / steps as f64).to_radians();
            points.push((
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            ));
        }

        points
    }
}

/// @ai:intent Pie chart built from strictly positive legend entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieChart {
    pub sectors: Vec<Sector>,
}

impl PieChart {
    /// @ai:intent Lay out percentage entries clockwise from the top, each a share of 100
    /// @ai:post sweep = 3.6 * value, cumulative sweep never exceeds 360
    /// @ai:effects pure
    pub fn from_entries(entries: &[ViewEntry]) -> Self {
        Self::layout(entries, 100.0)
    }

    /// @ai:intent Lay out raw scores as shares of their positive total
    /// @ai:post sweeps sum to 360 when any entry is positive, otherwise no sectors
    /// @ai:effects pure
    pub fn from_scores(entries: &[ViewEntry]) -> Self {
        let total: f64 = entries.iter().map(|e| e.value).filter(|v| *v > 0.0).sum();
        Self::layout(entries, total)
    }

    fn layout(entries: &[ViewEntry], whole: f64) -> Self {
        if whole <= 0.0 {
            return Self::default();
        }

        let mut start = START_ANGLE_DEG;
        let mut remaining = 360.0_f64;
        let mut sectors = Vec::new();

        for entry in entries.iter().filter(|e| e.value > 0.0) {
            let sweep = (360.0 * entry.value / whole).min(remaining);
            if sweep <= 0.0 {
                break;
            }

            sectors.push(Sector {
                label: entry.name.clone(),
                value: entry.value,
                color: entry.color,
                start_deg: start,
                sweep_deg: sweep,
            });
            start += sweep;
            remaining -= sweep;
        }

        Self { sectors }
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

/// @ai:intent One horizontal bar, width as a fraction of the track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
    pub fraction: f64,
}

/// @ai:intent Horizontal bar chart scaled to the largest table value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarChart {
    pub max_value: f64,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// @ai:intent Scale bars to the maximum with a visible floor
    /// @ai:post every fraction lies in [MIN_BAR_FRACTION, 1]
    /// @ai:effects pure
    pub fn from_entries(entries: &[ViewEntry]) -> Self {
        let max_value = entries.iter().map(|e| e.value).fold(0.0_f64, f64::max);

        let bars = entries
            .iter()
            .map(|entry| {
                let fraction = if max_value > 0.0 {
                    entry.value / max_value
                } else {
                    0.0
                };

                Bar {
                    label: entry.name.clone(),
                    value: entry.value,
                    color: entry.color,
                    fraction: fraction.clamp(MIN_BAR_FRACTION, 1.0),
                }
            })
            .collect();

        Self { max_value, bars }
    }
}
