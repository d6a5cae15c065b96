//! Road lattice derived from the city bounds.
//!
//! Lines sit at `-extent/2 + k * spacing` for every integer `k >= 0` that keeps
//! the line inside the area, boundary included. Each line spans the full
//! opposite extent. Offsets are computed by multiplication, not by repeated
//! addition, so the last line does not drift.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::placement::AreaBounds;
use crate::constants::{DEFAULT_ROAD_WIDTH, TRAFFIC_LIGHT_HEIGHT};
use crate::error::{ensure_positive, GenerationError};

/// Upper limit on lines per family; tighter spacing is a config error
pub const MAX_LINES_PER_FAMILY: usize = 100_000;

/// Which coordinate is held constant along a road line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineFamily {
    /// Constant x, runs along Z
    X,
    /// Constant z, runs along X
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub family: LineFamily,
    pub offset: f32,
    pub start: Vec3,
    pub end: Vec3,
    pub width: f32,
}

impl RoadSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub position: Vec3,
}

/// Pure data: line offsets per family plus the area they span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadLattice {
    pub bounds: AreaBounds,
    pub spacing: f32,
    pub road_width: f32,
    pub x_lines: Vec<f32>,
    pub z_lines: Vec<f32>,
}

impl RoadLattice {
    /// All segments, X family first
    pub fn segments(&self) -> Vec<RoadSegment> {
        let hw = self.bounds.half_width();
        let hd = self.bounds.half_depth();

        let x_family = self.x_lines.iter().map(|&x| RoadSegment {
            family: LineFamily::X,
            offset: x,
            start: Vec3::new(x, 0.0, -hd),
            end: Vec3::new(x, 0.0, hd),
            width: self.road_width,
        });
        let z_family = self.z_lines.iter().map(|&z| RoadSegment {
            family: LineFamily::Z,
            offset: z,
            start: Vec3::new(-hw, 0.0, z),
            end: Vec3::new(hw, 0.0, z),
            width: self.road_width,
        });

        x_family.chain(z_family).collect()
    }

    pub fn segment_count(&self) -> usize {
        self.x_lines.len() + self.z_lines.len()
    }

    /// Ground-level crossing points, x-major
    pub fn intersections(&self) -> Vec<Vec3> {
        self.x_lines
            .iter()
            .flat_map(|&x| self.z_lines.iter().map(move |&z| Vec3::new(x, 0.0, z)))
            .collect()
    }

    pub fn traffic_lights(&self) -> Vec<TrafficLight> {
        self.intersections()
            .into_iter()
            .map(|p| TrafficLight {
                position: Vec3::new(p.x, TRAFFIC_LIGHT_HEIGHT, p.z),
            })
            .collect()
    }
}

/// Lattice with the default road width
pub fn derive_road_lattice(bounds: AreaBounds, spacing: f32) -> Result<RoadLattice, GenerationError> {
    derive_road_lattice_with_width(bounds, spacing, DEFAULT_ROAD_WIDTH)
}

pub fn derive_road_lattice_with_width(
    bounds: AreaBounds,
    spacing: f32,
    road_width: f32,
) -> Result<RoadLattice, GenerationError> {
    ensure_positive("road_spacing", spacing)?;
    ensure_positive("road_width", road_width)?;
    bounds.validate()?;

    Ok(RoadLattice {
        bounds,
        spacing,
        road_width,
        x_lines: line_offsets(bounds.width, spacing)?,
        z_lines: line_offsets(bounds.depth, spacing)?,
    })
}

fn line_offsets(extent: f32, spacing: f32) -> Result<Vec<f32>, GenerationError> {
    let half = extent / 2.0;
    // Bound the ratio before casting; it may be far beyond usize
    let ratio = (extent / spacing).floor();
    if ratio >= MAX_LINES_PER_FAMILY as f32 {
        return Err(GenerationError::invalid(
            "road_spacing",
            format!("{spacing} yields more than {MAX_LINES_PER_FAMILY} lines over {extent}"),
        ));
    }
    let count = ratio as usize + 1;

    Ok((0..=count)
        .map(|k| -half + k as f32 * spacing)
        .take_while(|&offset| offset <= half)
        .collect())
}
