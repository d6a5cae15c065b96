//! Looping vehicle traffic along the lattice axes.
//!
//! Vehicles enter on the negative edge of their travel axis, drive straight at
//! constant speed, and re-enter on the same lane once they pass the far edge
//! plus the wrap margin. Stepping is explicit (`dt` in seconds); no frame loop
//! lives here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::VEHICLE_RIDE_HEIGHT;
use crate::error::{ensure_finite, GenerationError};
use crate::generation::AreaBounds;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Travels toward +X
    East,
    /// Travels toward +Z
    North,
}

impl Heading {
    pub fn direction(&self) -> Vec3 {
        match self {
            Heading::East => Vec3::X,
            Heading::North => Vec3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub position: Vec3,
    pub heading: Heading,
}

impl Vehicle {
    /// Move back to the entry edge, keeping the lane coordinate
    fn reenter(&mut self, bounds: &AreaBounds) {
        match self.heading {
            Heading::East => self.position.x = -bounds.half_width(),
            Heading::North => self.position.z = -bounds.half_depth(),
        }
    }
}

/// Coin flip per vehicle for heading, then a uniform lane across the other axis
pub fn spawn_vehicles(count: u32, bounds: &AreaBounds, rng: &mut impl RandomSource) -> Vec<Vehicle> {
    (0..count)
        .map(|id| {
            let east = rng.uniform(0.0, 1.0) > 0.5;
            if east {
                let lane = rng.uniform(-bounds.half_depth(), bounds.half_depth());
                Vehicle {
                    id,
                    position: Vec3::new(-bounds.half_width(), VEHICLE_RIDE_HEIGHT, lane),
                    heading: Heading::East,
                }
            } else {
                let lane = rng.uniform(-bounds.half_width(), bounds.half_width());
                Vehicle {
                    id,
                    position: Vec3::new(lane, VEHICLE_RIDE_HEIGHT, -bounds.half_depth()),
                    heading: Heading::North,
                }
            }
        })
        .collect()
}

fn out_of_range(position: Vec3, bounds: &AreaBounds, wrap_margin: f32) -> bool {
    position.x.abs() > bounds.half_width() + wrap_margin
        || position.z.abs() > bounds.half_depth() + wrap_margin
}

#[derive(Debug, Clone)]
pub struct TrafficSim {
    vehicles: Vec<Vehicle>,
    bounds: AreaBounds,
    speed: f32,
    wrap_margin: f32,
}

impl TrafficSim {
    pub fn new(
        vehicles: Vec<Vehicle>,
        bounds: AreaBounds,
        speed: f32,
        wrap_margin: f32,
    ) -> Result<Self, GenerationError> {
        bounds.validate()?;
        ensure_finite("vehicle_speed", speed)?;
        ensure_finite("vehicle_wrap_margin", wrap_margin)?;
        if speed < 0.0 {
            return Err(GenerationError::invalid("vehicle_speed", "must be >= 0"));
        }
        if wrap_margin < 0.0 {
            return Err(GenerationError::invalid("vehicle_wrap_margin", "must be >= 0"));
        }

        Ok(Self {
            vehicles,
            bounds,
            speed,
            wrap_margin,
        })
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Advance every vehicle by `dt` seconds. Returns how many wrapped.
    pub fn step(&mut self, dt: f32) -> Result<usize, GenerationError> {
        ensure_finite("dt", dt)?;
        if dt < 0.0 {
            return Err(GenerationError::invalid("dt", format!("must be >= 0, got {dt}")));
        }

        let travel = self.speed * dt;
        let bounds = self.bounds;
        let wrap_margin = self.wrap_margin;
        let mut wrapped = 0;
        for vehicle in &mut self.vehicles {
            vehicle.position += vehicle.heading.direction() * travel;
            if out_of_range(vehicle.position, &bounds, wrap_margin) {
                vehicle.reenter(&bounds);
                wrapped += 1;
            }
        }

        if wrapped > 0 {
            tracing::trace!(wrapped, "Vehicles re-entered the city");
        }
        Ok(wrapped)
    }
}
