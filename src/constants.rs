//! Centralized defaults for the city procedural core.
//!
//! Config defaults, generator fallbacks and tests all read from here so the
//! numbers stay in one place.

// =====================================================
// City layout
// =====================================================

/// Default number of buildings requested per district
pub const DEFAULT_BUILDING_COUNT: u32 = 200;

/// Default city extent along X (centered on the origin)
pub const DEFAULT_CITY_WIDTH: f32 = 100.0;

/// Default city extent along Z (centered on the origin)
pub const DEFAULT_CITY_DEPTH: f32 = 100.0;

/// Minimum clearance between two building footprints
pub const DEFAULT_MIN_GAP: f32 = 5.0;

/// Building width range (depth uses the same range by default)
pub const DEFAULT_WIDTH_RANGE: (f32, f32) = (3.0, 8.0);

/// Building height range (cosmetic, ignored by overlap tests)
pub const DEFAULT_HEIGHT_RANGE: (f32, f32) = (5.0, 30.0);

/// Attempts allowed per requested building: budget = count * this
pub const DEFAULT_ATTEMPTS_PER_TARGET: u32 = 20;

// =====================================================
// Roads
// =====================================================

/// Distance between parallel road centerlines
pub const DEFAULT_ROAD_SPACING: f32 = 30.0;

/// Visual road width handed to road consumers
pub const DEFAULT_ROAD_WIDTH: f32 = 2.0;

/// Height at which traffic lights sit above an intersection
pub const TRAFFIC_LIGHT_HEIGHT: f32 = 1.0;

// =====================================================
// Traffic
// =====================================================

pub const DEFAULT_VEHICLE_COUNT: u32 = 10;

/// Vehicle travel speed in world units per second
pub const DEFAULT_VEHICLE_SPEED: f32 = 10.0;

/// Distance past the city edge before a vehicle wraps back
pub const DEFAULT_VEHICLE_WRAP_MARGIN: f32 = 10.0;

/// Ride height of vehicles above the ground plane
pub const VEHICLE_RIDE_HEIGHT: f32 = 0.5;

// =====================================================
// Patrol
// =====================================================

pub const DEFAULT_WAYPOINT_COUNT: u32 = 5;

/// Patrol spawn area (X, Z) centered on the origin
pub const DEFAULT_PATROL_AREA: (f32, f32) = (50.0, 50.0);

/// Remaining path distance at which a waypoint counts as reached
pub const DEFAULT_REACH_THRESHOLD: f32 = 1.5;

/// Seconds spent at a waypoint before the next dispatch
pub const DEFAULT_WAIT_TIME: f32 = 2.0;

// =====================================================
// Seeds
// =====================================================

/// Root city seed used when no config overrides it
pub const DEFAULT_CITY_SEED: u64 = 42;

/// Emission multiplier applied to category colors
pub const STYLE_EMISSION_FACTOR: f32 = 0.3;
