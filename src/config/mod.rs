//! City generation config.
//!
//! Every field has a default, so partial RON/JSON files are accepted. Loading
//! always validates; a config that parses but fails validation is rejected
//! as a whole.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::{ensure_finite, ensure_positive, ConfigLoadError, GenerationError};
use crate::generation::{AreaBounds, PlacementParams, SizeRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub city_seed: u64,
    pub building_count: u32,
    pub city_width: f32,
    pub city_depth: f32,
    pub min_gap: f32,
    pub width_range: SizeRange,
    pub depth_range: SizeRange,
    pub height_range: SizeRange,
    pub max_attempts_per_target: u32,
    pub road_spacing: f32,
    pub road_width: f32,
    pub vehicle_count: u32,
    pub vehicle_speed: f32,
    pub vehicle_wrap_margin: f32,
    pub patrol: PatrolConfig,
}

impl Default for CityConfig {
    fn default() -> Self {
        let (w_lo, w_hi) = DEFAULT_WIDTH_RANGE;
        let (h_lo, h_hi) = DEFAULT_HEIGHT_RANGE;
        Self {
            city_seed: DEFAULT_CITY_SEED,
            building_count: DEFAULT_BUILDING_COUNT,
            city_width: DEFAULT_CITY_WIDTH,
            city_depth: DEFAULT_CITY_DEPTH,
            min_gap: DEFAULT_MIN_GAP,
            width_range: SizeRange::new(w_lo, w_hi),
            depth_range: SizeRange::new(w_lo, w_hi),
            height_range: SizeRange::new(h_lo, h_hi),
            max_attempts_per_target: DEFAULT_ATTEMPTS_PER_TARGET,
            road_spacing: DEFAULT_ROAD_SPACING,
            road_width: DEFAULT_ROAD_WIDTH,
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            vehicle_speed: DEFAULT_VEHICLE_SPEED,
            vehicle_wrap_margin: DEFAULT_VEHICLE_WRAP_MARGIN,
            patrol: PatrolConfig::default(),
        }
    }
}

impl CityConfig {
    pub fn bounds(&self) -> AreaBounds {
        AreaBounds {
            width: self.city_width,
            depth: self.city_depth,
        }
    }

    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            target_count: self.building_count,
            bounds: self.bounds(),
            width_range: self.width_range,
            depth_range: self.depth_range,
            height_range: self.height_range,
            min_gap: self.min_gap,
            max_attempts_per_target: self.max_attempts_per_target,
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        self.placement_params().validate()?;
        ensure_positive("road_spacing", self.road_spacing)?;
        ensure_positive("road_width", self.road_width)?;
        ensure_finite("vehicle_speed", self.vehicle_speed)?;
        if self.vehicle_speed < 0.0 {
            return Err(GenerationError::invalid("vehicle_speed", "must be >= 0"));
        }
        ensure_finite("vehicle_wrap_margin", self.vehicle_wrap_margin)?;
        if self.vehicle_wrap_margin < 0.0 {
            return Err(GenerationError::invalid(
                "vehicle_wrap_margin",
                "must be >= 0",
            ));
        }
        self.patrol.validate()
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = ron::from_str(s).map_err(|e| ConfigLoadError::Parse {
            format: "ron",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigLoadError::Parse {
            format: "json",
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> String {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub waypoint_count: u32,
    pub spawn_area: AreaBounds,
    pub reach_threshold: f32,
    pub wait_time: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        let (width, depth) = DEFAULT_PATROL_AREA;
        Self {
            waypoint_count: DEFAULT_WAYPOINT_COUNT,
            spawn_area: AreaBounds { width, depth },
            reach_threshold: DEFAULT_REACH_THRESHOLD,
            wait_time: DEFAULT_WAIT_TIME,
        }
    }
}

impl PatrolConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.spawn_area.validate()?;
        ensure_finite("reach_threshold", self.reach_threshold)?;
        if self.reach_threshold < 0.0 {
            return Err(GenerationError::invalid("reach_threshold", "must be >= 0"));
        }
        ensure_finite("wait_time", self.wait_time)?;
        if self.wait_time < 0.0 {
            return Err(GenerationError::invalid("wait_time", "must be >= 0"));
        }
        Ok(())
    }
}

/// Load and validate a config file; format is chosen by extension
pub fn load_from_path(path: impl AsRef<Path>) -> Result<CityConfig, ConfigLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => CityConfig::from_ron_str(&content)?,
        Some("json") => CityConfig::from_json_str(&content)?,
        other => {
            return Err(ConfigLoadError::UnsupportedFormat(
                other.unwrap_or("").to_string(),
            ))
        }
    };

    tracing::info!(path = %path.display(), seed = config.city_seed, "Loaded city config");
    Ok(config)
}
