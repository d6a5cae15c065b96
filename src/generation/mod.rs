pub mod category;
pub mod placement;
pub mod roads;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::config::CityConfig;
use crate::error::GenerationError;
use crate::patrol::PatrolAgent;
use crate::rng::SeededRandom;
use crate::traffic::{spawn_vehicles, TrafficSim, Vehicle};

pub use category::{assign_categories, BuildingCategory, Rgb, Style, StyleTable};
pub use placement::{
    generate, generate_with_report, AreaBounds, Footprint, GenerationReport, Placement,
    PlacementParams, PlacementSet, SizeRange,
};
pub use roads::{
    derive_road_lattice, derive_road_lattice_with_width, LineFamily, RoadLattice, RoadSegment,
    TrafficLight,
};

/// Root city seed. Every district derives its own independent RNG from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySeed {
    pub seed: u64,
}

impl Default for CitySeed {
    fn default() -> Self {
        Self {
            seed: crate::constants::DEFAULT_CITY_SEED,
        }
    }
}

impl CitySeed {
    /// Deterministic district hash from city seed and district id
    pub fn district_hash(&self, district_id: u32) -> u64 {
        self.hash_with(&[], district_id)
    }

    pub fn district_rng(&self, district_id: u32) -> SeededRandom {
        SeededRandom::from_seed(self.district_hash(district_id))
    }

    /// Separate stream for the district's patrol, so patrol draws never
    /// shift the placement sequence
    pub fn patrol_rng(&self, district_id: u32) -> SeededRandom {
        SeededRandom::from_seed(self.hash_with(b"patrol", district_id))
    }

    fn hash_with(&self, tag: &[u8], district_id: u32) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(tag);
        hasher.update(self.seed.to_le_bytes());
        hasher.update(district_id.to_le_bytes());
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[0..8]);
        u64::from_le_bytes(bytes)
    }
}

/// Everything generated for one district, before any engine sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPlan {
    pub district_id: u32,
    pub district_hash: u64,
    pub bounds: AreaBounds,
    pub placements: PlacementSet,
    pub categories: Vec<BuildingCategory>,
    pub roads: RoadLattice,
    pub traffic_lights: Vec<TrafficLight>,
    pub vehicles: Vec<Vehicle>,
    pub report: GenerationReport,
}

impl CityPlan {
    pub fn buildings(&self) -> impl Iterator<Item = (&Placement, BuildingCategory)> + '_ {
        self.placements.iter().zip(self.categories.iter().copied())
    }
}

/// Receives each accepted building for visual instantiation
pub trait PlacementSink {
    fn instantiate(&mut self, placement: &Placement, category: BuildingCategory, style: &Style);
}

/// Receives the road network and its intersection lights
pub trait RoadConsumer {
    fn consume_roads(&mut self, segments: &[RoadSegment], style: &Style);

    fn consume_traffic_lights(&mut self, _lights: &[TrafficLight]) {}
}

/// Hand a finished plan to the external instantiation layers
pub fn emit(
    plan: &CityPlan,
    styles: &StyleTable,
    sink: &mut impl PlacementSink,
    roads: &mut impl RoadConsumer,
) {
    for (placement, category) in plan.buildings() {
        sink.instantiate(placement, category, styles.style(category));
    }
    roads.consume_roads(&plan.roads.segments(), &styles.road);
    roads.consume_traffic_lights(&plan.traffic_lights);
}

/// City generation service over a validated config
pub struct CityGenerator {
    config: CityConfig,
    seed: CitySeed,
}

impl CityGenerator {
    pub fn new(config: CityConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        let seed = CitySeed {
            seed: config.city_seed,
        };
        Ok(Self { config, seed })
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn seed(&self) -> CitySeed {
        self.seed
    }

    /// Generate one district. Draw order: placements, categories, vehicles.
    pub fn generate_district(&self, district_id: u32) -> Result<CityPlan, GenerationError> {
        let district_hash = self.seed.district_hash(district_id);
        let mut rng = SeededRandom::from_seed(district_hash);
        let bounds = self.config.bounds();

        let (placements, report) =
            generate_with_report(&self.config.placement_params(), &mut rng)?;
        let categories = assign_categories(&placements, &mut rng);
        let roads = derive_road_lattice_with_width(
            bounds,
            self.config.road_spacing,
            self.config.road_width,
        )?;
        let traffic_lights = roads.traffic_lights();
        let vehicles = spawn_vehicles(self.config.vehicle_count, &bounds, &mut rng);

        tracing::info!(
            district_id,
            buildings = report.placed,
            requested = report.requested,
            roads = roads.segment_count(),
            lights = traffic_lights.len(),
            "District generated"
        );

        Ok(CityPlan {
            district_id,
            district_hash,
            bounds,
            placements,
            categories,
            roads,
            traffic_lights,
            vehicles,
            report,
        })
    }

    /// Generate several districts in parallel, results in input order
    pub fn generate_districts(&self, district_ids: &[u32]) -> Result<Vec<CityPlan>, GenerationError> {
        district_ids
            .par_iter()
            .map(|&id| self.generate_district(id))
            .collect()
    }

    /// Traffic simulation seeded with the plan's spawned vehicles
    pub fn traffic_for(&self, plan: &CityPlan) -> Result<TrafficSim, GenerationError> {
        TrafficSim::new(
            plan.vehicles.clone(),
            plan.bounds,
            self.config.vehicle_speed,
            self.config.vehicle_wrap_margin,
        )
    }

    /// Patrol agent for a district plus the RNG that should drive its ticks
    pub fn patrol_for(&self, plan: &CityPlan) -> Result<(PatrolAgent, SeededRandom), GenerationError> {
        let mut rng = self.seed.patrol_rng(plan.district_id);
        let agent = PatrolAgent::from_config(&self.config.patrol, &mut rng)?;
        Ok((agent, rng))
    }
}
