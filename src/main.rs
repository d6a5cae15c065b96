use anyhow::{Context, Result};
use glam::Vec3;
use serde::Serialize;

use city_core::config::{self, CityConfig};
use city_core::generation::{CityGenerator, GenerationReport};
use city_core::logging;
use city_core::patrol::NavigationService;

const TRAFFIC_STEPS: u32 = 60;
const TRAFFIC_DT: f32 = 1.0 / 60.0;
const PATROL_STEPS: u32 = 300;
const PATROL_DT: f32 = 0.1;
const PATROL_SPEED: f32 = 3.5;

/// Walks straight at the destination; stands in for a host navmesh
struct StraightLineNav {
    position: Vec3,
    destination: Vec3,
    speed: f32,
}

impl StraightLineNav {
    fn advance(&mut self, dt: f32) {
        let to_go = self.destination - self.position;
        let step = self.speed * dt;
        if to_go.length() <= step {
            self.position = self.destination;
        } else {
            self.position += to_go.normalize() * step;
        }
    }
}

impl NavigationService for StraightLineNav {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination = destination;
    }

    fn path_pending(&self) -> bool {
        false
    }

    fn remaining_distance(&self) -> f32 {
        self.position.distance(self.destination)
    }
}

#[derive(Serialize)]
struct DistrictSummary {
    district_id: u32,
    district_hash: u64,
    report: GenerationReport,
    road_segments: usize,
    traffic_lights: usize,
    vehicles_wrapped: usize,
    patrol_log: Vec<String>,
    category_counts: Vec<(&'static str, usize)>,
}

fn main() -> Result<()> {
    logging::init_tracing_default();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => config::load_from_path(&path)
            .with_context(|| format!("failed to load city config from {path}"))?,
        None => CityConfig::default(),
    };
    let district_id: u32 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("district id must be an unsigned integer, got {raw}"))?,
        None => 0,
    };

    let generator = CityGenerator::new(config).context("invalid city config")?;
    let plan = generator.generate_district(district_id)?;

    let mut traffic = generator.traffic_for(&plan)?;
    let mut vehicles_wrapped = 0;
    for _ in 0..TRAFFIC_STEPS {
        vehicles_wrapped += traffic.step(TRAFFIC_DT)?;
    }

    let (mut agent, mut patrol_rng) = generator.patrol_for(&plan)?;
    let mut nav = StraightLineNav {
        position: Vec3::ZERO,
        destination: Vec3::ZERO,
        speed: PATROL_SPEED,
    };
    let mut patrol_log = Vec::new();
    if let Some(event) = agent.start(&mut nav, &mut patrol_rng) {
        patrol_log.push(event.message().to_string());
    }
    for _ in 0..PATROL_STEPS {
        nav.advance(PATROL_DT);
        if let Some(event) = agent.tick(PATROL_DT, &mut nav, &mut patrol_rng)? {
            patrol_log.push(event.message().to_string());
        }
    }

    let category_counts = city_core::generation::BuildingCategory::ALL
        .iter()
        .map(|c| (c.as_str(), plan.categories.iter().filter(|p| *p == c).count()))
        .collect();

    let summary = DistrictSummary {
        district_id: plan.district_id,
        district_hash: plan.district_hash,
        report: plan.report,
        road_segments: plan.roads.segment_count(),
        traffic_lights: plan.traffic_lights.len(),
        vehicles_wrapped,
        patrol_log,
        category_counts,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
