//! Non-overlapping building placement by bounded rejection sampling.
//!
//! Candidates are drawn uniformly inside the area and kept only if their
//! gap-expanded footprint clears every building accepted so far. The total
//! number of draws is capped at `target_count * max_attempts_per_target`, so a
//! crowded area yields a partial set instead of spinning forever.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, GenerationError};
use crate::logging::TimingSpan;
use crate::rng::RandomSource;

/// Ground rectangle centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub width: f32,
    pub depth: f32,
}

impl AreaBounds {
    pub fn new(width: f32, depth: f32) -> Result<Self, GenerationError> {
        let bounds = Self { width, depth };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        ensure_positive("area.width", self.width)?;
        ensure_positive("area.depth", self.depth)?;
        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }

    /// Whether a ground point lies inside the rectangle (edges included)
    pub fn contains(&self, position: Vec3) -> bool {
        position.x.abs() <= self.half_width() && position.z.abs() <= self.half_depth()
    }

    /// Uniform point on the ground plane, x drawn before z
    pub fn sample_point(&self, rng: &mut impl RandomSource) -> Vec3 {
        let x = rng.uniform(-self.half_width(), self.half_width());
        let z = rng.uniform(-self.half_depth(), self.half_depth());
        Vec3::new(x, 0.0, z)
    }
}

/// Closed interval `[lo, hi]` that sizes are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub lo: f32,
    pub hi: f32,
}

impl SizeRange {
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// Both bounds strictly positive and ordered
    pub fn validate_positive(&self, field: &'static str) -> Result<(), GenerationError> {
        ensure_positive(field, self.lo)?;
        ensure_positive(field, self.hi)?;
        if self.lo > self.hi {
            return Err(GenerationError::invalid(
                field,
                format!("lo ({}) exceeds hi ({})", self.lo, self.hi),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.lo && value <= self.hi
    }

    pub fn sample(&self, rng: &mut impl RandomSource) -> f32 {
        rng.uniform(self.lo, self.hi)
    }
}

/// Building extents. Only width (X) and depth (Z) take part in overlap tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

/// A committed building: never moved or resized after acceptance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub footprint: Footprint,
}

impl Placement {
    /// True when the two footprints, each grown by `min_gap`, intersect on the
    /// ground plane. Touching exactly at the gap distance is not an overlap.
    pub fn overlaps(&self, other: &Placement, min_gap: f32) -> bool {
        let min_dx = (self.footprint.width + other.footprint.width) / 2.0 + min_gap;
        let min_dz = (self.footprint.depth + other.footprint.depth) / 2.0 + min_gap;

        (self.position.x - other.position.x).abs() < min_dx
            && (self.position.z - other.position.z).abs() < min_dz
    }
}

/// Append-only list of accepted placements, in acceptance order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementSet {
    placements: Vec<Placement>,
}

impl PlacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.placements
    }

    pub fn into_vec(self) -> Vec<Placement> {
        self.placements
    }

    /// Linear scan, stops at the first conflicting placement
    pub fn is_space_available(&self, candidate: &Placement, min_gap: f32) -> bool {
        !self.placements.iter().any(|p| p.overlaps(candidate, min_gap))
    }

    fn commit(&mut self, placement: Placement) {
        self.placements.push(placement);
    }
}

impl<'a> IntoIterator for &'a PlacementSet {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

/// Inputs for one placement run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementParams {
    pub target_count: u32,
    pub bounds: AreaBounds,
    pub width_range: SizeRange,
    pub depth_range: SizeRange,
    pub height_range: SizeRange,
    pub min_gap: f32,
    pub max_attempts_per_target: u32,
}

impl PlacementParams {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.target_count == 0 {
            return Err(GenerationError::invalid("target_count", "must be > 0"));
        }
        if self.max_attempts_per_target == 0 {
            return Err(GenerationError::invalid(
                "max_attempts_per_target",
                "must be > 0",
            ));
        }
        self.bounds.validate()?;
        self.width_range.validate_positive("width_range")?;
        self.depth_range.validate_positive("depth_range")?;
        self.height_range.validate_positive("height_range")?;
        ensure_finite("min_gap", self.min_gap)?;
        if self.min_gap < 0.0 {
            return Err(GenerationError::invalid(
                "min_gap",
                format!("must be >= 0, got {}", self.min_gap),
            ));
        }
        Ok(())
    }

    /// Total candidate draws allowed for the run
    pub fn attempt_budget(&self) -> u64 {
        u64::from(self.target_count) * u64::from(self.max_attempts_per_target)
    }
}

/// Outcome counters for a placement run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub requested: u32,
    pub placed: u32,
    pub attempts: u64,
    pub max_attempts: u64,
    /// Budget ran out before `requested` was reached
    pub exhausted: bool,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.placed == self.requested
    }
}

/// Run the placement loop and return only the accepted set
pub fn generate(
    params: &PlacementParams,
    rng: &mut impl RandomSource,
) -> Result<PlacementSet, GenerationError> {
    generate_with_report(params, rng).map(|(set, _)| set)
}

/// Run the placement loop, also returning attempt counters
pub fn generate_with_report(
    params: &PlacementParams,
    rng: &mut impl RandomSource,
) -> Result<(PlacementSet, GenerationReport), GenerationError> {
    params.validate()?;
    let _span = TimingSpan::new("generate_placements");

    let target = params.target_count as usize;
    let max_attempts = params.attempt_budget();
    let mut placements = PlacementSet::new();
    let mut attempts: u64 = 0;

    while placements.len() < target && attempts < max_attempts {
        let position = params.bounds.sample_point(rng);
        let width = params.width_range.sample(rng);
        let depth = params.depth_range.sample(rng);
        let height = params.height_range.sample(rng);

        let candidate = Placement {
            position,
            footprint: Footprint {
                width,
                depth,
                height,
            },
        };

        if placements.is_space_available(&candidate, params.min_gap) {
            placements.commit(candidate);
        }

        attempts += 1;
    }

    let report = GenerationReport {
        requested: params.target_count,
        placed: placements.len() as u32,
        attempts,
        max_attempts,
        exhausted: placements.len() < target,
    };

    if report.exhausted {
        tracing::warn!(
            requested = report.requested,
            placed = report.placed,
            attempts = report.attempts,
            "Placement budget exhausted before target count"
        );
    } else {
        tracing::debug!(
            placed = report.placed,
            attempts = report.attempts,
            "Placement run complete"
        );
    }

    Ok((placements, report))
}
