//! City Procedural Core
//!
//! Deterministic, engine-free logic for generated city districts:
//! - Building placement (bounded rejection sampling, no footprint overlap)
//! - Road lattice and traffic-light positions
//! - Building categories and an injected style table
//! - Looping vehicle traffic
//! - Waypoint patrol agent (explicit state machine)
//!
//! Rendering, navigation and UI stay with the host engine, reached through
//! the sink and service traits in [`generation`] and [`patrol`].

pub mod config;
pub mod constants;
pub mod error;
pub mod generation;
pub mod logging;
pub mod patrol;
pub mod rng;
pub mod traffic;

pub use config::{CityConfig, PatrolConfig};
pub use error::{ConfigLoadError, GenerationError};
pub use generation::{CityGenerator, CityPlan, CitySeed};
pub use rng::{RandomSource, SeededRandom};
