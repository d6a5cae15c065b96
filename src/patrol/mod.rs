//! Waypoint patrol agent.
//!
//! Explicit state machine over an external navigation service:
//!
//! ```text
//! Idle --start--> Dispatched --arrived--> Waiting --timer elapsed--> Dispatched
//! ```
//!
//! The agent picks a uniform random waypoint each dispatch (repeats allowed)
//! and produces status text for dispatches and arrivals. Presentation of that
//! text is left to the caller.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::PatrolConfig;
use crate::error::{ensure_finite, GenerationError};
use crate::generation::AreaBounds;
use crate::rng::RandomSource;

pub const DISPATCH_PHRASES: [&str; 4] = [
    "🚨 Urgent Dispatch: Heading to {0}!",
    "🚑 Emergency Call: Navigating to {0}!",
    "🚒 Rapid Response: Moving toward {0}!",
    "🛻 Quick Dispatch: Approaching {0}!",
];

pub const ARRIVAL_PHRASES: [&str; 4] = [
    "✅ Target {0} Reached. Awaiting further orders...",
    "🛬 Arrived at {0}. Standing by for next dispatch.",
    "📍 Successfully reached {0}. Holding position.",
    "🛑 {0} secured. Preparing for next operation...",
];

/// Path following is delegated to the host's navigation layer
pub trait NavigationService {
    fn set_destination(&mut self, destination: Vec3);

    /// True while the host is still computing a path
    fn path_pending(&self) -> bool;

    fn remaining_distance(&self) -> f32;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
}

pub fn generate_waypoints(
    count: u32,
    area: &AreaBounds,
    rng: &mut impl RandomSource,
) -> Vec<Waypoint> {
    (0..count)
        .map(|i| Waypoint {
            name: format!("Waypoint_{i}"),
            position: area.sample_point(rng),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PatrolState {
    #[default]
    Idle,
    Dispatched {
        waypoint: usize,
    },
    Waiting {
        waypoint: usize,
        remaining: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatrolEvent {
    Dispatched { waypoint: usize, message: String },
    Arrived { waypoint: usize, message: String },
}

impl PatrolEvent {
    pub fn message(&self) -> &str {
        match self {
            PatrolEvent::Dispatched { message, .. } | PatrolEvent::Arrived { message, .. } => {
                message
            }
        }
    }
}

fn render_phrase(phrases: &[&str], name: &str, rng: &mut impl RandomSource) -> String {
    rng.choose(phrases)
        .map(|phrase| phrase.replace("{0}", name))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct PatrolAgent {
    waypoints: Vec<Waypoint>,
    reach_threshold: f32,
    wait_time: f32,
    state: PatrolState,
}

impl PatrolAgent {
    pub fn new(
        waypoints: Vec<Waypoint>,
        reach_threshold: f32,
        wait_time: f32,
    ) -> Result<Self, GenerationError> {
        ensure_finite("reach_threshold", reach_threshold)?;
        ensure_finite("wait_time", wait_time)?;
        if reach_threshold < 0.0 {
            return Err(GenerationError::invalid("reach_threshold", "must be >= 0"));
        }
        if wait_time < 0.0 {
            return Err(GenerationError::invalid("wait_time", "must be >= 0"));
        }

        Ok(Self {
            waypoints,
            reach_threshold,
            wait_time,
            state: PatrolState::Idle,
        })
    }

    /// Generate waypoints from config and build the agent
    pub fn from_config(
        config: &PatrolConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self, GenerationError> {
        config.validate()?;
        let waypoints = generate_waypoints(config.waypoint_count, &config.spawn_area, rng);
        Self::new(waypoints, config.reach_threshold, config.wait_time)
    }

    pub fn state(&self) -> PatrolState {
        self.state
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        match self.state {
            PatrolState::Idle => None,
            PatrolState::Dispatched { waypoint } | PatrolState::Waiting { waypoint, .. } => {
                self.waypoints.get(waypoint)
            }
        }
    }

    /// Begin patrolling. Without waypoints the agent stays idle.
    pub fn start(
        &mut self,
        nav: &mut impl NavigationService,
        rng: &mut impl RandomSource,
    ) -> Option<PatrolEvent> {
        self.dispatch(nav, rng)
    }

    fn dispatch(
        &mut self,
        nav: &mut impl NavigationService,
        rng: &mut impl RandomSource,
    ) -> Option<PatrolEvent> {
        if self.waypoints.is_empty() {
            self.state = PatrolState::Idle;
            return None;
        }

        let index = rng.choose_index(self.waypoints.len());
        let target = &self.waypoints[index];
        nav.set_destination(target.position);
        let message = render_phrase(&DISPATCH_PHRASES, &target.name, rng);

        tracing::debug!(waypoint = %target.name, "Patrol dispatched");
        self.state = PatrolState::Dispatched { waypoint: index };
        Some(PatrolEvent::Dispatched {
            waypoint: index,
            message,
        })
    }

    /// Advance the agent by `dt` seconds. At most one event per tick.
    pub fn tick(
        &mut self,
        dt: f32,
        nav: &mut impl NavigationService,
        rng: &mut impl RandomSource,
    ) -> Result<Option<PatrolEvent>, GenerationError> {
        ensure_finite("dt", dt)?;
        if dt < 0.0 {
            return Err(GenerationError::invalid("dt", format!("must be >= 0, got {dt}")));
        }

        let event = match self.state {
            PatrolState::Idle => None,
            PatrolState::Dispatched { waypoint } => {
                if !nav.path_pending() && nav.remaining_distance() <= self.reach_threshold {
                    let name = &self.waypoints[waypoint].name;
                    let message = render_phrase(&ARRIVAL_PHRASES, name, rng);
                    tracing::debug!(waypoint = %name, "Patrol arrived");
                    self.state = PatrolState::Waiting {
                        waypoint,
                        remaining: self.wait_time,
                    };
                    Some(PatrolEvent::Arrived { waypoint, message })
                } else {
                    None
                }
            }
            PatrolState::Waiting {
                waypoint,
                remaining,
            } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.dispatch(nav, rng)
                } else {
                    self.state = PatrolState::Waiting {
                        waypoint,
                        remaining,
                    };
                    None
                }
            }
        };

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    #[derive(Default)]
    struct FakeNav {
        destination: Option<Vec3>,
        pending: bool,
        remaining: f32,
        calls: usize,
    }

    impl NavigationService for FakeNav {
        fn set_destination(&mut self, destination: Vec3) {
            self.destination = Some(destination);
            self.calls += 1;
            self.remaining = 20.0;
        }

        fn path_pending(&self) -> bool {
            self.pending
        }

        fn remaining_distance(&self) -> f32 {
            self.remaining
        }
    }

    fn agent(count: u32, rng: &mut SeededRandom) -> PatrolAgent {
        let area = AreaBounds {
            width: 50.0,
            depth: 50.0,
        };
        PatrolAgent::new(generate_waypoints(count, &area, rng), 1.5, 2.0).unwrap()
    }

    #[test]
    fn test_waypoint_names_and_area() {
        let mut rng = SeededRandom::from_seed(3);
        let area = AreaBounds {
            width: 50.0,
            depth: 50.0,
        };
        let waypoints = generate_waypoints(5, &area, &mut rng);
        assert_eq!(waypoints.len(), 5);
        assert_eq!(waypoints[0].name, "Waypoint_0");
        assert_eq!(waypoints[4].name, "Waypoint_4");
        assert!(waypoints.iter().all(|w| area.contains(w.position)));
    }

    #[test]
    fn test_start_dispatches() {
        let mut rng = SeededRandom::from_seed(3);
        let mut agent = agent(5, &mut rng);
        let mut nav = FakeNav::default();

        let event = agent.start(&mut nav, &mut rng).unwrap();
        let PatrolState::Dispatched { waypoint } = agent.state() else {
            panic!("expected Dispatched, got {:?}", agent.state());
        };
        let wp = &agent.waypoints()[waypoint];
        assert_eq!(nav.destination, Some(wp.position));
        assert!(event.message().contains(&wp.name));
        assert!(!event.message().contains("{0}"));
    }

    #[test]
    fn test_full_cycle() {
        let mut rng = SeededRandom::from_seed(12);
        let mut agent = agent(5, &mut rng);
        let mut nav = FakeNav::default();
        agent.start(&mut nav, &mut rng);

        // Still travelling
        assert_eq!(agent.tick(0.1, &mut nav, &mut rng).unwrap(), None);

        // Path pending blocks arrival even at zero distance
        nav.remaining = 0.0;
        nav.pending = true;
        assert_eq!(agent.tick(0.1, &mut nav, &mut rng).unwrap(), None);

        nav.pending = false;
        let arrived = agent.tick(0.1, &mut nav, &mut rng).unwrap().unwrap();
        assert!(matches!(arrived, PatrolEvent::Arrived { .. }));
        assert!(matches!(agent.state(), PatrolState::Waiting { .. }));

        // Waiting swallows ticks until the timer elapses
        assert_eq!(agent.tick(1.0, &mut nav, &mut rng).unwrap(), None);
        let next = agent.tick(1.0, &mut nav, &mut rng).unwrap().unwrap();
        assert!(matches!(next, PatrolEvent::Dispatched { .. }));
        assert!(matches!(agent.state(), PatrolState::Dispatched { .. }));
        assert_eq!(nav.calls, 2);
    }

    #[test]
    fn test_arrival_within_threshold() {
        let mut rng = SeededRandom::from_seed(5);
        let mut agent = agent(3, &mut rng);
        let mut nav = FakeNav::default();
        agent.start(&mut nav, &mut rng);

        nav.remaining = 1.5;
        assert!(agent.tick(0.0, &mut nav, &mut rng).unwrap().is_some());
    }

    #[test]
    fn test_no_waypoints_stays_idle() {
        let mut rng = SeededRandom::from_seed(1);
        let mut agent = agent(0, &mut rng);
        let mut nav = FakeNav::default();
        assert!(agent.start(&mut nav, &mut rng).is_none());
        assert_eq!(agent.state(), PatrolState::Idle);
        assert_eq!(agent.tick(1.0, &mut nav, &mut rng).unwrap(), None);
        assert_eq!(nav.calls, 0);
        assert!(agent.current_waypoint().is_none());
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert!(PatrolAgent::new(vec![], -1.0, 2.0).is_err());
        assert!(PatrolAgent::new(vec![], 1.0, -2.0).is_err());

        let mut rng = SeededRandom::from_seed(1);
        let mut agent = agent(1, &mut rng);
        let mut nav = FakeNav::default();
        assert_eq!(
            agent.tick(-0.5, &mut nav, &mut rng).unwrap_err().field(),
            "dt"
        );
    }
}
