//! Building categories and the read-only style table used for decoration.
//!
//! Categories are assigned after placement finishes and never influence it.

use serde::{Deserialize, Serialize};

use super::placement::PlacementSet;
use crate::constants::STYLE_EMISSION_FACTOR;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingCategory {
    Police,
    Hospital,
    FireStation,
    House,
    Park,
    Random,
}

impl BuildingCategory {
    pub const ALL: [BuildingCategory; 6] = [
        BuildingCategory::Police,
        BuildingCategory::Hospital,
        BuildingCategory::FireStation,
        BuildingCategory::House,
        BuildingCategory::Park,
        BuildingCategory::Random,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::Police => 0,
            Self::Hospital => 1,
            Self::FireStation => 2,
            Self::House => 3,
            Self::Park => 4,
            Self::Random => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Police => "police",
            Self::Hospital => "hospital",
            Self::FireStation => "fire_station",
            Self::House => "house",
            Self::Park => "park",
            Self::Random => "random",
        }
    }
}

/// One uniform category per placement, in acceptance order
pub fn assign_categories(
    placements: &PlacementSet,
    rng: &mut impl RandomSource,
) -> Vec<BuildingCategory> {
    placements
        .iter()
        .map(|_| BuildingCategory::ALL[rng.choose_index(BuildingCategory::ALL.len())])
        .collect()
}

/// Linear RGB in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// HSV with all channels in `[0, 1]`
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h6 = (h.rem_euclid(1.0)) * 6.0;
        let sector = h6.floor() as u32 % 6;
        let f = h6 - h6.floor();
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Rgb,
    pub emission: Rgb,
}

impl Style {
    pub fn from_color(color: Rgb) -> Self {
        Self {
            color,
            emission: color.scaled(STYLE_EMISSION_FACTOR),
        }
    }
}

/// Category → style lookup, built once by the caller and shared read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    styles: [Style; 6],
    pub road: Style,
}

impl StyleTable {
    pub fn new(styles: [Style; 6], road: Style) -> Self {
        Self { styles, road }
    }

    /// Fixed palette; the `Random` category gets one hue drawn here
    pub fn default_palette(rng: &mut impl RandomSource) -> Self {
        let random = Rgb::from_hsv(
            rng.uniform(0.0, 1.0),
            rng.uniform(0.0, 1.0),
            rng.uniform(0.0, 1.0),
        );

        Self {
            styles: [
                Style::from_color(Rgb::new(0.0, 0.0, 1.0)),
                Style::from_color(Rgb::new(1.0, 0.0, 0.0)),
                Style::from_color(Rgb::new(1.0, 0.5, 0.0)),
                Style::from_color(Rgb::new(1.0, 1.0, 1.0)),
                Style::from_color(Rgb::new(0.0, 1.0, 0.0)),
                Style::from_color(random),
            ],
            road: Style::from_color(Rgb::new(0.1, 0.1, 0.1)),
        }
    }

    pub fn style(&self, category: BuildingCategory) -> &Style {
        &self.styles[category.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::placement::{generate, AreaBounds, PlacementParams, SizeRange};
    use crate::rng::SeededRandom;

    #[test]
    fn test_index_matches_all_order() {
        for (i, category) in BuildingCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_assign_one_per_placement() {
        let params = PlacementParams {
            target_count: 30,
            bounds: AreaBounds {
                width: 200.0,
                depth: 200.0,
            },
            width_range: SizeRange::new(3.0, 8.0),
            depth_range: SizeRange::new(3.0, 8.0),
            height_range: SizeRange::new(5.0, 30.0),
            min_gap: 2.0,
            max_attempts_per_target: 20,
        };
        let mut rng = SeededRandom::from_seed(8);
        let set = generate(&params, &mut rng).unwrap();
        let categories = assign_categories(&set, &mut rng);
        assert_eq!(categories.len(), set.len());
    }

    #[test]
    fn test_all_categories_eventually_drawn() {
        let mut rng = SeededRandom::from_seed(77);
        let mut seen = [false; 6];
        for _ in 0..500 {
            seen[rng.choose_index(6)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_default_palette() {
        let mut rng = SeededRandom::from_seed(1);
        let table = StyleTable::default_palette(&mut rng);
        assert_eq!(
            table.style(BuildingCategory::Police).color,
            Rgb::new(0.0, 0.0, 1.0)
        );
        assert_eq!(
            table.style(BuildingCategory::FireStation).color,
            Rgb::new(1.0, 0.5, 0.0)
        );
        let hospital = table.style(BuildingCategory::Hospital);
        assert!((hospital.emission.r - 0.3).abs() < 1e-6);
        assert_eq!(table.road.color, Rgb::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Rgb::from_hsv(0.0, 1.0, 1.0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(Rgb::from_hsv(0.0, 0.0, 1.0), Rgb::new(1.0, 1.0, 1.0));
        let blue = Rgb::from_hsv(2.0 / 3.0, 1.0, 1.0);
        assert!(blue.b > 0.99 && blue.r < 0.01 && blue.g < 0.01);
    }
}
