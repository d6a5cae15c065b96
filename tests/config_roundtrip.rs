//! Config file loading through the filesystem
//!
//! - RON and JSON files load and validate
//! - Unknown extensions and unreadable files are reported, not panicked on
//! - A loaded config drives the same plan as the in-memory original

use std::io::Write;

use city_core::config::load_from_path;
use city_core::{CityConfig, CityGenerator, ConfigLoadError};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn ron_file_roundtrip() {
    let config = CityConfig {
        city_seed: 314,
        building_count: 50,
        ..CityConfig::default()
    };
    let file = write_temp(".ron", &config.to_ron());
    let loaded = load_from_path(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn json_file_roundtrip() {
    let config = CityConfig {
        road_spacing: 25.0,
        min_gap: 0.0,
        ..CityConfig::default()
    };
    let file = write_temp(".json", &config.to_json());
    let loaded = load_from_path(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn loaded_config_reproduces_plan() {
    let config = CityConfig {
        city_seed: 2718,
        building_count: 30,
        ..CityConfig::default()
    };
    let file = write_temp(".ron", &config.to_ron());
    let loaded = load_from_path(file.path()).unwrap();

    let a = CityGenerator::new(config).unwrap().generate_district(7).unwrap();
    let b = CityGenerator::new(loaded).unwrap().generate_district(7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unsupported_extension_rejected() {
    let file = write_temp(".toml", "building_count = 3");
    let err = load_from_path(file.path()).unwrap_err();
    assert!(matches!(err, ConfigLoadError::UnsupportedFormat(ref ext) if ext == "toml"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(dir.path().join("absent.ron")).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Io(_)));
}

#[test]
fn invalid_values_in_file_rejected() {
    let file = write_temp(".json", r#"{"max_attempts_per_target": 0}"#);
    let err = load_from_path(file.path()).unwrap_err();
    match err {
        ConfigLoadError::Invalid(e) => assert_eq!(e.field(), "max_attempts_per_target"),
        other => panic!("expected Invalid, got {other:?}"),
    }
}
