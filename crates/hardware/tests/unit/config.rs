//! Configuration Tests.
//!
//! Presets, JSON parsing with defaults, file loading and cache geometry validation.

use std::io::Write;

use pipesim_core::common::ConfigError;
use pipesim_core::config::{CacheConfig, Config, LatencyConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn default_is_three_level_preset() {
    let config = Config::default();

    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.stack_pointer, 0x8000_0000);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(
        config.cache.levels,
        vec![CacheConfig::l1(), CacheConfig::l2(), CacheConfig::l3()]
    );
    assert_eq!(config.cache.memory, LatencyConfig { bus: 0, hit: 100 });
    config.validate().unwrap();
}

#[rstest]
#[case(CacheConfig::l1(), "L1", 32 * 1024, 1, 64)]
#[case(CacheConfig::l2(), "L2", 256 * 1024, 8, 512)]
#[case(CacheConfig::l3(), "L3", 8 * 1024 * 1024, 20, 16384)]
fn presets(
    #[case] level: CacheConfig,
    #[case] name: &str,
    #[case] size: usize,
    #[case] hit: u64,
    #[case] sets: usize,
) {
    assert_eq!(level.name, name);
    assert_eq!(level.size, size);
    assert_eq!(level.block_size, 64);
    assert_eq!(level.associativity, 8);
    assert!(!level.write_through);
    assert!(level.write_allocate);
    assert_eq!(level.latency, LatencyConfig { bus: 0, hit });
    assert_eq!(level.set_count(), sets);
    assert_eq!(level.offset_bits(), 6);
    assert_eq!(1usize << level.index_bits(), sets);
}

// ══════════════════════════════════════════════════════════
// 2. JSON
// ══════════════════════════════════════════════════════════

#[test]
fn empty_object_gives_defaults() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn omitted_fields_take_defaults() {
    let text = r#"{
        "general": { "max_cycles": 1000 },
        "cache": {
            "levels": [
                { "name": "D", "size": 1024, "latency": { "hit": 2 } }
            ]
        }
    }"#;
    let config = Config::from_json_str(text).unwrap();

    assert_eq!(config.general.max_cycles, Some(1000));
    assert_eq!(config.general.stack_pointer, 0x8000_0000);
    assert_eq!(config.cache.memory, LatencyConfig::memory());

    let level = &config.cache.levels[0];
    assert_eq!(level.block_size, 64);
    assert_eq!(level.associativity, 8);
    assert!(level.write_allocate);
    assert!(!level.write_through);
    assert_eq!(level.latency, LatencyConfig { bus: 0, hit: 2 });
    assert_eq!(level.set_count(), 2);
}

#[test]
fn empty_level_list_is_allowed() {
    let config =
        Config::from_json_str(r#"{ "cache": { "levels": [], "memory": { "bus": 1, "hit": 9 } } }"#)
            .unwrap();
    assert!(config.cache.levels.is_empty());
    assert_eq!(config.cache.memory, LatencyConfig { bus: 1, hit: 9 });
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = Config::from_json_str("{ general: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn invalid_level_in_json_is_rejected() {
    let text = r#"{ "cache": { "levels": [
        { "name": "odd", "size": 1000, "latency": { "hit": 1 } }
    ] } }"#;
    let err = Config::from_json_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::Geometry { ref name, .. } if name == "odd"));
}

#[test]
fn json_round_trips() {
    let mut config = Config::default();
    config.general.trace_instructions = true;
    config.cache.levels[0].write_through = true;
    config.cache.levels.truncate(2);

    let parsed = Config::from_json_str(&config.to_json()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn from_file_reads_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "stack_pointer": 4096 }} }}"#).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.general.stack_pointer, 4096);
}

#[test]
fn missing_file_is_a_parse_error_naming_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    match Config::from_file(&path).unwrap_err() {
        ConfigError::Parse(msg) => assert!(msg.contains("absent.json"), "{msg}"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════
// 3. Geometry Validation
// ══════════════════════════════════════════════════════════

fn level(size: usize, block_size: usize, associativity: usize) -> CacheConfig {
    CacheConfig {
        name: "T".to_string(),
        size,
        block_size,
        associativity,
        write_through: false,
        write_allocate: true,
        latency: LatencyConfig { bus: 0, hit: 1 },
    }
}

#[rstest]
#[case(level(256, 64, 4))]
#[case(level(4096, 16, 1))]
#[case(level(384, 64, 3))]
#[case(level(64, 64, 1))]
fn valid_geometries(#[case] cfg: CacheConfig) {
    cfg.validate().unwrap();
}

#[rstest]
#[case(level(0, 64, 1), "size")]
#[case(level(256, 0, 1), "block_size")]
#[case(level(256, 64, 0), "associativity")]
fn zero_fields(#[case] cfg: CacheConfig, #[case] field: &'static str) {
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::Zero {
            name: "T".to_string(),
            field
        })
    );
}

#[test]
fn block_size_must_be_power_of_two() {
    assert_eq!(
        level(480, 48, 2).validate(),
        Err(ConfigError::NotPowerOfTwo {
            name: "T".to_string(),
            field: "block_size",
            value: 48
        })
    );
}

#[test]
fn set_count_must_be_power_of_two() {
    assert_eq!(
        level(192, 64, 1).validate(),
        Err(ConfigError::NotPowerOfTwo {
            name: "T".to_string(),
            field: "set_count",
            value: 3
        })
    );
}

#[rstest]
#[case(level(100, 64, 1))]
#[case(level(64, 64, 2))]
#[case(level(64, 1 << (usize::BITS - 1), 4))]
#[case(level(usize::MAX, 1 << (usize::BITS / 2), 1 << (usize::BITS / 2)))]
fn size_must_divide_into_whole_sets(#[case] cfg: CacheConfig) {
    assert!(matches!(cfg.validate(), Err(ConfigError::Geometry { .. })));
}

#[test]
fn oversized_set_width_has_no_sets() {
    let cfg = level(4096, 1 << (usize::BITS - 1), 2);
    assert_eq!(cfg.set_count(), 0);
}

#[test]
fn overflowing_geometry_in_json_is_rejected() {
    let json = format!(
        r#"{{ "cache": {{ "levels": [ {{ "name": "huge", "size": 64, "block_size": {}, "associativity": 8, "latency": {{ "hit": 1 }} }} ] }} }}"#,
        1usize << (usize::BITS - 1)
    );
    let err = Config::from_json_str(&json).unwrap_err();
    assert!(matches!(err, ConfigError::Geometry { ref name, .. } if name == "huge"));
}

#[test]
fn validate_reports_the_first_bad_level() {
    let mut config = Config::default();
    config.cache.levels[1].size = 0;
    config.cache.levels[2].block_size = 3;

    assert_eq!(
        config.validate(),
        Err(ConfigError::Zero {
            name: "L2".to_string(),
            field: "size"
        })
    );
}
