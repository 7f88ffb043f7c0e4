//! # Configuration Tests
//!
//! Verifies defaults, partial JSON documents, and rejection of impossible machines.

use pretty_assertions::assert_eq;
use w32sim_core::common::ConfigError;
use w32sim_core::config::{Config, GeneralConfig, SystemConfig};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(
        config.system,
        SystemConfig {
            memory_size: 0x4_0000,
            load_address: 0x3000
        }
    );
    assert_eq!(
        config.general,
        GeneralConfig {
            trace_instructions: false,
            max_cycles: None,
            initial_sp: None
        }
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::from_json(
        r#"{
            "general": { "max_cycles": 1000, "initial_sp": 262144 },
            "system": { "load_address": 256 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.general.max_cycles, Some(1000));
    assert_eq!(config.general.initial_sp, Some(0x4_0000));
    assert!(!config.general.trace_instructions);
    assert_eq!(config.system.load_address, 0x100);
    assert_eq!(config.system.memory_size, 0x4_0000);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Config::from_json("{ general: }"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "system": { "memory_size": "big" } }"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_zero_memory_rejected() {
    assert!(matches!(
        Config::from_json(r#"{ "system": { "memory_size": 0 } }"#),
        Err(ConfigError::InvalidMemorySize(0))
    ));
}

#[test]
fn test_load_address_must_be_inside_memory() {
    let err = Config::from_json(r#"{ "system": { "memory_size": 4096, "load_address": 4096 } }"#)
        .unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::LoadAddressOutOfRange {
                load_address: 4096,
                memory_size: 4096
            }
        ),
        "Unexpected error {err}"
    );
}

#[test]
fn test_validate_after_mutation() {
    let mut config = Config::default();
    config.system.memory_size = 0x1000;
    assert!(config.validate().is_err());
    config.system.load_address = 0;
    assert!(config.validate().is_ok());
}
