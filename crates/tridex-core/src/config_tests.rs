//! Tests for config module

use crate::config::*;

// ========================================================================
// Defaults
// ========================================================================

#[test]
fn test_config_default_values() {
    // Arrange & Act
    let config = TridexConfig::default();

    // Assert
    assert_eq!(config.index.initial_capacity, 4096);
    assert!(config.index.prune_threshold.is_none());
    assert!(!config.index.sort_on_build);
    assert!(config.query.max_candidates.is_none());
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

// ========================================================================
// TOML parsing
// ========================================================================

#[test]
fn test_config_from_toml_partial() {
    // Arrange
    let toml_str = r#"
[index]
prune_threshold = 0.25

[query]
max_candidates = 500
"#;

    // Act
    let config = TridexConfig::from_toml(toml_str).expect("parse");

    // Assert
    assert_eq!(config.index.prune_threshold, Some(0.25));
    assert_eq!(config.index.initial_capacity, 4096);
    assert_eq!(config.query.max_candidates, Some(500));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_from_toml_invalid_type() {
    let result = TridexConfig::from_toml("[index]\nsort_on_build = \"maybe\"");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_toml_roundtrip() {
    // Arrange
    let mut config = TridexConfig::default();
    config.index.prune_threshold = Some(0.5);
    config.logging.level = "debug".to_string();

    // Act
    let toml_str = config.to_toml().expect("serialize");
    let parsed = TridexConfig::from_toml(&toml_str).expect("parse");

    // Assert
    assert_eq!(parsed.index.prune_threshold, Some(0.5));
    assert_eq!(parsed.logging.level, "debug");
}

#[test]
fn test_config_load_missing_file_uses_defaults() {
    let config = TridexConfig::load_from_path("/nonexistent/tridex.toml").expect("defaults");
    assert_eq!(config.index.initial_capacity, 4096);
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tridex.toml");
    std::fs::write(&path, "[index]\nsort_on_build = true\n").expect("write");

    let config = TridexConfig::load_from_path(&path).expect("load");
    assert!(config.index.sort_on_build);
}

#[test]
fn test_config_env_overrides_file() {
    figment::Jail::expect_with(|jail| {
        // Arrange
        jail.create_file(
            "tridex.toml",
            "[index]\nprune_threshold = 0.25\n\n[query]\nmax_candidates = 10\n",
        )?;
        jail.set_env("TRIDEX_INDEX__PRUNE_THRESHOLD", "0.75");

        // Act
        let config = TridexConfig::load().map_err(|e| e.to_string())?;

        // Assert
        assert_eq!(config.index.prune_threshold, Some(0.75));
        assert_eq!(config.query.max_candidates, Some(10));
        Ok(())
    });
}

#[test]
fn test_config_env_nested_keys_with_underscores() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("TRIDEX_QUERY__MAX_CANDIDATES", "7");
        jail.set_env("TRIDEX_INDEX__SORT_ON_BUILD", "true");
        jail.set_env("TRIDEX_LOGGING__LEVEL", "debug");

        let config = TridexConfig::load().map_err(|e| e.to_string())?;

        assert_eq!(config.query.max_candidates, Some(7));
        assert!(config.index.sort_on_build);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.index.initial_capacity, 4096);
        Ok(())
    });
}

// ========================================================================
// Validation
// ========================================================================

#[test]
fn test_validate_prune_threshold_range() {
    for bad in [0.0, -0.1, 1.01, f64::NAN] {
        let mut config = TridexConfig::default();
        config.index.prune_threshold = Some(bad);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "index.prune_threshold"
        ));
    }

    let mut config = TridexConfig::default();
    config.index.prune_threshold = Some(1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_max_candidates_zero() {
    let mut config = TridexConfig::default();
    config.query.max_candidates = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_logging_level() {
    let mut config = TridexConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "trace".to_string();
    assert!(config.validate().is_ok());
}
