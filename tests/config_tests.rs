use pistasecure::config::settings::{Config, ConfigError};
use pistasecure::detection::tier::Tier;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn config_loads_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
        [scoring]
        amplification_factor = 2.0
        dangerous_threshold = 80
        suspicious_threshold = 50

        [profile]
        amplification_factor = 1.2

        [output]
        fail_on = "dangerous"

        [report_log]
        path = "/var/tmp/pista/reports.jsonl"
        max_rotated_files = 5
    "#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::from_file(&config_path).unwrap();

    assert_eq!(config.scoring.amplification_factor, 2.0);
    assert_eq!(config.scoring.dangerous_threshold, 80);
    assert_eq!(config.scoring.suspicious_threshold, 50);
    assert_eq!(config.scoring.min_reasons, 2, "Unset keys keep defaults");
    assert_eq!(config.profile.amplification_factor, 1.2);
    assert_eq!(config.output.fail_on, Tier::Dangerous);
    assert_eq!(
        config.report_log_path(),
        PathBuf::from("/var/tmp/pista/reports.jsonl")
    );
    assert_eq!(config.report_log.max_rotated_files, 5);
    assert_eq!(config.report_log.max_file_bytes, 5 * 1024 * 1024);
}

#[test]
fn config_uses_defaults_when_missing() {
    let config = Config::default();

    assert_eq!(config.scoring.amplification_factor, 3.0);
    assert_eq!(config.scoring.dangerous_threshold, 70);
    assert_eq!(config.scoring.suspicious_threshold, 40);
    assert_eq!(config.scoring.min_reasons, 2);
    assert_eq!(config.scoring.padding_threshold, 30);
    assert_eq!(config.profile.amplification_factor, 1.5);
    assert_eq!(config.output.fail_on, Tier::Suspicious);
    assert!(config.report_log.path.is_none());
}

#[test]
fn empty_file_is_all_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.scoring, Config::default().scoring);
}

#[test]
fn load_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load(Some(temp_dir.path().join("absent.toml").as_path())).unwrap();
    assert_eq!(config.scoring.dangerous_threshold, 70);
}

#[test]
fn config_round_trips_through_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.scoring.amplification_factor = 2.5;
    config.output.fail_on = Tier::Dangerous;
    fs::write(&config_path, config.to_toml().unwrap()).unwrap();

    let loaded = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded.scoring, config.scoring);
    assert_eq!(loaded.output.fail_on, Tier::Dangerous);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[scoring\namplification_factor = ").unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn inverted_thresholds_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[scoring]\ndangerous_threshold = 40\nsuspicious_threshold = 60\n",
    )
    .unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidScoring {
            section: "scoring",
            ..
        }
    ));
}

#[test]
fn non_positive_profile_amplification_rejected() {
    let mut config = Config::default();
    config.profile.amplification_factor = 0.0;
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidScoring {
            section: "profile",
            ..
        }
    ));
}

#[test]
fn zero_log_size_rejected() {
    let mut config = Config::default();
    config.report_log.max_file_bytes = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidReportLog(_))
    ));
}

#[test]
fn profile_scoring_shares_thresholds() {
    let mut config = Config::default();
    config.scoring.dangerous_threshold = 90;
    let profile = config.profile_scoring();
    assert_eq!(profile.dangerous_threshold, 90);
    assert_eq!(profile.amplification_factor, 1.5);
}

#[test]
fn fail_on_controls_failing_tiers() {
    let mut config = Config::default();
    assert!(!config.is_failing(Tier::Safe));
    assert!(config.is_failing(Tier::Suspicious));
    assert!(config.is_failing(Tier::Dangerous));

    config.output.fail_on = Tier::Dangerous;
    assert!(!config.is_failing(Tier::Suspicious));
}

#[test]
fn default_config_path_is_under_pistasecure() {
    let path = Config::default_config_path();
    assert!(path.ends_with("pistasecure/config.toml"));
}
