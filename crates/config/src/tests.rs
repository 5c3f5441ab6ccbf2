use figment::{
    providers::{Format, Toml},
    Figment,
};

use crate::AppConfig;

#[test]
fn test_minimal_config() {
    let config: AppConfig = Figment::new()
        .merge(Toml::string(
            r#"
            app_name = "werkstatt"
            app_env = "development"

            [database]
            path = ":memory:"
            "#,
        ))
        .extract()
        .unwrap();

    assert_eq!(config.app_name, "werkstatt");
    assert!(config.is_development());
    assert!(!config.is_production());
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.database.max_connections, 1);
    assert_eq!(config.telemetry.log_level, "info");
}

#[test]
fn test_explicit_values_override_defaults() {
    let config: AppConfig = Figment::new()
        .merge(Toml::string(
            r#"
            app_name = "werkstatt"
            app_env = "production"

            [database]
            path = "/var/lib/werkstatt/werkstatt.db"
            max_connections = 4

            [telemetry]
            log_level = "debug"
            "#,
        ))
        .extract()
        .unwrap();

    assert!(config.is_production());
    assert_eq!(config.database.max_connections, 4);
    assert_eq!(config.telemetry.log_level, "debug");
}

#[test]
fn test_missing_database_section_fails() {
    let result: Result<AppConfig, _> = Figment::new()
        .merge(Toml::string(
            r#"
            app_name = "werkstatt"
            app_env = "development"
            "#,
        ))
        .extract();

    assert!(result.is_err());
}
