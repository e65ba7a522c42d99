// ==========================
// tests/unit/config_tests.rs
// ==========================
//! Unit tests for the configuration module
use authgate_lib::config::{AuthType, ConfigError, Settings, DEFAULT_CONFIG_FILE};
use authgate_lib::redact::PII_FIELDS;
use figment::Jail;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.bind_addr.port(), 5000);
    assert_eq!(settings.auth_type, AuthType::BasicAuth);
    assert_eq!(settings.session_name, "_my_session_id");
    assert_eq!(settings.session_ttl_secs, 0);
    assert_eq!(settings.pii_fields, PII_FIELDS.to_vec());
    assert_eq!(settings.excluded_paths.len(), 4);
}

#[test]
fn test_custom_file_path() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", r#"auth_type = "none""#)?;
        let settings = Settings::load_from("custom.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.auth_type, AuthType::None);

        // the default file is not consulted when another path is given
        jail.create_file(DEFAULT_CONFIG_FILE, r#"auth_type = "session_auth""#)?;
        let settings = Settings::load_from("custom.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.auth_type, AuthType::None);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(DEFAULT_CONFIG_FILE, "session_ttl_secs = 10")?;
        jail.set_env("AUTHGATE_SESSION_TTL_SECS", "3600");
        jail.set_env("AUTHGATE_AUTH_TYPE", "session_auth");

        let settings = Settings::load().map_err(|e| e.to_string())?;
        assert_eq!(settings.session_ttl_secs, 3600);
        assert_eq!(settings.auth_type, AuthType::SessionAuth);
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(DEFAULT_CONFIG_FILE, r#"session_name = "bad name""#)?;
        assert!(matches!(
            Settings::load(),
            Err(ConfigError::Invalid { field: "session_name", .. })
        ));

        jail.create_file(DEFAULT_CONFIG_FILE, "session_ttl_secs = -1")?;
        assert!(matches!(Settings::load(), Err(ConfigError::Load(_))));
        Ok(())
    });
}
