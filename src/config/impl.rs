use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, TableConfig};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Loads configuration from built-in defaults, `config.toml`,
    /// `config.{APP_ENV}` and the environment, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(
                Environment::with_prefix("SEKOLAH")
                    .separator("_")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("remote.backend", std::env::var("REMOTE_BACKEND").ok())?
            .set_override_option("remote.base_url", std::env::var("REMOTE_BASE_URL").ok())?
            .set_override_option("remote.api_token", std::env::var("REMOTE_API_TOKEN").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }
        if app_config.table.default_page_size <= 0 {
            app_config.table.default_page_size = 10;
        }
        if app_config.table.max_page_size < app_config.table.default_page_size {
            app_config.table.max_page_size = app_config.table.default_page_size;
        }

        Ok(app_config)
    }

    /// Global configuration instance.
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// Called once at startup.
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl TableConfig {
    /// Requested page size, or the default, bounded by `max_page_size`.
    pub fn page_size(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = AppConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
        assert!(config.table.default_page_size <= config.table.max_page_size);
        assert_eq!(config.remote.backend, "http");
    }

    #[test]
    fn test_defaults_survive_config_round_trip() {
        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let loaded: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(loaded.remote.base_url, "http://127.0.0.1:8000/api");
        assert!(loaded.remote.api_token.is_empty());
        assert_eq!(loaded.table.default_page_size, 10);
    }

    #[test]
    fn test_page_size_bounds() {
        let table = AppConfig::default().table;
        assert_eq!(table.page_size(None), 10);
        assert_eq!(table.page_size(Some(25)), 25);
        assert_eq!(table.page_size(Some(5000)), 100);
        assert_eq!(table.page_size(Some(0)), 1);
    }
}
