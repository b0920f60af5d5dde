use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Vaccinations recorded before this year are sparse and treated as noise.
pub const DEFAULT_MIN_VACCINATION_YEAR: i32 = 2015;

/// Centroid of the municipality, used when no single school is focused.
pub const DEFAULT_MAP_CENTER: (f64, f64) = (-23.5324, -46.7916);

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub map: MapConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_dir = PathBuf::from(env::var("APP_DATA_DIR").unwrap_or_else(|_| "data".into()));
        let geography_path = env::var("APP_GEOGRAPHY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("shapefiles").join("osasco.geojson"));
        let min_year = parse_var("APP_MIN_VACCINATION_YEAR", DEFAULT_MIN_VACCINATION_YEAR)?;

        let center_latitude = parse_var("APP_MAP_CENTER_LAT", DEFAULT_MAP_CENTER.0)?;
        let center_longitude = parse_var("APP_MAP_CENTER_LON", DEFAULT_MAP_CENTER.1)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig {
                data_dir,
                geography_path,
                min_year,
            },
            map: MapConfig {
                center_latitude,
                center_longitude,
                ..MapConfig::default()
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locations of the static tables and boundary file read at startup.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub geography_path: PathBuf,
    pub min_year: i32,
}

impl DataConfig {
    pub fn vaccinations_path(&self) -> PathBuf {
        self.data_dir.join("n_vacinas_escola.csv")
    }

    pub fn enrollments_path(&self) -> PathBuf {
        self.data_dir.join("n_alunos.csv")
    }
}

/// Viewport settings for the school map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub overview_zoom: f64,
    pub focus_zoom: f64,
    pub height: u32,
    pub style: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: DEFAULT_MAP_CENTER.0,
            center_longitude: DEFAULT_MAP_CENTER.1,
            overview_zoom: 11.0,
            focus_zoom: 13.0,
            height: 600,
            style: "outdoors".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be numeric (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_DATA_DIR",
            "APP_GEOGRAPHY_PATH",
            "APP_MIN_VACCINATION_YEAR",
            "APP_MAP_CENTER_LAT",
            "APP_MAP_CENTER_LON",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data.min_year, 2015);
        assert_eq!(
            config.data.vaccinations_path(),
            PathBuf::from("data").join("n_vacinas_escola.csv")
        );
        assert_eq!(
            config.data.geography_path,
            PathBuf::from("data").join("shapefiles").join("osasco.geojson")
        );
        assert_eq!(config.map, MapConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn data_dir_and_cutoff_are_configurable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DATA_DIR", "/srv/painel");
        env::set_var("APP_MIN_VACCINATION_YEAR", "2019");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.data.enrollments_path(),
            PathBuf::from("/srv/painel/n_alunos.csv")
        );
        assert_eq!(
            config.data.geography_path,
            PathBuf::from("/srv/painel/shapefiles/osasco.geojson")
        );
        assert_eq!(config.data.min_year, 2019);
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_cutoff() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MIN_VACCINATION_YEAR", "soon");
        let error = AppConfig::load().expect_err("cutoff must be numeric");
        assert!(matches!(
            error,
            ConfigError::InvalidNumber {
                key: "APP_MIN_VACCINATION_YEAR",
                ..
            }
        ));
        reset_env();
    }
}
