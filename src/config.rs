use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefijo de todas las rutas `/api/...`. Vacío = mismo origen.
    pub api_base_url: String,
    pub environment: String,
    pub log_level: String,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            ui_config: UIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub toast_duration_ms: u32,
    pub toast_fade_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 4000,
            toast_fade_ms: 300,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
            ui_config: UIConfig {
                toast_duration_ms: option_env!("TOAST_DURATION_MS")
                    .unwrap_or("4000").parse().unwrap_or(defaults.ui_config.toast_duration_ms),
                toast_fade_ms: option_env!("TOAST_FADE_MS")
                    .unwrap_or("300").parse().unwrap_or(defaults.ui_config.toast_fade_ms),
            },
        }
    }

    /// Nivel de log para wasm_logger. En producción nunca por debajo de Info.
    pub fn log_level(&self) -> log::Level {
        let level = parse_log_level(&self.log_level).unwrap_or(log::Level::Info);
        if self.is_production() && level > log::Level::Info {
            log::Level::Info
        } else {
            level
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_log_level(raw: &str) -> Option<log::Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(log::Level::Trace),
        "debug" => Some(log::Level::Debug),
        "info" => Some(log::Level::Info),
        "warn" | "warning" => Some(log::Level::Warn),
        "error" => Some(log::Level::Error),
        _ => None,
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
