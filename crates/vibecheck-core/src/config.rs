use crate::app_config::{AppConfig, GeolocationMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_opt_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        optional(var)
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };

    let places_api_key = require("VIBECHECK_PLACES_API_KEY")?;
    let places_base_url = or_default(
        "VIBECHECK_PLACES_BASE_URL",
        "https://places-api.foursquare.com",
    );
    let places_api_version = or_default("VIBECHECK_PLACES_API_VERSION", "2025-06-17");
    let proxy_url = optional("VIBECHECK_PROXY_URL");

    let search_radius_m = parse_u32("VIBECHECK_SEARCH_RADIUS_M", "3000")?;
    let search_limit = parse_u32("VIBECHECK_SEARCH_LIMIT", "10")?;
    if search_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIBECHECK_SEARCH_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let request_timeout_secs = parse_opt_u64("VIBECHECK_REQUEST_TIMEOUT_SECS")?;
    let user_agent = or_default("VIBECHECK_USER_AGENT", "vibecheck/0.1");

    let geolocation = parse_geolocation_mode(&or_default("VIBECHECK_GEOLOCATION", "ip"))?;
    let geolocation_url = or_default("VIBECHECK_GEOLOCATION_URL", "http://ip-api.com/json");
    let location_allowed = parse_bool(
        "VIBECHECK_LOCATION_ALLOWED",
        &or_default("VIBECHECK_LOCATION_ALLOWED", "true"),
    )?;
    let log_level = or_default("VIBECHECK_LOG_LEVEL", "warn");

    Ok(AppConfig {
        places_api_key,
        places_base_url,
        places_api_version,
        proxy_url,
        search_radius_m,
        search_limit,
        request_timeout_secs,
        user_agent,
        geolocation,
        geolocation_url,
        location_allowed,
        log_level,
    })
}

/// Parse a string into a `GeolocationMode` variant.
fn parse_geolocation_mode(s: &str) -> Result<GeolocationMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "ip" => Ok(GeolocationMode::Ip),
        "off" | "none" | "disabled" => Ok(GeolocationMode::Off),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VIBECHECK_GEOLOCATION".to_string(),
            reason: format!("unknown geolocation mode '{other}' (expected 'ip' or 'off')"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
