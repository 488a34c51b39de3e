/// How the CLI acquires the user's position when no coordinates are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationMode {
    /// Look the position up from the caller's public IP address.
    Ip,
    /// No geolocation facility is available.
    Off,
}

impl std::fmt::Display for GeolocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocationMode::Ip => write!(f, "ip"),
            GeolocationMode::Off => write!(f, "off"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub places_api_version: String,
    pub proxy_url: Option<String>,
    pub search_radius_m: u32,
    pub search_limit: u32,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub geolocation: GeolocationMode,
    pub geolocation_url: String,
    pub location_allowed: bool,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("places_api_version", &self.places_api_version)
            .field("proxy_url", &self.proxy_url)
            .field("search_radius_m", &self.search_radius_m)
            .field("search_limit", &self.search_limit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("geolocation", &self.geolocation)
            .field("geolocation_url", &self.geolocation_url)
            .field("location_allowed", &self.location_allowed)
            .field("log_level", &self.log_level)
            .finish()
    }
}
