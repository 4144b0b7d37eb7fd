//! Runtime configuration for the styling edge service.
//!
//! All settings come from `RATECSS_*` environment variables so the same
//! binary can be pointed at a different page widget or query parameter
//! without a rebuild. Unset or unparsable variables fall back to the
//! embedded defaults.

use std::env;

use style_injector::{DEFAULT_PARAM, DEFAULT_TARGET, InjectorConfig, default_allow_list};

/// Address the HTTP listener binds to when `RATECSS_BIND` is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:8788";

/// Cache lifetime, in seconds, attached to successful CSS responses.
pub const DEFAULT_CACHE_MAX_AGE: u32 = 86_400;

/// Settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on, `host:port`.
    pub bind: String,
    /// Selector the injector endpoint wraps sanitized declarations in.
    pub target: String,
    /// Query parameter the injector endpoint reads declarations from.
    pub param: String,
    /// Whether served injector rules mark every declaration `!important`.
    pub important: bool,
    /// `max-age` value for the `Cache-Control` header on success responses.
    pub cache_max_age: u32,
}

impl ServerConfig {
    /// Reads configuration from the environment.
    ///
    /// * `RATECSS_BIND` - listen address, defaults to [`DEFAULT_BIND`]
    /// * `RATECSS_TARGET` - injector selector, defaults to the rate widget
    /// * `RATECSS_PARAM` - injector query parameter, defaults to `css`
    /// * `RATECSS_IMPORTANT` - set to `1` to suffix declarations with
    ///   `!important`
    /// * `RATECSS_CACHE_MAX_AGE` - cache lifetime in seconds
    pub fn from_env() -> Self {
        let bind = env::var("RATECSS_BIND")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let target = env::var("RATECSS_TARGET")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET.to_owned());
        let param = env::var("RATECSS_PARAM")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PARAM.to_owned());
        let important = env::var("RATECSS_IMPORTANT").is_ok_and(|value| value == "1");
        let cache_max_age = env::var("RATECSS_CACHE_MAX_AGE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_CACHE_MAX_AGE);
        Self {
            bind,
            target,
            param,
            important,
            cache_max_age,
        }
    }

    /// Builds the injector settings used by the `/ratecss/inject` route.
    pub fn injector(&self) -> InjectorConfig {
        InjectorConfig {
            target: self.target.clone(),
            param: self.param.clone(),
            allowed: default_allow_list().clone(),
            important: self.important,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
            target: DEFAULT_TARGET.to_owned(),
            param: DEFAULT_PARAM.to_owned(),
            important: false,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_rate_widget() {
        let config = ServerConfig::default();
        assert_eq!(config.target, "#page-content div.rate");
        assert_eq!(config.param, "css");
        assert_eq!(config.cache_max_age, 86_400);
        assert!(!config.important);
    }

    #[test]
    fn injector_settings_mirror_server_settings() {
        let config = ServerConfig {
            target: "div.stats".to_owned(),
            important: true,
            ..ServerConfig::default()
        };
        let injector = config.injector();
        assert_eq!(injector.target, "div.stats");
        assert!(injector.important);
        assert!(injector.allowed.contains("color"));
    }
}
