use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "SilverCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cookie holding the mock session token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Older cookie name still honoured on restore, removed on every login.
pub const LEGACY_TOKEN_COOKIE: &str = "authToken";
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

pub const DAILY_STEP_GOAL: u32 = 5000;
pub const CHAT_TYPING_DELAY_MS: u64 = 1500;

/// A dose stays "current" for this long after its scheduled time.
pub const OVERDUE_AFTER_HOURS: i64 = 1;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "silvercare=info,silvercare_lib=info"
}

/// Runtime knobs for the dashboard, overridable from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub chat_typing_delay: Duration,
    pub step_goal: u32,
    pub secure_cookies: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chat_typing_delay: Duration::from_millis(CHAT_TYPING_DELAY_MS),
            step_goal: DAILY_STEP_GOAL,
            secure_cookies: false,
        }
    }
}

impl DashboardConfig {
    /// Read overrides from `SILVERCARE_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("SILVERCARE_CHAT_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.chat_typing_delay = Duration::from_millis(ms),
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid SILVERCARE_CHAT_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("SILVERCARE_STEP_GOAL") {
            match raw.trim().parse::<u32>() {
                Ok(goal) if goal > 0 => config.step_goal = goal,
                _ => tracing::warn!(value = %raw, "Ignoring invalid SILVERCARE_STEP_GOAL"),
            }
        }

        if let Some(raw) = lookup("SILVERCARE_SECURE_COOKIES") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.secure_cookies = true,
                "0" | "false" | "no" => config.secure_cookies = false,
                _ => tracing::warn!(value = %raw, "Ignoring invalid SILVERCARE_SECURE_COOKIES"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_name_is_silvercare() {
        assert_eq!(APP_NAME, "SilverCare");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn log_filter_covers_binary_and_library() {
        assert_eq!(default_log_filter(), "silvercare=info,silvercare_lib=info");
    }

    #[test]
    fn defaults_match_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.chat_typing_delay, Duration::from_millis(1500));
        assert_eq!(config.step_goal, 5000);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn lookup_overrides_values() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("SILVERCARE_CHAT_DELAY_MS", "20"),
            ("SILVERCARE_STEP_GOAL", "8000"),
            ("SILVERCARE_SECURE_COOKIES", "true"),
        ]));
        assert_eq!(config.chat_typing_delay, Duration::from_millis(20));
        assert_eq!(config.step_goal, 8000);
        assert!(config.secure_cookies);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("SILVERCARE_CHAT_DELAY_MS", "soon"),
            ("SILVERCARE_STEP_GOAL", "0"),
            ("SILVERCARE_SECURE_COOKIES", "maybe"),
        ]));
        assert_eq!(config, DashboardConfig::default());
    }
}
