use std::str::FromStr;
use std::time::Duration;

use business::domain::suggestion::cadence::CadencePolicy;
use business::domain::suggestion::retry::RetryPolicy;
use business::domain::suggestion::settings::SuggestionSettings;

/// Suggestion engine tunables
///
/// Environment variables:
/// - SUGGESTION_REFRESH_INTERVAL_MINUTES: max age of a batch (default: 120)
/// - SUGGESTION_HISTORY_CAP: remembered names per kind (default: 30)
/// - SUGGESTION_MAX_RETRIES: retries after the first attempt (default: 3)
/// - SUGGESTION_RETRY_BASE_DELAY_MS: first rate-limit delay (default: 1000)
/// - SUGGESTION_RETRY_MAX_DELAY_MS: rate-limit delay ceiling (default: 10000)
/// - SUGGESTION_POLL_INTERVAL_SECS: scheduler tick (default: 60)
/// - SUGGESTION_SUBSCRIPTION_TTL_SECS: idle time before a view is dropped (default: 1800)
/// - SUGGESTION_REQUIRE_SUBSCRIPTION: premium gating (default: true)
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    pub settings: SuggestionSettings,
    pub poll_interval: Duration,
    pub subscription_ttl: Duration,
}

impl SuggestionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SuggestionSettings::default();
        let read = |name: &str, default: u64| -> u64 { parse_or(&lookup, name, default) };

        let refresh_minutes = read(
            "SUGGESTION_REFRESH_INTERVAL_MINUTES",
            defaults.cadence.max_age.num_minutes().unsigned_abs(),
        );
        let retry = RetryPolicy {
            max_retries: parse_or(
                &lookup,
                "SUGGESTION_MAX_RETRIES",
                defaults.retry.max_retries,
            ),
            base_delay: Duration::from_millis(read(
                "SUGGESTION_RETRY_BASE_DELAY_MS",
                duration_millis(defaults.retry.base_delay),
            )),
            max_delay: Duration::from_millis(read(
                "SUGGESTION_RETRY_MAX_DELAY_MS",
                duration_millis(defaults.retry.max_delay),
            )),
            ..defaults.retry
        };

        Self {
            settings: SuggestionSettings {
                cadence: CadencePolicy::new(
                    i64::try_from(refresh_minutes)
                        .ok()
                        .and_then(chrono::Duration::try_minutes)
                        .unwrap_or(defaults.cadence.max_age),
                ),
                retry,
                history_cap: parse_or(&lookup, "SUGGESTION_HISTORY_CAP", defaults.history_cap),
                require_subscription: parse_or(
                    &lookup,
                    "SUGGESTION_REQUIRE_SUBSCRIPTION",
                    defaults.require_subscription,
                ),
            },
            poll_interval: Duration::from_secs(read("SUGGESTION_POLL_INTERVAL_SECS", 60).max(1)),
            subscription_ttl: Duration::from_secs(
                read("SUGGESTION_SUBSCRIPTION_TTL_SECS", 30 * 60).max(1),
            ),
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "Ignoring invalid configuration value");
            default
        }),
        None => default,
    }
}
