use super::cadence::CadencePolicy;
use super::history::DEFAULT_HISTORY_CAP;
use super::retry::RetryPolicy;

/// Tunables of the suggestion engine. Built from configuration by the
/// binary; defaults match the product values.
#[derive(Debug, Clone)]
pub struct SuggestionSettings {
    pub cadence: CadencePolicy,
    pub retry: RetryPolicy,
    pub history_cap: usize,
    /// Suggestions are a premium feature unless this is off.
    pub require_subscription: bool,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            cadence: CadencePolicy::default(),
            retry: RetryPolicy::default(),
            history_cap: DEFAULT_HISTORY_CAP,
            require_subscription: true,
        }
    }
}
