/// Rule violations raised by the validation pipeline.
/// Every variant rejects the whole batch; none is corrected in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("validation.malformed_json: {0}")]
    MalformedJson(String),
    #[error("validation.wrong_cardinality: expected {expected}, got {actual}")]
    WrongCardinality { expected: usize, actual: usize },
    #[error("validation.missing_field: item {index} lacks {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("validation.negative_value: item {index} has negative {field}")]
    NegativeValue { index: usize, field: &'static str },
    #[error("validation.invalid_value: item {index} has invalid {field} '{value}'")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("validation.forbidden_budget: item {index}")]
    ForbiddenBudget { index: usize },
    #[error("validation.forbidden_keyword: item {index} mentions '{keyword}'")]
    ForbiddenKeyword { index: usize, keyword: String },
    #[error("validation.latin_script: item {index} field {field}")]
    LatinScript { index: usize, field: &'static str },
    #[error("validation.name_too_long: item {index} has {length} characters")]
    NameTooLong { index: usize, length: usize },
    #[error("validation.name_shape: item {index}")]
    NameShape { index: usize },
    #[error("validation.duplicate_name: {0}")]
    DuplicateName(String),
    #[error("validation.repeated_from_history: {0}")]
    RepeatedFromHistory(String),
    #[error("validation.not_a_beverage: item {index}")]
    NotABeverage { index: usize },
}

impl ValidationError {
    /// Stable rule identifier, used as a structured log field.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::MalformedJson(_) => "malformed_json",
            ValidationError::WrongCardinality { .. } => "wrong_cardinality",
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::NegativeValue { .. } => "negative_value",
            ValidationError::InvalidValue { .. } => "invalid_value",
            ValidationError::ForbiddenBudget { .. } => "forbidden_budget",
            ValidationError::ForbiddenKeyword { .. } => "forbidden_keyword",
            ValidationError::LatinScript { .. } => "latin_script",
            ValidationError::NameTooLong { .. } => "name_too_long",
            ValidationError::NameShape { .. } => "name_shape",
            ValidationError::DuplicateName(_) => "duplicate_name",
            ValidationError::RepeatedFromHistory(_) => "repeated_from_history",
            ValidationError::NotABeverage { .. } => "not_a_beverage",
        }
    }
}

/// Failure reported by the language-model port. The adapter classifies
/// rate limiting from the transport status, never from message text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("inference.rate_limited")]
    RateLimited,
    #[error("inference.transport: {0}")]
    Transport(String),
}

/// Failures seen by the retry controller for a single attempt, plus the
/// terminal exhaustion state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("generation.transport: {0}")]
    Transport(String),
    #[error("generation.rate_limited")]
    RateLimited,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("generation.exhausted_retries after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
}

impl From<InferenceError> for GenerationError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::RateLimited => GenerationError::RateLimited,
            InferenceError::Transport(message) => GenerationError::Transport(message),
        }
    }
}

/// Errors surfaced by the suggestion use cases.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("suggestion.profile_unavailable")]
    ProfileUnavailable,
    #[error("suggestion.subscription_required")]
    SubscriptionRequired,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
