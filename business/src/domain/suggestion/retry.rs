use std::time::Duration;

use super::errors::GenerationError;

/// Bounds and delays for repeated generation attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// First rate-limit delay; doubles on every attempt.
    pub base_delay: Duration,
    /// Ceiling of the rate-limit delay.
    pub max_delay: Duration,
    /// Delay after any other failure.
    pub flat_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            flat_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before the attempt following a failed `attempt` (0-based).
    ///
    /// Rate limiting backs off as `min(base * 2^attempt, max)`; everything
    /// else waits `flat_delay`.
    pub fn delay_for(&self, attempt: u32, error: &GenerationError) -> Duration {
        match error {
            GenerationError::RateLimited => {
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                self.base_delay.saturating_mul(factor).min(self.max_delay)
            }
            _ => self.flat_delay,
        }
    }
}

/// Phases of one generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Requesting,
    Validating,
    Accepted,
    Failed,
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationState::Idle => write!(f, "idle"),
            GenerationState::Requesting => write!(f, "requesting"),
            GenerationState::Validating => write!(f, "validating"),
            GenerationState::Accepted => write!(f, "accepted"),
            GenerationState::Failed => write!(f, "failed"),
        }
    }
}

/// Inputs that move a cycle between states.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleEvent {
    Trigger,
    ResponseReceived,
    BatchAccepted,
    Rejected(GenerationError),
}

/// What the driver has to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleStep {
    /// Call the language model for this 0-based attempt.
    Request { attempt: u32 },
    /// Run the validation pipeline on the response.
    Validate,
    /// Commit the batch to the store and history.
    Commit,
    /// Sleep, then request again.
    RetryAfter { delay: Duration, next_attempt: u32 },
    /// Bound reached; clear the store.
    GiveUp(GenerationError),
    /// The event is not valid in the current state.
    Ignored,
}

/// Explicit state machine for one generation cycle with its attempt
/// counter threaded as state instead of recursion.
#[derive(Debug, Clone)]
pub struct GenerationCycle {
    state: GenerationState,
    attempt: u32,
    policy: RetryPolicy,
}

impl GenerationCycle {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            state: GenerationState::Idle,
            attempt: 0,
            policy,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn on(&mut self, event: CycleEvent) -> CycleStep {
        match (self.state, event) {
            (GenerationState::Idle, CycleEvent::Trigger) => {
                self.state = GenerationState::Requesting;
                CycleStep::Request {
                    attempt: self.attempt,
                }
            }
            (GenerationState::Requesting, CycleEvent::ResponseReceived) => {
                self.state = GenerationState::Validating;
                CycleStep::Validate
            }
            (GenerationState::Validating, CycleEvent::BatchAccepted) => {
                self.state = GenerationState::Accepted;
                CycleStep::Commit
            }
            (
                GenerationState::Requesting | GenerationState::Validating,
                CycleEvent::Rejected(error),
            ) => {
                if self.attempt >= self.policy.max_retries {
                    self.state = GenerationState::Failed;
                    return CycleStep::GiveUp(GenerationError::ExhaustedRetries {
                        attempts: self.attempt + 1,
                    });
                }
                let delay = self.policy.delay_for(self.attempt, &error);
                self.attempt += 1;
                self.state = GenerationState::Requesting;
                CycleStep::RetryAfter {
                    delay,
                    next_attempt: self.attempt,
                }
            }
            _ => CycleStep::Ignored,
        }
    }

    /// An accepted cycle returns to idle so the same driver can run again.
    pub fn reset(&mut self) {
        self.state = GenerationState::Idle;
        self.attempt = 0;
    }
}
