//! Claim state machine for jobs
//!
//! A job is either unclaimed or held by exactly one claim:
//! - `Unclaimed --Claim--> Claimed`
//! - `Claimed --Cancel--> Unclaimed`
//!
//! Every other pairing is a guard failure. The persistent store enforces the
//! same transitions atomically; this module is the in-process model of them.

use moveshare_common::StateError;

/// Claim states of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimState {
    Unclaimed,
    Claimed,
}

impl ClaimState {
    pub fn from_flag(is_claimed: bool) -> Self {
        if is_claimed {
            Self::Claimed
        } else {
            Self::Unclaimed
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Claimed)
    }
}

impl std::fmt::Display for ClaimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unclaimed => write!(f, "unclaimed"),
            Self::Claimed => write!(f, "claimed"),
        }
    }
}

/// Events that trigger claim transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimEvent {
    /// A user claims the job
    Claim,
    /// The claiming user cancels their claim
    Cancel,
}

impl std::fmt::Display for ClaimEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Claim => write!(f, "claim"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Claim state machine
pub struct ClaimStateMachine;

impl ClaimStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if the transition is valid, or an error otherwise.
    pub fn transition(current: ClaimState, event: ClaimEvent) -> Result<ClaimState, StateError> {
        match (current, event) {
            (ClaimState::Unclaimed, ClaimEvent::Claim) => Ok(ClaimState::Claimed),
            (ClaimState::Claimed, ClaimEvent::Cancel) => Ok(ClaimState::Unclaimed),
            (ClaimState::Claimed, ClaimEvent::Claim) => {
                Err(StateError::GuardFailed("job is already claimed".to_string()))
            }
            (ClaimState::Unclaimed, ClaimEvent::Cancel) => Err(StateError::InvalidTransition {
                from: current.to_string(),
                event: event.to_string(),
            }),
        }
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: ClaimState, event: ClaimEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
