//! State machine trait for status enums.
//!
//! Gives club and payment statuses one way to validate a requested
//! transition before a row is written.

use super::DomainError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// let next = club.status.transition_to(ClubStatus::Approved)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, failing with `InvalidState`.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::invalid_state(format!(
                "Cannot transition from {:?} to {:?}",
                self, target
            )))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
