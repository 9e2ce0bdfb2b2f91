//! State machine trait for ordered lifecycle enums.

use super::ValidationError;

/// Trait for enums whose values form a state machine.
///
/// Implementors list their legal moves; `transition_to` and `is_terminal`
/// are derived from that list.
///
/// ```ignore
/// let next = DiscoveryStage::Background.transition_to(DiscoveryStage::Motivation)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if moving from self to target is a legal transition.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all legal target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the transition, failing if it is not legal.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invariant(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
