/// Visual cue for whether the user is rotating the globe.
///
/// The machine is deliberately decoupled from filter computation: the same
/// triggers drive both, but neither blocks the other. `Settling` covers the
/// window between releasing a drag and the first visible-set publish that
/// reflects the released camera.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl InteractionState {
    /// Transition for an interaction-start trigger.
    pub fn on_interaction_start(self) -> Self {
        InteractionState::Dragging
    }

    /// Transition for an interaction-end trigger.
    ///
    /// An end without a preceding start is absorbed.
    pub fn on_interaction_end(self) -> Self {
        match self {
            InteractionState::Dragging => InteractionState::Settling,
            other => other,
        }
    }

    /// Transition once a visible set computed after the interaction ended
    /// has been published.
    pub fn on_pass_published(self) -> Self {
        match self {
            InteractionState::Settling => InteractionState::Idle,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionState::{Dragging, Idle, Settling};

    #[test]
    fn full_cycle() {
        let s = Idle.on_interaction_start();
        assert_eq!(s, Dragging);
        let s = s.on_interaction_end();
        assert_eq!(s, Settling);
        let s = s.on_pass_published();
        assert_eq!(s, Idle);
    }

    #[test]
    fn publishes_while_dragging_do_not_settle() {
        assert_eq!(Dragging.on_pass_published(), Dragging);
    }

    #[test]
    fn stray_end_is_absorbed() {
        assert_eq!(Idle.on_interaction_end(), Idle);
        assert_eq!(Settling.on_interaction_end(), Settling);
    }

    #[test]
    fn regrab_while_settling_goes_back_to_dragging() {
        assert_eq!(Settling.on_interaction_start(), Dragging);
    }
}
