//! Keeps autoplay out of the user's way.
//!
//! The host pager reports scroll state transitions
//! (`Idle -> Dragging -> Settling -> Idle`, with `Settling -> Dragging` when
//! a settling page is grabbed again). The gate turns them into at most one
//! pause per grab and one resume per release, and tracks which real page is
//! selected for the indicator.

use std::mem;

use crate::index_wrapper::{DrivePosition, LoopStrategy};

/// Scroll state reported by the host pager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollState {
    /// At rest on a page.
    #[default]
    Idle,
    /// Following the user's finger.
    Dragging,
    /// Animating toward a target page.
    Settling,
}

/// What the gate wants done with autoplay after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
    /// Leave autoplay as it is.
    None,
    /// Cancel the pending tick.
    PauseAutoplay,
    /// Re-arm autoplay with the configured interval.
    ResumeAutoplay,
}

/// Translates host scroll events into autoplay pause and resume requests.
#[derive(Clone, Debug, Default)]
pub struct InteractionGate {
    scroll_state: ScrollState,
    autoplay_desired: bool,
    interrupted: bool,
    selected: Option<usize>,
}

impl InteractionGate {
    /// Creates an idle gate with autoplay not desired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Whether autoplay should come back after the user lets go. Distinct
    /// from whether a tick is pending: a drag pauses autoplay but keeps it
    /// desired.
    pub fn is_autoplay_desired(&self) -> bool {
        self.autoplay_desired
    }

    /// Records whether the caller wants autoplay.
    pub fn set_autoplay_desired(&mut self, desired: bool) {
        self.autoplay_desired = desired;
    }

    /// Handles a scroll state transition.
    ///
    /// Repeated notifications of the current state are ignored, and
    /// returning to `Idle` only resumes autoplay after a drag. A purely
    /// programmatic settle (an autoplay advance) has already re-armed its
    /// own tick.
    pub fn on_scroll_state_changed(&mut self, state: ScrollState) -> GateAction {
        let previous = mem::replace(&mut self.scroll_state, state);
        if previous == state {
            return GateAction::None;
        }
        match state {
            ScrollState::Dragging => {
                self.interrupted = true;
                GateAction::PauseAutoplay
            }
            ScrollState::Settling => GateAction::None,
            ScrollState::Idle => {
                if mem::take(&mut self.interrupted) && self.autoplay_desired {
                    GateAction::ResumeAutoplay
                } else {
                    GateAction::None
                }
            }
        }
    }

    /// Recomputes the selected page. Returns `true` when it changed and the
    /// indicator needs a redraw.
    pub fn on_page_selected(&mut self, position: DrivePosition, strategy: LoopStrategy) -> bool {
        let index = strategy.wrap(position);
        if index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    /// Currently selected real page.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Returns `true` while the user holds the pager.
    pub fn is_dragging(&self) -> bool {
        self.scroll_state == ScrollState::Dragging
    }

    /// Holds autoplay back until the current drag is released. Returns
    /// `false` when no drag is in progress and autoplay may be armed now.
    pub fn defer_until_release(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.interrupted = true;
        true
    }

    /// Forgets any in-flight gesture, e.g. after detaching from the host.
    pub fn reset_gesture(&mut self) {
        self.scroll_state = ScrollState::Idle;
        self.interrupted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_start_resumes_on_release() {
        let mut gate = InteractionGate::new();
        assert!(!gate.defer_until_release());

        gate.on_scroll_state_changed(ScrollState::Dragging);
        gate.set_autoplay_desired(true);
        assert!(gate.defer_until_release());
        assert!(gate.is_dragging());

        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Settling),
            GateAction::None
        );
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Idle),
            GateAction::ResumeAutoplay
        );
        assert!(!gate.defer_until_release());
    }

    fn desired_gate() -> InteractionGate {
        let mut gate = InteractionGate::new();
        gate.set_autoplay_desired(true);
        gate
    }

    #[test]
    fn drag_pauses_and_release_resumes_once() {
        let mut gate = desired_gate();

        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Dragging),
            GateAction::PauseAutoplay
        );
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Settling),
            GateAction::None
        );
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Idle),
            GateAction::ResumeAutoplay
        );
        assert_eq!(gate.on_scroll_state_changed(ScrollState::Idle), GateAction::None);
    }

    #[test]
    fn release_without_settle_resumes() {
        let mut gate = desired_gate();
        gate.on_scroll_state_changed(ScrollState::Dragging);
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Idle),
            GateAction::ResumeAutoplay
        );
    }

    #[test]
    fn regrab_while_settling_pauses_again() {
        let mut gate = desired_gate();
        gate.on_scroll_state_changed(ScrollState::Dragging);
        gate.on_scroll_state_changed(ScrollState::Settling);
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Dragging),
            GateAction::PauseAutoplay
        );
        gate.on_scroll_state_changed(ScrollState::Settling);
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Idle),
            GateAction::ResumeAutoplay
        );
    }

    #[test]
    fn programmatic_settle_does_not_resume() {
        let mut gate = desired_gate();
        assert_eq!(
            gate.on_scroll_state_changed(ScrollState::Settling),
            GateAction::None
        );
        assert_eq!(gate.on_scroll_state_changed(ScrollState::Idle), GateAction::None);
    }

    #[test]
    fn release_does_not_resume_undesired_autoplay() {
        let mut gate = InteractionGate::new();
        gate.on_scroll_state_changed(ScrollState::Dragging);
        assert_eq!(gate.on_scroll_state_changed(ScrollState::Idle), GateAction::None);
    }

    #[test]
    fn selection_reports_changes_only() {
        let mut gate = InteractionGate::new();
        let strategy = LoopStrategy::for_count(3);

        assert!(gate.on_page_selected(DrivePosition(6), strategy));
        assert_eq!(gate.selected_index(), Some(0));
        assert!(!gate.on_page_selected(DrivePosition(9), strategy));
        assert!(gate.on_page_selected(DrivePosition(10), strategy));
        assert_eq!(gate.selected_index(), Some(1));

        assert!(gate.on_page_selected(DrivePosition(10), LoopStrategy::Empty));
        assert_eq!(gate.selected_index(), None);
    }
}
