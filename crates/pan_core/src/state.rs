//! Paging state machine
//!
//! ```text
//!            DragBegan                 Settled
//!   AtRest ────────────▶ Panning ─────────────▶ AtRest
//!     │                    ▲
//!     │ JumpStarted        │ DragBegan
//!     ▼                    │
//!   Jumping ───────────────┴──── Settled ─────▶ AtRest
//! ```
//!
//! A settle while already at rest is not a transition, which is what makes
//! the settle path idempotent.

/// Paging state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PagingState {
    /// Viewport rests on the committed page
    #[default]
    AtRest,
    /// The user is dragging, or the surface is decelerating after a drag
    Panning,
    /// A programmatic animated jump is in flight
    Jumping,
}

/// Inputs to the paging state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PagingEvent {
    /// The user started dragging the surface
    DragBegan,
    /// An animated jump was requested
    JumpStarted,
    /// Drag ended without momentum, deceleration ended, or the jump animation
    /// completed
    Settled,
}

impl PagingState {
    /// Handle an event and return the new state, or None if no transition
    pub fn on_event(&self, event: PagingEvent) -> Option<Self> {
        use PagingEvent::*;

        match (self, event) {
            (PagingState::AtRest, DragBegan) => Some(PagingState::Panning),
            (PagingState::AtRest, JumpStarted) => Some(PagingState::Jumping),

            // A drag interrupts the jump animation and takes over
            (PagingState::Jumping, DragBegan) => Some(PagingState::Panning),

            (PagingState::Panning, Settled) => Some(PagingState::AtRest),
            (PagingState::Jumping, Settled) => Some(PagingState::AtRest),

            _ => None,
        }
    }

    /// Returns true while an animated jump is in flight
    pub fn is_jumping(&self) -> bool {
        matches!(self, PagingState::Jumping)
    }

    /// Returns true when no pan or jump is in progress
    pub fn is_at_rest(&self) -> bool {
        matches!(self, PagingState::AtRest)
    }
}
