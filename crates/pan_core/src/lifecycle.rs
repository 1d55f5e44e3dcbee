//! Page lifecycle notifications
//!
//! Each page's position relative to the viewport is classified into a
//! [`ViewStatus`]. Comparing the previous status with the new one yields an
//! ordered list of enter/exit callbacks for pages that implement
//! [`PageLifecycle`].

use serde::Serialize;
use smallvec::{smallvec, SmallVec};

/// Positions within this distance (px) count as exactly aligned
const ALIGN_EPSILON: f32 = 1e-3;

/// Where a page sits relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// Not mounted, or more than one extent away
    #[default]
    Out,
    /// Exactly one extent before the viewport
    Previous,
    /// Partially visible, entering/leaving on the previous side
    PreviousIn,
    /// Exactly aligned with the viewport
    Center,
    /// Partially visible, entering/leaving on the next side
    NextIn,
    /// Exactly one extent after the viewport
    Next,
}

impl ViewStatus {
    /// Classify a container whose origin is `x` relative to the viewport
    pub fn from_position(x: f32, extent: f32) -> Self {
        if (x + extent).abs() <= ALIGN_EPSILON {
            ViewStatus::Previous
        } else if x.abs() <= ALIGN_EPSILON {
            ViewStatus::Center
        } else if (x - extent).abs() <= ALIGN_EPSILON {
            ViewStatus::Next
        } else if x < -extent {
            ViewStatus::Out
        } else if x < 0.0 {
            ViewStatus::PreviousIn
        } else if x < extent {
            ViewStatus::NextIn
        } else {
            ViewStatus::Out
        }
    }

    /// Fully outside the viewport (including exactly adjacent)
    pub fn is_outside(&self) -> bool {
        matches!(
            self,
            ViewStatus::Out | ViewStatus::Previous | ViewStatus::Next
        )
    }
}

/// Side a page enters from or leaves toward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
    /// The transition happened in a single step
    None,
}

/// A single lifecycle callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "direction")]
pub enum LifecycleEvent {
    WillEnter(Direction),
    DidEnter(Direction),
    WillExit(Direction),
    DidExit(Direction),
}

/// Optional lifecycle capability of a page
///
/// All callbacks default to no-ops.
pub trait PageLifecycle {
    fn will_enter(&mut self, _from: Direction) {}
    fn did_enter(&mut self, _from: Direction) {}
    fn will_exit(&mut self, _to: Direction) {}
    fn did_exit(&mut self, _to: Direction) {}
}

impl LifecycleEvent {
    /// Invoke the matching callback on `page`
    pub fn dispatch<P: PageLifecycle + ?Sized>(self, page: &mut P) {
        match self {
            LifecycleEvent::WillEnter(from) => page.will_enter(from),
            LifecycleEvent::DidEnter(from) => page.did_enter(from),
            LifecycleEvent::WillExit(to) => page.will_exit(to),
            LifecycleEvent::DidExit(to) => page.did_exit(to),
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, LifecycleEvent::WillExit(_) | LifecycleEvent::DidExit(_))
    }
}

/// Callbacks owed for a status change, in emission order
pub fn transition(old: ViewStatus, new: ViewStatus) -> SmallVec<[LifecycleEvent; 2]> {
    use LifecycleEvent::*;
    use ViewStatus as S;

    match (old, new) {
        (S::Center, S::Center) => smallvec![],
        (S::Center, S::PreviousIn) => smallvec![WillExit(Direction::Previous)],
        (S::Center, S::NextIn) => smallvec![WillExit(Direction::Next)],
        (S::Center, _) => smallvec![WillExit(Direction::None), DidExit(Direction::None)],

        (S::PreviousIn, S::Center) => smallvec![DidEnter(Direction::Previous)],
        (S::PreviousIn, n) if n.is_outside() => smallvec![DidExit(Direction::Previous)],
        (S::NextIn, S::Center) => smallvec![DidEnter(Direction::Next)],
        (S::NextIn, n) if n.is_outside() => smallvec![DidExit(Direction::Next)],
        (S::PreviousIn | S::NextIn, _) => smallvec![],

        (_, S::PreviousIn) => smallvec![WillEnter(Direction::Previous)],
        (_, S::NextIn) => smallvec![WillEnter(Direction::Next)],
        (_, S::Center) => smallvec![WillEnter(Direction::None), DidEnter(Direction::None)],
        _ => smallvec![],
    }
}

/// Last known status of every page
#[derive(Clone, Debug, Default)]
pub struct LifecycleTracker {
    statuses: Vec<ViewStatus>,
}

impl LifecycleTracker {
    pub fn new(count: usize) -> Self {
        Self {
            statuses: vec![ViewStatus::Out; count],
        }
    }

    /// Forget every status (page list replaced)
    pub fn reset(&mut self, count: usize) {
        self.statuses.clear();
        self.statuses.resize(count, ViewStatus::Out);
    }

    pub fn status(&self, page: usize) -> ViewStatus {
        self.statuses.get(page).copied().unwrap_or_default()
    }

    pub fn statuses(&self) -> &[ViewStatus] {
        &self.statuses
    }

    /// Record the new status of `page` and return the callbacks it owes
    pub fn update(&mut self, page: usize, new: ViewStatus) -> SmallVec<[LifecycleEvent; 2]> {
        let Some(slot) = self.statuses.get_mut(page) else {
            return SmallVec::new();
        };
        let old = std::mem::replace(slot, new);
        transition(old, new)
    }

    /// Record the new status of `page` without emitting anything
    pub fn seed(&mut self, page: usize, new: ViewStatus) {
        if let Some(slot) = self.statuses.get_mut(page) {
            *slot = new;
        }
    }
}
