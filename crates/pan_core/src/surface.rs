//! Host surface contract
//!
//! The pager does not render, lay out or animate anything itself. The host
//! provides a scroll surface holding three containers and reports gestures
//! and animation completions back as [`SurfaceEvent`]s.

use std::cell::Cell;
use std::rc::Rc;

use crate::axis::ScrollAxis;
use crate::geometry::{EdgeInsets, Size, Transform, Vec2};
use crate::pool::{Container, Slot, SLOT_COUNT};

/// Notifications from the scroll surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    /// The user is about to drag
    DragWillBegin,
    /// The content offset changed
    OffsetChanged,
    /// The user lifted their finger
    DragWillEnd {
        /// The surface keeps moving (momentum/paging snap)
        will_decelerate: bool,
    },
    /// Momentum scrolling finished
    DecelerationEnded,
    /// A programmatic animated offset change finished
    ScrollAnimationEnded,
}

/// Scroll surface and container host
///
/// Implementations must not report [`SurfaceEvent::OffsetChanged`] for offset
/// writes made while the attached [`NotificationGate`] is closed.
pub trait PanSurface {
    /// Host view type mounted into containers
    type View;

    fn content_offset(&self) -> Vec2;

    /// Move the content offset; an animated change reports
    /// [`SurfaceEvent::ScrollAnimationEnded`] when it completes
    fn set_content_offset(&mut self, offset: Vec2, animated: bool);

    fn viewport_size(&self) -> Size;

    fn content_insets(&self) -> EdgeInsets;

    fn set_content_insets(&mut self, insets: EdgeInsets);

    /// The user's finger is down and driving the surface
    fn is_tracking(&self) -> bool;

    /// Mount `view` into the container at `slot`, filling it
    fn mount(&mut self, slot: Slot, view: &Self::View);

    /// Remove whatever view the container at `slot` holds
    fn unmount(&mut self, slot: Slot);

    /// Animate a container's edge transform over `duration` seconds
    fn animate_container(&mut self, _slot: Slot, _transform: Transform, _duration: f32) {}

    /// Lay the three containers out along `axis`
    fn layout_containers(&mut self, _axis: ScrollAxis) {}

    /// Receive the gate that guards offset notifications
    fn attach(&mut self, _gate: NotificationGate) {}

    /// Container state after an update, for rendering
    fn present(&mut self, _containers: &[Container; SLOT_COUNT]) {}
}

/// Shared switch that detaches offset notifications
///
/// Single-threaded: clones share one counter.
#[derive(Clone, Debug, Default)]
pub struct NotificationGate {
    depth: Rc<Cell<u32>>,
}

impl NotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset notifications should be delivered
    pub fn is_open(&self) -> bool {
        self.depth.get() == 0
    }

    /// Close the gate until the returned guard is dropped
    pub fn suppress(&self) -> SuppressGuard {
        self.depth.set(self.depth.get() + 1);
        SuppressGuard {
            depth: Rc::clone(&self.depth),
        }
    }
}

/// Keeps a [`NotificationGate`] closed while alive
#[must_use = "notifications resume as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SuppressGuard {
    depth: Rc<Cell<u32>>,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
