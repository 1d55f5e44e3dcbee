//! Simulated scroll surface
//!
//! [`SimSurface`] behaves like a paging scroll view: it tracks a finger,
//! applies rubber-band resistance beyond its content bounds, snaps to the
//! nearest container on release and runs programmatic scroll animations.
//! Notifications are queued and drained by the caller, one frame at a time.

use std::collections::VecDeque;

use pan_animation::{Easing, Spring, SpringConfig, Tween};
use pan_core::{
    Container, EdgeInsets, NotificationGate, PanSurface, ScrollAxis, Size, Slot, SurfaceEvent,
    Transform, Vec2, SLOT_COUNT,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tunables of the simulated surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Viewport size in points
    pub viewport: Size,
    /// Duration (s) of the snap to the nearest page after a release
    pub snap_duration: f32,
    /// Duration (s) of a programmatic animated scroll
    pub scroll_duration: f32,
    pub easing: Easing,
    /// Fraction of finger movement applied beyond the content bounds
    pub rubber_band: f32,
    /// Maximum overscroll, as a fraction of the extent
    pub max_overscroll: f32,
    /// Seconds of release velocity projected when choosing the snap page
    pub fling_projection: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(320.0, 480.0),
            snap_duration: 0.25,
            scroll_duration: 0.3,
            easing: Easing::EaseOutCubic,
            rubber_band: 0.5,
            max_overscroll: 0.5,
            fling_projection: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Motion {
    /// Snapping to a page after the finger lifted
    Snap(Tween),
    /// Springing back from an overscroll
    Bounce(Spring),
    /// `set_content_offset(_, animated: true)`
    Scroll(Tween),
}

impl Motion {
    fn advance(&mut self, dt: f32) -> (f32, bool) {
        match self {
            Motion::Snap(tween) | Motion::Scroll(tween) => {
                let value = tween.advance(dt);
                (value, tween.is_done())
            }
            Motion::Bounce(spring) => {
                spring.step(dt);
                if spring.is_settled() {
                    (spring.target(), true)
                } else {
                    (spring.value(), false)
                }
            }
        }
    }

    fn shift(&mut self, delta: f32) {
        match self {
            Motion::Snap(tween) | Motion::Scroll(tween) => tween.shift(delta),
            Motion::Bounce(spring) => spring.shift(delta),
        }
    }

    fn end_event(&self) -> SurfaceEvent {
        match self {
            Motion::Snap(_) | Motion::Bounce(_) => SurfaceEvent::DecelerationEnded,
            Motion::Scroll(_) => SurfaceEvent::ScrollAnimationEnded,
        }
    }
}

const BOUNCE_STIFFNESS: f32 = 300.0;

/// Container edge transform animation requested by the pager
#[derive(Clone, Copy, Debug)]
struct EdgeAnimation {
    from: Transform,
    to: Transform,
    tween: Tween,
}

/// A recorded `animate_container` request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerAnimation {
    pub slot: Slot,
    pub transform: Transform,
    pub duration: f32,
}

/// Headless paging scroll view hosting views of type `V`
#[derive(Debug)]
pub struct SimSurface<V> {
    config: SimConfig,
    axis: ScrollAxis,
    offset: Vec2,
    insets: EdgeInsets,
    tracking: bool,
    slots: [Option<V>; SLOT_COUNT],
    presented: [Container; SLOT_COUNT],
    edges: [Option<EdgeAnimation>; SLOT_COUNT],
    edge_transforms: [Transform; SLOT_COUNT],
    container_animations: Vec<ContainerAnimation>,
    motion: Option<Motion>,
    gate: NotificationGate,
    outbox: VecDeque<SurfaceEvent>,
    mounts: usize,
}

impl<V: Clone> SimSurface<V> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            axis: ScrollAxis::default(),
            offset: Vec2::ZERO,
            insets: EdgeInsets::ZERO,
            tracking: false,
            slots: [None, None, None],
            presented: Default::default(),
            edges: [None; SLOT_COUNT],
            edge_transforms: [Transform::IDENTITY; SLOT_COUNT],
            container_animations: Vec::new(),
            motion: None,
            gate: NotificationGate::new(),
            outbox: VecDeque::new(),
            mounts: 0,
        }
    }

    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self::new(SimConfig {
            viewport: Size::new(width, height),
            ..SimConfig::default()
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Main-axis offset
    pub fn offset(&self) -> f32 {
        self.axis.main(self.offset)
    }

    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }

    pub fn extent(&self) -> f32 {
        self.axis.extent(self.config.viewport)
    }

    /// View mounted in `slot`
    pub fn mounted(&self, slot: Slot) -> Option<&V> {
        self.slots[slot.index()].as_ref()
    }

    /// Mounted views in slot order
    pub fn mounted_views(&self) -> [Option<&V>; SLOT_COUNT] {
        Slot::ALL.map(|slot| self.mounted(slot))
    }

    /// Number of `mount` calls so far
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    /// Container state from the last `present`
    pub fn presented(&self) -> &[Container; SLOT_COUNT] {
        &self.presented
    }

    /// Edge transform currently on screen for `slot`, including animations
    pub fn edge_transform(&self, slot: Slot) -> Transform {
        self.edge_transforms[slot.index()]
    }

    /// Every `animate_container` request so far
    pub fn container_animations(&self) -> &[ContainerAnimation] {
        &self.container_animations
    }

    /// No finger, no motion, nothing queued
    pub fn is_idle(&self) -> bool {
        !self.tracking
            && self.motion.is_none()
            && self.outbox.is_empty()
            && self.edges.iter().all(Option::is_none)
    }

    pub fn poll_event(&mut self) -> Option<SurfaceEvent> {
        self.outbox.pop_front()
    }

    /// Resize the viewport; the pager must be told through `layout_changed`
    pub fn resize(&mut self, viewport: Size) {
        self.config.viewport = viewport;
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Finger down
    pub fn begin_drag(&mut self) {
        if self.motion.take().is_some() {
            trace!("motion interrupted by drag");
        }
        self.tracking = true;
        self.outbox.push_back(SurfaceEvent::DragWillBegin);
    }

    /// Finger moved by `delta` along the main axis (content offset change)
    pub fn drag_by(&mut self, delta: f32) {
        if !self.tracking {
            return;
        }
        let (min, max) = self.bounds();
        let current = self.offset();
        let proposed = current + delta;
        let next = if proposed < min || proposed > max {
            let resisted = current + delta * self.config.rubber_band;
            let slack = self.extent() * self.config.max_overscroll;
            resisted.clamp(min - slack, max + slack)
        } else {
            proposed
        };
        self.write_offset(next);
    }

    /// Finger up with a main-axis velocity (points per second)
    pub fn end_drag(&mut self, velocity: f32) {
        if !self.tracking {
            return;
        }
        self.tracking = false;

        let extent = self.extent();
        let (min, max) = self.bounds();
        let current = self.offset();
        let projected = current + velocity * self.config.fling_projection;
        let page = if extent > 0.0 {
            (projected / extent).round().clamp(0.0, 2.0)
        } else {
            1.0
        };
        let target = (page * extent).clamp(min, max.max(min));

        if (target - current).abs() <= f32::EPSILON {
            self.outbox
                .push_back(SurfaceEvent::DragWillEnd { will_decelerate: false });
            return;
        }
        self.outbox
            .push_back(SurfaceEvent::DragWillEnd { will_decelerate: true });
        let overscrolled = current < min || current > max;
        self.motion = Some(if overscrolled {
            let mut spring = Spring::new(SpringConfig::critical(BOUNCE_STIFFNESS), current);
            spring.set_target(target);
            Motion::Bounce(spring)
        } else {
            Motion::Snap(Tween::new(
                current,
                target,
                self.config.snap_duration,
                self.config.easing,
            ))
        });
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance animations by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if let Some(mut motion) = self.motion.take() {
            let (value, done) = motion.advance(dt);
            self.write_offset(value);
            if done {
                self.outbox.push_back(motion.end_event());
            } else {
                self.motion = Some(motion);
            }
        }

        for index in 0..SLOT_COUNT {
            let Some(mut edge) = self.edges[index].take() else {
                continue;
            };
            edge.tween.advance(dt);
            self.edge_transforms[index] = edge.from.lerp(&edge.to, edge.tween.sample());
            if !edge.tween.is_done() {
                self.edges[index] = Some(edge);
            }
        }
    }

    fn bounds(&self) -> (f32, f32) {
        let extent = self.extent();
        let min = -self.axis.leading(self.insets);
        let max = 2.0 * extent + self.axis.trailing(self.insets);
        (min, max)
    }

    fn write_offset(&mut self, main: f32) {
        self.offset = self.axis.vec(main);
        if self.gate.is_open() {
            self.outbox.push_back(SurfaceEvent::OffsetChanged);
        }
    }
}

impl<V: Clone> PanSurface for SimSurface<V> {
    type View = V;

    fn content_offset(&self) -> Vec2 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Vec2, animated: bool) {
        let target = self.axis.main(offset);
        if animated {
            let from = self.offset();
            self.motion = Some(Motion::Scroll(Tween::new(
                from,
                target,
                self.config.scroll_duration,
                self.config.easing,
            )));
            return;
        }
        let delta = target - self.offset();
        if let Some(motion) = self.motion.as_mut() {
            motion.shift(delta);
        }
        self.write_offset(target);
    }

    fn viewport_size(&self) -> Size {
        self.config.viewport
    }

    fn content_insets(&self) -> EdgeInsets {
        self.insets
    }

    fn set_content_insets(&mut self, insets: EdgeInsets) {
        self.insets = insets;
    }

    fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn mount(&mut self, slot: Slot, view: &V) {
        self.slots[slot.index()] = Some(view.clone());
        self.mounts += 1;
    }

    fn unmount(&mut self, slot: Slot) {
        self.slots[slot.index()] = None;
    }

    fn animate_container(&mut self, slot: Slot, transform: Transform, duration: f32) {
        self.container_animations.push(ContainerAnimation {
            slot,
            transform,
            duration,
        });
        let index = slot.index();
        self.edges[index] = Some(EdgeAnimation {
            from: self.edge_transforms[index],
            to: transform,
            tween: Tween::new(0.0, 1.0, duration, Easing::EaseOutCubic),
        });
    }

    fn layout_containers(&mut self, axis: ScrollAxis) {
        self.axis = axis;
        self.edges = [None; SLOT_COUNT];
    }

    fn attach(&mut self, gate: NotificationGate) {
        self.gate = gate;
    }

    fn present(&mut self, containers: &[Container; SLOT_COUNT]) {
        for (index, container) in containers.iter().enumerate() {
            if self.edges[index].is_none() {
                self.edge_transforms[index] = container.edge_offset();
            }
        }
        self.presented = containers.clone();
    }
}
