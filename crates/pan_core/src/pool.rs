//! Container pool
//!
//! Exactly three reusable containers laid out along the scroll axis. An
//! arbitrary-length page list is shown by remounting pages into these slots
//! as the committed index moves.

use smallvec::SmallVec;

use crate::axis::ScrollAxis;
use crate::config::LoopMode;
use crate::geometry::{EdgeInsets, Transform};
use crate::mapper::PanDirection;

/// Number of physical containers
pub const SLOT_COUNT: usize = 3;

/// Cyclic role of a container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Previous,
    Current,
    Next,
}

impl Slot {
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::Previous, Slot::Current, Slot::Next];

    pub fn index(self) -> usize {
        match self {
            Slot::Previous => 0,
            Slot::Current => 1,
            Slot::Next => 2,
        }
    }

    /// Virtual main-axis position of the container's origin
    pub fn position(self, extent: f32) -> f32 {
        self.index() as f32 * extent
    }
}

/// One physical container
///
/// `transform`, `alpha` and `z_index` are cosmetic and belong to the active
/// transition effect. The mounted page and the edge offset are owned by the
/// pager.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    page: Option<usize>,
    edge_offset: Transform,
    hidden: bool,
    /// Cosmetic transform, reset to identity before every effect update
    pub transform: Transform,
    pub alpha: f32,
    pub z_index: i32,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            page: None,
            edge_offset: Transform::IDENTITY,
            hidden: false,
            transform: Transform::IDENTITY,
            alpha: 1.0,
            z_index: 0,
        }
    }
}

impl Container {
    /// Index of the mounted page
    pub fn page(&self) -> Option<usize> {
        self.page
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Bounded-mode translation that parks an edge container off-canvas
    pub fn edge_offset(&self) -> Transform {
        self.edge_offset
    }

    /// Edge offset followed by the cosmetic transform
    pub fn effective_transform(&self) -> Transform {
        self.edge_offset.then(&self.transform)
    }

    /// Restore every cosmetic property
    pub fn reset_cosmetics(&mut self) {
        self.transform = Transform::IDENTITY;
        self.alpha = 1.0;
        self.z_index = 0;
    }
}

/// Slot changes produced by a mount
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MountChange {
    /// Page evicted from the target slot
    pub evicted: Option<usize>,
    /// Other slot the page was moved out of
    pub vacated: Option<Slot>,
}

/// Pool of the three containers
#[derive(Clone, Debug, Default)]
pub struct ContainerPool {
    containers: [Container; SLOT_COUNT],
}

impl ContainerPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn containers(&self) -> &[Container; SLOT_COUNT] {
        &self.containers
    }

    pub fn containers_mut(&mut self) -> &mut [Container; SLOT_COUNT] {
        &mut self.containers
    }

    pub fn get(&self, slot: Slot) -> &Container {
        &self.containers[slot.index()]
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut Container {
        &mut self.containers[slot.index()]
    }

    /// Page mounted in `slot`
    pub fn mounted(&self, slot: Slot) -> Option<usize> {
        self.get(slot).page
    }

    /// Slot holding `page`, if any
    pub fn slot_of(&self, page: usize) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.mounted(*slot) == Some(page))
    }

    /// Page indices per slot, in slot order
    pub fn page_map(&self) -> [Option<usize>; SLOT_COUNT] {
        Slot::ALL.map(|slot| self.mounted(slot))
    }

    /// Mount `page` into `slot`
    ///
    /// Mounting is single-parent: the slot's previous occupant is evicted and
    /// any other slot holding `page` is vacated.
    pub fn mount(&mut self, slot: Slot, page: usize) -> MountChange {
        let mut change = MountChange::default();
        if self.mounted(slot) == Some(page) {
            return change;
        }
        change.evicted = self.get_mut(slot).page.take();
        if let Some(other) = self.slot_of(page) {
            self.get_mut(other).page = None;
            change.vacated = Some(other);
        }
        self.get_mut(slot).page = Some(page);
        change
    }

    /// Clear `slot`, returning the page it held
    pub fn clear(&mut self, slot: Slot) -> Option<usize> {
        self.get_mut(slot).page.take()
    }

    /// Clear every slot, returning the slots that held a page
    pub fn clear_all(&mut self) -> SmallVec<[Slot; SLOT_COUNT]> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.clear(*slot).is_some())
            .collect()
    }

    pub fn set_hidden(&mut self, slot: Slot, hidden: bool) {
        self.get_mut(slot).hidden = hidden;
    }

    pub fn set_edge_offset(&mut self, slot: Slot, offset: Transform) {
        self.get_mut(slot).edge_offset = offset;
    }

    pub fn reset_transforms(&mut self) {
        for container in &mut self.containers {
            container.transform = Transform::IDENTITY;
        }
    }
}

/// Pages each slot should hold for a committed index
///
/// With more than two pages the neighbours wrap under `Loop`/`Bounded`; under
/// `None` the slot beyond a hard edge stays empty. With one or two pages only
/// the middle slot is assigned: two-page edges are mounted on demand during a
/// pan.
pub fn neighborhood(current: usize, count: usize, loop_mode: LoopMode) -> [Option<usize>; SLOT_COUNT] {
    if count == 0 {
        return [None; SLOT_COUNT];
    }
    if count <= 2 {
        return [None, Some(current), None];
    }
    let last = count - 1;
    let previous = if current > 0 {
        Some(current - 1)
    } else if loop_mode.wraps() {
        Some(last)
    } else {
        None
    };
    let next = if current < last {
        Some(current + 1)
    } else if loop_mode.wraps() {
        Some(0)
    } else {
        None
    };
    [previous, Some(current), next]
}

/// Insets and edge offsets for a committed index
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLayout {
    pub insets: EdgeInsets,
    pub previous_offset: Transform,
    pub next_offset: Transform,
}

/// Edge layout for a committed index
///
/// * single page: both directions pinned with a negative full-extent inset
/// * `Loop`: no insets, no offsets
/// * `None`: negative inset at a hard edge so the surface can only bounce
/// * `Bounded`: same insets as `None`, plus the wrapped edge container is
///   parked one extent further out until a pull releases it
pub fn edge_layout(
    current: usize,
    count: usize,
    loop_mode: LoopMode,
    axis: ScrollAxis,
    extent: f32,
) -> EdgeLayout {
    let mut layout = EdgeLayout {
        insets: EdgeInsets::ZERO,
        previous_offset: Transform::IDENTITY,
        next_offset: Transform::IDENTITY,
    };
    if count == 0 {
        return layout;
    }
    if count == 1 {
        axis.set_leading(&mut layout.insets, -extent);
        axis.set_trailing(&mut layout.insets, -extent);
        return layout;
    }

    let at_first = current == 0;
    let at_last = current == count - 1;
    match loop_mode {
        LoopMode::Loop => {}
        LoopMode::None | LoopMode::Bounded => {
            if at_first {
                axis.set_leading(&mut layout.insets, -extent);
            }
            if at_last {
                axis.set_trailing(&mut layout.insets, -extent);
            }
            if loop_mode == LoopMode::Bounded {
                if at_first {
                    layout.previous_offset = axis.translation(-extent);
                }
                if at_last {
                    layout.next_offset = axis.translation(extent);
                }
            }
        }
    }
    layout
}

/// Hidden flags `(previous, next)` for the edge containers
///
/// Under `None` the container beyond a hard edge is always hidden while the
/// pan moves toward it. With `hide_outside` set, edge containers are hidden
/// unless the pan moves toward them.
pub fn edge_visibility(
    direction: PanDirection,
    hide_outside: bool,
    loop_mode: LoopMode,
    current: usize,
    count: usize,
) -> (bool, bool) {
    let hard_first = loop_mode == LoopMode::None && current == 0;
    let hard_last = loop_mode == LoopMode::None && current + 1 == count;
    match direction {
        PanDirection::Center => (hide_outside, hide_outside),
        PanDirection::Previous => (hard_first, hide_outside),
        PanDirection::Next => (hide_outside, hard_last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighborhood_wraps_in_loop_modes() {
        assert_eq!(
            neighborhood(0, 5, LoopMode::Loop),
            [Some(4), Some(0), Some(1)]
        );
        assert_eq!(
            neighborhood(4, 5, LoopMode::Bounded),
            [Some(3), Some(4), Some(0)]
        );
        assert_eq!(
            neighborhood(2, 5, LoopMode::None),
            [Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn test_neighborhood_leaves_hard_edges_empty() {
        assert_eq!(neighborhood(0, 5, LoopMode::None), [None, Some(0), Some(1)]);
        assert_eq!(neighborhood(4, 5, LoopMode::None), [Some(3), Some(4), None]);
    }

    #[test]
    fn test_neighborhood_degenerate_counts() {
        assert_eq!(neighborhood(0, 0, LoopMode::Loop), [None, None, None]);
        assert_eq!(neighborhood(0, 1, LoopMode::Loop), [None, Some(0), None]);
        assert_eq!(neighborhood(1, 2, LoopMode::Loop), [None, Some(1), None]);
    }

    #[test]
    fn test_mount_is_single_parent() {
        let mut pool = ContainerPool::new();
        pool.mount(Slot::Previous, 1);
        pool.mount(Slot::Current, 2);

        let change = pool.mount(Slot::Current, 1);
        assert_eq!(change.evicted, Some(2));
        assert_eq!(change.vacated, Some(Slot::Previous));
        assert_eq!(pool.page_map(), [None, Some(1), None]);

        assert_eq!(pool.mount(Slot::Current, 1), MountChange::default());
    }

    #[test]
    fn test_remount_previous_neighborhood_in_slot_order() {
        // [1, 2, 3] -> [0, 1, 2] must not lose page 0 to the eviction chain
        let mut pool = ContainerPool::new();
        for (slot, page) in Slot::ALL.into_iter().zip([1, 2, 3]) {
            pool.mount(slot, page);
        }
        for (slot, page) in Slot::ALL.into_iter().zip([0, 1, 2]) {
            if pool.mounted(slot) != Some(page) {
                pool.mount(slot, page);
            }
        }
        assert_eq!(pool.page_map(), [Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_clear_all_reports_occupied_slots() {
        let mut pool = ContainerPool::new();
        pool.mount(Slot::Next, 3);
        let cleared = pool.clear_all();
        assert_eq!(cleared.as_slice(), &[Slot::Next]);
        assert_eq!(pool.page_map(), [None, None, None]);
    }

    #[test]
    fn test_edge_layout_single_page_pins_both_sides() {
        let layout = edge_layout(0, 1, LoopMode::Loop, ScrollAxis::Horizontal, 100.0);
        assert_eq!(layout.insets.left, -100.0);
        assert_eq!(layout.insets.right, -100.0);
    }

    #[test]
    fn test_edge_layout_per_loop_mode() {
        let axis = ScrollAxis::Horizontal;
        let looped = edge_layout(0, 5, LoopMode::Loop, axis, 100.0);
        assert_eq!(looped.insets, EdgeInsets::ZERO);

        let none = edge_layout(4, 5, LoopMode::None, axis, 100.0);
        assert_eq!(none.insets.right, -100.0);
        assert_eq!(none.insets.left, 0.0);
        assert!(none.next_offset.is_identity());

        let bounded = edge_layout(0, 5, LoopMode::Bounded, ScrollAxis::Vertical, 100.0);
        assert_eq!(bounded.insets.top, -100.0);
        assert_eq!(bounded.previous_offset, Transform::translation(0.0, -100.0));
        assert!(bounded.next_offset.is_identity());
    }

    #[test]
    fn test_effective_transform_applies_edge_offset() {
        let mut container = Container::default();
        container.edge_offset = Transform::translation(-100.0, 0.0);
        container.transform = Transform::scale(0.5, 0.5);
        let p = container
            .effective_transform()
            .transform_point(crate::geometry::Vec2::new(10.0, 10.0));
        assert_eq!(p, crate::geometry::Vec2::new(-95.0, 5.0));
    }

    #[test]
    fn test_edge_visibility() {
        use PanDirection::*;
        let none = LoopMode::None;
        assert_eq!(edge_visibility(Previous, false, none, 0, 5), (true, false));
        assert_eq!(edge_visibility(Next, false, none, 4, 5), (false, true));
        assert_eq!(edge_visibility(Next, false, LoopMode::Loop, 4, 5), (false, false));
        assert_eq!(edge_visibility(Center, true, none, 2, 5), (true, true));
        assert_eq!(edge_visibility(Previous, true, none, 2, 5), (false, true));
        assert_eq!(edge_visibility(Center, false, none, 0, 5), (false, false));
    }
}
