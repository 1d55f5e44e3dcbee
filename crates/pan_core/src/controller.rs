//! Paging controller
//!
//! [`PanController`] ties the pieces together. The host forwards
//! [`SurfaceEvent`]s; every offset change runs the mapper, flips the
//! committed index when the viewport passes a neighbouring container,
//! re-centres the offset, remounts the neighbourhood and then notifies the
//! transition effect, the delegate and lifecycle-aware pages.
//!
//! All mutation is synchronous. Offset writes made by the controller happen
//! with the [`NotificationGate`] closed so they are never processed twice.

use tracing::{debug, trace, warn};

use crate::axis::ScrollAxis;
use crate::config::{LoopMode, PanConfig};
use crate::delegate::PanDelegate;
use crate::error::{PanError, Result};
use crate::geometry::Transform;
use crate::jump::choose_jump_slot;
use crate::lifecycle::{LifecycleEvent, LifecycleTracker, ViewStatus};
use crate::mapper::{map_offset, panning_direction, MapperInput, PanDirection};
use crate::page::Page;
use crate::pool::{edge_layout, edge_visibility, neighborhood, Container, ContainerPool, Slot, SLOT_COUNT};
use crate::state::{PagingEvent, PagingState};
use crate::surface::{NotificationGate, PanSurface, SurfaceEvent};
use crate::transformer::{TransitionFrame, Transformer};

/// A settled offset further than this (px) from the middle slot is snapped back
const RECENTER_TOLERANCE: f32 = 1e-3;

/// Three-slot pager driving a host [`PanSurface`]
pub struct PanController<S: PanSurface> {
    surface: S,
    config: PanConfig,
    pages: Vec<Page<S::View>>,
    pool: ContainerPool,
    lifecycle: LifecycleTracker,
    state: PagingState,
    /// Committed page
    current: usize,
    /// Page at the start of the pan or jump in progress
    recent: usize,
    /// Page the pan or jump is moving toward
    target: usize,
    delegate: Option<Box<dyn PanDelegate>>,
    transformer: Option<Box<dyn Transformer>>,
    gate: NotificationGate,
}

impl<S: PanSurface> PanController<S> {
    /// Attach to `surface` with an empty page list
    pub fn new(surface: S, config: PanConfig) -> Self {
        let mut controller = Self {
            surface,
            config: config.validated(),
            pages: Vec::new(),
            pool: ContainerPool::new(),
            lifecycle: LifecycleTracker::default(),
            state: PagingState::AtRest,
            current: 0,
            recent: 0,
            target: 0,
            delegate: None,
            transformer: None,
            gate: NotificationGate::new(),
        };
        controller.surface.attach(controller.gate.clone());
        controller.surface.layout_containers(controller.config.axis);
        controller.recenter();
        controller.offset_changed(true);
        controller
    }

    /// Attach to `surface` and install `pages`
    pub fn with_pages(surface: S, config: PanConfig, pages: Vec<Page<S::View>>) -> Self {
        let mut controller = Self::new(surface, config);
        controller.set_pages(pages);
        controller
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Committed page index
    pub fn index(&self) -> usize {
        self.current
    }

    /// Page index at the start of the pan or jump in progress
    pub fn recent_index(&self) -> usize {
        self.recent
    }

    /// Page index the pan or jump is moving toward
    pub fn target_index(&self) -> usize {
        self.target
    }

    pub fn count(&self) -> usize {
        self.pages.len()
    }

    pub fn state(&self) -> PagingState {
        self.state
    }

    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping()
    }

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn pages(&self) -> &[Page<S::View>] {
        &self.pages
    }

    pub fn containers(&self) -> &[Container; SLOT_COUNT] {
        self.pool.containers()
    }

    /// Page mounted in each slot, in slot order
    pub fn page_map(&self) -> [Option<usize>; SLOT_COUNT] {
        self.pool.page_map()
    }

    /// Last computed visibility status of `page`
    pub fn view_status(&self, page: usize) -> ViewStatus {
        self.lifecycle.status(page)
    }

    /// Gate shared with the surface
    pub fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the page list
    ///
    /// Pages that cannot resolve to a view are dropped with a warning. All
    /// derived state is rebuilt; the committed index survives unless it is
    /// now out of range.
    pub fn set_pages(&mut self, pages: Vec<Page<S::View>>) {
        let mut kept = Vec::with_capacity(pages.len());
        for (index, page) in pages.into_iter().enumerate() {
            if page.view().is_none() {
                warn!(index, "page has no displayable view, dropped");
                continue;
            }
            kept.push(page);
        }

        for slot in self.pool.clear_all() {
            self.surface.unmount(slot);
        }
        self.pages = kept;
        self.lifecycle.reset(self.pages.len());
        if self.pages.is_empty() {
            self.current = 0;
            self.recent = 0;
            self.target = 0;
        }
        debug!(count = self.pages.len(), "page list replaced");

        self.rebuild_containers();
        self.offset_changed(true);
    }

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        if self.config.loop_mode == loop_mode {
            return;
        }
        self.config.loop_mode = loop_mode;
        self.rebuild_containers();
        self.offset_changed(true);
    }

    /// Switch the scroll axis, rebuilding the container strip
    pub fn set_axis(&mut self, axis: ScrollAxis) {
        if self.config.axis == axis {
            return;
        }
        let mut insets = self.surface.content_insets();
        self.config.axis.set_leading(&mut insets, 0.0);
        self.config.axis.set_trailing(&mut insets, 0.0);
        self.surface.set_content_insets(insets);

        for slot in self.pool.clear_all() {
            self.surface.unmount(slot);
        }
        self.config.axis = axis;
        self.surface.layout_containers(axis);
        debug!(?axis, "scroll axis changed");

        self.rebuild_containers();
        self.recenter();
        self.offset_changed(true);
    }

    pub fn set_hide_outside_views(&mut self, hide: bool) {
        self.config.hide_outside_views = hide;
        self.offset_changed(true);
    }

    pub fn set_pulling_threshold(&mut self, threshold: f32) {
        self.config = PanConfig {
            pulling_threshold: threshold,
            ..self.config
        }
        .validated();
    }

    /// Apply a whole configuration at once
    pub fn reconfigure(&mut self, config: PanConfig) {
        let config = config.validated();
        self.set_axis(config.axis);
        self.config = config;
        self.rebuild_containers();
        self.offset_changed(true);
    }

    pub fn set_delegate(&mut self, delegate: Option<Box<dyn PanDelegate>>) {
        self.delegate = delegate;
    }

    /// Replace the transition effect
    ///
    /// The outgoing effect tears down first, then the new one is applied to
    /// the current offset.
    pub fn set_transformer(&mut self, transformer: Option<Box<dyn Transformer>>) {
        if let Some(mut old) = self.transformer.take() {
            old.teardown(self.pool.containers_mut());
        }
        self.transformer = transformer;
        self.offset_changed(true);
    }

    // =========================================================================
    // Host notifications
    // =========================================================================

    /// Process a notification from the scroll surface
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::DragWillBegin => self.begin_panning(),
            SurfaceEvent::OffsetChanged => {
                if self.gate.is_open() {
                    self.offset_changed(false);
                }
            }
            SurfaceEvent::DragWillEnd { will_decelerate } => {
                if !will_decelerate {
                    self.settle();
                }
            }
            SurfaceEvent::DecelerationEnded | SurfaceEvent::ScrollAnimationEnded => self.settle(),
        }
    }

    /// The viewport was resized
    pub fn layout_changed(&mut self) {
        if self.state.is_jumping() {
            return;
        }
        self.rebuild_containers();
        self.recenter();
        self.offset_changed(true);
    }

    /// The pager became visible: record statuses without callbacks
    pub fn did_appear(&mut self) {
        for page in 0..self.pages.len() {
            let status = self.compute_status(page);
            self.lifecycle.seed(page, status);
        }
    }

    // =========================================================================
    // Jumps
    // =========================================================================

    /// Navigate to `index`
    ///
    /// An out-of-range index is ignored. An animated jump pre-mounts the
    /// destination into an edge container and scrolls to it; the jump
    /// completes when the host reports the end of that animation.
    pub fn jump_to(&mut self, index: usize, animated: bool) -> Result<()> {
        let count = self.pages.len();
        if index >= count {
            warn!(index, count, "jump target out of range, ignored");
            return Err(PanError::IndexOutOfRange { index, count });
        }
        if self.state.is_jumping() {
            warn!(index, "jump already in flight, request rejected");
            return Err(PanError::JumpInProgress);
        }
        if !animated {
            self.jump_immediately(index);
            return Ok(());
        }
        if !self.state.is_at_rest() {
            warn!(index, state = ?self.state, "animated jump rejected while busy");
            return Err(PanError::Busy(self.state));
        }
        if index == self.current {
            return Ok(());
        }

        let slot = choose_jump_slot(self.current, index, count, self.config.loop_mode);
        debug!(from = self.current, to = index, ?slot, "animated jump");
        self.mount_page(slot, index);
        self.target = index;
        if let Some(next) = self.state.on_event(PagingEvent::JumpStarted) {
            self.state = next;
        }
        self.recent = self.current;
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_start_panning(self.recent);
        }
        self.refresh_lifecycle();

        let destination = self.config.axis.vec(slot.position(self.extent()));
        self.surface.set_content_offset(destination, true);
        Ok(())
    }

    fn jump_immediately(&mut self, index: usize) {
        let from = self.current;
        self.current = index;
        self.target = index;
        self.recent = index;
        if from != index {
            debug!(from, to = index, "jumped");
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_page(from, index);
            }
        }
        let swapped = self.rebuild_containers();
        self.recenter();
        if swapped {
            self.apply_settled_frame();
        }
        self.refresh_lifecycle();
        self.present();
    }

    // =========================================================================
    // State machine
    // =========================================================================

    fn begin_panning(&mut self) {
        if let Some(next) = self.state.on_event(PagingEvent::DragBegan) {
            if self.state.is_jumping() {
                // The pre-mounted jump page does not belong to a drag
                debug!(target = self.target, "jump interrupted by drag");
                self.target = self.current;
                if self.rebuild_containers() {
                    self.apply_settled_frame();
                }
            } else {
                self.recent = self.current;
            }
            self.state = next;
        } else if self.state == PagingState::Panning && self.recent != self.current {
            // Grabbed again mid-deceleration after a flip: close the finished leg
            debug!(from = self.recent, to = self.current, "regrabbed after flip");
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_stop_panning(self.recent, self.current);
                delegate.did_page(self.recent, self.current);
            }
            self.recent = self.current;
        }
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_start_panning(self.recent);
        }
    }

    fn settle(&mut self) {
        if let Some(next) = self.state.on_event(PagingEvent::Settled) {
            self.state = next;
            debug!(from = self.recent, to = self.current, "settled");
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_stop_panning(self.recent, self.current);
                if self.recent != self.current {
                    delegate.did_page(self.recent, self.current);
                }
            }
        }

        let swapped = self.rebuild_containers();
        if (self.main_offset() - self.extent()).abs() > RECENTER_TOLERANCE {
            self.recenter();
        }
        if swapped {
            self.apply_settled_frame();
        }
        self.refresh_lifecycle();
        self.recent = self.current;
        self.target = self.current;
        self.present();
    }

    fn offset_changed(&mut self, ignore_delegate: bool) {
        let _quiet = self.gate.suppress();

        let extent = self.extent();
        let count = self.pages.len();
        if count == 0 || extent <= 0.0 || !extent.is_finite() {
            self.present();
            return;
        }

        self.pool.reset_transforms();

        let offset = self.main_offset();
        let from = self.current;
        let mapping = map_offset(MapperInput {
            offset,
            extent,
            loop_mode: self.config.loop_mode,
            count,
            current: self.current,
            target: self.target,
            jumping: self.state.is_jumping(),
        });
        self.target = mapping.target;
        trace!(
            offset,
            progress = mapping.progress,
            target = mapping.target,
            "offset mapped"
        );

        if let Some(transformer) = self.transformer.as_mut() {
            let frame = TransitionFrame {
                from,
                to: mapping.target,
                progress: mapping.progress,
                direction: mapping.direction,
                axis: self.config.axis,
                extent,
            };
            transformer.update(self.pool.containers_mut(), &frame);
        }

        if count == 2 && self.target != self.current {
            self.mount_travel_edge(mapping.direction);
        }

        let mut swapped = false;
        if count > 1 && self.target != self.current {
            if offset <= 0.0 {
                swapped = self.flip(offset + extent);
            } else if offset >= 2.0 * extent {
                swapped = self.flip(offset - extent);
            }
        }
        if !swapped
            && self.config.loop_mode == LoopMode::Bounded
            && mapping.beyond_bound
            && mapping.progress >= self.config.pulling_threshold
            && self.surface.is_tracking()
        {
            self.pull_at_bounds(mapping.direction);
        }

        if !ignore_delegate {
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_change_panning(from, mapping.target, mapping.progress);
            }
        }

        self.refresh_lifecycle();

        if swapped {
            self.apply_settled_frame();
        }
        self.apply_visibility();
        self.present();
    }

    /// Commit the target and move the viewport back onto the middle slot
    fn flip(&mut self, offset: f32) -> bool {
        debug!(from = self.current, to = self.target, "page flipped");
        self.current = self.target;
        let offset = self.config.axis.vec(offset);
        self.surface.set_content_offset(offset, false);
        self.rebuild_containers();
        true
    }

    /// Bounded mode: accept the wrap at an edge
    fn pull_at_bounds(&mut self, direction: PanDirection) {
        let slot = match direction {
            PanDirection::Previous => Slot::Previous,
            PanDirection::Next => Slot::Next,
            PanDirection::Center => return,
        };
        if self.pool.get(slot).edge_offset().is_identity() {
            return;
        }
        debug!(?slot, "edge released");
        self.surface.animate_container(
            slot,
            Transform::IDENTITY,
            self.config.pull_animation_duration,
        );
        self.pool.set_edge_offset(slot, Transform::IDENTITY);

        let axis = self.config.axis;
        let mut insets = self.surface.content_insets();
        match slot {
            Slot::Previous => axis.set_leading(&mut insets, 0.0),
            _ => axis.set_trailing(&mut insets, 0.0),
        }
        self.surface.set_content_insets(insets);
    }

    /// Two pages: mount the target into the edge slot being revealed
    fn mount_travel_edge(&mut self, direction: PanDirection) {
        let slot = match direction {
            PanDirection::Previous => Slot::Previous,
            PanDirection::Next => Slot::Next,
            PanDirection::Center => return,
        };
        if self.pool.mounted(slot) != Some(self.target) {
            self.mount_page(slot, self.target);
        }
    }

    // =========================================================================
    // Containers
    // =========================================================================

    /// Mount the neighbourhood of the committed index
    ///
    /// Returns true if any container changed content.
    fn rebuild_containers(&mut self) -> bool {
        let count = self.pages.len();
        if count == 0 {
            return false;
        }
        if self.current >= count {
            warn!(
                current = self.current,
                count, "committed index out of range, reset to 0"
            );
            self.current = 0;
            self.recent = 0;
            self.target = 0;
        }

        let loop_mode = self.config.loop_mode;
        let wanted = neighborhood(self.current, count, loop_mode);
        let mut changed = false;
        for slot in Slot::ALL {
            match wanted[slot.index()] {
                Some(page) => {
                    if self.pool.mounted(slot) != Some(page) {
                        changed |= self.mount_page(slot, page);
                    }
                }
                // two-page edges are mounted on demand while panning
                None if count == 2 => {}
                None => {
                    if self.pool.clear(slot).is_some() {
                        self.surface.unmount(slot);
                        changed = true;
                    }
                }
            }
        }

        let axis = self.config.axis;
        let layout = edge_layout(self.current, count, loop_mode, axis, self.extent());
        let mut insets = self.surface.content_insets();
        axis.set_leading(&mut insets, axis.leading(layout.insets));
        axis.set_trailing(&mut insets, axis.trailing(layout.insets));
        self.surface.set_content_insets(insets);
        self.pool.set_edge_offset(Slot::Previous, layout.previous_offset);
        self.pool.set_edge_offset(Slot::Next, layout.next_offset);

        if changed {
            debug!(current = self.current, map = ?self.pool.page_map(), "containers rebuilt");
        }
        changed
    }

    fn mount_page(&mut self, slot: Slot, page: usize) -> bool {
        let Some(view) = self.pages.get(page).and_then(Page::view) else {
            warn!(page, ?slot, "page has no displayable view, slot unchanged");
            return false;
        };
        let change = self.pool.mount(slot, page);
        if let Some(vacated) = change.vacated {
            self.surface.unmount(vacated);
        }
        self.surface.mount(slot, view);
        true
    }

    fn apply_settled_frame(&mut self) {
        let frame = TransitionFrame::settled(self.current, self.config.axis, self.extent());
        if let Some(transformer) = self.transformer.as_mut() {
            transformer.update(self.pool.containers_mut(), &frame);
        }
    }

    fn apply_visibility(&mut self) {
        let direction = panning_direction(self.main_offset(), self.extent());
        let (previous, next) = edge_visibility(
            direction,
            self.config.hide_outside_views,
            self.config.loop_mode,
            self.current,
            self.pages.len(),
        );
        self.pool.set_hidden(Slot::Previous, previous);
        self.pool.set_hidden(Slot::Next, next);
    }

    fn present(&mut self) {
        self.surface.present(self.pool.containers());
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn compute_status(&self, page: usize) -> ViewStatus {
        let extent = self.extent();
        match self.pool.slot_of(page) {
            Some(slot) if extent > 0.0 => {
                ViewStatus::from_position(slot.position(extent) - self.main_offset(), extent)
            }
            _ => ViewStatus::Out,
        }
    }

    /// Emit enter/exit callbacks for every lifecycle-aware page
    ///
    /// Pages that leave are notified before pages that arrive.
    fn refresh_lifecycle(&mut self) {
        let mut pending = Vec::new();
        for index in 0..self.pages.len() {
            if !self.pages[index].has_lifecycle() {
                continue;
            }
            let status = self.compute_status(index);
            let events = self.lifecycle.update(index, status);
            if !events.is_empty() {
                pending.push((index, events));
            }
        }
        // stable: index order holds within each group
        pending.sort_by_key(|(_, events)| !events.iter().any(LifecycleEvent::is_exit));

        for (index, events) in pending {
            if let Some(page) = self.pages[index].lifecycle_mut() {
                for event in events {
                    trace!(page = index, ?event, "lifecycle");
                    event.dispatch(page);
                }
            }
        }
    }

    // =========================================================================
    // Surface helpers
    // =========================================================================

    fn main_offset(&self) -> f32 {
        self.config.axis.main(self.surface.content_offset())
    }

    fn extent(&self) -> f32 {
        self.config.axis.extent(self.surface.viewport_size())
    }

    /// Put the viewport on the middle container without notifying
    fn recenter(&mut self) {
        let _quiet = self.gate.suppress();
        let offset = self.config.axis.vec(self.extent());
        self.surface.set_content_offset(offset, false);
    }
}
