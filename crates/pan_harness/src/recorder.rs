//! Event recorders
//!
//! A single [`EventLog`] collects delegate and lifecycle callbacks in the
//! order they happen, so ordering across pages and the delegate can be
//! asserted on.

use std::cell::RefCell;
use std::rc::Rc;

use pan_core::{Direction, LifecycleEvent, PageController, PageLifecycle, PanDelegate};
use serde::Serialize;

/// One observed callback
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recorded {
    StartPanning { from: usize },
    ChangePanning { from: usize, to: usize, progress: f32 },
    StopPanning { from: usize, to: usize },
    Paging { from: usize, to: usize },
    Lifecycle { page: usize, event: LifecycleEvent },
}

impl Recorded {
    pub fn is_change(&self) -> bool {
        matches!(self, Recorded::ChangePanning { .. })
    }
}

/// Shared, append-only callback log
#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<Recorded>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Recorded) {
        self.0.borrow_mut().push(event);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<Recorded> {
        self.0.borrow().clone()
    }

    /// Everything except the per-frame change notifications
    pub fn without_changes(&self) -> Vec<Recorded> {
        self.0
            .borrow()
            .iter()
            .filter(|event| !event.is_change())
            .copied()
            .collect()
    }

    /// `(from, to)` of every paging notification
    pub fn pagings(&self) -> Vec<(usize, usize)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Recorded::Paging { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    /// Lifecycle callbacks received by `page`
    pub fn lifecycle_of(&self, page: usize) -> Vec<LifecycleEvent> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Recorded::Lifecycle { page: p, event } if p == page => Some(event),
                _ => None,
            })
            .collect()
    }

    /// All lifecycle callbacks as `(page, event)`
    pub fn lifecycle(&self) -> Vec<(usize, LifecycleEvent)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Recorded::Lifecycle { page, event } => Some((page, event)),
                _ => None,
            })
            .collect()
    }

    /// Progress values of every change notification
    pub fn progresses(&self) -> Vec<f32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Recorded::ChangePanning { progress, .. } => Some(progress),
                _ => None,
            })
            .collect()
    }
}

/// Delegate that appends to an [`EventLog`]
#[derive(Clone, Debug)]
pub struct RecordingDelegate {
    log: EventLog,
}

impl RecordingDelegate {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl PanDelegate for RecordingDelegate {
    fn did_start_panning(&mut self, from: usize) {
        self.log.push(Recorded::StartPanning { from });
    }

    fn did_change_panning(&mut self, from: usize, to: usize, progress: f32) {
        self.log.push(Recorded::ChangePanning { from, to, progress });
    }

    fn did_stop_panning(&mut self, from: usize, to: usize) {
        self.log.push(Recorded::StopPanning { from, to });
    }

    fn did_page(&mut self, from: usize, to: usize) {
        self.log.push(Recorded::Paging { from, to });
    }
}

/// Lifecycle-aware page that logs its callbacks
#[derive(Clone, Debug)]
pub struct LifecycleProbe<V> {
    view: V,
    page: usize,
    log: EventLog,
}

impl<V> LifecycleProbe<V> {
    pub fn new(page: usize, view: V, log: EventLog) -> Self {
        Self { view, page, log }
    }

    fn record(&self, event: LifecycleEvent) {
        self.log.push(Recorded::Lifecycle {
            page: self.page,
            event,
        });
    }
}

impl<V> PageLifecycle for LifecycleProbe<V> {
    fn will_enter(&mut self, from: Direction) {
        self.record(LifecycleEvent::WillEnter(from));
    }

    fn did_enter(&mut self, from: Direction) {
        self.record(LifecycleEvent::DidEnter(from));
    }

    fn will_exit(&mut self, to: Direction) {
        self.record(LifecycleEvent::WillExit(to));
    }

    fn did_exit(&mut self, to: Direction) {
        self.record(LifecycleEvent::DidExit(to));
    }
}

impl<V> PageController<V> for LifecycleProbe<V> {
    fn view(&self) -> Option<&V> {
        Some(&self.view)
    }
}
