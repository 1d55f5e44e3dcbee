//! Pages hosted by the pager
//!
//! Pages are heterogeneous: some are bare host views, others are controllers
//! that want lifecycle callbacks. Both resolve to a displayable view; only
//! controllers expose the [`PageLifecycle`] capability.

use std::fmt;

use crate::lifecycle::PageLifecycle;

/// A page that owns a view and receives lifecycle callbacks
pub trait PageController<V>: PageLifecycle {
    /// The view to mount, or None if it cannot be resolved
    fn view(&self) -> Option<&V>;
}

/// One entry of the page list
pub enum Page<V> {
    /// Bare view without lifecycle callbacks
    View(V),
    /// Lifecycle-aware controller
    Controller(Box<dyn PageController<V>>),
}

impl<V> Page<V> {
    /// Create a controller page
    pub fn controller(controller: impl PageController<V> + 'static) -> Self {
        Page::Controller(Box::new(controller))
    }

    /// Resolve to a displayable view
    pub fn view(&self) -> Option<&V> {
        match self {
            Page::View(view) => Some(view),
            Page::Controller(controller) => controller.view(),
        }
    }

    /// Lifecycle capability, if this page has it
    pub fn lifecycle_mut(&mut self) -> Option<&mut (dyn PageController<V> + 'static)> {
        match self {
            Page::View(_) => None,
            Page::Controller(controller) => Some(controller.as_mut()),
        }
    }

    pub fn has_lifecycle(&self) -> bool {
        matches!(self, Page::Controller(_))
    }
}

impl<V: fmt::Debug> fmt::Debug for Page<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::View(view) => f.debug_tuple("View").field(view).finish(),
            Page::Controller(controller) => f
                .debug_tuple("Controller")
                .field(&controller.view())
                .finish(),
        }
    }
}

impl<V> From<V> for Page<V> {
    fn from(view: V) -> Self {
        Page::View(view)
    }
}
