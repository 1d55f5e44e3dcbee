//! Pan Core
//!
//! A paging container that shows an arbitrary-length page list through
//! exactly three reusable containers (previous, current, next) laid out on a
//! scroll surface owned by the host.
//!
//! # Architecture
//!
//! - [`pool`] - the three containers and the page neighbourhood they hold
//! - [`mapper`] - pure offset to direction/progress/target mapping
//! - [`state`] and [`controller`] - the paging state machine
//! - [`lifecycle`] - enter/exit callbacks for lifecycle-aware pages
//! - [`transformer`] - pluggable cosmetic transition effects
//! - [`jump`] - destination slot for animated jumps
//!
//! Rendering, layout, gestures and animation stay with the host, which
//! implements [`PanSurface`] and forwards [`SurfaceEvent`]s.
//!
//! # Example
//!
//! ```ignore
//! use pan_core::prelude::*;
//!
//! let pages = labels.into_iter().map(Page::View).collect();
//! let mut pager = PanController::with_pages(surface, PanConfig::default(), pages);
//! pager.jump_to(3, true)?;
//!
//! // host event loop
//! pager.handle_event(SurfaceEvent::OffsetChanged);
//! ```

pub mod axis;
pub mod config;
pub mod controller;
pub mod delegate;
mod error;
pub mod geometry;
pub mod jump;
pub mod lifecycle;
pub mod mapper;
pub mod page;
pub mod pool;
pub mod state;
pub mod surface;
pub mod transformer;

pub use axis::ScrollAxis;
pub use config::{LoopMode, PanConfig};
pub use controller::PanController;
pub use delegate::PanDelegate;
pub use error::{PanError, Result};
pub use geometry::{EdgeInsets, Size, Transform, Vec2};
pub use lifecycle::{Direction, LifecycleEvent, PageLifecycle, ViewStatus};
pub use mapper::PanDirection;
pub use page::{Page, PageController};
pub use pool::{Container, Slot, SLOT_COUNT};
pub use state::PagingState;
pub use surface::{NotificationGate, PanSurface, SuppressGuard, SurfaceEvent};
pub use transformer::{TransitionFrame, Transformer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::axis::ScrollAxis;
    pub use crate::config::{LoopMode, PanConfig};
    pub use crate::controller::PanController;
    pub use crate::delegate::PanDelegate;
    pub use crate::error::{PanError, Result};
    pub use crate::geometry::{EdgeInsets, Size, Transform, Vec2};
    pub use crate::lifecycle::{Direction, LifecycleEvent, PageLifecycle};
    pub use crate::page::{Page, PageController};
    pub use crate::pool::{Container, Slot};
    pub use crate::surface::{PanSurface, SurfaceEvent};
    pub use crate::transformer::{TransitionFrame, Transformer};
}
