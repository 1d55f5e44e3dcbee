//! Pan Harness
//!
//! Headless host for [`pan_core::PanController`]:
//!
//! - [`SimSurface`] - a simulated paging scroll view with rubber banding,
//!   snapping, and programmatic animations
//! - [`Drive`] - frame pumping and gesture helpers
//! - [`EventLog`] - ordered record of delegate and lifecycle callbacks
//!
//! # Example
//!
//! ```ignore
//! use pan_harness::prelude::*;
//!
//! let log = EventLog::new();
//! let pages = labelled_pages(5, &log, |_| true);
//! let mut pager = build_pager(SimConfig::default(), PanConfig::default(), pages, EffectKind::None, &log);
//! pager.swipe(1)?;
//! assert_eq!(log.pagings(), vec![(0, 1)]);
//! ```

pub mod driver;
pub mod recorder;
pub mod surface;

#[cfg(test)]
mod tests;

pub use driver::{Drive, DriveError, SimPager, FRAME, MAX_FRAMES};
pub use recorder::{EventLog, LifecycleProbe, Recorded, RecordingDelegate};
pub use surface::{ContainerAnimation, SimConfig, SimSurface};

use pan_core::{Page, PanConfig, PanController};
use pan_effects::EffectKind;

/// Label of the page at `index`
pub fn page_label(index: usize) -> String {
    format!("page-{index}")
}

/// `count` labelled pages; those selected by `with_lifecycle` log their
/// callbacks into `log`
pub fn labelled_pages(
    count: usize,
    log: &EventLog,
    with_lifecycle: impl Fn(usize) -> bool,
) -> Vec<Page<String>> {
    (0..count)
        .map(|index| {
            if with_lifecycle(index) {
                Page::controller(LifecycleProbe::new(index, page_label(index), log.clone()))
            } else {
                Page::View(page_label(index))
            }
        })
        .collect()
}

/// Pager on a fresh [`SimSurface`], recording into `log`
pub fn build_pager(
    sim: SimConfig,
    config: PanConfig,
    pages: Vec<Page<String>>,
    effect: EffectKind,
    log: &EventLog,
) -> SimPager {
    let mut pager = PanController::with_pages(SimSurface::new(sim), config, pages);
    pager.set_delegate(Some(Box::new(RecordingDelegate::new(log.clone()))));
    pager.set_transformer(effect.build());
    pager
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::driver::{Drive, SimPager};
    pub use crate::recorder::{EventLog, Recorded};
    pub use crate::surface::{SimConfig, SimSurface};
    pub use crate::{build_pager, labelled_pages, page_label};
    pub use pan_core::prelude::*;
    pub use pan_effects::EffectKind;
}
