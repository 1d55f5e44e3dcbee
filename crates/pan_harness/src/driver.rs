//! Frame driver
//!
//! [`Drive`] pumps the simulated surface's notifications into the pager and
//! provides gesture helpers expressed in main-axis points.

use pan_core::{PanController, PanSurface};
use thiserror::Error;
use tracing::debug;

use crate::surface::SimSurface;

/// Simulated frame duration (60 fps)
pub const FRAME: f32 = 1.0 / 60.0;

/// Frame budget for [`Drive::run_until_idle`]
pub const MAX_FRAMES: usize = 600;

/// Pager hosted on a simulated surface
pub type SimPager<V = String> = PanController<SimSurface<V>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriveError {
    #[error("surface still busy after {frames} frames")]
    Stalled { frames: usize },
}

/// Gesture and frame helpers for a [`SimPager`]
pub trait Drive {
    /// Deliver every queued notification; returns how many were delivered
    fn pump(&mut self) -> usize;

    /// Advance one frame and deliver its notifications
    fn step_frame(&mut self);

    /// Run frames until the surface is idle; returns the frame count
    fn run_until_idle(&mut self) -> Result<usize, DriveError>;

    /// Put a finger down (if not already) and move it `distance` points in
    /// `steps` equal moves
    fn drag(&mut self, distance: f32, steps: usize);

    /// Lift the finger with a release velocity
    fn release(&mut self, velocity: f32);

    /// Drag one full extent per page (positive: next) and settle
    fn swipe(&mut self, pages: i32) -> Result<(), DriveError>;
}

impl<V: Clone> Drive for PanController<SimSurface<V>> {
    fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.surface_mut().poll_event() {
            self.handle_event(event);
            delivered += 1;
        }
        delivered
    }

    fn step_frame(&mut self) {
        self.surface_mut().tick(FRAME);
        self.pump();
    }

    fn run_until_idle(&mut self) -> Result<usize, DriveError> {
        for frame in 0..MAX_FRAMES {
            self.pump();
            if self.surface().is_idle() {
                return Ok(frame);
            }
            self.surface_mut().tick(FRAME);
        }
        Err(DriveError::Stalled { frames: MAX_FRAMES })
    }

    fn drag(&mut self, distance: f32, steps: usize) {
        if !self.surface().is_tracking() {
            self.surface_mut().begin_drag();
            self.pump();
        }
        let steps = steps.max(1);
        let delta = distance / steps as f32;
        for _ in 0..steps {
            self.surface_mut().drag_by(delta);
            self.pump();
        }
    }

    fn release(&mut self, velocity: f32) {
        self.surface_mut().end_drag(velocity);
        self.pump();
    }

    fn swipe(&mut self, pages: i32) -> Result<(), DriveError> {
        let extent = self.surface().extent();
        let direction = if pages < 0 { -1.0 } else { 1.0 };
        for _ in 0..pages.unsigned_abs() {
            self.drag(extent * direction, 10);
            self.release(0.0);
            self.run_until_idle()?;
        }
        debug!(pages, index = self.index(), "swipe finished");
        Ok(())
    }
}
