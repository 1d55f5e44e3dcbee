//! Pan delegate
//!
//! Receives scroll and paging progress from a [`PanController`].
//!
//! [`PanController`]: crate::controller::PanController

/// Observer of panning and paging
///
/// Every method defaults to a no-op.
pub trait PanDelegate {
    /// A drag or animated jump started on page `from`
    fn did_start_panning(&mut self, _from: usize) {}

    /// The offset changed: the transition from `from` toward `to` is at
    /// `progress` (0.0-1.0)
    fn did_change_panning(&mut self, _from: usize, _to: usize, _progress: f32) {}

    /// The pan or jump that began on `from` came to rest on `to`
    fn did_stop_panning(&mut self, _from: usize, _to: usize) {}

    /// The committed page changed from `from` to `to`
    fn did_page(&mut self, _from: usize, _to: usize) {}
}
