//! Pan Animation
//!
//! Animation primitives a pager host uses to fulfil "animate over time"
//! requests.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs for overscroll bounce
//! - **Tweens**: fixed-duration eased interpolation for paging snaps,
//!   programmatic scrolls and edge container release

pub mod easing;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
