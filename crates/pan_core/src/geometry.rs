//! Geometry primitives shared between the pager and its host
//!
//! The host surface reports offsets and sizes in two dimensions; the pager
//! only ever reads the component selected by the active [`ScrollAxis`].
//!
//! [`ScrollAxis`]: crate::axis::ScrollAxis

use serde::{Deserialize, Serialize};

/// 2D vector (content offsets, translations)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size (viewport bounds)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Content insets of the scroll surface
///
/// Negative insets shrink the scrollable range; the pager uses a negative
/// full-extent inset to pin the viewport at a hard edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };
}

/// 2D affine transform applied to a container
///
/// Matrix elements `[a, b, c, d, tx, ty]`:
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0   1 |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub elements: [f32; 6],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    pub fn rotation(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Translation component
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.elements[4], self.elements[5])
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let [a, b, c, d, tx, ty] = self.elements;
        Vec2::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Element-wise interpolation, suitable for translations and scales
    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        let mut elements = self.elements;
        for (value, target) in elements.iter_mut().zip(other.elements) {
            *value += (target - *value) * t;
        }
        Transform { elements }
    }

    /// Concatenate this transform with another (self * other)
    ///
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Transform {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }
}
