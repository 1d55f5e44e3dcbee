//! Scroll axis selection
//!
//! Every offset/size read and every inset write the pager performs goes
//! through [`ScrollAxis`], so the same state machine drives horizontal and
//! vertical pagers.

use serde::{Deserialize, Serialize};

use crate::geometry::{EdgeInsets, Size, Transform, Vec2};

/// Axis the pager scrolls along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAxis {
    #[default]
    Horizontal,
    Vertical,
}

impl ScrollAxis {
    /// Main-axis component of an offset
    pub fn main(self, v: Vec2) -> f32 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Offset with the given main-axis component and zero cross component
    pub fn vec(self, main: f32) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(main, 0.0),
            Self::Vertical => Vec2::new(0.0, main),
        }
    }

    /// Page extent: the viewport size along the main axis
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Cross-axis size
    pub fn cross(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Translation of `main` along the axis
    pub fn translation(self, main: f32) -> Transform {
        let v = self.vec(main);
        Transform::translation(v.x, v.y)
    }

    /// Inset before the first container (left or top)
    pub fn leading(self, insets: EdgeInsets) -> f32 {
        match self {
            Self::Horizontal => insets.left,
            Self::Vertical => insets.top,
        }
    }

    /// Inset after the last container (right or bottom)
    pub fn trailing(self, insets: EdgeInsets) -> f32 {
        match self {
            Self::Horizontal => insets.right,
            Self::Vertical => insets.bottom,
        }
    }

    pub fn set_leading(self, insets: &mut EdgeInsets, value: f32) {
        match self {
            Self::Horizontal => insets.left = value,
            Self::Vertical => insets.top = value,
        }
    }

    pub fn set_trailing(self, insets: &mut EdgeInsets, value: f32) {
        match self {
            Self::Horizontal => insets.right = value,
            Self::Vertical => insets.bottom = value,
        }
    }
}
