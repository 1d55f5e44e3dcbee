use pan_core::{Container, PanDirection, ScrollAxis, Transform, TransitionFrame, Transformer};

/// Pages turn about the cross axis
///
/// The turn is projected onto the plane as a main-axis scale of
/// `cos(angle)`, with the pages fading as they turn away.
#[derive(Clone, Copy, Debug)]
pub struct Flip {
    /// Angle (radians) of a page one full extent away
    pub rate: f32,
}

impl Default for Flip {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl Flip {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }

    fn turned(&self, axis: ScrollAxis, turns: f32) -> Transform {
        let squash = (turns * self.rate).cos().abs();
        match axis {
            ScrollAxis::Horizontal => Transform::scale(squash, 1.0),
            ScrollAxis::Vertical => Transform::scale(1.0, squash),
        }
    }
}

impl Transformer for Flip {
    fn update(&mut self, containers: &mut [Container; 3], frame: &TransitionFrame) {
        let p = frame.progress;
        let [previous, current, next] = containers;
        match frame.direction {
            PanDirection::Previous => {
                previous.transform = self.turned(frame.axis, 1.0 - p);
                current.transform = self.turned(frame.axis, -p);
                next.transform = Transform::IDENTITY;
            }
            PanDirection::Next => {
                previous.transform = Transform::IDENTITY;
                current.transform = self.turned(frame.axis, p);
                next.transform = self.turned(frame.axis, p - 1.0);
            }
            PanDirection::Center => current.transform = Transform::IDENTITY,
        }
        previous.alpha = if frame.direction == PanDirection::Previous { p } else { 0.0 };
        current.alpha = 1.0 - p;
        next.alpha = if frame.direction == PanDirection::Next { p } else { 0.0 };
    }

    fn teardown(&mut self, containers: &mut [Container; 3]) {
        containers.iter_mut().for_each(Container::reset_cosmetics);
    }
}
