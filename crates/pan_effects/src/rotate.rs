use pan_core::{Container, PanDirection, ScrollAxis, Transform, TransitionFrame, Transformer};

/// Pages swing in-plane, one radian per extent, fading as they go
#[derive(Clone, Copy, Debug, Default)]
pub struct Rotate;

fn swing(axis: ScrollAxis, turns: f32) -> Transform {
    let sign = match axis {
        ScrollAxis::Horizontal => 1.0,
        ScrollAxis::Vertical => -1.0,
    };
    Transform::rotation(turns * sign)
}

impl Transformer for Rotate {
    fn update(&mut self, containers: &mut [Container; 3], frame: &TransitionFrame) {
        let p = frame.progress;
        let [previous, current, next] = containers;
        match frame.direction {
            PanDirection::Previous => {
                previous.transform = swing(frame.axis, 1.0 - p);
                current.transform = swing(frame.axis, -p);
                next.transform = Transform::IDENTITY;
            }
            PanDirection::Next => {
                previous.transform = Transform::IDENTITY;
                current.transform = swing(frame.axis, p);
                next.transform = swing(frame.axis, p - 1.0);
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
