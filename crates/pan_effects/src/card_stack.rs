use pan_core::{Container, PanDirection, Transform, TransitionFrame, Transformer};

/// Scale of a card that is fully underneath
const BURIED_SCALE: f32 = 0.7;

/// The page underneath shrinks and fades while the top card slides over it
#[derive(Clone, Copy, Debug, Default)]
pub struct CardStack;

fn card(frame: &TransitionFrame, shift: f32, scale: f32) -> Transform {
    frame
        .axis
        .translation(frame.extent * shift)
        .then(&Transform::scale(scale, scale))
}

impl Transformer for CardStack {
    fn update(&mut self, containers: &mut [Container; 3], frame: &TransitionFrame) {
        let p = frame.progress;
        let [previous, current, next] = containers;
        match frame.direction {
            PanDirection::Previous => {
                // current sinks under the incoming previous card
                let scale = (1.0 - p) * (1.0 - BURIED_SCALE) + BURIED_SCALE;
                previous.z_index = 1;
                current.z_index = 0;
                previous.transform = Transform::IDENTITY;
                previous.alpha = 1.0;
                current.transform = card(frame, -p, scale);
                current.alpha = 1.0 - p;
            }
            PanDirection::Next => {
                // next rises from under the outgoing current card
                let scale = p * (1.0 - BURIED_SCALE) + BURIED_SCALE;
                current.z_index = 1;
                next.z_index = 0;
                current.transform = Transform::IDENTITY;
                current.alpha = 1.0;
                next.transform = card(frame, p - 1.0, scale);
                next.alpha = p;
            }
            PanDirection::Center => {
                current.transform = Transform::IDENTITY;
                current.alpha = 1.0;
            }
        }
    }

    fn teardown(&mut self, containers: &mut [Container; 3]) {
        containers.iter_mut().for_each(Container::reset_cosmetics);
    }
}
