use pan_core::{Container, PanDirection, Slot, Transform, TransitionFrame, Transformer};

/// Neighbour slides in at half speed beneath the current page
#[derive(Clone, Copy, Debug, Default)]
pub struct Parallax;

impl Transformer for Parallax {
    fn update(&mut self, containers: &mut [Container; 3], frame: &TransitionFrame) {
        let lag = frame.extent / 2.0;
        let remaining = 1.0 - frame.progress;

        for slot in Slot::ALL {
            containers[slot.index()].z_index = i32::from(slot == Slot::Current);
        }
        let [previous, current, next] = containers;
        match frame.direction {
            PanDirection::Previous => {
                previous.transform = frame.axis.translation(lag * remaining);
                next.transform = Transform::IDENTITY;
            }
            PanDirection::Next => {
                previous.transform = Transform::IDENTITY;
                next.transform = frame.axis.translation(-lag * remaining);
            }
            PanDirection::Center => current.transform = Transform::IDENTITY,
        }
    }

    fn teardown(&mut self, containers: &mut [Container; 3]) {
        containers.iter_mut().for_each(Container::reset_cosmetics);
    }
}
