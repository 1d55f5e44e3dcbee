//! Pan Effects
//!
//! Sample [`Transformer`] implementations. Each one only touches cosmetic
//! container state (transform, alpha, stacking) and restores it on teardown.
//!
//! | Effect | Look |
//! |---|---|
//! | [`Parallax`] | neighbour slides in at half speed under the current page |
//! | [`CardStack`] | outgoing card shrinks and fades under the incoming one |
//! | [`Flip`] | pages turn about the cross axis |
//! | [`Rotate`] | pages swing in-plane |

use std::fmt;
use std::str::FromStr;

use pan_core::Transformer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod card_stack;
mod flip;
mod parallax;
mod rotate;

pub use card_stack::CardStack;
pub use flip::Flip;
pub use parallax::Parallax;
pub use rotate::Rotate;

/// Named effect, for configuration files and command lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// No effect
    #[default]
    None,
    Parallax,
    CardStack,
    Flip,
    Rotate,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::None,
        EffectKind::Parallax,
        EffectKind::CardStack,
        EffectKind::Flip,
        EffectKind::Rotate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::None => "none",
            EffectKind::Parallax => "parallax",
            EffectKind::CardStack => "card_stack",
            EffectKind::Flip => "flip",
            EffectKind::Rotate => "rotate",
        }
    }

    /// Instantiate the effect
    pub fn build(self) -> Option<Box<dyn Transformer>> {
        match self {
            EffectKind::None => None,
            EffectKind::Parallax => Some(Box::new(Parallax)),
            EffectKind::CardStack => Some(Box::new(CardStack)),
            EffectKind::Flip => Some(Box::new(Flip::default())),
            EffectKind::Rotate => Some(Box::new(Rotate)),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown effect '{0}' (expected none, parallax, card_stack, flip or rotate)")]
pub struct UnknownEffect(pub String);

impl FromStr for EffectKind {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}
