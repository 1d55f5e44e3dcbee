//! Gesture scripts
//!
//! A script is a whitespace, comma or semicolon separated list of steps:
//!
//! | Step | Meaning |
//! |---|---|
//! | `drag:next`, `drag:prev` | drag one full page (finger stays down) |
//! | `drag:<points>` | drag by a signed distance |
//! | `release`, `release:<velocity>` | lift the finger |
//! | `swipe:<pages>` | drag a page at a time and settle, signed |
//! | `jump:<index>` | jump without animation |
//! | `jump-animated:<index>` | animated jump |
//! | `wait:<seconds>` | let frames run |
//! | `settle` | run frames until the surface is idle |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("unknown step '{0}'")]
    UnknownStep(String),

    #[error("step '{0}' needs an argument")]
    MissingArgument(String),

    #[error("invalid argument '{arg}' for step '{step}'")]
    InvalidArgument { step: String, arg: String },
}

/// Drag distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAmount {
    /// One extent toward the next page
    NextPage,
    /// One extent toward the previous page
    PreviousPage,
    /// Signed main-axis points
    Points(f32),
}

/// One scripted action
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Drag(DragAmount),
    Release { velocity: f32 },
    Swipe(i32),
    Jump { index: usize, animated: bool },
    Wait(f32),
    Settle,
}

fn argument<T: FromStr>(step: &str, arg: Option<&str>) -> Result<T, ScriptError> {
    let arg = arg.ok_or_else(|| ScriptError::MissingArgument(step.to_string()))?;
    arg.parse().map_err(|_| ScriptError::InvalidArgument {
        step: step.to_string(),
        arg: arg.to_string(),
    })
}

fn finite(step: &str, value: f32) -> Result<f32, ScriptError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScriptError::InvalidArgument {
            step: step.to_string(),
            arg: value.to_string(),
        })
    }
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let name = name.to_ascii_lowercase();

        match name.as_str() {
            "drag" => match arg {
                Some("next") => Ok(Step::Drag(DragAmount::NextPage)),
                Some("prev") | Some("previous") => Ok(Step::Drag(DragAmount::PreviousPage)),
                _ => {
                    let points = finite(&name, argument(&name, arg)?)?;
                    Ok(Step::Drag(DragAmount::Points(points)))
                }
            },
            "release" => {
                let velocity = match arg {
                    Some(_) => finite(&name, argument(&name, arg)?)?,
                    None => 0.0,
                };
                Ok(Step::Release { velocity })
            }
            "swipe" => Ok(Step::Swipe(argument(&name, arg)?)),
            "jump" => Ok(Step::Jump {
                index: argument(&name, arg)?,
                animated: false,
            }),
            "jump-animated" | "jump_animated" => Ok(Step::Jump {
                index: argument(&name, arg)?,
                animated: true,
            }),
            "wait" => {
                let seconds: f32 = finite(&name, argument(&name, arg)?)?;
                if seconds < 0.0 {
                    return Err(ScriptError::InvalidArgument {
                        step: name,
                        arg: seconds.to_string(),
                    });
                }
                Ok(Step::Wait(seconds))
            }
            "settle" => Ok(Step::Settle),
            _ => Err(ScriptError::UnknownStep(s.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Drag(DragAmount::NextPage) => write!(f, "drag:next"),
            Step::Drag(DragAmount::PreviousPage) => write!(f, "drag:prev"),
            Step::Drag(DragAmount::Points(points)) => write!(f, "drag:{points}"),
            Step::Release { velocity } if *velocity == 0.0 => write!(f, "release"),
            Step::Release { velocity } => write!(f, "release:{velocity}"),
            Step::Swipe(pages) => write!(f, "swipe:{pages}"),
            Step::Jump {
                index,
                animated: false,
            } => write!(f, "jump:{index}"),
            Step::Jump {
                index,
                animated: true,
            } => write!(f, "jump-animated:{index}"),
            Step::Wait(seconds) => write!(f, "wait:{seconds}"),
            Step::Settle => write!(f, "settle"),
        }
    }
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    source
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
