//! Textual input scripts for headless runs.
//!
//! A script is a whitespace-separated list of steps:
//! `down:W`, `up:ctrl+U`, `tap:comma`, `tick` or `tick:0.25`.
//! Lines starting with `#` are comments.

use std::str::FromStr;
use xrsim_input::{InputEventKind, KeyCombination, ParseKeyError};

/// Frame length used by a bare `tick`.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown step `{0}`")]
    UnknownStep(String),
    #[error("bad key in `{step}`: {source}")]
    Key {
        step: String,
        #[source]
        source: ParseKeyError,
    },
    #[error("bad duration in `{0}`")]
    Duration(String),
}

/// One script step.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Event(InputEventKind),
    /// Key down then key up.
    Tap(KeyCombination),
    Tick(f32),
}

impl FromStr for ScriptStep {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (s, None),
        };
        let combo = || -> Result<KeyCombination, ScriptError> {
            arg.unwrap_or_default()
                .parse::<KeyCombination>()
                .map_err(|source| ScriptError::Key {
                    step: s.to_string(),
                    source,
                })
        };
        match verb.to_ascii_lowercase().as_str() {
            "down" => {
                let c = combo()?;
                Ok(ScriptStep::Event(InputEventKind::KeyDown {
                    key: c.key,
                    modifiers: c.modifiers,
                }))
            }
            "up" => {
                let c = combo()?;
                Ok(ScriptStep::Event(InputEventKind::KeyUp {
                    key: c.key,
                    modifiers: c.modifiers,
                }))
            }
            "tap" => Ok(ScriptStep::Tap(combo()?)),
            "tick" => match arg {
                None => Ok(ScriptStep::Tick(DEFAULT_DT)),
                Some(dt) => dt
                    .parse::<f32>()
                    .ok()
                    .filter(|dt| dt.is_finite() && *dt >= 0.0)
                    .map(ScriptStep::Tick)
                    .ok_or_else(|| ScriptError::Duration(s.to_string())),
            },
            _ => Err(ScriptError::UnknownStep(s.to_string())),
        }
    }
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(str::parse::<ScriptStep>)
        .collect()
}
