//! Draw-adjudication settings for a [`crate::Game`].
//!
//! Defaults reproduce the standard rules. Options can also be set by name, which is how the
//! text protocol's `setoption` command reaches them.

use std::fmt;

/// Rule configuration for the Game Controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Halfmove clock value at which the game is drawn (0 disables the rule)
    pub fifty_move_plies: u32,
    /// Occurrences of one position that draw the game (0 disables the rule)
    pub repetition_limit: u32,
    /// Draw as soon as neither side can force mate
    pub insufficient_material: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            fifty_move_plies: 100,
            repetition_limit: 3,
            insufficient_material: true,
        }
    }
}

/// A `setoption` request that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    UnknownOption { name: String },
    MissingValue { name: String },
    InvalidValue { name: String, value: String },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::UnknownOption { name } => write!(f, "Unknown option '{name}'"),
            OptionError::MissingValue { name } => write!(f, "Option '{name}' needs a value"),
            OptionError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for OptionError {}

impl GameOptions {
    /// Set an option by name (case-insensitive).
    ///
    /// Known names are `FiftyMovePlies`, `RepetitionLimit` (non-negative integers) and
    /// `InsufficientMaterial` (`true`/`false`/`1`/`0`).
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionError> {
        let normalized = name.trim().to_ascii_lowercase();
        let value = value
            .map(str::trim)
            .ok_or_else(|| OptionError::MissingValue {
                name: name.to_string(),
            });
        let invalid = |v: &str| OptionError::InvalidValue {
            name: name.to_string(),
            value: v.to_string(),
        };

        match normalized.as_str() {
            "fiftymoveplies" => {
                let v = value?;
                self.fifty_move_plies = v.parse().map_err(|_| invalid(v))?;
            }
            "repetitionlimit" => {
                let v = value?;
                self.repetition_limit = v.parse().map_err(|_| invalid(v))?;
            }
            "insufficientmaterial" => {
                let v = value?;
                self.insufficient_material = match v.to_ascii_lowercase().as_str() {
                    "true" | "1" => true,
                    "false" | "0" => false,
                    _ => return Err(invalid(v)),
                };
            }
            _ => {
                return Err(OptionError::UnknownOption {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// One `option name ...` line per setting, with its current value as the default
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!(
                "option name FiftyMovePlies type spin default {} min 0 max 10000",
                self.fifty_move_plies
            ),
            format!(
                "option name RepetitionLimit type spin default {} min 0 max 100",
                self.repetition_limit
            ),
            format!(
                "option name InsufficientMaterial type check default {}",
                self.insufficient_material
            ),
        ]
    }
}

/// Split `setoption name <name...> value <value...>` into its name and optional value.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.first() != Some(&"setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut in_value = None;

    for part in parts.iter().skip(1) {
        match *part {
            "name" => in_value = Some(false),
            "value" => in_value = Some(true),
            _ => match in_value {
                Some(false) => name_parts.push(part),
                Some(true) => value_parts.push(part),
                None => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some((name_parts.join(" "), value))
}
