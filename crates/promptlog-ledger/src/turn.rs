//! Turn file naming
//!
//! Every turn lives in a file named `NN_<role>.md`, where `NN` is the turn
//! number padded to two digits. [`format_turn_file_name`] and
//! [`parse_turn_file_name`] are the only places that know this layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File extension shared by all turn files
pub const TURN_FILE_EXTENSION: &str = "md";

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Context or reply produced by the model (turn 1 holds the snapshot)
    Assistant,
    /// Prompt written by the operator
    User,
}

impl TurnRole {
    /// Both roles, in the order they are written by `start` and `run`
    pub const ALL: [TurnRole; 2] = [TurnRole::Assistant, TurnRole::User];

    /// The role tag used in file names
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::Assistant => "assistant",
            TurnRole::User => "user",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assistant" => Ok(TurnRole::Assistant),
            "user" => Ok(TurnRole::User),
            other => Err(format!("unknown turn role: {other}")),
        }
    }
}

/// The structured form of a turn file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnFileName {
    /// Role encoded in the name
    pub role: TurnRole,
    /// Sequence number, starting at 1
    pub number: u32,
}

impl TurnFileName {
    /// Create a new turn file name
    #[must_use]
    pub fn new(role: TurnRole, number: u32) -> Self {
        Self { role, number }
    }

    /// Render as a file name, e.g. `03_user.md`
    #[must_use]
    pub fn file_name(&self) -> String {
        format_turn_file_name(self)
    }
}

impl fmt::Display for TurnFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Format a turn as its on-disk file name
#[must_use]
pub fn format_turn_file_name(name: &TurnFileName) -> String {
    format!(
        "{:02}_{}.{}",
        name.number,
        name.role.as_str(),
        TURN_FILE_EXTENSION
    )
}

/// Parse an on-disk file name back into a [`TurnFileName`]
///
/// Any number of digits is accepted, so turns past 99 are still recognized.
/// Returns `None` for anything that is not a turn file, including turn 0.
#[must_use]
pub fn parse_turn_file_name(file_name: &str) -> Option<TurnFileName> {
    let stem = file_name
        .strip_suffix(TURN_FILE_EXTENSION)?
        .strip_suffix('.')?;
    let (digits, role) = stem.split_once('_')?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let number: u32 = digits.parse().ok()?;
    if number == 0 {
        return None;
    }

    let role = role.parse().ok()?;
    Some(TurnFileName { role, number })
}
