//! Original cell coordinates and their A1-style rendering.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A zero-based `(row, col)` position in one of the unmodified input grids.
///
/// Renders and parses as an A1 address (`B3` is row 2, col 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> CellCoord {
        CellCoord { row, col }
    }

    pub fn to_a1(&self) -> String {
        index_to_address(self.row, self.col)
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        CellCoord { row, col }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid A1 address: {input:?}")]
pub struct AddressParseError {
    pub input: String,
}

impl FromStr for CellCoord {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = address_to_index(s).ok_or_else(|| AddressParseError {
            input: s.to_string(),
        })?;
        Ok(CellCoord { row, col })
    }
}

impl Serialize for CellCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_a1())
    }
}

impl<'de> Deserialize<'de> for CellCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let a1 = String::deserialize(deserializer)?;
        CellCoord::from_str(&a1).map_err(|e| DeError::custom(e.to_string()))
    }
}

/// Spreadsheet column label for a zero-based column index (`0 -> A`, `26 -> AA`).
pub fn column_label(col: u32) -> String {
    let mut remaining = col;
    let mut label = Vec::new();

    loop {
        label.push(b'A' + (remaining % 26) as u8);
        if remaining < 26 {
            break;
        }
        remaining = remaining / 26 - 1;
    }

    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Convert zero-based (row, col) indices to an A1 address string.
pub fn index_to_address(row: u32, col: u32) -> String {
    format!("{}{}", column_label(col), u64::from(row) + 1)
}

/// Parse an A1 address into zero-based (row, col) indices.
/// Returns `None` for malformed or out-of-range addresses.
pub fn address_to_index(a1: &str) -> Option<(u32, u32)> {
    let split = a1.find(|ch: char| !ch.is_ascii_alphabetic())?;
    let (letters, digits) = a1.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let col = letters.bytes().try_fold(0u32, |acc, b| {
        acc.checked_mul(26)?
            .checked_add(u32::from(b.to_ascii_uppercase() - b'A') + 1)
    })?;
    let row: u32 = digits.parse().ok()?;

    if row == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}
