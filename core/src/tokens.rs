//! Alignment tokens and the merge that produces them.

use crate::error_codes;
use crate::lcs::Alignment;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One position of the merged before/after line sequences.
///
/// Indices refer to the sequences as they stood when the pass began: original
/// rows for the row pass, and the row-filtered grid's columns for the column
/// pass (which are also the original column indices).
///
/// Textual form: `s<i>:<j>`, `d<i>`, `a<j>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentToken {
    Same { before: u32, after: u32 },
    Deleted(u32),
    Added(u32),
}

impl AlignmentToken {
    pub fn before_index(&self) -> Option<u32> {
        match *self {
            AlignmentToken::Same { before, .. } | AlignmentToken::Deleted(before) => Some(before),
            AlignmentToken::Added(_) => None,
        }
    }

    pub fn after_index(&self) -> Option<u32> {
        match *self {
            AlignmentToken::Same { after, .. } | AlignmentToken::Added(after) => Some(after),
            AlignmentToken::Deleted(_) => None,
        }
    }

    pub fn is_same(&self) -> bool {
        matches!(self, AlignmentToken::Same { .. })
    }
}

impl fmt::Display for AlignmentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentToken::Same { before, after } => write!(f, "s{before}:{after}"),
            AlignmentToken::Deleted(i) => write!(f, "d{i}"),
            AlignmentToken::Added(j) => write!(f, "a{j}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[GRIDDIFF_TOKEN_001] invalid alignment token {input:?}. Suggestion: use `s<i>:<j>`, `d<i>` or `a<j>`.")]
pub struct TokenParseError {
    pub input: String,
}

impl TokenParseError {
    pub fn code(&self) -> &'static str {
        error_codes::TOKEN_PARSE
    }
}

impl FromStr for AlignmentToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TokenParseError {
            input: s.to_string(),
        };
        let index = |digits: &str| -> Result<u32, TokenParseError> {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            digits.parse().map_err(|_| err())
        };

        let (tag, rest) = s.split_at_checked(1).ok_or_else(err)?;
        match tag {
            "s" => {
                let (before, after) = rest.split_once(':').ok_or_else(err)?;
                Ok(AlignmentToken::Same {
                    before: index(before)?,
                    after: index(after)?,
                })
            }
            "d" => Ok(AlignmentToken::Deleted(index(rest)?)),
            "a" => Ok(AlignmentToken::Added(index(rest)?)),
            _ => Err(err()),
        }
    }
}

impl Serialize for AlignmentToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AlignmentToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        AlignmentToken::from_str(&text).map_err(|e| DeError::custom(e.to_string()))
    }
}

/// Merge an alignment into a token stream covering every position of both
/// sequences exactly once, in order.
///
/// Between two matches, pending deletions are emitted before pending additions.
/// When the next match is level with only one cursor, the other side's lines
/// are emitted one at a time until both cursors reach it.
pub fn generate_tokens(before_len: u32, after_len: u32, alignment: &Alignment) -> Vec<AlignmentToken> {
    debug_assert!(
        alignment
            .pairs()
            .all(|(b, a)| b < before_len && a < after_len),
        "alignment must index within both sequences"
    );

    let capacity = (before_len as usize + after_len as usize).saturating_sub(alignment.len());
    let mut tokens = Vec::with_capacity(capacity);
    let (mut i, mut j, mut k) = (0u32, 0u32, 0usize);

    while i < before_len || j < after_len {
        let Some((next_before, next_after)) = alignment.pair(k) else {
            if i < before_len {
                tokens.push(AlignmentToken::Deleted(i));
                i += 1;
            } else {
                tokens.push(AlignmentToken::Added(j));
                j += 1;
            }
            continue;
        };

        if next_before == i && next_after == j {
            tokens.push(AlignmentToken::Same {
                before: i,
                after: j,
            });
            i += 1;
            j += 1;
            k += 1;
        } else if next_before == i {
            tokens.push(AlignmentToken::Added(j));
            j += 1;
        } else if next_after == j {
            tokens.push(AlignmentToken::Deleted(i));
            i += 1;
        } else {
            while next_before > i {
                tokens.push(AlignmentToken::Deleted(i));
                i += 1;
            }
            while next_after > j {
                tokens.push(AlignmentToken::Added(j));
                j += 1;
            }
        }
    }

    tokens
}
