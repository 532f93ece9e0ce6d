//! Element payloads and validation of raw caller input.
//!
//! The presentation layer hands the simulator strings and signed
//! integers straight out of input fields. [`Payload::parse`] and
//! [`parse_position`] turn them into checked values or an
//! [`ArgumentError`].

use std::fmt;
use std::str::FromStr;

use crate::error::ArgumentError;

/// A single-character element stored in an occupied slot.
///
/// The empty sentinel is not a `Payload`; nodes model it as
/// `Option<Payload>::None`. NUL is reserved for that sentinel in the
/// C-style rendering and is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Payload(char);

impl Payload {
    /// Wrap a character, rejecting the reserved NUL.
    pub fn new(c: char) -> Result<Self, ArgumentError> {
        if c == '\0' {
            return Err(ArgumentError::ReservedPayload);
        }
        Ok(Self(c))
    }

    /// Parse a payload from raw input text.
    ///
    /// The text must contain exactly one character.
    pub fn parse(input: &str) -> Result<Self, ArgumentError> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(ArgumentError::EmptyPayload),
            (Some(c), None) => Self::new(c),
            (Some(_), Some(_)) => Err(ArgumentError::MultiCharPayload {
                chars: input.chars().count(),
            }),
        }
    }

    /// The wrapped character.
    pub fn get(self) -> char {
        self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Payload {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<char> for Payload {
    type Error = ArgumentError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c)
    }
}

impl From<Payload> for char {
    fn from(p: Payload) -> Self {
        p.0
    }
}

/// Validate a raw insertion position.
///
/// Positions are logical offsets from the head; 0 means "immediately
/// after the head".
pub fn parse_position(raw: i64) -> Result<usize, ArgumentError> {
    usize::try_from(raw).map_err(|_| ArgumentError::NegativePosition { position: raw })
}
