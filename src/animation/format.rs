//! Binary format definitions for rig animation frames.
//!
//! Each frame's trailing control byte packs two independent 4-bit codes:
//! the eye expression in the low nibble and the mouth expression in the
//! high nibble.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Size of one frame in bytes. Fixed by the rig format.
pub const FRAME_SIZE: usize = 86;

/// Offset of the control byte within a frame.
pub const CONTROL_BYTE_OFFSET: usize = FRAME_SIZE - 1;

/// Largest code a nibble can hold.
pub const MAX_CODE: u8 = 0x0F;

/// Which half of the control byte is being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Eye expression (low nibble).
    Eye,
    /// Mouth expression (high nibble).
    Mouth,
}

impl Category {
    /// Both categories, in listing order.
    pub const ALL: [Category; 2] = [Category::Eye, Category::Mouth];

    /// Bit position of this category's nibble.
    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Category::Eye => 0,
            Category::Mouth => 4,
        }
    }

    /// Extract this category's code from a control byte.
    #[inline]
    pub const fn decode(self, byte: u8) -> u8 {
        (byte >> self.shift()) & MAX_CODE
    }

    /// Replace this category's nibble, leaving the other one untouched.
    #[inline]
    pub const fn encode(self, byte: u8, code: u8) -> u8 {
        let shift = self.shift();
        (byte & !(MAX_CODE << shift)) | ((code & MAX_CODE) << shift)
    }

    /// Display label for a code, or an empty string for codes with no name.
    pub fn label(self, code: u8) -> &'static str {
        match self {
            Category::Eye => EyeExpression::from_code(code).map_or("", EyeExpression::label),
            Category::Mouth => MouthExpression::from_code(code).map_or("", MouthExpression::label),
        }
    }

    /// Label for listings: the name if there is one, otherwise `#<code>`.
    pub fn describe_code(self, code: u8) -> String {
        match self.label(code) {
            "" => format!("#{}", code),
            label => label.to_string(),
        }
    }

    /// Labels of every named code, indexed by code.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Category::Eye => &EYE_LABELS,
            Category::Mouth => &MOUTH_LABELS,
        }
    }

    /// Parse an expression given either as a label (case-insensitive) or
    /// as a numeric code in `0..=15`.
    pub fn parse_code(self, s: &str) -> Option<u8> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return (code <= MAX_CODE).then_some(code);
        }
        self.labels()
            .iter()
            .position(|label| label.eq_ignore_ascii_case(s))
            .map(|i| i as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Eye => "eye",
            Category::Mouth => "mouth",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eye" | "eyes" => Ok(Category::Eye),
            "mouth" => Ok(Category::Mouth),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Returned when a category name is neither `eye` nor `mouth`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown expression category '{0}' (expected 'eye' or 'mouth')")]
pub struct UnknownCategory(pub String);

const EYE_LABELS: [&str; 9] = [
    "AUTO", "OPEN", "HALF", "CLOSED", "LEFT", "RIGHT", "SHOCK", "DOWN", "CLTIGHT",
];

const MOUTH_LABELS: [&str; 5] = ["AUTO", "CLOSED", "SLIGHT", "WIDE", "SMILE"];

/// Named eye expression codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EyeExpression {
    /// Driven by the rig's own blink logic.
    Auto = 0,
    Open = 1,
    Half = 2,
    Closed = 3,
    /// Looking left.
    Left = 4,
    /// Looking right.
    Right = 5,
    /// Shocked / surprised.
    Shock = 6,
    /// Looking down.
    Down = 7,
    /// Tightly closed.
    ClTight = 8,
}

impl EyeExpression {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EyeExpression::Auto),
            1 => Some(EyeExpression::Open),
            2 => Some(EyeExpression::Half),
            3 => Some(EyeExpression::Closed),
            4 => Some(EyeExpression::Left),
            5 => Some(EyeExpression::Right),
            6 => Some(EyeExpression::Shock),
            7 => Some(EyeExpression::Down),
            8 => Some(EyeExpression::ClTight),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        EYE_LABELS[self as usize]
    }
}

/// Named mouth expression codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouthExpression {
    /// Driven by the rig's own logic.
    Auto = 0,
    Closed = 1,
    /// Slightly open (playing an instrument).
    Slight = 2,
    /// Wide open (shouting).
    Wide = 3,
    /// Open smile.
    Smile = 4,
}

impl MouthExpression {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(MouthExpression::Auto),
            1 => Some(MouthExpression::Closed),
            2 => Some(MouthExpression::Slight),
            3 => Some(MouthExpression::Wide),
            4 => Some(MouthExpression::Smile),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        MOUTH_LABELS[self as usize]
    }
}

/// Eye code stored in a control byte.
#[inline]
pub const fn decode_eye(byte: u8) -> u8 {
    Category::Eye.decode(byte)
}

/// Mouth code stored in a control byte.
#[inline]
pub const fn decode_mouth(byte: u8) -> u8 {
    Category::Mouth.decode(byte)
}

/// Write an eye code, preserving the mouth nibble.
#[inline]
pub const fn encode_eye(byte: u8, code: u8) -> u8 {
    Category::Eye.encode(byte, code)
}

/// Write a mouth code, preserving the eye nibble.
#[inline]
pub const fn encode_mouth(byte: u8, code: u8) -> u8 {
    Category::Mouth.encode(byte, code)
}
