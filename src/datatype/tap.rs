// Access point classification: where a packet was captured
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FlowmetaError;

/// Vantage point a flow was observed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TapType {
    /// Unspecified capture point
    #[default]
    Any = 0,
    /// Peering edge towards the ISP
    Isp = 1,
    /// Spine switch
    Spine = 2,
    /// Top-of-rack switch
    Tor = 3,
    /// Upper bound, not a real tap
    Max = 4,
}

/// First real tap value. Declared for callers that want to exclude `Any`;
/// `check_tap_type` does not use it.
pub const TAP_MIN: TapType = TapType::Isp;

impl TapType {
    /// A raw value is valid iff it is below `TapType::Max`, so `Any` passes.
    pub fn check_tap_type(raw: u8) -> bool {
        raw < TapType::Max as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TapType::Any => "any",
            TapType::Isp => "isp",
            TapType::Spine => "spine",
            TapType::Tor => "tor",
            TapType::Max => "max",
        }
    }
}

impl TryFrom<u8> for TapType {
    type Error = FlowmetaError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(TapType::Any),
            1 => Ok(TapType::Isp),
            2 => Ok(TapType::Spine),
            3 => Ok(TapType::Tor),
            _ => Err(FlowmetaError::InvalidTapType(raw)),
        }
    }
}

impl fmt::Display for TapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
