//! Tag-group id codec
//!
//! Device groups and IP resource groups share one flat `u32` id space. Ids at
//! or above [`IP_GROUP_ID_FLAG`] are IP groups offset by the flag; everything
//! below is a device group id used as-is.

use std::fmt;

/// Offset separating device group ids from IP group ids
pub const IP_GROUP_ID_FLAG: u32 = 1_000_000_000;

/// A decoded tag-group id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupId {
    /// Group derived from a device
    Device(u32),
    /// Group derived from an address range
    Ip(u32),
}

impl GroupId {
    /// Bare numeric id without provenance
    pub fn id(&self) -> u32 {
        match self {
            GroupId::Device(id) | GroupId::Ip(id) => *id,
        }
    }
}

impl From<u32> for GroupId {
    fn from(raw: u32) -> Self {
        if raw >= IP_GROUP_ID_FLAG {
            GroupId::Ip(raw - IP_GROUP_ID_FLAG)
        } else {
            GroupId::Device(raw)
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Device(id) => write!(f, "DEV-{} ", id),
            GroupId::Ip(id) => write!(f, "IP-{} ", id),
        }
    }
}

/// Render a raw group id as `"DEV-<n> "` or `"IP-<n> "`
pub fn group_id_to_string(raw: u32) -> String {
    GroupId::from(raw).to_string()
}

/// Strip the IP group offset, keeping only the numeric id
pub fn format_group_id(raw: u32) -> u32 {
    GroupId::from(raw).id()
}
