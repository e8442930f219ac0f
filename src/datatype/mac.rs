// 48-bit hardware address packed into a u64
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FlowmetaError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddr(u64);

impl MacAddr {
    pub const ZERO: MacAddr = MacAddr(0);

    /// Build from a packed value; bits above 48 are dropped
    pub const fn new(raw: u64) -> Self {
        MacAddr(raw & 0xffff_ffff_ffff)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn octets(&self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        let mut b = [0u8; 8];
        b[2..].copy_from_slice(&octets);
        MacAddr(u64::from_be_bytes(b))
    }
}

impl From<pnet::util::MacAddr> for MacAddr {
    fn from(mac: pnet::util::MacAddr) -> Self {
        let pnet::util::MacAddr(a, b, c, d, e, f) = mac;
        MacAddr::from([a, b, c, d, e, f])
    }
}

impl From<MacAddr> for pnet::util::MacAddr {
    fn from(mac: MacAddr) -> Self {
        let [a, b, c, d, e, f] = mac.octets();
        pnet::util::MacAddr(a, b, c, d, e, f)
    }
}

impl FromStr for MacAddr {
    type Err = FlowmetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<pnet::util::MacAddr>()
            .map(MacAddr::from)
            .map_err(|e| FlowmetaError::InvalidMac(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pnet::util::MacAddr::from(*self))
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
