// Raw flow key produced by the packet decoder
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use crate::datatype::mac::MacAddr;
use crate::datatype::tap::TapType;

/// Decoded header fields of one packet, as handed to endpoint resolution.
///
/// Resolution only reads the addresses, MACs, `ttl` and the two L2 end flags;
/// the remaining fields travel with the key for later pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupKey {
    pub timestamp: Duration,
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub eth_type: u16,
    pub vlan: u16,
    pub proto: u8,
    pub ttl: u8,
    /// Source side is an L2 end, computed by the L2 topology stage
    pub l2_end_0: bool,
    /// Destination side is an L2 end
    pub l2_end_1: bool,
    pub tap: TapType,
    pub invalid: bool,
    pub fast_index: usize,
    pub src_group_ids: Vec<u32>,
    pub dst_group_ids: Vec<u32>,
}

impl Default for LookupKey {
    fn default() -> Self {
        Self {
            timestamp: Duration::ZERO,
            src_mac: MacAddr::ZERO,
            dst_mac: MacAddr::ZERO,
            src_ip: Ipv4Addr::UNSPECIFIED,
            dst_ip: Ipv4Addr::UNSPECIFIED,
            src_port: 0,
            dst_port: 0,
            eth_type: 0,
            vlan: 0,
            proto: 0,
            ttl: 0,
            l2_end_0: false,
            l2_end_1: false,
            tap: TapType::Any,
            invalid: false,
            fast_index: 0,
            src_group_ids: Vec::new(),
            dst_group_ids: Vec::new(),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{} > {} {}:{} proto:{} ttl:{} tap:{} l2_end:{}/{}",
            self.src_mac,
            self.src_ip,
            self.src_port,
            self.dst_mac,
            self.dst_ip,
            self.dst_port,
            self.proto,
            self.ttl,
            self.tap,
            self.l2_end_0,
            self.l2_end_1
        )
    }
}
