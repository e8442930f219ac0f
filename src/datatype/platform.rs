//! Inventory entries as delivered by the control plane
//!
//! A [`PlatformData`] describes one known device: its EPC membership, device
//! identity, addresses, tag groups and the address ranges it owns. Entries are
//! read-only to the resolution code; finding the right entry for an address is
//! the job of a [`crate::inventory::PlatformLookup`] implementation.

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::datatype::mac::MacAddr;
use crate::error::{FlowmetaError, Result};

/// Width of an IPv4 address in bits
pub const MAX_MASK_LEN: u32 = 32;

/// Network mask for a prefix length, rejecting lengths wider than an address
pub fn netmask(prefix_len: u32) -> Result<u32> {
    if prefix_len > MAX_MASK_LEN {
        return Err(FlowmetaError::InvalidPrefixLength { prefix: prefix_len });
    }
    let network = Ipv4Network::new(Ipv4Addr::UNSPECIFIED, prefix_len as u8)
        .map_err(|_| FlowmetaError::InvalidPrefixLength { prefix: prefix_len })?;
    Ok(u32::from(network.mask()))
}

/// One address range owned by an inventory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpNet {
    /// Network address of the range
    pub ip: Ipv4Addr,

    /// Prefix length
    #[serde(alias = "netmask")]
    pub prefix_len: u32,

    /// Subnet the range belongs to
    #[serde(default)]
    pub subnet_id: u32,
}

impl IpNet {
    pub fn new(ip: Ipv4Addr, prefix_len: u32, subnet_id: u32) -> Self {
        Self {
            ip,
            prefix_len,
            subnet_id,
        }
    }

    /// True when `ip` masked by this range's prefix equals the stored address.
    ///
    /// The stored address is compared as-is, so a range whose address has host
    /// bits set never matches. An out-of-range prefix never matches.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        match netmask(self.prefix_len) {
            Ok(mask) => u32::from(self.ip) == u32::from(ip) & mask,
            Err(e) => {
                tracing::warn!("Skipping address range {}/{}: {}", self.ip, self.prefix_len, e);
                false
            }
        }
    }
}

/// Control-plane description of one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformData {
    /// EPC (virtual network) id, 0 when unassigned
    #[serde(default)]
    pub epc_id: i32,

    #[serde(default)]
    pub device_type: u32,

    #[serde(default)]
    pub device_id: u32,

    #[serde(default = "unspecified")]
    pub host_ip: Ipv4Addr,

    #[serde(default)]
    pub mac: MacAddr,

    /// Tag groups the device belongs to
    #[serde(default)]
    pub group_ids: Vec<u32>,

    /// Address ranges, scanned in order
    #[serde(default)]
    pub ips: Vec<IpNet>,
}

fn unspecified() -> Ipv4Addr {
    Ipv4Addr::UNSPECIFIED
}

impl Default for PlatformData {
    fn default() -> Self {
        Self {
            epc_id: 0,
            device_type: 0,
            device_id: 0,
            host_ip: Ipv4Addr::UNSPECIFIED,
            mac: MacAddr::ZERO,
            group_ids: Vec::new(),
            ips: Vec::new(),
        }
    }
}

impl PlatformData {
    /// First range in list order that contains `ip`
    pub fn find_ip_net(&self, ip: Ipv4Addr) -> Option<&IpNet> {
        self.ips.iter().find(|ip_net| ip_net.contains(ip))
    }
}
