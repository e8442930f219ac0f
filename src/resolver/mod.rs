//! Flow endpoint resolution
//!
//! Drives the [`EndpointInfo`] setters for both sides of one flow, using a
//! [`PlatformLookup`] to find the inventory entries. Which boundary
//! heuristics run is controlled by [`ResolveOptions`].
//!
//! For each side the entry found by MAC supplies the L2 identity and the entry
//! found by IP supplies the L3 identity. The heuristics then mark L3 ends:
//! - TTL: source side only, since the TTL belongs to the packet the source sent
//! - IP: on an L2 end, when the device behind the MAC owns the IP
//! - MAC: on an L2 end, when the device owning the IP has the observed MAC

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::datatype::{EndpointData, EndpointInfo, LookupKey, MacAddr, INVALID_ENDPOINT_DATA};
use crate::inventory::PlatformLookup;

/// Boundary heuristics to apply during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub l3_end_by_ttl: bool,
    pub l3_end_by_ip: bool,
    pub l3_end_by_mac: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            l3_end_by_ttl: true,
            l3_end_by_ip: true,
            l3_end_by_mac: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Src,
    Dst,
}

/// Resolves flow keys against an inventory
pub struct Resolver<'a, L: PlatformLookup> {
    lookup: &'a L,
    options: ResolveOptions,
}

impl<'a, L: PlatformLookup> Resolver<'a, L> {
    pub fn new(lookup: &'a L, options: ResolveOptions) -> Self {
        Self { lookup, options }
    }

    /// Build the endpoint pair for one flow key.
    ///
    /// A key flagged invalid by the decoder yields a copy of
    /// [`INVALID_ENDPOINT_DATA`].
    pub fn resolve(&self, key: &LookupKey) -> EndpointData {
        if key.invalid {
            tracing::trace!("Invalid lookup key, returning empty endpoint data");
            return INVALID_ENDPOINT_DATA.clone();
        }

        let mut data = EndpointData::new();
        data.set_l2_end(key);

        self.resolve_side(&mut data.src_info, key.src_mac, key.src_ip, Side::Src, key.ttl);
        self.resolve_side(&mut data.dst_info, key.dst_mac, key.dst_ip, Side::Dst, key.ttl);

        tracing::debug!("Resolved {} => {}", key, data);
        data
    }

    fn resolve_side(
        &self,
        info: &mut EndpointInfo,
        mac: MacAddr,
        ip: Ipv4Addr,
        side: Side,
        ttl: u8,
    ) {
        let l2_data = self.lookup.query_mac(mac);
        let l3_data = self.lookup.query_ip(ip);

        tracing::trace!(
            "{:?} {} {}: l2 entry {}, l3 entry {}",
            side,
            mac,
            ip,
            l2_data.is_some(),
            l3_data.is_some()
        );

        if let Some(l2_data) = l2_data {
            info.set_l2_data(l2_data);
        }
        if let Some(l3_data) = l3_data {
            info.set_l3_data(l3_data, ip);
        }

        if self.options.l3_end_by_ttl && side == Side::Src {
            info.set_l3_end_by_ttl(ttl);
        }

        if !info.l2_end {
            return;
        }
        if self.options.l3_end_by_ip {
            if let Some(l2_data) = l2_data {
                info.set_l3_end_by_ip(l2_data, ip);
            }
        }
        if self.options.l3_end_by_mac {
            if let Some(l3_data) = l3_data {
                info.set_l3_end_by_mac(l3_data, mac);
            }
        }
    }
}
