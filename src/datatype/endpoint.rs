//! Per-direction endpoint identity
//!
//! [`EndpointInfo`] holds what is known about one side of a flow after it has
//! been matched against the inventory. It is filled by discrete setters; the
//! caller decides which of them apply to a given flow. [`EndpointData`] pairs
//! the source and destination records.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

use crate::datatype::group::group_id_to_string;
use crate::datatype::lookup_key::LookupKey;
use crate::datatype::mac::MacAddr;
use crate::datatype::platform::PlatformData;

/// L3 EPC id meaning "not in any known EPC", i.e. an external address
pub const EPC_FROM_INTERNET: i32 = -1;

/// TTLs that operating systems use as initial values
const DEFAULT_TTLS: [u8; 3] = [64, 128, 255];

/// Display labels in declared field order
const FIELD_NAMES: [&str; 11] = [
    "L2EpcId",
    "L2DeviceType",
    "L2DeviceId",
    "L2End",
    "L3EpcId",
    "L3DeviceType",
    "L3DeviceId",
    "L3End",
    "HostIp",
    "SubnetId",
    "GroupIds",
];

/// Shared "no endpoint data" value. Never mutated; clone it or call
/// [`EndpointData::new`] for a working instance.
pub static INVALID_ENDPOINT_DATA: EndpointData = EndpointData::new();

/// Identity of one side of a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    pub l2_epc_id: i32,
    pub l2_device_type: u32,
    pub l2_device_id: u32,
    pub l2_end: bool,

    /// -1 when the address belongs to no EPC
    pub l3_epc_id: i32,
    pub l3_device_type: u32,
    pub l3_device_id: u32,
    pub l3_end: bool,

    pub host_ip: Ipv4Addr,
    pub subnet_id: u32,
    /// Append-only; duplicates and order are kept
    pub group_ids: Vec<u32>,
}

impl EndpointInfo {
    pub const fn new() -> Self {
        Self {
            l2_epc_id: 0,
            l2_device_type: 0,
            l2_device_id: 0,
            l2_end: false,
            l3_epc_id: 0,
            l3_device_type: 0,
            l3_device_id: 0,
            l3_end: false,
            host_ip: Ipv4Addr::UNSPECIFIED,
            subnet_id: 0,
            group_ids: Vec::new(),
        }
    }

    /// Copy L2 identity from the entry found by MAC. The EPC id is taken
    /// verbatim and the entry's groups are appended.
    pub fn set_l2_data(&mut self, data: &PlatformData) {
        self.l2_epc_id = data.epc_id;
        self.l2_device_type = data.device_type;
        self.l2_device_id = data.device_id;
        self.host_ip = data.host_ip;
        self.group_ids.extend_from_slice(&data.group_ids);
    }

    /// Copy L3 identity from the entry found by IP.
    ///
    /// An unassigned EPC (0) becomes [`EPC_FROM_INTERNET`]. The subnet is
    /// taken from the first range in list order containing `ip`, not the
    /// longest prefix; with no match it is left untouched.
    pub fn set_l3_data(&mut self, data: &PlatformData, ip: Ipv4Addr) {
        self.l3_epc_id = if data.epc_id == 0 {
            EPC_FROM_INTERNET
        } else {
            data.epc_id
        };
        self.l3_device_type = data.device_type;
        self.l3_device_id = data.device_id;

        if let Some(ip_net) = data.find_ip_net(ip) {
            self.subnet_id = ip_net.subnet_id;
        }
    }

    /// A TTL still at an OS default has not crossed a router since it left
    /// the sender, so the sender is the L3 end.
    pub fn set_l3_end_by_ttl(&mut self, ttl: u8) {
        if DEFAULT_TTLS.contains(&ttl) {
            self.l3_end = true;
        }
    }

    pub fn set_l3_end_by_ip(&mut self, data: &PlatformData, ip: Ipv4Addr) {
        if data.find_ip_net(ip).is_some() {
            self.l3_end = true;
        }
    }

    pub fn set_l3_end_by_mac(&mut self, data: &PlatformData, mac: MacAddr) {
        if data.mac == mac {
            self.l3_end = true;
        }
    }

    /// L3 EPC id with the external sentinel mapped to `None`
    pub fn l3_epc(&self) -> Option<i32> {
        match self.l3_epc_id {
            EPC_FROM_INTERNET => None,
            id => Some(id),
        }
    }

    pub fn group_ids_string(&self) -> String {
        self.group_ids
            .iter()
            .map(|id| group_id_to_string(*id))
            .collect()
    }
}

impl Default for EndpointInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EndpointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [
            l2_epc_id,
            l2_device_type,
            l2_device_id,
            l2_end,
            l3_epc_id,
            l3_device_type,
            l3_device_id,
            l3_end,
            host_ip,
            subnet_id,
            group_ids,
        ] = FIELD_NAMES;
        // host address renders as its packed u32 value
        let host_ip_raw = u32::from(self.host_ip);

        let scalars: [(&str, &dyn fmt::Display); 10] = [
            (l2_epc_id, &self.l2_epc_id),
            (l2_device_type, &self.l2_device_type),
            (l2_device_id, &self.l2_device_id),
            (l2_end, &self.l2_end),
            (l3_epc_id, &self.l3_epc_id),
            (l3_device_type, &self.l3_device_type),
            (l3_device_id, &self.l3_device_id),
            (l3_end, &self.l3_end),
            (host_ip, &host_ip_raw),
            (subnet_id, &self.subnet_id),
        ];
        for (name, value) in scalars {
            write!(f, "{}: {} ", name, value)?;
        }
        write!(f, "{}: [{}]", group_ids, self.group_ids_string())
    }
}

/// Source and destination identity of one flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointData {
    pub src_info: EndpointInfo,
    pub dst_info: EndpointInfo,
}

impl EndpointData {
    pub const fn new() -> Self {
        Self {
            src_info: EndpointInfo::new(),
            dst_info: EndpointInfo::new(),
        }
    }

    /// Take the L2 end flags computed by the L2 topology stage as-is
    pub fn set_l2_end(&mut self, key: &LookupKey) {
        self.src_info.l2_end = key.l2_end_0;
        self.dst_info.l2_end = key.l2_end_1;
    }
}

impl Default for EndpointData {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EndpointData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SRC: {{{}}},\tDST: {{{}}}", self.src_info, self.dst_info)
    }
}
