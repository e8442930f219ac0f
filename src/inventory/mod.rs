//! Inventory lookup
//!
//! Resolution never searches the inventory itself. It is handed entries by a
//! [`PlatformLookup`] implementation, which returns at most one candidate per
//! MAC or IP. [`Inventory`] is a simple snapshot-backed implementation used by
//! the command line tool and tests; production pipelines plug in their own
//! index.

use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::Path;

use crate::datatype::{MacAddr, PlatformData, MAX_MASK_LEN};
use crate::error::{FlowmetaError, Result, ValidationError};

/// Finds the inventory entry for an address
///
/// Implementations must be safe to read concurrently and must not change an
/// entry while a reference to it is held.
pub trait PlatformLookup {
    /// Entry owning a hardware address
    fn query_mac(&self, mac: MacAddr) -> Option<&PlatformData>;

    /// Entry owning an IPv4 address
    fn query_ip(&self, ip: Ipv4Addr) -> Option<&PlatformData>;
}

/// On-disk layout of an inventory snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFile {
    /// Control-plane version the snapshot was taken at
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub interfaces: Vec<PlatformData>,
}

/// In-memory inventory snapshot
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    version: u64,
    entries: Vec<PlatformData>,
    /// MAC -> index into entries, first entry wins
    by_mac: HashMap<MacAddr, usize>,
}

impl Inventory {
    /// Build a snapshot from entries
    pub fn new(version: u64, entries: Vec<PlatformData>) -> Self {
        let mut by_mac = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.mac == MacAddr::ZERO {
                continue;
            }
            if by_mac.contains_key(&entry.mac) {
                tracing::debug!(
                    "Duplicate MAC {} in inventory entry {}, ignored",
                    entry.mac,
                    index
                );
                continue;
            }
            by_mac.insert(entry.mac, index);
        }

        Self {
            version,
            entries,
            by_mac,
        }
    }

    /// Load and validate a JSON snapshot
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FlowmetaError::Inventory(format!(
                "Inventory file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| FlowmetaError::Io {
            source: e,
            context: format!("Failed to read inventory file: {:?}", path),
        })?;
        let file: InventoryFile =
            serde_json::from_str(&content).map_err(|e| FlowmetaError::Json {
                source: e,
                context: format!("Failed to parse inventory file: {:?}", path),
            })?;

        let inventory = Self::new(file.version, file.interfaces);
        inventory.validate()?;

        tracing::info!(
            "Loaded inventory version {} with {} entries",
            inventory.version,
            inventory.len()
        );
        Ok(inventory)
    }

    /// Check every address range for a usable prefix length
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            for (range, ip_net) in entry.ips.iter().enumerate() {
                if ip_net.prefix_len > MAX_MASK_LEN {
                    errors.push(ValidationError::new(
                        format!("interfaces[{}].ips[{}].prefix_len", index, range),
                        format!(
                            "Prefix length must be within 0..={}, got {}",
                            MAX_MASK_LEN, ip_net.prefix_len
                        ),
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FlowmetaError::InventoryValidation { errors })
        }
    }

    /// One line per entry: tab, 1-based index, compact JSON
    pub fn dump(&self) -> Result<Vec<String>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let json = serde_json::to_string(entry).map_err(|e| FlowmetaError::Json {
                    source: e,
                    context: format!("Failed to encode inventory entry {}", index + 1),
                })?;
                Ok(format!("\t{}: {}", index + 1, json))
            })
            .collect()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PlatformLookup for Inventory {
    fn query_mac(&self, mac: MacAddr) -> Option<&PlatformData> {
        self.by_mac.get(&mac).map(|index| &self.entries[*index])
    }

    /// First entry whose host address is `ip` or that owns a range containing it.
    /// An unset (0.0.0.0) host address never matches by equality.
    fn query_ip(&self, ip: Ipv4Addr) -> Option<&PlatformData> {
        self.entries.iter().find(|entry| {
            (!entry.host_ip.is_unspecified() && entry.host_ip == ip)
                || entry.find_ip_net(ip).is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::IpNet;

    fn entry(mac: u64, epc_id: i32, net: [u8; 4], prefix_len: u32) -> PlatformData {
        PlatformData {
            epc_id,
            mac: MacAddr::new(mac),
            ips: vec![IpNet::new(Ipv4Addr::from(net), prefix_len, epc_id as u32)],
            ..Default::default()
        }
    }

    #[test]
    fn test_query_mac_first_wins() {
        let inventory = Inventory::new(
            1,
            vec![entry(1, 10, [10, 0, 0, 0], 24), entry(1, 20, [10, 1, 0, 0], 24)],
        );
        assert_eq!(inventory.query_mac(MacAddr::new(1)).unwrap().epc_id, 10);
        assert!(inventory.query_mac(MacAddr::new(2)).is_none());
    }

    #[test]
    fn test_zero_mac_not_indexed() {
        let inventory = Inventory::new(1, vec![entry(0, 10, [10, 0, 0, 0], 24)]);
        assert!(inventory.query_mac(MacAddr::ZERO).is_none());
    }

    #[test]
    fn test_unset_host_ip_not_matched() {
        // entry has no host_ip and its range does not cover 0.0.0.0
        let inventory = Inventory::new(1, vec![entry(1, 10, [10, 0, 0, 0], 24)]);
        assert!(inventory.query_ip(Ipv4Addr::UNSPECIFIED).is_none());

        let catch_all = entry(2, 20, [0, 0, 0, 0], 0);
        let inventory = Inventory::new(1, vec![entry(1, 10, [10, 0, 0, 0], 24), catch_all]);
        assert_eq!(inventory.query_ip(Ipv4Addr::UNSPECIFIED).unwrap().epc_id, 20);
    }

    #[test]
    fn test_query_ip() {
        let mut host = entry(3, 30, [192, 168, 0, 0], 16);
        host.host_ip = Ipv4Addr::new(172, 16, 0, 9);
        let inventory = Inventory::new(1, vec![entry(1, 10, [10, 0, 0, 0], 24), host]);

        assert_eq!(inventory.query_ip(Ipv4Addr::new(10, 0, 0, 77)).unwrap().epc_id, 10);
        assert_eq!(inventory.query_ip(Ipv4Addr::new(192, 168, 3, 4)).unwrap().epc_id, 30);
        assert_eq!(inventory.query_ip(Ipv4Addr::new(172, 16, 0, 9)).unwrap().epc_id, 30);
        assert!(inventory.query_ip(Ipv4Addr::new(8, 8, 8, 8)).is_none());
    }

    #[test]
    fn test_validate_prefix() {
        let inventory = Inventory::new(
            1,
            vec![entry(1, 10, [10, 0, 0, 0], 24), entry(2, 20, [10, 1, 0, 0], 33)],
        );
        match inventory.validate() {
            Err(FlowmetaError::InventoryValidation { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "interfaces[1].ips[0].prefix_len");
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_dump() {
        let inventory = Inventory::new(1, vec![entry(1, 10, [10, 0, 0, 0], 24)]);
        let lines = inventory.dump().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("\t1: {"));
        assert!(lines[0].contains("\"mac\":\"00:00:00:00:00:01\""));
    }
}
