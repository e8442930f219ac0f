//! Flow and endpoint data types
//!
//! Inventory entries, raw flow keys, and the per-direction identity records
//! that resolution fills in.

mod endpoint;
mod group;
mod lookup_key;
mod mac;
mod platform;
mod tap;

pub use endpoint::{EndpointData, EndpointInfo, EPC_FROM_INTERNET, INVALID_ENDPOINT_DATA};
pub use group::{format_group_id, group_id_to_string, GroupId, IP_GROUP_ID_FLAG};
pub use lookup_key::LookupKey;
pub use mac::MacAddr;
pub use platform::{netmask, IpNet, PlatformData, MAX_MASK_LEN};
pub use tap::{TapType, TAP_MIN};
