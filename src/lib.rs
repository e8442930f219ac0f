//! flowmeta - flow endpoint identity resolution
//!
//! Enriches raw flow observations with identity metadata from a control-plane
//! inventory: EPC membership, device identity, subnet, tag groups, and whether
//! each side of the flow is the true endpoint at layer 2 and layer 3.

pub mod cli;
pub mod config;
pub mod datatype;
pub mod error;
pub mod inventory;
pub mod resolver;

pub use error::{FlowmetaError, Result};
