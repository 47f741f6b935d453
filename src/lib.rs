//! vditree: display VDI snapshot/clone trees on storage repositories.
//!
//! The domain layer reconstructs the forest of snapshot lineages from a
//! flat mapping of disk-image records and renders it as indented text; the
//! backend layer supplies those records from LVM volume groups, mounted
//! file SRs, or saved `vhd-util scan` output.

pub mod backend;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
