//! Parser for `vhd-util scan` output.
//!
//! One line per image, e.g. on an LVM SR:
//!
//! ```text
//! vhd=VHD-866e1477-... capacity=10737418240 size=2684354560 hidden=1 parent=none
//! vhd=VHD-c16b4d27-... capacity=10737418240 size=8388608 hidden=0 parent=VHD-866e1477-...
//! ```
//!
//! On a file SR the `vhd=` and `parent=` values are paths ending in `.vhd`.
//! Leading whitespace (vhd-util indents children) is ignored; the tree
//! structure is rebuilt from the parent references alone.

use indexmap::IndexMap;
use regex::Regex;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::domain::VdiInfo;

/// Extract the VDI uuid from a `vhd=` value: a path or LV name such as
/// `/run/sr-mount/<sr>/866e1477-....vhd` or `VHD-866e1477-...`.
///
/// Strips the directory, a `.vhd`/`.raw` extension and a `VHD-`/`LV-`
/// prefix, then requires the remainder to parse as a uuid.
pub fn extract_uuid(name: &str) -> Option<String> {
    let base = name.trim().rsplit('/').next()?;
    let stem = base
        .strip_suffix(".vhd")
        .or_else(|| base.strip_suffix(".raw"))
        .unwrap_or(base);
    let stem = stem
        .strip_prefix("VHD-")
        .or_else(|| stem.strip_prefix("LV-"))
        .unwrap_or(stem);
    Uuid::parse_str(stem).ok().map(|u| u.to_string())
}

/// Parse complete `vhd-util scan` output into an ordered record mapping.
///
/// Lines flagged `scan-error=` (broken images vhd-util could not read) and
/// entries whose name is not a VDI uuid are logged and skipped; any other
/// line that does not match the scan grammar fails the parse.
#[instrument(level = "debug", skip(output))]
pub fn parse_scan_output(output: &str) -> BackendResult<IndexMap<String, VdiInfo>> {
    // hidden= is validated but not kept: the listing never displays it
    let line_re = Regex::new(
        r"^vhd=(\S+)\s+capacity=(\d+)\s+size=(\d+)\s+hidden=\d+(?:\s+parent=(\S+))?$",
    )
    .expect("scan line regex");

    let mut vdis: IndexMap<String, VdiInfo> = IndexMap::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains("scan-error=") {
            warn!(%line, "skipping unreadable image");
            continue;
        }

        let caps = line_re
            .captures(line)
            .ok_or_else(|| BackendError::ScanFormat {
                line: line.to_string(),
            })?;

        let name = &caps[1];
        let Some(uuid) = extract_uuid(name) else {
            // Non-VDI volumes (MGT and friends) show up in scan output too
            warn!(%name, "image name is not a vdi uuid, skipping");
            continue;
        };
        let capacity: u64 = caps[2].parse().map_err(|_| BackendError::ScanFormat {
            line: line.to_string(),
        })?;
        let size: u64 = caps[3].parse().map_err(|_| BackendError::ScanFormat {
            line: line.to_string(),
        })?;

        let parent_uuid = match caps.get(4).map(|m| m.as_str()) {
            None | Some("none") => None,
            Some(parent) => Some(extract_uuid(parent).ok_or_else(|| BackendError::ScanFormat {
                line: line.to_string(),
            })?),
        };

        let previous = vdis.insert(
            uuid.clone(),
            VdiInfo {
                uuid: uuid.clone(),
                parent_uuid,
                size_virt: capacity,
                size_phys: size,
            },
        );
        if previous.is_some() {
            warn!(%uuid, "duplicate image in scan output, keeping last entry");
        }
    }

    Ok(vdis)
}
