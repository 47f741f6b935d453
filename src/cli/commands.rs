//! Command dispatch: enumerate, build, render, print.

use std::io::Read;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::backend::{
    parse_scan_output, vdi_sizes, BackendError, DiskEnumerator, FileEnumerator, LvmEnumerator,
    SrKind,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{build_forest, render_forest, SizeExtract, VdiInfo};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Sr { uuid, kind }) => _sr(uuid, kind, cli.no_sizes),
        Some(Commands::Lvm { vg_name }) => _lvm(vg_name, cli.no_sizes),
        Some(Commands::File { path }) => _file(path, cli.no_sizes),
        Some(Commands::Scan { file }) => _scan(file.as_deref(), cli.no_sizes),
        Some(Commands::Config { command }) => _config(command),
        // Completion is handled in main before dispatch
        Some(Commands::Completion { .. }) | None => Ok(()),
    }
}

/// Build the forest from the records and print the rendered listing.
fn list_tree(vdis: &IndexMap<String, VdiInfo>, no_sizes: bool) -> CliResult<()> {
    let size_extract: Option<&SizeExtract<VdiInfo>> =
        if no_sizes { None } else { Some(&vdi_sizes) };

    let forest = build_forest(vdis)?;
    output::info(render_forest(&forest, size_extract).trim_end());
    Ok(())
}

#[instrument]
fn _sr(uuid: &str, kind: &str, no_sizes: bool) -> CliResult<()> {
    let settings = Settings::load()?;
    let sr_kind =
        SrKind::from_sr_type(kind).ok_or_else(|| BackendError::UnsupportedSrType(kind.to_string()))?;

    output::header(&format!("{uuid} - {kind}"));

    let vdis = match sr_kind {
        SrKind::Lvm => LvmEnumerator::for_sr(&settings, uuid).enumerate()?,
        SrKind::File => FileEnumerator::for_sr(&settings, uuid).enumerate()?,
    };
    debug!(vdis = vdis.len(), "enumerated sr");
    list_tree(&vdis, no_sizes)
}

#[instrument]
fn _lvm(vg_name: &str, no_sizes: bool) -> CliResult<()> {
    let settings = Settings::load()?;
    let vdis = LvmEnumerator::new(vg_name, settings.vhd_util).enumerate()?;
    list_tree(&vdis, no_sizes)
}

#[instrument]
fn _file(path: &Path, no_sizes: bool) -> CliResult<()> {
    let vdis = FileEnumerator::new(path).enumerate()?;
    list_tree(&vdis, no_sizes)
}

#[instrument]
fn _scan(file: Option<&Path>, no_sizes: bool) -> CliResult<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| CliError::Io {
            context: format!("read {}", path.display()),
            source: e,
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::Io {
                    context: "read stdin".to_string(),
                    source: e,
                })?;
            buf
        }
    };

    let vdis = parse_scan_output(&content)?;
    list_tree(&vdis, no_sizes)
}

#[instrument]
fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let path = global_config_path().unwrap_or_else(|| PathBuf::from("<unavailable>"));
            output::info(&path.display());
        }
    }
    Ok(())
}
