//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Display VDI snapshot/clone trees on LVM and file storage repositories
#[derive(Parser, Debug)]
#[command(name = "vditree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Render size columns as '?' instead of querying sizes
    #[arg(long, global = true)]
    pub no_sizes: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List trees of one SR, dispatching on its type string
    Sr {
        /// SR uuid
        #[arg(short, long)]
        uuid: String,

        /// SR type (lvm, lvmoiscsi, lvmohba, lvmofcoe, nfs, smb, ext)
        #[arg(short, long)]
        kind: String,
    },

    /// List trees of an LVM volume group directly
    Lvm {
        /// Volume group name, e.g. VG_XenStorage-<sr-uuid>
        vg_name: String,
    },

    /// List trees of a mounted file SR directory directly
    File {
        /// SR mount directory containing *.vhd / *.raw images
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },

    /// Render trees from saved `vhd-util scan` output
    Scan {
        /// Scan output file (stdin when omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,

    /// Show config file path
    Path,
}
