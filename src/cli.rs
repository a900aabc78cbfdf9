// Author Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name="devm", version, about="Vagrant dev machine front door (vagrant + salt)")]
pub struct Cli {
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    Status,

    /// Bootstrap a machine: salt clone, Vagrantfile, box add, first up
    Init {
        /// Skip the working-directory confirmation prompt
        #[arg(short = 'y', long, aliases = ["no-confirm", "noconfirm"])]
        yes: bool,

        /// Path to the .box image to register
        image: PathBuf,

        /// Working directory synced into the machine
        workdir: PathBuf,
    },

    /// Start the machine (vagrant up)
    Up,

    /// Halt the machine (vagrant halt)
    Down,

    /// Open an interactive shell in the machine
    Ssh,

    /// Halt, pull the latest salt states, start with re-provision
    Update {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long, aliases = ["no-confirm", "noconfirm"])]
        yes: bool,
    },
}
