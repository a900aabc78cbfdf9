// Author Dustin Pilgrim
// License: MIT

use crate::{
    cli::{Cli, Cmd},
    config::Config,
    log::Log,
};
use std::process::ExitCode;

pub mod machine;
pub mod status;

pub fn dispatch(log: &Log, cli: Cli, cfg: Config) -> ExitCode {
    match cli.cmd {
        Cmd::Status => status::run_status(log, &cli, &cfg),

        Cmd::Init {
            yes,
            image,
            workdir,
        } => machine::init(log, &cfg, yes, &image, &workdir),

        Cmd::Up => machine::up(log, &cfg),
        Cmd::Down => machine::down(log, &cfg),
        Cmd::Ssh => machine::ssh(log, &cfg),

        Cmd::Update { yes } => machine::update(log, &cfg, yes),
    }
}
