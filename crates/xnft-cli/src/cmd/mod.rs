use anyhow::Result;

use crate::args::{Cli, Command};

mod account;
mod curate;
mod delete;
mod derive;
mod doctor;
mod install;
mod suspend;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Account { address, raw } => account::show(&cli, address, *raw).await,
        Command::List { kind, owner } => account::list(&cli, kind.as_deref(), owner.as_deref()).await,
        Command::Installs { wallet } => account::installs(&cli, wallet).await,
        Command::Reviews { xnft } => account::reviews(&cli, xnft).await,
        Command::Derive { target } => derive::run(&cli, target),
        Command::Install { xnft, permissioned } => install::install(&cli, xnft, *permissioned).await,
        Command::Uninstall { install, receiver } => {
            install::uninstall(&cli, install, receiver.as_deref()).await
        }
        Command::Review { xnft, rating, uri } => install::review(&cli, xnft, *rating, uri).await,
        Command::Verify { xnft } => curate::run(&cli, xnft, true).await,
        Command::Unverify { xnft } => curate::run(&cli, xnft, false).await,
        Command::Suspend { xnft, lift } => suspend::run(&cli, xnft, !*lift).await,
        Command::Delete {
            xnft,
            burn,
            receiver,
        } => delete::run(&cli, xnft, *burn, receiver.as_deref()).await,
        Command::Doctor => doctor::run(&cli).await,
    }
}
