#![warn(missing_docs)]

//! Entry point for the `tm30` binary.

mod cli;
mod commands;
mod error;
mod fill;
mod gate;

use std::{process, time::Duration};

use clap::Parser;
use config::{Settings, TimingPolicy, resolve_config_path};
use tm30_protocol::PersonId;
use tm30_store::{PinManager, ProfileStore, Store};
use tracing::error;

use crate::{
    cli::{Cli, Commands, PinCommands},
    error::{Error, Result},
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let settings = Settings::load(config_path.as_deref())?;

    let store = Store::open(&settings.store_path)?;
    let profiles = ProfileStore::new(store.clone());
    let pin = PinManager::new(store);
    if pin.is_enabled() {
        pin.set_lock_timeout(Duration::from_secs(settings.pin_lock_timeout_secs))?;
    }

    match cli.command {
        Commands::List => {
            gate::unlock(&pin)?;
            commands::list(&profiles)
        }
        Commands::Show { id } => {
            gate::unlock(&pin)?;
            commands::show(&profiles, id)
        }
        Commands::Add(args) => {
            gate::unlock(&pin)?;
            commands::add(&profiles, args)
        }
        Commands::Edit { id, fields } => {
            gate::unlock(&pin)?;
            commands::edit(&profiles, id, fields)
        }
        Commands::Delete { id } => {
            gate::unlock(&pin)?;
            commands::delete(&profiles, id)
        }
        Commands::Import { path } => {
            gate::unlock(&pin)?;
            commands::import(&profiles, &path)
        }
        Commands::Export { path } => {
            gate::unlock(&pin)?;
            commands::export(&profiles, &path)
        }
        Commands::Pin { command } => {
            // Changing or dropping an existing PIN needs the current one;
            // status and the explicit wipe do not.
            if matches!(command, PinCommands::Set { .. } | PinCommands::Remove) {
                gate::unlock(&pin)?;
            }
            commands::pin(&pin, command)
        }
        Commands::Fill { id, aggressive } => {
            gate::unlock(&pin)?;
            let id = PersonId(id);
            let person = profiles.get(id).ok_or(Error::NotFound(id))?;
            let timing = if aggressive {
                TimingPolicy::Aggressive.timing()
            } else {
                settings.timing.timing()
            };
            fill::run(person, timing)?;
            Ok(())
        }
    }
}
