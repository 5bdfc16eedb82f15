use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod migrate;
mod roundup;

#[derive(Parser)]
#[command(about = "ignytus lead capture and directory api")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// serve the http api
    Listen,
    /// apply datastore migrations and make sure the resume bucket exists
    Migrate,
    /// print the current weekly roundup posts as json
    Roundup,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Roundup) => {
            roundup::print().await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
