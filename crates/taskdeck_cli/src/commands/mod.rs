//! Command dispatch.

pub mod config;
pub mod tasks;

use anyhow::Result;

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    let offline = cli.offline;
    let app = || tasks::app_config(offline);
    match cli.command {
        Command::List { search, filter, sort } => tasks::list(&app()?, search, filter, sort).await,
        Command::Add { title, description } => tasks::add(&app()?, title, description).await,
        Command::Edit {
            id,
            title,
            description,
        } => tasks::edit(&app()?, id, title, description).await,
        Command::Toggle { id } => tasks::toggle(&app()?, id).await,
        Command::Delete { id } => tasks::delete(&app()?, id).await,
        Command::Stats => tasks::stats(&app()?).await,
        Command::Config { action } => config::handle(action),
    }
}
