use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    shelfctl::logging::init().context("init logging")?;

    let cli = shelfctl::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = shelfctl::config::BackendConfig::resolve(cli.host, cli.port)
        .context("resolve backend config")?;

    match cli.command {
        shelfctl::cli::Command::List(args) => {
            shelfctl::list::run(args, &config).await.context("list")?;
        }
        shelfctl::cli::Command::Show(args) => {
            shelfctl::show::run(args, &config).await.context("show")?;
        }
        shelfctl::cli::Command::Add(args) => {
            shelfctl::add::run(args, &config).await.context("add")?;
        }
        shelfctl::cli::Command::Scan => {
            shelfctl::scan::run(&config).await.context("scan")?;
        }
        shelfctl::cli::Command::Edit(args) => {
            shelfctl::edit::run(args, &config).await.context("edit")?;
        }
        shelfctl::cli::Command::MarkRead(args) => {
            shelfctl::mark::run(args, &config).await.context("mark read")?;
        }
        shelfctl::cli::Command::Delete(args) => {
            shelfctl::delete::run(args, &config).await.context("delete")?;
        }
        shelfctl::cli::Command::Pick => {
            shelfctl::pick::run(&config).await.context("pick")?;
        }
    }

    Ok(())
}
