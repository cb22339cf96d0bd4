use anyhow::Context as _;

use crate::backend::BackendClient;
use crate::cli::MarkReadArgs;
use crate::config::BackendConfig;

pub async fn run(args: MarkReadArgs, config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let read = !args.unread;
    client
        .mark_read(args.id, read)
        .await
        .context("update read state")?;
    tracing::info!(id = args.id, read, "updated read state");
    println!("{}", if read { "Marked read" } else { "Marked unread" });
    Ok(())
}
