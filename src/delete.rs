use anyhow::Context as _;

use crate::backend::BackendClient;
use crate::cli::DeleteArgs;
use crate::config::BackendConfig;
use crate::prompt;

pub async fn run(args: DeleteArgs, config: &BackendConfig) -> anyhow::Result<()> {
    if !args.yes && !prompt::confirm("Are you sure you want to delete this book?")? {
        println!("Delete cancelled");
        return Ok(());
    }

    let client = BackendClient::new(config)?;
    client
        .delete_book(args.id)
        .await
        .context("delete book")?;
    tracing::info!(id = args.id, "deleted book");
    println!("Deleted book #{}", args.id);
    Ok(())
}
