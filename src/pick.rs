use anyhow::Context as _;
use rand::seq::SliceRandom as _;

use crate::backend::BackendClient;
use crate::config::BackendConfig;

/// The carousel shuffle, minus the carousel: ask the shelf for a random
/// unread suggestion, falling back to the whole collection.
pub async fn run(config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let books = client.list_books().await.context("fetch books")?;
    if books.is_empty() {
        anyhow::bail!("the library is empty; add a book first");
    }

    let unread: Vec<_> = books.iter().filter(|b| !b.marked_read()).collect();
    let pool = if unread.is_empty() {
        books.iter().collect()
    } else {
        unread
    };

    let mut rng = rand::thread_rng();
    let book = pool
        .choose(&mut rng)
        .ok_or_else(|| anyhow::anyhow!("nothing to pick from"))?;

    println!("How about \"{}\" by {}?", book.title, book.author_name);
    Ok(())
}
