use anyhow::Context as _;

use crate::backend::BackendClient;
use crate::book::{self, Book};
use crate::cli::ListArgs;
use crate::config::BackendConfig;

pub async fn run(args: ListArgs, config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let mut books = client.list_books().await.context("fetch books")?;
    book::sort_by_title(&mut books);

    let query = args.search.unwrap_or_default();
    let mut shown = 0usize;
    for b in &books {
        if !query.is_empty() && !b.matches(&query) {
            continue;
        }
        if args.unread && b.marked_read() {
            continue;
        }
        println!("{}", render_line(b));
        shown += 1;
    }

    tracing::debug!(total = books.len(), shown, "listed books");
    Ok(())
}

fn render_line(book: &Book) -> String {
    let marker = if book.marked_read() { "[x]" } else { "[ ]" };
    let id = book
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_owned());
    let genre = book.genre_display();
    if genre.is_empty() {
        format!("{marker} #{id} {} by {}", book.title, book.author_name)
    } else {
        format!(
            "{marker} #{id} {} by {} ({genre})",
            book.title, book.author_name
        )
    }
}
