use std::fmt::Write as _;

use anyhow::Context as _;

use crate::backend::BackendClient;
use crate::book::Book;
use crate::cli::ShowArgs;
use crate::config::BackendConfig;

pub async fn run(args: ShowArgs, config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let book = client.get_book(args.id).await.context("fetch book")?;
    print!("{}", render_detail(&book));
    Ok(())
}

/// The detail view: everything the backend knows about one book.
pub(crate) fn render_detail(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "{}", book.author_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "ISBN: {}", book.isbn);
    let _ = writeln!(out, "Publisher: {}", book.publisher);
    let _ = writeln!(out, "Genre: {}", book.genre_display());
    let _ = writeln!(out, "Category: {}", book.category);
    let _ = writeln!(out, "Copies: {}", book.copies);
    let _ = writeln!(
        out,
        "Read? {}",
        if book.marked_read() { "Yes" } else { "No" }
    );
    match book.image_link.as_deref() {
        Some(link) if !link.is_empty() => {
            let _ = writeln!(out, "Image: {link}");
        }
        _ => {
            let _ = writeln!(out, "Image: (none)");
        }
    }
    if let Some(description) = book.description.as_deref()
        && !description.is_empty()
    {
        let _ = writeln!(out);
        let _ = writeln!(out, "{description}");
    }

    let mut history = String::new();
    if let Some(start) = book.start_date {
        let _ = writeln!(history, "Started: {start}");
    }
    if let Some(end) = book.end_date {
        let _ = writeln!(history, "Finished: {end}");
    }
    if let Some(rating) = book.rating {
        let _ = writeln!(history, "Rating: {rating}/10");
    }
    if let Some(review) = book.review.as_deref()
        && !review.is_empty()
    {
        let _ = writeln!(history, "Review: {review}");
    }
    if !history.is_empty() {
        let _ = writeln!(out);
        out.push_str(&history);
    }

    out
}
