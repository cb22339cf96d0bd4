use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Backend host (overrides SHELFCTL_HOST; default: localhost).
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Backend port (overrides SHELFCTL_PORT; default: 3030).
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the collection, sorted by title.
    List(ListArgs),
    /// Show one book in full.
    Show(ShowArgs),
    /// Add a book by hand (flags, or interactive prompts without them).
    Add(AddArgs),
    /// Interactive barcode-scan session: each stdin line is a scanned ISBN.
    Scan,
    /// Edit a book; unspecified fields keep their current values.
    Edit(EditArgs),
    /// Mark a book read (or unread).
    MarkRead(MarkReadArgs),
    /// Delete a book after confirmation.
    Delete(DeleteArgs),
    /// Suggest a random book from the collection.
    Pick,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by case-insensitive substring over title, author, or genre.
    #[arg(long)]
    pub search: Option<String>,

    /// Only books not yet marked read.
    #[arg(long)]
    pub unread: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Server-assigned book id.
    #[arg(long)]
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Book title.
    #[arg(long)]
    pub title: Option<String>,

    /// Category shelf.
    #[arg(long)]
    pub category: Option<String>,

    /// ISBN identifier.
    #[arg(long)]
    pub isbn: Option<String>,

    /// Author name.
    #[arg(long)]
    pub author: Option<String>,

    /// Publisher.
    #[arg(long)]
    pub publisher: Option<String>,

    /// Genre; repeat the flag for multiple genres.
    #[arg(long = "genre")]
    pub genres: Vec<String>,

    /// Number of copies owned (positive whole number).
    #[arg(long, allow_hyphen_values = true)]
    pub copies: Option<String>,

    /// Cover image URL.
    #[arg(long)]
    pub image_link: Option<String>,

    /// Free-form description.
    #[arg(long)]
    pub description: Option<String>,
}

impl AddArgs {
    /// Any field flag at all switches the form off interactive prompting.
    pub fn has_field_flags(&self) -> bool {
        self.title.is_some()
            || self.category.is_some()
            || self.isbn.is_some()
            || self.author.is_some()
            || self.publisher.is_some()
            || !self.genres.is_empty()
            || self.copies.is_some()
            || self.image_link.is_some()
            || self.description.is_some()
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Server-assigned book id.
    #[arg(long)]
    pub id: i64,

    /// Book title.
    #[arg(long)]
    pub title: Option<String>,

    /// Category shelf.
    #[arg(long)]
    pub category: Option<String>,

    /// ISBN identifier.
    #[arg(long)]
    pub isbn: Option<String>,

    /// Author name.
    #[arg(long)]
    pub author: Option<String>,

    /// Publisher.
    #[arg(long)]
    pub publisher: Option<String>,

    /// Genre; repeat the flag for multiple genres. Replaces the current set.
    #[arg(long = "genre")]
    pub genres: Vec<String>,

    /// Number of copies owned (positive whole number).
    #[arg(long)]
    pub copies: Option<String>,

    /// Date reading started, YYYY-MM-DD.
    #[arg(long)]
    pub start_date: Option<String>,

    /// Date reading finished, YYYY-MM-DD.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Rating from 0 to 10.
    #[arg(long)]
    pub rating: Option<String>,

    /// Free-form review.
    #[arg(long)]
    pub review: Option<String>,
}

#[derive(Debug, Args)]
pub struct MarkReadArgs {
    /// Server-assigned book id.
    #[arg(long)]
    pub id: i64,

    /// Clear the read mark instead of setting it.
    #[arg(long)]
    pub unread: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Server-assigned book id.
    #[arg(long)]
    pub id: i64,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}
