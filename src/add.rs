use anyhow::Context as _;

use crate::backend::BackendClient;
use crate::cli::AddArgs;
use crate::config::BackendConfig;
use crate::form::AddForm;
use crate::prompt;

pub async fn run(args: AddArgs, config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let form = if args.has_field_flags() {
        form_from_args(args)
    } else {
        prompt_form(None)?
    };
    submit(&client, &form).await
}

/// Manual-entry fallback for the scan flow: the add form prefilled with the
/// scanned ISBN.
pub(crate) async fn manual_entry(client: &BackendClient, isbn: &str) -> anyhow::Result<()> {
    let form = prompt_form(Some(isbn))?;
    submit(client, &form).await
}

async fn submit(client: &BackendClient, form: &AddForm) -> anyhow::Result<()> {
    let record = match form.validate() {
        Ok(record) => record,
        Err(errors) => anyhow::bail!("book record is invalid:\n{errors}"),
    };

    client.add_manual(&record).await.context("save book")?;
    tracing::info!(isbn = %record.isbn, title = %record.title, "added book");
    println!("Book information has been saved!");
    Ok(())
}

fn form_from_args(args: AddArgs) -> AddForm {
    AddForm {
        title: args.title.unwrap_or_default(),
        category: args.category.unwrap_or_default(),
        isbn: args.isbn.unwrap_or_default(),
        author_name: args.author.unwrap_or_default(),
        publisher: args.publisher.unwrap_or_default(),
        genres: args.genres,
        copies: args.copies.unwrap_or_default(),
        image_link: args.image_link.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
    }
}

/// Field-by-field prompting in form order. A known ISBN (from a scan) is kept
/// and not asked again.
fn prompt_form(isbn: Option<&str>) -> anyhow::Result<AddForm> {
    let title = prompt::read_field("Title")?;
    let category = prompt::read_field("Category")?;
    let isbn = match isbn {
        Some(isbn) => isbn.to_owned(),
        None => prompt::read_field("ISBN")?,
    };
    let author_name = prompt::read_field("Author name")?;
    let publisher = prompt::read_field("Publisher")?;
    let genres = split_genres(&prompt::read_field("Genre(s), comma separated")?);
    let copies = prompt::read_field("Copies")?;
    let image_link = prompt::read_field("Image link (optional)")?;
    let description = prompt::read_field("Description (optional)")?;

    Ok(AddForm {
        title,
        category,
        isbn,
        author_name,
        publisher,
        genres,
        copies,
        image_link,
        description,
    })
}

fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|genre| genre.trim().to_owned())
        .filter(|genre| !genre.is_empty())
        .collect()
}
