use anyhow::Context as _;

use crate::backend::BackendClient;
use crate::cli::EditArgs;
use crate::config::BackendConfig;
use crate::form::EditForm;

pub async fn run(args: EditArgs, config: &BackendConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(config)?;
    let current = client.get_book(args.id).await.context("fetch book")?;

    let mut form = EditForm::prefill(args.id, &current);
    apply_overrides(&mut form, &args);

    let update = match form.validate() {
        Ok(update) => update,
        Err(errors) => anyhow::bail!("book record is invalid:\n{errors}"),
    };

    client.edit_book(&update).await.context("update book")?;
    tracing::info!(id = args.id, "updated book");
    println!("Book information has been updated!");

    // Back to the detail view with fresh server state.
    let updated = client
        .get_book(args.id)
        .await
        .context("fetch updated book")?;
    print!("{}", crate::show::render_detail(&updated));
    Ok(())
}

fn apply_overrides(form: &mut EditForm, args: &EditArgs) {
    if let Some(title) = &args.title {
        form.title = title.clone();
    }
    if let Some(category) = &args.category {
        form.category = category.clone();
    }
    if let Some(isbn) = &args.isbn {
        form.isbn = isbn.clone();
    }
    if let Some(author) = &args.author {
        form.author_name = author.clone();
    }
    if let Some(publisher) = &args.publisher {
        form.publisher = publisher.clone();
    }
    if !args.genres.is_empty() {
        form.genres = args.genres.clone();
    }
    if let Some(copies) = &args.copies {
        form.copies = copies.clone();
    }
    if let Some(start_date) = &args.start_date {
        form.start_date = start_date.clone();
    }
    if let Some(end_date) = &args.end_date {
        form.end_date = end_date.clone();
    }
    if let Some(rating) = &args.rating {
        form.rating = rating.clone();
    }
    if let Some(review) = &args.review {
        form.review = review.clone();
    }
}
