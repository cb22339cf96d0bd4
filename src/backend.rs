use anyhow::Context as _;
use url::Url;

use crate::book::{Book, BookUpdate, NewBook};
use crate::config::BackendConfig;

/// Outcome of an ISBN-keyed add. The backend signals these with fixed
/// response-body strings rather than status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnOutcome {
    Added,
    AlreadyExists,
    NotFound,
}

/// Client for the library backend's REST surface. Requests carry no timeout
/// and are never retried; failures surface to the caller for a manual retry.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url()?,
        })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("build endpoint url: {path}"))
    }

    pub async fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let url = self.endpoint("/api/books")?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let raw = read_success(response).await?;
        serde_json::from_str(&raw).context("parse book list")
    }

    pub async fn get_book(&self, id: i64) -> anyhow::Result<Book> {
        let mut url = self.endpoint("/api/getBook")?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let raw = read_success(response).await?;
        serde_json::from_str(&raw).context("parse book")
    }

    pub async fn add_manual(&self, record: &NewBook) -> anyhow::Result<()> {
        let url = self.endpoint("/api/addManual")?;
        let response = self
            .http
            .post(url.clone())
            .json(record)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let raw = read_success(response).await?;
        if raw.trim() == "Book could not be found" {
            anyhow::bail!("Book could not be found");
        }
        Ok(())
    }

    pub async fn add_by_isbn(&self, isbn: &str) -> anyhow::Result<IsbnOutcome> {
        let mut url = self.endpoint("/api/addBook")?;
        url.query_pairs_mut().append_pair("isbn", isbn);
        let response = self
            .http
            .post(url.clone())
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let raw = read_success(response).await?;
        Ok(match raw.trim() {
            "This book already exists" => IsbnOutcome::AlreadyExists,
            "There was a problem adding the book" => IsbnOutcome::NotFound,
            _ => IsbnOutcome::Added,
        })
    }

    pub async fn add_copy(&self, isbn: &str) -> anyhow::Result<()> {
        let mut url = self.endpoint("/api/addCopy")?;
        url.query_pairs_mut().append_pair("isbn", isbn);
        let response = self
            .http
            .post(url.clone())
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let raw = read_success(response).await?;
        if raw.trim() != "Added copy" {
            anyhow::bail!("unexpected addCopy response: {}", raw.trim());
        }
        Ok(())
    }

    pub async fn mark_read(&self, id: i64, read: bool) -> anyhow::Result<()> {
        let url = self.endpoint("/api/markRead")?;
        let body = serde_json::json!({ "id": id, "read": i32::from(read) });
        let response = self
            .http
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        read_success(response).await?;
        Ok(())
    }

    pub async fn edit_book(&self, update: &BookUpdate) -> anyhow::Result<()> {
        let url = self.endpoint("/api/editBook")?;
        let response = self
            .http
            .post(url.clone())
            .json(update)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let raw = read_success(response).await?;
        if raw.trim() != "Updated book" {
            anyhow::bail!("unexpected editBook response: {}", raw.trim());
        }
        Ok(())
    }

    pub async fn delete_book(&self, id: i64) -> anyhow::Result<()> {
        let url = self.endpoint("/api/deleteBook")?;
        let body = serde_json::json!({ "id": id });
        let response = self
            .http
            .delete(url.clone())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("DELETE {url}"))?;
        read_success(response).await?;
        Ok(())
    }
}

async fn read_success(response: reqwest::Response) -> anyhow::Result<String> {
    let status = response.status();
    let url = response.url().clone();
    let raw = response
        .text()
        .await
        .with_context(|| format!("read response body: {url}"))?;
    if !status.is_success() {
        let body = raw.trim();
        let body = if body.is_empty() { "<empty body>" } else { body };
        anyhow::bail!("backend error ({status}): {body}");
    }
    Ok(raw)
}
