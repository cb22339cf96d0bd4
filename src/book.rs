use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A book as the backend serves it. The wire format is camelCase JSON and has
/// drifted across backend revisions: reading state arrives as `read` (0/1)
/// from older databases and as `isRead` from newer ones, and genres arrive as
/// a single string (`genre`) and/or a list (`genreList`). Both shapes must
/// deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "genre_string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_copies")]
    pub copies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

fn default_copies() -> u32 {
    1
}

/// `genre` arrives as a plain string from older records and as a list on
/// records created through manual add.
fn genre_string_or_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Genre {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Genre>::deserialize(deserializer)? {
        None => None,
        Some(Genre::One(raw)) => Some(raw),
        Some(Genre::Many(list)) => Some(list.join(", ")),
    })
}

impl Book {
    /// Reading state, merging the two wire representations. `isRead` wins
    /// when both are present.
    pub fn marked_read(&self) -> bool {
        match self.is_read {
            Some(is_read) => is_read,
            None => self.read == Some(1),
        }
    }

    /// Genres for display: the list joined with `", "` when the backend sent
    /// one, otherwise the legacy string with stray brackets stripped.
    pub fn genre_display(&self) -> String {
        if let Some(list) = self.genre_list.as_deref()
            && !list.is_empty()
        {
            return list.join(", ");
        }
        self.genre
            .as_deref()
            .unwrap_or_default()
            .replace(['[', ']'], "")
    }

    /// Case-insensitive substring match over title, author name, and genre.
    /// Absent fields are treated as empty.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.author_name.to_lowercase().contains(&query)
            || self.genre_display().to_lowercase().contains(&query)
    }
}

/// Sort for listing: by title, case-insensitive.
pub fn sort_by_title(books: &mut [Book]) {
    books.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
}

/// Payload for `POST /api/addManual`. Genres travel as the selected list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub category: String,
    pub isbn: String,
    pub author_name: String,
    pub publisher: String,
    pub genre: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub copies: u32,
}

/// Payload for `POST /api/editBook`. Genres travel joined with `", "`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub isbn: String,
    pub author_name: String,
    pub genre: String,
    pub publisher: String,
    pub copies: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub review: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}
