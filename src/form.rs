use std::fmt;

use chrono::NaiveDate;

use crate::book::{Book, BookUpdate, NewBook};

/// Inline validation messages, one per violated field, in form order. The
/// whole form is checked before anything is reported so a single submission
/// attempt surfaces every problem at once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(Vec<(&'static str, &'static str)>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push((field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (field, message)) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

fn require(errors: &mut FormErrors, field: &'static str, value: &str, message: &'static str) {
    if value.is_empty() {
        errors.push(field, message);
    }
}

/// Positive whole number or nothing. Rejects empty input, signs produced by
/// negation, zero, and fractional values such as "3.5".
fn parse_copies(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

fn none_if_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

/// The add-book form: raw field values as the user supplied them. Validation
/// turns it into a submittable record or a full set of inline messages.
#[derive(Debug, Default, Clone)]
pub struct AddForm {
    pub title: String,
    pub category: String,
    pub isbn: String,
    pub author_name: String,
    pub publisher: String,
    pub genres: Vec<String>,
    pub copies: String,
    pub image_link: String,
    pub description: String,
}

impl AddForm {
    pub fn validate(&self) -> Result<NewBook, FormErrors> {
        let mut errors = FormErrors::default();

        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "category", &self.category, "Category is required");
        require(&mut errors, "isbn", &self.isbn, "ISBN is required");
        require(
            &mut errors,
            "authorName",
            &self.author_name,
            "Author name is required",
        );
        require(
            &mut errors,
            "publisher",
            &self.publisher,
            "Publisher is required",
        );
        if self.genres.iter().all(|genre| genre.is_empty()) {
            errors.push("genre", "Genre is required");
        }
        let copies = match parse_copies(&self.copies) {
            Some(copies) => copies,
            None => {
                errors.push("copies", "Copies must be a positive whole number");
                0
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewBook {
            title: self.title.clone(),
            category: self.category.clone(),
            isbn: self.isbn.clone(),
            author_name: self.author_name.clone(),
            publisher: self.publisher.clone(),
            genre: self.genres.clone(),
            image_link: none_if_empty(&self.image_link),
            description: none_if_empty(&self.description),
            copies,
        })
    }
}

/// The edit form adds reading history on top of the add form's fields. It is
/// prefilled from the current record so unspecified fields keep their values.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub isbn: String,
    pub author_name: String,
    pub publisher: String,
    pub genres: Vec<String>,
    pub copies: String,
    pub start_date: String,
    pub end_date: String,
    pub rating: String,
    pub review: String,
}

impl EditForm {
    pub fn prefill(id: i64, book: &Book) -> Self {
        let genres = match book.genre_list.clone() {
            Some(list) if !list.is_empty() => list,
            _ => book
                .genre_display()
                .split(',')
                .map(|genre| genre.trim().to_owned())
                .filter(|genre| !genre.is_empty())
                .collect(),
        };

        Self {
            id,
            title: book.title.clone(),
            category: book.category.clone(),
            isbn: book.isbn.clone(),
            author_name: book.author_name.clone(),
            publisher: book.publisher.clone(),
            genres,
            copies: book.copies.to_string(),
            start_date: book
                .start_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            end_date: book
                .end_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            rating: book
                .rating
                .map(|rating| rating.to_string())
                .unwrap_or_default(),
            review: book.review.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<BookUpdate, FormErrors> {
        let mut errors = FormErrors::default();

        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "category", &self.category, "Category is required");
        require(&mut errors, "isbn", &self.isbn, "ISBN is required");
        require(
            &mut errors,
            "authorName",
            &self.author_name,
            "Author name is required",
        );
        require(
            &mut errors,
            "publisher",
            &self.publisher,
            "Publisher is required",
        );
        if self.genres.iter().all(|genre| genre.is_empty()) {
            errors.push("genre", "Genre is required");
        }
        let copies = match parse_copies(&self.copies) {
            Some(copies) => copies,
            None => {
                errors.push("copies", "Copies must be a positive whole number");
                0
            }
        };

        let start_date = parse_date(&self.start_date, "startDate", &mut errors);
        let end_date = parse_date(&self.end_date, "endDate", &mut errors);
        if let (Some(start), Some(end)) = (start_date, end_date)
            && start > end
        {
            errors.push(
                "startDate",
                "Start date must be less than or equal to the end date",
            );
            errors.push(
                "endDate",
                "End date must be greater than or equal to the start date",
            );
        }

        let rating = if self.rating.is_empty() {
            None
        } else {
            match self.rating.trim().parse::<i64>() {
                Ok(rating) if (0..=10).contains(&rating) => Some(rating),
                _ => {
                    errors.push("rating", "Rating must be a number between 0 and 10");
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookUpdate {
            id: self.id,
            title: self.title.clone(),
            category: self.category.clone(),
            isbn: self.isbn.clone(),
            author_name: self.author_name.clone(),
            genre: self.genres.join(", "),
            publisher: self.publisher.clone(),
            copies,
            start_date,
            end_date,
            review: self.review.clone(),
            rating,
        })
    }
}

fn parse_date(raw: &str, field: &'static str, errors: &mut FormErrors) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            let message = match field {
                "startDate" => "Start date must be a valid date (YYYY-MM-DD)",
                _ => "End date must be a valid date (YYYY-MM-DD)",
            };
            errors.push(field, message);
            None
        }
    }
}
