use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned book identifier.
///
/// The backend owns ids, so the client treats them as opaque: numbers and
/// strings are both accepted on the wire and rendered verbatim into paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => BookId(n.to_string()),
            RawId::Text(s) => BookId(s),
        })
    }
}

impl Serialize for BookId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A book record as returned by `GET /api/books[/{id}]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    /// Display text of the price; see [`price_text`]
    #[serde(default, deserialize_with = "price_text")]
    pub price: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
}

/// Accept any number or string as a price so one odd record cannot fail a
/// whole list. Integral floats (`1500.0`) render as integers.
fn price_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Some(match (n.as_u64(), n.as_f64()) {
            (Some(int), _) => int.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => {
                (f as u64).to_string()
            }
            _ => n.to_string(),
        }),
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Validated wire payload for `POST`/`PUT`. Never carries an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: u64,
    pub publish_date: String,
}

/// Raw form input, one string per field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub publish_date: String,
}

impl BookDraft {
    /// Collect form values, trimming surrounding whitespace from each field
    pub fn collect(title: &str, author: &str, isbn: &str, price: &str, publish_date: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            isbn: isbn.trim().to_string(),
            price: price.trim().to_string(),
            publish_date: publish_date.trim().to_string(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Isbn => &self.isbn,
            FormField::Price => &self.price,
            FormField::PublishDate => &self.publish_date,
        }
    }
}

// Populating the edit form from a fetched record
impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone().unwrap_or_default(),
            author: book.author.clone().unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
            price: book.price.clone().unwrap_or_default(),
            publish_date: book
                .publish_date
                .as_deref()
                .map(display_date)
                .unwrap_or_default(),
        }
    }
}

/// Display projection of a record for one table row. Values are unescaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRow {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub publish_date: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone().unwrap_or_default(),
            author: book.author.clone().unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
            price: book.price.clone().unwrap_or_default(),
            publish_date: book
                .publish_date
                .as_deref()
                .map(display_date)
                .unwrap_or_default(),
        }
    }
}

/// Truncate a date string to its first 10 characters (`YYYY-MM-DD`)
pub fn display_date(raw: &str) -> String {
    raw.chars().take(10).collect()
}

/// Input fields of the book form, named as the backend names them
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Author,
    Isbn,
    Price,
    PublishDate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Author,
        FormField::Isbn,
        FormField::Price,
        FormField::PublishDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Author => "author",
            FormField::Isbn => "isbn",
            FormField::Price => "price",
            FormField::PublishDate => "publishDate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
