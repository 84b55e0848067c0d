//! Blog records as seen by the aggregation functions.

use crate::error::{RecordError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything that can be aggregated: it has an author and a like count.
pub trait BlogEntry {
    fn author(&self) -> &str;
    fn likes(&self) -> u64;
}

impl<T: BlogEntry + ?Sized> BlogEntry for &T {
    fn author(&self) -> &str {
        (**self).author()
    }

    fn likes(&self) -> u64 {
        (**self).likes()
    }
}

/// Metadata of a single blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub likes: u64,
}

impl BlogRecord {
    pub fn new(author: impl Into<String>, likes: u64) -> Self {
        Self {
            title: None,
            author: author.into(),
            url: None,
            likes,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build a record from an untyped JSON value at position `index`.
    ///
    /// `author` and `likes` are mandatory; `title` and `url` may be absent
    /// or null. Extra keys are ignored.
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or(RecordError::NotAnObject { index })?;

        let author = match object.get("author") {
            None | Some(Value::Null) => {
                return Err(RecordError::MissingField {
                    index,
                    field: "author",
                })
            }
            Some(Value::String(author)) => author.clone(),
            Some(_) => {
                return Err(RecordError::InvalidField {
                    index,
                    field: "author",
                    expected: "a string",
                })
            }
        };

        let likes = match object.get("likes") {
            None | Some(Value::Null) => {
                return Err(RecordError::MissingField {
                    index,
                    field: "likes",
                })
            }
            Some(likes) => likes.as_u64().ok_or(RecordError::InvalidField {
                index,
                field: "likes",
                expected: "a non-negative integer",
            })?,
        };

        Ok(Self {
            title: optional_string(object, index, "title")?,
            author,
            url: optional_string(object, index, "url")?,
            likes,
        })
    }
}

impl BlogEntry for BlogRecord {
    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

fn optional_string(
    object: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RecordError::InvalidField {
            index,
            field,
            expected: "a string",
        }),
    }
}

/// Convert a JSON array into records, failing on the first malformed one.
pub fn records_from_json(value: &Value) -> Result<Vec<BlogRecord>> {
    value
        .as_array()
        .ok_or(RecordError::NotAnArray)?
        .iter()
        .enumerate()
        .map(|(index, item)| BlogRecord::from_value(index, item))
        .collect()
}
