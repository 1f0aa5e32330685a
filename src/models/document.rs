//! Document records as emitted by the documentation generator.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Accept any JSON value, keeping it only when it is a string.
///
/// Non-string values (numbers, objects, null) become `None` so that the loader
/// can report the record as malformed instead of failing the whole payload.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// A record exactly as it appears in the generator payload.
///
/// Every field is optional here; validation happens when converting into a
/// [`DocumentRecord`]. Keys the generator adds in later versions are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RawDocument {
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub page: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub text: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

impl RawDocument {
    /// Create a raw record with all five fields present.
    pub fn new(location: &str, page: &str, title: &str, text: &str, category: &str) -> Self {
        Self {
            location: Some(location.to_string()),
            page: Some(page.to_string()),
            title: Some(title.to_string()),
            text: Some(text.to_string()),
            category: Some(category.to_string()),
        }
    }

    /// Decode one array element, treating anything that is not an object as empty.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Kind of documentation entry a record points to.
///
/// The generator's known kinds are listed explicitly. `Other` keeps records
/// with a kind this crate does not know about searchable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Page,
    Section,
    Type,
    Method,
    Function,
    Macro,
    Module,
    Constant,
    Abstract,
    Other(String),
}

impl Category {
    /// Get the tag as the generator writes it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Type => "type",
            Self::Method => "method",
            Self::Function => "function",
            Self::Macro => "macro",
            Self::Module => "module",
            Self::Constant => "constant",
            Self::Abstract => "abstract",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            "type" => Self::Type,
            "method" => Self::Method,
            "function" => Self::Function,
            "macro" => Self::Macro,
            "module" => Self::Module,
            "constant" => Self::Constant,
            "abstract" => Self::Abstract,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Category::from(tag.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, immutable document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// URL fragment or path of the anchor; not unique across records
    pub location: String,

    /// Human-readable page name
    pub page: String,

    /// Section or symbol title
    pub title: String,

    /// Descriptive text, possibly empty
    pub text: String,

    pub category: Category,
}

impl TryFrom<RawDocument> for DocumentRecord {
    type Error = String;

    /// Validate the required fields. The error lists every missing field.
    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let missing: Vec<&str> = [
            ("location", raw.location.is_none()),
            ("page", raw.page.is_none()),
            ("title", raw.title.is_none()),
            ("category", raw.category.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();

        match (raw.location, raw.page, raw.title, raw.category) {
            (Some(location), Some(page), Some(title), Some(category)) => Ok(Self {
                location,
                page,
                title,
                text: raw.text.unwrap_or_default(),
                category: Category::from(category),
            }),
            _ => Err(format!(
                "missing or non-string field(s): {}",
                missing.join(", ")
            )),
        }
    }
}

/// A ranked query result with enough context to render a clickable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredMatch {
    pub location: String,
    pub page: String,
    pub title: String,
    pub category: Category,

    /// Excerpt of the record text around the first matching token
    pub snippet: String,

    /// Relevance score, always greater than zero
    pub score: u32,

    /// Position of the record in the source array
    pub doc_index: usize,
}
