use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;

use crate::config::Profile;

/// One publication as listed on a profile page.
///
/// Every field is free text exactly as rendered by the source. Fields that could not be found are
/// empty strings rather than absent, and `arxiv_id` is always serialised, as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(default = "zero_citations", deserialize_with = "text_or_number")]
    pub citations: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub arxiv_id: Option<String>,
}

pub const PLACEHOLDER_TITLE: &str = "Sample Publication Title";

fn zero_citations() -> String {
    "0".to_string()
}

/// Hand-edited stores often carry `"year": 2024` or `"citations": 3`; keep them as text.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a string or a number, found {other}"
        ))),
    }
}

impl Publication {
    /// The single record written when neither a live fetch nor a previous store produced data.
    pub fn placeholder(profile: &Profile) -> Self {
        Publication {
            title: PLACEHOLDER_TITLE.to_string(),
            authors: format!("{}, A Author, B Author", profile.owner),
            journal: "Conference/Journal Name, 2024".to_string(),
            year: "2024".to_string(),
            citations: zero_citations(),
            url: profile.profile_url(),
            arxiv_id: None,
        }
    }
}
