use once_cell::sync::Lazy;
use regex::Regex;

use crate::identifier::{IdFamily, Identifier};

/// A new-style arXiv number (`YYMM.NNNN` or `YYMM.NNNNN`) mentioned in free text after an `arXiv`
/// token, e.g. `arXiv:2301.01234` or `arxiv 1810.04805`.
///
/// Nothing checks that the number resolves to a real preprint.
#[derive(Debug, PartialEq, Eq)]
pub struct Arxiv<'a> {
    id: &'a str,
}

static ARXIV_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)arxiv[:\s]*(?P<id>\d{4}\.\d{4,5})").unwrap());

impl<'a> Identifier<'a> for Arxiv<'a> {
    fn find(text: &'a str) -> Option<Self> {
        let caps = ARXIV_IN_TEXT.captures(text)?;
        let id = caps.name("id")?.as_str();
        Some(Arxiv { id })
    }

    fn as_str(&self) -> &'a str {
        self.id
    }
}

impl IdFamily for Arxiv<'_> {
    type For<'a> = Arxiv<'a>;
}
