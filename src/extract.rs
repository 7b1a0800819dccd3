use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::Profile,
    identifier::{self, arxiv::Arxiv},
    record::Publication,
};

/// The markup as a whole could not be read as a publication listing.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page has no publication listing (consent or CAPTCHA interstitial?)")]
    UnrecognisedPage,
}

/// Position of a grey text line among its `div.gs_gray` siblings in a row's title cell.
///
/// The listing renders the author list and the venue with the same marker, authors first. A row
/// with only one grey line has no venue; it is never shifted into the authors slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayLine {
    Authors = 0,
    Venue = 1,
}

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.gsc_a_tr").unwrap());
static TABLE_BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("#gsc_a_b").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("a.gsc_a_at").unwrap());
static GRAY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.gs_gray").unwrap());
static YEAR: Lazy<Selector> = Lazy::new(|| Selector::parse(".gsc_a_y").unwrap());
static CITES: Lazy<Selector> = Lazy::new(|| Selector::parse("a.gsc_a_c, .gsc_a_c a").unwrap());

/// Parse every listing row of `markup` into a record, in document order.
///
/// Rows without a title link are skipped; every other row yields exactly one record, whatever
/// else it lacks, so one odd row never affects its neighbours. Duplicates are kept.
pub fn extract(markup: &str, profile: &Profile) -> Result<Vec<Publication>, ExtractError> {
    let doc = Html::parse_document(markup);
    let rows: Vec<ElementRef<'_>> = doc.select(&ROW).collect();

    if rows.is_empty() && doc.select(&TABLE_BODY).next().is_none() {
        return Err(ExtractError::UnrecognisedPage);
    }

    let mut publications = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match parse_entry(row, profile) {
            Some(publication) => publications.push(publication),
            None => debug!(index, "row has no title link, skipping"),
        }
    }
    Ok(publications)
}

fn parse_entry(row: ElementRef<'_>, profile: &Profile) -> Option<Publication> {
    let title_link = row.select(&TITLE).next()?;

    let title = stripped_text(title_link);
    let url = profile.record_url(title_href(title_link));
    let authors = gray_line(row, GrayLine::Authors);
    let journal = gray_line(row, GrayLine::Venue);
    let year = row.select(&YEAR).next().map(stripped_text).unwrap_or_default();
    // Only a missing marker defaults; a present but empty one stays empty.
    let citations = row
        .select(&CITES)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| "0".to_string());
    let arxiv_id = identifier::detect::<Arxiv>(&title, &journal);

    Some(Publication {
        title,
        authors,
        journal,
        year,
        citations,
        url,
        arxiv_id,
    })
}

/// The page-relative link of a title. Newer listings put the real link in `data-href` and a
/// `javascript:` stub in `href`; otherwise `href` is taken as is, whatever it holds.
fn title_href<'a>(link: ElementRef<'a>) -> &'a str {
    let el = link.value();
    el.attr("data-href")
        .or_else(|| el.attr("href"))
        .unwrap_or_default()
}

/// Text of the grey line at position `line`, counting the row's first grey line and the grey
/// siblings that follow it. Out of range is an empty string.
fn gray_line(row: ElementRef<'_>, line: GrayLine) -> String {
    let Some(first) = row.select(&GRAY).next() else {
        return String::new();
    };
    std::iter::once(first)
        .chain(
            first
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .filter(|el| GRAY.matches(el)),
        )
        .nth(line as usize)
        .map(stripped_text)
        .unwrap_or_default()
}

/// Each text node trimmed, empty ones dropped, the rest joined without a separator.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
