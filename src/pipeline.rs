use owo_colors::{OwoColorize, Stream};
use tracing::{error, warn};

use crate::{
    config::Profile,
    extract,
    fetch::Source,
    record::Publication,
    store::{Store, StoreError},
};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The live listing produced `count` records, which replaced the store.
    Fetched { count: usize },
    /// Nothing usable came back; the store already held `count` records and was left alone.
    KeptExisting { count: usize },
    /// Nothing usable came back and the store was empty, so a placeholder record was written.
    /// Someone needs to fill the file in by hand or fix the scraper.
    NoDataAvailable,
}

impl Outcome {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Outcome::Fetched { .. })
    }
}

/// Fetch, extract, then persist or fall back.
///
/// Fetch and parse failures never escape; they end in the fallback path. Only the store can fail
/// the run, in which case the file on disk is left as it was.
pub fn run(source: &dyn Source, store: &Store, profile: &Profile) -> Result<Outcome, StoreError> {
    println!("Fetching publications for profile {}...", profile.user);

    let publications = fetch_and_extract(source, profile);
    if publications.is_empty() {
        return degrade(store, profile);
    }

    println!(
        "{}",
        format!("Successfully fetched {} publications.", publications.len())
            .if_supports_color(Stream::Stdout, |t| t.green())
    );
    store.save(&publications)?;
    println!("Publications saved to {}", store.path().display());
    Ok(Outcome::Fetched {
        count: publications.len(),
    })
}

fn fetch_and_extract(source: &dyn Source, profile: &Profile) -> Vec<Publication> {
    let markup = match source.fetch() {
        Ok(markup) => markup,
        Err(e) => {
            error!("error fetching profile: {e}");
            return Vec::new();
        }
    };
    match extract::extract(&markup, profile) {
        Ok(publications) => publications,
        Err(e) => {
            error!("error parsing profile page: {e}");
            Vec::new()
        }
    }
}

fn degrade(store: &Store, profile: &Profile) -> Result<Outcome, StoreError> {
    println!(
        "{}",
        "Warning: could not fetch any publications."
            .if_supports_color(Stream::Stdout, |t| t.yellow())
    );
    println!("This might be due to rate limiting or a change in the listing markup.");
    println!(
        "Using existing {} if available, or creating a sample file.",
        store.path().display()
    );

    let existing = store.load().inspect_err(|e| {
        error!("refusing to replace unreadable store: {e}");
    })?;
    if !existing.is_empty() {
        println!("Using {} existing publications.", existing.len());
        return Ok(Outcome::KeptExisting {
            count: existing.len(),
        });
    }

    warn!("no publications available, writing placeholder");
    store.save(&[Publication::placeholder(profile)])?;
    println!(
        "{}",
        format!(
            "Created sample {}. Please update it manually or fix the scraper.",
            store.path().display()
        )
        .if_supports_color(Stream::Stdout, |t| t.yellow())
    );
    Ok(Outcome::NoDataAvailable)
}
