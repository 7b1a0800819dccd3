pub mod arxiv;

/// An external identifier that can be picked out of free text.
pub trait Identifier<'a>: Sized + 'a {
    /// Find the first occurrence of this identifier in `text`.
    fn find(text: &'a str) -> Option<Self>;
    /// The bare identifier, without whatever prefix it was found with.
    fn as_str(&self) -> &'a str;
}

// Use GAT because identifiers borrow from the text they were found in, and `detect` builds that
// text itself.
pub trait IdFamily {
    type For<'a>: Identifier<'a>;
}

/// Scan the combined title and venue of an entry for an identifier of family `F`.
pub fn detect<F: IdFamily>(title: &str, venue: &str) -> Option<String> {
    let haystack = format!("{title} {venue}");
    find::<F>(&haystack).map(str::to_string)
}

fn find<'a, F: IdFamily>(text: &'a str) -> Option<&'a str> {
    <F::For<'a> as Identifier<'a>>::find(text).map(|id| id.as_str())
}
