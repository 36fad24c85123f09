/// The `$meta` value requesting the text search relevance score.
pub const TEXT_SCORE: &str = "textScore";

/// The sort mode which always orders by creation time.
pub const NEWEST: &str = "newest";

/// A sort mode ordering by text score, when there are fulltext terms.
pub const RELEVANCE: &str = "relevance";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum Direction {
    #[default]
    Ascending = 1,
    Descending = -1,
}

/// Sort order of a search. There is no way to change it once created.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SortSpec {
    /// `{createdAt: -1}`
    CreatedAt(Direction),
    /// `{score: {$meta: "textScore"}}`
    TextScore,
}

impl SortSpec {
    pub const NEWEST_FIRST: Self = Self::CreatedAt(Direction::Descending);
}

/// Choose the sort order for a search.
///
/// `newest` always orders by creation time. Any other mode orders by relevance, unless there is
/// no fulltext term to score against.
pub fn get_sort_by_object(sort: &str, fulltext_search_terms: &[&str]) -> SortSpec {
    if sort == NEWEST || fulltext_search_terms.is_empty() {
        SortSpec::NEWEST_FIRST
    } else {
        SortSpec::TextScore
    }
}
