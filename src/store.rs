use crate::config::Page;
use crate::lir::{CompiledQuery, Direction, Filter, SearchInclude, SortSpec, TextSearch};
use crate::mongo::TextScoreProjection;
use std::cmp::Reverse;
use std::convert::Infallible;
use time::OffsetDateTime;

/// A query, as it gets issued to the document store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreQuery<'a> {
    pub filter: Filter<'a>,
    pub sort: SortSpec,
    pub skip: u64,
    pub limit: u64,
}

impl<'a> StoreQuery<'a> {
    pub fn new(query: CompiledQuery<'a>, page: Page) -> Self {
        Self {
            filter: query.filter,
            sort: query.sort,
            skip: page.skip,
            limit: page.limit,
        }
    }

    /// The projection to request, only available when there is a text score to project.
    pub fn projection(&self) -> Option<TextScoreProjection> {
        self.filter.text.as_ref().map(|_| TextScoreProjection)
    }
}

/// A document found by a search.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit<D> {
    pub document: D,
    /// Relevance, when the search had fulltext terms.
    pub score: Option<f64>,
}

pub trait DocumentStore {
    type Document;
    type Error: std::error::Error;

    fn find(&self, query: &StoreQuery<'_>) -> Result<Vec<Hit<Self::Document>>, Self::Error>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    type Document = S::Document;
    type Error = S::Error;

    fn find(&self, query: &StoreQuery<'_>) -> Result<Vec<Hit<Self::Document>>, Self::Error> {
        (**self).find(query)
    }
}

/// A bookmark or note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub public: bool,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Note {
    /// Evaluate a filter, returning the text score for a match.
    ///
    /// Without a text predicate, a match scores `0.0`.
    pub fn matches(&self, filter: &Filter<'_>) -> Option<f64> {
        if let Some(user_id) = filter.user_id {
            if self.user_id != user_id {
                return None;
            }
        }
        if let Some(public) = filter.public {
            if self.public != public {
                return None;
            }
        }
        if let Some(tags) = &filter.tags {
            if !tags.iter().all(|tag| self.tags.iter().any(|t| t == tag)) {
                return None;
            }
        }
        if let Some(site) = &filter.source_url {
            if !self.source_url.as_deref().is_some_and(|url| site.is_match(url)) {
                return None;
            }
        }
        match &filter.text {
            Some(text) => self.text_score(text),
            None => Some(0.0),
        }
    }

    fn text_score(&self, text: &TextSearch<'_>) -> Option<f64> {
        let content = format!("{} {} {}", self.title, self.description, self.tags.join(" "))
            .to_lowercase();
        let contains = |term: &str| content.contains(&term.to_lowercase());

        if text.exclusions().any(contains) {
            return None;
        }

        let (mut total, mut found) = (0usize, 0usize);
        for term in text.inclusions() {
            total += 1;
            if contains(term) {
                found += 1;
            }
        }

        let matched = match text.include {
            SearchInclude::Any => found > 0,
            SearchInclude::All => total > 0 && found == total,
        };
        matched.then_some(found as f64)
    }
}

/// Documents held in memory, evaluating queries the way the document store does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    notes: Vec<Note>,
}

impl MemoryStore {
    pub fn new(notes: impl IntoIterator<Item = Note>) -> Self {
        Self {
            notes: notes.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl FromIterator<Note> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = Note>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl DocumentStore for MemoryStore {
    type Document = Note;
    type Error = Infallible;

    fn find(&self, query: &StoreQuery<'_>) -> Result<Vec<Hit<Note>>, Infallible> {
        let projected = query.projection().is_some();

        let mut hits = self
            .notes
            .iter()
            .filter_map(|note| {
                note.matches(&query.filter).map(|score| Hit {
                    document: note.clone(),
                    score: projected.then_some(score),
                })
            })
            .collect::<Vec<_>>();

        match query.sort {
            SortSpec::CreatedAt(direction) => {
                hits.sort_by_key(|hit| hit.document.created_at);
                if direction == Direction::Descending {
                    hits.reverse();
                }
            }
            SortSpec::TextScore => {
                // scores are counts of matched terms
                hits.sort_by_key(|hit| Reverse(hit.score.unwrap_or_default() as u64));
            }
        }

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(hits.into_iter().skip(skip).take(limit).collect())
    }
}
