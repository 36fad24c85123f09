mod sort;

pub use self::sort::*;

use crate::mir::{self, SpecialSearchTerms};
use crate::parser::split_search_query;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the fulltext terms of a search combine.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchInclude {
    /// Any of the terms may match.
    Any,
    /// Every term must match, as a phrase.
    #[default]
    All,
}

impl Display for SearchInclude {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::All => f.write_str("all"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown search include mode: {0}")]
pub struct UnknownSearchInclude(pub String);

impl FromStr for SearchInclude {
    type Err = UnknownSearchInclude;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(UnknownSearchInclude(s.to_string())),
        }
    }
}

/// The `$text` predicate of a filter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextSearch<'a> {
    pub terms: Vec<&'a str>,
    pub include: SearchInclude,
}

impl<'a> TextSearch<'a> {
    /// The value of `$search`.
    pub fn search_text(&self) -> String {
        match self.include {
            SearchInclude::Any => self.terms.join(" "),
            SearchInclude::All => generate_full_search_text(&self.terms),
        }
    }

    /// Terms which must be present, in the order of the query.
    pub fn inclusions(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.terms.iter().copied().filter(|term| !term.starts_with('-'))
    }

    /// Terms which must be absent, without their leading `-`.
    pub fn exclusions(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.terms
            .iter()
            .copied()
            .filter_map(|term: &'a str| term.strip_prefix('-'))
            .filter(|term| !term.is_empty())
    }
}

/// A case-insensitive substring match on a URL.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SitePattern<'a>(pub &'a str);

impl SitePattern<'_> {
    /// The regular expression, matching the site literally.
    pub fn regex(&self) -> String {
        regex::escape(self.0)
    }

    pub fn is_match(&self, url: &str) -> bool {
        url.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// A compiled search filter.
///
/// Every fragment which is present must match, absent fragments don't restrict the search.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter<'a> {
    pub text: Option<TextSearch<'a>>,
    pub user_id: Option<&'a str>,
    pub public: Option<bool>,
    /// The document must carry all of these tags.
    pub tags: Option<Vec<&'a str>>,
    pub source_url: Option<SitePattern<'a>>,
}

impl Filter<'_> {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("A search must either be public or be scoped to a user")]
pub struct ScopeValidationError;

/// Render fulltext terms for the text search engine.
///
/// Excluded terms (starting with `-`) are kept as they are, all others are quoted, so that they
/// must be present.
pub fn generate_full_search_text(fulltext_search_terms: &[&str]) -> String {
    fulltext_search_terms
        .iter()
        .map(|term| match term.starts_with('-') {
            true => term.to_string(),
            false => format!(r#""{term}""#),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn set_fulltext_search_terms_filter<'a>(
    fulltext_search_terms: &[&'a str],
    mut filter: Filter<'a>,
    search_include: SearchInclude,
) -> Filter<'a> {
    if !fulltext_search_terms.is_empty() {
        filter.text = Some(TextSearch {
            terms: fulltext_search_terms.to_vec(),
            include: search_include,
        });
    }
    filter
}

/// Apply the directives of a search.
///
/// A `user:` directive only applies to public searches, or to the caller's own documents. In all
/// other cases it is dropped, without an error.
pub fn set_special_search_terms_filter<'a>(
    is_public: bool,
    caller_user_id: Option<&'a str>,
    special_search_terms: &SpecialSearchTerms<'a>,
    mut filter: Filter<'a>,
) -> Filter<'a> {
    if let Some(user_id) = special_search_terms.user_id {
        if is_public || caller_user_id == Some(user_id) {
            filter.user_id = Some(user_id);
        } else {
            log::debug!("Dropping user directive for {user_id}: not visible to the caller");
        }
    }

    if special_search_terms.private_only {
        filter.public = Some(false);
    }

    if let Some(site) = special_search_terms.site {
        filter.source_url = Some(SitePattern(site));
    }

    filter
}

/// Scope a search to the public documents, or to the documents of a single user.
pub fn set_public_or_personal_filter<'a>(
    is_public: bool,
    mut filter: Filter<'a>,
    user_id: Option<&'a str>,
) -> Result<Filter<'a>, ScopeValidationError> {
    if is_public {
        filter.public = Some(true);
    } else if let Some(user_id) = user_id {
        filter.user_id = Some(user_id);
    } else {
        return Err(ScopeValidationError);
    }
    Ok(filter)
}

pub fn set_tags_to_filter<'a>(search_tags: &[&'a str], mut filter: Filter<'a>) -> Filter<'a> {
    if !search_tags.is_empty() {
        filter.tags = Some(search_tags.to_vec());
    }
    filter
}

/// Make `private:only` safe for public searches.
///
/// Private documents are only visible to their owner. So a public search asking for private
/// documents is pinned to the caller, and an anonymous one loses the directive.
pub fn restrict_private_scope<'a>(
    is_public: bool,
    caller_user_id: Option<&'a str>,
    mut special_search_terms: SpecialSearchTerms<'a>,
    mut filter: Filter<'a>,
) -> (SpecialSearchTerms<'a>, Filter<'a>) {
    if !(is_public && special_search_terms.private_only) {
        return (special_search_terms, filter);
    }

    match caller_user_id {
        Some(caller) => {
            filter.user_id = Some(caller);
            special_search_terms.user_id = special_search_terms
                .user_id
                .filter(|user_id| *user_id == caller);
        }
        None => {
            log::debug!("Dropping private:only from an anonymous public search");
            special_search_terms.private_only = false;
        }
    }

    (special_search_terms, filter)
}

/// The caller's side of a search.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchContext<'a> {
    pub is_public: bool,
    /// The authenticated caller, if any.
    pub user_id: Option<&'a str>,
    pub sort: &'a str,
    pub include: SearchInclude,
}

impl<'a> SearchContext<'a> {
    pub fn public(caller_user_id: Option<&'a str>) -> Self {
        Self {
            is_public: true,
            user_id: caller_user_id,
            sort: NEWEST,
            include: SearchInclude::default(),
        }
    }

    pub fn personal(user_id: &'a str) -> Self {
        Self {
            is_public: false,
            user_id: Some(user_id),
            sort: NEWEST,
            include: SearchInclude::default(),
        }
    }

    pub fn with_sort(mut self, sort: &'a str) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_include(mut self, include: SearchInclude) -> Self {
        self.include = include;
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledQuery<'a> {
    pub filter: Filter<'a>,
    pub sort: SortSpec,
}

impl<'a> CompiledQuery<'a> {
    /// Compile a raw search query into a filter and sort order.
    pub fn compile(
        query: &'a str,
        context: &SearchContext<'a>,
    ) -> Result<Self, ScopeValidationError> {
        let parsed = split_search_query(query);
        let terms = mir::extract_fulltext_and_special_search_terms(&parsed.terms);

        let filter =
            set_public_or_personal_filter(context.is_public, Filter::default(), context.user_id)?;
        let (special, filter) =
            restrict_private_scope(context.is_public, context.user_id, terms.special, filter);
        let filter =
            set_special_search_terms_filter(context.is_public, context.user_id, &special, filter);
        let filter = set_tags_to_filter(&parsed.tags, filter);
        let filter = set_fulltext_search_terms_filter(&terms.fulltext, filter, context.include);

        let sort = get_sort_by_object(context.sort, &terms.fulltext);

        log::debug!("Compiled search {query:?} into {filter:?}, sorted by {sort:?}");

        Ok(Self { filter, sort })
    }
}
