use crate::config::SearchConfig;
use crate::lir::{CompiledQuery, ScopeValidationError, SearchContext, SearchInclude, RELEVANCE};
use crate::store::{DocumentStore, Hit, StoreQuery};

#[derive(Debug, thiserror::Error)]
pub enum SearchError<E> {
    #[error(transparent)]
    Scope(#[from] ScopeValidationError),
    #[error("Document store failed: {0}")]
    Store(#[source] E),
}

/// A search, as requested by a caller.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub is_public: bool,
    /// The authenticated caller, if any.
    pub user_id: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub include: Option<SearchInclude>,
    /// Starting at 1.
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl<'a> SearchRequest<'a> {
    /// A search over the notes of `user_id`, ordered by relevance when the query has terms.
    pub fn personal(user_id: &'a str, query: &'a str) -> Self {
        Self {
            query,
            user_id: Some(user_id),
            sort: Some(RELEVANCE),
            ..Default::default()
        }
    }

    /// A search over the public corpus.
    pub fn public(query: &'a str, caller_user_id: Option<&'a str>) -> Self {
        Self {
            query,
            is_public: true,
            user_id: caller_user_id,
            ..Default::default()
        }
    }
}

pub struct SearchService<S> {
    store: S,
    config: SearchConfig,
}

impl<S> SearchService<S>
where
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self::with_config(store, SearchConfig::default())
    }

    pub fn with_config(store: S, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Compile the request, without running it.
    pub fn prepare<'a>(
        &'a self,
        request: &SearchRequest<'a>,
    ) -> Result<StoreQuery<'a>, ScopeValidationError> {
        let context = SearchContext {
            is_public: request.is_public,
            user_id: request.user_id,
            sort: request.sort.unwrap_or(self.config.default_sort.as_str()),
            include: request.include.unwrap_or(self.config.default_include),
        };

        let compiled = CompiledQuery::compile(request.query, &context)?;
        let page = self.config.paginate(request.page, request.limit);

        Ok(StoreQuery::new(compiled, page))
    }

    pub fn search(
        &self,
        request: &SearchRequest<'_>,
    ) -> Result<Vec<Hit<S::Document>>, SearchError<S::Error>> {
        let query = self.prepare(request)?;
        log::debug!(
            "Searching with {:?}, skip: {}, limit: {}",
            query.filter,
            query.skip,
            query.limit
        );

        self.store.find(&query).map_err(SearchError::Store)
    }

    /// Search the notes of a single user.
    ///
    /// Unless requested otherwise, notes are ordered by relevance when the query has fulltext
    /// terms, and by creation time otherwise.
    pub fn find_personal_notes(
        &self,
        user_id: &str,
        query: &str,
        sort: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
        include: Option<SearchInclude>,
    ) -> Result<Vec<Hit<S::Document>>, SearchError<S::Error>> {
        let mut request = SearchRequest::personal(user_id, query);
        if sort.is_some() {
            request.sort = sort;
        }
        request.include = include;
        request.page = page;
        request.limit = limit;

        self.search(&request)
    }

    /// Search the public corpus, on behalf of an optional caller.
    pub fn find_public(
        &self,
        query: &str,
        caller_user_id: Option<&str>,
        sort: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<Hit<S::Document>>, SearchError<S::Error>> {
        self.search(&SearchRequest {
            sort,
            page,
            limit,
            ..SearchRequest::public(query, caller_user_id)
        })
    }
}
