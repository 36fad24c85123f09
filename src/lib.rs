//! Compile free text searches for codingmarks and notes into document store queries.
//!
//! A search like `tokio [rust] site:github.com -unsafe` is split into terms and `[tags]`
//! ([`parser`]), its `key:value` directives are separated from the fulltext terms ([`mir`]), and
//! the result is compiled into a [`Filter`](lir::Filter) and [`SortSpec`](lir::SortSpec)
//! ([`lir`]), which serialize into MongoDB query documents ([`mongo`]).

pub mod config;
pub mod hir;
pub mod lir;
pub mod mir;
pub mod mongo;
pub mod parser;
pub mod service;
pub mod store;

pub mod prelude {
    pub use crate::config::{Page, SearchConfig};
    pub use crate::lir::*;
    pub use crate::mir::{extract_fulltext_and_special_search_terms, SpecialSearchTerms};
    pub use crate::parser::split_search_query;
    pub use crate::service::{SearchError, SearchRequest, SearchService};
    pub use crate::store::{DocumentStore, Hit, MemoryStore, Note, StoreQuery};
}

pub use ::chumsky;
