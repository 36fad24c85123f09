//! MongoDB documents for compiled searches.
//!
//! [`Filter`] and [`SortSpec`] serialize into the query and sort documents a MongoDB driver
//! expects, e.g. through `bson::to_document`. Absent fragments are left out.

use crate::lir::{Filter, SitePattern, SortSpec, TextSearch, TEXT_SCORE};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub mod field {
    pub const TEXT: &str = "$text";
    pub const USER_ID: &str = "userId";
    pub const PUBLIC: &str = "public";
    pub const TAGS: &str = "tags";
    pub const SOURCE_URL: &str = "sourceUrl";
    pub const CREATED_AT: &str = "createdAt";
    pub const SCORE: &str = "score";
}

/// `{$all: [...]}`
struct All<'s, T>(&'s [T]);

impl<T: Serialize> Serialize for All<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$all", self.0)?;
        map.end()
    }
}

/// `{$meta: "textScore"}`
pub struct TextScore;

impl Serialize for TextScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$meta", TEXT_SCORE)?;
        map.end()
    }
}

/// The projection adding the relevance score to the results: `{score: {$meta: "textScore"}}`
pub struct TextScoreProjection;

impl Serialize for TextScoreProjection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(field::SCORE, &TextScore)?;
        map.end()
    }
}

impl Serialize for TextSearch<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$search", &self.search_text())?;
        map.end()
    }
}

impl Serialize for SitePattern<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("$regex", &self.regex())?;
        map.serialize_entry("$options", "i")?;
        map.end()
    }
}

impl Serialize for Filter<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = [
            self.text.is_some(),
            self.user_id.is_some(),
            self.public.is_some(),
            self.tags.is_some(),
            self.source_url.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(text) = &self.text {
            map.serialize_entry(field::TEXT, text)?;
        }
        if let Some(user_id) = self.user_id {
            map.serialize_entry(field::USER_ID, user_id)?;
        }
        if let Some(public) = self.public {
            map.serialize_entry(field::PUBLIC, &public)?;
        }
        if let Some(tags) = &self.tags {
            map.serialize_entry(field::TAGS, &All(tags))?;
        }
        if let Some(source_url) = &self.source_url {
            map.serialize_entry(field::SOURCE_URL, source_url)?;
        }
        map.end()
    }
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::CreatedAt(direction) => {
                map.serialize_entry(field::CREATED_AT, &(*direction as i32))?
            }
            Self::TextScore => map.serialize_entry(field::SCORE, &TextScore)?,
        }
        map.end()
    }
}
