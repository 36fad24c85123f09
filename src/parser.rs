use crate::hir::{ParsedQuery, Token};
use chumsky::prelude::*;

/// End of a token: whitespace or end of input, without consuming it.
fn boundary<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Simple<'a, char>>> {
    any()
        .filter(|c: &char| c.is_whitespace())
        .ignored()
        .or(end())
        .rewind()
}

/// A bracket group which spans a whole token, brackets stripped and trimmed.
///
/// The group may contain whitespace (`[spring boot]`), but must be followed by whitespace or the
/// end of the input and must not be blank. It ends at the next bracket, so an unterminated `[`
/// never scans past the following one.
pub fn tag<'a>() -> impl Parser<'a, &'a str, &'a str, extra::Err<Simple<'a, char>>> {
    none_of("[]")
        .repeated()
        .to_slice()
        .delimited_by(just('['), just(']'))
        .map(|tag: &'a str| tag.trim())
        .filter(|tag: &&'a str| !tag.is_empty())
        .then_ignore(boundary())
}

pub fn word<'a>() -> impl Parser<'a, &'a str, &'a str, extra::Err<Simple<'a, char>>> {
    any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .to_slice()
}

pub fn token<'a>() -> impl Parser<'a, &'a str, Token<'a>, extra::Err<Simple<'a, char>>> {
    tag().map(Token::Tag).or(word().map(Token::Term))
}

pub fn parser<'a>() -> impl Parser<'a, &'a str, ParsedQuery<'a>, extra::Err<Simple<'a, char>>> {
    token()
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .padded()
        .map(|tokens| tokens.into_iter().collect())
}

/// Split a raw search query into its terms and tags.
///
/// This never fails. Every token of the query ends up in exactly one of the two lists, in the
/// order it was found.
pub fn split_search_query(query: &str) -> ParsedQuery<'_> {
    match parser().parse(query).into_result() {
        Ok(parsed) => parsed,
        Err(errors) => {
            // the grammar accepts any input, keep the query searchable nonetheless
            log::warn!("Failed to tokenize search query {query:?}: {errors:?}");
            ParsedQuery {
                terms: query.split_whitespace().collect(),
                tags: vec![],
            }
        }
    }
}
