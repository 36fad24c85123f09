use codingmark_search::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const ALICE: &str = "12345678-abcd-1234-abcd-123456789abc";
const BOB: &str = "87654321-dcba-4321-dcba-cba987654321";

fn compile<'a>(query: &'a str, context: SearchContext<'a>) -> CompiledQuery<'a> {
    CompiledQuery::compile(query, &context).unwrap()
}

fn assert_compiled(query: &str, context: SearchContext, filter: Value, sort: Value) {
    let compiled = compile(query, context);
    assert_eq!(filter, serde_json::to_value(&compiled.filter).unwrap());
    assert_eq!(sort, serde_json::to_value(compiled.sort).unwrap());
}

#[test]
fn test_public() {
    assert_compiled(
        "tokio [rust] -unsafe",
        SearchContext::public(None),
        json!({
            "$text": {"$search": r#""tokio" -unsafe"#},
            "public": true,
            "tags": {"$all": ["rust"]},
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_public_relevance() {
    assert_compiled(
        "tokio",
        SearchContext::public(None).with_sort("relevance"),
        json!({
            "$text": {"$search": r#""tokio""#},
            "public": true,
        }),
        json!({"score": {"$meta": "textScore"}}),
    );
}

#[test]
fn test_relevance_without_terms() {
    assert_compiled(
        "[rust] site:github.com",
        SearchContext::public(None).with_sort("relevance"),
        json!({
            "public": true,
            "tags": {"$all": ["rust"]},
            "sourceUrl": {"$regex": r"github\.com", "$options": "i"},
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_personal_any() {
    assert_compiled(
        "tokio axum",
        SearchContext::personal(ALICE).with_include(SearchInclude::Any),
        json!({
            "$text": {"$search": "tokio axum"},
            "userId": ALICE,
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_personal_private_only() {
    assert_compiled(
        "private:only [rust]",
        SearchContext::personal(ALICE),
        json!({
            "userId": ALICE,
            "public": false,
            "tags": {"$all": ["rust"]},
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_public_user_directive() {
    let query = format!("user:{BOB} [rust]");
    assert_compiled(
        &query,
        SearchContext::public(Some(ALICE)),
        json!({
            "userId": BOB,
            "public": true,
            "tags": {"$all": ["rust"]},
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_personal_foreign_user_directive() {
    let query = format!("user:{BOB}");
    assert_compiled(
        &query,
        SearchContext::personal(ALICE),
        json!({"userId": ALICE}),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_public_private_only_pinned_to_caller() {
    let query = format!("private:only user:{BOB}");
    assert_compiled(
        &query,
        SearchContext::public(Some(ALICE)),
        json!({
            "userId": ALICE,
            "public": false,
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_public_private_only_anonymous() {
    assert_compiled(
        "private:only",
        SearchContext::public(None),
        json!({"public": true}),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_lang_is_inert() {
    assert_compiled(
        "lang:en tokio",
        SearchContext::public(None),
        json!({
            "$text": {"$search": r#""tokio""#},
            "public": true,
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_unknown_directive_is_text() {
    assert_compiled(
        "private:all foo:bar",
        SearchContext::public(None),
        json!({
            "$text": {"$search": r#""private:all" "foo:bar""#},
            "public": true,
        }),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_empty() {
    assert_compiled(
        "",
        SearchContext::personal(ALICE),
        json!({"userId": ALICE}),
        json!({"createdAt": -1}),
    );
}

#[test]
fn test_unscoped() {
    let context = SearchContext {
        is_public: false,
        user_id: None,
        sort: NEWEST,
        include: SearchInclude::All,
    };
    assert_eq!(
        Err(ScopeValidationError),
        CompiledQuery::compile("tokio", &context)
    );
}

#[test]
fn test_pipeline_steps() {
    let parsed = split_search_query("term1 [tag1] term2 [tag2]");
    assert_eq!(vec!["term1", "term2"], parsed.terms);
    assert_eq!(vec!["tag1", "tag2"], parsed.tags);

    let terms = extract_fulltext_and_special_search_terms(&parsed.terms);
    let filter = set_public_or_personal_filter(false, Filter::default(), Some(ALICE)).unwrap();
    let filter = set_tags_to_filter(&parsed.tags, filter);
    let filter = set_fulltext_search_terms_filter(&terms.fulltext, filter, SearchInclude::All);

    assert_eq!(
        json!({
            "$text": {"$search": r#""term1" "term2""#},
            "userId": ALICE,
            "tags": {"$all": ["tag1", "tag2"]},
        }),
        serde_json::to_value(&filter).unwrap()
    );
}
