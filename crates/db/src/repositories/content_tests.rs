//! Unit tests for content query composition.

use sea_orm::{DbBackend, QueryTrait};

use super::*;

fn sql(filter: &ContentFilter) -> String {
    contents::Entity::find()
        .filter(filter_condition(filter))
        .build(DbBackend::Postgres)
        .to_string()
}

#[test]
fn test_empty_filter_matches_everything() {
    let sql = sql(&ContentFilter::new());
    assert!(!sql.contains("LIKE"), "{sql}");
    assert!(!sql.contains("content_category"), "{sql}");
}

#[test]
fn test_category_filter() {
    let sql = sql(&ContentFilter::new().with_category(ContentCategory::Webtoon));
    assert!(sql.contains("'webtoon'"), "{sql}");
    assert!(!sql.contains("LIKE"), "{sql}");
}

#[test]
fn test_search_covers_title_description_platform() {
    let sql = sql(&ContentFilter::new().with_search("Solo"));

    assert!(sql.contains("LOWER(\"contents\".\"title\")"), "{sql}");
    assert!(sql.contains("LOWER(\"contents\".\"description\")"), "{sql}");
    assert!(sql.contains("LOWER(\"contents\".\"platform\")"), "{sql}");
    assert!(sql.contains("'%solo%'"), "{sql}");
    assert!(sql.contains("ESCAPE"), "{sql}");
    assert_eq!(sql.matches(" OR ").count(), 2, "{sql}");
}

#[test]
fn test_category_and_search_are_conjoined() {
    let sql = sql(
        &ContentFilter::new()
            .with_category(ContentCategory::Novel)
            .with_search("하츄핑"),
    );

    assert!(sql.contains("'novel'"), "{sql}");
    assert!(sql.contains(" AND "), "{sql}");
    assert!(sql.contains("%하츄핑%"), "{sql}");
}

#[test]
fn test_category_mapping_round_trips() {
    for category in ContentCategory::ALL {
        assert_eq!(from_db_category(to_db_category(category)), category);
    }
}

#[test]
fn test_malformed_entries_column_is_repository_error() {
    let result = from_json("tags", serde_json::json!({ "value": "not-an-array" }));
    assert!(matches!(result, Err(ContentError::Repository(_))));
}

#[test]
fn test_entries_json_shape() {
    let json = to_json(&[Entry::new("Chugong")]).unwrap();
    assert_eq!(json, serde_json::json!([{ "value": "Chugong" }]));
}
