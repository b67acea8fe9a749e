//! End-to-end behaviour of search query normalization through the public API.
//!
//! Covers the documented rewrites, pass-through of canonical filters, scan
//! order, and the paths that feed the normalizer (strict parsing, basic
//! filter form, search box submission).

use std::thread;

use scimfilter::search::{
    AliasTableBuilder, FilterExpression, OperatorCode, QueryMode, QueryNormalizer, SearchStrategy,
    SearchSubmission, submit,
};
use scimfilter::{BasicFilter, FilterError, ScimFilterConfig, normalize};

// =============================================================================
// Documented rewrites
// =============================================================================

#[test]
fn documented_rewrites() {
    let cases = [
        ("name contains john", "name co john"),
        ("name starts with john doe", "name sw john doe"),
        ("age equals 30", "age eq 30"),
        ("name foo bar", "name foo bar"),
        ("name", "name"),
        ("name eq john", "name eq john"),
    ];
    for (raw, expected) in cases {
        assert_eq!(normalize(raw), expected, "normalizing {raw:?}");
    }
}

#[test]
fn every_default_phrase_maps_to_its_code() {
    let table = [
        ("start with", "sw"),
        ("starts with", "sw"),
        ("end with", "ew"),
        ("ends with", "ew"),
        ("contain", "co"),
        ("contains", "co"),
        ("equal", "eq"),
        ("equals", "eq"),
    ];
    for (phrase, code) in table {
        let raw = format!("displayName {phrase} Jane Roe");
        assert_eq!(normalize(&raw), format!("displayName {code} Jane Roe"));
    }
}

#[test]
fn normalization_is_idempotent() {
    for raw in ["name starts with john doe", "emails contains wso2", "name foo bar", ""] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}

// =============================================================================
// Scan order
// =============================================================================

#[test]
fn leftmost_phrase_decides_split_point() {
    assert_eq!(
        normalize("nickName equals ends with x"),
        "nickName eq ends with x"
    );
    assert_eq!(
        normalize("nickName something ends with equals x"),
        "nickName ew equals x"
    );
}

#[test]
fn single_word_phrase_wins_at_same_position() {
    let table = AliasTableBuilder::new()
        .alias(OperatorCode::Eq, "is")
        .alias(OperatorCode::Sw, "is like")
        .build()
        .expect("table is valid");
    let normalizer = QueryNormalizer::new(table);
    assert_eq!(normalizer.normalize("name is like jo"), "name eq like jo");
}

#[test]
fn normalizer_can_be_shared_between_threads() {
    let normalizer = QueryNormalizer::default();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let normalizer = &normalizer;
                scope.spawn(move || normalizer.normalize(&format!("name contains user{i}")))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("name co user{i}"));
        }
    });
}

// =============================================================================
// Feeding paths
// =============================================================================

#[test]
fn strict_parse_after_normalization() {
    let normalizer = QueryNormalizer::default();
    let expr = FilterExpression::from_raw(&normalizer, "userName starts with adm").unwrap();
    assert_eq!(expr.attribute, "userName");
    assert_eq!(expr.operator, OperatorCode::Sw);
    assert_eq!(expr.value, "adm");

    let err = FilterExpression::from_raw(&normalizer, "userName is adm").expect_err("no phrase, no operator");
    assert!(matches!(err, FilterError::UnknownOperator { operator } if operator == "is"));
}

#[test]
fn basic_form_and_normalized_query_agree() {
    let form = BasicFilter::new("name", OperatorCode::Ew, "doe");
    assert_eq!(form.to_query(), normalize("name ends with doe"));
}

#[test]
fn search_box_submission() {
    let normalizer = QueryNormalizer::default();
    assert_eq!(submit(&normalizer, QueryMode::Process, "name equals jo"), "name eq jo");
    assert_eq!(submit(&normalizer, QueryMode::Verbatim, "name equals jo"), "name equals jo");

    let submission = SearchSubmission::new(
        normalizer,
        SearchStrategy::new("emails", OperatorCode::Co),
        QueryMode::Process,
    );
    assert_eq!(submission.resolve("wso2"), "emails co wso2");
    assert_eq!(submission.resolve("emails contains wso2"), "emails co wso2");
}

#[test]
fn configured_submission_uses_extra_aliases() {
    let config = ScimFilterConfig::from_toml_str(
        r#"
        [search]
        default_attribute = "userName"
        default_operator = "sw"

        [aliases]
        co = ["includes"]
        "#,
    )
    .unwrap();
    let submission = config.submission().unwrap();
    assert_eq!(submission.resolve("adm"), "userName sw adm");
    assert_eq!(submission.resolve("emails includes wso2"), "emails co wso2");
}
