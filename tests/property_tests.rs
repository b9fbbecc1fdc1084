//! Integration property tests for consent-studio.
//!
//! These tests validate cross-module invariants and end-to-end flows
//! using property-based testing.

use consent_studio::html::{gated_kind, transform};
use consent_studio::{parse_cookie_header, ConsentReader, RawCookieValues};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use proptest::prelude::*;

// Strategy: Generate arbitrary category tokens, including unusual characters
fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("functional".to_string()),
        Just("analytics".to_string()),
        Just("marketing".to_string()),
        Just("neutral".to_string()),
        prop::string::string_regex("[a-zA-Z0-9 +_%\"-]{1,12}").unwrap(),
    ]
}

// Strategy: Generate URLs as they appear in real embeds
fn arb_url() -> impl Strategy<Value = String> {
    prop::string::string_regex("https://[a-z]{3,10}\\.test/[a-z0-9/._-]{0,20}").unwrap()
}

fn reader_for(categories: &[String]) -> ConsentReader {
    let json = serde_json::to_string(categories).unwrap();
    let encoded = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
    ConsentReader::new(RawCookieValues::new().with_storage(encoded))
}

proptest! {
    /// Property: Whatever the banner stores is read back unchanged and in order
    #[test]
    fn proptest_storage_round_trips(categories in prop::collection::vec(arb_category(), 0..6)) {
        let reader = reader_for(&categories);
        prop_assert_eq!(reader.list_granted(), categories.as_slice());

        for category in &categories {
            prop_assert!(reader.granted(category));
        }
    }

    /// Property: any/all agree with per-category checks
    ///
    /// `any` of an empty list is false and `all_granted` of an empty list is
    /// true, matching ordinary set logic.
    #[test]
    fn proptest_any_all_laws(
        granted in prop::collection::vec(arb_category(), 0..5),
        asked in prop::collection::vec(arb_category(), 0..5)
    ) {
        let reader = reader_for(&granted);

        prop_assert_eq!(reader.any(&asked), asked.iter().any(|c| reader.granted(c)));
        prop_assert_eq!(reader.all_granted(&asked), asked.iter().all(|c| reader.granted(c)));
        prop_assert!(reader.all_granted(&granted));
        prop_assert!(!reader.any::<&str>(&[]));
        prop_assert!(reader.all_granted::<&str>(&[]));

        if !asked.is_empty() && reader.all_granted(&asked) {
            prop_assert!(reader.any(&asked));
        }
    }

    /// Property: Arbitrary storage never panics and never grants from non-arrays
    #[test]
    fn proptest_storage_without_array_grants_nothing(raw in "[^\\[%]{0,40}") {
        let reader = ConsentReader::new(RawCookieValues::new().with_storage(raw));
        prop_assert!(reader.list_granted().is_empty());
    }

    /// Property: Arbitrary cookie headers never panic
    #[test]
    fn proptest_cookie_header_never_panics(header in "\\PC{0,80}") {
        let reader = ConsentReader::new(RawCookieValues::from_pairs(parse_cookie_header(&header)));
        let _ = reader.state();
    }

    /// Property: Transforming arbitrary input never panics
    #[test]
    fn proptest_transform_never_panics(fragment in "\\PC{0,120}", category in arb_category()) {
        let _ = transform(&fragment, &category);
        let _ = gated_kind(&fragment);
    }

    /// Property: Text without markup passes through untouched
    #[test]
    fn proptest_text_without_tags_is_unchanged(text in "[^<]{0,80}") {
        prop_assert_eq!(transform(&text, "analytics"), text);
    }

    /// Property: Gated media never keeps a loadable src, and gating is stable
    #[test]
    fn proptest_media_gating_is_stable(
        url in arb_url(),
        tag in prop::sample::select(vec!["img", "video", "audio", "embed", "source", "track", "iframe"]),
        category in arb_category()
    ) {
        let input = format!(r#"<{tag} src="{url}">"#);
        let once = transform(&input, &category);

        let data_src = format!(r#"data-src="{url}""#);
        let loadable_src = format!(r#" src="{url}""#);
        prop_assert!(once.contains(&data_src));
        prop_assert!(!once.contains(&loadable_src));
        prop_assert_eq!(transform(&once, &category), once.clone());
    }

    /// Property: External scripts keep exactly one empty src however often they are gated
    #[test]
    fn proptest_external_script_has_one_placeholder(url in arb_url(), rounds in 1usize..4) {
        let mut html = format!(r#"<script src="{url}"></script>"#);
        for _ in 0..rounds {
            html = transform(&html, "analytics");
        }
        prop_assert_eq!(html.matches(r#"src="""#).count(), 1);
        let data_src = format!(r#"data-src="{url}""#);
        prop_assert!(html.contains(&data_src));
    }
}
