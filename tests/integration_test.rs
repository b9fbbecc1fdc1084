//! Integration tests for consent-studio.
//!
//! These tests exercise the public API end to end: cookies in, answers out,
//! and template blocks in, gated markup out.

use std::io::Write;

use consent_studio::directive::{banner_script, consent_block, ConsentBlock};
use consent_studio::{
    BannerConfig, ConsentQuery, ConsentReader, ConsentState, Error, RawCookieValues,
    STORAGE_COOKIE,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Encodes a storage value the way the banner script does.
fn url_encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn reader_with_storage(json: &str) -> ConsentReader {
    ConsentReader::new(RawCookieValues::new().with_storage(url_encode(json)))
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

#[test]
fn seen_banner_defaults_to_false() {
    assert!(!ConsentReader::new(RawCookieValues::new()).seen_banner());
    assert!(!ConsentReader::new(RawCookieValues::new().with_seen("")).seen_banner());
}

#[test]
fn seen_banner_accepts_true_and_one() {
    assert!(ConsentReader::new(RawCookieValues::new().with_seen("true")).seen_banner());
    assert!(ConsentReader::new(RawCookieValues::new().with_seen("1")).seen_banner());
    assert!(!ConsentReader::new(RawCookieValues::new().with_seen("0")).seen_banner());
}

#[test]
fn consent_id_is_returned_verbatim() {
    let reader = ConsentReader::new(RawCookieValues::new().with_consent_id("abc-123-def-456"));
    assert_eq!(reader.id(), Some("abc-123-def-456"));
    assert_eq!(ConsentReader::detached().id(), None);
}

#[test]
fn storage_is_decoded_in_order() {
    let reader = reader_with_storage(r#"["functional","analytics","marketing"]"#);
    assert_eq!(
        reader.list_granted(),
        ["functional", "analytics", "marketing"]
    );
}

#[test]
fn granted_checks_single_categories() {
    let reader = reader_with_storage(r#"["functional","analytics"]"#);

    assert!(reader.granted("functional"));
    assert!(reader.granted("analytics"));
    assert!(!reader.granted("marketing"));
}

#[test]
fn any_requires_one_match() {
    let reader = reader_with_storage(r#"["functional","analytics"]"#);

    assert!(reader.any(&["functional", "marketing"]));
    assert!(reader.any(&["analytics", "neutral"]));
    assert!(!reader.any(&["marketing", "neutral"]));
}

#[test]
fn all_granted_requires_every_match() {
    let reader = reader_with_storage(r#"["functional","analytics","marketing"]"#);

    assert!(reader.all_granted(&["functional", "analytics"]));
    assert!(reader.all_granted(&["functional", "marketing"]));
    assert!(!reader.all_granted(&["functional", "neutral"]));
    assert!(!reader.all_granted(&["marketing", "neutral"]));
}

#[test]
fn state_aggregates_every_cookie() {
    let reader = ConsentReader::new(
        RawCookieValues::new()
            .with_seen("true")
            .with_consent_id("test-id-123")
            .with_storage(url_encode(r#"["functional","analytics"]"#)),
    );

    assert_eq!(
        reader.state(),
        ConsentState {
            id: Some("test-id-123".to_string()),
            seen: true,
            consents: vec!["functional".to_string(), "analytics".to_string()],
        }
    );
}

#[test]
fn query_shorthand_matches_granted_and_any() {
    let reader = reader_with_storage(r#"["functional"]"#);

    assert!(reader.check("functional"));
    assert!(!reader.check("marketing"));
    assert!(reader.check(["functional", "marketing"]));
    assert!(!reader.check(["marketing", "analytics"]));
    assert!(!reader.check(ConsentQuery::Any(Vec::new())));
}

#[test]
fn malformed_storage_grants_nothing() {
    for raw in ["not-valid-json", "%7B%22a%22%3A1%7D", "%22just-a-string%22", "%5B"] {
        let reader = ConsentReader::new(RawCookieValues::new().with_storage(raw));
        assert!(reader.list_granted().is_empty(), "{raw}");
        assert!(!reader.granted("functional"), "{raw}");
    }
}

#[test]
fn detached_reader_answers_safe_defaults() {
    let reader = ConsentReader::detached();

    assert!(!reader.seen_banner());
    assert_eq!(reader.id(), None);
    assert!(!reader.granted("marketing"));
    assert!(!reader.any(&["marketing", "analytics"]));
    assert!(reader.list_granted().is_empty());
    assert!(!reader.all_granted(&["functional"]));
    assert_eq!(reader.state(), ConsentState::default());
}

#[test]
fn state_serializes_with_null_id() {
    let json = serde_json::to_string(&ConsentReader::detached().state()).unwrap();
    assert_eq!(json, r#"{"id":null,"seen":false,"consents":[]}"#);
}

#[test]
fn cookie_header_round_trip() {
    let header = format!(
        "theme=dark; {STORAGE_COOKIE}={}; consent-studio__seen=1",
        url_encode(r#"["analytics"]"#)
    );
    let reader = ConsentReader::new(RawCookieValues::from_cookie_header(&header));

    assert!(reader.seen_banner());
    assert_eq!(reader.list_granted(), ["analytics"]);
}

// ---------------------------------------------------------------------------
// Banner bootstrap
// ---------------------------------------------------------------------------

#[test]
fn banner_script_contains_bootstrap() {
    let output = banner_script(&BannerConfig::default()).unwrap();

    assert!(output.contains("window.bakery"));
    assert!(output.contains("Consent Studio - European CMP"));
    assert!(output.contains("consent.studio"));
    assert!(output.contains("googleConsentMode"));
}

#[test]
fn banner_script_reflects_config() {
    let mut config = BannerConfig::default();
    config.debug = true;

    let output = banner_script(&config).unwrap();
    assert!(output.contains(r#""enabled":true"#));
    assert!(output.contains(r#""debug":true"#));
}

#[test]
fn config_file_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "debug = true\n\n[google_consent_mode]\nwait_for_update = 750\nurl_passthrough = true"
    )
    .unwrap();

    let config = BannerConfig::load(file.path()).unwrap();
    assert!(config.debug);
    assert_eq!(config.google_consent_mode.wait_for_update, 750);
    assert!(config.google_consent_mode.url_passthrough);
    assert!(config.google_consent_mode.ads_data_redaction);
}

#[test]
fn missing_config_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consent-studio.toml");

    let err = BannerConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::Io(ref p, _) if p == &path));
    assert!(err.to_string().contains("consent-studio.toml"));
}

// ---------------------------------------------------------------------------
// Consent blocks
// ---------------------------------------------------------------------------

#[test]
fn inline_script_is_made_inert() {
    let output = consent_block(
        "\n<script>\n    fbq('track', 'PageView');\n</script>\n",
        Some("marketing"),
    );

    assert!(output.contains(r#"type="text/plain""#));
    assert!(output.contains(r#"cs-require="marketing""#));
    assert!(output.contains("fbq('track', 'PageView');"));
}

#[test]
fn external_script_is_deferred() {
    let output = consent_block(
        r#"<script src="https://www.google-analytics.com/analytics.js"></script>"#,
        Some("analytics"),
    );

    assert!(output.contains(r#"src="""#));
    assert!(output.contains(r#"data-src="https://www.google-analytics.com/analytics.js""#));
    assert!(output.contains(r#"cs-require="analytics""#));
}

#[test]
fn iframe_is_deferred() {
    let output = consent_block(
        r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ" width="560" height="315"></iframe>"#,
        Some("marketing"),
    );

    assert_eq!(
        output,
        r#"<iframe data-src="https://www.youtube.com/embed/dQw4w9WgXcQ" cs-require="marketing" width="560" height="315"></iframe>"#
    );
}

#[test]
fn tracking_pixel_is_deferred() {
    let output = consent_block(
        r#"<img src="https://tracking-pixel.example.com/pixel.gif" alt="Tracking">"#,
        Some("analytics"),
    );

    assert!(output.contains(r#"data-src="https://tracking-pixel.example.com/pixel.gif""#));
    assert!(output.contains(r#"cs-require="analytics""#));
    assert!(!output.contains(r#" src="https://tracking-pixel.example.com/"#));
}

#[test]
fn every_media_element_is_deferred() {
    let cases = [
        (r#"<video src="https://example.com/video.mp4" controls></video>"#, "https://example.com/video.mp4"),
        (r#"<audio src="https://example.com/audio.mp3" controls></audio>"#, "https://example.com/audio.mp3"),
        (
            r#"<embed src="https://example.com/content.swf" type="application/x-shockwave-flash">"#,
            "https://example.com/content.swf",
        ),
        (r#"<source src="https://example.com/video.mp4" type="video/mp4">"#, "https://example.com/video.mp4"),
        (
            r#"<track src="https://example.com/subtitles.vtt" kind="subtitles" srclang="en">"#,
            "https://example.com/subtitles.vtt",
        ),
    ];

    for (input, url) in cases {
        let output = consent_block(input, Some("marketing"));
        assert!(output.contains(&format!(r#"data-src="{url}""#)), "{output}");
        assert!(output.contains(r#"cs-require="marketing""#), "{output}");
        assert!(!output.contains(&format!(r#" src="{url}""#)), "{output}");
    }
}

#[test]
fn default_category_is_functional() {
    let output = consent_block(
        r#"<track src="https://example.com/subtitles.vtt" kind="subtitles" srclang="en">"#,
        None,
    );
    assert!(output.contains(r#"cs-require="functional""#));
}

#[test]
fn single_quoted_src_is_normalized() {
    let output = consent_block(
        "<script src='https://example.com/script.js'></script>",
        Some("analytics"),
    );

    assert_eq!(
        output,
        r#"<script src="" data-src="https://example.com/script.js" cs-require="analytics"></script>"#
    );
}

#[test]
fn data_attributes_before_src_are_kept() {
    let output = consent_block(
        r#"<img data-lazy="true" data-id="123" src="https://example.com/image.jpg" alt="Test">"#,
        Some("analytics"),
    );

    assert_eq!(
        output,
        r#"<img data-lazy="true" data-id="123" data-src="https://example.com/image.jpg" cs-require="analytics" alt="Test">"#
    );
}

#[test]
fn data_attributes_around_src_are_kept() {
    let output = consent_block(
        r#"<img data-width="100" data-height="200" src="https://example.com/image.jpg" data-caption="Test">"#,
        Some("analytics"),
    );

    assert!(output.contains(r#"data-width="100""#));
    assert!(output.contains(r#"data-height="200""#));
    assert!(output.contains(r#"data-src="https://example.com/image.jpg""#));
    assert!(output.contains(r#"data-caption="Test""#));
    assert!(output.contains(r#"cs-require="analytics""#));
}

#[test]
fn self_closing_tags_stay_self_closing() {
    let img = consent_block(
        r#"<img src="https://example.com/pixel.gif" alt="Tracking" />"#,
        Some("marketing"),
    );
    assert_eq!(
        img,
        r#"<img data-src="https://example.com/pixel.gif" cs-require="marketing" alt="Tracking" />"#
    );

    let embed = consent_block(
        r#"<embed src="https://example.com/content.swf" type="application/x-shockwave-flash" />"#,
        Some("marketing"),
    );
    assert!(embed.contains(r#"data-src="https://example.com/content.swf""#));
    assert!(embed.ends_with("/>"));
}

#[test]
fn attribute_without_whitespace_is_separated() {
    let output = consent_block(
        r#"<script src="https://example.com/script.js"async defer></script>"#,
        Some("analytics"),
    );

    assert_eq!(
        output,
        r#"<script src="" data-src="https://example.com/script.js" cs-require="analytics" async defer></script>"#
    );
}

#[test]
fn whitespace_around_equals_is_tolerated() {
    let output = consent_block(
        r#"<iframe src = "https://youtube.com/embed/xxx" width="560"></iframe>"#,
        Some("marketing"),
    );

    assert!(output.contains(r#"data-src="https://youtube.com/embed/xxx""#));
    assert!(output.contains(r#"cs-require="marketing""#));
    assert!(output.contains(r#"width="560""#));
}

#[test]
fn streamed_block_matches_direct_call() {
    use std::fmt::Write as _;

    let mut block = ConsentBlock::open(Some("analytics"));
    write!(block, "\n<img src=\"{}\">\n", "https://px.test/p.gif").unwrap();

    assert_eq!(
        block.finish(),
        consent_block("<img src=\"https://px.test/p.gif\">", Some("analytics"))
    );
}

#[test]
fn gtag_snippet_gates_loader_and_config() {
    let output = consent_block(
        "<script async src=\"https://www.googletagmanager.com/gtag/js?id=G-X\"></script>\n\
         <script>gtag('config','G-X');</script>",
        Some("analytics"),
    );

    assert_eq!(
        output,
        "<script async src=\"\" data-src=\"https://www.googletagmanager.com/gtag/js?id=G-X\" cs-require=\"analytics\"></script>\n\
         <script type=\"text/plain\" cs-require=\"analytics\">gtag('config','G-X');</script>"
    );
    assert!(!output.contains(" src=\"https://www.googletagmanager.com"));
}
