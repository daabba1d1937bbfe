//! Integration tests for parsing real-shaped clippings exports

use kindle_highlights::clippings::{parse, parse_file, parse_str};
use kindle_highlights::ParseError;

use crate::helpers::{fixtures_dir, load_fixture, temp_clippings, SAMPLE};

#[test]
fn sample_export_parses_highlights_only() {
    let highlights = parse_file(&fixtures_dir().join(SAMPLE)).unwrap();

    // Bookmark and note segments are dropped
    assert_eq!(highlights.len(), 7);
    assert!(highlights.iter().all(|h| !h.highlight.is_empty()));
    assert!(highlights.iter().all(|h| !h.location.is_empty()));
}

#[test]
fn sample_export_strips_bom_and_reference_markers() {
    let highlights = parse(&load_fixture(SAMPLE)).unwrap();

    let first = &highlights[0];
    assert_eq!(first.title, "Dune (Dune Chronicles, Book 1) (Frank Herbert)");
    assert_eq!(first.location, "1012-1013");
    assert_eq!(first.added_on, "Monday, March 2, 2020 9:15:03 PM");
    assert_eq!(first.highlight, "I must not fear. Fear is the mind-killer.");
}

#[test]
fn sample_export_keeps_file_order() {
    let highlights = parse(&load_fixture(SAMPLE)).unwrap();
    let locations: Vec<&str> = highlights.iter().map(|h| h.location.as_str()).collect();
    assert_eq!(
        locations,
        [
            "1012-1013",
            "2040-2041",
            "150-152",
            "300-301",
            "500-502",
            "1012-1013",
            "420-421"
        ]
    );
}

#[test]
fn three_segments_yield_three_records() {
    let text = "\
A (X)
- Your Highlight on page 1 | Location 1-2 | Added on Monday, January 6, 2020 1:00:00 PM

first
==========
B (Y)
- Your Highlight on page 2 | Location 3-4 | Added on Tuesday, January 7, 2020 1:00:00 PM

second
continues here
==========
C (Z)
- Your Highlight on page 3 | Location 5 | Added on Wednesday, January 8, 2020 1:00:00 PM

third
==========
";
    let highlights = parse_str(text);
    assert_eq!(highlights.len(), 3);
    assert_eq!(highlights[1].highlight, "second continues here");
    assert_eq!(highlights[2].location, "5");
    assert_eq!(highlights[2].added_on, "Wednesday, January 8, 2020 1:00:00 PM");
}

#[test]
fn malformed_metadata_keeps_record_with_empty_fields() {
    let highlights = parse_str(
        "A (X)\n- Your Highlight somewhere odd\n\ntext\n==========\n",
    );
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].location, "");
    assert_eq!(highlights[0].added_on, "");
}

#[test]
fn utf16_export_is_decoded() {
    let text = "\u{feff}A (X)\r\n- Your Highlight on page 1 | Location 9 | Added on Friday, May 1, 2020\r\n\r\nbody\r\n==========\r\n";
    let mut bytes = Vec::new();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let highlights = parse(&bytes).unwrap();
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].title, "A (X)");
    assert_eq!(highlights[0].highlight, "body");
}

#[test]
fn missing_file_is_a_read_error() {
    let (dir, _) = temp_clippings("");
    let err = parse_file(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, ParseError::Read { .. }));
}

#[test]
fn invalid_utf8_is_an_encoding_error() {
    let err = parse(&[b'A', 0xC3, 0x28]).unwrap_err();
    assert!(matches!(err, ParseError::Encoding { .. }));
}
