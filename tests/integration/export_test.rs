//! Integration tests for text and CSV exports

use std::fs;

use kindle_highlights::files::{ExportError, ExportPayload};
use kindle_highlights::{Command, Output, QueryError, Session, SessionError, SessionSettings};

use crate::helpers::{load_fixture, SAMPLE};

fn loaded() -> Session {
    let mut session = Session::new(SessionSettings {
        seed: Some(1),
        ..SessionSettings::default()
    });
    session
        .handle(Command::Load(load_fixture(SAMPLE)))
        .unwrap();
    session
}

fn export(session: &mut Session, command: Command) -> ExportPayload {
    match session.handle(command).unwrap() {
        Output::Export(payload) => payload,
        other => panic!("unexpected output: {:?}", other),
    }
}

#[test]
fn title_export_payload() {
    let mut session = loaded();
    let payload = export(
        &mut session,
        Command::ExportTitle("Pride and Prejudice (Jane Austen)".into()),
    );

    assert_eq!(payload.filename, "Pride_and_Prejudice_Jane_Austen_highlights.txt");
    insta::assert_snapshot!(payload.contents, @r"
    [2] It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife.
    ----------------------------------------
    [6] I declare after all there is no enjoyment like reading!
    ----------------------------------------
    ");
}

#[test]
fn long_title_filename_is_truncated() {
    let mut session = loaded();
    let payload = export(
        &mut session,
        Command::ExportTitle("Dune (Dune Chronicles, Book 1) (Frank Herbert)".into()),
    );
    assert_eq!(
        payload.filename,
        "Dune_Dune_Chronicles_Book_1_Frank_Herber_highlights.txt"
    );
}

#[test]
fn summary_export_payload() {
    let mut session = loaded();
    let payload = export(&mut session, Command::ExportSummary);

    assert_eq!(payload.filename, "kindle_books_filtered.csv");
    insta::assert_snapshot!(payload.contents, @r"
    Title,Author,Year Read
    Dune,Frank Herbert,2020
    Pride and Prejudice,Jane Austen,2021
    Python Crash Course,Eric Matthes,2019
    ");
}

#[test]
fn summary_csv_reads_back_with_csv_crate() {
    let mut session = loaded();
    let payload = export(&mut session, Command::ExportSummary);

    let mut reader = csv::Reader::from_reader(payload.contents.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ["Title", "Author", "Year Read"]);
    assert_eq!(reader.records().count(), 3);
}

#[test]
fn export_writes_into_missing_directory() {
    let mut session = loaded();
    let payload = export(&mut session, Command::ExportSummary);

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports").join("books");
    let path = payload.write_to(&target).unwrap();

    assert_eq!(path, target.join("kindle_books_filtered.csv"));
    assert_eq!(fs::read_to_string(path).unwrap(), payload.contents);
}

#[test]
fn export_into_file_path_is_write_error() {
    let mut session = loaded();
    let payload = export(&mut session, Command::ExportSummary);

    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();

    let err = payload.write_to(&blocker).unwrap_err();
    assert!(matches!(err, ExportError::Write { .. }));
}

#[test]
fn unknown_title_export_fails() {
    let mut session = loaded();
    let err = session
        .handle(Command::ExportTitle("Nonexistent".into()))
        .unwrap_err();
    assert!(matches!(err, SessionError::Query(QueryError::UnknownTitle(_))));
}
