//! End-to-end tests driving a session through its command interface

use kindle_highlights::session::CLIP_LIMIT_MESSAGE;
use kindle_highlights::{
    Command, LoadStats, Output, QueryError, SearchOutcome, Session, SessionError, SessionSettings,
    TitleCount,
};

use crate::helpers::{fixtures_dir, load_fixture, SAMPLE};

fn seeded(seed: u64) -> Session {
    Session::new(SessionSettings {
        seed: Some(seed),
        ..SessionSettings::default()
    })
}

fn loaded_sample(seed: u64) -> Session {
    let mut session = seeded(seed);
    session
        .handle(Command::Load(load_fixture(SAMPLE)))
        .unwrap();
    session
}

#[test]
fn duplicate_and_clip_limit_records_are_removed() {
    let text = format!(
        "\
A (X)
- Your Highlight on page 1 | Location 10 | Added on Monday, January 6, 2020 1:00:00 PM

alpha
==========
B (Y)
- Your Highlight on page 2 | Location 20 | Added on Tuesday, January 7, 2020 1:00:00 PM

beta
==========
A (X)
- Your Highlight on page 1 | Location 10 | Added on Wednesday, January 8, 2020 1:00:00 PM

alpha again
==========
B (Y)
- Your Highlight on page 3 | Location 30 | Added on Thursday, January 9, 2020 1:00:00 PM

{}
==========
",
        CLIP_LIMIT_MESSAGE
    );

    let mut session = seeded(1);
    let output = session.handle(Command::Load(text.into_bytes())).unwrap();
    assert_eq!(
        output,
        Output::Loaded(LoadStats {
            parsed: 4,
            clip_messages: 1,
            duplicates: 1,
            records: 2,
        })
    );

    let Output::Summary(rows) = session.handle(Command::Summary).unwrap() else {
        panic!("expected summary");
    };
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);
    assert_eq!(rows[0].author, "X");
    assert_eq!(rows[1].year_read, "2020");
}

#[test]
fn sample_load_stats() {
    let mut session = seeded(1);
    let output = session
        .handle(Command::Load(load_fixture(SAMPLE)))
        .unwrap();
    assert_eq!(
        output,
        Output::Loaded(LoadStats {
            parsed: 7,
            clip_messages: 1,
            duplicates: 1,
            records: 5,
        })
    );

    let indices: Vec<usize> = session
        .store()
        .unwrap()
        .iter()
        .map(|entry| entry.index)
        .collect();
    assert_eq!(indices, [0, 1, 2, 4, 6]);
}

#[test]
fn load_path_matches_load_command() {
    let mut session = seeded(1);
    let stats = session.load_path(&fixtures_dir().join(SAMPLE)).unwrap();
    assert_eq!(stats.records, 5);
}

#[test]
fn random_never_picks_excluded_titles() {
    for seed in 0..50 {
        let mut session = loaded_sample(seed);
        let Output::Picked(picked) = session.handle(Command::PickRandom).unwrap() else {
            panic!("expected a pick");
        };
        assert!(!picked.entry.record.title.contains("Python"));
    }
}

#[test]
fn same_seed_same_pick() {
    let pick = |seed| {
        let mut session = loaded_sample(seed);
        match session.handle(Command::PickRandom).unwrap() {
            Output::Picked(picked) => picked.entry.index,
            other => panic!("unexpected output: {:?}", other),
        }
    };
    assert_eq!(pick(42), pick(42));
}

#[test]
fn single_remaining_title_is_always_picked() {
    for seed in 0..20 {
        let mut session = Session::new(SessionSettings {
            exclude_keywords: vec!["Dune".into(), "Pride".into()],
            seed: Some(seed),
            ..SessionSettings::default()
        });
        session
            .handle(Command::Load(load_fixture(SAMPLE)))
            .unwrap();

        let Output::Picked(picked) = session.handle(Command::PickRandom).unwrap() else {
            panic!("expected a pick");
        };
        assert_eq!(picked.entry.index, 4);
    }
}

#[test]
fn excluding_everything_is_empty_result() {
    let mut session = Session::new(SessionSettings {
        exclude_keywords: vec!["e".into()],
        seed: Some(9),
        ..SessionSettings::default()
    });
    session
        .handle(Command::Load(load_fixture(SAMPLE)))
        .unwrap();

    let err = session.handle(Command::PickRandom).unwrap_err();
    assert!(matches!(err, SessionError::Query(QueryError::EmptyResult)));
    assert_eq!(err.to_string(), "No titles remaining after exclusions.");
    assert_eq!(session.current_index(), None);
}

#[test]
fn context_skips_filtered_neighbors() {
    let mut session = loaded_sample(1);

    // Index 3 (clip limit) is gone, so 2 and 6 are adjacent
    let Output::Context(context) = session.handle(Command::Context { index: Some(2) }).unwrap()
    else {
        panic!("expected context");
    };
    assert_eq!(context.above, None);
    assert_eq!(
        context.below.as_deref(),
        Some("I declare after all there is no enjoyment like reading!")
    );

    let Output::Context(context) = session.handle(Command::Context { index: Some(4) }).unwrap()
    else {
        panic!("expected context");
    };
    assert_eq!(context.above, None);
    assert_eq!(context.below, None);
    assert_eq!(context.current.as_deref(), Some("Simple is better than complex."));
}

#[test]
fn context_follows_current_pick() {
    let mut session = loaded_sample(5);
    let Output::Picked(picked) = session.handle(Command::PickRandom).unwrap() else {
        panic!("expected a pick");
    };
    let Output::Context(context) = session.handle(Command::Context { index: None }).unwrap() else {
        panic!("expected context");
    };
    assert_eq!(context.title.as_deref(), Some(picked.entry.record.title.as_str()));
    assert_eq!(context.current.as_deref(), Some(picked.entry.record.highlight.as_str()));
}

#[test]
fn search_is_case_insensitive_and_blank_is_not_performed() {
    let mut session = loaded_sample(1);

    let Output::Search(outcome) = session.handle(Command::Search("  ".into())).unwrap() else {
        panic!("expected search output");
    };
    assert_eq!(outcome, SearchOutcome::NotPerformed);

    let Output::Search(outcome) = session.handle(Command::Search("FEAR".into())).unwrap() else {
        panic!("expected search output");
    };
    let indices: Vec<usize> = outcome.matches().iter().map(|e| e.index).collect();
    assert_eq!(indices, [0]);
}

#[test]
fn find_titles_by_author_fragment() {
    let mut session = loaded_sample(1);
    let output = session
        .handle(Command::FindTitles("austen".into()))
        .unwrap();
    assert_eq!(
        output,
        Output::Titles(vec![TitleCount {
            title: "Pride and Prejudice (Jane Austen)".to_string(),
            highlights: 2,
        }])
    );
}

#[test]
fn reset_then_query_is_no_data() {
    let mut session = loaded_sample(1);
    session.handle(Command::Reset).unwrap();
    let err = session.handle(Command::Summary).unwrap_err();
    assert!(matches!(err, SessionError::Query(QueryError::NoData)));
}
