//! Session state and command dispatch.
//!
//! A [`Session`] owns everything one viewer run needs: the loaded store, the
//! current pick, the exclusion keywords and the random generator. The
//! presentation layer drives it exclusively through [`Session::handle`],
//! one [`Command`] per user action. A command that fails leaves the session
//! exactly as it was.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::clippings::{self, ParseError};
use crate::files::{self, filename, ExportError, ExportPayload};
use crate::normalize::tidy_references;
use crate::query::{self, QueryError, SearchOutcome};
use crate::store::{Context, Entry, RecordStore};
use crate::summary::{summarize, TitleSummary};

/// System message Kindle stores in place of a highlight once the
/// publisher's clipping limit is hit.
pub const CLIP_LIMIT_MESSAGE: &str = "You have reached the clipping limit for this item";

/// Titles excluded from random picks unless configured otherwise.
pub const DEFAULT_EXCLUDE_KEYWORDS: [&str; 3] = ["Reggie", "Bicycling", "Python"];

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Titles containing any of these (case-insensitive) are never picked
    pub exclude_keywords: Vec<String>,
    /// Highlights containing this text are dropped on load; empty disables
    pub clip_limit_message: String,
    /// Fixed seed for reproducible picks
    pub seed: Option<u64>,
    /// Export filename rules
    pub filename: filename::Config,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            exclude_keywords: DEFAULT_EXCLUDE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            clip_limit_message: CLIP_LIMIT_MESSAGE.to_string(),
            seed: None,
            filename: filename::Config::default(),
        }
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a clippings export and replace any loaded data
    Load(Vec<u8>),
    /// Pick a random highlight outside the excluded titles
    PickRandom,
    /// Neighbors of `index`, or of the current pick when `None`
    Context { index: Option<usize> },
    /// Titles containing a keyword (blank lists all)
    FindTitles(String),
    /// Every highlight of one title
    ShowTitle(String),
    /// Case-insensitive full-text search
    Search(String),
    /// Deduplicated title/author/year table
    Summary,
    /// Per-title text export
    ExportTitle(String),
    /// Summary CSV export
    ExportSummary,
    /// Drop all loaded data
    Reset,
}

impl Command {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Load(_) => "load",
            Command::PickRandom => "pick-random",
            Command::Context { .. } => "context",
            Command::FindTitles(_) => "find-titles",
            Command::ShowTitle(_) => "show-title",
            Command::Search(_) => "search",
            Command::Summary => "summary",
            Command::ExportTitle(_) => "export-title",
            Command::ExportSummary => "export-summary",
            Command::Reset => "reset",
        }
    }
}

/// Counts reported after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    /// Highlights produced by the parser
    pub parsed: usize,
    /// Clipping-limit messages removed
    pub clip_messages: usize,
    /// Duplicate `(title, location)` entries removed
    pub duplicates: usize,
    /// Highlights now in the store
    pub records: usize,
}

/// A random pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picked {
    pub entry: Entry,
    /// Highlight text with trailing reference numbers tidied for display
    pub display_text: String,
}

/// A title and the number of highlights it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCount {
    pub title: String,
    pub highlights: usize,
}

/// Payload produced for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Loaded(LoadStats),
    Picked(Picked),
    Context(Context),
    Titles(Vec<TitleCount>),
    TitleHighlights { title: String, entries: Vec<Entry> },
    Search(SearchOutcome<Entry>),
    Summary(Vec<TitleSummary>),
    Export(ExportPayload),
    Reset,
}

/// Errors surfaced to the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// State for one viewing session.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    store: Option<RecordStore>,
    current: Option<usize>,
    rng: StdRng,
}

impl Session {
    /// Creates an empty session. The generator is seeded from
    /// `settings.seed` when set, otherwise from OS entropy.
    pub fn new(settings: SessionSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            store: None,
            current: None,
            rng,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The loaded store, if any.
    pub fn store(&self) -> Option<&RecordStore> {
        self.store.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    /// Index of the current random pick.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Reads a clippings file and loads it.
    pub fn load_path(&mut self, path: &Path) -> Result<LoadStats, SessionError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(&bytes)
    }

    /// Executes one command.
    pub fn handle(&mut self, command: Command) -> Result<Output, SessionError> {
        debug!(command = command.name(), "handling command");
        match command {
            Command::Load(bytes) => self.load(&bytes).map(Output::Loaded),
            Command::PickRandom => self.pick_random().map(Output::Picked),
            Command::Context { index } => {
                let store = self.require_store()?;
                let index = index.or(self.current).ok_or(QueryError::NothingSelected)?;
                Ok(Output::Context(store.context(index)))
            }
            Command::FindTitles(keyword) => {
                let store = self.require_store()?;
                let titles = query::find_titles(store, &keyword)
                    .into_iter()
                    .map(|title| TitleCount {
                        title: title.to_string(),
                        highlights: store.entries_for_title(title).count(),
                    })
                    .collect();
                Ok(Output::Titles(titles))
            }
            Command::ShowTitle(title) => {
                let entries = self.title_entries(&title)?;
                Ok(Output::TitleHighlights { title, entries })
            }
            Command::Search(term) => {
                let store = self.require_store()?;
                let outcome = query::search(store, &term).map(Entry::clone);
                Ok(Output::Search(outcome))
            }
            Command::Summary => Ok(Output::Summary(summarize(self.require_store()?))),
            Command::ExportTitle(title) => {
                let entries = self.title_entries(&title)?;
                let payload = files::title_export(&title, &entries, &self.settings.filename)?;
                Ok(Output::Export(payload))
            }
            Command::ExportSummary => {
                let rows = summarize(self.require_store()?);
                Ok(Output::Export(files::summary_export(&rows)?))
            }
            Command::Reset => {
                self.store = None;
                self.current = None;
                info!("session reset");
                Ok(Output::Reset)
            }
        }
    }

    fn load(&mut self, bytes: &[u8]) -> Result<LoadStats, SessionError> {
        let records = clippings::parse(bytes)?;
        let parsed = records.len();

        let mut store = RecordStore::new(records);
        let clip_messages = if self.settings.clip_limit_message.is_empty() {
            0
        } else {
            store.filter_out_message(&self.settings.clip_limit_message)
        };
        let duplicates = store.dedupe();

        let stats = LoadStats {
            parsed,
            clip_messages,
            duplicates,
            records: store.len(),
        };
        info!(
            parsed,
            clip_messages,
            duplicates,
            records = stats.records,
            "loaded clippings"
        );

        self.store = Some(store);
        self.current = None;
        Ok(stats)
    }

    fn pick_random(&mut self) -> Result<Picked, SessionError> {
        let store = self.store.as_ref().ok_or(QueryError::NoData)?;
        let entry =
            query::pick_random_excluding(store, &self.settings.exclude_keywords, &mut self.rng)?
                .clone();
        self.current = Some(entry.index);
        let display_text = tidy_references(&entry.record.highlight);
        Ok(Picked {
            entry,
            display_text,
        })
    }

    fn require_store(&self) -> Result<&RecordStore, QueryError> {
        self.store.as_ref().ok_or(QueryError::NoData)
    }

    fn title_entries(&self, title: &str) -> Result<Vec<Entry>, QueryError> {
        let entries: Vec<Entry> = self
            .require_store()?
            .entries_for_title(title)
            .cloned()
            .collect();
        if entries.is_empty() {
            return Err(QueryError::UnknownTitle(title.to_string()));
        }
        Ok(entries)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
