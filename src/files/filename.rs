//! Export filename generation and sanitization.
//!
//! Titles become filenames by transliterating to ASCII, dropping characters
//! that are unsafe on common filesystems, and replacing whitespace with
//! underscores.

use deunicode::deunicode;

/// Minimum allowed value for max_length.
const MIN_MAX_LENGTH: usize = 1;

/// Configuration for filename generation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum length of the sanitized title stem (default: 40, minimum: 1).
    pub max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_length: 40 }
    }
}

impl Config {
    /// Creates a new Config, ensuring max_length is at least 1.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(MIN_MAX_LENGTH),
        }
    }
}

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters stripped from titles. Parentheses and commas go too, since
/// nearly every title carries an `(Author)` suffix.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '(', ')', ','];

/// Default fallback name when sanitization produces an empty result.
const FALLBACK_NAME: &str = "highlights";

/// Suffix for per-title highlight exports.
pub const TITLE_EXPORT_SUFFIX: &str = "_highlights.txt";

/// Filename for the summary CSV export.
pub const SUMMARY_EXPORT_FILENAME: &str = "kindle_books_filtered.csv";

/// Maximum filename length for most filesystems.
const MAX_FILENAME_LENGTH: usize = 255;

/// Sanitizes a title for use as a filename stem.
///
/// Applies the following transformations in order:
/// 1. Unicode → ASCII transliteration
/// 2. Whitespace → underscore (runs collapse)
/// 3. Invalid filesystem characters removed
/// 4. Truncation to `config.max_length`
/// 5. Leading/trailing dots, underscores, hyphens trimmed
/// 6. Windows reserved names prefixed with `_`
/// 7. Empty results → "highlights" fallback
pub fn sanitize(input: &str, config: &Config) -> String {
    let ascii = deunicode(input);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_underscore = false;

    for c in ascii.chars() {
        if c.is_whitespace() {
            if !last_was_underscore {
                result.push('_');
                last_was_underscore = true;
            }
        } else if INVALID_CHARS.contains(&c) {
            continue;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
            result.push(c);
            last_was_underscore = c == '_';
        }
        // Other punctuation is dropped
    }

    let truncated = truncate_to_length(&result, config.max_length);
    let trimmed = trim_edges(&truncated);
    let final_name = handle_reserved_name(&trimmed);

    if final_name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        final_name
    }
}

/// Filename for a title's highlight export, e.g. `Dune_Frank_Herbert_highlights.txt`.
pub fn title_export_filename(title: &str, config: &Config) -> Result<String, FilenameError> {
    let filename = format!("{}{}", sanitize(title, config), TITLE_EXPORT_SUFFIX);
    validate_length(&filename)?;
    Ok(filename)
}

/// Validates that a final filename doesn't exceed filesystem limits.
///
/// Returns an error if the filename exceeds 255 characters.
pub fn validate_length(filename: &str) -> Result<(), FilenameError> {
    if filename.len() > MAX_FILENAME_LENGTH {
        Err(FilenameError::TooLong {
            length: filename.len(),
            max: MAX_FILENAME_LENGTH,
        })
    } else {
        Ok(())
    }
}

/// Trims leading and trailing dots, underscores, and hyphens.
fn trim_edges(s: &str) -> String {
    s.trim_matches(|c| c == '.' || c == '_' || c == '-')
        .to_string()
}

/// Truncates a string to the specified length.
fn truncate_to_length(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Checks if a name is a Windows reserved name and prefixes it if so.
///
/// Handles both exact matches (CON) and names with extensions (CON.txt).
fn handle_reserved_name(name: &str) -> String {
    let base_name = match name.find('.') {
        Some(pos) => &name[..pos],
        None => name,
    };

    let upper = base_name.to_uppercase();
    for reserved in WINDOWS_RESERVED {
        if upper == *reserved {
            return format!("_{}", name);
        }
    }
    name.to_string()
}

/// Errors that can occur during filename operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename exceeds 255 character filesystem limit.
    TooLong { length: usize, max: usize },
}

impl std::fmt::Display for FilenameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilenameError::TooLong { length, max } => {
                write!(f, "Filename too long: {} characters (max {})", length, max)
            }
        }
    }
}

impl std::error::Error for FilenameError {}
