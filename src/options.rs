//! Configuration options for TOON encoding and decoding.
//!
//! This module provides the types that customize codec behavior:
//!
//! - [`ToonOptions`]: Main configuration struct
//! - [`Delimiter`]: Choice of delimiter for inline arrays and tabular rows (comma, tab, or pipe)
//! - [`KeyFolding`]: Whether the encoder collapses single-field object chains into dotted keys
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{ToonOptions, Delimiter, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { tags: Vec<String> }
//!
//! let data = Data { tags: vec!["a".into(), "b".into()] };
//!
//! // Use pipe delimiter
//! let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
//! let toon = to_string_with_options(&data, options).unwrap();
//! assert_eq!(toon, "tags[2|]: a|b");
//! ```

use crate::error::{Error, Result};

/// Delimiter choice for inline arrays and tabular rows.
///
/// The delimiter configured here applies to arrays of the document; an array
/// appearing directly as an array element falls back to comma when encoding.
/// Non-comma delimiters are advertised inside the array header, e.g. `[3|]`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    pub(crate) fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Key-folding mode for encoding.
///
/// With [`KeyFolding::Safe`], chains of single-field objects collapse into a
/// dotted key: `{"a": {"b": {"c": 1}}}` encodes as `a.b.c: 1`. Folding only
/// happens when every segment is a plain identifier, so the transformation is
/// reversed exactly by decoding with path expansion enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyFolding {
    /// No folding; nested objects encode with indentation.
    #[default]
    Off,
    /// Collapse single-field object chains whose segments are all identifiers.
    Safe,
}

/// Minimum accepted indentation width.
pub const MIN_INDENT: usize = 1;
/// Maximum accepted indentation width.
pub const MAX_INDENT: usize = 16;

/// Configuration options for TOON encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{ToonOptions, Delimiter, KeyFolding};
///
/// // Defaults: strict decoding, comma delimiter, 2-space indent
/// let options = ToonOptions::new();
/// assert!(options.strict);
///
/// // Custom configuration
/// let options = ToonOptions::new()
///     .with_delimiter(Delimiter::Pipe)
///     .with_key_folding(KeyFolding::Safe)
///     .with_indent(4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToonOptions {
    /// Reject length mismatches, blank lines inside arrays, duplicate keys,
    /// and expansion conflicts while decoding. Defaults to `true`.
    pub strict: bool,
    /// Active delimiter for inline arrays and tabular rows of the document.
    pub delimiter: Delimiter,
    /// Spaces per indentation level, `1..=16`. Defaults to 2.
    pub indent: usize,
    /// Key-folding mode for encoding.
    pub key_folding: KeyFolding,
    /// Maximum number of segments in a folded key (`None` = unbounded).
    pub flatten_depth: Option<usize>,
    /// Expand dotted keys into nested objects while decoding.
    pub expand_paths: bool,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            strict: true,
            delimiter: Delimiter::default(),
            indent: 2,
            key_folding: KeyFolding::default(),
            flatten_depth: None,
            expand_paths: false,
        }
    }
}

impl ToonOptions {
    /// Creates the default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::ToonOptions;
    ///
    /// let options = ToonOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.expand_paths);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict decoding on or off.
    ///
    /// Non-strict decoding trusts the actual element count over the declared
    /// array length, ignores blank lines inside array bodies, and resolves
    /// duplicate keys and expansion conflicts last-writer-wins.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the delimiter for inline arrays and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Values outside `1..=16` are rejected when the options are used.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the key-folding mode for encoding.
    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    /// Caps folded keys at `depth` dotted segments.
    #[must_use]
    pub fn with_flatten_depth(mut self, depth: usize) -> Self {
        self.flatten_depth = Some(depth);
        self
    }

    /// Enables or disables dotted-key expansion while decoding.
    #[must_use]
    pub fn with_expand_paths(mut self, expand: bool) -> Self {
        self.expand_paths = expand;
        self
    }

    /// Validates the option values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `indent` lies outside `1..=16`.
    pub fn validate(&self) -> Result<()> {
        if self.indent < MIN_INDENT || self.indent > MAX_INDENT {
            return Err(Error::config(format!(
                "indent must be between {MIN_INDENT} and {MAX_INDENT}, got {}",
                self.indent
            )));
        }
        Ok(())
    }
}
