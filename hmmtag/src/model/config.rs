use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{Result, TaggerError};

/// Config key of the lexical emission table.
pub const PWT_POS_KEY: &str = "pwt.pos";

/// Config key of the fine-tag transition table.
pub const PTT_POS_KEY: &str = "ptt.pos";

/// Config key of the phrase-tag transition table.
pub const PTT_WP_KEY: &str = "ptt.wp";

// `key value`, `key = value`, `key: value`
static ENTRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s=:]+)\s*(?:[=:]\s*|\s+)(.*?)\s*$").unwrap());

/// Paths of the three statistics tables, as written in a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    pwt_pos: Option<PathBuf>,
    ptt_pos: Option<PathBuf>,
    ptt_wp: Option<PathBuf>,
}

/// Table paths joined onto a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    /// Lexical emission table, keyed by `surface/tag`.
    pub pwt_pos: PathBuf,

    /// Fine-tag transition table, keyed by tags and `tag-tag` bigrams.
    pub ptt_pos: PathBuf,

    /// Phrase-tag transition table, keyed by phrase tags and their bigrams.
    pub ptt_wp: PathBuf,
}

impl TaggerConfig {
    /// Parses a config from a reader.
    ///
    /// Input starting with `{` is read as a JSON object whose string members
    /// name the tables. Otherwise each line holds one entry, with the key and
    /// its value separated by whitespace, `=`, or `:`; blank lines and lines
    /// starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// [`TaggerError`] is returned when the input is malformed.
    pub fn from_reader<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut text = String::new();
        rdr.read_to_string(&mut text)?;
        if text.trim_start().starts_with('{') {
            Self::from_json(&text)
        } else {
            Self::from_lines(&text)
        }
    }

    fn from_json(text: &str) -> Result<Self> {
        let members: Map<String, Value> = serde_json::from_str(text).map_err(|e| {
            TaggerError::config(format!("line {}", e.line()), format!("Invalid JSON: {e}"))
        })?;
        let mut config = Self::default();
        for (key, value) in &members {
            if !Self::is_table_key(key) {
                log::debug!("[hmmtag] Ignored config key {key:?}");
                continue;
            }
            let Value::String(path) = value else {
                return Err(TaggerError::config(
                    key.as_str(),
                    format!("{value} is not a string"),
                ));
            };
            config.set(key, PathBuf::from(path));
        }
        Ok(config)
    }

    fn from_lines(text: &str) -> Result<Self> {
        let mut config = Self::default();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(cap) = ENTRY_PATTERN.captures(line) else {
                return Err(TaggerError::config(
                    format!("line {}", i + 1),
                    format!("{line:?} is not a key-value entry"),
                ));
            };
            let key = &cap[1];
            if Self::is_table_key(key) {
                config.set(key, PathBuf::from(&cap[2]));
            } else {
                log::debug!("[hmmtag] Ignored config key {key:?}");
            }
        }
        Ok(config)
    }

    fn is_table_key(key: &str) -> bool {
        matches!(key, PWT_POS_KEY | PTT_POS_KEY | PTT_WP_KEY)
    }

    fn set(&mut self, key: &str, path: PathBuf) {
        match key {
            PWT_POS_KEY => self.pwt_pos = Some(path),
            PTT_POS_KEY => self.ptt_pos = Some(path),
            PTT_WP_KEY => self.ptt_wp = Some(path),
            _ => {}
        }
    }

    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// [`TaggerError`] is returned when the file cannot be opened or parsed.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TaggerError::config(path.display().to_string(), format!("Failed to open: {e}"))
        })?;
        Self::from_reader(file)
    }

    /// Sets the path of the lexical emission table.
    pub fn pwt_pos<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.pwt_pos = Some(path.into());
        self
    }

    /// Sets the path of the fine-tag transition table.
    pub fn ptt_pos<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.ptt_pos = Some(path.into());
        self
    }

    /// Sets the path of the phrase-tag transition table.
    pub fn ptt_wp<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.ptt_wp = Some(path.into());
        self
    }

    /// Joins every table path onto `base_dir`.
    ///
    /// # Errors
    ///
    /// [`TaggerError::Config`] is returned naming the first absent key.
    pub fn resolve<P>(&self, base_dir: P) -> Result<TablePaths>
    where
        P: AsRef<Path>,
    {
        let base_dir = base_dir.as_ref();
        let join = |path: &Option<PathBuf>, key: &str| {
            path.as_ref()
                .map(|p| base_dir.join(p))
                .ok_or_else(|| TaggerError::config(key, "required key is missing"))
        };
        Ok(TablePaths {
            pwt_pos: join(&self.pwt_pos, PWT_POS_KEY)?,
            ptt_pos: join(&self.ptt_pos, PTT_POS_KEY)?,
            ptt_wp: join(&self.ptt_wp, PTT_WP_KEY)?,
        })
    }
}
