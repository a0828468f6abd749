use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{Result, TaggerError};

/// A read-only table of log-probability vectors keyed by statistic names.
///
/// Keys are unigram tags (`ncn`), tag bigrams joined by `-` (`ncn-jca`), or
/// morpheme/tag pairs joined by `/` (`학교/ncn`).
#[derive(Debug, Default, Clone, Archive, Serialize, Deserialize)]
pub struct ProbTable {
    map: HashMap<String, Vec<f64>>,
}

impl ProbTable {
    /// Builds a table from `key value1 value2 ...` lines.
    ///
    /// # Arguments
    ///
    ///  - `rdr`: A reader of the table.
    ///  - `name`: A name of the source used in error messages.
    ///
    /// # Errors
    ///
    /// [`TaggerError`] is returned when a line does not consist of a key
    /// followed by one or more floating-point numbers.
    pub fn from_reader<R>(rdr: R, name: &str) -> Result<Self>
    where
        R: Read,
    {
        let mut map = HashMap::new();
        let rdr = BufReader::new(rdr);
        for (i, line) in rdr.lines().enumerate() {
            let line = line.map_err(|e| TaggerError::load(name, Some(i + 1), e.to_string()))?;
            let mut spl = line.split_whitespace();
            let Some(key) = spl.next() else {
                continue;
            };
            let values = spl
                .map(|v| {
                    v.parse::<f64>().map_err(|e| {
                        TaggerError::load(name, Some(i + 1), format!("{v:?}: {e}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if values.is_empty() {
                return Err(TaggerError::load(
                    name,
                    Some(i + 1),
                    format!("{key:?} has no values"),
                ));
            }
            if map.insert(key.to_string(), values).is_some() {
                log::debug!("[hmmtag] {name}: duplicate key {key:?} at line {}", i + 1);
            }
        }
        log::info!("[hmmtag] Loaded {} entries from {name}", map.len());
        Ok(Self { map })
    }

    /// Builds a table from a file.
    ///
    /// Files with the extension `zst` are decompressed on the fly.
    ///
    /// # Errors
    ///
    /// [`TaggerError`] is returned when the file cannot be opened or parsed.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| {
            TaggerError::load(&name, None, format!("Failed to open the table: {e}"))
        })?;
        if path.extension().is_some_and(|ext| ext == "zst") {
            let decoder = zstd::Decoder::new(file)
                .map_err(|e| TaggerError::load(&name, None, e.to_string()))?;
            Self::from_reader(decoder, &name)
        } else {
            Self::from_reader(file, &name)
        }
    }

    /// Gets the vector of log-probabilities for the key.
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.map.get(key).map(Vec::as_slice)
    }

    /// Gets the first log-probability for the key.
    #[inline(always)]
    pub(crate) fn first(&self, key: &str) -> Option<f64> {
        self.map.get(key).and_then(|v| v.first().copied())
    }

    /// Gets the first log-probability for the key, or `default` if the key is unseen.
    #[inline(always)]
    pub(crate) fn first_or(&self, key: &str, default: f64) -> f64 {
        self.first(key).unwrap_or(default)
    }

    /// Gets the number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Checks if the table has no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
