//! Trained statistics for tagging.
pub(crate) mod config;
pub(crate) mod table;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::common::{BOUNDARY_TAG, PCONSTANT, SF};
use crate::errors::{Result, TaggerError};
use crate::phrase::PhraseTag;
use crate::sentence::Eojeol;

pub use crate::model::config::{
    PTT_POS_KEY, PTT_WP_KEY, PWT_POS_KEY, TablePaths, TaggerConfig,
};
pub use crate::model::table::ProbTable;

/// Magic bytes identifying a compiled hmmtag model.
pub const MODEL_MAGIC: &[u8] = b"HmmTagModelRkyv 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;

/// The three statistics tables of the HMM.
#[derive(Debug, Default, Clone, Archive, Serialize, Deserialize)]
pub struct Model {
    pwt_pos: ProbTable,
    ptt_pos: ProbTable,
    ptt_wp: ProbTable,
}

impl Model {
    /// Creates a model from loaded tables.
    ///
    /// # Arguments
    ///
    ///  - `pwt_pos`: Lexical table keyed by `surface/tag`.
    ///  - `ptt_pos`: Fine-tag table keyed by tags and `tag-tag` bigrams.
    ///  - `ptt_wp`: Phrase-tag table keyed by phrase tags and their bigrams.
    pub const fn new(pwt_pos: ProbTable, ptt_pos: ProbTable, ptt_wp: ProbTable) -> Self {
        Self {
            pwt_pos,
            ptt_pos,
            ptt_wp,
        }
    }

    /// Loads a model from readers of the three tables.
    ///
    /// # Errors
    ///
    /// [`TaggerError::Load`] is returned when a table cannot be parsed.
    pub fn from_readers<P, T, W>(pwt_pos: P, ptt_pos: T, ptt_wp: W) -> Result<Self>
    where
        P: Read,
        T: Read,
        W: Read,
    {
        Ok(Self::new(
            ProbTable::from_reader(pwt_pos, PWT_POS_KEY)?,
            ProbTable::from_reader(ptt_pos, PTT_POS_KEY)?,
            ProbTable::from_reader(ptt_wp, PTT_WP_KEY)?,
        ))
    }

    /// Loads a model from resolved table paths.
    ///
    /// # Errors
    ///
    /// [`TaggerError::Load`] is returned when a table cannot be opened or parsed.
    pub fn from_paths(paths: &TablePaths) -> Result<Self> {
        Ok(Self::new(
            ProbTable::from_path(&paths.pwt_pos)?,
            ProbTable::from_path(&paths.ptt_pos)?,
            ProbTable::from_path(&paths.ptt_wp)?,
        ))
    }

    /// Loads a model from the tables named in `config_file`, relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// [`TaggerError::Config`] is returned when the config lacks a key, and
    /// [`TaggerError::Load`] when a table cannot be loaded.
    pub fn from_config<B, C>(base_dir: B, config_file: C) -> Result<Self>
    where
        B: AsRef<Path>,
        C: AsRef<Path>,
    {
        let base_dir = base_dir.as_ref();
        let config = TaggerConfig::from_path(base_dir.join(config_file))?;
        Self::from_paths(&config.resolve(base_dir)?)
    }

    /// Gets the lexical table.
    #[inline(always)]
    pub const fn pwt_pos(&self) -> &ProbTable {
        &self.pwt_pos
    }

    /// Gets the fine-tag transition table.
    #[inline(always)]
    pub const fn ptt_pos(&self) -> &ProbTable {
        &self.ptt_pos
    }

    /// Gets the phrase-tag transition table.
    #[inline(always)]
    pub const fn ptt_wp(&self) -> &ProbTable {
        &self.ptt_wp
    }

    /// Computes the emission score of a reading.
    ///
    /// Every morpheme contributes `lex(w/t) + ptt(prev-t) - ptt(t)`, where the
    /// previous tag of the first morpheme is the boundary tag, and the reading
    /// closes with `ptt(last-bnk) - ptt(bnk)`. A missing statistic counts as
    /// [`PCONSTANT`].
    pub fn emission(&self, eojeol: &Eojeol) -> f64 {
        let mut key = String::new();
        let mut score = 0.0;
        let mut prev = BOUNDARY_TAG;
        for m in eojeol.morphemes() {
            key.clear();
            key.push_str(m.surface());
            key.push('/');
            key.push_str(m.tag());
            score += self.pwt_pos.first_or(&key, PCONSTANT);

            key.clear();
            key.push_str(prev);
            key.push('-');
            key.push_str(m.tag());
            score += self.ptt_pos.first_or(&key, PCONSTANT);
            score -= self.ptt_pos.first_or(m.tag(), PCONSTANT);

            prev = m.tag();
        }
        key.clear();
        key.push_str(prev);
        key.push('-');
        key.push_str(BOUNDARY_TAG);
        score += self.ptt_pos.first_or(&key, PCONSTANT);
        score -= self.ptt_pos.first_or(BOUNDARY_TAG, PCONSTANT);
        score
    }

    /// Computes the transition score between phrase tags.
    ///
    /// The bigram falls back to [`SF`]; the unigram of `right` is subtracted
    /// only when present.
    pub fn transition(&self, left: PhraseTag, right: PhraseTag) -> f64 {
        let mut key = String::with_capacity(5);
        left.push_to(&mut key);
        key.push('-');
        right.push_to(&mut key);
        let mut score = self.ptt_wp.first_or(&key, SF);

        key.clear();
        right.push_to(&mut key);
        if let Some(unigram) = self.ptt_wp.first(&key) {
            score -= unigram;
        }
        score
    }

    /// Exports the model data.
    ///
    /// # Errors
    ///
    /// [`TaggerError`] is returned when writing or serialization fails.
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        wtr.write_all(&[0xFF; PADDING_LEN])?;
        let bytes = rkyv::to_bytes::<Error>(self).map_err(|e| {
            TaggerError::invalid_state("rkyv serialization failed", e.to_string())
        })?;
        wtr.write_all(&bytes)?;
        Ok(())
    }

    /// Creates a model from a reader of compiled data.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidArgument`] is returned when the magic bytes
    /// mismatch, and [`TaggerError::InvalidState`] when the data is corrupted.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if &magic[..] != MODEL_MAGIC {
            return Err(TaggerError::invalid_argument(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }
        let mut padding = [0; PADDING_LEN];
        rdr.read_exact(&mut padding)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;
        let mut aligned = AlignedVec::<RKYV_ALIGNMENT>::with_capacity(buffer.len());
        aligned.extend_from_slice(&buffer);

        let model = rkyv::from_bytes::<Self, Error>(&aligned).map_err(|e| {
            TaggerError::invalid_state(
                "rkyv validation failed. The model file may be corrupted or incompatible.",
                e.to_string(),
            )
        })?;
        log::info!(
            "[hmmtag] Loaded a compiled model ({} + {} + {} entries)",
            model.pwt_pos.len(),
            model.ptt_pos.len(),
            model.ptt_wp.len(),
        );
        Ok(model)
    }

    /// Creates a model from a zstd-compressed file of compiled data.
    ///
    /// # Errors
    ///
    /// [`TaggerError`] is returned when the file cannot be opened or decoded.
    pub fn from_zstd<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TaggerError::invalid_argument("path", format!("Failed to open model file: {e}"))
        })?;
        Self::read(zstd::Decoder::new(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::phrase::Symbol;

    fn model() -> Model {
        Model::from_readers(
            "나/npp -1.0\n는/jxc -2.0\n".as_bytes(),
            "bnk -0.5\nnpp -3.0\njxc -4.0\nbnk-npp -1.5\nnpp-jxc -0.75\njxc-bnk -0.25\n".as_bytes(),
            "NJ -2.0\nN-NJ -1.0\nSF -0.5\n".as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_emission() {
        let model = model();
        let e: Eojeol = "나/npp+는/jxc".parse().unwrap();
        let expected = (-1.0 + -1.5 - -3.0) + (-2.0 + -0.75 - -4.0) + (-0.25 - -0.5);
        assert!((model.emission(&e) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_emission_all_missing() {
        let model = Model::default();
        for n in 1..=4 {
            let e = Eojeol::from_pairs((0..n).map(|i| (format!("x{i}"), "zz")));
            assert_eq!(model.emission(&e), PCONSTANT * n as f64);
        }
    }

    #[test]
    fn test_emission_empty_reading() {
        let model = model();
        let expected = -20.0 - -0.5;
        assert!((model.emission(&Eojeol::default()) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_transition() {
        let model = model();
        let n = PhraseTag::single(Symbol::Nominal);
        let nj = PhraseTag::pair(Symbol::Nominal, Symbol::Particle);
        assert!((model.transition(n, nj) - (-1.0 - -2.0)).abs() < 1e-9);
        // No bigram, unigram of the right side present.
        assert!((model.transition(nj, PhraseTag::EOS) - (SF - -0.5)).abs() < 1e-9);
        // Neither present.
        assert_eq!(model.transition(nj, n), SF);
    }

    #[test]
    fn test_write_read() {
        let model = model();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let other = Model::read(buf.as_slice()).unwrap();
        assert_eq!(other.pwt_pos().get("나/npp"), Some(&[-1.0][..]));
        assert_eq!(other.ptt_pos().get("npp-jxc"), Some(&[-0.75][..]));
        assert_eq!(other.ptt_wp().get("N-NJ"), Some(&[-1.0][..]));
        assert_eq!(other.ptt_wp().len(), 3);
    }

    #[test]
    fn test_read_bad_magic() {
        let data = b"NotAnHmmTagModel file, padded to some length\n";
        assert!(matches!(
            Model::read(&data[..]),
            Err(TaggerError::InvalidArgument(_)),
        ));
    }

    #[test]
    fn test_read_corrupted() {
        let mut buf = MODEL_MAGIC.to_vec();
        buf.extend_from_slice(&[0xFF; PADDING_LEN]);
        buf.extend_from_slice(&[0x12; 7]);
        assert!(matches!(
            Model::read(buf.as_slice()),
            Err(TaggerError::InvalidState(_)),
        ));
    }
}
