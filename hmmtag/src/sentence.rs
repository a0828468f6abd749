//! Input and output representations of a sentence.
//!
//! An upstream morphological analyzer produces a [`SentenceCandidates`] holding,
//! for each whitespace-delimited token, every [`Eojeol`] reading it considers
//! possible. The tagger turns it into a [`Sentence`] holding exactly one reading
//! per token.
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, TaggerError};
use crate::phrase::{self, PhraseTag};

static MORPHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+?)/([a-z]+)(?:\+|$)").unwrap());

/// A surface string paired with its fine-grained tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Morpheme {
    surface: String,
    tag: String,
}

impl Morpheme {
    /// Creates a new morpheme.
    pub fn new<S, T>(surface: S, tag: T) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }

    /// Gets the surface string.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Gets the fine-grained tag.
    #[inline(always)]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.surface, self.tag)
    }
}

/// One candidate reading of a token: an ordered sequence of morphemes.
///
/// The textual form is `surface/tag+surface/tag...`, e.g., `나/npp+는/jxc`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Eojeol {
    morphemes: Vec<Morpheme>,
}

impl Eojeol {
    /// Creates a reading from morphemes.
    pub fn new<I>(morphemes: I) -> Self
    where
        I: IntoIterator<Item = Morpheme>,
    {
        Self {
            morphemes: morphemes.into_iter().collect(),
        }
    }

    /// Creates a reading from `(surface, tag)` pairs.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(s, t)| Morpheme::new(s, t)))
    }

    /// Gets the number of morphemes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    /// Checks if the reading has no morphemes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }

    /// Gets the morphemes.
    #[inline(always)]
    pub fn morphemes(&self) -> &[Morpheme] {
        &self.morphemes
    }

    /// Gets the `i`-th morpheme.
    #[inline(always)]
    pub fn morpheme(&self, i: usize) -> &Morpheme {
        &self.morphemes[i]
    }

    /// Creates an iterator of the fine-grained tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.morphemes.iter().map(Morpheme::tag)
    }

    /// Classifies the tag sequence into its coarse phrase tag.
    pub fn phrase_tag(&self) -> PhraseTag {
        let tags: Vec<&str> = self.tags().collect();
        phrase::classify(&tags)
    }
}

impl fmt::Display for Eojeol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.morphemes.iter().enumerate() {
            if i != 0 {
                f.write_str("+")?;
            }
            m.fmt(f)?;
        }
        Ok(())
    }
}

impl FromStr for Eojeol {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        let mut morphemes = vec![];
        let mut end = 0;
        let mut dangling = false;
        for cap in MORPHEME_PATTERN.captures_iter(s) {
            let (Some(whole), Some(surface), Some(tag)) = (cap.get(0), cap.get(1), cap.get(2))
            else {
                continue;
            };
            if whole.start() != end {
                break;
            }
            end = whole.end();
            dangling = whole.as_str().ends_with('+');
            morphemes.push(Morpheme::new(surface.as_str(), tag.as_str()));
        }
        if morphemes.is_empty() || end != s.len() || dangling {
            return Err(TaggerError::invalid_argument(
                "eojeol",
                format!("{s:?} is not a sequence of surface/tag pairs joined by '+'"),
            ));
        }
        Ok(Self { morphemes })
    }
}

/// A token position: the raw token and its candidate readings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenCandidates {
    surface: String,
    readings: Vec<Eojeol>,
}

impl TokenCandidates {
    /// Creates a new token position.
    pub fn new<S>(surface: S, readings: Vec<Eojeol>) -> Self
    where
        S: Into<String>,
    {
        Self {
            surface: surface.into(),
            readings,
        }
    }

    /// Gets the raw token string.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Gets the candidate readings in their original order.
    #[inline(always)]
    pub fn readings(&self) -> &[Eojeol] {
        &self.readings
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Eojeol>) {
        (self.surface, self.readings)
    }
}

/// The candidate readings of every token of one sentence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SentenceCandidates {
    document_id: u32,
    sentence_id: u32,
    end_of_document: bool,
    tokens: Vec<TokenCandidates>,
}

impl SentenceCandidates {
    /// Creates an empty candidate set.
    pub const fn new(document_id: u32, sentence_id: u32, end_of_document: bool) -> Self {
        Self {
            document_id,
            sentence_id,
            end_of_document,
            tokens: vec![],
        }
    }

    /// Appends a token with its candidate readings.
    pub fn push_token<S>(&mut self, surface: S, readings: Vec<Eojeol>)
    where
        S: Into<String>,
    {
        self.tokens.push(TokenCandidates::new(surface, readings));
    }

    /// Appends a token, returning `self`.
    pub fn with_token<S>(mut self, surface: S, readings: Vec<Eojeol>) -> Self
    where
        S: Into<String>,
    {
        self.push_token(surface, readings);
        self
    }

    /// Sets the end-of-document flag.
    pub fn set_end_of_document(&mut self, yes: bool) {
        self.end_of_document = yes;
    }

    /// Gets the document id.
    #[inline(always)]
    pub const fn document_id(&self) -> u32 {
        self.document_id
    }

    /// Gets the sentence id.
    #[inline(always)]
    pub const fn sentence_id(&self) -> u32 {
        self.sentence_id
    }

    /// Checks if this is the last sentence of its document.
    #[inline(always)]
    pub const fn end_of_document(&self) -> bool {
        self.end_of_document
    }

    /// Gets the number of tokens.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks if the sentence has no tokens.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Gets the token positions.
    #[inline(always)]
    pub fn tokens(&self) -> &[TokenCandidates] {
        &self.tokens
    }

    /// Gets the total number of candidate readings.
    pub fn num_readings(&self) -> usize {
        self.tokens.iter().map(|t| t.readings.len()).sum()
    }

    pub(crate) fn into_tokens(self) -> Vec<TokenCandidates> {
        self.tokens
    }
}

/// A disambiguated sentence: exactly one reading per token, in token order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sentence {
    document_id: u32,
    sentence_id: u32,
    end_of_document: bool,
    tokens: Vec<String>,
    eojeols: Vec<Eojeol>,
}

impl Sentence {
    pub(crate) const fn new(
        document_id: u32,
        sentence_id: u32,
        end_of_document: bool,
        tokens: Vec<String>,
        eojeols: Vec<Eojeol>,
    ) -> Self {
        Self {
            document_id,
            sentence_id,
            end_of_document,
            tokens,
            eojeols,
        }
    }

    /// Gets the document id.
    #[inline(always)]
    pub const fn document_id(&self) -> u32 {
        self.document_id
    }

    /// Gets the sentence id.
    #[inline(always)]
    pub const fn sentence_id(&self) -> u32 {
        self.sentence_id
    }

    /// Checks if this is the last sentence of its document.
    #[inline(always)]
    pub const fn end_of_document(&self) -> bool {
        self.end_of_document
    }

    /// Gets the raw tokens.
    #[inline(always)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Gets the chosen readings.
    #[inline(always)]
    pub fn eojeols(&self) -> &[Eojeol] {
        &self.eojeols
    }

    /// Gets the number of tokens.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks if the sentence has no tokens.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eojeol() {
        let e: Eojeol = "나/npp+는/jxc".parse().unwrap();
        assert_eq!(e.len(), 2);
        assert_eq!(e.morpheme(0), &Morpheme::new("나", "npp"));
        assert_eq!(e.morpheme(1), &Morpheme::new("는", "jxc"));
        assert_eq!(e.to_string(), "나/npp+는/jxc");
    }

    #[test]
    fn test_parse_eojeol_symbol_surface() {
        let e: Eojeol = "+/sy".parse().unwrap();
        assert_eq!(e.len(), 1);
        assert_eq!(e.morpheme(0).surface(), "+");
        assert_eq!(e.morpheme(0).tag(), "sy");

        let e: Eojeol = "1/nnc+//sp+2/nnc".parse().unwrap();
        assert_eq!(
            e.tags().collect::<Vec<_>>(),
            vec!["nnc", "sp", "nnc"],
        );
        assert_eq!(e.morpheme(1).surface(), "/");
    }

    #[test]
    fn test_parse_eojeol_invalid() {
        assert!("".parse::<Eojeol>().is_err());
        assert!("나".parse::<Eojeol>().is_err());
        assert!("나/NPP".parse::<Eojeol>().is_err());
        assert!("나/npp+".parse::<Eojeol>().is_err());
    }

    #[test]
    fn test_candidates() {
        let cands = SentenceCandidates::new(3, 7, true)
            .with_token("나는", vec!["나/npp+는/jxc".parse().unwrap()])
            .with_token(
                "간다",
                vec![
                    "가/pvg+ㄴ다/ef".parse().unwrap(),
                    "갈/pvg+ㄴ다/ef".parse().unwrap(),
                ],
            );
        assert_eq!(cands.len(), 2);
        assert_eq!(cands.num_readings(), 3);
        assert_eq!(cands.tokens()[1].surface(), "간다");
        assert_eq!(cands.document_id(), 3);
        assert_eq!(cands.sentence_id(), 7);
        assert!(cands.end_of_document());
    }
}
