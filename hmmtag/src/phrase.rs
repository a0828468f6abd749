//! Coarse phrase tags of eojeols.
//!
//! The transition model does not look at fine-grained tag sequences directly.
//! Each candidate reading is first collapsed into a [`PhraseTag`]: a head symbol
//! describing how the eojeol begins and an optional tail symbol describing how
//! it ends. The classification is a fixed decision table over the first, second,
//! third and last tags.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Qualitative adnominal followed by an adverbial derivational suffix.
static ADNOMINAL_ADVERB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^m.a\+xsa").unwrap());

/// Nominal or predicate stem followed by an adverbial derivational suffix.
static STEM_ADVERB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[np][a-z]*\+xsa").unwrap());

/// A symbol of a phrase tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Symbol {
    /// Nominal.
    Nominal = b'N',
    /// Predicate.
    Predicate = b'P',
    /// Adnominal.
    Adnominal = b'M',
    /// Adverbial.
    Adverbial = b'A',
    /// Interjection.
    Interjection = b'I',
    /// Particle.
    Particle = b'J',
    /// Connective ending.
    Connective = b'C',
    /// Final or pre-final ending.
    Ending = b'E',
    /// Punctuation and other symbols.
    Punctuation = b'S',
    /// Foreign word.
    Foreign = b'F',
}

impl Symbol {
    /// Gets the character representation.
    #[inline(always)]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

/// Coarse class of an eojeol used by the phrase transition table.
///
/// The head and the tail are never the same symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PhraseTag {
    head: Symbol,
    tail: Option<Symbol>,
}

impl PhraseTag {
    /// The tag of the synthetic end-of-sentence node, rendered as `SF`.
    pub const EOS: Self = Self {
        head: Symbol::Punctuation,
        tail: Some(Symbol::Foreign),
    };

    /// Creates a phrase tag with a single symbol.
    pub const fn single(head: Symbol) -> Self {
        Self { head, tail: None }
    }

    /// Creates a phrase tag from two symbols, dropping the tail if it repeats the head.
    pub fn pair(head: Symbol, tail: Symbol) -> Self {
        Self {
            head,
            tail: (head != tail).then_some(tail),
        }
    }

    /// Gets the head symbol.
    #[inline(always)]
    pub const fn head(&self) -> Symbol {
        self.head
    }

    /// Gets the tail symbol.
    #[inline(always)]
    pub const fn tail(&self) -> Option<Symbol> {
        self.tail
    }

    /// Appends the textual form to `buf`.
    #[inline]
    pub fn push_to(&self, buf: &mut String) {
        buf.push(self.head.as_char());
        if let Some(tail) = self.tail {
            buf.push(tail.as_char());
        }
    }
}

impl fmt::Display for PhraseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::with_capacity(2);
        self.push_to(&mut buf);
        f.write_str(&buf)
    }
}

/// Classifies a fine-grained tag sequence into its phrase tag.
///
/// Sequences shorter than four tags are treated as if padded with empty tags.
pub fn classify<S>(tags: &[S]) -> PhraseTag
where
    S: AsRef<str>,
{
    let tag = |i: usize| tags.get(i).map_or("", |t| t.as_ref());
    let last = tags.last().map_or("", |t| t.as_ref());

    let head = head_symbol(tag(0), tag(1), tag(2));
    let tail = tail_symbol(last);
    resolve(head, tail)
}

#[inline(always)]
fn first_char(tag: &str) -> Option<u8> {
    tag.as_bytes().first().copied()
}

fn is_pair(pattern: &Regex, left: &str, right: &str) -> bool {
    if left.is_empty() || right.is_empty() {
        return false;
    }
    let mut joined = String::with_capacity(left.len() + right.len() + 1);
    joined.push_str(left);
    joined.push('+');
    joined.push_str(right);
    pattern.is_match(&joined)
}

/// Checks if the tag turns the preceding stem into a predicate.
#[inline(always)]
fn derives_predicate(tag: &str) -> bool {
    tag.starts_with("xsv") || tag.starts_with("xsm") || tag == "jp"
}

fn head_symbol(t0: &str, t1: &str, t2: &str) -> Option<Symbol> {
    match first_char(t0)? {
        b'n' => {
            if is_pair(&STEM_ADVERB, t0, t1) {
                Some(Symbol::Adverbial)
            } else if derives_predicate(t1) || (t1.starts_with("xsn") && derives_predicate(t2)) {
                Some(Symbol::Predicate)
            } else {
                Some(Symbol::Nominal)
            }
        }
        b'p' => {
            if is_pair(&STEM_ADVERB, t0, t1) {
                Some(Symbol::Adverbial)
            } else {
                Some(Symbol::Predicate)
            }
        }
        b'm' => {
            if t0.starts_with("ma") || is_pair(&ADNOMINAL_ADVERB, t0, t1) {
                Some(Symbol::Adverbial)
            } else {
                Some(Symbol::Adnominal)
            }
        }
        b'i' => Some(Symbol::Interjection),
        b'j' => Some(Symbol::Particle),
        b's' => Some(Symbol::Punctuation),
        b'f' => {
            if derives_predicate(t1) {
                Some(Symbol::Predicate)
            } else {
                Some(Symbol::Foreign)
            }
        }
        b'x' => {
            if t0.starts_with("xp") {
                // A prefix does not decide the class; the stem after it does.
                head_symbol(t1, t2, "")
            } else if t0.starts_with("xsv") || t0.starts_with("xsm") {
                Some(Symbol::Predicate)
            } else if t0.starts_with("xsa") {
                Some(Symbol::Adverbial)
            } else if t0.starts_with("xsn") {
                Some(Symbol::Nominal)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn tail_symbol(last: &str) -> Option<Symbol> {
    match first_char(last)? {
        b'j' => {
            if last == "jp" {
                Some(Symbol::Predicate)
            } else if last.starts_with("jc") || last.starts_with("jx") {
                Some(Symbol::Particle)
            } else {
                None
            }
        }
        b'e' => {
            if last == "ef" || last == "ep" {
                Some(Symbol::Ending)
            } else if last.starts_with("ec") {
                Some(Symbol::Connective)
            } else if last == "etm" {
                Some(Symbol::Adnominal)
            } else if last == "etn" {
                Some(Symbol::Nominal)
            } else {
                None
            }
        }
        b'x' => {
            if last.starts_with("xsa") {
                Some(Symbol::Adverbial)
            } else if last.starts_with("xsv") || last.starts_with("xsm") {
                Some(Symbol::Predicate)
            } else if last.starts_with("xsn") {
                Some(Symbol::Nominal)
            } else {
                None
            }
        }
        b's' => Some(Symbol::Punctuation),
        b'f' => Some(Symbol::Foreign),
        b'n' => Some(Symbol::Nominal),
        b'p' => Some(Symbol::Predicate),
        b'm' => {
            if last.starts_with("ma") {
                Some(Symbol::Adverbial)
            } else {
                Some(Symbol::Adnominal)
            }
        }
        b'i' => Some(Symbol::Interjection),
        _ => None,
    }
}

fn resolve(head: Option<Symbol>, tail: Option<Symbol>) -> PhraseTag {
    let (head, tail) = match (head, tail) {
        (Some(h), Some(t)) if h == t => (Some(h), None),
        (None, t) => (t, None),
        pair => pair,
    };
    let head = head.unwrap_or(Symbol::Nominal);
    let Some(tail) = tail else {
        return PhraseTag::single(head);
    };

    use Symbol::*;
    let merged = match (head, tail) {
        (Adverbial, Adnominal) => Nominal,
        (Adnominal, Adverbial) => Adverbial,
        (Adnominal, Foreign) => Nominal,
        (Adnominal, Connective) => Nominal,
        (Interjection, Adnominal) => Nominal,
        (Interjection, Particle) => Nominal,
        (Interjection, Connective) => Predicate,
        (Interjection, Foreign) => Nominal,
        _ => return PhraseTag::pair(head, tail),
    };
    PhraseTag::single(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_of(tags: &[&str]) -> String {
        classify(tags).to_string()
    }

    #[test]
    fn test_single_morpheme() {
        assert_eq!(tag_of(&["ncn"]), "N");
        assert_eq!(tag_of(&["npp"]), "N");
        assert_eq!(tag_of(&["pvg"]), "P");
        assert_eq!(tag_of(&["mag"]), "A");
        assert_eq!(tag_of(&["mmd"]), "M");
        assert_eq!(tag_of(&["ii"]), "I");
        assert_eq!(tag_of(&["jxc"]), "J");
        assert_eq!(tag_of(&["sf"]), "S");
        assert_eq!(tag_of(&["f"]), "F");
    }

    #[test]
    fn test_head_and_tail() {
        assert_eq!(tag_of(&["npp", "jxc"]), "NJ");
        assert_eq!(tag_of(&["ncpa", "jca"]), "NJ");
        assert_eq!(tag_of(&["pvg", "ep", "ef"]), "PE");
        assert_eq!(tag_of(&["pvg", "ecs"]), "PC");
        assert_eq!(tag_of(&["pvg", "etm"]), "PM");
        assert_eq!(tag_of(&["pvg", "etn", "jco"]), "PJ");
        assert_eq!(tag_of(&["ncn", "sf"]), "NS");
    }

    #[test]
    fn test_derivation() {
        assert_eq!(tag_of(&["ncpa", "xsvv", "ef"]), "PE");
        assert_eq!(tag_of(&["ncps", "xsms", "ecs"]), "PC");
        assert_eq!(tag_of(&["ncn", "jp", "ef"]), "PE");
        assert_eq!(tag_of(&["ncn", "xsnx", "xsvv", "ef"]), "PE");
        assert_eq!(tag_of(&["ncps", "xsas"]), "A");
        assert_eq!(tag_of(&["paa", "xsam"]), "A");
        assert_eq!(tag_of(&["mma", "xsas"]), "A");
        assert_eq!(tag_of(&["f", "xsvv", "ef"]), "PE");
        assert_eq!(tag_of(&["xp", "ncn", "jca"]), "NJ");
        assert_eq!(tag_of(&["xp", "pvg", "ef"]), "PE");
    }

    #[test]
    fn test_overrides() {
        assert_eq!(tag_of(&["mag", "etm"]), "N");
        assert_eq!(tag_of(&["mmd", "xsas"]), "A");
        assert_eq!(tag_of(&["mmd", "f"]), "N");
        assert_eq!(tag_of(&["mmd", "ecs"]), "N");
        assert_eq!(tag_of(&["ii", "etm"]), "N");
        assert_eq!(tag_of(&["ii", "jxc"]), "N");
        assert_eq!(tag_of(&["ii", "ecs"]), "P");
        assert_eq!(tag_of(&["ii", "f"]), "N");
    }

    #[test]
    fn test_unset_head() {
        assert_eq!(tag_of(&["ef"]), "E");
        assert_eq!(tag_of(&["ecs"]), "C");
        assert_eq!(tag_of(&["xp"]), "N");
        assert_eq!(tag_of(&[]), "N");
        assert_eq!(tag_of(&["", ""]), "N");
    }

    #[test]
    fn test_eos() {
        assert_eq!(PhraseTag::EOS.to_string(), "SF");
    }

    #[test]
    fn test_deterministic_and_distinct() {
        let all = [
            "ncpa", "ncn", "nqpa", "nbu", "npp", "nnc", "pvg", "paa", "px", "mmd", "mma",
            "mag", "maj", "ii", "jcs", "jco", "jxc", "jp", "ecc", "ecs", "etm", "etn", "ef",
            "ep", "xp", "xsnx", "xsvv", "xsms", "xsas", "sf", "sp", "f", "",
        ];
        for a in all {
            for b in all {
                for c in all {
                    let tags = [a, b, c];
                    let x = classify(&tags);
                    assert_eq!(x, classify(&tags));
                    assert_ne!(Some(x.head()), x.tail(), "{tags:?}");
                }
            }
        }
    }
}
