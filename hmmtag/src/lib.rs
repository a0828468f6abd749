//! # hmmtag
//!
//! hmmtag disambiguates the output of a Korean morphological analyzer.
//! Given every candidate reading of every token in a sentence, it chooses one
//! reading per token with Viterbi search over a hidden Markov model.
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use hmmtag::{Model, SentenceCandidates, Tagger};
//!
//! let pwt_pos = "나/npp -1.0\n는/jxc -1.0\n는/jxt -6.0\n";
//! let ptt_pos = "npp -2.0\njxc -3.0\njxt -3.0\nbnk -1.0\nbnk-npp -1.0\nnpp-jxc -0.5\nnpp-jxt -4.0\njxc-bnk -0.5\njxt-bnk -0.5\n";
//! let ptt_wp = "N -1.0\nNJ -1.0\nSF -1.0\nN-SF -1.0\nNJ-SF -1.0\n";
//!
//! let model = Model::from_readers(
//!     pwt_pos.as_bytes(),
//!     ptt_pos.as_bytes(),
//!     ptt_wp.as_bytes(),
//! )?;
//! let tagger = Tagger::new(model);
//!
//! let sent = SentenceCandidates::new(0, 0, true).with_token(
//!     "나는",
//!     vec!["나/npp+는/jxc".parse()?, "나/npp+는/jxt".parse()?],
//! );
//!
//! let mut worker = tagger.new_worker();
//! worker.reset_sentence(sent);
//! worker.tag()?;
//! assert_eq!(worker.num_tokens(), 1);
//!
//! let t0 = worker.token(0);
//! assert_eq!(t0.surface(), "나는");
//! assert_eq!(t0.eojeol().to_string(), "나/npp+는/jxc");
//! assert_eq!(t0.phrase_tag().to_string(), "NJ");
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]

pub mod common;
pub mod errors;
pub mod model;
pub mod phrase;
pub mod sentence;
pub mod tagger;
pub mod token;

#[cfg(test)]
mod tests;

pub use model::{Model, ProbTable, TaggerConfig};
pub use sentence::{Eojeol, Morpheme, Sentence, SentenceCandidates, TokenCandidates};
pub use tagger::{Capacity, Tagger};

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
