//! Provider of a routine for tagging.
use crate::errors::{Result, TaggerError};
use crate::sentence::{Sentence, SentenceCandidates};
use crate::tagger::Tagger;
use crate::tagger::lattice::{Capacity, Lattice, NodeIdx};
use crate::token::{Token, TokenIter};

/// Stage of the decode of the current sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeState {
    /// A sentence is set and ready to be tagged.
    Reset,
    /// The lattice is being built.
    Building,
    /// The forward pass is running.
    Relaxing,
    /// The best path is being traced back.
    Backtracing,
    /// The result is available.
    Done,
}

/// Provider of a routine for tagging.
///
/// It holds the lattice and the chosen path of one sentence,
/// which are reused to avoid unnecessary memory reallocation.
pub struct Worker {
    pub(crate) tagger: Tagger,
    pub(crate) sent: SentenceCandidates,
    pub(crate) lattice: Lattice,
    pub(crate) path: Vec<NodeIdx>,
    state: DecodeState,
}

impl Worker {
    /// Creates a new instance.
    pub(crate) fn new(tagger: Tagger) -> Self {
        let lattice = Lattice::new(tagger.capacity());
        Self {
            tagger,
            sent: SentenceCandidates::default(),
            lattice,
            path: vec![],
            state: DecodeState::Reset,
        }
    }

    /// Resets the input sentence to be tagged.
    pub fn reset_sentence(&mut self, sent: SentenceCandidates) {
        self.sent = sent;
        self.path.clear();
        self.lattice.reset();
        self.state = DecodeState::Reset;
    }

    /// Chooses one reading per token for the sentence set by
    /// [`Self::reset_sentence()`], storing the result in the worker.
    ///
    /// # Errors
    ///
    ///  - [`TaggerError::CapacityExceeded`] is returned when the sentence does not
    ///    fit into the lattice. The worker keeps the sentence, so it can be retried
    ///    after [`Self::set_capacity()`].
    ///  - [`TaggerError::InvalidArgument`] is returned when a token has no readings.
    ///  - [`TaggerError::InvalidState`] is returned when the sentence has already
    ///    been tagged.
    pub fn tag(&mut self) -> Result<()> {
        if self.state != DecodeState::Reset {
            return Err(TaggerError::invalid_state(
                "tag() requires a sentence set by reset_sentence()",
                format!("the worker is in state {:?}", self.state),
            ));
        }

        self.state = DecodeState::Building;
        if let Err(e) = self.tagger.build_lattice(&self.sent, &mut self.lattice) {
            if let TaggerError::CapacityExceeded(c) = &e {
                log::warn!(
                    "[hmmtag] Sentence {}:{} skipped: {c}",
                    self.sent.document_id(),
                    self.sent.sentence_id(),
                );
            }
            self.lattice.reset();
            self.state = DecodeState::Reset;
            return Err(e);
        }

        debug_assert_eq!(self.lattice.num_positions(), self.sent.len() + 1);

        self.state = DecodeState::Relaxing;
        self.lattice.relax(self.tagger.model());

        self.state = DecodeState::Backtracing;
        self.lattice.backtrace(&mut self.path);
        debug_assert_eq!(self.path.len(), self.sent.len());

        self.state = DecodeState::Done;
        Ok(())
    }

    /// Gets the stage of the current sentence.
    #[inline(always)]
    pub const fn state(&self) -> DecodeState {
        self.state
    }

    /// Gets the lattice ceilings.
    #[inline(always)]
    pub const fn capacity(&self) -> Capacity {
        self.lattice.capacity()
    }

    /// Replaces the lattice ceilings used from the next call of [`Self::tag()`].
    pub fn set_capacity(&mut self, capacity: Capacity) {
        self.lattice.set_capacity(capacity);
    }

    /// Gets the input sentence.
    #[inline(always)]
    pub const fn candidates(&self) -> &SentenceCandidates {
        &self.sent
    }

    /// Gets the number of resultant tokens.
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.path.len()
    }

    /// Gets the `i`-th resultant token.
    #[inline(always)]
    pub fn token<'w>(&'w self, i: usize) -> Token<'w> {
        Token::new(self, i)
    }

    /// Creates an iterator of resultant tokens.
    #[inline(always)]
    pub fn token_iter<'w>(&'w self) -> TokenIter<'w> {
        TokenIter::new(self)
    }

    /// Copies the result into a [`Sentence`].
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidState`] is returned unless the sentence has been tagged.
    pub fn to_sentence(&self) -> Result<Sentence> {
        self.ensure_done()?;
        let tokens = self.token_iter().map(|t| t.surface().to_string()).collect();
        let eojeols = self.token_iter().map(|t| t.eojeol().clone()).collect();
        Ok(Sentence::new(
            self.sent.document_id(),
            self.sent.sentence_id(),
            self.sent.end_of_document(),
            tokens,
            eojeols,
        ))
    }

    /// Moves the result out into a [`Sentence`], leaving the worker with an
    /// empty input sentence.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidState`] is returned unless the sentence has been tagged.
    pub fn take_sentence(&mut self) -> Result<Sentence> {
        self.ensure_done()?;
        let chosen: Vec<usize> = self.token_iter().map(|t| t.candidate()).collect();
        let sent = std::mem::take(&mut self.sent);
        let (document_id, sentence_id, end_of_document) = (
            sent.document_id(),
            sent.sentence_id(),
            sent.end_of_document(),
        );
        let mut tokens = Vec::with_capacity(chosen.len());
        let mut eojeols = Vec::with_capacity(chosen.len());
        for (token, i) in sent.into_tokens().into_iter().zip(chosen) {
            let (surface, mut readings) = token.into_parts();
            tokens.push(surface);
            eojeols.push(readings.swap_remove(i));
        }
        self.reset_sentence(SentenceCandidates::default());
        Ok(Sentence::new(
            document_id,
            sentence_id,
            end_of_document,
            tokens,
            eojeols,
        ))
    }

    fn ensure_done(&self) -> Result<()> {
        if self.state == DecodeState::Done {
            Ok(())
        } else {
            Err(TaggerError::invalid_state(
                "the result is not available",
                format!("the worker is in state {:?}", self.state),
            ))
        }
    }
}
