//! Container of resultant tokens.
use crate::phrase::PhraseTag;
use crate::sentence::Eojeol;
use crate::tagger::lattice::Node;
use crate::tagger::worker::Worker;

/// Resultant token: a raw token with the reading chosen for it.
pub struct Token<'w> {
    worker: &'w Worker,
    index: usize,
}

impl<'w> Token<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker, index: usize) -> Self {
        Self { worker, index }
    }

    #[inline(always)]
    fn node(&self) -> &'w Node {
        self.worker.lattice.node(self.worker.path[self.index])
    }

    /// Gets the raw token string.
    #[inline(always)]
    pub fn surface(&self) -> &'w str {
        self.worker.sent.tokens()[self.index].surface()
    }

    /// Gets the index of the chosen reading among the candidates of the token.
    #[inline(always)]
    pub fn candidate(&self) -> usize {
        self.node().candidate as usize
    }

    /// Gets the chosen reading.
    #[inline(always)]
    pub fn eojeol(&self) -> &'w Eojeol {
        &self.worker.sent.tokens()[self.index].readings()[self.candidate()]
    }

    /// Gets the phrase tag of the chosen reading.
    #[inline(always)]
    pub fn phrase_tag(&self) -> PhraseTag {
        self.node().phrase
    }

    /// Gets the emission score of the chosen reading.
    #[inline(always)]
    pub fn emission(&self) -> f64 {
        self.node().emission
    }

    /// Gets the best score of a path from the first token to this one.
    #[inline(always)]
    pub fn accumulated(&self) -> f64 {
        self.node().accumulated
    }
}

impl std::fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("surface", &self.surface())
            .field("eojeol", &self.eojeol().to_string())
            .field("candidate", &self.candidate())
            .field("phrase_tag", &self.phrase_tag().to_string())
            .field("emission", &self.emission())
            .field("accumulated", &self.accumulated())
            .finish()
    }
}

/// Iterator of tokens.
pub struct TokenIter<'w> {
    worker: &'w Worker,
    i: usize,
}

impl<'w> TokenIter<'w> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'w Worker) -> Self {
        Self { worker, i: 0 }
    }
}

impl<'w> Iterator for TokenIter<'w> {
    type Item = Token<'w>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.worker.num_tokens() {
            let t = self.worker.token(self.i);
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}
