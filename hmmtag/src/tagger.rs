//! Viterbi-based tagger.
pub(crate) mod lattice;
pub mod worker;

use std::path::Path;
use std::sync::Arc;

use crate::errors::{Result, TaggerError};
use crate::model::Model;
use crate::sentence::{Sentence, SentenceCandidates};
use crate::tagger::lattice::Lattice;
use crate::tagger::worker::Worker;

pub use crate::tagger::lattice::Capacity;

/// Tagger choosing one reading per token with an HMM.
///
/// Cloning is cheap; the model is shared behind an [`Arc`].
#[derive(Clone)]
pub struct Tagger {
    model: Arc<Model>,
    capacity: Capacity,
}

impl Tagger {
    /// Creates a new tagger.
    ///
    /// The model is moved into the tagger. If you need to share the model
    /// among multiple taggers, use [`Tagger::from_shared_model`].
    pub fn new(model: Model) -> Self {
        Self::from_shared_model(Arc::new(model))
    }

    /// Creates a new tagger from a shared model.
    pub fn from_shared_model(model: Arc<Model>) -> Self {
        Self {
            model,
            capacity: Capacity::default(),
        }
    }

    /// Loads the three statistics tables named in a config file and creates a tagger.
    ///
    /// # Arguments
    ///
    ///  - `base_dir`: Directory the config file and the table paths are relative to.
    ///  - `config_file`: Path of the config file.
    ///
    /// # Errors
    ///
    ///  - [`TaggerError::Config`] is returned when a table key is absent.
    ///  - [`TaggerError::Load`] is returned when a table cannot be loaded.
    pub fn initialize<B, C>(base_dir: B, config_file: C) -> Result<Self>
    where
        B: AsRef<Path>,
        C: AsRef<Path>,
    {
        Ok(Self::new(Model::from_config(base_dir, config_file)?))
    }

    /// Releases the model. Dropping the tagger is equivalent.
    pub fn shutdown(self) {
        log::debug!(
            "[hmmtag] Tagger shut down ({} handles remain)",
            Arc::strong_count(&self.model) - 1,
        );
    }

    /// Specifies the maximum number of token positions per sentence.
    ///
    /// The count includes the synthetic end position.
    pub const fn max_positions(mut self, max_positions: usize) -> Self {
        self.capacity.max_positions = max_positions;
        self
    }

    /// Specifies the maximum number of lattice nodes per sentence.
    ///
    /// The count includes the synthetic end node.
    pub const fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.capacity.max_nodes = max_nodes;
        self
    }

    /// Gets the lattice ceilings given to new workers.
    #[inline(always)]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Gets the reference to the model.
    #[inline(always)]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Creates a new worker.
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// Tags one sentence with a temporary worker.
    ///
    /// Use [`Tagger::new_worker`] to reuse the lattice across sentences.
    ///
    /// # Errors
    ///
    /// See [`Worker::tag`].
    pub fn tag_pos(&self, sent: SentenceCandidates) -> Result<Sentence> {
        let mut worker = self.new_worker();
        worker.reset_sentence(sent);
        worker.tag()?;
        worker.take_sentence()
    }

    pub(crate) fn build_lattice(
        &self,
        sent: &SentenceCandidates,
        lattice: &mut Lattice,
    ) -> Result<()> {
        lattice.reset();
        if let Some((i, token)) = sent
            .tokens()
            .iter()
            .enumerate()
            .find(|(_, t)| t.readings().is_empty())
        {
            return Err(TaggerError::invalid_argument(
                "sent",
                format!("token {i} ({:?}) has no candidate readings", token.surface()),
            ));
        }
        lattice.reserve(sent.len() + 1, sent.num_readings() + 1)?;

        for token in sent.tokens() {
            lattice.push_position()?;
            for (j, reading) in token.readings().iter().enumerate() {
                lattice.push_node(j as u32, reading.phrase_tag(), self.model.emission(reading))?;
            }
        }
        lattice.insert_eos()
    }
}
