//! Traits for generator system standardization.

use super::blocks::Block;
use super::record::InputRecord;
use super::{GeneratedDocument, GeneratorError};

/// Trait for document generators.
pub trait Generator {
    /// Build the ordered block sequence for a record. Never fails; missing
    /// fields degrade to placeholder text.
    fn assemble(&self, record: &InputRecord) -> Vec<Block>;

    /// Assemble and render the document.
    fn generate(&self, record: &InputRecord) -> Result<GeneratedDocument, GeneratorError>;
}
