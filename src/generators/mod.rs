//! Generators module - business logic for turning form data into contract PDFs.
//!
//! This module contains specialized generators for each document type:
//! - `VehicleSaleGenerator` - Contrato de Compra e Venda de Veículo
//! - `DebtConfessionGenerator` - Confissão de Dívida (título executivo)
//!
//! Every generator assembles an ordered list of [`Block`]s from an
//! [`InputRecord`] and hands it to the [`PdfRenderEngine`].

pub mod blocks;
pub mod clock;
pub mod common;
pub mod debt_confession;
pub mod engine;
pub mod record;
pub mod traits;
pub mod vehicle_sale;

pub use blocks::{Block, BlockStyle};
pub use clock::{Clock, FixedClock, SystemClock};
pub use debt_confession::DebtConfessionGenerator;
pub use engine::{PageConfig, PdfRenderEngine};
pub use record::{InputRecord, RecordError};
pub use traits::Generator;
pub use vehicle_sale::VehicleSaleGenerator;

use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("document has no blocks to render")]
    EmptyDocument,
    #[error("failed to encode page content: {0}")]
    EncodeContent(String),
    #[error("failed to write PDF: {0}")]
    WritePdf(String),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub pages: usize,
}

/// The two document types served over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    VehicleSale,
    DebtConfession,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::VehicleSale => "contrato de compra e venda",
            DocumentKind::DebtConfession => "confissão de dívida",
        }
    }

    /// Build a fresh generator for this kind and run it against `record`.
    pub fn generate(
        &self,
        clock: Arc<dyn Clock>,
        page: PageConfig,
        record: &InputRecord,
    ) -> Result<GeneratedDocument, GeneratorError> {
        match self {
            DocumentKind::VehicleSale => VehicleSaleGenerator::new(clock, page).generate(record),
            DocumentKind::DebtConfession => {
                DebtConfessionGenerator::new(clock, page).generate(record)
            }
        }
    }
}
