//! Contract document generation.
//!
//! Turns a farming deal payload into a downloadable PDF agreement:
//! - `models` - wire types for the request and the generated document
//! - `validation` - presence checks for the four required objects
//! - `id` - contract id synthesis when the caller supplies none
//! - `generator` - derived fields and document assembly
//! - `handlers` - the HTTP boundary

pub mod generator;
pub mod handlers;
pub mod id;
pub mod models;
pub mod traits;
pub mod validation;


pub use generator::{ContractDefaults, ContractGenerator};
pub use id::{ContractIdSource, WallClockIdSource};
pub use models::{ContractRequest, CropDetails, DealTerms, GeneratedContract, PartyDetails};
pub use traits::{Generator, Validator};

use thiserror::Error;

use crate::render::RenderError;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// One or more of the four required top-level objects is absent.
    #[error("missing required contract details")]
    IncompleteRequest,
    #[error("failed to render contract PDF: {0}")]
    Render(#[from] RenderError),
}
