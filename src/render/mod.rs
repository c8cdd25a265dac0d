//! In-process PDF rendering.
//!
//! Compiles a Typst source string against an in-memory [`World`] and exports
//! the result as PDF bytes. The whole document is buffered before anything is
//! handed back; a failed compilation never yields partial output.

pub mod fonts;
pub mod world;

use std::collections::HashMap;

use thiserror::Error;
use typst::diag::Severity;

pub use world::ContractWorld;

/// Errors from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid template input: {0}")]
    InvalidInput(String),
    #[error("Typst compilation failed: {0}")]
    Compile(String),
    #[error("PDF export failed: {0}")]
    PdfExport(String),
}

/// Stateless engine for rendering Typst source to PDF.
pub struct PdfRenderEngine;

impl PdfRenderEngine {
    /// Compile `source` with the given `sys.inputs` values and export a PDF.
    pub fn render(
        source: &str,
        inputs: HashMap<String, serde_json::Value>,
    ) -> Result<Vec<u8>, RenderError> {
        let world = ContractWorld::new(source.to_string(), inputs)?;
        let compiled = typst::compile(&world);

        match compiled.output {
            Ok(document) => typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
                .map_err(|e| RenderError::PdfExport(format!("{e:?}"))),
            Err(diagnostics) => {
                let message = diagnostics
                    .iter()
                    .filter(|d| matches!(d.severity, Severity::Error))
                    .map(|d| d.message.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(RenderError::Compile(message))
            }
        }
    }
}
