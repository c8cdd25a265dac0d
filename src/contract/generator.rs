//! Contract assembly: derived fields, display formatting and rendering.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use serde_json::json;

use super::id::{ContractIdSource, WallClockIdSource};
use super::models::{ContractRequest, CropDetails, DealTerms, GeneratedContract, PartyDetails};
use super::traits::{Generator, Validator};
use super::validation::{validate_present, ValidationErrors};
use super::GeneratorError;
use crate::render::PdfRenderEngine;

/// Agreement layout, embedded at compile time.
const CONTRACT_TEMPLATE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/contract_agreement.typ"));

/// Static document values, named here instead of being scattered through the
/// layout so they can be overridden without touching it.
#[derive(Debug, Clone)]
pub struct ContractDefaults {
    pub delivery_date: String,
    pub delivery_location: String,
    pub payment_mode: String,
    pub advance_rate: f64,
}

impl Default for ContractDefaults {
    fn default() -> Self {
        Self {
            delivery_date: "Within 7 days".to_string(),
            delivery_location: "Nearest Mandi".to_string(),
            payment_mode: "Online / UPI".to_string(),
            advance_rate: 0.20,
        }
    }
}

impl Validator for ContractRequest {
    /// Only the presence of the four top-level objects is validated; field
    /// content is trusted as supplied.
    fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_present(&self.farmer, "farmer", &mut errors);
        validate_present(&self.buyer, "buyer", &mut errors);
        validate_present(&self.crop, "crop", &mut errors);
        validate_present(&self.deal, "deal", &mut errors);

        errors.into_result()
    }
}

/// Generator for the farming agreement PDF. Stateless and cheap to clone;
/// concurrent requests share nothing mutable.
#[derive(Clone)]
pub struct ContractGenerator {
    defaults: Arc<ContractDefaults>,
    ids: Arc<dyn ContractIdSource>,
}

impl ContractGenerator {
    pub fn new() -> Self {
        Self::with_parts(ContractDefaults::default(), Arc::new(WallClockIdSource))
    }

    pub fn with_parts(defaults: ContractDefaults, ids: Arc<dyn ContractIdSource>) -> Self {
        Self {
            defaults: Arc::new(defaults),
            ids,
        }
    }

    /// Resolve the contract id: caller-supplied wins, otherwise synthesize.
    fn resolve_id(&self, deal: &DealTerms) -> String {
        deal.contract_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.ids.next_id())
    }

    /// Build the pre-formatted strings the template reads from `sys.inputs`.
    fn build_inputs(
        &self,
        farmer: &PartyDetails,
        buyer: &PartyDetails,
        crop: &CropDetails,
        deal: &DealTerms,
        contract_id: &str,
        created_at: &str,
    ) -> HashMap<String, serde_json::Value> {
        let advance_amount = deal.total_amount * self.defaults.advance_rate;

        let mut inputs = HashMap::new();
        inputs.insert("contract_id".to_string(), json!(contract_id));
        inputs.insert("created_at".to_string(), json!(created_at));

        inputs.insert("farmer_name".to_string(), json!(text_or_dash(&farmer.name)));
        inputs.insert("farmer_phone".to_string(), json!(text_or_dash(&farmer.phone)));
        inputs.insert("farmer_location".to_string(), json!(compose_location(farmer)));

        inputs.insert("buyer_name".to_string(), json!(text_or_dash(&buyer.name)));
        inputs.insert("buyer_phone".to_string(), json!(text_or_dash(&buyer.phone)));
        inputs.insert("buyer_location".to_string(), json!(compose_location(buyer)));

        inputs.insert("crop_name".to_string(), json!(text_or_dash(&crop.name)));
        inputs.insert("quantity".to_string(), json!(format!("{} Quintal", deal.quantity)));
        inputs.insert("price".to_string(), json!(format!("₹{}/Qtl", deal.price_per_quintal)));
        inputs.insert("total_value".to_string(), json!(format!("₹{}", deal.total_amount)));

        inputs.insert(
            "advance_label".to_string(),
            json!(format!("Advance ({:.0}%)", self.defaults.advance_rate * 100.0)),
        );
        inputs.insert("advance_value".to_string(), json!(format!("₹{}", advance_amount)));
        inputs.insert("payment_mode".to_string(), json!(self.defaults.payment_mode));

        inputs.insert(
            "delivery_date".to_string(),
            json!(text_or_default(&deal.delivery_date, &self.defaults.delivery_date)),
        );
        inputs.insert(
            "delivery_location".to_string(),
            json!(text_or_default(
                &deal.delivery_location,
                &self.defaults.delivery_location
            )),
        );

        inputs
    }
}

impl Generator<ContractRequest> for ContractGenerator {
    /// Render the full agreement. The document is buffered in memory and only
    /// returned once rendering has completed.
    fn generate(&self, request: ContractRequest) -> Result<GeneratedContract, GeneratorError> {
        let farmer = request.farmer.as_ref().ok_or(GeneratorError::IncompleteRequest)?;
        let buyer = request.buyer.as_ref().ok_or(GeneratorError::IncompleteRequest)?;
        let crop = request.crop.as_ref().ok_or(GeneratorError::IncompleteRequest)?;
        let deal = request.deal.as_ref().ok_or(GeneratorError::IncompleteRequest)?;

        let contract_id = self.resolve_id(deal);
        let created_at = Local::now().format("%d/%m/%Y, %H:%M:%S").to_string();

        let inputs = self.build_inputs(farmer, buyer, crop, deal, &contract_id, &created_at);
        let pdf = PdfRenderEngine::render(CONTRACT_TEMPLATE, inputs)?;

        let filename = format!("Contract_{}.pdf", filename_safe(&contract_id));

        Ok(GeneratedContract {
            contract_id,
            filename,
            pdf,
        })
    }
}

impl Default for ContractGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Display rule for individual fields: absent or empty text becomes a dash.
fn text_or_dash(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn text_or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Join village/district/state with commas. Missing components become empty
/// segments, so partial addresses keep their separators ("X, , Y").
fn compose_location(party: &PartyDetails) -> String {
    format!(
        "{}, {}, {}",
        party.village.as_deref().unwrap_or(""),
        party.district.as_deref().unwrap_or(""),
        party.state.as_deref().unwrap_or("")
    )
}

/// Keep the download filename header-safe without lowercasing or otherwise
/// rewriting well-formed ids.
fn filename_safe(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
