use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload accepted by `POST /api/contract/generate`.
///
/// The four top-level objects are required; they are modeled as `Option` so
/// that absence is reported by our own validation instead of a generic
/// deserializer error.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ContractRequest {
    pub farmer: Option<PartyDetails>,
    pub buyer: Option<PartyDetails>,
    pub crop: Option<CropDetails>,
    pub deal: Option<DealTerms>,
}

/// Identity block for either side of the deal. Missing fields render as a
/// literal dash on the document.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PartyDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CropDetails {
    pub name: Option<String>,
}

/// Negotiated terms. `total_amount` is caller-supplied and trusted as-is; it
/// is deliberately not cross-checked against `quantity * price_per_quintal`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealTerms {
    pub contract_id: Option<String>,
    pub quantity: f64,
    pub price_per_quintal: f64,
    pub total_amount: f64,
    pub delivery_date: Option<String>,
    pub delivery_location: Option<String>,
}

/// Result of a successful generation. Lives only for the duration of the
/// request; nothing is persisted.
#[derive(Debug)]
pub struct GeneratedContract {
    pub contract_id: String,
    pub filename: String,
    pub pdf: Vec<u8>,
}
