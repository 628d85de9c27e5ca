use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Labour portion of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabourInput {
    /// `None` when the duration was not captured ("a couple of hours" with no
    /// figure). Computes to zero cost but is displayed differently from `Some(0)`.
    #[serde(default)]
    pub hours: Option<Hours>,
    /// GBP per hour
    pub rate: Money,
}

/// A single material line. Unpriced lines are kept for display and cost nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "unitCost")]
    pub unit_cost: Option<Money>,
    /// Defaults to 1 when absent, zero or negative
    #[serde(default, alias = "qty")]
    pub quantity: Option<Decimal>,
}

impl MaterialLine {
    pub fn priced(unit_cost: Money, quantity: Decimal) -> Self {
        MaterialLine {
            description: None,
            unit_cost: Some(unit_cost),
            quantity: Some(quantity),
        }
    }

    pub fn unpriced(description: impl Into<String>) -> Self {
        MaterialLine {
            description: Some(description.into()),
            unit_cost: None,
            quantity: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Independent CIS and VAT switches with their percentages.
///
/// Whether each applies is decided upstream (entered by the tradesperson or
/// extracted from the transcript); the engine only applies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxToggles {
    #[serde(default, alias = "cisEnabled")]
    pub cis_enabled: bool,
    #[serde(default, alias = "cisRatePct")]
    pub cis_rate_pct: RatePct,
    #[serde(default, alias = "vatEnabled")]
    pub vat_enabled: bool,
    #[serde(default, alias = "vatRatePct")]
    pub vat_rate_pct: RatePct,
}

/// Everything the engine needs for one invoice, in the shape the web app and
/// CLI send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotalsInput {
    pub labour: LabourInput,
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    #[serde(default, alias = "taxToggles")]
    pub tax: TaxToggles,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialise_web_payload() {
        let json = r#"{
            "labour": { "hours": 3, "rate": 45 },
            "materials": [
                { "description": "Boiler valve", "unitCost": 180, "qty": 1 },
                { "description": "Fittings", "unitCost": null }
            ],
            "taxToggles": { "cisEnabled": true, "cisRatePct": 20, "vatEnabled": false, "vatRatePct": 20 }
        }"#;
        let input: InvoiceTotalsInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.labour.hours, Some(dec!(3)));
        assert_eq!(input.materials.len(), 2);
        assert_eq!(input.materials[0].unit_cost, Some(dec!(180)));
        assert_eq!(input.materials[1].unit_cost, None);
        assert_eq!(input.materials[1].quantity, None);
        assert!(input.tax.cis_enabled);
        assert!(!input.tax.vat_enabled);
    }

    #[test]
    fn test_missing_hours_and_materials_default() {
        let input: InvoiceTotalsInput =
            serde_json::from_str(r#"{ "labour": { "rate": "45.00" } }"#).unwrap();
        assert_eq!(input.labour.hours, None);
        assert!(input.materials.is_empty());
        assert_eq!(input.tax, TaxToggles::default());
    }
}
