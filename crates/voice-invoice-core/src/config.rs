use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvoiceError;
use crate::totals::{LabourInput, TaxToggles};
use crate::types::*;
use crate::InvoiceResult;

// ---------------------------------------------------------------------------
// Rate regime
// ---------------------------------------------------------------------------

/// The default labour rate and tax percentages a caller applies when the
/// invoice itself does not carry them.
///
/// The engine never reads a regime on its own; callers resolve one (from a
/// file, a tenant setting, or `uk_standard`) and pass the resulting values in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRegime {
    /// GBP per hour used when the transcript does not state a rate
    #[serde(alias = "labourRate")]
    pub labour_rate: Money,
    #[serde(alias = "cisRatePct")]
    pub cis_rate_pct: RatePct,
    #[serde(alias = "vatRatePct")]
    pub vat_rate_pct: RatePct,
}

impl RateRegime {
    /// Current UK standard rates: £45/hr labour, CIS 20%, VAT 20%.
    pub fn uk_standard() -> Self {
        RateRegime {
            labour_rate: dec!(45.00),
            cis_rate_pct: dec!(20),
            vat_rate_pct: dec!(20),
        }
    }

    pub fn validate(&self) -> InvoiceResult<()> {
        if self.labour_rate < Decimal::ZERO {
            return Err(InvoiceError::InvalidConfig(
                "labour_rate must not be negative".into(),
            ));
        }
        for (name, pct) in [
            ("cis_rate_pct", self.cis_rate_pct),
            ("vat_rate_pct", self.vat_rate_pct),
        ] {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(InvoiceError::InvalidConfig(format!(
                    "{name} must be between 0 and 100 (got {pct})"
                )));
            }
        }
        Ok(())
    }

    /// Labour input at this regime's rate.
    pub fn labour(&self, hours: Option<Hours>) -> LabourInput {
        LabourInput {
            hours,
            rate: self.labour_rate,
        }
    }

    /// Tax toggles at this regime's percentages.
    pub fn toggles(&self, cis_enabled: bool, vat_enabled: bool) -> TaxToggles {
        TaxToggles {
            cis_enabled,
            cis_rate_pct: self.cis_rate_pct,
            vat_enabled,
            vat_rate_pct: self.vat_rate_pct,
        }
    }
}
