use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};

/// Capital gains tax regime in force for a sale date.
///
/// The Union Budget presented on 23 July 2024 changed the equity capital
/// gains rates and the LTCG exemption with immediate effect, so the regime
/// is selected purely by comparing the sale date against that cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxRegime {
    /// Rates in force for sales strictly before 23 July 2024
    Old,
    /// Rates in force for sales on or after 23 July 2024
    New,
}

/// Date the Budget 2024 capital gains changes took effect
pub fn regime_change_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 23).unwrap()
}

impl TaxRegime {
    /// Select the regime in force for a sale date
    pub fn for_sale_date(sale_date: NaiveDate) -> TaxRegime {
        if sale_date < regime_change_date() {
            TaxRegime::Old
        } else {
            TaxRegime::New
        }
    }

    /// STCG rate on equity, as a percentage
    pub fn stcg_rate(&self) -> Decimal {
        match self {
            TaxRegime::Old => dec!(15),
            TaxRegime::New => dec!(20),
        }
    }

    /// Annual LTCG exemption on equity, in rupees
    pub fn ltcg_exemption(&self) -> Decimal {
        match self {
            TaxRegime::Old => dec!(100_000),
            TaxRegime::New => dec!(125_000),
        }
    }

    /// LTCG rate on equity, as a percentage
    pub fn ltcg_rate(&self) -> Decimal {
        match self {
            TaxRegime::Old => dec!(10),
            TaxRegime::New => dec!(12.5),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaxRegime::Old => "Old Regime (Before 23-Jul-2024)",
            TaxRegime::New => "New Regime (From 23-Jul-2024)",
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for TaxRegime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
