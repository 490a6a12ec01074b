use crate::tax::regime::TaxRegime;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

/// Ceiling on purchase/sale values: ₹10 crore
pub fn max_value() -> Decimal {
    dec!(100_000_000)
}

/// Input validation errors, surfaced verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    #[error("Please enter both purchase and sale dates")]
    MissingDate,
    #[error("Invalid {field} date: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("Sale date must be after purchase date")]
    InvalidDateOrder,
    #[error("Purchase and sale values must be greater than 0")]
    NonPositiveValue,
    #[error("Values cannot exceed ₹10 crores")]
    ValueTooLarge,
}

/// Holding-period classification: long term at 365 days or more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GainClassification {
    #[serde(rename = "STCG")]
    ShortTerm,
    #[serde(rename = "LTCG")]
    LongTerm,
}

impl GainClassification {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            GainClassification::ShortTerm => "STCG",
            GainClassification::LongTerm => "LTCG",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GainClassification::ShortTerm => "Short Term Capital Gains",
            GainClassification::LongTerm => "Long Term Capital Gains",
        }
    }
}

impl std::fmt::Display for GainClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// A single asset purchase/sale pair to be taxed
#[derive(Debug, Clone)]
pub struct Valuation {
    /// Informational label only, does not affect the tax math
    pub asset_type: String,
    pub purchase_date: Option<NaiveDate>,
    pub sale_date: Option<NaiveDate>,
    pub purchase_value: Decimal,
    pub sale_value: Decimal,
}

/// Computed tax result for a single valuation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxComputation {
    pub asset_type: String,
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub purchase_value: Decimal,
    pub sale_value: Decimal,
    pub holding_days: i64,
    pub classification: GainClassification,
    /// May be negative to signal a loss
    pub net_gain: Decimal,
    pub exemption: Decimal,
    pub taxable_gain: Decimal,
    /// Rate applied, as a percentage. Reported as 0 on a loss or break-even
    /// even though the regime carries a nonzero rate.
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub effective_tax_percent: Decimal,
    pub regime: TaxRegime,
}

/// Classify the holding period and compute the capital gains tax payable.
///
/// Validation is fail-fast: any invalid input aborts before computation and
/// no partial result is produced.
pub fn calculate(valuation: &Valuation) -> Result<TaxComputation, ValuationError> {
    let (purchase_date, sale_date) = match (valuation.purchase_date, valuation.sale_date) {
        (Some(purchase), Some(sale)) => (purchase, sale),
        _ => return Err(ValuationError::MissingDate),
    };

    if sale_date <= purchase_date {
        return Err(ValuationError::InvalidDateOrder);
    }
    if valuation.purchase_value <= Decimal::ZERO || valuation.sale_value <= Decimal::ZERO {
        return Err(ValuationError::NonPositiveValue);
    }
    if valuation.purchase_value > max_value() || valuation.sale_value > max_value() {
        return Err(ValuationError::ValueTooLarge);
    }

    let holding_days = (sale_date - purchase_date).num_days();
    let classification = if holding_days >= 365 {
        GainClassification::LongTerm
    } else {
        GainClassification::ShortTerm
    };

    let net_gain = valuation.sale_value - valuation.purchase_value;
    let regime = TaxRegime::for_sale_date(sale_date);

    let (exemption, taxable_gain, tax_rate, tax) = if net_gain <= Decimal::ZERO {
        // No tax on losses. The rate is reported as 0 here as well.
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    } else if classification == GainClassification::LongTerm {
        let exemption = regime.ltcg_exemption();
        let taxable_gain = (net_gain - exemption).max(Decimal::ZERO);
        let rate = regime.ltcg_rate();
        let tax = (taxable_gain * rate / dec!(100)).normalize();
        (exemption, taxable_gain, rate, tax)
    } else {
        let rate = regime.stcg_rate();
        let tax = (net_gain * rate / dec!(100)).normalize();
        (Decimal::ZERO, net_gain, rate, tax)
    };

    let effective_tax_percent = if net_gain > Decimal::ZERO {
        (tax / net_gain * dec!(100)).round_dp(2).normalize()
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "{}: {} days ({}), net gain {}, regime {:?}, taxable {}, tax {}",
        valuation.asset_type,
        holding_days,
        classification,
        net_gain,
        regime,
        taxable_gain,
        tax
    );

    Ok(TaxComputation {
        asset_type: valuation.asset_type.clone(),
        purchase_date,
        sale_date,
        purchase_value: valuation.purchase_value,
        sale_value: valuation.sale_value,
        holding_days,
        classification,
        net_gain,
        exemption,
        taxable_gain,
        tax_rate,
        tax,
        effective_tax_percent,
        regime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        Some(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn valuation(
        purchase_date: Option<NaiveDate>,
        sale_date: Option<NaiveDate>,
        purchase_value: Decimal,
        sale_value: Decimal,
    ) -> Valuation {
        Valuation {
            asset_type: "Equity".to_string(),
            purchase_date,
            sale_date,
            purchase_value,
            sale_value,
        }
    }

    #[test]
    fn long_term_gain_within_old_regime_exemption() {
        // Exactly 365 days held, sold before the regime change
        let input = valuation(
            date(2023, 1, 1),
            date(2024, 1, 1),
            dec!(100000),
            dec!(150000),
        );
        let result = calculate(&input).unwrap();

        assert_eq!(result.holding_days, 365);
        assert_eq!(result.classification, GainClassification::LongTerm);
        assert_eq!(result.regime, TaxRegime::Old);
        assert_eq!(result.net_gain, dec!(50000));
        assert_eq!(result.exemption, dec!(100000));
        assert_eq!(result.taxable_gain, dec!(0));
        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.effective_tax_percent, dec!(0));
    }

    #[test]
    fn long_term_gain_under_new_regime() {
        let input = valuation(
            date(2023, 1, 1),
            date(2025, 1, 1),
            dec!(100000),
            dec!(300000),
        );
        let result = calculate(&input).unwrap();

        assert_eq!(result.holding_days, 731);
        assert_eq!(result.classification, GainClassification::LongTerm);
        assert_eq!(result.regime, TaxRegime::New);
        assert_eq!(result.net_gain, dec!(200000));
        assert_eq!(result.exemption, dec!(125000));
        assert_eq!(result.taxable_gain, dec!(75000));
        assert_eq!(result.tax_rate, dec!(12.5));
        assert_eq!(result.tax, dec!(9375));
        assert_eq!(result.effective_tax_percent, dec!(4.69));
    }

    #[test]
    fn short_term_gain_under_old_regime() {
        let input = valuation(
            date(2024, 1, 1),
            date(2024, 6, 1),
            dec!(100000),
            dec!(120000),
        );
        let result = calculate(&input).unwrap();

        assert_eq!(result.holding_days, 152);
        assert_eq!(result.classification, GainClassification::ShortTerm);
        assert_eq!(result.regime, TaxRegime::Old);
        assert_eq!(result.net_gain, dec!(20000));
        assert_eq!(result.exemption, dec!(0));
        assert_eq!(result.taxable_gain, dec!(20000));
        assert_eq!(result.tax_rate, dec!(15));
        assert_eq!(result.tax, dec!(3000));
        assert_eq!(result.effective_tax_percent, dec!(15));
    }

    #[test]
    fn loss_pays_no_tax_and_reports_zero_rate() {
        let input = valuation(
            date(2023, 1, 1),
            date(2025, 1, 1),
            dec!(100000),
            dec!(80000),
        );
        let result = calculate(&input).unwrap();

        assert_eq!(result.net_gain, dec!(-20000));
        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.taxable_gain, dec!(0));
        assert_eq!(result.exemption, dec!(0));
        assert_eq!(result.tax_rate, dec!(0));
        assert_eq!(result.effective_tax_percent, dec!(0));
    }

    #[test]
    fn break_even_pays_no_tax() {
        let input = valuation(
            date(2024, 1, 1),
            date(2024, 6, 1),
            dec!(100000),
            dec!(100000),
        );
        let result = calculate(&input).unwrap();

        assert_eq!(result.net_gain, dec!(0));
        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.taxable_gain, dec!(0));
        assert_eq!(result.tax_rate, dec!(0));
    }

    #[test]
    fn classification_boundary_at_365_days() {
        // 2024 is a leap year: 2024-01-01 + 364 days = 2024-12-30
        let short = calculate(&valuation(
            date(2024, 1, 1),
            date(2024, 12, 30),
            dec!(1000),
            dec!(2000),
        ))
        .unwrap();
        assert_eq!(short.holding_days, 364);
        assert_eq!(short.classification, GainClassification::ShortTerm);

        let long = calculate(&valuation(
            date(2024, 1, 1),
            date(2024, 12, 31),
            dec!(1000),
            dec!(2000),
        ))
        .unwrap();
        assert_eq!(long.holding_days, 365);
        assert_eq!(long.classification, GainClassification::LongTerm);
    }

    #[test]
    fn one_day_holding_is_short_term() {
        let result = calculate(&valuation(
            date(2024, 1, 1),
            date(2024, 1, 2),
            dec!(1000),
            dec!(2000),
        ))
        .unwrap();
        assert_eq!(result.holding_days, 1);
        assert_eq!(result.classification, GainClassification::ShortTerm);
    }

    #[test]
    fn missing_dates_rejected() {
        let missing_sale = valuation(date(2024, 1, 1), None, dec!(1000), dec!(2000));
        assert_eq!(calculate(&missing_sale), Err(ValuationError::MissingDate));

        let missing_purchase = valuation(None, date(2024, 1, 1), dec!(1000), dec!(2000));
        assert_eq!(
            calculate(&missing_purchase),
            Err(ValuationError::MissingDate)
        );
    }

    #[test]
    fn sale_on_or_before_purchase_rejected() {
        let same_day = valuation(date(2024, 1, 1), date(2024, 1, 1), dec!(1000), dec!(2000));
        assert_eq!(calculate(&same_day), Err(ValuationError::InvalidDateOrder));

        let reversed = valuation(date(2024, 6, 1), date(2024, 1, 1), dec!(1000), dec!(2000));
        assert_eq!(calculate(&reversed), Err(ValuationError::InvalidDateOrder));
    }

    #[test]
    fn non_positive_values_rejected() {
        let zero_purchase = valuation(date(2023, 1, 1), date(2024, 1, 1), dec!(0), dec!(2000));
        assert_eq!(
            calculate(&zero_purchase),
            Err(ValuationError::NonPositiveValue)
        );

        let negative_sale = valuation(date(2023, 1, 1), date(2024, 1, 1), dec!(1000), dec!(-5));
        assert_eq!(
            calculate(&negative_sale),
            Err(ValuationError::NonPositiveValue)
        );
    }

    #[test]
    fn values_above_ten_crore_rejected() {
        let too_large = valuation(
            date(2023, 1, 1),
            date(2024, 1, 1),
            dec!(1000),
            dec!(100_000_001),
        );
        assert_eq!(calculate(&too_large), Err(ValuationError::ValueTooLarge));

        // Exactly at the ceiling is allowed
        let at_ceiling = valuation(
            date(2023, 1, 1),
            date(2024, 1, 1),
            dec!(1000),
            dec!(100_000_000),
        );
        assert!(calculate(&at_ceiling).is_ok());
    }

    #[test]
    fn validation_happens_before_computation() {
        // Bad ordering takes precedence over bad values per the fail-fast order
        let input = valuation(date(2024, 6, 1), date(2024, 1, 1), dec!(0), dec!(0));
        assert_eq!(calculate(&input), Err(ValuationError::InvalidDateOrder));
    }

    #[test]
    fn identical_inputs_yield_identical_results() {
        let input = valuation(
            date(2023, 1, 1),
            date(2025, 1, 1),
            dec!(100000),
            dec!(300000),
        );
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }
}
