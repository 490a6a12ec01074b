use crate::formatting::format_inr;
use crate::tax::cii;
use crate::tax::ltcg::{max_value, ValuationError};
use crate::tax::regime::TaxRegime;
use crate::tax::slab;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Asset classes with distinct holding-period and rate treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetType {
    EquityShare,
    EquityMutualFund,
    DebtMutualFund,
    Gold,
    Property,
    UnlistedShare,
    Crypto,
}

impl AssetType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AssetType::EquityShare => "Equity Share",
            AssetType::EquityMutualFund => "Equity MF",
            AssetType::DebtMutualFund => "Debt MF",
            AssetType::Gold => "Gold",
            AssetType::Property => "Property",
            AssetType::UnlistedShare => "Unlisted Share",
            AssetType::Crypto => "Crypto (VDA)",
        }
    }

    pub fn is_equity(&self) -> bool {
        matches!(self, AssetType::EquityShare | AssetType::EquityMutualFund)
    }

    /// Holding period in days after which gains turn long term.
    /// Crypto (VDA) gains are never long term.
    pub fn long_term_after_days(&self) -> Option<i64> {
        match self {
            AssetType::EquityShare | AssetType::EquityMutualFund => Some(365),
            AssetType::Property => Some(730),
            AssetType::DebtMutualFund | AssetType::Gold | AssetType::UnlistedShare => Some(1095),
            AssetType::Crypto => None,
        }
    }

    pub fn is_long_term(&self, holding_days: i64) -> bool {
        self.long_term_after_days()
            .is_some_and(|threshold| holding_days >= threshold)
    }

    /// Indexation survives only for long-term property, gold and unlisted
    /// shares. Debt MF lost indexation from April 2023.
    fn indexation_applies(&self, long_term: bool) -> bool {
        long_term
            && matches!(
                self,
                AssetType::Property | AssetType::Gold | AssetType::UnlistedShare
            )
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How slab-rated gains are taxed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaxMode {
    /// Marginal tax on the gain stacked on top of annual income
    SlabRates,
    /// Flat ~20% approximation where slab rates would apply
    FlatEstimate,
}

#[derive(Debug, Clone)]
pub struct CapitalGainsInput {
    pub asset_type: AssetType,
    pub purchase_date: NaiveDate,
    pub sale_date: NaiveDate,
    pub purchase_value: Decimal,
    pub sale_value: Decimal,
    /// Brokerage, stamp duty and other transfer costs deducted from proceeds
    pub transfer_costs: Decimal,
    /// Cost of improvement added to the cost basis
    pub improvement_cost: Decimal,
    /// Section 54/54F/54EC exemption claimed against property gains
    pub section_exemption: Decimal,
    /// Other annual income, used for slab rates and the surcharge test
    pub annual_income: Decimal,
    pub tax_mode: TaxMode,
    pub apply_cess: bool,
    pub apply_surcharge: bool,
}

/// Exemptions applied against the gain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExemptionBreakdown {
    pub ltcg_exemption: Decimal,
    pub section_exemption: Decimal,
    pub total_exemption: Decimal,
    pub description: String,
}

/// Tax components and the rule that produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub base_tax: Decimal,
    pub cess: Decimal,
    pub surcharge: Decimal,
    pub total_tax: Decimal,
    pub rate_label: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapitalGainsComputation {
    pub asset_type: AssetType,
    pub holding_days: i64,
    pub long_term: bool,
    /// Purchase cost after indexation, where it applies
    pub base_cost: Decimal,
    /// Sale value net of transfer costs
    pub net_consideration: Decimal,
    /// Clamped at zero: a capital loss reports a zero gain here
    pub gain: Decimal,
    pub exemptions: ExemptionBreakdown,
    pub taxable_gain: Decimal,
    pub tax: TaxBreakdown,
    pub effective_rate: Decimal,
    pub after_tax_gain: Decimal,
}

/// Multi-asset capital gains with indexation, exemptions, slab rates, cess
/// and surcharge.
pub fn calculate(input: &CapitalGainsInput) -> Result<CapitalGainsComputation, ValuationError> {
    if input.sale_date <= input.purchase_date {
        return Err(ValuationError::InvalidDateOrder);
    }
    if input.purchase_value <= Decimal::ZERO || input.sale_value <= Decimal::ZERO {
        return Err(ValuationError::NonPositiveValue);
    }
    if input.purchase_value > max_value() || input.sale_value > max_value() {
        return Err(ValuationError::ValueTooLarge);
    }

    let holding_days = (input.sale_date - input.purchase_date).num_days();
    let long_term = input.asset_type.is_long_term(holding_days);

    let base_cost = if input.asset_type.indexation_applies(long_term) {
        cii::indexed_cost(
            input.purchase_value,
            input.purchase_date.year(),
            input.sale_date.year(),
        )
    } else {
        input.purchase_value
    };

    let net_consideration = input.sale_value - input.transfer_costs;
    let gain = (net_consideration - base_cost - input.improvement_cost).max(Decimal::ZERO);

    let exemptions = calculate_exemptions(input, gain, long_term);
    let taxable_gain = (gain - exemptions.total_exemption).max(Decimal::ZERO);

    let tax = calculate_tax(input, taxable_gain, long_term);

    let effective_rate = if gain > Decimal::ZERO {
        (tax.total_tax / gain * dec!(100)).round_dp(2).normalize()
    } else {
        Decimal::ZERO
    };
    let after_tax_gain = gain - tax.total_tax;

    log::debug!(
        "{}: {} days (long_term={}), base cost {}, gain {}, taxable {}, tax {}",
        input.asset_type,
        holding_days,
        long_term,
        base_cost,
        gain,
        taxable_gain,
        tax.total_tax
    );

    Ok(CapitalGainsComputation {
        asset_type: input.asset_type,
        holding_days,
        long_term,
        base_cost,
        net_consideration,
        gain,
        exemptions,
        taxable_gain,
        tax,
        effective_rate,
        after_tax_gain,
    })
}

fn calculate_exemptions(
    input: &CapitalGainsInput,
    gain: Decimal,
    long_term: bool,
) -> ExemptionBreakdown {
    let mut ltcg_exemption = Decimal::ZERO;
    let mut description = String::new();

    if input.asset_type.is_equity() && long_term {
        let regime = TaxRegime::for_sale_date(input.sale_date);
        ltcg_exemption = gain.min(regime.ltcg_exemption());
        description = match regime {
            TaxRegime::New => "LTCG Exemption (Post Jul-23, 2024): ₹1.25L".to_string(),
            TaxRegime::Old => "LTCG Exemption (Pre Jul-23, 2024): ₹1L".to_string(),
        };
    }

    let mut section_exemption = Decimal::ZERO;
    if input.asset_type == AssetType::Property && input.section_exemption > Decimal::ZERO {
        section_exemption = input.section_exemption.min(gain - ltcg_exemption);
        if !description.is_empty() {
            description.push_str(" + ");
        }
        description.push_str(&format!(
            "Section 54/54F/54EC: {}",
            format_inr(section_exemption)
        ));
    }

    if description.is_empty() {
        description = "No exemptions applicable".to_string();
    }

    ExemptionBreakdown {
        ltcg_exemption,
        section_exemption,
        total_exemption: ltcg_exemption + section_exemption,
        description,
    }
}

fn calculate_tax(
    input: &CapitalGainsInput,
    taxable_gain: Decimal,
    long_term: bool,
) -> TaxBreakdown {
    if taxable_gain <= Decimal::ZERO {
        return TaxBreakdown {
            base_tax: Decimal::ZERO,
            cess: Decimal::ZERO,
            surcharge: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            rate_label: "0%".to_string(),
            explanation: "No tax as taxable gain is zero or negative".to_string(),
        };
    }

    let regime = TaxRegime::for_sale_date(input.sale_date);
    let (base_tax, rate_label, explanation) = if input.asset_type == AssetType::Crypto {
        (
            taxable_gain * dec!(0.30),
            "30%".to_string(),
            "Crypto (VDA) gains taxed at flat 30%".to_string(),
        )
    } else if long_term {
        match input.asset_type {
            AssetType::EquityShare | AssetType::EquityMutualFund => match regime {
                TaxRegime::New => (
                    taxable_gain * dec!(0.125),
                    "12.5%".to_string(),
                    "Equity LTCG taxed at 12.5% (post Jul-23, 2024)".to_string(),
                ),
                TaxRegime::Old => (
                    taxable_gain * dec!(0.10),
                    "10%".to_string(),
                    "Equity LTCG taxed at 10% (pre Jul-23, 2024)".to_string(),
                ),
            },
            AssetType::Property | AssetType::Gold | AssetType::UnlistedShare => (
                taxable_gain * dec!(0.20),
                "20%".to_string(),
                format!(
                    "{} LTCG taxed at 20% with indexation",
                    input.asset_type.display_name()
                ),
            ),
            AssetType::DebtMutualFund => slab_or_flat(
                input,
                taxable_gain,
                "Debt MF LTCG taxed as per income tax slabs (post Apr-2023)",
                "Debt MF LTCG taxed as per income tax slabs",
            ),
            AssetType::Crypto => unreachable!("crypto handled above"),
        }
    } else {
        match input.asset_type {
            AssetType::EquityShare | AssetType::EquityMutualFund => match regime {
                TaxRegime::New => (
                    taxable_gain * dec!(0.20),
                    "20%".to_string(),
                    "Equity STCG taxed at 20% (post Jul-23, 2024)".to_string(),
                ),
                TaxRegime::Old => (
                    taxable_gain * dec!(0.15),
                    "15%".to_string(),
                    "Equity STCG taxed at 15% (pre Jul-23, 2024)".to_string(),
                ),
            },
            _ => slab_or_flat(
                input,
                taxable_gain,
                "STCG taxed as per income tax slabs",
                "STCG taxed as per income tax slabs",
            ),
        }
    };

    let cess = if input.apply_cess {
        base_tax * dec!(0.04)
    } else {
        Decimal::ZERO
    };

    // Simplified surcharge: 10% once total income crosses ₹50L
    let surcharge =
        if input.apply_surcharge && input.annual_income + taxable_gain > dec!(5_000_000) {
            base_tax * dec!(0.10)
        } else {
            Decimal::ZERO
        };

    TaxBreakdown {
        base_tax,
        cess,
        surcharge,
        total_tax: base_tax + cess + surcharge,
        rate_label,
        explanation,
    }
}

fn slab_or_flat(
    input: &CapitalGainsInput,
    taxable_gain: Decimal,
    slab_explanation: &str,
    flat_explanation: &str,
) -> (Decimal, String, String) {
    match input.tax_mode {
        TaxMode::SlabRates => (
            slab::marginal_tax(input.annual_income, taxable_gain),
            "Slab rates".to_string(),
            slab_explanation.to_string(),
        ),
        TaxMode::FlatEstimate => (
            taxable_gain * dec!(0.20),
            "~20% (Slab)".to_string(),
            flat_explanation.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(asset_type: AssetType) -> CapitalGainsInput {
        CapitalGainsInput {
            asset_type,
            purchase_date: date(2020, 1, 1),
            sale_date: date(2025, 1, 1),
            purchase_value: dec!(1_000_000),
            sale_value: dec!(2_000_000),
            transfer_costs: Decimal::ZERO,
            improvement_cost: Decimal::ZERO,
            section_exemption: Decimal::ZERO,
            annual_income: Decimal::ZERO,
            tax_mode: TaxMode::FlatEstimate,
            apply_cess: false,
            apply_surcharge: false,
        }
    }

    #[test]
    fn crypto_is_never_long_term() {
        let result = calculate(&input(AssetType::Crypto)).unwrap();
        assert!(!result.long_term);
        assert_eq!(result.tax.rate_label, "30%");
        assert_eq!(result.tax.base_tax, dec!(300_000));
    }

    #[test]
    fn property_long_term_after_two_years() {
        let mut property = input(AssetType::Property);
        property.purchase_date = date(2022, 1, 1);
        property.sale_date = date(2024, 6, 1);
        let result = calculate(&property).unwrap();
        assert!(result.long_term);

        property.sale_date = date(2023, 6, 1);
        let result = calculate(&property).unwrap();
        assert!(!result.long_term);
    }

    #[test]
    fn gold_long_term_threshold_is_three_years() {
        let mut gold = input(AssetType::Gold);
        gold.purchase_date = date(2021, 1, 1);
        gold.sale_date = date(2024, 1, 1);
        let result = calculate(&gold).unwrap();
        assert_eq!(result.holding_days, 1095);
        assert!(result.long_term);
    }

    #[test]
    fn long_term_property_cost_is_indexed() {
        let mut property = input(AssetType::Property);
        property.purchase_date = date(2014, 6, 1);
        property.sale_date = date(2024, 6, 1);
        let result = calculate(&property).unwrap();

        // 240 -> 363
        assert_eq!(result.base_cost.round_dp(2), dec!(1512500.00));
        assert_eq!(result.gain.round_dp(2), dec!(487500.00));
        // 20% on the indexed gain
        assert_eq!(result.tax.base_tax.round_dp(2), dec!(97500.00));
        assert_eq!(result.tax.rate_label, "20%");
    }

    #[test]
    fn short_term_property_is_not_indexed() {
        let mut property = input(AssetType::Property);
        property.purchase_date = date(2024, 1, 1);
        property.sale_date = date(2024, 12, 1);
        let result = calculate(&property).unwrap();
        assert_eq!(result.base_cost, dec!(1_000_000));
    }

    #[test]
    fn equity_ltcg_exemption_capped_at_gain() {
        let mut equity = input(AssetType::EquityShare);
        equity.purchase_value = dec!(1_000_000);
        equity.sale_value = dec!(1_050_000);
        let result = calculate(&equity).unwrap();

        assert_eq!(result.gain, dec!(50_000));
        assert_eq!(result.exemptions.ltcg_exemption, dec!(50_000));
        assert_eq!(result.taxable_gain, dec!(0));
        assert_eq!(result.tax.total_tax, dec!(0));
        assert_eq!(result.tax.rate_label, "0%");
    }

    #[test]
    fn equity_ltcg_new_regime_rate() {
        let result = calculate(&input(AssetType::EquityShare)).unwrap();

        assert!(result.long_term);
        assert_eq!(result.exemptions.ltcg_exemption, dec!(125_000));
        assert_eq!(result.taxable_gain, dec!(875_000));
        assert_eq!(result.tax.base_tax.round_dp(2), dec!(109375.00));
        assert_eq!(result.tax.rate_label, "12.5%");
    }

    #[test]
    fn equity_stcg_old_regime_rate() {
        let mut equity = input(AssetType::EquityMutualFund);
        equity.purchase_date = date(2024, 1, 1);
        equity.sale_date = date(2024, 6, 1);
        let result = calculate(&equity).unwrap();

        assert!(!result.long_term);
        assert_eq!(result.tax.rate_label, "15%");
        assert_eq!(result.tax.base_tax, dec!(150_000.00));
    }

    #[test]
    fn section_54_exemption_against_property_gain() {
        let mut property = input(AssetType::Property);
        property.purchase_date = date(2022, 1, 1);
        property.sale_date = date(2024, 6, 1);
        property.section_exemption = dec!(300_000);
        let result = calculate(&property).unwrap();

        assert_eq!(result.exemptions.section_exemption, dec!(300_000));
        assert_eq!(result.taxable_gain, result.gain - dec!(300_000));
        assert!(result.exemptions.description.contains("Section 54/54F/54EC"));
    }

    #[test]
    fn debt_mf_slab_rates_use_marginal_tax() {
        let mut debt = input(AssetType::DebtMutualFund);
        debt.purchase_date = date(2020, 1, 1);
        debt.sale_date = date(2024, 1, 1);
        debt.purchase_value = dec!(500_000);
        debt.sale_value = dec!(700_000);
        debt.annual_income = dec!(600_000);
        debt.tax_mode = TaxMode::SlabRates;
        let result = calculate(&debt).unwrap();

        // 6L income + 2L gain: 30,000 - 15,000
        assert_eq!(result.tax.base_tax, dec!(15_000));
        assert_eq!(result.tax.rate_label, "Slab rates");
    }

    #[test]
    fn cess_and_surcharge_applied() {
        let mut crypto = input(AssetType::Crypto);
        crypto.purchase_value = dec!(1_000_000);
        crypto.sale_value = dec!(7_000_000);
        crypto.apply_cess = true;
        crypto.apply_surcharge = true;
        let result = calculate(&crypto).unwrap();

        let base = dec!(6_000_000) * dec!(0.30);
        assert_eq!(result.tax.base_tax, base);
        assert_eq!(result.tax.cess, base * dec!(0.04));
        // Taxable gain alone crosses the ₹50L surcharge threshold
        assert_eq!(result.tax.surcharge, base * dec!(0.10));
        assert_eq!(
            result.tax.total_tax,
            base + base * dec!(0.04) + base * dec!(0.10)
        );
    }

    #[test]
    fn surcharge_requires_income_above_threshold() {
        let mut crypto = input(AssetType::Crypto);
        crypto.apply_surcharge = true;
        let result = calculate(&crypto).unwrap();
        // 10L gain, no other income: below the ₹50L threshold
        assert_eq!(result.tax.surcharge, dec!(0));
    }

    #[test]
    fn transfer_and_improvement_costs_reduce_gain() {
        let mut gold = input(AssetType::Gold);
        gold.purchase_date = date(2024, 1, 1);
        gold.sale_date = date(2024, 6, 1);
        gold.transfer_costs = dec!(50_000);
        gold.improvement_cost = dec!(100_000);
        let result = calculate(&gold).unwrap();

        assert_eq!(result.net_consideration, dec!(1_950_000));
        assert_eq!(result.gain, dec!(850_000));
    }

    #[test]
    fn loss_reports_zero_gain_and_tax() {
        let mut equity = input(AssetType::EquityShare);
        equity.purchase_value = dec!(2_000_000);
        equity.sale_value = dec!(1_500_000);
        let result = calculate(&equity).unwrap();

        assert_eq!(result.gain, dec!(0));
        assert_eq!(result.taxable_gain, dec!(0));
        assert_eq!(result.tax.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.after_tax_gain, dec!(0));
    }

    #[test]
    fn invalid_inputs_rejected() {
        let mut bad = input(AssetType::EquityShare);
        bad.sale_date = bad.purchase_date;
        assert_eq!(calculate(&bad), Err(ValuationError::InvalidDateOrder));

        let mut bad = input(AssetType::EquityShare);
        bad.purchase_value = Decimal::ZERO;
        assert_eq!(calculate(&bad), Err(ValuationError::NonPositiveValue));

        let mut bad = input(AssetType::EquityShare);
        bad.sale_value = dec!(200_000_000);
        assert_eq!(calculate(&bad), Err(ValuationError::ValueTooLarge));
    }
}
