use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Income tax under the new-regime FY 2024-25 slabs.
pub fn slab_tax(income: Decimal) -> Decimal {
    if income <= dec!(300_000) {
        Decimal::ZERO
    } else if income <= dec!(700_000) {
        (income - dec!(300_000)) * dec!(0.05)
    } else if income <= dec!(1_000_000) {
        dec!(20_000) + (income - dec!(700_000)) * dec!(0.10)
    } else if income <= dec!(1_200_000) {
        dec!(50_000) + (income - dec!(1_000_000)) * dec!(0.15)
    } else if income <= dec!(1_500_000) {
        dec!(80_000) + (income - dec!(1_200_000)) * dec!(0.20)
    } else {
        dec!(140_000) + (income - dec!(1_500_000)) * dec!(0.30)
    }
}

/// Tax on a gain stacked on top of other annual income: the slab tax on the
/// combined income less the slab tax on the income alone.
pub fn marginal_tax(annual_income: Decimal, gain: Decimal) -> Decimal {
    slab_tax(annual_income + gain) - slab_tax(annual_income)
}
