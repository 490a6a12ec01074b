//! Capital gains command - multi-asset calculator with slab rates,
//! indexation, cess and surcharge

use crate::disposals::parse_date;
use crate::formatting::{format_effective_percent, format_inr};
use crate::tax::cgt::{self, AssetType, CapitalGainsComputation, CapitalGainsInput, TaxMode};
use crate::tax::ltcg::ValuationError;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct CapitalGainsCommand {
    /// Asset class
    #[arg(short, long, value_enum)]
    asset_type: AssetTypeArg,

    /// Purchase date (YYYY-MM-DD)
    #[arg(short, long)]
    purchase_date: String,

    /// Sale date (YYYY-MM-DD)
    #[arg(short, long)]
    sale_date: String,

    /// Purchase value in rupees
    #[arg(long)]
    purchase_value: Decimal,

    /// Sale value in rupees
    #[arg(long)]
    sale_value: Decimal,

    /// Brokerage, stamp duty and other transfer costs
    #[arg(long, default_value = "0")]
    transfer_costs: Decimal,

    /// Cost of improvement added to the cost basis
    #[arg(long, default_value = "0")]
    improvement_cost: Decimal,

    /// Section 54/54F/54EC exemption claimed (property only)
    #[arg(long, default_value = "0")]
    section_exemption: Decimal,

    /// Other annual income, used for slab rates and the surcharge test
    #[arg(long, default_value = "0")]
    annual_income: Decimal,

    /// How slab-rated gains are taxed
    #[arg(short, long, value_enum, default_value_t = TaxModeArg::FlatEstimate)]
    tax_mode: TaxModeArg,

    /// Apply the 4% health and education cess
    #[arg(long)]
    cess: bool,

    /// Apply the 10% surcharge above ₹50L total income
    #[arg(long)]
    surcharge: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AssetTypeArg {
    EquityShare,
    EquityMf,
    DebtMf,
    Gold,
    Property,
    UnlistedShare,
    Crypto,
}

impl From<AssetTypeArg> for AssetType {
    fn from(arg: AssetTypeArg) -> Self {
        match arg {
            AssetTypeArg::EquityShare => AssetType::EquityShare,
            AssetTypeArg::EquityMf => AssetType::EquityMutualFund,
            AssetTypeArg::DebtMf => AssetType::DebtMutualFund,
            AssetTypeArg::Gold => AssetType::Gold,
            AssetTypeArg::Property => AssetType::Property,
            AssetTypeArg::UnlistedShare => AssetType::UnlistedShare,
            AssetTypeArg::Crypto => AssetType::Crypto,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum TaxModeArg {
    SlabRates,
    #[default]
    FlatEstimate,
}

impl From<TaxModeArg> for TaxMode {
    fn from(arg: TaxModeArg) -> Self {
        match arg {
            TaxModeArg::SlabRates => TaxMode::SlabRates,
            TaxModeArg::FlatEstimate => TaxMode::FlatEstimate,
        }
    }
}

impl CapitalGainsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let purchase_date =
            parse_date("purchase", &self.purchase_date)?.ok_or(ValuationError::MissingDate)?;
        let sale_date = parse_date("sale", &self.sale_date)?.ok_or(ValuationError::MissingDate)?;

        let input = CapitalGainsInput {
            asset_type: self.asset_type.into(),
            purchase_date,
            sale_date,
            purchase_value: self.purchase_value,
            sale_value: self.sale_value,
            transfer_costs: self.transfer_costs,
            improvement_cost: self.improvement_cost,
            section_exemption: self.section_exemption,
            annual_income: self.annual_income,
            tax_mode: self.tax_mode.into(),
            apply_cess: self.cess,
            apply_surcharge: self.surcharge,
        };

        let result = cgt::calculate(&input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(&result);
        }
        Ok(())
    }
}

fn print_result(result: &CapitalGainsComputation) {
    let term = if result.long_term {
        "Long Term"
    } else {
        "Short Term"
    };

    println!();
    println!("CAPITAL GAINS ({})", result.asset_type);
    println!();
    println!(
        "  Holding Period:     {} Days ({})",
        result.holding_days, term
    );
    println!("  Base Cost:          {}", format_inr(result.base_cost));
    println!(
        "  Net Consideration:  {}",
        format_inr(result.net_consideration)
    );
    println!("  Gain:               {}", format_inr(result.gain));
    println!("  Exemptions:         {}", result.exemptions.description);
    println!("  Taxable Gain:       {}", format_inr(result.taxable_gain));
    println!();
    println!("TAX ({})", result.tax.rate_label);
    println!("  {}", result.tax.explanation);
    println!("  Base Tax:           {}", format_inr(result.tax.base_tax));
    if result.tax.cess > Decimal::ZERO {
        println!("  Cess (4%):          {}", format_inr(result.tax.cess));
    }
    if result.tax.surcharge > Decimal::ZERO {
        println!(
            "  Surcharge (10%):    {}",
            format_inr(result.tax.surcharge)
        );
    }
    println!("  Total Tax:          {}", format_inr(result.tax.total_tax));
    println!(
        "  Effective Rate:     {}",
        format_effective_percent(result.effective_rate)
    );
    println!(
        "  After-Tax Gain:     {}",
        format_inr(result.after_tax_gain)
    );
    println!();
}
