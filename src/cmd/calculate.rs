//! Calculate command - single LTCG/STCG computation with a step-by-step
//! breakdown

use crate::disposals::parse_date;
use crate::formatting::{format_date, format_effective_percent, format_inr, format_rate};
use crate::tax::ltcg::{self, GainClassification, TaxComputation, Valuation};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// Asset type label, informational only (e.g. "Equity Shares")
    #[arg(short, long, default_value = "Equity")]
    asset_type: String,

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

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let valuation = Valuation {
            asset_type: self.asset_type.clone(),
            purchase_date: parse_date("purchase", &self.purchase_date)?,
            sale_date: parse_date("sale", &self.sale_date)?,
            purchase_value: self.purchase_value,
            sale_value: self.sale_value,
        };

        let result = ltcg::calculate(&valuation)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(&result);
        }
        Ok(())
    }
}

fn print_result(result: &TaxComputation) {
    println!();
    println!("CAPITAL GAINS TAX ({})", result.asset_type);
    println!();
    println!(
        "  Holding Period:     {} Days ({})",
        result.holding_days, result.classification
    );
    println!("  Net Gain:           {}", format_inr(result.net_gain));
    if result.classification == GainClassification::LongTerm {
        println!("  Exemption:          {}", format_inr(result.exemption));
    }
    println!("  Taxable Gain:       {}", format_inr(result.taxable_gain));
    println!("  Applicable Rate:    {}", format_rate(result.tax_rate));
    println!("  Tax Payable:        {}", format_inr(result.tax));
    println!(
        "  Effective Tax:      {}",
        format_effective_percent(result.effective_tax_percent)
    );
    println!();

    print_breakdown(result);

    println!("TAX REGIME");
    println!("  Sale Date:          {}", format_date(result.sale_date));
    println!("  Regime:             {}", result.regime.name());
    println!(
        "  STCG Rate:          {}",
        format_rate(result.regime.stcg_rate())
    );
    println!(
        "  LTCG Exemption:     {}",
        format_inr(result.regime.ltcg_exemption())
    );
    println!(
        "  LTCG Rate:          {}",
        format_rate(result.regime.ltcg_rate())
    );
    println!();
}

fn print_breakdown(result: &TaxComputation) {
    let long_term = result.classification == GainClassification::LongTerm;

    println!("CALCULATION BREAKDOWN");
    println!(
        "  1. Sale Date ({}) - Purchase Date ({}) = {} Days",
        format_date(result.sale_date),
        format_date(result.purchase_date),
        result.holding_days
    );
    println!(
        "     {} Days {} 365 Days -> {} ({})",
        result.holding_days,
        if long_term { ">=" } else { "<" },
        result.classification,
        result.classification.description()
    );
    println!(
        "  2. Net Gain = Sale Value - Purchase Value = {} - {} = {}",
        format_inr(result.sale_value),
        format_inr(result.purchase_value),
        format_inr(result.net_gain)
    );

    let mut step = 3;
    if long_term {
        println!(
            "  3. Available Exemption = {} ({})",
            format_inr(result.exemption),
            result.regime.name()
        );
        println!(
            "     Taxable Gain = max(0, {} - {}) = {}",
            format_inr(result.net_gain),
            format_inr(result.exemption),
            format_inr(result.taxable_gain)
        );
        step = 4;
    }

    println!(
        "  {}. Tax = Taxable Gain x Tax Rate = {} x {} = {}",
        step,
        format_inr(result.taxable_gain),
        format_rate(result.tax_rate),
        format_inr(result.tax)
    );
    println!(
        "     Effective Tax Rate = {} / {} x 100 = {}",
        format_inr(result.tax),
        format_inr(result.net_gain.max(Decimal::ONE)),
        format_effective_percent(result.effective_tax_percent)
    );
    println!();
}
