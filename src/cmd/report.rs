//! Report command - batch computation over a disposals file

use crate::cmd::read_disposals;
use crate::formatting::{format_effective_percent, format_inr, format_rate};
use crate::tax::ltcg::{self, GainClassification, TaxComputation};
use anyhow::Context;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// CSV or JSON file containing disposals ("-" for stdin)
    #[arg(short, long)]
    disposals: PathBuf,

    /// Filter by classification
    #[arg(short, long, value_enum)]
    classification: Option<ClassificationFilter>,

    /// Filter by asset type label (e.g. Equity, Gold)
    #[arg(short, long)]
    asset_type: Option<String>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClassificationFilter {
    Ltcg,
    Stcg,
}

impl ClassificationFilter {
    fn matches(&self, classification: GainClassification) -> bool {
        matches!(
            (self, classification),
            (ClassificationFilter::Ltcg, GainClassification::LongTerm)
                | (ClassificationFilter::Stcg, GainClassification::ShortTerm)
        )
    }
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_disposals(&self.disposals)?;

        let mut results = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let valuation = record
                .to_valuation()
                .with_context(|| format!("disposal #{}", index + 1))?;
            let result = ltcg::calculate(&valuation)
                .with_context(|| format!("disposal #{}", index + 1))?;
            results.push(result);
        }

        let filtered: Vec<&TaxComputation> = results
            .iter()
            .filter(|r| {
                self.classification
                    .is_none_or(|c| c.matches(r.classification))
            })
            .filter(|r| {
                self.asset_type
                    .as_ref()
                    .is_none_or(|a| r.asset_type.eq_ignore_ascii_case(a))
            })
            .collect();

        let rows: Vec<DisposalRow> = filtered.iter().map(|r| DisposalRow::from(*r)).collect();

        if self.csv {
            write_csv(&rows)
        } else {
            print_table(&rows, &filtered);
            Ok(())
        }
    }
}

fn print_table(rows: &[DisposalRow], results: &[&TaxComputation]) {
    if rows.is_empty() {
        println!("No disposals found matching filters");
        return;
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);

    let total_gain: Decimal = results.iter().map(|r| r.net_gain).sum();
    let total_taxable: Decimal = results.iter().map(|r| r.taxable_gain).sum();
    let total_tax: Decimal = results.iter().map(|r| r.tax).sum();

    println!();
    println!(
        "Disposals: {} | Net Gain: {} | Taxable: {} | Tax Payable: {}",
        results.len(),
        format_inr(total_gain),
        format_inr(total_taxable),
        format_inr(total_tax)
    );
}

fn write_csv(rows: &[DisposalRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Row for the report table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct DisposalRow {
    #[tabled(rename = "Sale Date")]
    #[serde(rename = "sale_date")]
    pub sale_date: String,

    #[tabled(rename = "Asset")]
    pub asset: String,

    #[tabled(rename = "Held (Days)")]
    pub holding_days: String,

    #[tabled(rename = "Class")]
    pub classification: String,

    #[tabled(rename = "Net Gain")]
    pub net_gain: String,

    #[tabled(rename = "Exemption")]
    pub exemption: String,

    #[tabled(rename = "Taxable")]
    pub taxable_gain: String,

    #[tabled(rename = "Rate")]
    pub tax_rate: String,

    #[tabled(rename = "Tax")]
    pub tax: String,

    #[tabled(rename = "Effective")]
    pub effective: String,
}

impl From<&TaxComputation> for DisposalRow {
    fn from(result: &TaxComputation) -> Self {
        DisposalRow {
            sale_date: result.sale_date.format("%Y-%m-%d").to_string(),
            asset: result.asset_type.clone(),
            holding_days: result.holding_days.to_string(),
            classification: result.classification.abbreviation().to_string(),
            net_gain: format_inr(result.net_gain),
            exemption: format_inr(result.exemption),
            taxable_gain: format_inr(result.taxable_gain),
            tax_rate: format_rate(result.tax_rate),
            tax: format_inr(result.tax),
            effective: format_effective_percent(result.effective_tax_percent),
        }
    }
}
