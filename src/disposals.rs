use crate::tax::ltcg::{Valuation, ValuationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Unified JSON input format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisposalInput {
    pub disposals: Vec<DisposalRecord>,
}

/// One asset disposal, as read from CSV or JSON. Dates are kept as raw
/// strings so that missing and malformed values produce distinct errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisposalRecord {
    pub asset_type: String,
    pub purchase_date: String,
    pub sale_date: String,
    pub purchase_value: Decimal,
    pub sale_value: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parse a YYYY-MM-DD date field. Empty means missing (reported later by
/// the calculator); anything else that fails to parse is an invalid date.
pub fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValuationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValuationError::InvalidDate {
            field,
            value: trimmed.to_string(),
        })
}

impl DisposalRecord {
    pub fn to_valuation(&self) -> Result<Valuation, ValuationError> {
        Ok(Valuation {
            asset_type: self.asset_type.clone(),
            purchase_date: parse_date("purchase", &self.purchase_date)?,
            sale_date: parse_date("sale", &self.sale_date)?,
            purchase_value: self.purchase_value,
            sale_value: self.sale_value,
        })
    }
}

/// Read disposal records from CSV, sorted by sale date
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<DisposalRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records: Result<Vec<DisposalRecord>, _> = rdr.deserialize::<DisposalRecord>().collect();
    let mut records = records?;
    sort_by_sale_date(&mut records);
    Ok(records)
}

/// Read disposal records from JSON, sorted by sale date
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Vec<DisposalRecord>> {
    let input: DisposalInput = serde_json::from_reader(reader)?;
    let mut records = input.disposals;
    sort_by_sale_date(&mut records);
    Ok(records)
}

fn sort_by_sale_date(records: &mut [DisposalRecord]) {
    // Rows without a parseable sale date sort first; the calculator
    // reports them when the row is computed
    records.sort_by_key(|r| parse_date("sale", &r.sale_date).ok().flatten());
}
