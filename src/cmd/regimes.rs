//! Regimes command - show the capital gains regime table

use crate::formatting::{format_inr, format_rate};
use crate::tax::regime::TaxRegime;
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct RegimesCommand {}

#[derive(Debug, Tabled)]
struct RegimeRow {
    #[tabled(rename = "Regime")]
    name: &'static str,

    #[tabled(rename = "STCG Rate")]
    stcg_rate: String,

    #[tabled(rename = "LTCG Exemption")]
    ltcg_exemption: String,

    #[tabled(rename = "LTCG Rate")]
    ltcg_rate: String,
}

impl From<TaxRegime> for RegimeRow {
    fn from(regime: TaxRegime) -> Self {
        RegimeRow {
            name: regime.name(),
            stcg_rate: format_rate(regime.stcg_rate()),
            ltcg_exemption: format_inr(regime.ltcg_exemption()),
            ltcg_rate: format_rate(regime.ltcg_rate()),
        }
    }
}

impl RegimesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rows = [
            RegimeRow::from(TaxRegime::Old),
            RegimeRow::from(TaxRegime::New),
        ];
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
        Ok(())
    }
}
