use rust_decimal::Decimal;

/// Cost Inflation Index notified by the CBDT, by financial year.
/// 2025 is an estimate pending notification.
pub fn index_for(year: i32) -> Option<u32> {
    let cii = match year {
        2001 => 100,
        2002 => 105,
        2003 => 109,
        2004 => 113,
        2005 => 117,
        2006 => 122,
        2007 => 129,
        2008 => 137,
        2009 => 148,
        2010 => 167,
        2011 => 184,
        2012 => 200,
        2013 => 220,
        2014 => 240,
        2015 => 254,
        2016 => 264,
        2017 => 272,
        2018 => 280,
        2019 => 289,
        2020 => 301,
        2021 => 317,
        2022 => 331,
        2023 => 348,
        2024 => 363,
        2025 => 380,
        _ => return None,
    };
    Some(cii)
}

/// Inflation-adjusted purchase cost: purchase value scaled by the ratio of
/// the sale-year index to the purchase-year index. Years outside the table
/// fall back to the 2001 base (100) for the purchase and the 2024 index
/// (363) for the sale.
pub fn indexed_cost(purchase_value: Decimal, purchase_year: i32, sale_year: i32) -> Decimal {
    let purchase_index = index_for(purchase_year).unwrap_or(100);
    let sale_index = index_for(sale_year).unwrap_or(363);
    purchase_value * Decimal::from(sale_index) / Decimal::from(purchase_index)
}
