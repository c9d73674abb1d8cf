//! Price table display

use anyhow::Result;
use nwgear::{normalize, PriceTable};

use crate::cli::DataArgs;
use crate::config::Config;

fn render(table: &PriceTable, filter: Option<&str>) -> String {
    let filter = filter.map(normalize);
    let mut out = String::new();
    for (name, price) in table.iter() {
        if let Some(f) = &filter {
            if !normalize(name).contains(f.as_str()) {
                continue;
            }
        }
        out.push_str(&format!("{:<32} {:>10.2}\n", name, price));
    }
    out
}

pub fn handle(filter: Option<&str>, data: &DataArgs) -> Result<()> {
    let config = Config::load()?;
    let server = super::server(data, &config);
    let table = super::price_table(data, &config)?;

    if table.is_empty() {
        println!("No prices for server {}", server);
        return Ok(());
    }

    println!("Prices for {} ({} materials):", server, table.len());
    print!("{}", render(&table, filter));
    Ok(())
}
