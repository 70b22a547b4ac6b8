use anyhow::Result;
use console::style;

use crate::styles::STYLES;

pub fn execute() -> Result<()> {
    println!("{}", style("Available styles:").bold());
    println!();
    for entry in STYLES {
        println!("{}", entry.preview());
        println!(
            "{}",
            style(format!("bespoken --style {}", entry.key)).dim()
        );
        println!();
    }
    Ok(())
}
