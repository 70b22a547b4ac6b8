use anyhow::Result;
use console::style;

pub fn execute() -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "{} - version {}",
        style("bespoken").bold().cyan(),
        style(version).bold()
    );
    Ok(())
}
