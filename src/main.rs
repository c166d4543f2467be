use browser_agent::Cli;
use clap::Parser;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    browser_agent::run(cli).await?;
    Ok(())
}
