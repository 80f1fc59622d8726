use anyhow::Result;
use slidecal::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
