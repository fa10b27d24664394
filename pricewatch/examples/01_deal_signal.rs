mod common;

use pricewatch::ProductId;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logs go to stderr; try RUST_LOG=pricewatch=debug.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // 2. Build the tracker around whichever provider is available.
    let tracker = common::tracker_builder()?.build()?;

    // 3. Ask for advice on a product, letting the tracker pick the current price.
    let asin = std::env::args().nth(1).unwrap_or_else(|| "B001".to_string());
    let id = ProductId::new(&asin)?;
    let insight = tracker.insight(&id, None).await?;

    // 4. Print the result.
    println!(
        "{} ({} days of history)",
        insight.title.as_deref().unwrap_or(id.as_str()),
        insight.history.len()
    );
    if let (Some(lo), Some(hi)) = (insight.summary.lowest, insight.summary.highest) {
        println!("range: ${lo} - ${hi}");
    }
    println!("{}", insight.recommendation);

    Ok(())
}
