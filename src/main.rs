//! Learning System demo binary.
//!
//! Walks through every accessor against a live service: creates a resource,
//! an observation and a takeaway linking them, then reads them back.
//! Logs go to stderr; results are printed to stdout.
//!
//! Coverage is excluded because it needs a reachable service.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use learning_system::config::Config;
use learning_system::{
    AppError, LearningSystemClient, NewObservation, NewResource, NewTakeaway, ResourceType,
};
use serde_json::json;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Initialize logging to stderr only (stdout carries the demo output)
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: url={}, timeout={}ms",
        config.supabase_url,
        config.request_timeout_ms
    );

    if let Err(e) = run(&config).await {
        tracing::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run(config: &Config) -> Result<(), AppError> {
    let client = LearningSystemClient::from_config(config)?;

    println!("=== Learning System Examples ===\n");

    println!("1. Creating a learning resource...");
    let resource = client
        .resources
        .create(
            &NewResource::new("Attention Is All You Need", ResourceType::Paper)
                .with_source_url("https://arxiv.org/abs/1706.03762")
                .with_content_text(
                    "The dominant sequence transduction models are based on complex \
                     recurrent or convolutional neural networks...",
                )
                .with_tags(["transformers", "attention", "deep-learning"]),
        )
        .await?;
    println!("   Created resource: {}", resource.id);
    println!("   Title: {}\n", resource.title);

    println!("2. Creating an observation...");
    let observation = client
        .observations
        .create(
            &NewObservation::new("Multi-head attention shows 15% improvement over single head")
                .with_experiment("exp-001")
                .with_context(json!({
                    "model": "transformer-base",
                    "dataset": "WMT2014",
                    "metric": "BLEU",
                    "score": 28.4
                })),
        )
        .await?;
    println!("   Created observation: {}", observation.id);
    println!("   Content: {}\n", observation.content);

    println!("3. Creating a takeaway...");
    let takeaway = client
        .takeaways
        .create(
            &NewTakeaway::new(
                "Multi-head attention allows model to attend to different representation subspaces",
            )
            .with_assumptions(
                "Single attention mechanism is sufficient for capturing dependencies",
                "Multiple attention heads capture different types of dependencies simultaneously",
            )
            .with_observations([observation.id.clone()])
            .with_resources([resource.id.clone()]),
        )
        .await?;
    println!("   Created takeaway: {}", takeaway.id);
    println!("   Insight: {}\n", takeaway.insight);

    println!("4. Querying resources by tags...");
    let papers = client.resources.list_by_tags(&["deep-learning"]).await?;
    println!("   Found {} deep learning resources\n", papers.len());

    println!("5. Getting observations for experiment...");
    let experiment = client.observations.list_by_experiment("exp-001").await?;
    println!("   Found {} observations for exp-001\n", experiment.len());

    println!("6. Getting takeaway with relations...");
    let full = client.takeaways.get_with_relations(&takeaway.id).await?;
    println!("   Insight: {}", full.takeaway.insight);
    println!("   Linked observations: {}", full.observation_count());
    println!("   Linked resources: {}", full.resource_count());

    println!("\n=== All examples completed! ===");
    Ok(())
}
