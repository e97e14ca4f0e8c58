//! Reagent - CLI entry point.
//!
//! Runs a single question through the tool-calling agent and prints the
//! final answer.

use std::sync::Arc;
use std::time::Duration;

use reagent::agent::{Agent, AgentOptions};
use reagent::config::Config;
use reagent::llm::GroqClient;
use reagent::tools::{DuckDuckGoSearch, HackerNews, ToolRegistry, WeatherTool};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reagent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);

    let llm = Arc::new(GroqClient::new(
        config.groq_api_key.clone(),
        config.default_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(DuckDuckGoSearch::new()));
    registry.register(Arc::new(HackerNews::new()));
    match config.weather_api_key.clone() {
        Some(key) => registry.register(Arc::new(WeatherTool::new(key))),
        None => info!("WEATHER_API_KEY not set, weather tool disabled"),
    }

    let options = AgentOptions {
        max_iterations: config.max_iterations,
        require_final_marker: config.require_final_marker,
        tool_timeout: Duration::from_secs(config.tool_timeout_secs),
    };
    let mut agent = Agent::new(llm, Arc::new(registry), options);

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let question = if question.is_empty() {
        "What's the weather in New York and what are the top 3 news stories today?".to_string()
    } else {
        question
    };

    let (answer, _history) = agent.run(&question).await?;

    println!("{}", answer);

    Ok(())
}
