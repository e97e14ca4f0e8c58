//! Hacker News top-stories fetch.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

const TOP_STORIES_URL: &str = "https://hacker-news.firebaseio.com/v0/topstories.json";
const ITEM_URL: &str = "https://hacker-news.firebaseio.com/v0/item";

/// Fetches the latest Hacker News stories.
pub struct HackerNews;

impl HackerNews {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HackerNews {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for HackerNews {
    fn name(&self) -> &str {
        "HackerNews"
    }

    fn description(&self) -> &str {
        "Gets the latest Hacker News stories, up to the number requested by the user."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "no_of_stories": {
                    "type": "integer",
                    "description": "Number of stories you want to fetch"
                }
            },
            "required": ["no_of_stories"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let count = args["no_of_stories"]
            .as_u64()
            .ok_or_else(|| anyhow::anyhow!("Missing 'no_of_stories' argument"))?
            as usize;

        tracing::info!("Fetching {} Hacker News stories", count);

        let client = reqwest::Client::new();
        let ids: Vec<u64> = client
            .get(TOP_STORIES_URL)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut stories = Vec::new();
        for id in ids.into_iter().take(count) {
            let item: Value = client
                .get(format!("{}/{}.json", ITEM_URL, id))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            stories.push(json!({
                "title": item["title"].as_str().unwrap_or("No title"),
                "url": item["url"].as_str().unwrap_or("No url"),
            }));
        }

        if stories.is_empty() {
            return Ok("No stories found".to_string());
        }

        Ok(serde_json::to_string(&stories)?)
    }
}
