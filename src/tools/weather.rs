//! Current-temperature lookup via weatherapi.com.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

const BASE_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Gets the current temperature for a location.
///
/// The API key is injected at construction; the tool is only registered when
/// one is configured.
pub struct WeatherTool {
    api_key: String,
    base_url: String,
}

impl WeatherTool {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "WeatherTool"
    }

    fn description(&self) -> &str {
        "Gets the current temperature for a given location."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The location to get weather data for (city name, zip code, etc.)"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let location = args["location"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'location' argument"))?;

        let url = format!(
            "{}?key={}&q={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(location)
        );

        tracing::info!("Fetching weather for {}", location);

        let response = reqwest::get(&url).await?;
        if !response.status().is_success() {
            return Ok(format!("No weather data found for: {}", location));
        }

        let data: Value = response.json().await?;
        match data["current"]["temp_c"].as_f64() {
            Some(temp) => Ok(format!("{} °C", temp)),
            None => Ok(format!("No weather data found for: {}", location)),
        }
    }
}
