use crate::config::WeatherConfig;
use crate::tool::Tool;
use crate::weather::{OpenWeatherClient, Units};
use anyhow::Result;

/// Current conditions lookup exposed as a tool
pub struct WeatherTool {
    client: OpenWeatherClient,
    default_units: Units,
}

#[derive(serde::Deserialize)]
struct WeatherParams {
    location: String,
    #[serde(default)]
    units: Option<Units>,
}

impl WeatherTool {
    pub fn new(config: &WeatherConfig) -> crate::error::Result<Self> {
        Ok(Self {
            client: OpenWeatherClient::new(config)?,
            default_units: config.units,
        })
    }
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "current_weather"
    }

    fn description(&self) -> &str {
        "Looks up current temperature, humidity, wind and conditions for a location"
    }

    async fn execute(&self, arguments: &str) -> Result<String> {
        let params: WeatherParams = serde_json::from_str(arguments)?;
        if params.location.trim().is_empty() {
            return Err(anyhow::anyhow!("location is required"));
        }

        let units = params.units.unwrap_or(self.default_units);
        let report = self.client.current(params.location.trim(), units).await?;
        Ok(serde_json::to_string(&report)?)
    }
}
