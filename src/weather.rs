use crate::config::WeatherConfig;
use crate::error::{BriefingError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            _ => "m/s",
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "celsius" | "c" => Ok(Units::Metric),
            "imperial" | "fahrenheit" | "f" => Ok(Units::Imperial),
            "standard" | "kelvin" | "k" => Ok(Units::Standard),
            other => Err(format!("unknown unit system: {}", other)),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub wind_speed: f64,
    pub conditions: String,
    pub description: String,
    pub units: Units,
}

impl WeatherReport {
    /// Plain-text rendering used in prompts
    pub fn summary(&self) -> String {
        let t = self.units.temperature_symbol();
        let place = match &self.country {
            Some(country) => format!("{}, {}", self.location, country),
            None => self.location.clone(),
        };
        format!(
            "Location: {}\nConditions: {} ({})\nTemperature: {:.1}{} (feels like {:.1}{})\n\
             Range: {:.1}{} to {:.1}{}\nHumidity: {}%\nPressure: {} hPa\nWind: {:.1} {}",
            place,
            self.conditions,
            self.description,
            self.temperature,
            t,
            self.feels_like,
            t,
            self.temp_min,
            t,
            self.temp_max,
            t,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.units.speed_symbol()
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenWeatherResponse {
    name: Option<String>,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
    wind: Option<OpenWeatherWind>,
    sys: Option<OpenWeatherSys>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherSys {
    country: Option<String>,
}

impl OpenWeatherResponse {
    pub(crate) fn into_report(self, requested: &str, units: Units) -> WeatherReport {
        let (conditions, description) = self
            .weather
            .into_iter()
            .next()
            .map(|c| (c.main, c.description))
            .unwrap_or_else(|| ("Unknown".to_string(), "no description".to_string()));

        WeatherReport {
            location: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| requested.to_string()),
            country: self.sys.and_then(|s| s.country),
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.map(|w| w.speed).unwrap_or(0.0),
            conditions,
            description,
            units,
        }
    }
}

/// Client for the OpenWeatherMap current-conditions endpoint
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                BriefingError::Configuration(
                    "OPENWEATHER_API_KEY environment variable not set".to_string(),
                )
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
        })
    }

    pub async fn current(&self, location: &str, units: Units) -> Result<WeatherReport> {
        log::debug!("Fetching current weather for {} ({})", location, units);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", units.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200 => {}
            401 => return Err(BriefingError::unavailable("OpenWeather", "invalid API key")),
            404 => {
                return Err(BriefingError::unavailable(
                    "OpenWeather",
                    format!("location not found: {}", location),
                ))
            }
            429 => return Err(BriefingError::unavailable("OpenWeather", "API rate limit exceeded")),
            code => {
                return Err(BriefingError::unavailable(
                    "OpenWeather",
                    format!("API request failed with status {}", code),
                ))
            }
        }

        let body: OpenWeatherResponse = response.json().await?;
        Ok(body.into_report(location, units))
    }
}
