use crate::weather::WeatherReport;

pub const SYSTEM: &str = "You are a friendly weather reporter. Describe current conditions \
accurately using only the measurements you are given.";

pub fn analysis_prompt(request: &str) -> String {
    format!(
        r#"Work out which location the user wants weather for.

WEATHER REQUEST TO ANALYZE: "{request}"

Answer with exactly these two lines and nothing else:
LOCATION: city name, optionally followed by a country (write default if no place is mentioned)
UNITS: metric, imperial or standard (write default if the user did not say)"#
    )
}

pub fn report_prompt(request: &str, report: &WeatherReport) -> String {
    format!(
        r#"Create a weather report for this request: "{request}"

Current measurements:
{summary}

Describe the conditions in two or three sentences, then give one or two practical
suggestions such as clothing or whether to carry an umbrella."#,
        summary = report.summary()
    )
}
