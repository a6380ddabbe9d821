//! Direct geocoding: resolve a city name to coordinates.
//! Uses the OpenWeather geocoding API with the same key as the forecast.

use reqwest::{Client, StatusCode};

use crate::types::{GeocodeResult, WeatherError};

/// Look up a city and return the best (first) match.
///
/// An empty result array means the city is unknown upstream.
pub async fn direct_geocode(
    client: &Client,
    geocode_url: &str,
    api_key: &str,
    city: &str,
) -> Result<GeocodeResult, WeatherError> {
    let response = client
        .get(geocode_url)
        .query(&[("q", city), ("limit", "1"), ("appid", api_key)])
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("Geocoding rejected the API key");
        return Err(WeatherError::InvalidApiKey);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::debug!("Geocode returned status {}: {}", status, message);
        return Err(WeatherError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    let matches: Vec<GeocodeResult> = response.json().await?;
    let first = matches
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::LocationNotFound(city.to_string()))?;

    tracing::info!("Geocoded {} to {}, {}", city, first.lat, first.lon);
    Ok(first)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_geocode_returns_first_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Springfield"))
            .and(query_param("appid", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Springfield", "lat": 39.78, "lon": -89.65, "country": "US", "state": "Illinois"},
                {"name": "Springfield", "lat": 37.21, "lon": -93.29, "country": "US", "state": "Missouri"}
            ])))
            .mount(&mock_server)
            .await;

        let url = format!("{}/geo/1.0/direct", mock_server.uri());
        let result = direct_geocode(&Client::new(), &url, "key", "Springfield")
            .await
            .unwrap();

        assert_eq!(result.state.as_deref(), Some("Illinois"));
        assert_eq!(result.lat, 39.78);
    }

    #[tokio::test]
    async fn test_geocode_empty_is_location_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let url = format!("{}/geo/1.0/direct", mock_server.uri());
        let result = direct_geocode(&Client::new(), &url, "key", "Atlantis").await;

        assert!(matches!(result, Err(WeatherError::LocationNotFound(ref c)) if c == "Atlantis"));
    }

    #[tokio::test]
    async fn test_geocode_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Invalid API key."
            })))
            .mount(&mock_server)
            .await;

        let url = format!("{}/geo/1.0/direct", mock_server.uri());
        let result = direct_geocode(&Client::new(), &url, "bad", "Paris").await;

        assert!(matches!(result, Err(WeatherError::InvalidApiKey)));
    }
}
