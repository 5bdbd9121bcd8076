//! Financial Modeling Prep (FMP) income-statement integration.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{FetchConfig, FinancialRecord};
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
pub const DEFAULT_SYMBOL: &str = "AAPL";
const PERIOD: &str = "annual";

pub struct FmpClient {
    client: Client,
    config: FetchConfig,
}

impl FmpClient {
    /// Build a client from `FMP_API_KEY` (and optional `FMP_BASE_URL`), loading `.env` first.
    pub fn from_env(symbol: &str) -> Result<Self, FetchError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FMP_API_KEY").map_err(|_| FetchError::MissingApiKey)?;
        let base_url = std::env::var("FMP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(FetchConfig {
            base_url,
            symbol: symbol.to_string(),
            api_key,
        }))
    }

    pub fn new(config: FetchConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Fetch the annual income statements, in source order.
    ///
    /// One attempt; any failure is returned to the caller untouched.
    pub fn fetch(&self) -> Result<Vec<FinancialRecord>, FetchError> {
        let url = format!(
            "{}/income-statement/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.symbol
        );
        tracing::info!(symbol = %self.config.symbol, "fetching annual income statements");

        let resp = self
            .client
            .get(&url)
            .query(&[("period", PERIOD), ("apikey", self.config.api_key.as_str())])
            .send()
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;
        let records = decode_records(&body)?;

        tracing::info!(symbol = %self.config.symbol, n = records.len(), "fetched income statements");
        Ok(records)
    }
}

/// FMP replies with either a record array or an error object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Records(Vec<FinancialRecord>),
    Error {
        #[serde(rename = "Error Message")]
        message: String,
    },
}

fn decode_records(body: &str) -> Result<Vec<FinancialRecord>, FetchError> {
    // Decode the array directly first so a malformed record reports its own error
    // instead of the generic untagged-enum message.
    match serde_json::from_str::<Vec<FinancialRecord>>(body) {
        Ok(records) => Ok(records),
        Err(array_err) => match serde_json::from_str::<Payload>(body) {
            Ok(Payload::Error { message }) => Err(FetchError::Api(message)),
            Ok(Payload::Records(records)) => Ok(records),
            Err(_) => Err(FetchError::Decode(array_err.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    const BODY: &str = r#"[
        {"date": "2023-09-30", "symbol": "AAPL", "revenue": 383285000000, "netIncome": 96995000000,
         "grossProfit": 169148000000, "eps": 6.16, "operatingIncome": 114301000000},
        {"date": "2021-09-25", "symbol": "AAPL", "revenue": 365817000000, "netIncome": 94680000000,
         "grossProfit": 152836000000, "eps": 5.67, "operatingIncome": 108949000000},
        {"date": "2022-09-24", "symbol": "AAPL", "revenue": 394328000000, "netIncome": 99803000000,
         "grossProfit": 170782000000, "eps": 6.15, "operatingIncome": 119437000000}
    ]"#;

    fn client_for(server: &MockServer) -> FmpClient {
        FmpClient::new(FetchConfig {
            base_url: server.url("/api/v3"),
            symbol: "AAPL".to_string(),
            api_key: "test-key".to_string(),
        })
    }

    #[test]
    fn fetch_returns_records_in_source_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/income-statement/AAPL")
                .query_param("period", "annual")
                .query_param("apikey", "test-key");
            then.status(200)
                .header("content-type", "application/json")
                .body(BODY);
        });

        let records = client_for(&server).fetch().unwrap();

        mock.assert();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2023-09-30", "2021-09-25", "2022-09-24"]);
        assert_eq!(records[1].net_income, 94_680_000_000);
    }

    #[test]
    fn fetch_reports_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v3/income-statement/AAPL");
            then.status(500).body("oops");
        });

        let err = client_for(&server).fetch().unwrap_err();
        assert_eq!(err, FetchError::Status(500));
    }

    #[test]
    fn fetch_reports_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v3/income-statement/AAPL");
            then.status(200).body("{not json");
        });

        let err = client_for(&server).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn fetch_surfaces_fmp_error_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v3/income-statement/AAPL");
            then.status(200)
                .body(r#"{"Error Message": "Invalid API KEY."}"#);
        });

        let err = client_for(&server).fetch().unwrap_err();
        assert_eq!(err, FetchError::Api("Invalid API KEY.".to_string()));
    }

    #[test]
    fn fetch_reports_transport_failure() {
        // Nothing listens on port 1.
        let client = FmpClient::new(FetchConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            symbol: "AAPL".to_string(),
            api_key: "k".to_string(),
        });
        let err = client.fetch().unwrap_err();
        assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
        assert!(!err.to_string().contains("apikey"));
    }
}
