use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates an HTTP client with transient-failure retry middleware.
    /// The per-request timeout stays below the orchestrator's fetch
    /// timeout so retries do not outlive the request budget.
    pub fn create_client(request_timeout: Duration) -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(2);

        let client = Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}

/// Builds a URL with query parameters appended manually, since
/// reqwest-middleware does not expose `.query()`.
pub fn build_url_with_query<K, V>(base_url: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return base_url.to_string();
    }

    let query_string: String = params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k.as_ref()), encode(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&");

    if base_url.contains('?') {
        format!("{}&{}", base_url, query_string)
    } else {
        format!("{}?{}", base_url, query_string)
    }
}

fn encode(s: &str) -> String {
    let mut encoded = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => encoded.push(c),
            _ => {
                for byte in c.to_string().as_bytes() {
                    encoded.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_values() {
        let url = build_url_with_query(
            "https://data.example.com/v2/stocks/bars",
            &[("symbols", "BRK.A"), ("start", "2025-01-01T00:00:00Z")],
        );
        assert_eq!(
            url,
            "https://data.example.com/v2/stocks/bars?symbols=BRK.A&start=2025-01-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn test_build_url_without_params() {
        let url = build_url_with_query::<&str, &str>("https://example.com/path", &[]);
        assert_eq!(url, "https://example.com/path");
    }
}
