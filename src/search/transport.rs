//! HTTP transport for the search form

use reqwest::Client as ReqwestClient;
use reqwest::header::REFERER;
use tracing::{debug, instrument, warn};

use super::config::ClientConfig;
use super::payload::FormPayload;
use crate::error::{Error, Result};

/// Build a client for a single exchange.
///
/// Idle connections are not pooled, so nothing outlives the call.
fn build_client(config: &ClientConfig) -> Result<ReqwestClient> {
    Ok(ReqwestClient::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .pool_max_idle_per_host(0)
        .build()?)
}

/// Submit the search form once and return the response body.
///
/// The site's form is a GET form, but it accepts the same fields as a POST
/// body, which is what is sent here. Only the first results page is fetched.
#[instrument(skip(config, payload), fields(base_url = %config.base_url), level = "debug")]
pub async fn submit_search(config: &ClientConfig, payload: &FormPayload) -> Result<String> {
    let url = config.search_url()?;
    let client = build_client(config)?;
    let pairs = payload.to_pairs();

    debug!("Sending POST to {} with {} form pairs", url, pairs.len());
    let response = client
        .post(url.clone())
        .header(REFERER, url.as_str())
        .form(&pairs)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Search endpoint returned {}", status);
        return Err(Error::Status {
            status_code: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    debug!("Received {} bytes", body.len());
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filters::SearchFilters;
    use crate::search::payload::build_payload;
    use mockito::{Matcher, Server};
    use std::io::Write;
    use std::time::Duration;

    const SEARCH_PATH: &str = "/studium/studiengangsuche/erweiterte-studiengangsuche.html";

    fn config_for(server: &Server) -> ClientConfig {
        ClientConfig::builder().base_url(server.url()).timeout_secs(5).build()
    }

    #[tokio::test]
    async fn test_submit_search_sends_form_and_headers() {
        let mut server = Server::new_async().await;
        let referer = format!("{}{}", server.url(), SEARCH_PATH);
        let mock_server = server
            .mock("POST", SEARCH_PATH)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_header("referer", referer.as_str())
            .match_header("user-agent", Matcher::Regex("^Mozilla/5.0".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("gfi".into(), "1".into()),
                Matcher::UrlEncoded("tx_szhrksearch_pi1[search]".into(), "1".into()),
                Matcher::UrlEncoded("tx_szhrksearch_pi1[fach]".into(), "Design".into()),
                Matcher::UrlEncoded("tx_szhrksearch_pi1[sachgr][]".into(), "S230".into()),
            ]))
            .with_status(200)
            .with_body("<html><body>ok</body></html>")
            .expect(1)
            .create_async()
            .await;

        let filters = SearchFilters::builder().fach("Design").sachgebiete(["S230"]).build();
        let body = submit_search(&config_for(&server), &build_payload(&filters))
            .await
            .unwrap();

        assert_eq!(body, "<html><body>ok</body></html>");
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", SEARCH_PATH)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let payload = build_payload(&SearchFilters::default());
        let result = submit_search(&config_for(&server), &payload).await;

        assert!(matches!(result, Err(Error::Status { status_code: 503, .. })));
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_error_status_is_reported() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", SEARCH_PATH)
            .with_status(404)
            .create_async()
            .await;

        let err = submit_search(&config_for(&server), &build_payload(&SearchFilters::default()))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        // Nothing listens on port 9 of localhost in the test environment.
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9")
            .timeout_secs(2)
            .build();

        let result = submit_search(&config, &build_payload(&SearchFilters::default())).await;

        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", SEARCH_PATH)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(b"<html><body>too late</body></html>")
            })
            .create_async()
            .await;

        let config = ClientConfig::builder()
            .base_url(server.url())
            .timeout_secs(1)
            .build();

        let result = submit_search(&config, &build_payload(&SearchFilters::default())).await;

        assert!(matches!(result, Err(Error::Http(ref e)) if e.is_timeout()));
    }
}
