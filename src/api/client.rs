//! HTTP client for the monitor's backend surface
//!
//! No backend ships with this repository; the client exists so a real one
//! can be dropped in behind the same paths. Failures carry the structured
//! `{message}` body the surface defines, and every call retries with
//! exponential backoff before giving up.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::errors::{MonitorError, MonitorResult};
use crate::types::{
    CloseRequest, CloseResponse, ExecuteRequest, ExecuteResponse, FilterCriteria,
    OpportunityBatch, OrderBatch, Rule, RuleDraft, StrategyBatch, SystemStatus,
};

use super::{RetryConfig, retry_with_backoff};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl ApiClient {
    pub fn new(config: &Config) -> MonitorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| MonitorError::Network {
                message: format!("failed to build HTTP client: {}", e),
                source: Some(e.into()),
                retry_count: 0,
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig {
                max_attempts: config.api_max_retries.max(1),
                ..RetryConfig::default()
            },
        })
    }

    pub async fn get_opportunities(
        &self,
        criteria: &FilterCriteria,
    ) -> MonitorResult<OpportunityBatch> {
        self.request("fetch opportunities", || {
            self.http
                .get(self.url("/market/opportunities"))
                .query(criteria)
        })
        .await
    }

    pub async fn get_active_strategies(&self) -> MonitorResult<StrategyBatch> {
        self.request("fetch active strategies", || {
            self.http.get(self.url("/strategy/active"))
        })
        .await
    }

    pub async fn get_orders(&self, criteria: &FilterCriteria) -> MonitorResult<OrderBatch> {
        self.request("fetch order records", || {
            self.http.get(self.url("/trading/orders")).query(criteria)
        })
        .await
    }

    pub async fn get_system_status(&self) -> MonitorResult<SystemStatus> {
        self.request("fetch system status", || {
            self.http.get(self.url("/system/status"))
        })
        .await
    }

    pub async fn execute_order(&self, order: &ExecuteRequest) -> MonitorResult<ExecuteResponse> {
        self.request("execute order", || {
            self.http.post(self.url("/trading/execute")).json(order)
        })
        .await
    }

    pub async fn close_position(
        &self,
        position_id: &str,
        close: &CloseRequest,
    ) -> MonitorResult<CloseResponse> {
        self.request("close position", || {
            self.http
                .post(self.url(&format!("/trading/close/{}", position_id)))
                .json(close)
        })
        .await
    }

    pub async fn get_rules(&self) -> MonitorResult<Vec<Rule>> {
        self.request("fetch rules", || self.http.get(self.url("/strategy/rules")))
            .await
    }

    pub async fn save_rule(&self, draft: &RuleDraft) -> MonitorResult<Rule> {
        self.request("save rule", || {
            self.http.post(self.url("/strategy/rules")).json(draft)
        })
        .await
    }

    pub async fn delete_rule(&self, rule_id: &str) -> MonitorResult<()> {
        let _: serde_json::Value = self
            .request("delete rule", || {
                self.http
                    .delete(self.url(&format!("/strategy/rules/{}", rule_id)))
            })
            .await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<T, F>(&self, context: &str, build: F) -> MonitorResult<T>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        retry_with_backoff(
            || async {
                let response = build().send().await.context("request failed")?;
                decode(response).await
            },
            &self.retry,
            context,
        )
        .await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        anyhow::bail!(message);
    }
    response.json().await.context("failed to decode response body")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard, retries: u32) -> ApiClient {
        let mut config = Config::load();
        config.api_base_url = server.url();
        config.api_max_retries = retries;
        let mut client = ApiClient::new(&config).unwrap();
        client.retry.initial_delay_ms = 1;
        client.retry.max_delay_ms = 2;
        client
    }

    #[tokio::test]
    async fn decodes_a_successful_status_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/system/status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "status": "online",
                    "active_strategies": 3,
                    "total_opportunities": 14,
                    "today_profit": "5.25",
                    "total_balance": "73000",
                    "success_rate": "87.5",
                    "timestamp": "2026-08-06T00:00:00Z"
                }"#,
            )
            .create_async()
            .await;

        let status = client_for(&server, 1).get_system_status().await.unwrap();
        assert_eq!(status.status, "online");
        assert_eq!(status.active_strategies, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn surfaces_the_structured_error_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/trading/close/POS_1")
            .with_status(422)
            .with_body(r#"{"message":"position already closed"}"#)
            .expect(2)
            .create_async()
            .await;

        let err = client_for(&server, 2)
            .close_position("POS_1", &CloseRequest { at_market: true })
            .await
            .unwrap_err();

        match err {
            MonitorError::Network { message, retry_count, .. } => {
                assert!(message.contains("position already closed"));
                assert_eq!(retry_count, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn server_errors_are_retried_up_to_the_configured_cap() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/strategy/rules")
            .with_status(503)
            .with_body(r#"{"message":"warming up"}"#)
            .expect(3)
            .create_async()
            .await;

        let err = client_for(&server, 3).get_rules().await.unwrap_err();
        assert!(matches!(err, MonitorError::Network { retry_count: 3, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_rule_accepts_an_ack_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/strategy/rules/RULE_9")
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        client_for(&server, 1).delete_rule("RULE_9").await.unwrap();
        mock.assert_async().await;
    }
}
