//! W3C WebDriver HTTP client
//!
//! Speaks the JSON wire protocol to chromedriver, geckodriver, safaridriver or a remote grid.

use super::traits::AutomationEngine;
use super::types::*;
use crate::Error;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// WebDriver client bound to one session
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    http: reqwest::Client,
    /// Driver endpoint (e.g. "http://127.0.0.1:9515")
    endpoint: String,
    session_id: String,
}

impl WebDriverClient {
    /// Open a new session on `endpoint` with the given capabilities
    pub async fn new_session<S: Into<String>>(endpoint: S, capabilities: Value) -> Result<Self, Error> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let http = http_client()?;

        info!("Requesting new WebDriver session from {}", endpoint);

        let body = json!({ "capabilities": { "alwaysMatch": capabilities } });
        let response = http
            .post(format!("{}/session", endpoint))
            .json(&body)
            .send()
            .await?;
        let value = decode(response).await?;

        let created: NewSessionResponse = serde_json::from_value(value)?;
        debug!(
            "Session {} created, browser={}",
            created.session_id,
            created
                .capabilities
                .get("browserName")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
        );

        Ok(Self {
            http,
            endpoint,
            session_id: created.session_id,
        })
    }

    /// Query a driver's readiness
    pub async fn status(endpoint: &str) -> Result<StatusResponse, Error> {
        let http = http_client()?;
        let response = http
            .get(format!("{}/status", endpoint.trim_end_matches('/')))
            .send()
            .await?;
        let value = decode(response).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Driver endpoint this session lives on
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn session_url(&self, path: &str) -> String {
        format!("{}/session/{}{}", self.endpoint, self.session_id, path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, Error> {
        let url = self.session_url(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        decode(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, Error> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.send(Method::POST, path, Some(body)).await
    }

    fn parse_elements(value: Value) -> Vec<ElementId> {
        match value {
            Value::Array(items) => items.iter().filter_map(element_id_from_value).collect(),
            _ => Vec::new(),
        }
    }
}

fn http_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))
}

/// Unwrap the `value` envelope, turning W3C error payloads into [`Error::WebDriver`]
async fn decode(response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();
    let text = response.text().await?;

    if text.trim().is_empty() {
        return if status.is_success() {
            Ok(Value::Null)
        } else {
            Err(Error::webdriver("unknown error", format!("HTTP {} with empty body", status)))
        };
    }

    let envelope: WireResponse = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(Error::webdriver("unknown error", format!("HTTP {}: {}", status, text)));
        }
        Err(e) => return Err(e.into()),
    };

    if status.is_success() {
        return Ok(envelope.value);
    }

    match serde_json::from_value::<WireError>(envelope.value) {
        Ok(err) => Err(Error::webdriver(err.error, err.message)),
        Err(_) => Err(Error::webdriver("unknown error", format!("HTTP {}", status))),
    }
}

#[async_trait]
impl AutomationEngine for WebDriverClient {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn navigate(&self, url: &str) -> Result<(), Error> {
        info!("Navigating to {}", url);
        self.post("/url", json!({ "url": url })).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, Error> {
        let value = self.get("/url").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn page_source(&self) -> Result<String, Error> {
        let value = self.get("/source").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn title(&self) -> Result<String, Error> {
        let value = self.get("/title").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn back(&self) -> Result<(), Error> {
        self.post("/back", json!({})).await?;
        Ok(())
    }

    async fn forward(&self) -> Result<(), Error> {
        self.post("/forward", json!({})).await?;
        Ok(())
    }

    async fn find_elements(&self, selector: &Selector<'_>) -> Result<Vec<ElementId>, Error> {
        let value = self.post("/elements", serde_json::to_value(selector)?).await?;
        Ok(Self::parse_elements(value))
    }

    async fn find_child_elements(
        &self,
        parent: &ElementId,
        selector: &Selector<'_>,
    ) -> Result<Vec<ElementId>, Error> {
        let path = format!("/element/{}/elements", parent);
        let value = self.post(&path, serde_json::to_value(selector)?).await?;
        Ok(Self::parse_elements(value))
    }

    async fn element_text(&self, element: &ElementId) -> Result<String, Error> {
        let value = self.get(&format!("/element/{}/text", element)).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn element_attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>, Error> {
        let value = self
            .get(&format!("/element/{}/attribute/{}", element, name))
            .await?;
        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    async fn element_click(&self, element: &ElementId) -> Result<(), Error> {
        self.post(&format!("/element/{}/click", element), json!({})).await?;
        Ok(())
    }

    async fn element_clear(&self, element: &ElementId) -> Result<(), Error> {
        self.post(&format!("/element/{}/clear", element), json!({})).await?;
        Ok(())
    }

    async fn element_send_keys(&self, element: &ElementId, text: &str) -> Result<(), Error> {
        self.post(&format!("/element/{}/value", element), json!({ "text": text }))
            .await?;
        Ok(())
    }

    async fn element_displayed(&self, element: &ElementId) -> Result<bool, Error> {
        let value = self.get(&format!("/element/{}/displayed", element)).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn screenshot(&self) -> Result<Vec<u8>, Error> {
        info!("Capturing screenshot");
        let value = self.get("/screenshot").await?;
        let data = value
            .as_str()
            .ok_or_else(|| Error::internal("Screenshot payload is not a string"))?;
        BASE64
            .decode(data)
            .map_err(|e| Error::internal(format!("Failed to decode screenshot: {}", e)))
    }

    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value, Error> {
        debug!("Executing script: {}", script);
        self.post("/execute/sync", json!({ "script": script, "args": args }))
            .await
    }

    async fn execute_cdp(&self, command: &str, params: Value) -> Result<Value, Error> {
        debug!("Executing CDP command: {}", command);
        self.post("/goog/cdp/execute", json!({ "cmd": command, "params": params }))
            .await
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<(), Error> {
        self.post("/timeouts", json!({ "implicit": timeout.as_millis() as u64 }))
            .await?;
        Ok(())
    }

    async fn set_window_size(&self, width: u32, height: u32) -> Result<(), Error> {
        self.post("/window/rect", json!({ "width": width, "height": height }))
            .await?;
        Ok(())
    }

    async fn maximize_window(&self) -> Result<(), Error> {
        self.post("/window/maximize", json!({})).await?;
        Ok(())
    }

    async fn quit(&self) -> Result<(), Error> {
        info!("Ending WebDriver session {}", self.session_id);
        self.send(Method::DELETE, "", None).await?;
        Ok(())
    }
}
