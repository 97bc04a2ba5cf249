//! W3C WebDriver wire types
//!
//! Request/response shapes for the subset of the WebDriver protocol used by the harness.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Key under which a W3C endpoint returns element references
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Opaque element reference handed out by the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// W3C location strategy plus expression, as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selector<'a> {
    /// `css selector`, `xpath`, `link text`, `partial link text` or `tag name`
    pub using: &'static str,
    /// Expression in that strategy
    pub value: Cow<'a, str>,
}

impl<'a> Selector<'a> {
    pub fn css<S: Into<Cow<'a, str>>>(value: S) -> Self {
        Self {
            using: "css selector",
            value: value.into(),
        }
    }

    pub fn xpath<S: Into<Cow<'a, str>>>(value: S) -> Self {
        Self {
            using: "xpath",
            value: value.into(),
        }
    }

    /// Detach from any borrowed expression
    pub fn into_owned(self) -> Selector<'static> {
        Selector {
            using: self.using,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

/// Response envelope: every W3C response wraps its payload in `value`
#[derive(Debug, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub value: Value,
}

/// Error payload carried in `value` on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct WireError {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Result of `POST /session`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
    pub session_id: String,
    #[serde(default)]
    pub capabilities: Value,
}

/// Result of `GET /status`
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

/// Extract an element reference from a W3C element object
pub fn element_id_from_value(value: &Value) -> Option<ElementId> {
    value
        .get(ELEMENT_KEY)
        .and_then(|v| v.as_str())
        .map(ElementId::new)
}
