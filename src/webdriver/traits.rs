//! Automation engine trait
//!
//! This module defines the abstract interface the harness drives a browser through.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::types::{ElementId, Selector};

/// Automation engine trait
///
/// One live browser session. Element operations address nodes by the
/// [`ElementId`] the engine returned from a query.
#[async_trait]
pub trait AutomationEngine: Send + Sync + std::fmt::Debug {
    /// Engine-side session identifier
    fn session_id(&self) -> &str;

    /// Navigate to URL
    async fn navigate(&self, url: &str) -> Result<(), crate::Error>;

    /// Current top-level URL
    async fn current_url(&self) -> Result<String, crate::Error>;

    /// Serialized DOM of the current page
    async fn page_source(&self) -> Result<String, crate::Error>;

    /// Document title
    async fn title(&self) -> Result<String, crate::Error>;

    /// Go back in history
    async fn back(&self) -> Result<(), crate::Error>;

    /// Go forward in history
    async fn forward(&self) -> Result<(), crate::Error>;

    /// Query the document; an empty vector means nothing matched
    async fn find_elements(&self, selector: &Selector<'_>) -> Result<Vec<ElementId>, crate::Error>;

    /// Query below an element
    async fn find_child_elements(
        &self,
        parent: &ElementId,
        selector: &Selector<'_>,
    ) -> Result<Vec<ElementId>, crate::Error>;

    /// Rendered text of an element
    async fn element_text(&self, element: &ElementId) -> Result<String, crate::Error>;

    /// Attribute value, `None` when absent
    async fn element_attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>, crate::Error>;

    /// Click element
    async fn element_click(&self, element: &ElementId) -> Result<(), crate::Error>;

    /// Clear an editable element
    async fn element_clear(&self, element: &ElementId) -> Result<(), crate::Error>;

    /// Type text into element
    async fn element_send_keys(&self, element: &ElementId, text: &str) -> Result<(), crate::Error>;

    /// Check if element is displayed
    async fn element_displayed(&self, element: &ElementId) -> Result<bool, crate::Error>;

    /// Capture the viewport as PNG bytes
    async fn screenshot(&self) -> Result<Vec<u8>, crate::Error>;

    /// Run a synchronous script in the page
    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value, crate::Error>;

    /// Send a raw Chrome DevTools command (Chromium drivers only)
    async fn execute_cdp(&self, command: &str, params: Value) -> Result<Value, crate::Error>;

    /// Set the engine-wide implicit wait
    async fn set_implicit_wait(&self, timeout: Duration) -> Result<(), crate::Error>;

    /// Resize the window
    async fn set_window_size(&self, width: u32, height: u32) -> Result<(), crate::Error>;

    /// Maximize the window
    async fn maximize_window(&self) -> Result<(), crate::Error>;

    /// End the session and terminate the browser
    async fn quit(&self) -> Result<(), crate::Error>;
}
