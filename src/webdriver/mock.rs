//! Mock automation engine for testing
//!
//! An in-memory DOM keyed by selector. Every interaction is recorded so tests
//! can assert what the harness did to the page.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::traits::AutomationEngine;
use super::types::{ElementId, Selector};
use crate::Error;

/// 1x1 transparent PNG
const MOCK_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0xFC, 0xCF, 0xC0, 0x50,
    0x0F, 0x00, 0x04, 0x85, 0x01, 0x80, 0x84, 0xA9, 0x8C, 0x21, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// A scripted DOM node
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    text: String,
    attributes: HashMap<String, String>,
    hidden: bool,
    link_target: Option<String>,
    unreadable: bool,
}

impl MockElement {
    /// Create an element with rendered text
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set an attribute
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark as not displayed
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Clicking navigates to `url`
    pub fn navigates_to<S: Into<String>>(mut self, url: S) -> Self {
        self.link_target = Some(url.into());
        self
    }

    /// Reading text fails with a stale-element error
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }
}

type QueryKey = (&'static str, String);

#[derive(Debug, Default)]
struct MockState {
    next_id: u64,
    elements: HashMap<ElementId, MockElement>,
    queries: HashMap<QueryKey, Vec<ElementId>>,
    child_queries: HashMap<(ElementId, QueryKey), Vec<ElementId>>,
    failing_queries: HashSet<QueryKey>,
    url: String,
    back_stack: Vec<String>,
    forward_stack: Vec<String>,
    source: String,
    clicks: Vec<ElementId>,
    cleared: Vec<ElementId>,
    typed: Vec<(ElementId, String)>,
    scripts: Vec<String>,
    cdp: Vec<(String, Value)>,
    implicit_wait: Option<Duration>,
    window: Option<(u32, u32)>,
    maximized: bool,
    fail_quit: bool,
    fail_screenshot: bool,
}

/// Mock automation engine
#[derive(Debug)]
pub struct MockEngine {
    session_id: String,
    state: Mutex<MockState>,
    quit_count: AtomicUsize,
}

impl MockEngine {
    /// Create an engine with an empty document
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            state: Mutex::new(MockState {
                url: "about:blank".to_string(),
                ..Default::default()
            }),
            quit_count: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn key(selector: &Selector<'_>) -> QueryKey {
        (selector.using, selector.value.to_string())
    }

    fn insert(state: &mut MockState, element: MockElement) -> ElementId {
        state.next_id += 1;
        let id = ElementId::new(format!("mock-{}", state.next_id));
        state.elements.insert(id.clone(), element);
        id
    }

    /// Add an element matched by `selector` at document level
    pub fn add(&self, selector: &Selector<'_>, element: MockElement) -> ElementId {
        let mut state = self.state();
        let id = Self::insert(&mut state, element);
        state
            .queries
            .entry(Self::key(selector))
            .or_default()
            .push(id.clone());
        id
    }

    /// Add an element matched by `selector` below `parent`
    pub fn add_child(&self, parent: &ElementId, selector: &Selector<'_>, element: MockElement) -> ElementId {
        let mut state = self.state();
        let id = Self::insert(&mut state, element);
        state
            .child_queries
            .entry((parent.clone(), Self::key(selector)))
            .or_default()
            .push(id.clone());
        id
    }

    /// Remove every element matched by `selector`
    pub fn clear_matches(&self, selector: &Selector<'_>) {
        self.state().queries.remove(&Self::key(selector));
    }

    /// Make queries for `selector` fail with an engine error
    pub fn fail_queries(&self, selector: &Selector<'_>) {
        self.state().failing_queries.insert(Self::key(selector));
    }

    /// Make `quit` report an error (the call is still counted)
    pub fn fail_quit(&self) {
        self.state().fail_quit = true;
    }

    /// Make `screenshot` report an error
    pub fn fail_screenshot(&self) {
        self.state().fail_screenshot = true;
    }

    /// Set the serialized page source
    pub fn set_page_source<S: Into<String>>(&self, source: S) {
        self.state().source = source.into();
    }

    /// Number of `quit` calls
    pub fn quit_count(&self) -> usize {
        self.quit_count.load(Ordering::SeqCst)
    }

    /// Every clicked element, in order
    pub fn clicks(&self) -> Vec<ElementId> {
        self.state().clicks.clone()
    }

    /// Number of clicks on one element
    pub fn click_count(&self, element: &ElementId) -> usize {
        self.state().clicks.iter().filter(|id| *id == element).count()
    }

    /// Every cleared element, in order
    pub fn cleared(&self) -> Vec<ElementId> {
        self.state().cleared.clone()
    }

    /// Every `send_keys` call, in order
    pub fn typed(&self) -> Vec<(ElementId, String)> {
        self.state().typed.clone()
    }

    /// Every executed script
    pub fn scripts(&self) -> Vec<String> {
        self.state().scripts.clone()
    }

    /// Every CDP command with its parameters
    pub fn cdp_commands(&self) -> Vec<(String, Value)> {
        self.state().cdp.clone()
    }

    /// Last implicit wait set through the engine
    pub fn implicit_wait(&self) -> Option<Duration> {
        self.state().implicit_wait
    }

    /// Last window size set through the engine
    pub fn window_size(&self) -> Option<(u32, u32)> {
        self.state().window
    }

    /// Whether the window was maximized
    pub fn is_maximized(&self) -> bool {
        self.state().maximized
    }

    fn element(&self, id: &ElementId) -> Result<MockElement, Error> {
        self.state()
            .elements
            .get(id)
            .cloned()
            .ok_or_else(|| Error::webdriver("stale element reference", id.to_string()))
    }

    fn visit(state: &mut MockState, url: String) {
        let previous = std::mem::replace(&mut state.url, url);
        state.back_stack.push(previous);
        state.forward_stack.clear();
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutomationEngine for MockEngine {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn navigate(&self, url: &str) -> Result<(), Error> {
        Self::visit(&mut self.state(), url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String, Error> {
        Ok(self.state().url.clone())
    }

    async fn page_source(&self) -> Result<String, Error> {
        Ok(self.state().source.clone())
    }

    async fn title(&self) -> Result<String, Error> {
        Ok("Mock Page".to_string())
    }

    async fn back(&self) -> Result<(), Error> {
        let mut state = self.state();
        if let Some(previous) = state.back_stack.pop() {
            let current = std::mem::replace(&mut state.url, previous);
            state.forward_stack.push(current);
        }
        Ok(())
    }

    async fn forward(&self) -> Result<(), Error> {
        let mut state = self.state();
        if let Some(next) = state.forward_stack.pop() {
            let current = std::mem::replace(&mut state.url, next);
            state.back_stack.push(current);
        }
        Ok(())
    }

    async fn find_elements(&self, selector: &Selector<'_>) -> Result<Vec<ElementId>, Error> {
        let state = self.state();
        let key = Self::key(selector);
        if state.failing_queries.contains(&key) {
            return Err(Error::webdriver("unknown error", format!("query failed: {}", selector.value)));
        }
        Ok(state.queries.get(&key).cloned().unwrap_or_default())
    }

    async fn find_child_elements(
        &self,
        parent: &ElementId,
        selector: &Selector<'_>,
    ) -> Result<Vec<ElementId>, Error> {
        let state = self.state();
        if !state.elements.contains_key(parent) {
            return Err(Error::webdriver("stale element reference", parent.to_string()));
        }
        Ok(state
            .child_queries
            .get(&(parent.clone(), Self::key(selector)))
            .cloned()
            .unwrap_or_default())
    }

    async fn element_text(&self, element: &ElementId) -> Result<String, Error> {
        let el = self.element(element)?;
        if el.unreadable {
            return Err(Error::webdriver("stale element reference", element.to_string()));
        }
        Ok(el.text)
    }

    async fn element_attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>, Error> {
        Ok(self.element(element)?.attributes.get(name).cloned())
    }

    async fn element_click(&self, element: &ElementId) -> Result<(), Error> {
        let el = self.element(element)?;
        let mut state = self.state();
        state.clicks.push(element.clone());
        if let Some(target) = el.link_target {
            Self::visit(&mut state, target);
        }
        Ok(())
    }

    async fn element_clear(&self, element: &ElementId) -> Result<(), Error> {
        self.element(element)?;
        let mut state = self.state();
        state.cleared.push(element.clone());
        if let Some(el) = state.elements.get_mut(element) {
            el.attributes.insert("value".to_string(), String::new());
        }
        Ok(())
    }

    async fn element_send_keys(&self, element: &ElementId, text: &str) -> Result<(), Error> {
        self.element(element)?;
        let mut state = self.state();
        state.typed.push((element.clone(), text.to_string()));
        if let Some(el) = state.elements.get_mut(element) {
            el.attributes.entry("value".to_string()).or_default().push_str(text);
        }
        Ok(())
    }

    async fn element_displayed(&self, element: &ElementId) -> Result<bool, Error> {
        Ok(!self.element(element)?.hidden)
    }

    async fn screenshot(&self) -> Result<Vec<u8>, Error> {
        if self.state().fail_screenshot {
            return Err(Error::webdriver("unable to capture screen", "mock failure"));
        }
        Ok(MOCK_PNG.to_vec())
    }

    async fn execute_script(&self, script: &str, _args: Vec<Value>) -> Result<Value, Error> {
        self.state().scripts.push(script.to_string());
        Ok(Value::Null)
    }

    async fn execute_cdp(&self, command: &str, params: Value) -> Result<Value, Error> {
        self.state().cdp.push((command.to_string(), params));
        Ok(serde_json::json!({}))
    }

    async fn set_implicit_wait(&self, timeout: Duration) -> Result<(), Error> {
        self.state().implicit_wait = Some(timeout);
        Ok(())
    }

    async fn set_window_size(&self, width: u32, height: u32) -> Result<(), Error> {
        self.state().window = Some((width, height));
        Ok(())
    }

    async fn maximize_window(&self) -> Result<(), Error> {
        self.state().maximized = true;
        Ok(())
    }

    async fn quit(&self) -> Result<(), Error> {
        self.quit_count.fetch_add(1, Ordering::SeqCst);
        if self.state().fail_quit {
            return Err(Error::webdriver("unknown error", "browser already gone"));
        }
        Ok(())
    }
}
