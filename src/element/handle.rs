//! Element handle bound to a session

use crate::session::Session;
use crate::webdriver::ElementId;
use crate::Result;

use super::locator::Locator;

/// A located DOM node; cannot outlive the session it came from
#[derive(Debug, Clone)]
pub struct Element<'s> {
    session: &'s Session,
    id: ElementId,
}

impl<'s> Element<'s> {
    pub fn new(session: &'s Session, id: ElementId) -> Self {
        Self { session, id }
    }

    /// Engine reference
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Rendered text
    pub async fn text(&self) -> Result<String> {
        self.session.engine().element_text(&self.id).await
    }

    /// Attribute value, `None` when absent
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.session.engine().element_attribute(&self.id, name).await
    }

    pub async fn click(&self) -> Result<()> {
        self.session.engine().element_click(&self.id).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.session.engine().element_clear(&self.id).await
    }

    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.session.engine().element_send_keys(&self.id, text).await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.session.engine().element_displayed(&self.id).await
    }

    /// Descendants matching `locator`, without waiting
    pub async fn find_all(&self, locator: &Locator) -> Result<Vec<Element<'s>>> {
        let ids = self
            .session
            .engine()
            .find_child_elements(&self.id, &locator.selector())
            .await?;

        Ok(ids
            .into_iter()
            .map(|id| Element::new(self.session, id))
            .collect())
    }
}
