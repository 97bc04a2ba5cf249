//! Anti-automation-detection hardening
//!
//! Overrides the reported user agent and hides `navigator.webdriver` from page scripts.

use serde_json::json;
use tracing::{debug, warn};

use crate::session::{BrowserFamily, SessionConfig};
use crate::webdriver::AutomationEngine;

/// Script that hides the automation flag
pub const HIDE_WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Hardening steps that took effect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedHardening {
    pub user_agent: bool,
    pub webdriver_hidden: bool,
}

/// Apply post-launch hardening for `family`
///
/// Failures are logged and leave the corresponding flag unset; the session stays usable.
pub async fn apply(
    engine: &dyn AutomationEngine,
    family: BrowserFamily,
    config: &SessionConfig,
) -> AppliedHardening {
    let mut applied = AppliedHardening::default();

    if family != BrowserFamily::Chrome {
        // Firefox receives both settings as launch prefs; Safari supports neither.
        if family == BrowserFamily::Firefox && config.hide_automation {
            applied.webdriver_hidden = run_script(engine).await;
        }
        return applied;
    }

    if let Some(user_agent) = config.user_agent.as_deref().filter(|ua| !ua.is_empty()) {
        match engine
            .execute_cdp("Network.setUserAgentOverride", json!({ "userAgent": user_agent }))
            .await
        {
            Ok(_) => {
                debug!("User-Agent overridden: {}", user_agent);
                applied.user_agent = true;
            }
            Err(e) => warn!("Failed to override User-Agent: {}", e),
        }
    }

    if config.hide_automation {
        if let Err(e) = engine
            .execute_cdp(
                "Page.addScriptToEvaluateOnNewDocument",
                json!({ "source": HIDE_WEBDRIVER_SCRIPT }),
            )
            .await
        {
            warn!("Failed to register new-document script: {}", e);
        }
        applied.webdriver_hidden = run_script(engine).await;
    }

    applied
}

async fn run_script(engine: &dyn AutomationEngine) -> bool {
    match engine.execute_script(HIDE_WEBDRIVER_SCRIPT, Vec::new()).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Failed to hide navigator.webdriver: {}", e);
            false
        }
    }
}
