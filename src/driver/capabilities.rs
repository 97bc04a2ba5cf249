//! W3C capabilities per browser family

use serde_json::{json, Value};

use crate::session::{BrowserFamily, SessionConfig};

/// Chrome arguments passed on every launch
const CHROME_BASE_ARGS: &[&str] = &["--no-sandbox", "--disable-dev-shm-usage", "--disable-gpu"];

/// Build the `alwaysMatch` capabilities for `family`
pub fn for_family(family: BrowserFamily, config: &SessionConfig) -> Value {
    match family {
        BrowserFamily::Chrome => chrome(config),
        BrowserFamily::Firefox => firefox(config),
        BrowserFamily::Safari => json!({ "browserName": "safari" }),
    }
}

fn chrome(config: &SessionConfig) -> Value {
    let mut args: Vec<String> = CHROME_BASE_ARGS.iter().map(|a| a.to_string()).collect();

    if config.headless {
        args.insert(0, "--headless=new".to_string());
    }
    args.push(format!(
        "--window-size={},{}",
        config.window_width, config.window_height
    ));

    let mut options = json!({ "args": args });

    if config.hide_automation {
        if let Some(list) = options["args"].as_array_mut() {
            list.push(json!("--disable-blink-features=AutomationControlled"));
        }
        options["excludeSwitches"] = json!(["enable-automation"]);
        options["useAutomationExtension"] = json!(false);
    }

    json!({
        "browserName": "chrome",
        "goog:chromeOptions": options,
    })
}

fn firefox(config: &SessionConfig) -> Value {
    let mut args = Vec::new();
    if config.headless {
        args.push("-headless".to_string());
    }
    args.push("-width".to_string());
    args.push(config.window_width.to_string());
    args.push("-height".to_string());
    args.push(config.window_height.to_string());

    let mut prefs = serde_json::Map::new();
    if config.hide_automation {
        prefs.insert("dom.webdriver.enabled".to_string(), json!(false));
    }
    if let Some(user_agent) = config.user_agent.as_deref().filter(|ua| !ua.is_empty()) {
        prefs.insert("general.useragent.override".to_string(), json!(user_agent));
    }

    json!({
        "browserName": "firefox",
        "moz:firefoxOptions": {
            "args": args,
            "prefs": prefs,
        },
    })
}
