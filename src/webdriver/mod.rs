//! # WebDriver 引擎层
//!
//! 通过 W3C WebDriver 协议驱动浏览器，是会话层和元素访问层之下的自动化引擎抽象。
//!
//! ## 主要功能
//! - **会话控制**: 创建会话、导航、历史前进/后退、结束会话
//! - **元素操作**: 查询、点击、输入、读取文本与属性、可见性判断
//! - **截图功能**: 捕获当前视口为 PNG
//! - **脚本执行**: 执行页面脚本以及 Chromium 的 CDP 命令
//!
//! ## 模块结构
//! - `traits`: `AutomationEngine` trait 定义
//! - `types`: W3C 协议相关的数据类型
//! - `client`: 基于 HTTP 的 WebDriver 客户端实现
//! - `mock`: 用于测试的内存 DOM 实现
//!
//! ## 使用示例
//! ```rust,no_run
//! use discover_qa::webdriver::{AutomationEngine, Selector, WebDriverClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WebDriverClient::new_session(
//!     "http://127.0.0.1:9515",
//!     serde_json::json!({ "browserName": "chrome" }),
//! ).await?;
//!
//! client.navigate("https://tmdb-discover.surge.sh/").await?;
//! let titles = client.find_elements(&Selector::css("p.text-blue-500")).await?;
//! println!("Found {} titles", titles.len());
//! client.quit().await?;
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod types;
pub mod client;
pub mod mock;

pub use traits::AutomationEngine;
pub use types::{ElementId, Selector, ELEMENT_KEY};

pub use client::WebDriverClient;

// Re-export mock for development/testing
pub use mock::{MockElement, MockEngine};
