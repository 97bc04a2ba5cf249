//! # 会话层
//!
//! 管理单个浏览器会话的生命周期：创建、配置、截图以及保证在所有退出路径上关闭浏览器。
//!
//! ## 主要功能
//! - **会话封装**: 独占持有一个自动化引擎句柄以及（本地启动时）驱动进程
//! - **启动配置**: 隐式等待、窗口尺寸、反自动化检测加固
//! - **作用域获取**: `Session::scoped` 在成功、失败和 panic 三种路径上都只关闭一次浏览器
//! - **截图**: 以 `{label}_{timestamp}.png` 命名写入截图目录
//!
//! ## 模块结构
//! - `options`: 浏览器类型与会话配置
//! - `browser`: `Session` 实现
//!
//! ## 使用示例
//! ```rust,no_run
//! use discover_qa::session::{BrowserFamily, Session};
//! use discover_qa::webdriver::MockEngine;
//! use std::sync::Arc;
//!
//! # async fn example() -> discover_qa::Result<()> {
//! let session = Session::new(Arc::new(MockEngine::new()), BrowserFamily::Chrome);
//!
//! let url = session
//!     .scoped(|session| async move {
//!         session.navigate("https://tmdb-discover.surge.sh/").await?;
//!         session.current_url().await
//!     })
//!     .await?;
//! println!("Visited {}", url);
//! # Ok(())
//! # }
//! ```

pub mod options;
pub mod browser;

pub use options::{BrowserFamily, SessionConfig};
pub use browser::Session;
