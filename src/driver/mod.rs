//! # 驱动提供层
//!
//! 负责找到可用的浏览器驱动并建立会话。按固定顺序尝试多种获取策略，全部失败时返回包含每次尝试原因的结构化错误。
//!
//! ## 获取策略（按顺序）
//! 1. **system-path**: `PATH` 中的 `chromedriver`
//! 2. **well-known-locations**: 常见安装位置以及配置的额外路径
//! 3. **downloaded-driver**: 下载固定版本的 Chrome-for-Testing 驱动并缓存
//! 4. **alternate-browser**: Safari（仅 macOS）然后 Firefox
//! 5. **remote-endpoint**: 向已运行的 WebDriver 端点请求会话
//!
//! ## 模块结构
//! - `traits`: `AcquireStrategy` trait 定义
//! - `capabilities`: 各浏览器的 W3C capabilities
//! - `service`: 本地驱动进程管理
//! - `download`: 驱动下载、解压与缓存
//! - `strategies`: 内置获取策略
//! - `provider`: `SessionProvider` 按顺序回退
//!
//! ## 使用示例
//! ```rust,no_run
//! use discover_qa::config::Config;
//! use discover_qa::driver::SessionProvider;
//!
//! # async fn example() -> discover_qa::Result<()> {
//! let provider = SessionProvider::from_config(&Config::default());
//! let title = provider
//!     .with_session(|session| async move {
//!         session.navigate("https://tmdb-discover.surge.sh/").await?;
//!         session.title().await
//!     })
//!     .await?;
//! println!("{}", title);
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod capabilities;
pub mod service;
pub mod download;
pub mod strategies;
pub mod provider;

pub use traits::AcquireStrategy;
pub use service::DriverService;
pub use download::DriverDownload;
pub use strategies::{
    AlternateBrowser, DownloadedDriver, RemoteEndpoint, SystemPathDriver, WellKnownLocations,
};
pub use provider::SessionProvider;
