//! # 元素访问层
//!
//! 为页面抽象提供“等待并获取”语义：在显式等待时间内轮询查找元素，并把超时转换为类型化的结果。
//!
//! ## 主要功能
//! - **单元素查找**: `find_required` 超时返回 `Error::ElementNotFound`
//! - **多元素查找**: `find_all` 从不报错，超时降级为空列表
//! - **交互**: 点击、清空后输入、读取文本、可见性判断
//! - **截图**: 失败时记录日志并返回 `None`
//!
//! ## 模块结构
//! - `locator`: 定位器（CSS / XPath / id / class）
//! - `handle`: 绑定到会话的元素句柄
//! - `access`: 等待配置与 `ElementAccess`

pub mod locator;
pub mod handle;
pub mod access;

pub use locator::{Locator, Strategy};
pub use handle::Element;
pub use access::{ElementAccess, WaitConfig};
