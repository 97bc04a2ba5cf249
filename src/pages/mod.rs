//! # 页面抽象层
//!
//! 在元素访问层之上为 Discover 站点提供页面对象。页面操作从不向外传播错误，而是返回 `Outcome<T>`：
//! 完成（`Complete`）或降级为安全默认值并保留原因（`Degraded`）。
//!
//! ## 模块结构
//! - `discover`: Discover 页面（分类导航、搜索、电影列表、分页）
//! - `filter_panel`: 筛选面板（类型、类别、年份、评分）
//! - `movie`: 电影卡片解析与年份提取

pub mod discover;
pub mod filter_panel;
pub mod movie;

pub use crate::outcome::Outcome;
pub use discover::{Category, DiscoverPage, PaginationState};
pub use filter_panel::{FilterEffect, FilterPanel};
pub use movie::{extract_year, MovieCard};
