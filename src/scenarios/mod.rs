//! # 场景层
//!
//! 带标签（smoke / regression / negative）的测试场景。每个场景在独立会话中运行，调用页面对象，记录发现，并把结论写入报告。
//!
//! 目标站点本身不稳定，大多数场景以“记录现象”为主而不是严格断言；已知问题的场景失败时记为 SKIPPED（预期失败）。
//!
//! ## 模块结构
//! - `navigation`: 分类导航、直接 URL 访问、浏览器前进/后退
//! - `filters`: 搜索、类型/年份/评分筛选、电影卡片内容
//! - `pagination`: 分页导航与状态
//! - `known_issues`: 已知问题的记录场景
//! - `runner`: `SuiteRunner` 顺序执行并生成报告

pub mod navigation;
pub mod filters;
pub mod pagination;
pub mod known_issues;
pub mod runner;

pub use runner::SuiteRunner;

use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::session::Session;
use crate::Result;

/// Scenario selection tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tag {
    Smoke,
    Regression,
    Negative,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Tag::Smoke => "smoke",
            Tag::Regression => "regression",
            Tag::Negative => "negative",
        })
    }
}

/// How a scenario ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Ran to completion; carries the documented findings
    Passed(Vec<String>),
    /// Precondition not met on the live site
    Skipped(String),
}

/// Scenario body
pub type ScenarioFn = fn(Arc<Session>, Arc<Config>) -> BoxFuture<'static, Result<Verdict>>;

/// A named, tagged scenario
#[derive(Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub tags: &'static [Tag],
    /// Documented defect; a failure is then reported as an expected failure
    pub known_issue: Option<&'static str>,
    pub run: ScenarioFn,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("known_issue", &self.known_issue)
            .finish()
    }
}

impl Scenario {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Findings collected while a scenario runs
#[derive(Debug, Default)]
pub struct Findings {
    notes: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep one finding
    pub fn note<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        info!("{}", message);
        self.notes.push(message);
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn passed(self) -> Result<Verdict> {
        Ok(Verdict::Passed(self.notes))
    }
}

/// Pause so the page can react to the last action
pub(crate) async fn settle(config: &Config) {
    let delay = config.settle_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Every scenario, in run order
pub fn catalogue() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "test_navigation_categories",
            tags: &[Tag::Smoke],
            known_issue: None,
            run: |s, c| navigation::navigation_categories(s, c).boxed(),
        },
        Scenario {
            name: "test_search_functionality",
            tags: &[Tag::Regression],
            known_issue: None,
            run: |s, c| filters::search_functionality(s, c).boxed(),
        },
        Scenario {
            name: "test_type_filter",
            tags: &[Tag::Regression],
            known_issue: None,
            run: |s, c| filters::type_filter(s, c).boxed(),
        },
        Scenario {
            name: "test_year_filter",
            tags: &[],
            known_issue: None,
            run: |s, c| filters::year_filter(s, c).boxed(),
        },
        Scenario {
            name: "test_invalid_year_range",
            tags: &[Tag::Negative],
            known_issue: None,
            run: |s, c| filters::invalid_year_range(s, c).boxed(),
        },
        Scenario {
            name: "test_rating_filter",
            tags: &[Tag::Regression],
            known_issue: None,
            run: |s, c| filters::rating_filter(s, c).boxed(),
        },
        Scenario {
            name: "test_movie_card_elements",
            tags: &[],
            known_issue: None,
            run: |s, c| filters::movie_card_elements(s, c).boxed(),
        },
        Scenario {
            name: "test_pagination_navigation",
            tags: &[Tag::Smoke],
            known_issue: None,
            run: |s, c| pagination::pagination_navigation(s, c).boxed(),
        },
        Scenario {
            name: "test_pagination_state",
            tags: &[Tag::Regression],
            known_issue: None,
            run: |s, c| pagination::pagination_state(s, c).boxed(),
        },
        Scenario {
            name: "test_last_page_navigation",
            tags: &[Tag::Negative],
            known_issue: Some("Last pages may not work properly"),
            run: |s, c| pagination::last_page_navigation(s, c).boxed(),
        },
        Scenario {
            name: "test_direct_url_access",
            tags: &[Tag::Negative],
            known_issue: None,
            run: |s, c| navigation::direct_url_access(s, c).boxed(),
        },
        Scenario {
            name: "test_browser_back_forward",
            tags: &[],
            known_issue: None,
            run: |s, c| navigation::browser_back_forward(s, c).boxed(),
        },
        Scenario {
            name: "test_direct_url_access_issue",
            tags: &[],
            known_issue: Some("Direct URL access may not work"),
            run: |s, c| known_issues::direct_url_access_issue(s, c).boxed(),
        },
        Scenario {
            name: "test_year_filter_issue",
            tags: &[],
            known_issue: Some("Filter may not work correctly"),
            run: |s, c| known_issues::year_filter_issue(s, c).boxed(),
        },
        Scenario {
            name: "test_last_page_pagination_issue",
            tags: &[],
            known_issue: Some("Last pages may not function properly"),
            run: |s, c| known_issues::last_page_pagination_issue(s, c).boxed(),
        },
    ]
}

/// Scenarios carrying `tag`, or all of them
pub fn select(tag: Option<Tag>) -> Vec<Scenario> {
    catalogue()
        .into_iter()
        .filter(|scenario| tag.map_or(true, |tag| scenario.has_tag(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_names_are_unique() {
        let all = catalogue();
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_select_by_tag() {
        let smoke: Vec<_> = select(Some(Tag::Smoke)).into_iter().map(|s| s.name).collect();
        assert_eq!(
            smoke,
            vec!["test_navigation_categories", "test_pagination_navigation"]
        );

        let negative = select(Some(Tag::Negative));
        assert!(negative.iter().all(|s| s.has_tag(Tag::Negative)));
        assert!(negative.iter().any(|s| s.known_issue.is_some()));

        assert_eq!(select(None).len(), catalogue().len());
    }

    #[test]
    fn test_documented_issues_are_registered() {
        let issues: Vec<_> = catalogue()
            .into_iter()
            .filter(|s| s.known_issue.is_some())
            .map(|s| s.name)
            .collect();
        assert_eq!(
            issues,
            vec![
                "test_last_page_navigation",
                "test_direct_url_access_issue",
                "test_year_filter_issue",
                "test_last_page_pagination_issue",
            ]
        );
    }
}
