//! Element locators
//!
//! A locator is an immutable (strategy, expression) pair. Page abstractions
//! declare theirs as `const` items; dynamic ones are built at runtime.

use std::borrow::Cow;

use crate::webdriver::Selector;

/// How a locator expression is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Css,
    XPath,
    Id,
    ClassName,
}

impl Strategy {
    fn label(&self) -> &'static str {
        match self {
            Strategy::Css => "css",
            Strategy::XPath => "xpath",
            Strategy::Id => "id",
            Strategy::ClassName => "class",
        }
    }
}

/// Identifies DOM nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    expression: Cow<'static, str>,
}

impl Locator {
    pub const fn css(expression: &'static str) -> Self {
        Self::fixed(Strategy::Css, expression)
    }

    pub const fn xpath(expression: &'static str) -> Self {
        Self::fixed(Strategy::XPath, expression)
    }

    pub const fn id(expression: &'static str) -> Self {
        Self::fixed(Strategy::Id, expression)
    }

    pub const fn class_name(expression: &'static str) -> Self {
        Self::fixed(Strategy::ClassName, expression)
    }

    const fn fixed(strategy: Strategy, expression: &'static str) -> Self {
        Self {
            strategy,
            expression: Cow::Borrowed(expression),
        }
    }

    /// Locator built from a runtime expression
    pub fn dynamic<S: Into<String>>(strategy: Strategy, expression: S) -> Self {
        Self {
            strategy,
            expression: Cow::Owned(expression.into()),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Wire selector; id and class name become CSS
    pub fn selector(&self) -> Selector<'_> {
        match self.strategy {
            Strategy::Css => Selector::css(self.expression.as_ref()),
            Strategy::XPath => Selector::xpath(self.expression.as_ref()),
            Strategy::Id => Selector::css(format!("#{}", self.expression)),
            Strategy::ClassName => Selector::css(format!(".{}", self.expression)),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy.label(), self.expression)
    }
}
