// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Route classification
//!
//! Maps a request URL to the symbolic routes it matches. Patterns are
//! regular expressions over the full URL and are case-sensitive.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Named endpoint category of the upstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Account balance; always carries the skey header
    Balance,
    /// Reading statistics detail
    ReadDataDetail,
    /// Notebook listing
    UserNotebooks,
    /// Chapter infos, bookmark list, book info, read progress
    BookApi,
    /// Review listing
    ReviewList,
}

impl Route {
    /// All routes in classification order
    pub const ALL: [Route; 5] = [
        Route::Balance,
        Route::ReadDataDetail,
        Route::UserNotebooks,
        Route::BookApi,
        Route::ReviewList,
    ];

    /// Built-in URL pattern for this route
    pub fn default_pattern(&self) -> &'static str {
        match self {
            Route::Balance => r"/pay/balance",
            Route::ReadDataDetail => r"/readdata/detail",
            Route::UserNotebooks => r"/user/notebooks",
            Route::BookApi => r"/book/(chapterInfos|bookmarklist|info|readinfo)",
            Route::ReviewList => r"/review/list",
        }
    }

    /// Stable name for logs and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Balance => "balance",
            Route::ReadDataDetail => "read_data_detail",
            Route::UserNotebooks => "user_notebooks",
            Route::BookApi => "book_api",
            Route::ReviewList => "review_list",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routes matched by one URL; empty means "none"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// The empty ("none") classification
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from a list of routes
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut set = Self::none();
        for route in routes {
            set.insert(route);
        }
        set
    }

    fn insert(&mut self, route: Route) {
        if !self.routes.contains(&route) {
            self.routes.push(route);
        }
    }

    /// Check if nothing matched
    pub fn is_none(&self) -> bool {
        self.routes.is_empty()
    }

    /// Check membership
    pub fn contains(&self, route: Route) -> bool {
        self.routes.contains(&route)
    }

    /// Check if any of `routes` matched
    pub fn contains_any(&self, routes: &[Route]) -> bool {
        routes.iter().any(|r| self.contains(*r))
    }

    /// Iterate matched routes in classification order
    pub fn iter(&self) -> impl Iterator<Item = Route> + '_ {
        self.routes.iter().copied()
    }

    /// Number of matched routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if nothing matched
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Display for RouteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.routes.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.routes.iter().map(Route::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// One route and the pattern that selects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    pub route: Route,
    pub pattern: String,
}

impl RoutePattern {
    /// Create a route pattern
    pub fn new(route: Route, pattern: impl Into<String>) -> Self {
        Self {
            route,
            pattern: pattern.into(),
        }
    }

    /// Built-in patterns for every route
    pub fn defaults() -> Vec<RoutePattern> {
        Route::ALL
            .iter()
            .map(|r| RoutePattern::new(*r, r.default_pattern()))
            .collect()
    }
}

/// Compiled URL classifier
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    table: Vec<(Route, Regex)>,
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self {
            table: Route::ALL
                .iter()
                .filter_map(|r| Regex::new(r.default_pattern()).ok().map(|re| (*r, re)))
                .collect(),
        }
    }
}

impl RouteClassifier {
    /// Compile a classifier from route patterns
    pub fn new(patterns: &[RoutePattern]) -> Result<Self> {
        let mut table = Vec::with_capacity(patterns.len());
        for p in patterns {
            table.push((p.route, Regex::new(&p.pattern)?));
        }
        Ok(Self { table })
    }

    /// Classify a URL. No side effects; an unmatched URL yields an empty set.
    pub fn classify(&self, url: &str) -> RouteSet {
        RouteSet::from_routes(
            self.table
                .iter()
                .filter(|(_, re)| re.is_match(url))
                .map(|(route, _)| *route),
        )
    }
}
