//! URL pattern routing for page and click events.
//!
//! A pattern is a full URL template such as
//! `https://farmrpg.com/worker.php?go=explore&id=*`:
//!
//! - scheme, host and path are matched literally; a trailing `*` on the
//!   path matches any remaining characters,
//! - each declared query key must be present with exactly the declared
//!   value, or any value starting with the text before a trailing `*`,
//! - a bare `?*` accepts any query, and undeclared query keys are ignored.
//!
//! Patterns that could both match one URL are rejected at registration.

use std::collections::HashMap;

use url::Url;

use crate::engine::state::TrackerState;
use crate::error::{Result, TrackerError};

pub type PageHandler = Box<dyn Fn(&mut TrackerState, &str, &Url) -> Result<()> + Send + Sync>;
pub type ClickHandler = Box<dyn Fn(&mut TrackerState, &str, &str) -> Result<()> + Send + Sync>;

/// Literal text, or a prefix when the template ended in `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Exact(String),
    Prefix(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix('*') {
            Some(prefix) => Segment::Prefix(prefix.to_string()),
            None => Segment::Exact(raw.to_string()),
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Exact(exact) => value == exact,
            Segment::Prefix(prefix) => value.starts_with(prefix.as_str()),
        }
    }

    /// Whether some string satisfies both segments.
    fn intersects(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Exact(a), Segment::Exact(b)) => a == b,
            (Segment::Exact(e), Segment::Prefix(p)) | (Segment::Prefix(p), Segment::Exact(e)) => {
                e.starts_with(p.as_str())
            }
            (Segment::Prefix(a), Segment::Prefix(b)) => {
                a.starts_with(b.as_str()) || b.starts_with(a.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryRule {
    Any,
    Params(Vec<(String, Segment)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    raw: String,
    origin: String,
    path: Segment,
    query: QueryRule,
}

impl UrlPattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: String| TrackerError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        let (base, query) = match raw.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (raw, None),
        };

        let wildcard_path = base.ends_with('*');
        let base_url = Url::parse(base.trim_end_matches('*')).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }
        let origin = base_url.origin().ascii_serialization();
        let path = if wildcard_path {
            Segment::Prefix(base_url.path().to_string())
        } else {
            Segment::Exact(base_url.path().to_string())
        };

        let query = match query {
            None => QueryRule::Params(Vec::new()),
            Some("*") => QueryRule::Any,
            Some(q) => {
                let mut params: Vec<(String, Segment)> = Vec::new();
                for pair in q.split('&') {
                    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                    if key.is_empty() {
                        return Err(invalid(format!("empty query key in {:?}", pair)));
                    }
                    if params.iter().any(|(k, _)| k == key) {
                        return Err(invalid(format!("query key {:?} declared twice", key)));
                    }
                    params.push((key.to_string(), Segment::parse(value)));
                }
                QueryRule::Params(params)
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            origin,
            path,
            query,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, url: &Url) -> bool {
        if url.origin().ascii_serialization() != self.origin || !self.path.matches(url.path()) {
            return false;
        }
        match &self.query {
            QueryRule::Any => true,
            QueryRule::Params(params) => params.iter().all(|(key, rule)| {
                url.query_pairs()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| rule.matches(&v))
                    .unwrap_or(false)
            }),
        }
    }

    /// Whether some URL would match both patterns.
    pub fn overlaps(&self, other: &UrlPattern) -> bool {
        if self.origin != other.origin || !self.path.intersects(&other.path) {
            return false;
        }
        match (&self.query, &other.query) {
            (QueryRule::Any, _) | (_, QueryRule::Any) => true,
            (QueryRule::Params(a), QueryRule::Params(b)) => a.iter().all(|(key, rule)| {
                b.iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, other_rule)| rule.intersects(other_rule))
                    .unwrap_or(true)
            }),
        }
    }
}

struct Route {
    pattern: UrlPattern,
    handler: PageHandler,
}

/// Page-event router: the first registered pattern matching the URL wins.
#[derive(Default)]
pub struct PageRouter {
    routes: Vec<Route>,
}

impl PageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, pattern: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut TrackerState, &str, &Url) -> Result<()> + Send + Sync + 'static,
    {
        let pattern = UrlPattern::parse(pattern)?;
        if let Some(existing) = self.routes.iter().find(|r| r.pattern.overlaps(&pattern)) {
            return Err(TrackerError::OverlappingPattern {
                pattern: pattern.raw,
                existing: existing.pattern.raw.clone(),
            });
        }
        log::debug!("Route registered: {}", pattern.raw);
        self.routes.push(Route {
            pattern,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Route one event. `Ok(false)` when no pattern matched.
    pub fn dispatch(&self, state: &mut TrackerState, url: &str, content: &str) -> Result<bool> {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                log::debug!("Dispatch skipped unparseable url {:?}: {}", url, e);
                return Ok(false);
            }
        };
        match self.routes.iter().find(|r| r.pattern.matches(&parsed)) {
            Some(route) => {
                log::debug!("Dispatch {} -> {}", url, route.pattern.raw);
                (route.handler)(state, content, &parsed)?;
                Ok(true)
            }
            None => {
                log::debug!("Dispatch miss: {}", url);
                Ok(false)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Routes sidebar activations tagged `"<namespace>:<arg>"`.
#[derive(Default)]
pub struct ClickRouter {
    handlers: HashMap<String, ClickHandler>,
}

impl ClickRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, namespace: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut TrackerState, &str, &str) -> Result<()> + Send + Sync + 'static,
    {
        if self.handlers.contains_key(namespace) {
            return Err(TrackerError::DuplicateClickNamespace(namespace.to_string()));
        }
        self.handlers.insert(namespace.to_string(), Box::new(handler));
        Ok(())
    }

    /// `Ok(false)` when no handler owns the namespace.
    pub fn dispatch(&self, state: &mut TrackerState, target: &str) -> Result<bool> {
        let (namespace, arg) = target.split_once(':').unwrap_or((target, ""));
        match self.handlers.get(namespace) {
            Some(handler) => {
                handler(state, namespace, arg)?;
                Ok(true)
            }
            None => {
                log::debug!("Click miss: {}", target);
                Ok(false)
            }
        }
    }
}
