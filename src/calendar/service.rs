//! The narrow contracts the calendar needs from a presentation backend.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use uuid::Uuid;

use super::requests::Request;

/// Which layout new calendar slides are cloned from.
///
/// A number is a position in the layouts of the deck's last master
/// (0 is the calendar layout of the stock template). Anything else is
/// matched against layout names and display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSelector {
    Index(usize),
    Name(String),
}

impl Default for LayoutSelector {
    fn default() -> Self {
        LayoutSelector::Index(0)
    }
}

impl FromStr for LayoutSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("Layout selector can not be empty"));
        }
        Ok(match s.parse::<usize>() {
            Ok(index) => LayoutSelector::Index(index),
            Err(_) => LayoutSelector::Name(s.to_string()),
        })
    }
}

impl fmt::Display for LayoutSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutSelector::Index(i) => write!(f, "layout #{}", i),
            LayoutSelector::Name(name) => write!(f, "layout \"{}\"", name),
        }
    }
}

#[async_trait]
pub trait SlideService: Send + Sync {
    /// Find the layout id for `layout`, failing if the deck has no such layout.
    async fn resolve_layout(&self, layout: &LayoutSelector) -> Result<String>;

    /// Create a new slide from a layout and return its page id.
    async fn new_page(&self, layout_id: &str) -> Result<String>;

    /// Apply one ordered batch of requests.
    async fn submit_batch(&self, requests: &[Request]) -> Result<()>;
}

/// Source of unique element ids.
pub trait ElementIds: Send {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidIds;

impl ElementIds for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable ids (`e_0001`, `e_0002`, ...) for previews and tests.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("e")
    }
}

impl ElementIds for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}_{:04}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Records batches instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct DryRunSlides {
    pages: AtomicUsize,
    batches: Mutex<Vec<Vec<Request>>>,
}

impl DryRunSlides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch submitted so far, in order.
    pub fn batches(&self) -> Vec<Vec<Request>> {
        self.batches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SlideService for DryRunSlides {
    async fn resolve_layout(&self, layout: &LayoutSelector) -> Result<String> {
        Ok(match layout {
            LayoutSelector::Index(i) => format!("layout_{}", i),
            LayoutSelector::Name(name) => name.clone(),
        })
    }

    async fn new_page(&self, _layout_id: &str) -> Result<String> {
        let n = self.pages.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("page_{:02}", n))
    }

    async fn submit_batch(&self, requests: &[Request]) -> Result<()> {
        self.batches
            .lock()
            .map_err(|_| anyhow!("Dry run batch log is poisoned"))?
            .push(requests.to_vec());
        Ok(())
    }
}
