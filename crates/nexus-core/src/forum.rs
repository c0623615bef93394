//! Forum content: categories, threads, posts and community stats.
//!
//! Content is static. The built-in set is embedded from
//! `default_forum.toml`; a configured file with the same shape replaces it.
//! Replies and threads added at runtime live in memory only.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::widgets::forms::ThreadForm;
use crate::widgets::tabs::ThreadFilter;

/// Queries this short or shorter do not search.
pub const MIN_SEARCH_LEN: usize = 2;

fn default_forum_template() -> &'static str {
    include_str!("../default_forum.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub members: u64,
    pub threads: u64,
    pub posts: u64,
    pub online: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub threads: u64,
    #[serde(default)]
    pub posts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub language: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub author: String,
    #[serde(default)]
    pub author_title: String,
    pub body: String,
    #[serde(default)]
    pub code: Option<CodeBlock>,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub minutes_ago: i64,
}

impl Post {
    pub fn posted_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::minutes(self.minutes_ago)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub minutes_ago: i64,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl Thread {
    pub fn author(&self) -> &str {
        self.posts.first().map_or("unknown", |p| p.author.as_str())
    }

    /// Posts after the opening one.
    pub fn reply_count(&self) -> usize {
        self.posts.len().saturating_sub(1)
    }

    pub fn created_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::minutes(self.minutes_ago)
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forum {
    pub stats: Stats,
    pub categories: Vec<Category>,
    pub threads: Vec<Thread>,
}

impl Forum {
    /// Parses the embedded content.
    pub fn builtin() -> Result<Self> {
        toml::from_str(default_forum_template()).context("Failed to parse built-in forum content")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read forum content from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse forum content from {}", path.display()))
    }

    /// Loads `path` when given, otherwise the built-in content.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::builtin(),
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    /// Case-insensitive title/tag search; short queries return nothing.
    pub fn search(&self, query: &str) -> Vec<&Thread> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() <= MIN_SEARCH_LEN {
            return Vec::new();
        }
        self.threads.iter().filter(|t| t.matches(&needle)).collect()
    }

    /// Threads as listed under `filter`. Pinned threads lead the `All` view.
    pub fn filtered(&self, filter: ThreadFilter) -> Vec<&Thread> {
        let mut threads: Vec<&Thread> = self.threads.iter().collect();
        match filter {
            ThreadFilter::All => threads.sort_by_key(|t| !t.pinned),
            ThreadFilter::Latest => threads.sort_by_key(|t| t.minutes_ago),
            ThreadFilter::Popular => threads.sort_by(|a, b| b.votes.cmp(&a.votes)),
            ThreadFilter::Unanswered => threads.retain(|t| t.reply_count() == 0),
        }
        threads
    }

    /// Appends a reply from the local user. Returns `None` for unknown threads.
    pub fn add_reply(&mut self, thread_id: &str, body: &str) -> Option<&Post> {
        let thread = self.threads.iter_mut().find(|t| t.id == thread_id)?;
        thread.posts.push(Post {
            author: "You".to_string(),
            author_title: "New Member".to_string(),
            body: body.trim().to_string(),
            code: None,
            votes: 0,
            minutes_ago: 0,
        });
        self.stats.posts += 1;
        thread.posts.last()
    }

    /// Creates a thread from a submitted form and returns its id.
    ///
    /// Unknown or empty categories fall back to the first category.
    pub fn add_thread(&mut self, form: &ThreadForm) -> String {
        let category = if self.category(form.category.trim()).is_some() {
            form.category.trim().to_string()
        } else {
            self.categories
                .first()
                .map(|c| c.id.clone())
                .unwrap_or_default()
        };

        let id = self.unique_id(&slugify(&form.title));
        let body = form.body.trim();
        self.threads.insert(
            0,
            Thread {
                id: id.clone(),
                title: form.title.trim().to_string(),
                category,
                tags: form.tag_list(),
                views: 0,
                votes: 0,
                minutes_ago: 0,
                pinned: false,
                posts: vec![Post {
                    author: "You".to_string(),
                    author_title: "New Member".to_string(),
                    body: if body.is_empty() {
                        form.title.trim().to_string()
                    } else {
                        body.to_string()
                    },
                    code: None,
                    votes: 0,
                    minutes_ago: 0,
                }],
            },
        );
        self.stats.threads += 1;
        self.stats.posts += 1;
        id
    }

    fn unique_id(&self, base: &str) -> String {
        let base = if base.is_empty() { "thread" } else { base };
        if self.thread(base).is_none() {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| self.thread(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
