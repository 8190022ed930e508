//! Memory timeline - past interactions grouped by kind

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Query,
    Task,
    Conversation,
}

impl MemoryKind {
    pub fn label(&self) -> &'static str {
        match self {
            MemoryKind::Query => "Query",
            MemoryKind::Task => "Task",
            MemoryKind::Conversation => "Conversation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MemoryKind,
}

/// Which slice of the timeline is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryFilter {
    #[default]
    All,
    Queries,
    Tasks,
    Conversations,
}

impl MemoryFilter {
    pub const ALL: [MemoryFilter; 4] = [
        MemoryFilter::All,
        MemoryFilter::Queries,
        MemoryFilter::Tasks,
        MemoryFilter::Conversations,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MemoryFilter::All => "All Memories",
            MemoryFilter::Queries => "Queries",
            MemoryFilter::Tasks => "Tasks",
            MemoryFilter::Conversations => "Conversations",
        }
    }

    pub fn matches(&self, kind: MemoryKind) -> bool {
        match self {
            MemoryFilter::All => true,
            MemoryFilter::Queries => kind == MemoryKind::Query,
            MemoryFilter::Tasks => kind == MemoryKind::Task,
            MemoryFilter::Conversations => kind == MemoryKind::Conversation,
        }
    }

    /// Next tab, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTimeline {
    items: Vec<MemoryItem>,
}

impl MemoryTimeline {
    pub fn new(items: Vec<MemoryItem>) -> Self {
        Self { items }
    }

    /// The timeline shipped with the dashboard
    pub fn sample() -> Self {
        let item = |id: &str, title: &str, snippet: &str, (y, mo, d, h, mi): (i32, u32, u32, u32, u32), kind| {
            MemoryItem {
                id: id.to_string(),
                title: title.to_string(),
                snippet: snippet.to_string(),
                timestamp: Utc
                    .with_ymd_and_hms(y, mo, d, h, mi, 0)
                    .single()
                    .unwrap_or_default(),
                kind,
            }
        };

        Self::new(vec![
            item(
                "1",
                "Weather forecast for the week",
                "You asked for the weather forecast in Jersey City for the upcoming week.",
                (2023, 10, 15, 10, 30),
                MemoryKind::Query,
            ),
            item(
                "2",
                "Meeting preparation with Product team",
                "Prepared agenda and key points for the Product team meeting on Thursday.",
                (2023, 10, 14, 15, 45),
                MemoryKind::Task,
            ),
            item(
                "3",
                "Research on AI deployment options",
                "We discussed various hosting options for deploying the AI model, including Railway and Cloudflare Workers.",
                (2023, 10, 13, 9, 15),
                MemoryKind::Conversation,
            ),
            item(
                "4",
                "Email template for client outreach",
                "Created an email template for reaching out to potential clients about the new service offering.",
                (2023, 10, 12, 17, 20),
                MemoryKind::Task,
            ),
            item(
                "5",
                "Stock market updates",
                "You asked for updates on the tech stock market, focusing on AI companies.",
                (2023, 10, 11, 11, 5),
                MemoryKind::Query,
            ),
        ])
    }

    /// Items matching `filter`, newest first
    pub fn list(&self, filter: MemoryFilter) -> Vec<&MemoryItem> {
        let mut items: Vec<&MemoryItem> = self
            .items
            .iter()
            .filter(|m| filter.matches(m.kind))
            .collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
    }

    /// Delete a memory. Returns false if no item has that id.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        self.items.len() != before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
