//! Tools and integrations the assistant can call on

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Active,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub status: IntegrationStatus,
    pub last_used: Option<DateTime<Utc>>,
}

impl Integration {
    /// Status badge, if one should be shown.
    ///
    /// Errors are always surfaced; the other states only while enabled.
    pub fn badge(&self) -> Option<&'static str> {
        match (self.status, self.enabled) {
            (IntegrationStatus::Error, _) => Some("Error"),
            (IntegrationStatus::Active, true) => Some("Active"),
            (IntegrationStatus::Warning, true) => Some("Needs attention"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Integration>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Integration>) -> Self {
        Self { tools }
    }

    pub fn sample() -> Self {
        let tool = |id: &str, name: &str, description: &str, enabled, status, last_used: Option<(u32, u32, u32, u32)>| {
            Integration {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                enabled,
                status,
                last_used: last_used
                    .and_then(|(mo, d, h, mi)| Utc.with_ymd_and_hms(2023, mo, d, h, mi, 0).single()),
            }
        };

        Self::new(vec![
            tool("weather", "Weather (Tomorrow.io)", "Access real-time weather data and forecasts", true, IntegrationStatus::Active, Some((10, 15, 10, 30))),
            tool("perplexity", "Perplexity Search", "Advanced web search with summarization", true, IntegrationStatus::Active, Some((10, 14, 16, 45))),
            tool("clickup", "ClickUp Integration", "Task management and project organization", true, IntegrationStatus::Active, Some((10, 13, 9, 15))),
            tool("slack", "Slack", "Send and receive messages from Slack workspace", true, IntegrationStatus::Warning, Some((10, 12, 14, 20))),
            tool("twilio", "Twilio", "Send SMS and make voice calls", false, IntegrationStatus::Error, None),
            tool("youtube", "YouTube Playlisting", "Create and manage YouTube playlists", true, IntegrationStatus::Active, Some((10, 10, 19, 30))),
        ])
    }

    pub fn all(&self) -> &[Integration] {
        &self.tools
    }

    pub fn get(&self, id: &str) -> Option<&Integration> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Flip a tool on or off. Returns the new state, or None for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let tool = self.tools.iter_mut().find(|t| t.id == id)?;
        tool.enabled = !tool.enabled;
        Some(tool.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.tools.iter().filter(|t| t.enabled).count()
    }
}
