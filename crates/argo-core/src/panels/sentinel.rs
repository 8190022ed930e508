//! Sentinel - data, privacy, and connected-service controls

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    High,
    Medium,
    Low,
}

impl Sensitivity {
    pub fn label(&self) -> &'static str {
        match self {
            Sensitivity::High => "High sensitivity",
            Sensitivity::Medium => "Medium sensitivity",
            Sensitivity::Low => "Low sensitivity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCategory {
    pub name: String,
    pub count: u32,
    pub sensitivity: Sensitivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Connected,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedService {
    pub name: String,
    pub status: ServiceStatus,
    pub last_sync: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyControls {
    /// 0..=100
    pub protection_level: u8,
    pub memory_retention_days: u32,
    /// Scrambles memory and data connections while on
    pub smoke_shield: bool,
    pub end_to_end_encryption: bool,
}

impl Default for PrivacyControls {
    fn default() -> Self {
        Self {
            protection_level: 70,
            memory_retention_days: 30,
            smoke_shield: false,
            end_to_end_encryption: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sentinel {
    pub categories: Vec<DataCategory>,
    pub services: Vec<ConnectedService>,
    pub privacy: PrivacyControls,
}

impl Sentinel {
    pub fn sample() -> Self {
        let category = |name: &str, count, sensitivity| DataCategory {
            name: name.to_string(),
            count,
            sensitivity,
        };
        let service = |name: &str, last_sync: &str| ConnectedService {
            name: name.to_string(),
            status: ServiceStatus::Connected,
            last_sync: last_sync.to_string(),
        };

        Self {
            categories: vec![
                category("Personal Information", 16, Sensitivity::High),
                category("Browsing History", 45, Sensitivity::Medium),
                category("App Usage Data", 23, Sensitivity::Low),
                category("Connected Services", 8, Sensitivity::Medium),
                category("Calendar Events", 37, Sensitivity::Low),
            ],
            services: vec![
                service("Supabase", "2 minutes ago"),
                service("n8n", "15 minutes ago"),
                service("Cloudflare", "1 hour ago"),
                service("ClickUp", "3 hours ago"),
                service("Railway", "1 day ago"),
            ],
            privacy: PrivacyControls::default(),
        }
    }

    /// Flip Smoke Shield. Returns the new state.
    pub fn toggle_smoke_shield(&mut self) -> bool {
        self.privacy.smoke_shield = !self.privacy.smoke_shield;
        self.privacy.smoke_shield
    }

    /// Move the protection level by `delta`, clamped to 0..=100
    pub fn adjust_protection(&mut self, delta: i16) -> u8 {
        let level = i16::from(self.privacy.protection_level)
            .saturating_add(delta)
            .clamp(0, 100);
        self.privacy.protection_level = level as u8;
        self.privacy.protection_level
    }

    /// Total entries across categories of the given sensitivity
    pub fn entries_at(&self, sensitivity: Sensitivity) -> u32 {
        self.categories
            .iter()
            .filter(|c| c.sensitivity == sensitivity)
            .map(|c| c.count)
            .sum()
    }
}
