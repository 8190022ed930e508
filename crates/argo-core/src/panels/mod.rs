//! Dashboard panels
//!
//! Each panel owns a small in-memory model seeded with sample data. Nothing
//! here is persisted; edits last for the life of the process.

pub mod memory;
pub mod sentinel;
pub mod tools;

pub use memory::{MemoryFilter, MemoryItem, MemoryKind, MemoryTimeline};
pub use sentinel::{ConnectedService, DataCategory, PrivacyControls, Sensitivity, Sentinel, ServiceStatus};
pub use tools::{Integration, IntegrationStatus, ToolRegistry};

/// Badges shown in the chat header
pub fn header_badges() -> [(&'static str, &'static str); 3] {
    [
        ("Memory", "ON"),
        ("Location", "Jersey City"),
        ("Mode", "Assistant"),
    ]
}
