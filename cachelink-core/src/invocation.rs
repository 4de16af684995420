//! Invocation event and context types
//!
//! The hosting platform hands each handler an opaque event payload and an
//! invocation context. Handler bodies ignore both; they exist so entry points
//! keep the platform's calling convention.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque trigger payload. Shape is defined by the hosting platform and is
/// not inspected by any handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationEvent(pub serde_json::Value);

/// Per-invocation context passed alongside the event.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub deadline_ms: i64,
}

impl InvocationContext {
    pub fn new(function_name: impl Into<String>, timeout_ms: i64) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            function_name: function_name.into(),
            deadline_ms: chrono::Utc::now().timestamp_millis() + timeout_ms,
        }
    }

    /// Remaining time before the platform's invocation timeout.
    pub fn remaining_time_in_millis(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        (self.deadline_ms - now).max(0)
    }
}
