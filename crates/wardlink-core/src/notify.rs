//! # Notification Collaborator Interface
//!
//! The push-notification sender is an external system. This crate defines
//! only the seam: a target guardian account, a title, a body, and a
//! structured data payload. Every call site wraps dispatch in its own
//! best-effort boundary; a failed push never fails a primary operation.

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::identity::GuardianId;

/// Push-notification sender.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatch one notification to the guardian's registered devices.
    async fn push(
        &self,
        guardian_id: GuardianId,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<(), NotifyError>;
}

/// Notifier used when no push transport is configured. Logs and drops.
#[derive(Debug, Clone, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn push(
        &self,
        guardian_id: GuardianId,
        title: &str,
        _body: &str,
        _data: serde_json::Value,
    ) -> Result<(), NotifyError> {
        tracing::debug!(guardian_id = %guardian_id, title = title, "push transport not configured, dropping notification");
        Ok(())
    }
}
