//! UI collaborator traits — notifications, confirmation, navigation.
//!
//! The engines never own UI state. Screens inject these references at
//! engine construction; the engine treats every call as fire-and-forget
//! except [`Notifier::confirm_delete`], whose resolved boolean gates the
//! delete operation.

use async_trait::async_trait;

/// Toast notifications and the typed delete confirmation dialog.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn success(&self, message: &str);
    async fn error(&self, message: &str);
    async fn warning(&self, message: &str);

    /// Ask the user to confirm deletion of the labelled item.
    async fn confirm_delete(&self, label: &str) -> bool;
}

/// Route navigation, invoked after successful save/cancel and after a
/// failed entity load in edit mode.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: &str);
}
