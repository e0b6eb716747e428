use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A notification before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Ordered, shared list of user-facing notifications.
///
/// Clones share the same underlying list. When an auto-dismiss delay is set
/// and a Tokio runtime is available, each added notification removes itself
/// after the delay.
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    items: Arc<Mutex<Vec<Notification>>>,
    auto_dismiss: Option<Duration>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_dismiss(delay: Duration) -> Self {
        Self {
            items: Arc::default(),
            auto_dismiss: Some(delay),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a notification and returns its freshly generated id.
    pub fn add(&self, new: NewNotification) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            title: new.title,
            message: new.message,
        };
        let id = notification.id.clone();
        self.lock().push(notification);

        if let Some(delay) = self.auto_dismiss {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let store = self.clone();
                    let dismiss_id = id.clone();
                    handle.spawn(async move {
                        tokio::time::sleep(delay).await;
                        store.dismiss(&dismiss_id);
                    });
                }
                Err(_) => {
                    tracing::debug!("No async runtime, notification {} stays until dismissed", id);
                }
            }
        }

        id
    }

    /// Removes the notification with `id`. Unknown ids are a no-op.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Snapshot in insertion order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order_and_unique_ids() {
        let store = NotificationStore::new();
        let first = store.add(NewNotification::success("Discussion Created"));
        let second = store.add(NewNotification::error("Request failed").with_message("boom"));

        assert_ne!(first, second);
        let items = store.notifications();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Discussion Created");
        assert_eq!(items[1].kind, NotificationKind::Error);
        assert_eq!(items[1].message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_dismiss_removes_only_matching_id() {
        let store = NotificationStore::new();
        let keep = store.add(NewNotification::success("kept"));
        let drop = store.add(NewNotification::success("dropped"));

        assert!(store.dismiss(&drop));
        assert!(!store.dismiss(&drop));
        assert!(!store.dismiss("unknown"));

        let items = store.notifications();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keep);
    }

    #[test]
    fn test_add_then_dismiss_restores_prior_state() {
        let store = NotificationStore::new();
        store.add(NewNotification::success("existing"));
        let before = store.notifications();

        let id = store.add(NewNotification::new(NotificationKind::Info, "transient"));
        store.dismiss(&id);

        assert_eq!(store.notifications(), before);
    }

    #[test]
    fn test_clear_empties_store() {
        let store = NotificationStore::new();
        store.add(NewNotification::success("a"));
        store.add(NewNotification::success("b"));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = NotificationStore::new();
        let other = store.clone();
        other.add(NewNotification::success("shared"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_auto_dismiss_without_runtime_keeps_notification() {
        let store = NotificationStore::with_auto_dismiss(Duration::from_millis(1));
        store.add(NewNotification::success("stays"));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_removes_after_delay() {
        let store = NotificationStore::with_auto_dismiss(Duration::from_secs(5));
        store.add(NewNotification::success("temporary"));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(store.len(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(store.is_empty());
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let notification = Notification {
            id: "n1".into(),
            kind: NotificationKind::Warning,
            title: "Heads up".into(),
            message: None,
        };
        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "warning");
        assert!(value.get("message").is_none());
    }
}
