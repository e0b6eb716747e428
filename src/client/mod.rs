//! Consumer side of the API: typed calls, query caching, toasts and
//! open/closed UI state.

pub mod api;
pub mod cache;
pub mod disclosure;
pub mod notifications;

pub use api::{ApiClient, ClientError, ClientResult};
pub use cache::QueryCache;
pub use disclosure::Disclosure;
pub use notifications::{NewNotification, Notification, NotificationKind, NotificationStore};
