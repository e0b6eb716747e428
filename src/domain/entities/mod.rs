pub mod comment;
pub mod discussion;
pub mod session;
pub mod team;
pub mod user;

pub use comment::*;
pub use discussion::*;
pub use session::*;
pub use team::*;
pub use user::*;

/// RFC 3339 UTC with fixed microsecond precision so stored values sort lexically.
pub(crate) fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
