pub mod auth;
pub mod comment_service;
pub mod discussion_service;
pub mod session_service;
pub mod team_service;
pub mod user_service;

pub use auth::AuthService;
pub use comment_service::CommentService;
pub use discussion_service::DiscussionService;
pub use session_service::SessionService;
pub use team_service::TeamService;
pub use user_service::UserService;
