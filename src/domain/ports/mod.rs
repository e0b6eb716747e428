pub mod comment_repository;
pub mod discussion_repository;
pub mod session_repository;
pub mod team_repository;
pub mod user_repository;
