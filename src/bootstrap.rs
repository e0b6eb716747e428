use crate::application::services::auth::hash_password;
use crate::application::services::*;
use crate::config::{AdminSeed, Config};
use crate::domain::entities::{Role, Team, User};
use crate::domain::ports::comment_repository::CommentRepository;
use crate::domain::ports::discussion_repository::DiscussionRepository;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::team_repository::TeamRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::{ApiError, AppState};
use crate::infrastructure::persistence::Database;
use crate::shared::utils::email_validator::{is_valid_email, normalize_email};
use crate::shared::validation::MIN_PASSWORD_LENGTH;
use std::sync::Arc;

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let user_repo: Arc<dyn UserRepository> = Arc::new(db.clone());
    let team_repo: Arc<dyn TeamRepository> = Arc::new(db.clone());
    let session_repo: Arc<dyn SessionRepository> = Arc::new(db.clone());
    let discussion_repo: Arc<dyn DiscussionRepository> = Arc::new(db.clone());
    let comment_repo: Arc<dyn CommentRepository> = Arc::new(db);

    let session_service = SessionService::new(session_repo, config.session_duration_hours);
    let auth_service = AuthService::new(user_repo.clone(), team_repo.clone(), session_service.clone());

    AppState {
        auth_service,
        session_service,
        user_service: UserService::new(user_repo),
        team_service: TeamService::new(team_repo),
        discussion_service: DiscussionService::new(discussion_repo),
        comment_service: CommentService::new(comment_repo),
    }
}

/// Creates the configured admin (and its team) unless the email is already taken.
pub async fn initialize_admin(db: &Database, seed: &AdminSeed) -> Result<(), ApiError> {
    tracing::info!("Checking for admin user initialization");

    let email = normalize_email(&seed.email);
    if !is_valid_email(&email) {
        return Err(ApiError::BadRequest(format!(
            "ADMIN_EMAIL '{}' is not a valid email address",
            seed.email
        )));
    }

    if db.get_user_by_email(&email).await?.is_some() {
        tracing::info!("Admin user already exists: {}", email);
        return Ok(());
    }

    if seed.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "ADMIN_PASSWORD must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let teams = TeamService::new(Arc::new(db.clone()));
    let team = match teams.find_team_by_name(&seed.team_name).await? {
        Some(team) => team,
        None => teams.create_team(Team::new(seed.team_name.clone(), None)).await?,
    };

    let password_hash = hash_password(&seed.password)?;
    let user = User::new(
        "Admin".to_string(),
        "User".to_string(),
        email,
        password_hash,
        Role::Admin,
        Some(team.id),
    );
    db.create_user(&user).await?;

    tracing::info!("Admin user created successfully: {}", user.email);
    Ok(())
}
