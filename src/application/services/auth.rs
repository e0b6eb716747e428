use crate::application::services::session_service::SessionService;
use crate::domain::entities::{AuthResponse, LoginRequest, RegisterRequest, Role, Session, Team, User};
use crate::domain::ports::team_repository::TeamRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::shared::utils::email_validator::normalize_email;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use std::sync::Arc;

/// Hash password using Argon2id with parameters:
/// - m_cost = 19456 KiB (19 MiB)
/// - t_cost = 2 iterations
/// - p_cost = 1 thread
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456)
        .t_cost(2)
        .p_cost(1)
        .build()
        .map_err(|_| ApiError::Internal("Failed to build Argon2 params".to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let hash = argon2.hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Verify password against Argon2id hash
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("Invalid password hash format".to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Result of a successful register or login
pub struct AuthResult {
    pub session: Session,
    pub user: User,
}

impl AuthResult {
    pub fn into_response(self) -> ApiResult<AuthResponse> {
        Ok(AuthResponse {
            expires_at: self.session.expires_at_rfc3339()?,
            token: self.session.token,
            user: self.user,
        })
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    team_repo: Arc<dyn TeamRepository>,
    session_service: SessionService,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        team_repo: Arc<dyn TeamRepository>,
        session_service: SessionService,
    ) -> Self {
        Self {
            user_repo,
            team_repo,
            session_service,
        }
    }

    /// Registers a user and opens a session.
    ///
    /// `teamId` joins an existing team as a regular user, `teamName` creates a
    /// new team with the registrant as its admin, and neither leaves the user
    /// without a team.
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<AuthResult> {
        let email = normalize_email(&request.email);

        if self.user_repo.get_user_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let first_name = request.first_name.trim().to_string();
        let last_name = request.last_name.trim().to_string();

        let user = match (request.team_id, request.team_name) {
            (Some(team_id), _) => {
                let team = self
                    .team_repo
                    .get_team_by_id(team_id.trim())
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("Team {} not found", team_id)))?;

                let user = User::new(
                    first_name,
                    last_name,
                    email,
                    password_hash,
                    Role::User,
                    Some(team.id),
                );
                self.user_repo.create_user(&user).await?;
                user
            }
            (None, Some(team_name)) => {
                let team = Team::new(team_name.trim().to_string(), None);
                let user = User::new(
                    first_name,
                    last_name,
                    email,
                    password_hash,
                    Role::Admin,
                    Some(team.id.clone()),
                );
                self.user_repo.create_user_with_team(&team, &user).await?;
                user
            }
            (None, None) => {
                let user = User::new(first_name, last_name, email, password_hash, Role::User, None);
                self.user_repo.create_user(&user).await?;
                user
            }
        };

        let session = self.session_service.open(&user.id).await?;
        tracing::info!("User registered: id={}, role={}", user.id, user.role);

        Ok(AuthResult { session, user })
    }

    /// Authenticate with email and password
    pub async fn login(&self, request: LoginRequest) -> ApiResult<AuthResult> {
        let email = normalize_email(&request.email);

        // Same error for unknown email and wrong password
        let user = self
            .user_repo
            .get_user_by_email(&email)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::warn!("Failed login attempt for user {}", user.id);
            return Err(ApiError::Unauthorized);
        }

        let session = self.session_service.open(&user.id).await?;
        tracing::info!("User logged in: id={}", user.id);

        Ok(AuthResult { session, user })
    }

    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        if !self.session_service.revoke(token).await? {
            tracing::debug!("Logout for a session that was already gone");
        }
        Ok(())
    }

    /// Resolves a bearer token to its live session and user.
    pub async fn resolve_session(&self, token: &str) -> ApiResult<(Session, User)> {
        let session = self.session_service.resolve(token).await?;

        let user = self
            .user_repo
            .get_user_by_id(&session.user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok((session, user))
    }
}
