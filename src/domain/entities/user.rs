use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infrastructure::http::middleware::error::FieldIssue;
use crate::shared::validation::{Issues, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub team_id: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        role: Role,
        team_id: Option<String>,
    ) -> Self {
        let now = super::timestamp_now();
        Self {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            email,
            role,
            team_id,
            bio: String::new(),
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// DTOs for API requests/responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Issues::new();
        issues
            .required("firstName", &self.first_name, 100)
            .required("lastName", &self.last_name, 100)
            .email("email", &self.email)
            .password("password", &self.password)
            .optional("teamId", self.team_id.as_deref(), 64)
            .optional("teamName", self.team_name.as_deref(), 100);

        if self.team_id.is_some() && self.team_name.is_some() {
            issues.push("teamName", "Provide either teamId or teamName, not both");
        }

        issues.into_vec()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Issues::new();
        issues.email("email", &self.email);
        if self.password.is_empty() {
            issues.push("password", "Required");
        }
        issues.into_vec()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Issues::new();
        issues
            .optional("firstName", self.first_name.as_deref(), 100)
            .optional("lastName", self.last_name.as_deref(), 100);
        if let Some(email) = &self.email {
            issues.email("email", email);
        }
        if let Some(bio) = &self.bio {
            issues.max_len("bio", bio, 2000);
        }
        issues.into_vec()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: User,
}
