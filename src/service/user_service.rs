use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::config::AdminUserConfig;
use crate::dto::user_dto::{UserAuthResponse, UserWithoutPassword};
use crate::model::user::User;
use crate::repository::Repository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, TokenPair, ADMIN_ROLE};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserService: Send + Sync {
	async fn register(&self, user: User, password: String) -> Result<UserWithoutPassword, ServiceError>;
	async fn login(&self, email: String, password: String) -> Result<UserAuthResponse, ServiceError>;
	async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError>;
	/// Creates the configured admin unless a user with that email exists.
	async fn ensure_admin(&self, config: &AdminUserConfig) -> Result<bool, ServiceError>;
}

pub struct UserServiceImpl {
	pub user_repo: Arc<dyn Repository<User>>,
	pub jwt_utils: Arc<dyn JwtTokenUtils>,
}

impl UserServiceImpl {
	pub fn new(user_repo: Arc<dyn Repository<User>>, jwt_utils: Arc<dyn JwtTokenUtils>) -> Self {
		Self { user_repo, jwt_utils }
	}

	fn tokens_for(&self, user: &User) -> Result<TokenPair, ServiceError> {
		let id = user.id.map(|id| id.to_hex()).unwrap_or_default();
		self.jwt_utils
			.generate_token_pair(&id, &user.email, &user.role)
			.map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
	}
}

#[async_trait]
impl UserService for UserServiceImpl {
	#[instrument(skip(self, user, password), fields(username = %user.username, email = %user.email))]
	async fn register(&self, mut user: User, password: String) -> Result<UserWithoutPassword, ServiceError> {
		info!("Registering new user");
		PasswordUtilsImpl::validate_password_strength(&password)
			.map_err(|errors| ServiceError::InvalidInput(errors.join("; ")))?;

		user.email = user.email.trim().to_lowercase();
		if self.user_repo.find_by_field("email", &user.email).await?.is_some() {
			return Err(ServiceError::Conflict(format!("A user with email {} already exists", user.email)));
		}

		user.password_hash = PasswordUtilsImpl::hash_password(&password)
			.map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;
		let inserted = self.user_repo.create(user).await.map_err(|e| {
			error!("Failed to insert user: {e}");
			ServiceError::from(e)
		})?;
		info!("User registered");
		Ok(inserted.into())
	}

	#[instrument(skip(self, password), fields(email = %email))]
	async fn login(&self, email: String, password: String) -> Result<UserAuthResponse, ServiceError> {
		let email = email.trim().to_lowercase();
		let invalid = || ServiceError::Unauthorized("Invalid credentials".to_string());

		let user = match self.user_repo.find_by_field("email", &email).await? {
			Some(user) => user,
			None => {
				warn!("Login attempt for unknown email");
				return Err(invalid());
			}
		};
		let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
			.map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
		if !valid {
			warn!("Invalid password");
			return Err(invalid());
		}

		let tokens = self.tokens_for(&user)?;
		info!("User logged in successfully");
		Ok(UserAuthResponse { user: user.into(), tokens })
	}

	#[instrument(skip(self, refresh_token))]
	async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError> {
		let claims = self
			.jwt_utils
			.validate_refresh_token(&refresh_token)
			.map_err(|e| ServiceError::Unauthorized(format!("Invalid refresh token: {}", e)))?;
		let tokens = self
			.jwt_utils
			.generate_token_pair(&claims.sub, &claims.email, &claims.role)
			.map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
		info!("Token refreshed");
		Ok(tokens)
	}

	#[instrument(skip(self, config), fields(email = %config.email))]
	async fn ensure_admin(&self, config: &AdminUserConfig) -> Result<bool, ServiceError> {
		let email = config.email.trim().to_lowercase();
		if self.user_repo.find_by_field("email", &email).await?.is_some() {
			info!("Admin user already exists, skipping creation");
			return Ok(false);
		}
		let user = User {
			id: None,
			username: config.username.clone(),
			first_name: config.first_name.clone(),
			last_name: config.last_name.clone(),
			email,
			password_hash: String::new(),
			role: ADMIN_ROLE.to_string(),
			created_at: None,
			updated_at: None,
		};
		self.register(user, config.password.clone()).await?;
		info!("First admin user created");
		Ok(true)
	}
}
