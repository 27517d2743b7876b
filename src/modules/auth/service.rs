use anyhow::anyhow;
use rolegate_auth::{create_access_token, create_refresh_token, verify_refresh_token};
use rolegate_config::JwtConfig;
use rolegate_core::{AppError, hash_password, verify_password};
use rolegate_db::{StoreError, UserStore};
use rolegate_models::{
    LoginRequest, LoginResponse, NewUser, RefreshTokenRequest, RegisterRequest, Role, User,
    UserResponse,
};
use rolegate_observability::track_login;
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Creates an account with the default `user` role.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register_user(
        store: &dyn UserStore,
        dto: RegisterRequest,
    ) -> Result<UserResponse, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = store
            .create(NewUser {
                name: dto.name,
                email: dto.email,
                password_hash,
                role: Role::default(),
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::bad_request(anyhow!("Email already exists")),
                other => AppError::internal(other),
            })?;

        info!(user_id = user.id, "User registered");
        Ok(user.into())
    }

    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        store: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = match store.get_by_email(&dto.email).await {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => {
                warn!("Login attempt for unknown email");
                track_login(false);
                return Err(AppError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(err) => return Err(AppError::internal(err)),
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let response = issue_tokens(user, jwt_config)?;
        track_login(true);
        Ok(response)
    }

    /// Trades a refresh token for a new token pair. The user is re-read, so
    /// the new access token carries the current role.
    #[instrument(skip_all)]
    pub async fn refresh_token(
        store: &dyn UserStore,
        dto: RefreshTokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let claims = verify_refresh_token(&dto.refresh_token, jwt_config)?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))?;

        let user = match store.get_by_id(user_id).await {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => {
                warn!(user_id, "Refresh for a user that no longer exists");
                return Err(AppError::unauthorized("User no longer exists"));
            }
            Err(err) => return Err(AppError::internal(err)),
        };

        info!(user_id, "Tokens refreshed");
        issue_tokens(user, jwt_config)
    }

    #[instrument(skip(store))]
    pub async fn get_profile(store: &dyn UserStore, user_id: i64) -> Result<UserResponse, AppError> {
        store
            .get_by_id(user_id)
            .await
            .map(UserResponse::from)
            .map_err(|e| match e {
                StoreError::NotFound(_) => AppError::not_found(anyhow!("User not found")),
                other => AppError::internal(other),
            })
    }
}

fn issue_tokens(user: User, jwt_config: &JwtConfig) -> Result<LoginResponse, AppError> {
    let access_token = create_access_token(user.id, &user.email, user.role, jwt_config)?;
    let refresh_token = create_refresh_token(user.id, &user.email, jwt_config)?;

    Ok(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt_config.access_token_expiry,
        user: user.into(),
    })
}
