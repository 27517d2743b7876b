use anyhow::anyhow;
use rolegate_core::{AppError, hash_password};
use rolegate_db::{StoreError, UserStore};
use rolegate_models::{CreateUserDto, NewUser, Role, UpdateUserDto, UserResponse};
use tracing::{info, instrument};

pub struct UserService;

fn user_error(id: i64, err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(_) => AppError::not_found(anyhow!("User {} not found", id)),
        other => AppError::internal(other),
    }
}

impl UserService {
    #[instrument(skip(store))]
    pub async fn get_users(store: &dyn UserStore) -> Result<Vec<UserResponse>, AppError> {
        let users = store.list_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn UserStore, id: i64) -> Result<UserResponse, AppError> {
        store
            .get_by_id(id)
            .await
            .map(UserResponse::from)
            .map_err(|e| user_error(id, e))
    }

    /// Creates an account with any role. `role` defaults to `user`.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_user(
        store: &dyn UserStore,
        dto: CreateUserDto,
    ) -> Result<UserResponse, AppError> {
        let role = match dto.role.as_deref() {
            Some(raw) => raw.parse::<Role>().map_err(AppError::bad_request)?,
            None => Role::default(),
        };
        let password_hash = hash_password(&dto.password)?;

        let user = store
            .create(NewUser {
                name: dto.name,
                email: dto.email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::bad_request(anyhow!("Email already exists")),
                other => AppError::internal(other),
            })?;

        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user.into())
    }

    #[instrument(skip(store, dto))]
    pub async fn update_user(
        store: &dyn UserStore,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<UserResponse, AppError> {
        let user = store
            .update_name(id, &dto.name)
            .await
            .map_err(|e| user_error(id, e))?;

        info!(user_id = id, "User updated");
        Ok(user.into())
    }

    /// Deletes `id`. An admin cannot delete their own account.
    #[instrument(skip(store))]
    pub async fn delete_user(
        store: &dyn UserStore,
        actor_id: i64,
        id: i64,
    ) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::bad_request(anyhow!(
                "You cannot delete your own account"
            )));
        }

        store.delete(id).await.map_err(|e| user_error(id, e))?;

        info!(user_id = id, actor_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rolegate_db::MemoryUserStore;

    fn create_dto(email: &str, role: Option<&str>) -> CreateUserDto {
        CreateUserDto {
            name: "Created".to_string(),
            email: email.to_string(),
            password: "longenough".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_user_with_role() {
        let store = MemoryUserStore::new();

        let user = UserService::create_user(&store, create_dto("m@test.com", Some("moderator")))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Moderator);

        let stored = store.get_by_id(user.id).await.unwrap();
        assert_ne!(stored.password_hash, "longenough");
    }

    #[tokio::test]
    async fn test_create_user_defaults_to_user_role() {
        let store = MemoryUserStore::new();
        let user = UserService::create_user(&store, create_dto("u@test.com", None))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_create_user_rejects_unknown_role_and_duplicate_email() {
        let store = MemoryUserStore::new();

        let err = UserService::create_user(&store, create_dto("r@test.com", Some("root")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(store.is_empty().await);

        UserService::create_user(&store, create_dto("dup@test.com", None))
            .await
            .unwrap();
        let err = UserService::create_user(&store, create_dto("dup@test.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_user_is_not_found() {
        let store = MemoryUserStore::new();

        let err = UserService::update_user(
            &store,
            5,
            UpdateUserDto {
                name: "Nobody".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = UserService::delete_user(&store, 1, 5).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_own_account_is_refused() {
        let store = MemoryUserStore::new();
        let admin = UserService::create_user(&store, create_dto("a@test.com", Some("admin")))
            .await
            .unwrap();

        let err = UserService::delete_user(&store, admin.id, admin.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(store.get_by_id(admin.id).await.is_ok());
    }
}
