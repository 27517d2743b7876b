use rolegate_db::{StoreError, UserStore};
use rolegate_models::{Role, UserResponse};
use rolegate_observability::track_role_changed;
use tracing::{info, instrument};

use super::error::RoleServiceError;

fn parse_role(candidate: &str) -> Result<Role, RoleServiceError> {
    candidate
        .parse::<Role>()
        .map_err(|_| RoleServiceError::InvalidRole(candidate.to_string()))
}

pub struct RoleService;

impl RoleService {
    /// Moves `user_id` to `requested`.
    ///
    /// The role is validated before the store is touched, and asking for the
    /// role the user already holds is rejected without a write. Any failure
    /// of the write itself, including the user vanishing between the read
    /// and the write, is reported as `Internal`.
    #[instrument(skip(store))]
    pub async fn update_user_role(
        store: &dyn UserStore,
        user_id: i64,
        requested: &str,
    ) -> Result<UserResponse, RoleServiceError> {
        let new_role = parse_role(requested)?;

        let user = store.get_by_id(user_id).await.map_err(|e| match e {
            StoreError::NotFound(_) => RoleServiceError::NotFound(user_id),
            other => RoleServiceError::Internal(other.into()),
        })?;

        if user.role == new_role {
            return Err(RoleServiceError::NoOpTransition(new_role));
        }

        let previous = user.role;
        let updated = store
            .update_role(user_id, new_role)
            .await
            .map_err(|e| RoleServiceError::Internal(e.into()))?;

        info!(
            user_id,
            from = %previous,
            to = %updated.role,
            "User role updated"
        );
        track_role_changed(previous.as_str(), updated.role.as_str());

        Ok(updated.into())
    }

    /// Users currently holding `role`, in store order.
    #[instrument(skip(store))]
    pub async fn get_users_by_role(
        store: &dyn UserStore,
        role: &str,
    ) -> Result<Vec<UserResponse>, RoleServiceError> {
        let role = parse_role(role)?;

        let users = store
            .list_by_role(role)
            .await
            .map_err(|e| RoleServiceError::Internal(e.into()))?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
