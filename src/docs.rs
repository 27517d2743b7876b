use rolegate_models::{
    AvailableRolesResponse, CreateUserDto, LoginRequest, LoginResponse, RefreshTokenRequest,
    RegisterRequest, Role, UpdateUserDto, UpdateUserRoleDto, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::get_me,
        crate::modules::roles::controller::update_user_role,
        crate::modules::roles::controller::get_users_by_role,
        crate::modules::roles::controller::get_available_roles,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            UpdateUserRoleDto,
            CreateUserDto,
            UpdateUserDto,
            AvailableRolesResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, token refresh and the current user"),
        (name = "Roles", description = "Role changes and role-based user listing (admin only)"),
        (name = "Users", description = "User directory (admin and moderator) and user management (admin only)"),
        (name = "Health", description = "Liveness and store health")
    ),
    info(
        title = "Rolegate API",
        version = "0.1.0",
        description = "User management with role-based access control: admin, moderator and user.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
