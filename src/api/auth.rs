use crate::{
    middleware::{
        auth::{removal_cookie, session_cookie},
        AuthContext, GuestOnly,
    },
    models::{LoginRequest, MessageResponse, RegisterRequest, UserInfo, UserResponse},
    services::auth_service,
    state::AppState,
    utils::AppError,
};
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, session cookie set", body = UserResponse),
        (status = 400, description = "Validation failed, email taken, or already signed in")
    )
)]
pub async fn register(
    _guest: GuestOnly,
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /auth/register - email: {}", email);

    let session = auth_service::register(state.users.as_ref(), &state.sessions, &request)
        .await
        .map_err(|e| {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            e
        })?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(state.config.environment, session.token))
        .json(UserResponse { user: session.user }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = UserResponse),
        (status = 400, description = "Validation failed, bad credentials, or already signed in")
    )
)]
pub async fn login(
    _guest: GuestOnly,
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /auth/login - email: {}", email);

    let session = auth_service::login(state.users.as_ref(), &state.sessions, &request)
        .await
        .map_err(|e| {
            log::warn!("❌ Login failed: {} - {}", email, e);
            e
        })?;

    log::info!("✅ Login successful: {}", session.user.email);
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(state.config.environment, session.token))
        .json(UserResponse { user: session.user }))
}

/// Currently signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse {
        user: UserInfo::from(&auth.user),
    })
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
        (status = 401, description = "Authentication required")
    ),
    security(("session_cookie" = []))
)]
pub async fn logout(auth: AuthContext, state: web::Data<AppState>) -> HttpResponse {
    log::info!("👋 POST /auth/logout - user: {}", auth.user.email);
    HttpResponse::Ok()
        .cookie(removal_cookie(state.config.environment))
        .json(MessageResponse {
            message: "Logged out successfully".to_string(),
        })
}

/// Delete the signed-in account and all of its favorites
#[utoipa::path(
    delete,
    path = "/api/auth/delete",
    tag = "Auth",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Server error")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_account(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /auth/delete - user: {}", auth.user.email);

    auth_service::delete_account(state.users.as_ref(), state.favorites.as_ref(), &auth.user.id)
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(state.config.environment))
        .json(MessageResponse {
            message: "Account deleted successfully".to_string(),
        }))
}
