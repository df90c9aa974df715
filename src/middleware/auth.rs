use crate::{
    config::Environment,
    models::User,
    services::auth_service::SESSION_TTL_SECS,
    state::AppState,
    utils::AppError,
};
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    dev::Payload,
    web, FromRequest, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

pub const SESSION_COOKIE: &str = "token";

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("application state not configured".into()))
}

/// The signed-in account behind the session cookie.
///
/// Rejects with 401 when the cookie is missing, expired, forged, or points at an
/// account that no longer exists.
pub struct AuthContext {
    pub user: User,
}

impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = app_state(req);
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state = state?;
            let user_id = token
                .as_deref()
                .and_then(|t| state.sessions.user_id(t))
                .ok_or(AppError::Unauthenticated)?;

            match state.users.find_by_id(&user_id).await {
                Ok(Some(user)) => Ok(AuthContext { user }),
                Ok(None) => {
                    log::warn!("⚠️  Session for unknown user {}", user_id);
                    Err(AppError::Unauthenticated)
                }
                Err(e) => {
                    log::warn!("⚠️  Could not load session user {}: {}", user_id, e);
                    Err(AppError::Unauthenticated)
                }
            }
        })
    }
}

/// Admits only requests without a currently valid session.
pub struct GuestOnly;

impl FromRequest for GuestOnly {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = app_state(req).and_then(|state| {
            let signed_in = req
                .cookie(SESSION_COOKIE)
                .map(|c| state.sessions.verify(c.value()).is_ok())
                .unwrap_or(false);
            if signed_in {
                Err(AppError::AlreadyAuthenticated)
            } else {
                Ok(GuestOnly)
            }
        });
        ready(result)
    }
}

fn base_cookie(environment: Environment, value: String) -> Cookie<'static> {
    let (secure, same_site) = if environment.is_production() {
        (true, SameSite::None)
    } else {
        (false, SameSite::Lax)
    };

    Cookie::build(SESSION_COOKIE, value)
        .http_only(true)
        .path("/")
        .secure(secure)
        .same_site(same_site)
        .finish()
}

pub fn session_cookie(environment: Environment, token: String) -> Cookie<'static> {
    let mut cookie = base_cookie(environment, token);
    cookie.set_max_age(Duration::seconds(SESSION_TTL_SECS));
    cookie
}

pub fn removal_cookie(environment: Environment) -> Cookie<'static> {
    let mut cookie = base_cookie(environment, String::new());
    cookie.make_removal();
    cookie
}
