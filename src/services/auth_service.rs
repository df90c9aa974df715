use crate::{
    database::{FavoriteStore, StoreError, UserStore},
    models::{LoginRequest, RegisterRequest, User, UserInfo},
    utils::{
        avatar::derive_avatar_url,
        validation::{is_valid_email, non_blank, normalize_email, FieldError, MIN_PASSWORD_LEN},
        AppError,
    },
};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifetime, shared by the JWT `exp` and the cookie `Max-Age`.
pub const SESSION_TTL_SECS: i64 = 3600;
const BCRYPT_COST: u32 = 10;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id (hex ObjectId)
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
    pub iss: String,
}

/// Signing material for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
}

impl SessionKeys {
    pub fn new(secret: &str, issuer: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
        }
    }

    pub fn issue(&self, user_id: &ObjectId) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_hex(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::seconds(SESSION_TTL_SECS)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign session token: {}", e)))
    }

    /// Checks signature, expiry and issuer.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }

    /// Account id carried by a valid token.
    pub fn user_id(&self, token: &str) -> Option<ObjectId> {
        let claims = self.verify(token).ok()?;
        ObjectId::parse_str(&claims.sub).ok()
    }
}

/// Outcome of register/login: the account plus a fresh session token.
#[derive(Debug)]
pub struct AuthSession {
    pub user: UserInfo,
    pub token: String,
}

struct Registration {
    fullname: String,
    email: String,
    password: String,
}

fn validate_registration(request: &RegisterRequest) -> Result<Registration, AppError> {
    let mut errors = Vec::new();

    let fullname = non_blank(request.fullname.as_deref());
    if fullname.is_none() {
        errors.push(FieldError::new("fullname", "Full name is required"));
    }

    let email = request.email.as_deref().filter(|e| is_valid_email(e));
    if email.is_none() {
        errors.push(FieldError::new("email", "Please include a valid email"));
    }

    let password = request
        .password
        .as_deref()
        .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN);
    if password.is_none() {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    match (fullname, email, password) {
        (Some(fullname), Some(email), Some(password)) if errors.is_empty() => Ok(Registration {
            fullname: fullname.to_string(),
            email: normalize_email(email),
            password: password.to_string(),
        }),
        _ => Err(AppError::Validation(errors)),
    }
}

fn validate_login(request: &LoginRequest) -> Result<(String, String), AppError> {
    let mut errors = Vec::new();

    let email = request.email.as_deref().filter(|e| is_valid_email(e));
    if email.is_none() {
        errors.push(FieldError::new("email", "Please include a valid email"));
    }
    if request.password.is_none() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    match (email, request.password.as_deref()) {
        (Some(email), Some(password)) => Ok((normalize_email(email), password.to_string())),
        _ => Err(AppError::Validation(errors)),
    }
}

fn store_error(err: StoreError) -> AppError {
    AppError::Database(err.to_string())
}

async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("password verification error: {}", e)))
}

// User registration
pub async fn register(
    users: &dyn UserStore,
    keys: &SessionKeys,
    request: &RegisterRequest,
) -> Result<AuthSession, AppError> {
    let registration = validate_registration(request)?;

    if users
        .find_by_email(&registration.email)
        .await
        .map_err(store_error)?
        .is_some()
    {
        return Err(AppError::DuplicateEmail);
    }

    let user = User {
        id: ObjectId::new(),
        fullname: registration.fullname,
        profile_image_url: derive_avatar_url(&registration.email),
        email: registration.email,
        password: hash_password(registration.password).await?,
        created_at: BsonDateTime::now(),
    };

    users.insert(&user).await.map_err(|e| match e {
        // Lost a race against a concurrent registration.
        StoreError::DuplicateKey => AppError::DuplicateEmail,
        other => store_error(other),
    })?;

    let token = keys.issue(&user.id)?;
    log::info!("✅ User registered successfully: {}", user.email);

    Ok(AuthSession {
        user: UserInfo::from(&user),
        token,
    })
}

// User login
pub async fn login(
    users: &dyn UserStore,
    keys: &SessionKeys,
    request: &LoginRequest,
) -> Result<AuthSession, AppError> {
    let (email, password) = validate_login(request)?;

    let user = users
        .find_by_email(&email)
        .await
        .map_err(store_error)?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, user.password.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = keys.issue(&user.id)?;
    Ok(AuthSession {
        user: UserInfo::from(&user),
        token,
    })
}

/// Deletes every favorite the account owns, then the account itself.
///
/// Favorites go first so a failure leaves an account that can retry.
pub async fn delete_account(
    users: &dyn UserStore,
    favorites: &dyn FavoriteStore,
    user_id: &ObjectId,
) -> Result<(), AppError> {
    log::info!("🗑️ Deleting account for user_id: {}", user_id);

    let removed = favorites.delete_all(user_id).await.map_err(store_error)?;
    log::info!("✅ Deleted {} favorites for user {}", removed, user_id);

    if !users.delete(user_id).await.map_err(store_error)? {
        log::warn!("⚠️ User {} was already gone", user_id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::{MemoryFavorites, MemoryUsers};
    use crate::models::Favorite;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", "test-issuer")
    }

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            fullname: Some("Ada Lovelace".into()),
            email: Some(email.into()),
            password: Some("analytical".into()),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[tokio::test]
    async fn register_normalizes_email_and_hides_password() {
        let users = MemoryUsers::default();
        let session = register(&users, &keys(), &registration("  Ada@Example.com ")).await.unwrap();

        assert_eq!(session.user.email, "ada@example.com");
        assert_eq!(session.user.profile_image_url, derive_avatar_url("ada@example.com"));

        let stored = users.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password, "analytical");
        assert!(verify("analytical", &stored.password).unwrap());

        let json = serde_json::to_value(&session.user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn register_issues_token_for_new_account() {
        let users = MemoryUsers::default();
        let keys = keys();
        let session = register(&users, &keys, &registration("ada@example.com")).await.unwrap();

        let claims = keys.verify(&session.token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS as usize);
    }

    #[tokio::test]
    async fn duplicate_email_in_any_case_is_rejected() {
        let users = MemoryUsers::default();
        register(&users, &keys(), &registration("ada@example.com")).await.unwrap();

        let err = register(&users, &keys(), &registration("ADA@Example.COM")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
    }

    #[tokio::test]
    async fn register_reports_every_invalid_field() {
        let users = MemoryUsers::default();
        let request = RegisterRequest {
            fullname: Some("   ".into()),
            email: Some("not-an-email".into()),
            password: Some("abc".into()),
        };
        match register(&users, &keys(), &request).await {
            Err(AppError::Validation(errors)) => {
                let params: Vec<_> = errors.iter().map(|e| e.param.as_str()).collect();
                assert_eq!(params, vec!["fullname", "email", "password"]);
            }
            other => panic!("expected validation error, got {:?}", other.map(|s| s.user)),
        }
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_password() {
        let users = MemoryUsers::default();
        let keys = keys();
        let registered = register(&users, &keys, &registration("ada@example.com")).await.unwrap();

        let session = login(&users, &keys, &login_request("Ada@example.com", "analytical"))
            .await
            .unwrap();
        assert_eq!(session.user, registered.user);
        assert_eq!(keys.user_id(&session.token).map(|id| id.to_hex()), Some(registered.user.id));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        use actix_web::{body::to_bytes, ResponseError};

        let users = MemoryUsers::default();
        register(&users, &keys(), &registration("ada@example.com")).await.unwrap();

        let wrong_password = login(&users, &keys(), &login_request("ada@example.com", "nope"))
            .await
            .unwrap_err();
        let unknown_email = login(&users, &keys(), &login_request("bob@example.com", "analytical"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));

        let a = to_bytes(wrong_password.error_response().into_body()).await.unwrap();
        let b = to_bytes(unknown_email.error_response().into_body()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn login_requires_password_field() {
        let users = MemoryUsers::default();
        let request = LoginRequest {
            email: Some("ada@example.com".into()),
            password: None,
        };
        let err = login(&users, &keys(), &request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e[0].param == "password"));
    }

    #[tokio::test]
    async fn delete_account_removes_user_and_favorites() {
        let users = MemoryUsers::default();
        let favorites = MemoryFavorites::default();
        let session = register(&users, &keys(), &registration("ada@example.com")).await.unwrap();
        let user_id = ObjectId::parse_str(&session.user.id).unwrap();

        for artist in ["picasso", "braque"] {
            favorites
                .insert(&Favorite {
                    id: ObjectId::new(),
                    user: user_id,
                    artist_id: artist.into(),
                    artist_name: artist.into(),
                    image_url: String::new(),
                    nationality: String::new(),
                    birthday: String::new(),
                    deathday: String::new(),
                    added_at: BsonDateTime::now(),
                })
                .await
                .unwrap();
        }

        delete_account(&users, &favorites, &user_id).await.unwrap();

        assert!(users.find_by_id(&user_id).await.unwrap().is_none());
        assert!(favorites.list(&user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_favorite_cleanup_keeps_account() {
        use async_trait::async_trait;

        struct BrokenFavorites;

        #[async_trait]
        impl FavoriteStore for BrokenFavorites {
            async fn list(&self, _: &ObjectId) -> Result<Vec<Favorite>, StoreError> {
                Ok(Vec::new())
            }
            async fn find(&self, _: &ObjectId, _: &str) -> Result<Option<Favorite>, StoreError> {
                Ok(None)
            }
            async fn insert(&self, _: &Favorite) -> Result<(), StoreError> {
                Ok(())
            }
            async fn delete(&self, _: &ObjectId, _: &str) -> Result<Option<Favorite>, StoreError> {
                Ok(None)
            }
            async fn delete_all(&self, _: &ObjectId) -> Result<u64, StoreError> {
                Err(StoreError::Backend("connection reset".into()))
            }
        }

        let users = MemoryUsers::default();
        let session = register(&users, &keys(), &registration("ada@example.com")).await.unwrap();
        let user_id = ObjectId::parse_str(&session.user.id).unwrap();

        let err = delete_account(&users, &BrokenFavorites, &user_id).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(users.find_by_id(&user_id).await.unwrap().is_some());
    }

    #[test]
    fn tokens_from_other_secrets_are_rejected() {
        let token = SessionKeys::new("secret-a", "iss").issue(&ObjectId::new()).unwrap();
        assert!(SessionKeys::new("secret-b", "iss").verify(&token).is_err());
        assert!(SessionKeys::new("secret-a", "other").verify(&token).is_err());
        assert!(SessionKeys::new("secret-a", "iss").user_id(&token).is_some());
    }
}
