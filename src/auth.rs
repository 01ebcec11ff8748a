//! Registration, login and password management.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::Deserialize;
use tracing::info;

use crate::db::{DbPool, NewUser, User, UserProfile};
use crate::error::{Error, ValidationErrorBuilder};
use crate::session::{SessionSnapshot, SessionStore};
use crate::validation::{normalize_email, validate_email, validate_nome, validate_password};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Registration form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub nome: String,
    pub apelido: Option<String>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn validate_register_request(req: &RegisterRequest) -> Result<(), Error> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_nome(&req.nome) {
        errors.add("nome", e);
    }
    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_password(&req.password) {
        errors.add("password", e);
    }
    if req.password != req.confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }

    errors.finish()
}

/// Create a new account. The email existence pre-check gives the friendly
/// conflict answer; the UNIQUE constraint still backstops the window
/// between check and insert.
pub async fn register(db: &DbPool, req: &RegisterRequest) -> Result<i64, Error> {
    validate_register_request(req)?;

    let email = normalize_email(&req.email);
    if User::email_exists(db, &email).await? {
        return Err(Error::EmailTaken);
    }

    let id = User::create(
        db,
        &NewUser {
            nome: req.nome.trim().to_string(),
            apelido: req.apelido.clone(),
            email: email.clone(),
            password: req.password.clone(),
        },
    )
    .await?;

    info!("Registered account {} for {}", id, email);
    Ok(id)
}

/// Authenticate and, on success, write the session snapshot downstream
/// screens render from.
pub async fn login(
    db: &DbPool,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<UserProfile, Error> {
    let email = normalize_email(email);

    let user = User::authenticate(db, &email, password)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    session.set(SessionSnapshot {
        nome: user.nome.clone(),
        email: user.email.clone(),
        profile_image: user.profile_image.clone(),
    })?;

    info!("Session opened for {}", user.email);
    Ok(user.into())
}

/// Destroy the current session snapshot.
pub fn logout(session: &SessionStore) -> Result<(), Error> {
    session.clear()
}

/// Password-change form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

fn validate_change_password_request(req: &ChangePasswordRequest) -> Result<(), Error> {
    let mut errors = ValidationErrorBuilder::new();

    if req.current_password.is_empty() {
        errors.add("current_password", "Current password is required");
    }
    if let Err(e) = validate_password(&req.new_password) {
        errors.add("new_password", e);
    }
    if req.new_password != req.confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }
    if !req.current_password.is_empty() && req.new_password == req.current_password {
        errors.add("new_password", "New password must differ from the current one");
    }

    errors.finish()
}

/// Rotate the current user's credential: verify the old password, apply the
/// strength policy to the new one, persist the new hash.
pub async fn change_password(
    db: &DbPool,
    session: &SessionStore,
    req: &ChangePasswordRequest,
) -> Result<(), Error> {
    let snapshot = session.get().ok_or(Error::NotLoggedIn)?;

    validate_change_password_request(req)?;

    let user = User::authenticate(db, &snapshot.email, &req.current_password)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    User::update_password(db, &user.email, &req.new_password).await?;

    info!("Password rotated for {}", user.email);
    Ok(())
}
