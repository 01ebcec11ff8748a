//! Profile display and editing flows.
//!
//! Reads are two-tier: the session snapshot answers "who is logged in"
//! without touching the store, and the authoritative row is re-fetched by
//! the snapshot's email whenever complete or fresh data is needed.
//! Mutations write to the store first and then refresh the snapshot so the
//! dashboard sees the change on its next render.

use crate::db::{DbPool, ProfileUpdate, User, UserProfile};
use crate::error::{Error, ValidationErrorBuilder};
use crate::session::{SessionSnapshot, SessionStore};
use crate::validation::validate_nome;

/// The authoritative profile of the logged-in user.
///
/// A session snapshot whose email no longer matches a row (for instance a
/// stale file next to a rebuilt database) surfaces as `UserNotFound` rather
/// than rendering phantom identity.
pub async fn current_profile(db: &DbPool, session: &SessionStore) -> Result<UserProfile, Error> {
    let snapshot = session.get().ok_or(Error::NotLoggedIn)?;

    let user = User::find_by_email(db, &snapshot.email)
        .await?
        .ok_or(Error::UserNotFound)?;
    Ok(user.into())
}

fn validate_profile_update(update: &ProfileUpdate) -> Result<(), Error> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_nome(&update.nome) {
        errors.add("nome", e);
    }

    errors.finish()
}

/// Overwrite the editable profile fields, then re-fetch and refresh the
/// session snapshot from the stored row.
pub async fn update_profile(
    db: &DbPool,
    session: &SessionStore,
    update: &ProfileUpdate,
) -> Result<UserProfile, Error> {
    let snapshot = session.get().ok_or(Error::NotLoggedIn)?;

    validate_profile_update(update)?;

    User::update_profile(db, &snapshot.email, update).await?;

    let user = User::find_by_email(db, &snapshot.email)
        .await?
        .ok_or(Error::UserNotFound)?;

    session.set(SessionSnapshot {
        nome: user.nome.clone(),
        email: user.email.clone(),
        profile_image: user.profile_image.clone(),
    })?;

    Ok(user.into())
}
