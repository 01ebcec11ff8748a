//! Ad creation, listing and removal flows.
//!
//! The session snapshot supplies the authoring email; the rows themselves
//! live in the persistent store.

use crate::db::{Anuncio, DbPool, NewAnuncio};
use crate::error::{Error, ValidationErrorBuilder};
use crate::session::SessionStore;
use crate::validation::validate_titulo;

fn validate_new_anuncio(new: &NewAnuncio) -> Result<(), Error> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_titulo(&new.titulo) {
        errors.add("titulo", e);
    }

    errors.finish()
}

/// Create an ad authored by the logged-in user. Returns the new row id; the
/// row always starts as 'pendente' with zero views.
pub async fn create_anuncio(
    db: &DbPool,
    session: &SessionStore,
    new: &NewAnuncio,
) -> Result<i64, Error> {
    let snapshot = session.get().ok_or(Error::NotLoggedIn)?;

    validate_new_anuncio(new)?;

    Anuncio::create(db, &snapshot.email, new).await
}

/// The logged-in user's ads, newest first.
pub async fn list_my_anuncios(db: &DbPool, session: &SessionStore) -> Result<Vec<Anuncio>, Error> {
    let snapshot = session.get().ok_or(Error::NotLoggedIn)?;
    Anuncio::list_for_user(db, &snapshot.email).await
}

/// Delete an ad by id. The id is not checked against the session's email
/// (single-tenant device store — see DESIGN.md).
pub async fn delete_anuncio(db: &DbPool, id: i64) -> Result<(), Error> {
    Anuncio::delete(db, id).await
}
