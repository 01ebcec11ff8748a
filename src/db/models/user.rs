//! User model and queries.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::auth::{hash_password, verify_password};
use crate::error::Error;

/// One registered account. Rows are created at registration and updated
/// through the profile and password paths; they are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub apelido: Option<String>,
    pub email: String,
    /// Argon2 hash. The column keeps its historical name `password`.
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub telefone: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// Identity fields safe to hand to display code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub nome: String,
    pub apelido: Option<String>,
    pub email: String,
    pub telefone: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome: user.nome,
            apelido: user.apelido,
            email: user.email,
            telefone: user.telefone,
            bio: user.bio,
            profile_image: user.profile_image,
        }
    }
}

/// Input for `User::create`. The email must already be canonicalized.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub nome: String,
    pub apelido: Option<String>,
    pub email: String,
    pub password: String,
}

/// The four fields the profile screen may overwrite. Email and password are
/// not reachable through this path.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub nome: String,
    pub telefone: String,
    pub bio: String,
    pub profile_image: Option<String>,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE constraint failed"))
}

impl User {
    /// Insert a new account with the registration defaults: empty phone,
    /// placeholder bio, no image. Returns the engine-assigned id.
    ///
    /// A duplicate email maps to `Error::EmailTaken` whether the caller ran
    /// the existence pre-check or lost the race to another writer; the
    /// UNIQUE constraint is the real guard.
    pub async fn create(db: &SqlitePool, new: &NewUser) -> Result<i64, Error> {
        let password_hash = hash_password(&new.password)?;

        let result = sqlx::query(
            "INSERT INTO users (nome, apelido, email, password, telefone, bio, profile_image) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.nome)
        .bind(&new.apelido)
        .bind(&new.email)
        .bind(&password_hash)
        .bind("")
        .bind("Administrador.")
        .bind(Option::<String>::None)
        .execute(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::EmailTaken
            } else {
                Error::Database(e)
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Pure existence lookup by exact (canonical) email.
    pub async fn email_exists(db: &SqlitePool, email: &str) -> Result<bool, Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(row.is_some())
    }

    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Credential check. A miss, whether the email is unknown or the
    /// password does not verify, is a normal negative result, not an error.
    pub async fn authenticate(
        db: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, Error> {
        match Self::find_by_email(db, email).await? {
            Some(user) if verify_password(password, &user.password_hash) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    /// Overwrite exactly nome, telefone, bio and profile_image for the row
    /// matching `email`. An unknown email is an explicit error, not a silent
    /// success.
    pub async fn update_profile(
        db: &SqlitePool,
        email: &str,
        update: &ProfileUpdate,
    ) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE users SET nome = ?, telefone = ?, bio = ?, profile_image = ? WHERE email = ?",
        )
        .bind(&update.nome)
        .bind(&update.telefone)
        .bind(&update.bio)
        .bind(&update.profile_image)
        .bind(email)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }

    /// Rewrite the stored credential hash. The only path that touches
    /// `password` after registration.
    pub async fn update_password(
        db: &SqlitePool,
        email: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        let password_hash = hash_password(new_password)?;

        let result = sqlx::query("UPDATE users SET password = ? WHERE email = ?")
            .bind(&password_hash)
            .bind(email)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }
}
