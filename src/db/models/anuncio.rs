//! Anúncio (ad) model and queries.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::Error;

/// Moderation state of an ad. Every ad enters as `Pendente`; the transition
/// to `Ativo` is performed by `Anuncio::set_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnuncioStatus {
    Pendente,
    Ativo,
}

impl AnuncioStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnuncioStatus::Pendente => "pendente",
            AnuncioStatus::Ativo => "ativo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pendente" => Some(AnuncioStatus::Pendente),
            "ativo" => Some(AnuncioStatus::Ativo),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnuncioStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One advertisement. `user_email` is a plain string reference to its
/// author; the schema does not enforce it, so a dangling email is
/// representable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Anuncio {
    pub id: i64,
    pub user_email: String,
    pub titulo: String,
    pub descricao: Option<String>,
    pub tipo_produto: Option<String>,
    pub capa: Option<String>,
    pub arquivo_url: Option<String>,
    pub demo_link: Option<String>,
    pub status: String,
    pub views: i64,
    pub created_at: String,
}

/// Payload for `Anuncio::create`. Status and view count are not accepted
/// from callers; the insert forces them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAnuncio {
    pub titulo: String,
    pub descricao: Option<String>,
    pub tipo_produto: Option<String>,
    pub capa: Option<String>,
    pub arquivo_url: Option<String>,
    pub demo_link: Option<String>,
}

impl Anuncio {
    /// Insert a new ad for `user_email`. Every ad enters moderation as
    /// 'pendente' with zero views, whatever the caller supplies; the
    /// creation timestamp is engine-assigned.
    pub async fn create(
        db: &SqlitePool,
        user_email: &str,
        new: &NewAnuncio,
    ) -> Result<i64, Error> {
        let result = sqlx::query(
            "INSERT INTO anuncios \
             (user_email, titulo, descricao, tipo_produto, capa, arquivo_url, demo_link, status, views) \
             VALUES (?, ?, ?, ?, ?, ?, ?, 'pendente', 0)",
        )
        .bind(user_email)
        .bind(&new.titulo)
        .bind(&new.descricao)
        .bind(&new.tipo_produto)
        .bind(&new.capa)
        .bind(&new.arquivo_url)
        .bind(&new.demo_link)
        .execute(db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All ads authored by `user_email`, newest first. `id` breaks ties
    /// inside one timestamp granule so the order stays deterministic.
    pub async fn list_for_user(db: &SqlitePool, user_email: &str) -> Result<Vec<Anuncio>, Error> {
        let anuncios = sqlx::query_as(
            "SELECT * FROM anuncios WHERE user_email = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_email)
        .fetch_all(db)
        .await?;
        Ok(anuncios)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Anuncio>, Error> {
        let anuncio = sqlx::query_as("SELECT * FROM anuncios WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(anuncio)
    }

    /// Unconditional delete by id; no ownership check against the session
    /// (single-tenant device store — see DESIGN.md).
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM anuncios WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::AnuncioNotFound);
        }
        Ok(())
    }

    /// Moderation transition, the only writer of `status` after creation.
    pub async fn set_status(db: &SqlitePool, id: i64, status: AnuncioStatus) -> Result<(), Error> {
        let result = sqlx::query("UPDATE anuncios SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::AnuncioNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn campanha(titulo: &str) -> NewAnuncio {
        NewAnuncio {
            titulo: titulo.to_string(),
            descricao: Some("Spot de 30 segundos".to_string()),
            tipo_produto: Some("video".to_string()),
            ..Default::default()
        }
    }

    async fn backdate(db: &SqlitePool, id: i64, timestamp: &str) {
        sqlx::query("UPDATE anuncios SET created_at = ? WHERE id = ?")
            .bind(timestamp)
            .bind(id)
            .execute(db)
            .await
            .unwrap();
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(AnuncioStatus::Pendente.as_str(), "pendente");
        assert_eq!(AnuncioStatus::Ativo.as_str(), "ativo");
        assert_eq!(
            AnuncioStatus::from_str("pendente"),
            Some(AnuncioStatus::Pendente)
        );
        assert_eq!(AnuncioStatus::from_str("ativo"), Some(AnuncioStatus::Ativo));
        assert_eq!(AnuncioStatus::from_str("aprovado"), None);
    }

    #[tokio::test]
    async fn test_create_forces_pendente_and_zero_views() {
        let pool = test_pool().await;

        let id = Anuncio::create(&pool, "ana@x.com", &campanha("Natal 2025"))
            .await
            .unwrap();

        let anuncio = Anuncio::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(anuncio.status, "pendente");
        assert_eq!(anuncio.views, 0);
        assert_eq!(anuncio.titulo, "Natal 2025");
        assert_eq!(anuncio.user_email, "ana@x.com");
        assert!(!anuncio.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = test_pool().await;

        let a = Anuncio::create(&pool, "ana@x.com", &campanha("primeiro"))
            .await
            .unwrap();
        let b = Anuncio::create(&pool, "ana@x.com", &campanha("segundo"))
            .await
            .unwrap();
        let c = Anuncio::create(&pool, "ana@x.com", &campanha("terceiro"))
            .await
            .unwrap();

        // distinct timestamps t1 < t2 < t3
        backdate(&pool, a, "2025-01-01 10:00:00").await;
        backdate(&pool, b, "2025-01-02 10:00:00").await;
        backdate(&pool, c, "2025-01-03 10:00:00").await;

        let listed = Anuncio::list_for_user(&pool, "ana@x.com").await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![c, b, a]);
    }

    #[tokio::test]
    async fn test_list_ties_break_on_id() {
        let pool = test_pool().await;

        // inserted within the same CURRENT_TIMESTAMP second
        let a = Anuncio::create(&pool, "ana@x.com", &campanha("um")).await.unwrap();
        let b = Anuncio::create(&pool, "ana@x.com", &campanha("dois")).await.unwrap();
        backdate(&pool, a, "2025-01-01 10:00:00").await;
        backdate(&pool, b, "2025-01-01 10:00:00").await;

        let listed = Anuncio::list_for_user(&pool, "ana@x.com").await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_author() {
        let pool = test_pool().await;

        Anuncio::create(&pool, "ana@x.com", &campanha("de ana"))
            .await
            .unwrap();
        Anuncio::create(&pool, "bob@x.com", &campanha("de bob"))
            .await
            .unwrap();

        let listed = Anuncio::list_for_user(&pool, "ana@x.com").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].titulo, "de ana");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let pool = test_pool().await;

        let keep = Anuncio::create(&pool, "ana@x.com", &campanha("fica"))
            .await
            .unwrap();
        let gone = Anuncio::create(&pool, "ana@x.com", &campanha("sai"))
            .await
            .unwrap();

        Anuncio::delete(&pool, gone).await.unwrap();

        let listed = Anuncio::list_for_user(&pool, "ana@x.com").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep);

        // a second delete of the same id is an explicit miss
        let err = Anuncio::delete(&pool, gone).await.unwrap_err();
        assert!(matches!(err, Error::AnuncioNotFound));
    }

    #[tokio::test]
    async fn test_set_status_activates() {
        let pool = test_pool().await;

        let id = Anuncio::create(&pool, "ana@x.com", &campanha("spot"))
            .await
            .unwrap();
        Anuncio::set_status(&pool, id, AnuncioStatus::Ativo)
            .await
            .unwrap();

        let anuncio = Anuncio::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(anuncio.status, "ativo");

        let err = Anuncio::set_status(&pool, 9999, AnuncioStatus::Ativo)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AnuncioNotFound));
    }
}
