use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::shortlist::{Shortlist, ShortlistEntry};

#[derive(Clone)]
pub struct ShortlistService {
    pool: PgPool,
}

#[derive(Debug, Clone, FromRow)]
pub struct EntryWithCandidate {
    pub id: i32,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_status: String,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

pub struct ShortlistDetail {
    pub shortlist: Shortlist,
    pub entries: Vec<EntryWithCandidate>,
}

impl ShortlistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Shortlist> {
        let shortlist = sqlx::query_as::<_, Shortlist>(
            r#"
            INSERT INTO shortlists (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(shortlist)
    }

    pub async fn list(&self) -> Result<Vec<Shortlist>> {
        let shortlists = sqlx::query_as::<_, Shortlist>(
            "SELECT id, name, description, created_at FROM shortlists ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(shortlists)
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<ShortlistDetail> {
        let shortlist = sqlx::query_as::<_, Shortlist>(
            "SELECT id, name, description, created_at FROM shortlists WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        let entries = sqlx::query_as::<_, EntryWithCandidate>(
            r#"
            SELECT
                e.id, e.candidate_id, c.name AS candidate_name,
                c.status AS candidate_status, e.note, e.created_at
            FROM shortlist_entries e
            JOIN candidates c ON c.id = e.candidate_id
            WHERE e.shortlist_id = $1
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ShortlistDetail { shortlist, entries })
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM shortlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Shortlist not found".to_string()));
        }
        Ok(())
    }

    /// Adding the same candidate twice refreshes the note instead of
    /// duplicating the entry.
    pub async fn add_candidate(
        &self,
        shortlist_id: Uuid,
        candidate_id: Uuid,
        note: Option<&str>,
    ) -> Result<ShortlistEntry> {
        sqlx::query("SELECT id FROM shortlists WHERE id = $1")
            .bind(shortlist_id)
            .fetch_one(&self.pool)
            .await?;
        sqlx::query("SELECT id FROM candidates WHERE id = $1")
            .bind(candidate_id)
            .fetch_one(&self.pool)
            .await?;

        let entry = sqlx::query_as::<_, ShortlistEntry>(
            r#"
            INSERT INTO shortlist_entries (shortlist_id, candidate_id, note)
            VALUES ($1, $2, $3)
            ON CONFLICT (shortlist_id, candidate_id)
                DO UPDATE SET note = EXCLUDED.note
            RETURNING id, shortlist_id, candidate_id, note, created_at
            "#,
        )
        .bind(shortlist_id)
        .bind(candidate_id)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn remove_candidate(&self, shortlist_id: Uuid, candidate_id: Uuid) -> Result<()> {
        let res = sqlx::query(
            "DELETE FROM shortlist_entries WHERE shortlist_id = $1 AND candidate_id = $2",
        )
        .bind(shortlist_id)
        .bind(candidate_id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound(
                "Candidate is not on this shortlist".to_string(),
            ));
        }
        Ok(())
    }
}
