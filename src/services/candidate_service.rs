use std::collections::HashMap;

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::dto::candidate_dto::{CandidateListQuery, IntakeDay, RegisterCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{is_valid_candidate_status, Candidate, CANDIDATE_STATUSES};

const CANDIDATE_COLUMNS: &str =
    "id, name, email, phone, location, skills, soft_skills_rating, status, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

pub struct CandidateList {
    pub items: Vec<Candidate>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterCandidatePayload) -> Result<Candidate> {
        let exists_email = sqlx::query("SELECT id FROM candidates WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists_email.is_some() {
            return Err(Error::Conflict(
                "A candidate with this email address already exists".to_string(),
            ));
        }

        if let Some(ref phone) = payload.phone {
            if !phone.is_empty() {
                let exists_phone = sqlx::query("SELECT id FROM candidates WHERE phone = $1")
                    .bind(phone)
                    .fetch_optional(&self.pool)
                    .await?;
                if exists_phone.is_some() {
                    return Err(Error::Conflict(
                        "A candidate with this phone number already exists".to_string(),
                    ));
                }
            }
        }

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            INSERT INTO candidates (name, email, phone, location, skills, status)
            VALUES ($1, $2, $3, $4, $5, 'new')
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        ))
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.location)
        .bind(&payload.skills)
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    pub async fn get(&self, id: Uuid) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates WHERE id = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn list(&self, query: CandidateListQuery) -> Result<CandidateList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push(format!("status = ${}", args.len() + 1));
            args.push(status);
        }
        if let Some(location) = query.location {
            filters.push(format!("location ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", location));
        }
        if let Some(search) = query.search {
            let first = args.len() + 1;
            let second = first + 1;
            filters.push(format!(
                "(name ILIKE ${} OR email ILIKE ${})",
                first, second
            ));
            args.push(format!("%{}%", search.clone()));
            args.push(format!("%{}%", search));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {} FROM candidates {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            CANDIDATE_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM candidates {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Candidate>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(CandidateList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates ORDER BY created_at DESC",
            CANDIDATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Candidate> {
        if !is_valid_candidate_status(status) {
            return Err(Error::BadRequest(format!(
                "Unknown candidate status '{}', expected one of: {}",
                status,
                CANDIDATE_STATUSES.join(", ")
            )));
        }

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        ))
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn set_soft_skills_rating(&self, id: Uuid, rating: i32) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            UPDATE candidates
            SET soft_skills_rating = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        ))
        .bind(rating)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        Ok(())
    }

    pub async fn status_counts(&self) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS count FROM candidates GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        let mut counts = HashMap::new();
        for row in rows {
            counts.insert(row.try_get("status")?, row.try_get("count")?);
        }
        Ok(counts)
    }

    pub async fn intake_history(&self) -> Result<Vec<IntakeDay>> {
        let rows = sqlx::query(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS date, COUNT(*) AS count
            FROM candidates
            WHERE created_at > NOW() - INTERVAL '7 days'
            GROUP BY TO_CHAR(created_at, 'YYYY-MM-DD')
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(IntakeDay {
                    date: row.try_get("date")?,
                    count: row.try_get("count")?,
                })
            })
            .collect()
    }
}
