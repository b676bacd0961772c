use sqlx::PgPool;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{is_valid_job_status, Job, JOB_STATUSES};
use crate::scoring::weights::ScoreWeights;

const JOB_COLUMNS: &str = "id, external_id, title, company, location, description, \
     required_skills, nice_to_have_skills, weight_tms, weight_srs, weight_rns, \
     status, published_at, created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let defaults = get_config().default_weights;
        let weights = ScoreWeights {
            tms: payload.weight_tms.unwrap_or(defaults.tms),
            srs: payload.weight_srs.unwrap_or(defaults.srs),
            rns: payload.weight_rns.unwrap_or(defaults.rns),
        };
        weights.validate().map_err(Error::BadRequest)?;

        let status = payload.status.unwrap_or_else(|| "open".to_string());
        validate_status(&status)?;

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                external_id, title, company, location, description,
                required_skills, nice_to_have_skills,
                weight_tms, weight_srs, weight_rns,
                status, published_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&payload.external_id)
        .bind(&payload.title)
        .bind(&payload.company)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(&payload.required_skills)
        .bind(&payload.nice_to_have_skills)
        .bind(weights.tms)
        .bind(weights.srs)
        .bind(weights.rns)
        .bind(&status)
        .bind(payload.published_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let existing = self.get_by_id(id).await?;

        let weights = ScoreWeights {
            tms: payload.weight_tms.unwrap_or(existing.weight_tms),
            srs: payload.weight_srs.unwrap_or(existing.weight_srs),
            rns: payload.weight_rns.unwrap_or(existing.weight_rns),
        };
        weights.validate().map_err(Error::BadRequest)?;

        if let Some(ref status) = payload.status {
            validate_status(status)?;
        }

        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET
                external_id = COALESCE($2, external_id),
                title = COALESCE($3, title),
                company = COALESCE($4, company),
                location = COALESCE($5, location),
                description = COALESCE($6, description),
                required_skills = COALESCE($7, required_skills),
                nice_to_have_skills = COALESCE($8, nice_to_have_skills),
                weight_tms = $9,
                weight_srs = $10,
                weight_rns = $11,
                status = COALESCE($12, status),
                published_at = COALESCE($13, published_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(&payload.external_id)
        .bind(&payload.title)
        .bind(&payload.company)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(&payload.required_skills)
        .bind(&payload.nice_to_have_skills)
        .bind(weights.tms)
        .bind(weights.srs)
        .bind(weights.rns)
        .bind(&payload.status)
        .bind(payload.published_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push(format!("status = ${}", args.len() + 1));
            args.push(status);
        }
        if let Some(company) = query.company {
            filters.push(format!("company ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", company));
        }
        if let Some(search) = query.search {
            let first = args.len() + 1;
            let second = first + 1;
            filters.push(format!(
                "(title ILIKE ${} OR location ILIKE ${})",
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
            "SELECT {} FROM jobs {} ORDER BY COALESCE(published_at, created_at) DESC LIMIT ${} OFFSET ${}",
            JOB_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
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

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_open(&self, limit: i64) -> Result<Vec<Job>> {
        let limit = if limit <= 0 { 20 } else { limit.min(100) };
        let items = sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {} FROM jobs
            WHERE status = 'open'
            ORDER BY COALESCE(published_at, created_at) DESC
            LIMIT $1
            "#,
            JOB_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn count_open(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE status = 'open'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn validate_status(status: &str) -> Result<()> {
    if !is_valid_job_status(status) {
        return Err(Error::BadRequest(format!(
            "Unknown job status '{}', expected one of: {}",
            status,
            JOB_STATUSES.join(", ")
        )));
    }
    Ok(())
}
