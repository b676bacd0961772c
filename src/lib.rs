pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;
pub mod utils;

use crate::services::{
    candidate_service::CandidateService, fit_score_service::FitScoreService,
    job_service::JobService, notification_service::NotificationService,
    referral_service::ReferralService, score_queue_service::ScoreQueueService,
    shortlist_service::ShortlistService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub candidate_service: CandidateService,
    pub job_service: JobService,
    pub fit_score_service: FitScoreService,
    pub referral_service: ReferralService,
    pub shortlist_service: ShortlistService,
    pub score_queue_service: ScoreQueueService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let candidate_service = CandidateService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let fit_score_service = FitScoreService::new(pool.clone());
        let referral_service = ReferralService::new(pool.clone());
        let shortlist_service = ShortlistService::new(pool.clone());
        let score_queue_service = ScoreQueueService::new(pool.clone());
        let notification_service =
            NotificationService::new(pool.clone(), config.ats_webhook_url.clone());

        Self {
            pool,
            candidate_service,
            job_service,
            fit_score_service,
            referral_service,
            shortlist_service,
            score_queue_service,
            notification_service,
        }
    }
}
