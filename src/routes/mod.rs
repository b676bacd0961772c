pub mod candidate_routes;
pub mod dashboard;
pub mod export;
pub mod fit_score_routes;
pub mod health;
pub mod job_routes;
pub mod referral_routes;
pub mod shortlist_routes;
