pub mod candidate_service;
pub mod export_service;
pub mod fit_score_service;
pub mod job_service;
pub mod notification_service;
pub mod referral_service;
pub mod score_queue_service;
pub mod shortlist_service;
