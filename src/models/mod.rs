pub mod candidate;
pub mod fit_score;
pub mod job;
pub mod referral;
pub mod score_event;
pub mod shortlist;
pub mod webhook_log;
