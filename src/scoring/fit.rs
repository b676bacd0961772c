use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::weights::ScoreWeights;

/// Substituted for a sub-score whose inputs are absent. The component is
/// marked `known = false` so consumers never mistake it for real signal.
pub const NEUTRAL_SCORE: i32 = 50;

const RNS_HIGH_THRESHOLD: i32 = 60;
const RNS_LOW_THRESHOLD: i32 = 25;

/// Points one submitted referral contributes per unit of strength.
const REFERRAL_STRENGTH_POINTS: i32 = 20;

#[derive(Debug, Clone)]
pub struct SubScoreInput {
    pub value: Option<i32>,
    pub explanation: String,
}

impl SubScoreInput {
    pub fn known(value: i32, explanation: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            explanation: explanation.into(),
        }
    }

    pub fn unknown(explanation: impl Into<String>) -> Self {
        Self {
            value: None,
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredComponent {
    pub value: i32,
    pub known: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FitBreakdown {
    pub tms: ScoredComponent,
    pub srs: ScoredComponent,
    pub rns: ScoredComponent,
    pub overall: i32,
    pub confidence: Confidence,
}

/// Technical match: overlap of the candidate's skills with the job's
/// required (75%) and nice-to-have (25%) skill lists, case-insensitive.
pub fn derive_tms(
    required_skills: &[String],
    nice_to_have_skills: &[String],
    candidate_skills: &[String],
) -> SubScoreInput {
    let required = normalize_skills(required_skills);
    if required.is_empty() {
        return SubScoreInput::unknown("Job lists no required skills");
    }

    let have = normalize_skills(candidate_skills);
    let required_hits = required.intersection(&have).count();
    let required_pct = required_hits as f64 / required.len() as f64;

    let nice = normalize_skills(nice_to_have_skills);
    let (nice_hits, nice_pct) = if nice.is_empty() {
        (0, 1.0)
    } else {
        let hits = nice.intersection(&have).count();
        (hits, hits as f64 / nice.len() as f64)
    };

    let value = clamp_score((100.0 * (required_pct * 0.75 + nice_pct * 0.25)).round() as i32);
    let explanation = if nice.is_empty() {
        format!(
            "Matched {}/{} required skills ({:.0}%)",
            required_hits,
            required.len(),
            required_pct * 100.0
        )
    } else {
        format!(
            "Matched {}/{} required ({:.0}%) and {}/{} nice-to-have ({:.0}%) skills",
            required_hits,
            required.len(),
            required_pct * 100.0,
            nice_hits,
            nice.len(),
            nice_pct * 100.0
        )
    };
    SubScoreInput::known(value, explanation)
}

/// Soft-skills rating is recruiter-entered and passed through as-is.
pub fn derive_srs(rating: Option<i32>) -> SubScoreInput {
    match rating {
        Some(r) => SubScoreInput::known(
            clamp_score(r),
            format!("Recruiter soft-skills assessment: {}", clamp_score(r)),
        ),
        None => SubScoreInput::unknown("No recruiter soft-skills assessment yet"),
    }
}

/// Referral network: each submitted referral contributes strength x 20
/// points, capped at 100. No submitted referrals means no signal.
pub fn derive_rns(referral_strengths: &[i32]) -> SubScoreInput {
    if referral_strengths.is_empty() {
        return SubScoreInput::unknown("No submitted referrals");
    }
    let strength_total: i32 = referral_strengths.iter().map(|s| (*s).clamp(1, 5)).sum();
    let value = (strength_total * REFERRAL_STRENGTH_POINTS).min(100);
    SubScoreInput::known(
        value,
        format!(
            "{} submitted referral(s), strength total {}",
            referral_strengths.len(),
            strength_total
        ),
    )
}

/// Weighted blend of the three sub-scores. Missing inputs substitute a
/// neutral value and cap confidence at `low`; weights are assumed to be
/// validated by the caller.
pub fn compute_fit(
    tms: &SubScoreInput,
    srs: &SubScoreInput,
    rns: &SubScoreInput,
    weights: &ScoreWeights,
) -> FitBreakdown {
    let tms = resolve(tms);
    let srs = resolve(srs);
    let rns = resolve(rns);

    let blended = tms.value as f64 * weights.tms
        + srs.value as f64 * weights.srs
        + rns.value as f64 * weights.rns;
    let overall = clamp_score(blended.round() as i32);

    let all_known = tms.known && srs.known && rns.known;
    let confidence = if !all_known || rns.value < RNS_LOW_THRESHOLD {
        Confidence::Low
    } else if rns.value >= RNS_HIGH_THRESHOLD {
        Confidence::High
    } else {
        Confidence::Medium
    };

    FitBreakdown {
        tms,
        srs,
        rns,
        overall,
        confidence,
    }
}

fn resolve(input: &SubScoreInput) -> ScoredComponent {
    match input.value {
        Some(v) => ScoredComponent {
            value: clamp_score(v),
            known: true,
            explanation: input.explanation.clone(),
        },
        None => ScoredComponent {
            value: NEUTRAL_SCORE,
            known: false,
            explanation: format!("{} (neutral score substituted)", input.explanation),
        },
    }
}

fn clamp_score(value: i32) -> i32 {
    value.clamp(0, 100)
}

fn normalize_skills(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::weights::DEFAULT_WEIGHTS;

    fn known(v: i32) -> SubScoreInput {
        SubScoreInput::known(v, "test")
    }

    #[test]
    fn known_inputs_blend_to_documented_value() {
        let fit = compute_fit(&known(90), &known(80), &known(70), &DEFAULT_WEIGHTS);
        assert_eq!(fit.overall, 83);
        assert_eq!(fit.confidence, Confidence::High);
    }

    #[test]
    fn overall_stays_within_bounds() {
        for (t, s, r) in [(0, 0, 0), (100, 100, 100), (0, 100, 0), (100, 0, 55)] {
            let fit = compute_fit(&known(t), &known(s), &known(r), &DEFAULT_WEIGHTS);
            assert!((0..=100).contains(&fit.overall), "overall {}", fit.overall);
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let fit = compute_fit(&known(150), &known(-20), &known(70), &DEFAULT_WEIGHTS);
        assert_eq!(fit.tms.value, 100);
        assert_eq!(fit.srs.value, 0);
        assert!((0..=100).contains(&fit.overall));
    }

    #[test]
    fn missing_input_substitutes_neutral_and_lowers_confidence() {
        let fit = compute_fit(
            &SubScoreInput::unknown("no data"),
            &known(80),
            &known(70),
            &DEFAULT_WEIGHTS,
        );
        assert_eq!(fit.tms.value, NEUTRAL_SCORE);
        assert!(!fit.tms.known);
        assert!(fit.tms.explanation.contains("neutral"));
        assert_eq!(fit.confidence, Confidence::Low);
    }

    #[test]
    fn weak_referral_network_caps_confidence() {
        let fit = compute_fit(&known(90), &known(90), &known(20), &DEFAULT_WEIGHTS);
        assert_eq!(fit.confidence, Confidence::Low);

        let fit = compute_fit(&known(90), &known(90), &known(40), &DEFAULT_WEIGHTS);
        assert_eq!(fit.confidence, Confidence::Medium);
    }

    #[test]
    fn tms_blends_required_and_nice_to_have() {
        let required = vec!["Rust".to_string(), "SQL".to_string()];
        let nice = vec!["Docker".to_string()];
        let skills = vec!["rust".to_string(), "sql".to_string(), "docker".to_string()];
        let tms = derive_tms(&required, &nice, &skills);
        assert_eq!(tms.value, Some(100));

        let partial = vec!["rust".to_string()];
        let tms = derive_tms(&required, &nice, &partial);
        // 0.5 * 0.75 + 0.0 * 0.25 = 0.375
        assert_eq!(tms.value, Some(38));
    }

    #[test]
    fn tms_unknown_without_required_skills() {
        let tms = derive_tms(&[], &[], &["rust".to_string()]);
        assert!(tms.value.is_none());
    }

    #[test]
    fn rns_accumulates_and_caps() {
        let rns = derive_rns(&[3]);
        assert_eq!(rns.value, Some(60));

        let rns = derive_rns(&[5, 5, 5]);
        assert_eq!(rns.value, Some(100));

        let rns = derive_rns(&[]);
        assert!(rns.value.is_none());
    }

    #[test]
    fn srs_passthrough_clamps() {
        assert_eq!(derive_srs(Some(130)).value, Some(100));
        assert!(derive_srs(None).value.is_none());
    }
}
