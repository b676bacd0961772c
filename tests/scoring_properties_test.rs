use talentfit_backend::scoring::fit::{compute_fit, SubScoreInput};
use talentfit_backend::scoring::ranking::{
    filter_candidates, sort_candidates, RankFilter, RankedCandidate, SortDir, SortKey,
};
use talentfit_backend::scoring::weights::ScoreWeights;

fn known(v: i32) -> SubScoreInput {
    SubScoreInput::known(v, "fixed")
}

#[test]
fn overall_bounded_across_input_grid() {
    let weight_sets = [
        ScoreWeights {
            tms: 0.5,
            srs: 0.3,
            rns: 0.2,
        },
        ScoreWeights {
            tms: 1.0,
            srs: 0.0,
            rns: 0.0,
        },
        ScoreWeights {
            tms: 0.34,
            srs: 0.33,
            rns: 0.33,
        },
    ];

    for weights in &weight_sets {
        assert!(weights.validate().is_ok());
        for tms in (0..=100).step_by(10) {
            for srs in (0..=100).step_by(20) {
                for rns in (0..=100).step_by(25) {
                    let fit = compute_fit(&known(tms), &known(srs), &known(rns), weights);
                    assert!(
                        (0..=100).contains(&fit.overall),
                        "overall {} out of range for {}/{}/{}",
                        fit.overall,
                        tms,
                        srs,
                        rns
                    );
                }
            }
        }
    }
}

#[test]
fn overall_is_monotone_in_each_sub_score() {
    let weights = ScoreWeights {
        tms: 0.5,
        srs: 0.3,
        rns: 0.2,
    };
    let base = compute_fit(&known(50), &known(50), &known(50), &weights);
    for value in (50..=100).step_by(10) {
        let fit = compute_fit(&known(value), &known(50), &known(50), &weights);
        assert!(fit.overall >= base.overall);
    }
}

fn pool() -> Vec<RankedCandidate> {
    let statuses = ["new", "reviewing", "shortlisted", "rejected", "interviewing"];
    (0..25)
        .map(|i| RankedCandidate {
            candidate_id: uuid::Uuid::new_v4(),
            name: format!("Candidate {}", i),
            location: if i % 3 == 0 {
                Some("Remote".to_string())
            } else {
                Some(format!("City {}", i % 5))
            },
            skills: vec![format!("skill-{}", i % 4)],
            status: statuses[i % statuses.len()].to_string(),
            overall: if i % 7 == 0 { None } else { Some((i * 13 % 101) as i32) },
            confidence: None,
            created_at: None,
        })
        .collect()
}

#[test]
fn filtering_is_idempotent_for_every_status() {
    for status in ["new", "reviewing", "shortlisted", "rejected", "interviewing"] {
        let filter = RankFilter {
            status: Some(status.to_string()),
            ..Default::default()
        };
        let once = filter_candidates(pool(), &filter);
        assert!(once.iter().all(|c| c.status == status));
        let twice = filter_candidates(once.clone(), &filter);
        assert_eq!(once, twice);
    }
}

#[test]
fn sort_reversal_holds_for_every_key() {
    for key in [SortKey::Overall, SortKey::Name, SortKey::CreatedAt] {
        let items = pool();
        let mut desc = items.clone();
        sort_candidates(&mut desc, key, SortDir::Desc);
        let mut asc = items;
        sort_candidates(&mut asc, key, SortDir::Asc);
        asc.reverse();
        assert_eq!(
            desc.iter().map(|c| c.candidate_id).collect::<Vec<_>>(),
            asc.iter().map(|c| c.candidate_id).collect::<Vec<_>>()
        );
    }
}

#[test]
fn combined_filters_intersect() {
    let filter = RankFilter {
        status: Some("new".to_string()),
        min_overall: Some(30),
        search: Some("candidate".to_string()),
    };
    let result = filter_candidates(pool(), &filter);
    assert!(result
        .iter()
        .all(|c| c.status == "new" && c.overall.unwrap() >= 30));
}
