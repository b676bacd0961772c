use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// A candidate joined with the latest fit score for one job, as held in
/// memory while a recruiter works a ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate_id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub status: String,
    pub overall: Option<i32>,
    pub confidence: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RankFilter {
    pub status: Option<String>,
    pub min_overall: Option<i32>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Overall,
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

pub fn filter_candidates(items: Vec<RankedCandidate>, filter: &RankFilter) -> Vec<RankedCandidate> {
    let needle = filter
        .search
        .as_ref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    items
        .into_iter()
        .filter(|c| match &filter.status {
            Some(status) => c.status == *status,
            None => true,
        })
        .filter(|c| match filter.min_overall {
            Some(min) => c.overall.is_some_and(|o| o >= min),
            None => true,
        })
        .filter(|c| match &needle {
            Some(needle) => {
                c.name.to_lowercase().contains(needle)
                    || c.location
                        .as_ref()
                        .is_some_and(|l| l.to_lowercase().contains(needle))
                    || c.skills.iter().any(|s| s.to_lowercase().contains(needle))
            }
            None => true,
        })
        .collect()
}

/// Candidates without a score sort below every scored candidate. Id is the
/// final tiebreak so reversing the direction exactly reverses the order.
pub fn sort_candidates(items: &mut [RankedCandidate], key: SortKey, dir: SortDir) {
    items.sort_by(|a, b| {
        let ord = match key {
            SortKey::Overall => a.overall.unwrap_or(-1).cmp(&b.overall.unwrap_or(-1)),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ord = ord.then_with(|| a.candidate_id.cmp(&b.candidate_id));
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(name: &str, status: &str, overall: Option<i32>) -> RankedCandidate {
        RankedCandidate {
            candidate_id: Uuid::new_v4(),
            name: name.to_string(),
            location: Some("Berlin".to_string()),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            status: status.to_string(),
            overall,
            confidence: overall.map(|_| "medium".to_string()),
            created_at: Some(Utc::now()),
        }
    }

    fn sample() -> Vec<RankedCandidate> {
        vec![
            ranked("Alice", "new", Some(83)),
            ranked("Bob", "reviewing", Some(40)),
            ranked("Carol", "new", None),
            ranked("Dave", "shortlisted", Some(91)),
        ]
    }

    #[test]
    fn status_filter_returns_only_matching_and_is_idempotent() {
        let filter = RankFilter {
            status: Some("new".to_string()),
            ..Default::default()
        };
        let once = filter_candidates(sample(), &filter);
        assert_eq!(once.len(), 2);
        assert!(once.iter().all(|c| c.status == "new"));

        let twice = filter_candidates(once.clone(), &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn min_overall_drops_unscored_candidates() {
        let filter = RankFilter {
            min_overall: Some(50),
            ..Default::default()
        };
        let result = filter_candidates(sample(), &filter);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.overall.unwrap() >= 50));
    }

    #[test]
    fn search_covers_name_location_and_skills() {
        let by_name = filter_candidates(
            sample(),
            &RankFilter {
                search: Some("ali".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Alice");

        let by_skill = filter_candidates(
            sample(),
            &RankFilter {
                search: Some("rust".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_skill.len(), 4);

        let by_location = filter_candidates(
            sample(),
            &RankFilter {
                search: Some("berlin".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_location.len(), 4);
    }

    #[test]
    fn reversing_direction_reverses_order() {
        let items = sample();
        let mut desc = items.clone();
        sort_candidates(&mut desc, SortKey::Overall, SortDir::Desc);
        let mut asc = items;
        sort_candidates(&mut asc, SortKey::Overall, SortDir::Asc);

        let desc_ids: Vec<_> = desc.iter().map(|c| c.candidate_id).collect();
        let mut asc_ids: Vec<_> = asc.iter().map(|c| c.candidate_id).collect();
        asc_ids.reverse();
        assert_eq!(desc_ids, asc_ids);
    }

    #[test]
    fn unscored_candidates_sort_below_scored_descending() {
        let mut items = sample();
        sort_candidates(&mut items, SortKey::Overall, SortDir::Desc);
        assert_eq!(items[0].name, "Dave");
        assert_eq!(items[1].name, "Alice");
        assert_eq!(items.last().unwrap().name, "Carol");
    }

    #[test]
    fn sorts_by_name_case_insensitively() {
        let mut items = vec![
            ranked("bob", "new", None),
            ranked("Alice", "new", None),
            ranked("CAROL", "new", None),
        ];
        sort_candidates(&mut items, SortKey::Name, SortDir::Asc);
        let names: Vec<_> = items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "CAROL"]);
    }
}
