use serde::Serialize;

use crate::models::match_model::{MatchResponse, Round};

/// A tournament's matches partitioned by round, in the order the matches
/// were supplied. Matches whose stored round label is not one of the three
/// recognized tokens are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct Bracket {
    #[serde(rename = "QF")]
    pub quarter_finals: Vec<MatchResponse>,
    #[serde(rename = "SF")]
    pub semi_finals: Vec<MatchResponse>,
    #[serde(rename = "FINAL")]
    pub finals: Vec<MatchResponse>,
}

impl Bracket {
    /// A bracket is complete once a final match exists and has a winner.
    pub fn is_complete(&self) -> bool {
        self.finals.first().is_some_and(|m| m.winner.is_some())
    }
}

/// Partition a tournament's matches into `{QF, SF, FINAL}` groups.
/// Pure: no side effects, deterministic, idempotent on the same input.
pub fn organize_by_round(matches: Vec<MatchResponse>) -> Bracket {
    let mut bracket = Bracket {
        quarter_finals: Vec::new(),
        semi_finals: Vec::new(),
        finals: Vec::new(),
    };

    for m in matches {
        match Round::parse(&m.round) {
            Some(Round::QuarterFinal) => bracket.quarter_finals.push(m),
            Some(Round::SemiFinal) => bracket.semi_finals.push(m),
            Some(Round::Final) => bracket.finals.push(m),
            None => {} // unrecognized legacy label, not part of the bracket
        }
    }

    bracket
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::TeamSummary;
    use chrono::Utc;
    use uuid::Uuid;

    fn match_in_round(round: &str, winner: Option<&str>) -> MatchResponse {
        let team_a = TeamSummary { id: Uuid::new_v4(), name: "Lions".to_string() };
        let team_b = TeamSummary { id: Uuid::new_v4(), name: "Tigers".to_string() };
        let winner = winner.map(|name| {
            if name == "Lions" { team_a.clone() } else { team_b.clone() }
        });

        MatchResponse {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            team_a: Some(team_a),
            team_b: Some(team_b),
            winner,
            round: round.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_input_yields_three_empty_groups() {
        let bracket = organize_by_round(Vec::new());
        assert!(bracket.quarter_finals.is_empty());
        assert!(bracket.semi_finals.is_empty());
        assert!(bracket.finals.is_empty());
    }

    #[test]
    fn test_partitions_each_match_into_exactly_one_group() {
        let matches = vec![
            match_in_round("QF", None),
            match_in_round("SF", None),
            match_in_round("QF", None),
            match_in_round("FINAL", None),
        ];
        let total = matches.len();

        let bracket = organize_by_round(matches);
        assert_eq!(bracket.quarter_finals.len(), 2);
        assert_eq!(bracket.semi_finals.len(), 1);
        assert_eq!(bracket.finals.len(), 1);
        assert_eq!(
            bracket.quarter_finals.len() + bracket.semi_finals.len() + bracket.finals.len(),
            total
        );
    }

    #[test]
    fn test_preserves_supplied_order_within_a_group() {
        let first = match_in_round("QF", None);
        let second = match_in_round("QF", None);
        let third = match_in_round("QF", None);
        let ids = [first.id, second.id, third.id];

        let bracket = organize_by_round(vec![first, second, third]);
        let organized: Vec<_> = bracket.quarter_finals.iter().map(|m| m.id).collect();
        assert_eq!(organized, ids);
    }

    #[test]
    fn test_drops_unrecognized_round_labels() {
        let matches = vec![
            match_in_round("QF", None),
            match_in_round("SEMI", None),
            match_in_round("qf", None),
            match_in_round("FINAL", None),
        ];

        let bracket = organize_by_round(matches);
        assert_eq!(bracket.quarter_finals.len(), 1);
        assert!(bracket.semi_finals.is_empty());
        assert_eq!(bracket.finals.len(), 1);
    }

    #[test]
    fn test_idempotent_on_repeated_calls() {
        let matches = vec![
            match_in_round("SF", None),
            match_in_round("FINAL", Some("Lions")),
            match_in_round("SF", None),
        ];

        let once = organize_by_round(matches.clone());
        let twice = organize_by_round(matches);

        let ids = |ms: &[MatchResponse]| ms.iter().map(|m| m.id).collect::<Vec<_>>();
        assert_eq!(ids(&once.quarter_finals), ids(&twice.quarter_finals));
        assert_eq!(ids(&once.semi_finals), ids(&twice.semi_finals));
        assert_eq!(ids(&once.finals), ids(&twice.finals));
    }

    #[test]
    fn test_completeness() {
        let no_final = organize_by_round(vec![match_in_round("SF", None)]);
        assert!(!no_final.is_complete());

        let undecided = organize_by_round(vec![match_in_round("FINAL", None)]);
        assert!(!undecided.is_complete());

        let decided = organize_by_round(vec![match_in_round("FINAL", Some("Tigers"))]);
        assert!(decided.is_complete());
    }

    #[test]
    fn test_serializes_under_round_tokens() {
        let bracket = organize_by_round(vec![match_in_round("FINAL", None)]);
        let json = serde_json::to_value(&bracket).unwrap();
        assert!(json.get("QF").is_some());
        assert!(json.get("SF").is_some());
        assert_eq!(json.get("FINAL").unwrap().as_array().unwrap().len(), 1);
    }
}
