//! Validation summary for one game
//!
//! Batting issues and uncertified/unmarked fielding issues are warnings.
//! Duplicate and missing field positions make `all_valid` false, but nothing
//! here prevents the caller from saving.

use serde::Serialize;

use crate::batting::BattingIssue;
use crate::fielding::FieldingIssue;
use crate::roster::Roster;
use crate::schedule::GameNumber;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameValidation {
    pub game_number: GameNumber,
    pub batting: Vec<BattingIssue>,
    pub fielding: Vec<FieldingIssue>,
}

impl GameValidation {
    /// No blocking fielding issue
    pub fn all_valid(&self) -> bool {
        !self.fielding.iter().any(FieldingIssue::is_blocking)
    }

    /// Nothing at all to report
    pub fn is_clean(&self) -> bool {
        self.batting.is_empty() && self.fielding.is_empty()
    }

    pub fn errors(&self, roster: &Roster) -> Vec<String> {
        self.fielding
            .iter()
            .filter(|i| i.is_blocking())
            .map(|i| format!("Game {}, {}", self.game_number, i.describe(roster)))
            .collect()
    }

    pub fn warnings(&self, roster: &Roster) -> Vec<String> {
        let batting = self
            .batting
            .iter()
            .map(|i| format!("Game {}: {}", self.game_number, i));
        let fielding = self
            .fielding
            .iter()
            .filter(|i| !i.is_blocking())
            .map(|i| format!("Game {}, {}", self.game_number, i.describe(roster)));
        batting.chain(fielding).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fielding::{FieldingIssueKind, Position};
    use crate::roster::PlayerId;

    #[test]
    fn test_blocking_classification() {
        let roster = Roster::from_rows([("Ann", "Lee", 1)]).unwrap();
        let mut report = GameValidation {
            game_number: 4,
            batting: vec![BattingIssue::GapInSequence(vec![2, 3])],
            fielding: vec![FieldingIssue {
                inning: 1,
                kind: FieldingIssueKind::UncertifiedCatcher { player: PlayerId(0) },
            }],
        };
        assert!(report.all_valid());
        assert!(!report.is_clean());
        assert_eq!(
            report.warnings(&roster),
            vec![
                "Game 4: Gaps in batting order - missing positions [2, 3]".to_string(),
                "Game 4, Inning 1: Player Ann Lee assigned to Catcher but not marked as capable".to_string(),
            ]
        );

        report.fielding.push(FieldingIssue {
            inning: 2,
            kind: FieldingIssueKind::MissingCoverage { position: Position::Shortstop },
        });
        assert!(!report.all_valid());
        assert_eq!(report.errors(&roster), vec!["Game 4, Inning 2: Missing position: SS".to_string()]);
    }
}
