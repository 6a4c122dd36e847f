//! Read-only report projections
//!
//! [`GamePlan`] is the per-game lineup sheet handed to coaches. The fairness
//! tables render the distributions from [`crate::fairness`] as plain text.

use std::fmt;

use serde::Serialize;

use crate::error::LineupError;
use crate::fairness::{BattingDistribution, BenchSummary, FieldingDistribution};
use crate::fielding::Position;
use crate::roster::PlayerId;
use crate::schedule::{Game, GameNumber};
use crate::team::{Team, TeamInfo};

const RULE_WIDTH: usize = 80;

const LEGEND: [&str; 3] = [
    "P - Pitcher, C - Catcher, 1B - First Base, 2B - Second Base, 3B - Third Base",
    "SS - Shortstop, LF - Left Field, RF - Right Field, LC - Left Center, RC - Right Center",
    "OUT - Player Unavailable",
];

/// Batting column of the plan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slot")]
pub enum BattingCell {
    Slot(usize),
    Out,
    /// On the roster but not in the stored order
    Bench,
}

impl fmt::Display for BattingCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattingCell::Slot(n) => write!(f, "{}", n),
            BattingCell::Out => f.write_str("OUT"),
            BattingCell::Bench => f.write_str("Bench"),
        }
    }
}

/// One player's line on the plan
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanRow {
    pub player: PlayerId,
    pub jersey_number: u32,
    pub name: String,
    pub available: bool,
    pub batting: BattingCell,
    /// Position per inning, None where the inning has no assignment
    pub positions: Vec<Option<Position>>,
}

/// Lineup sheet for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GamePlan {
    pub info: TeamInfo,
    pub game: Game,
    pub rows: Vec<PlanRow>,
}

impl GamePlan {
    /// Rows follow the stored batting order (roster order if there is none);
    /// roster players missing from it come last as `Bench`. Unavailable
    /// players show `OUT` in every column.
    pub fn build(team: &Team, game_number: GameNumber) -> Result<Self, LineupError> {
        let game = team.schedule().require(game_number)?.clone();
        let roster = team.roster();
        let availability = team.availability_for(game_number);
        let rotation = team.fielding_rotations().get(game_number);

        let order: Vec<PlayerId> = match team.batting_orders().get(game_number) {
            Some(order) => order.iter().filter(|id| roster.contains(*id)).collect(),
            None => roster.ids().collect(),
        };
        let benched = roster.ids().filter(|id| !order.contains(id));

        let lineup = order
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, BattingCell::Slot(i + 1)))
            .chain(benched.map(|id| (id, BattingCell::Bench)));

        let mut rows = Vec::with_capacity(roster.len());
        for (id, batting) in lineup {
            let Some(player) = roster.get(id) else {
                continue;
            };
            let available = availability.is_available(id);
            let positions = game
                .inning_numbers()
                .map(|inning| {
                    let assigned = rotation.and_then(|r| r.inning(inning)).and_then(|p| p.get(id));
                    match assigned {
                        Some(_) if !available => Some(Position::Out),
                        other => other,
                    }
                })
                .collect();

            rows.push(PlanRow {
                player: id,
                jersey_number: player.jersey_number,
                name: player.full_name(),
                available,
                batting: if available { batting } else { BattingCell::Out },
                positions,
            });
        }

        Ok(Self {
            info: team.info.clone(),
            game,
            rows,
        })
    }

    /// Plain-text sheet with team header, lineup table and position legend
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if !self.info.team_name.is_empty() {
            let mut header = self.info.team_name.clone();
            if !self.info.league.is_empty() {
                header.push_str(&format!(" ({})", self.info.league));
            }
            out.push_str(&format!("TEAM: {}\n", header));

            if !self.info.head_coach.is_empty() {
                let mut coach = format!("COACH: {}", self.info.head_coach);
                let assistants = self.info.assistants();
                if !assistants.is_empty() {
                    coach.push_str(&format!(" | ASSISTANTS: {}", assistants.join(", ")));
                }
                out.push_str(&format!("{}\n", coach));
            }
        }

        out.push_str(&format!(
            "GAME {} LINEUP - {} - {}\n",
            self.game.game_number,
            self.game.opponent,
            self.game.date_time_text()
        ));
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push_str("\n\n");

        let mut header = vec![
            "Batting Order".to_string(),
            "Jersey #".to_string(),
            "Player Name".to_string(),
            "Available".to_string(),
        ];
        header.extend(self.game.inning_numbers().map(|i| format!("Inning {}", i)));

        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.batting.to_string(),
                    row.jersey_number.to_string(),
                    row.name.clone(),
                    if row.available { "Yes" } else { "No" }.to_string(),
                ];
                cells.extend(
                    row.positions
                        .iter()
                        .map(|p| p.map(|p| p.to_string()).unwrap_or_else(|| "N/A".to_string())),
                );
                cells
            })
            .collect();

        out.push_str(&render_table(&header, &body));
        out.push_str("\n\nPOSITION LEGEND:\n");
        out.push_str(&"-".repeat(20));
        out.push('\n');
        for line in LEGEND {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Right-aligned columns separated by two spaces
fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![line(header)];
    lines.extend(rows.iter().map(|row| line(row)));
    lines.join("\n")
}

// ============================================================================
// FAIRNESS TABLES
// ============================================================================

/// Player x slot counts with the average slot
pub fn batting_table_text(distribution: &BattingDistribution) -> String {
    let mut header = vec!["Player".to_string()];
    header.extend((1..=distribution.slots).map(|s| format!("#{}", s)));
    header.push("Avg".to_string());

    let rows: Vec<Vec<String>> = distribution
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.clone()];
            cells.extend(row.counts.iter().map(|c| c.to_string()));
            cells.push(
                row.average_slot()
                    .map(|avg| format!("{:.1}", avg))
                    .unwrap_or_else(|| "-".to_string()),
            );
            cells
        })
        .collect();

    render_table(&header, &rows)
}

/// Position-group counts and percentages
pub fn fielding_table_text(distribution: &FieldingDistribution) -> String {
    let mut header: Vec<String> = ["Player", "Infield", "Outfield", "Bench"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if distribution.includes_out {
        header.push("Out".to_string());
    }
    header.extend(["Total", "Infield %", "Outfield %", "Bench %"].iter().map(|s| s.to_string()));
    if distribution.includes_out {
        header.push("Out %".to_string());
    }

    let rows: Vec<Vec<String>> = distribution
        .rows
        .iter()
        .map(|row| {
            let c = &row.counts;
            let mut cells = vec![
                row.label.clone(),
                c.infield.to_string(),
                c.outfield.to_string(),
                c.bench.to_string(),
            ];
            if distribution.includes_out {
                cells.push(c.out.to_string());
            }
            cells.push(c.total_innings.to_string());
            cells.push(format!("{:.1}", c.infield_pct()));
            cells.push(format!("{:.1}", c.outfield_pct()));
            cells.push(format!("{:.1}", c.bench_pct()));
            if distribution.includes_out {
                cells.push(format!("{:.1}", c.out_pct()));
            }
            cells
        })
        .collect();

    render_table(&header, &rows)
}

/// One-line bench spread
pub fn bench_summary_text(summary: &BenchSummary) -> String {
    format!(
        "Bench %: mean {:.1}, max {:.1}, min {:.1}, std dev {:.1}",
        summary.mean, summary.max, summary.min, summary.std_dev
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Availability;
    use crate::batting::BattingOrder;
    use crate::config::EngineConfig;
    use chrono::{NaiveDate, NaiveTime};

    fn team() -> Team {
        let mut team = Team::new(EngineConfig::default());
        team.info = TeamInfo {
            team_name: "Hawks".into(),
            league: "Minors".into(),
            head_coach: "Pat Quinn".into(),
            assistant_coach1: String::new(),
            assistant_coach2: "Lou Park".into(),
        };
        for (jersey, first) in [(4, "Ann"), (8, "Bo"), (15, "Cy")] {
            team.add_player(first, "Smith", jersey).unwrap();
        }
        team.add_game(
            Game::new(1, "Tigers", 2)
                .with_date(NaiveDate::from_ymd_opt(2023, 6, 11).unwrap())
                .with_time(NaiveTime::from_hms_opt(17, 30, 0).unwrap()),
        )
        .unwrap();
        team
    }

    #[test]
    fn test_plan_rows_follow_batting_order() {
        let mut team = team();
        team.set_availability(1, PlayerId(0), Availability::unavailable()).unwrap();
        team.set_batting_order(1, BattingOrder::from_ids(vec![PlayerId(2), PlayerId(1), PlayerId(0)]))
            .unwrap();
        team.fielding_inning(1, 1).unwrap();

        let plan = GamePlan::build(&team, 1).unwrap();
        let batting: Vec<BattingCell> = plan.rows.iter().map(|r| r.batting).collect();
        assert_eq!(batting, vec![BattingCell::Slot(1), BattingCell::Slot(2), BattingCell::Out]);

        // Inning 1 exists, inning 2 was never opened
        let ann = &plan.rows[2];
        assert_eq!(ann.positions, vec![Some(Position::Out), None]);
        let cy = &plan.rows[0];
        assert_eq!(cy.positions, vec![Some(Position::FirstBase), None]);
    }

    #[test]
    fn test_players_missing_from_order_are_benched() {
        let mut team = team();
        team.set_batting_order(1, BattingOrder::default()).unwrap();
        // Stored before a late addition
        team.add_player("Dee", "Smith", 21).unwrap();

        let plan = GamePlan::build(&team, 1).unwrap();
        assert_eq!(plan.rows.len(), 4);
        assert_eq!(plan.rows[3].batting, BattingCell::Bench);
        assert_eq!(plan.rows[3].name, "Dee Smith");
    }

    #[test]
    fn test_render_text_header_and_legend() {
        let plan = GamePlan::build(&team(), 1).unwrap();
        let text = plan.render_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "TEAM: Hawks (Minors)");
        assert_eq!(lines[1], "COACH: Pat Quinn | ASSISTANTS: Lou Park");
        assert_eq!(lines[2], "GAME 1 LINEUP - Tigers - 2023-06-11 at 05:30 PM");
        assert_eq!(lines[3], "=".repeat(80));
        assert!(lines[5].contains("Batting Order") && lines[5].contains("Inning 2"));
        assert!(text.contains("N/A"));
        assert!(text.ends_with("OUT - Player Unavailable\n"));
    }

    #[test]
    fn test_fairness_tables() {
        let mut team = team();
        team.batting_order(1).unwrap();
        team.fielding_rotation(1).unwrap();

        let batting = batting_table_text(&team.batting_distribution());
        assert!(batting.lines().next().unwrap().trim_start().starts_with("Player"));
        assert!(batting.contains("Ann Smith (#4)"));

        let fielding = fielding_table_text(&team.fielding_distribution());
        assert!(!fielding.contains("Out %"));
        let per_game = fielding_table_text(&team.game_fielding_distribution(1).unwrap());
        assert!(per_game.contains("Out %"));
    }
}
