//! Fairness analysis across games
//!
//! Pure functions over the roster, schedule and assignment history. Nothing
//! here is stored; reports are recomputed whenever they are asked for.

use serde::Serialize;

use crate::batting::BattingOrders;
use crate::fielding::{FieldingRotation, FieldingRotations, Position, PositionGroup};
use crate::roster::{PlayerId, Roster};
use crate::schedule::{Game, Schedule};

/// `count / total * 100` rounded to one decimal (ties to even), 0.0 when
/// `total` is zero
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64 * 1000.0).round_ties_even() / 10.0
    }
}

// ============================================================================
// BATTING
// ============================================================================

/// How often one player batted in each slot
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattingRow {
    pub player: PlayerId,
    pub label: String,
    /// `counts[slot - 1]`
    pub counts: Vec<u32>,
}

impl BattingRow {
    pub fn games_batted(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Mean slot over all recorded games, None if the player never batted
    pub fn average_slot(&self) -> Option<f64> {
        let games = self.games_batted();
        if games == 0 {
            return None;
        }
        let weighted: u32 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| (i as u32 + 1) * count)
            .sum();
        Some(weighted as f64 / games as f64)
    }
}

/// Player x slot matrix over every batting order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattingDistribution {
    pub slots: usize,
    pub rows: Vec<BattingRow>,
}

impl BattingDistribution {
    pub fn row(&self, player: PlayerId) -> Option<&BattingRow> {
        self.rows.iter().find(|r| r.player == player)
    }

    /// Times `player` batted in the 1-based `slot`
    pub fn count(&self, player: PlayerId, slot: usize) -> u32 {
        self.row(player)
            .and_then(|r| slot.checked_sub(1).and_then(|i| r.counts.get(i)))
            .copied()
            .unwrap_or(0)
    }
}

/// Count slot occupancy per player across every stored order. Slots past the
/// roster size and players no longer on the roster are ignored.
pub fn batting_distribution(roster: &Roster, orders: &BattingOrders) -> BattingDistribution {
    let slots = roster.len();
    let mut rows: Vec<BattingRow> = roster
        .iter()
        .map(|p| BattingRow {
            player: p.id,
            label: p.label(),
            counts: vec![0; slots],
        })
        .collect();

    for (_, order) in orders.iter() {
        for (i, player) in order.iter().enumerate().take(slots) {
            if let Some(index) = roster.index_of(player) {
                rows[index].counts[i] += 1;
            }
        }
    }

    BattingDistribution { slots, rows }
}

// ============================================================================
// FIELDING
// ============================================================================

/// Innings per position group for one player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PositionCounts {
    pub infield: u32,
    pub outfield: u32,
    pub bench: u32,
    pub out: u32,
    pub total_innings: u32,
}

impl PositionCounts {
    /// Record one inning. OUT is always counted; it only adds to
    /// `total_innings` when `out_in_total` is set.
    pub fn record(&mut self, position: Position, out_in_total: bool) {
        match position.group() {
            PositionGroup::Infield => self.infield += 1,
            PositionGroup::Outfield => self.outfield += 1,
            PositionGroup::Bench => self.bench += 1,
            PositionGroup::Out => {
                self.out += 1;
                if !out_in_total {
                    return;
                }
            }
        }
        self.total_innings += 1;
    }

    pub fn infield_pct(&self) -> f64 {
        percentage(self.infield, self.total_innings)
    }

    pub fn outfield_pct(&self) -> f64 {
        percentage(self.outfield, self.total_innings)
    }

    pub fn bench_pct(&self) -> f64 {
        percentage(self.bench, self.total_innings)
    }

    pub fn out_pct(&self) -> f64 {
        percentage(self.out, self.total_innings)
    }
}

/// Position-group counts for one player
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldingRow {
    pub player: PlayerId,
    pub label: String,
    pub counts: PositionCounts,
}

/// Position-group table for every player
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldingDistribution {
    /// OUT innings are part of `total_innings`
    pub includes_out: bool,
    pub rows: Vec<FieldingRow>,
}

impl FieldingDistribution {
    pub fn row(&self, player: PlayerId) -> Option<&FieldingRow> {
        self.rows.iter().find(|r| r.player == player)
    }
}

fn empty_rows(roster: &Roster) -> Vec<FieldingRow> {
    roster
        .iter()
        .map(|p| FieldingRow {
            player: p.id,
            label: p.label(),
            counts: PositionCounts::default(),
        })
        .collect()
}

fn accumulate(rows: &mut [FieldingRow], roster: &Roster, rotation: &FieldingRotation, game: &Game, out_in_total: bool) {
    for inning in game.inning_numbers() {
        let Some(positions) = rotation.inning(inning) else {
            continue;
        };
        for (index, player) in roster.ids().enumerate() {
            if let Some(position) = positions.get(player) {
                rows[index].counts.record(position, out_in_total);
            }
        }
    }
}

/// Cross-game fielding table. Games missing from the schedule are skipped;
/// OUT innings do not count toward `total_innings`.
pub fn fielding_distribution(roster: &Roster, rotations: &FieldingRotations, schedule: &Schedule) -> FieldingDistribution {
    let mut rows = empty_rows(roster);
    for (game_number, rotation) in rotations.iter() {
        match schedule.get(game_number) {
            Some(game) => accumulate(&mut rows, roster, rotation, game, false),
            None => tracing::debug!("Skipping rotation for unscheduled game {}", game_number),
        }
    }
    FieldingDistribution {
        includes_out: false,
        rows,
    }
}

/// Single-game fielding table with OUT counted in the total. Players with no
/// recorded innings are left out.
pub fn game_fielding_distribution(roster: &Roster, rotation: &FieldingRotation, game: &Game) -> FieldingDistribution {
    let mut rows = empty_rows(roster);
    accumulate(&mut rows, roster, rotation, game, true);
    rows.retain(|r| r.counts.total_innings > 0);
    FieldingDistribution {
        includes_out: true,
        rows,
    }
}

/// Spread of bench time across players
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BenchSummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Sample standard deviation; 0.0 with fewer than two players
    pub std_dev: f64,
}

/// Bench percentage statistics, None for an empty table
pub fn bench_summary(distribution: &FieldingDistribution) -> Option<BenchSummary> {
    let values: Vec<f64> = distribution.rows.iter().map(|r| r.counts.bench_pct()).collect();
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    let std_dev = if values.len() < 2 {
        0.0
    } else {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };

    let round1 = |v: f64| (v * 10.0).round() / 10.0;
    Some(BenchSummary {
        mean: round1(mean),
        max: round1(max),
        min: round1(min),
        std_dev: round1(std_dev),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batting::BattingOrder;
    use crate::config::EngineConfig;
    use crate::fielding::InningPositions;

    fn roster(n: u32) -> Roster {
        let mut roster = Roster::new();
        for jersey in 1..=n {
            roster.add_player(format!("First{jersey}"), format!("Last{jersey}"), jersey).unwrap();
        }
        roster
    }

    #[test]
    fn test_percentage_rounding_and_zero_total() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        // exact ties round to the even digit
        assert_eq!(percentage(1, 400), 0.2);
        assert_eq!(percentage(3, 400), 0.8);
        assert_eq!(percentage(1, 16), 6.2);
    }

    #[test]
    fn test_batting_distribution_counts_slots() {
        let roster = roster(3);
        let mut orders = BattingOrders::new();
        orders.insert(1, BattingOrder::from_ids(vec![PlayerId(0), PlayerId(1), PlayerId(2)]));
        orders.insert(2, BattingOrder::from_ids(vec![PlayerId(2), PlayerId(1), PlayerId(0)]));
        // The stale id is ignored; slots past the roster length are dropped
        orders.insert(3, BattingOrder::from_ids(vec![PlayerId(9), PlayerId(0), PlayerId(1), PlayerId(2)]));

        let dist = batting_distribution(&roster, &orders);
        assert_eq!(dist.slots, 3);
        assert_eq!(dist.count(PlayerId(0), 1), 1);
        assert_eq!(dist.count(PlayerId(0), 2), 1);
        assert_eq!(dist.count(PlayerId(0), 3), 1);
        assert_eq!(dist.count(PlayerId(1), 2), 2);
        assert_eq!(dist.count(PlayerId(1), 3), 1);
        assert_eq!(dist.count(PlayerId(2), 3), 1);
        assert_eq!(dist.count(PlayerId(2), 1), 1);
        assert_eq!(dist.row(PlayerId(2)).unwrap().games_batted(), 2);
        assert_eq!(dist.row(PlayerId(0)).unwrap().average_slot(), Some(2.0));
    }

    #[test]
    fn test_average_slot_none_without_games() {
        let roster = roster(2);
        let dist = batting_distribution(&roster, &BattingOrders::new());
        assert_eq!(dist.row(PlayerId(0)).unwrap().average_slot(), None);
    }

    fn rotation_with(roster: &Roster, innings: &[&[Position]]) -> FieldingRotation {
        let mut rotation = FieldingRotation::new();
        for (i, row) in innings.iter().enumerate() {
            let positions = InningPositions::from_assignments(roster.ids().zip(row.iter().copied()));
            rotation.set_inning(i as u32 + 1, positions);
        }
        rotation
    }

    #[test]
    fn test_fielding_distribution_excludes_out_from_total() {
        let roster = roster(2);
        let schedule = Schedule::initialize(1, &EngineConfig::default().with_default_innings(3)).unwrap();
        let mut rotations = FieldingRotations::new();
        rotations.insert(
            1,
            rotation_with(
                &roster,
                &[
                    &[Position::Pitcher, Position::Out],
                    &[Position::Catcher, Position::Out],
                    &[Position::Bench, Position::Out],
                ],
            ),
        );
        // Not on the schedule
        rotations.insert(2, rotation_with(&roster, &[&[Position::Bench, Position::Bench]]));

        let dist = fielding_distribution(&roster, &rotations, &schedule);
        let first = dist.row(PlayerId(0)).unwrap().counts;
        assert_eq!(first.total_innings, 3);
        assert_eq!((first.infield, first.outfield, first.bench), (1, 1, 1));
        assert_eq!(first.bench_pct(), 33.3);

        let second = dist.row(PlayerId(1)).unwrap().counts;
        assert_eq!(second.out, 3);
        assert_eq!(second.total_innings, 0);
        assert_eq!(second.bench_pct(), 0.0);
        assert_eq!(second.infield_pct(), 0.0);
    }

    #[test]
    fn test_game_distribution_counts_out_in_total() {
        let roster = roster(3);
        let game = Game::new(1, "Hawks", 2);
        let rotation = rotation_with(
            &roster,
            &[&[Position::Pitcher, Position::Out, Position::Bench], &[Position::SecondBase, Position::Out]],
        );

        let dist = game_fielding_distribution(&roster, &rotation, &game);
        assert!(dist.includes_out);
        let second = dist.row(PlayerId(1)).unwrap().counts;
        assert_eq!(second.total_innings, 2);
        assert_eq!(second.out_pct(), 100.0);
        assert_eq!(dist.row(PlayerId(2)).unwrap().counts.total_innings, 1);
    }

    #[test]
    fn test_bench_summary() {
        let roster = roster(2);
        let game = Game::new(1, "Hawks", 2);
        let rotation = rotation_with(
            &roster,
            &[&[Position::Bench, Position::Pitcher], &[Position::Bench, Position::Bench]],
        );
        let dist = game_fielding_distribution(&roster, &rotation, &game);
        let summary = bench_summary(&dist).unwrap();
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.min, 50.0);
        assert_eq!(summary.mean, 75.0);
        assert_eq!(summary.std_dev, 35.4);

        let empty = FieldingDistribution { includes_out: false, rows: Vec::new() };
        assert!(bench_summary(&empty).is_none());
    }
}
