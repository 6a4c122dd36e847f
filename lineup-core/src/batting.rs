//! Batting orders
//!
//! A batting order is a permutation of the roster. Unavailable players keep a
//! slot in the permutation but are pushed to the end and shown as `OUT`.
//!
//! ## Operations
//!
//! - [`reconcile_on_availability_change`]: push newly unavailable players to the end
//! - [`auto_arrange`]: canonical repair (available first, unavailable last)
//! - [`parse_edited_slots`]: turn a grid of slot labels back into an order
//! - [`validate`]: duplicate and gap warnings over slot labels

use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityTable;
use crate::roster::{PlayerId, Roster};
use crate::schedule::GameNumber;

// ============================================================================
// TYPES
// ============================================================================

/// Batting sequence for one game; slot N is index N-1
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattingOrder(Vec<PlayerId>);

impl BattingOrder {
    /// Roster order
    pub fn identity(roster: &Roster) -> Self {
        Self(roster.ids().collect())
    }

    pub fn from_ids(ids: Vec<PlayerId>) -> Self {
        Self(ids)
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.0.iter().copied()
    }

    /// 1-based slot of a player
    pub fn slot_of(&self, player: PlayerId) -> Option<usize> {
        self.0.iter().position(|id| *id == player).map(|i| i + 1)
    }

    /// Player batting in a 1-based slot
    pub fn player_at(&self, slot: usize) -> Option<PlayerId> {
        slot.checked_sub(1).and_then(|i| self.0.get(i).copied())
    }

    /// Each roster player exactly once and nothing else
    pub fn is_permutation_of(&self, roster: &Roster) -> bool {
        let mut seen = FxHashSet::default();
        self.0.len() == roster.len()
            && self.0.iter().all(|id| roster.contains(*id) && seen.insert(*id))
    }

    /// Drop players not on the roster (and repeats), append missing roster
    /// players in roster order. Returns true when the order changed.
    pub fn sync(&mut self, roster: &Roster) -> bool {
        let mut seen = FxHashSet::default();
        let mut synced: Vec<PlayerId> = self
            .0
            .iter()
            .copied()
            .filter(|id| roster.contains(*id) && seen.insert(*id))
            .collect();
        synced.extend(roster.ids().filter(|id| !seen.contains(id)));

        let changed = synced != self.0;
        self.0 = synced;
        changed
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        self.0.retain(|id| *id != player);
    }

    /// Grid projection: `OUT` for unavailable players, the slot otherwise.
    /// Roster players missing from the order get an empty label.
    pub fn slot_labels(&self, roster: &Roster, availability: &AvailabilityTable) -> Vec<(PlayerId, SlotLabel)> {
        roster
            .ids()
            .map(|id| {
                let label = if !availability.is_available(id) {
                    SlotLabel::Out
                } else {
                    match self.slot_of(id) {
                        Some(slot) => SlotLabel::Slot(slot as u32),
                        None => SlotLabel::Empty,
                    }
                };
                (id, label)
            })
            .collect()
    }
}

/// One cell of the batting grid as typed by the coach
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlotLabel {
    /// Positive batting slot
    Slot(u32),
    /// Unavailable
    Out,
    /// Blank, or anything that is not a slot number
    Empty,
}

impl SlotLabel {
    pub fn slot(&self) -> Option<u32> {
        match self {
            SlotLabel::Slot(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromStr for SlotLabel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("OUT") {
            return Ok(SlotLabel::Out);
        }
        Ok(match s.parse::<u32>() {
            Ok(n) if n > 0 => SlotLabel::Slot(n),
            _ => SlotLabel::Empty,
        })
    }
}

impl From<String> for SlotLabel {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(label) => label,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for SlotLabel {
    fn from(s: &str) -> Self {
        SlotLabel::from(s.to_string())
    }
}

impl From<SlotLabel> for String {
    fn from(label: SlotLabel) -> Self {
        label.to_string()
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotLabel::Slot(n) => write!(f, "{}", n),
            SlotLabel::Out => write!(f, "OUT"),
            SlotLabel::Empty => Ok(()),
        }
    }
}

/// Batting order warnings; never block a save
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum BattingIssue {
    /// More than one player claims this slot
    DuplicatePosition(u32),
    /// Slots missing between the lowest and highest used slot
    GapInSequence(Vec<u32>),
}

impl fmt::Display for BattingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattingIssue::DuplicatePosition(slot) => {
                write!(f, "Duplicate batting position {}", slot)
            }
            BattingIssue::GapInSequence(missing) => {
                let list: Vec<String> = missing.iter().map(|s| s.to_string()).collect();
                write!(f, "Gaps in batting order - missing positions [{}]", list.join(", "))
            }
        }
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Move newly unavailable players to the end, keeping everyone else's
/// relative order. Moved players keep their relative order among themselves.
pub fn reconcile_on_availability_change(
    order: &BattingOrder,
    newly_unavailable: &FxHashSet<PlayerId>,
) -> BattingOrder {
    let (moved, kept): (Vec<PlayerId>, Vec<PlayerId>) =
        order.iter().partition(|id| newly_unavailable.contains(id));
    let mut result = kept;
    result.extend(moved);
    BattingOrder(result)
}

/// Available players in their existing relative order, then available
/// players missing from the order, then unavailable players, both in roster
/// order. Always a permutation of the roster.
pub fn auto_arrange(order: &BattingOrder, roster: &Roster, availability: &AvailabilityTable) -> BattingOrder {
    let mut seen = FxHashSet::default();
    let mut result: Vec<PlayerId> = order
        .iter()
        .filter(|id| roster.contains(*id) && availability.is_available(*id) && seen.insert(*id))
        .collect();

    result.extend(roster.ids().filter(|id| availability.is_available(*id) && !seen.contains(id)));
    result.extend(roster.ids().filter(|id| !availability.is_available(*id)));
    BattingOrder(result)
}

/// Rebuild an order from edited slot labels.
///
/// Numeric labels are read in roster order and the first player to claim a
/// slot keeps it; later claimants are treated as unplaced. Placed players are
/// sorted by slot, then unplaced available players follow in roster order,
/// then unplaced unavailable players.
pub fn parse_edited_slots(
    roster: &Roster,
    labels: &FxHashMap<PlayerId, SlotLabel>,
    availability: &AvailabilityTable,
) -> BattingOrder {
    let mut by_slot: BTreeMap<u32, PlayerId> = BTreeMap::new();
    for id in roster.ids() {
        if let Some(slot) = labels.get(&id).and_then(SlotLabel::slot) {
            by_slot.entry(slot).or_insert(id);
        }
    }

    let placed: FxHashSet<PlayerId> = by_slot.values().copied().collect();
    let mut result: Vec<PlayerId> = by_slot.into_values().collect();
    result.extend(
        roster
            .ids()
            .filter(|id| !placed.contains(id) && availability.is_available(*id)),
    );
    result.extend(
        roster
            .ids()
            .filter(|id| !placed.contains(id) && !availability.is_available(*id)),
    );
    BattingOrder(result)
}

/// Duplicate slots and gaps over `[min_used_slot, max_used_slot]`
pub fn validate<I>(labels: I) -> Vec<BattingIssue>
where
    I: IntoIterator<Item = SlotLabel>,
{
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for slot in labels.into_iter().filter_map(|l| l.slot()) {
        *counts.entry(slot).or_insert(0) += 1;
    }

    let mut issues: Vec<BattingIssue> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(slot, _)| BattingIssue::DuplicatePosition(*slot))
        .collect();

    let used: BTreeSet<u32> = counts.keys().copied().collect();
    if let (Some(&min), Some(&max)) = (used.first(), used.last()) {
        let missing: Vec<u32> = (min..=max).filter(|s| !used.contains(s)).collect();
        if !missing.is_empty() {
            issues.push(BattingIssue::GapInSequence(missing));
        }
    }

    issues
}

/// Validate a stored order through its grid projection
pub fn validate_order(order: &BattingOrder, roster: &Roster, availability: &AvailabilityTable) -> Vec<BattingIssue> {
    validate(order.slot_labels(roster, availability).into_iter().map(|(_, label)| label))
}

// ============================================================================
// STORE
// ============================================================================

/// Batting orders for every game that has one
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattingOrders {
    orders: BTreeMap<GameNumber, BattingOrder>,
}

impl BattingOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored order synced to the roster, or the identity order
    pub fn get_or_init(&mut self, game: GameNumber, roster: &Roster) -> &mut BattingOrder {
        let order = self
            .orders
            .entry(game)
            .or_insert_with(|| BattingOrder::identity(roster));
        order.sync(roster);
        order
    }

    pub fn get(&self, game: GameNumber) -> Option<&BattingOrder> {
        self.orders.get(&game)
    }

    pub fn get_mut(&mut self, game: GameNumber) -> Option<&mut BattingOrder> {
        self.orders.get_mut(&game)
    }

    pub fn insert(&mut self, game: GameNumber, order: BattingOrder) {
        self.orders.insert(game, order);
    }

    pub fn remove_game(&mut self, game: GameNumber) -> Option<BattingOrder> {
        self.orders.remove(&game)
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        for order in self.orders.values_mut() {
            order.remove_player(player);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameNumber, &BattingOrder)> {
        self.orders.iter().map(|(game, order)| (*game, order))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
