//! Phase ordering.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::engine::Side;

/// Which ordering rule governs the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseOrder {
    /// Attacker, counter, attacker follow-up, defender follow-up.
    Normal,
    /// Counter, attacker, defender follow-up, attacker follow-up.
    Vantage,
    /// Attacker, attacker follow-up, counter, defender follow-up.
    Desperation,
}

/// One scheduled strike phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase {
    pub side: Side,
    /// Follow-ups are dropped when the side's follow-up was cancelled.
    pub follow_up: bool,
}

impl Phase {
    const fn first(side: Side) -> Self {
        Self {
            side,
            follow_up: false,
        }
    }

    const fn follow_up(side: Side) -> Self {
        Self {
            side,
            follow_up: true,
        }
    }
}

pub type Schedule = ArrayVec<Phase, { CombatConfig::MAX_PHASES }>;

impl PhaseOrder {
    /// Picks the ordering rule.
    ///
    /// Vantage needs a defender that can counter; desperation needs an
    /// attacker that doubles. Vantage wins when both apply.
    pub fn select(
        defender_vantage: bool,
        defender_can_counter: bool,
        attacker_desperation: bool,
        attacker_doubles: bool,
    ) -> Self {
        if defender_vantage && defender_can_counter {
            Self::Vantage
        } else if attacker_desperation && attacker_doubles {
            Self::Desperation
        } else {
            Self::Normal
        }
    }

    /// Phases that will actually be attempted, in order.
    pub fn schedule(self, attacker_doubles: bool, can_counter: bool, defender_doubles: bool) -> Schedule {
        use Side::{Attacker, Defender};

        let mut phases = Schedule::new();
        let mut push = |phase: Phase, enabled: bool| {
            if enabled {
                phases.push(phase);
            }
        };
        let defender_follows = can_counter && defender_doubles;

        match self {
            Self::Normal => {
                push(Phase::first(Attacker), true);
                push(Phase::first(Defender), can_counter);
                push(Phase::follow_up(Attacker), attacker_doubles);
                push(Phase::follow_up(Defender), defender_follows);
            }
            Self::Vantage => {
                push(Phase::first(Defender), can_counter);
                push(Phase::first(Attacker), true);
                push(Phase::follow_up(Defender), defender_follows);
                push(Phase::follow_up(Attacker), attacker_doubles);
            }
            Self::Desperation => {
                push(Phase::first(Attacker), true);
                push(Phase::follow_up(Attacker), attacker_doubles);
                push(Phase::first(Defender), can_counter);
                push(Phase::follow_up(Defender), defender_follows);
            }
        }
        phases
    }

    /// Announcement pushed before the first phase, if any.
    pub fn announcement(self) -> Option<(Side, &'static str)> {
        match self {
            Self::Normal => None,
            Self::Vantage => Some((Side::Defender, "Vantage")),
            Self::Desperation => Some((Side::Attacker, "Desperation")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides(schedule: &Schedule) -> Vec<(Side, bool)> {
        schedule.iter().map(|p| (p.side, p.follow_up)).collect()
    }

    #[test]
    fn normal_order() {
        let s = PhaseOrder::Normal.schedule(true, true, false);
        assert_eq!(
            sides(&s),
            vec![
                (Side::Attacker, false),
                (Side::Defender, false),
                (Side::Attacker, true),
            ]
        );
    }

    #[test]
    fn vantage_needs_counter() {
        assert_eq!(PhaseOrder::select(true, false, false, false), PhaseOrder::Normal);
        assert_eq!(PhaseOrder::select(true, true, true, true), PhaseOrder::Vantage);
        let s = PhaseOrder::Vantage.schedule(true, true, true);
        assert_eq!(s[0].side, Side::Defender);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn desperation_front_loads_attacker() {
        assert_eq!(PhaseOrder::select(false, true, true, false), PhaseOrder::Normal);
        let s = PhaseOrder::select(false, true, true, true).schedule(true, true, false);
        assert_eq!(
            sides(&s),
            vec![
                (Side::Attacker, false),
                (Side::Attacker, true),
                (Side::Defender, false),
            ]
        );
    }

    #[test]
    fn no_counter_means_attacker_only() {
        let s = PhaseOrder::Normal.schedule(false, false, true);
        assert_eq!(sides(&s), vec![(Side::Attacker, false)]);
    }
}
