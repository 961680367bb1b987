//! Combat events and the human-readable combat log.
//!
//! Operations return typed `CombatEvent`s to their caller and append one
//! `CombatLogMessage` per event to the combat's log. The log is what a UI
//! shows; events are what code inspects.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::state::Phase;
use crate::grid::GridPos;
use crate::units::SkillId;

/// Something that happened during resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Combat began.
    CombatStarted,
    /// An entity's turn began.
    TurnStarted {
        /// New active entity.
        entity: EntityId,
        /// Round number.
        turn: u32,
    },
    /// An entity walked.
    Moved {
        /// Mover.
        entity: EntityId,
        /// Origin cell.
        from: GridPos,
        /// Destination cell.
        to: GridPos,
        /// MP spent.
        mp_spent: u32,
        /// AP spent disengaging.
        tackle_ap: u32,
    },
    /// A skill entered targeting.
    SkillSelected {
        /// Caster.
        entity: EntityId,
        /// Selected skill.
        skill: SkillId,
    },
    /// Targeting was abandoned.
    SelectionCancelled {
        /// Caster.
        entity: EntityId,
    },
    /// A skill was cast.
    SkillUsed {
        /// Caster.
        caster: EntityId,
        /// Skill.
        skill: SkillId,
        /// Target cell.
        target: GridPos,
    },
    /// A basic attack was made.
    BasicAttack {
        /// Attacker.
        attacker: EntityId,
        /// Attacked entity.
        target: EntityId,
    },
    /// A physical attack was dodged.
    Missed {
        /// Attacker.
        source: EntityId,
        /// Dodging entity.
        target: EntityId,
    },
    /// Damage was dealt.
    Damaged {
        /// Attacker.
        source: EntityId,
        /// Victim.
        target: EntityId,
        /// HP lost.
        amount: u32,
        /// Critical hit?
        crit: bool,
    },
    /// HP was restored.
    Healed {
        /// Healer.
        source: EntityId,
        /// Recipient.
        target: EntityId,
        /// HP actually restored.
        amount: u32,
    },
    /// An entity was knocked back.
    Pushed {
        /// Displaced entity.
        target: EntityId,
        /// Cell before the push.
        from: GridPos,
        /// Cell after the push.
        to: GridPos,
    },
    /// An entity reached 0 HP and left the grid.
    Defeated {
        /// Fallen entity.
        entity: EntityId,
    },
    /// Combat reached a terminal phase.
    PhaseChanged {
        /// New phase.
        phase: Phase,
    },
}

impl CombatEvent {
    /// Log category for this event.
    #[must_use]
    pub fn kind(&self) -> LogKind {
        match self {
            CombatEvent::CombatStarted | CombatEvent::TurnStarted { .. } | CombatEvent::PhaseChanged { .. } => {
                LogKind::System
            }
            CombatEvent::Damaged { .. } | CombatEvent::Missed { .. } | CombatEvent::Defeated { .. } => {
                LogKind::Damage
            }
            CombatEvent::Healed { .. } => LogKind::Heal,
            _ => LogKind::Info,
        }
    }
}

/// Log message category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    /// Turn and phase changes.
    System,
    /// Hits, misses, deaths.
    Damage,
    /// Healing.
    Heal,
    /// Everything else, including rejected intents.
    Info,
}

/// One line of the combat log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogMessage {
    /// Display text.
    pub text: String,
    /// Category.
    pub kind: LogKind,
}

/// Ordered combat log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    messages: Vector<CombatLogMessage>,
}

impl CombatLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        self.messages.push_back(CombatLogMessage { text: text.into(), kind });
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// No messages yet?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&CombatLogMessage> {
        self.messages.last()
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl Iterator<Item = &CombatLogMessage> {
        self.messages.iter()
    }
}
