//! Actions waiting for the next fixed tick.
//!
//! Producers that are not on the logic thread's call stack (agents, replays,
//! actions restored from a save) queue here and are executed by
//! [`execute_queued_actions`](super::execute_queued_actions) in tick order.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::GameAction;
use crate::Saveable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ActionSource {
    Player,
    Agent,
    Replay,
}

/// An action stamped with the tick it was submitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct QueuedAction {
    pub tick: u64,
    pub source: ActionSource,
    pub action: GameAction,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    pending: Vec<QueuedAction>,
}

impl ActionQueue {
    pub fn push(&mut self, tick: u64, source: ActionSource, action: GameAction) {
        self.pending.push(QueuedAction {
            tick,
            source,
            action,
        });
    }

    pub fn push_queued(&mut self, queued: QueuedAction) {
        self.pending.push(queued);
    }

    /// Take every pending action ordered by submission tick. Actions with the
    /// same tick keep the order they were pushed in, so a restored save's
    /// older actions run before anything queued after the load.
    pub fn drain(&mut self) -> Vec<QueuedAction> {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|queued| queued.tick);
        pending
    }

    /// Drop everything `source` still has pending. Returns how many were
    /// dropped.
    pub fn cancel_from(&mut self, source: ActionSource) -> usize {
        let before = self.pending.len();
        self.pending.retain(|queued| queued.source != source);
        before - self.pending.len()
    }

    pub fn pending_from(&self, source: ActionSource) -> impl Iterator<Item = &QueuedAction> {
        self.pending.iter().filter(move |queued| queued.source == source)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[derive(Encode, Decode, Default)]
struct ActionQueueSave {
    pending: Vec<QueuedAction>,
}

impl Saveable for ActionQueue {
    const SAVE_KEY: &'static str = "action_queue";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            return None;
        }
        let save = ActionQueueSave {
            pending: self.pending.clone(),
        };
        Some(bitcode::encode(&save))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        let save: ActionQueueSave = crate::decode_or_warn(Self::SAVE_KEY, bytes);
        Self {
            pending: save.pending,
        }
    }
}
