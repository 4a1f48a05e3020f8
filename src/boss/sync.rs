//! Boss domain: replication of authoritative boss state.
//!
//! The host broadcasts a snapshot of every replicated field whenever a
//! handler marks the boss dirty (transitions, preemptions, random rolls).
//! Observers overwrite their local copy on receipt instead of re-deriving
//! random decisions. Consistency is best-effort: divergence between
//! snapshots is tolerated and corrected by the next one.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::NetworkRole;

use super::components::Boss;
use super::state::{AttackId, BossState};

/// The replicated subset of the boss record. Vectors are stored as plain
/// pairs to keep the wire format independent of the math types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub state: BossState,
    pub timer: i32,
    pub phase_two: bool,
    pub lock_anchor: (f32, f32),
    pub last_choice: Option<AttackId>,
    pub available: Vec<AttackId>,
}

impl BossSnapshot {
    pub fn capture(boss: &Boss) -> Self {
        Self {
            position: boss.position.into(),
            velocity: boss.velocity.into(),
            state: boss.state,
            timer: boss.timer,
            phase_two: boss.phase_two,
            lock_anchor: boss.lock_anchor.into(),
            last_choice: boss.last_choice,
            available: boss.available.clone(),
        }
    }

    pub fn apply(&self, boss: &mut Boss) {
        boss.position = self.position.into();
        boss.velocity = self.velocity.into();
        boss.state = self.state;
        boss.timer = self.timer;
        // phase two latches; a stale snapshot cannot clear it
        boss.phase_two = boss.phase_two || self.phase_two;
        boss.lock_anchor = self.lock_anchor.into();
        boss.last_choice = self.last_choice;
        boss.available = self.available.clone();
    }

    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// One replication frame on the (stand-in) session wire.
#[derive(Debug)]
pub struct BossSyncMessage {
    pub payload: String,
}

impl Message for BossSyncMessage {}

/// Host side: encode and send a snapshot for every dirty boss.
pub(crate) fn broadcast_snapshots(
    role: Res<NetworkRole>,
    mut boss_query: Query<&mut Boss>,
    mut sync_messages: MessageWriter<BossSyncMessage>,
) {
    if !role.is_host() {
        return;
    }
    for mut boss in &mut boss_query {
        if !boss.dirty {
            continue;
        }
        boss.dirty = false;
        match BossSnapshot::capture(&boss).to_payload() {
            Ok(payload) => {
                sync_messages.write(BossSyncMessage { payload });
            }
            Err(e) => warn!("failed to encode boss snapshot: {e}"),
        }
    }
}

/// Observer side: apply every snapshot that arrived this tick.
pub(crate) fn apply_snapshots(
    role: Res<NetworkRole>,
    mut boss_query: Query<&mut Boss>,
    mut sync_messages: MessageReader<BossSyncMessage>,
) {
    if role.is_host() {
        sync_messages.clear();
        return;
    }
    for message in sync_messages.read() {
        let snapshot = match BossSnapshot::from_payload(&message.payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("discarding malformed boss snapshot: {e}");
                continue;
            }
        };
        for mut boss in &mut boss_query {
            snapshot.apply(&mut boss);
        }
    }
}
