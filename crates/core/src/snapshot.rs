//! Snapshot module - owned copy of a session for hosts
//!
//! Taken after every change a host cares about. It borrows nothing from the
//! session, so it can cross task boundaries and be serialized as JSON.

use serde::Serialize;

use crate::games::ModuleState;
use crate::types::{CompletionReport, GameKind, SessionStatus};

/// Owned, serializable view of a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub game_id: String,
    pub title: String,
    pub kind: GameKind,
    pub status: SessionStatus,
    pub score: u32,
    pub points_available: u32,
    pub time_remaining: Option<u32>,
    pub elapsed_ms: u64,
    /// `None` until the session starts
    pub module: Option<ModuleState>,
    pub report: Option<CompletionReport>,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.status == SessionStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use crate::session::GameSession;
    use crate::types::{GameConfig, GameKind};

    #[test]
    fn test_snapshot_json() {
        let config = GameConfig::new("s1", "Sorting", GameKind::Sorting).with_time_limit(300);
        let mut session = GameSession::new(config, 3).unwrap();

        let snap = session.snapshot();
        assert!(!snap.playable());
        assert!(snap.module.is_none());

        session.start().unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["gameId"], "s1");
        assert_eq!(json["status"], "running");
        assert_eq!(json["timeRemaining"], 300);
        assert_eq!(json["module"]["kind"], "sorting");
        assert_eq!(json["module"]["items"].as_array().unwrap().len(), 8);
    }
}
