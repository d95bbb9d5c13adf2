//! Session CRUD records.
//!
//! The transport owns the session store; these are the shapes it speaks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::SessionId;

/// One tenant session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub level_name: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session record stamped now.
    pub fn new(level_name: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            level_name: level_name.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSessionsResponse {
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSessionResponse {
    pub session: Session,
    pub level_completion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSessionResponse {
    pub session_id: SessionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_serializes_with_timestamp() {
        let session = Session::new("the demo puzzle");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["level_name"], "the demo puzzle");
        assert!(json["created_at"].is_string());
    }
}
