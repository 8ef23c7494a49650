use pairmatch_core::{AchievementId, GameSummary};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read side of the leaderboard.
pub const LEADERS_URL: &str = "https://wedev-api.sky.pro/api/leaderboard";

/// Write side of the leaderboard, the v2 API that understands achievements.
pub const ADD_LEADER_URL: &str = "https://wedev-api.sky.pro/api/v2/leaderboard";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    #[error("Вы не написали ваше имя")]
    EmptyName,
    #[error("This game does not qualify for the leaderboard")]
    NotEligible,
    /// Message sent back by the server, shown as is.
    #[error("{0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    /// Game duration in whole seconds.
    pub time: u32,
    #[serde(default)]
    pub achievements: Vec<AchievementId>,
}

impl LeaderboardEntry {
    /// Builds the entry for a finished game, the name is trimmed and must not be blank.
    pub fn from_summary(name: &str, summary: &GameSummary) -> Result<Self, LeaderboardError> {
        if !summary.is_leaderboard_worthy() {
            return Err(LeaderboardError::NotEligible);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            time: summary.time_secs(),
            achievements: summary.achievements(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadersResponse {
    pub leaders: Vec<LeaderboardEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Extracts the leaders out of a GET response body, order is kept as the server sent it.
pub fn parse_leaders(body: &str) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
    serde_json::from_str::<LeadersResponse>(body)
        .map(|response| response.leaders)
        .map_err(|err| LeaderboardError::Decode(err.to_string()))
}

/// Interprets the response to posting `submitted`.
///
/// A failed status turns into [`LeaderboardError::Rejected`] with the server message. On success the
/// server may echo the created record, otherwise the submitted entry stands for it.
pub fn parse_submit_response(
    ok: bool,
    body: &str,
    submitted: &LeaderboardEntry,
) -> Result<LeaderboardEntry, LeaderboardError> {
    if !ok {
        let error: ErrorBody =
            serde_json::from_str(body).map_err(|err| LeaderboardError::Decode(err.to_string()))?;
        return Err(LeaderboardError::Rejected(error.message));
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| LeaderboardError::Decode(err.to_string()))?;
    Ok(serde_json::from_value(value).unwrap_or_else(|_| submitted.clone()))
}
