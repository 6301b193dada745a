//! Host-supplied game configuration and the fatal configuration errors.

use serde::{Deserialize, Serialize};

use crate::GameKind;

/// Errors that stop a session from being created
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown game kind '{0}'")]
    UnknownKind(String),
    #[error("time limit must be positive, got {0}s")]
    NonPositiveTimeLimit(i64),
    #[error("time limit {0}s is out of range")]
    TimeLimitOutOfRange(i64),
    #[error("{kind} needs at least one entry in '{section}'")]
    EmptyContent {
        kind: GameKind,
        section: &'static str,
    },
    #[error("invalid {kind} content: {reason}")]
    InvalidContent { kind: GameKind, reason: String },
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable description of one playable challenge
///
/// Serialized as camelCase JSON:
///
/// ```
/// use eco_games_types::{GameConfig, GameKind};
///
/// let config = GameConfig::from_json(
///     r#"{"id":"q1","title":"Quiz","kind":"quiz","pointsAvailable":80,"timeLimitSeconds":900}"#,
/// )
/// .unwrap();
/// assert_eq!(config.kind, GameKind::Quiz);
/// assert_eq!(config.time_limit_seconds, Some(900));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig", rename_all = "camelCase")]
pub struct GameConfig {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: GameKind,
    pub points_available: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_seconds: Option<u32>,
    /// Pass mark reported back in the completion report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u32>,
}

/// Wire shape before validation; accepts the host's older field names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameConfig {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(alias = "type", alias = "gameType")]
    kind: String,
    #[serde(alias = "points", default)]
    points_available: u32,
    #[serde(alias = "timeLimit", default)]
    time_limit_seconds: Option<i64>,
    #[serde(default)]
    min_score: Option<u32>,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        let kind = GameKind::from_str(&raw.kind).ok_or(ConfigError::UnknownKind(raw.kind))?;
        let time_limit_seconds = raw.time_limit_seconds.map(parse_time_limit).transpose()?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            kind,
            points_available: raw.points_available,
            time_limit_seconds,
            min_score: raw.min_score,
        })
    }
}

fn parse_time_limit(secs: i64) -> Result<u32, ConfigError> {
    if secs <= 0 {
        return Err(ConfigError::NonPositiveTimeLimit(secs));
    }
    u32::try_from(secs).map_err(|_| ConfigError::TimeLimitOutOfRange(secs))
}

impl GameConfig {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: GameKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            kind,
            points_available: 0,
            time_limit_seconds: None,
            min_score: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points_available = points;
        self
    }

    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_seconds = Some(secs);
        self
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Parse and validate a JSON document.
    ///
    /// Validation errors keep their [`ConfigError`] variant instead of being
    /// folded into a JSON error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawGameConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Re-check invariants on a config that was built in code
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.time_limit_seconds {
            Some(0) => Err(ConfigError::NonPositiveTimeLimit(0)),
            _ => Ok(()),
        }
    }

    /// Time limit in milliseconds, if the session is timed
    pub fn time_limit_ms(&self) -> Option<u64> {
        self.time_limit_seconds.map(|secs| u64::from(secs) * 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_field_names() {
        let config = GameConfig::from_json(
            r#"{"id":"c","title":"Connect","type":"connect","points":80,"timeLimit":720,"minScore":60}"#,
        )
        .unwrap();
        assert_eq!(config.kind, GameKind::ConnectDots);
        assert_eq!(config.points_available, 80);
        assert_eq!(config.time_limit_seconds, Some(720));
        assert_eq!(config.min_score, Some(60));
        assert_eq!(config.description, "");
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = GameConfig::from_json(r#"{"id":"x","title":"X","kind":"tetris"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind(ref k) if k == "tetris"));
    }

    #[test]
    fn rejects_non_positive_time_limit() {
        let err = GameConfig::from_json(
            r#"{"id":"x","title":"X","kind":"quiz","timeLimitSeconds":0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveTimeLimit(0)));

        let err = GameConfig::from_json(
            r#"{"id":"x","title":"X","kind":"quiz","timeLimitSeconds":-30}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveTimeLimit(-30)));
    }

    #[test]
    fn serde_path_validates_too() {
        let result: Result<GameConfig, _> =
            serde_json::from_str(r#"{"id":"x","title":"X","kind":"pinball"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown game kind"));
    }

    #[test]
    fn serializes_camel_case() {
        let config = GameConfig::new("w", "Words", GameKind::WordGuess)
            .with_points(90)
            .with_time_limit(900);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["kind"], "word-guess");
        assert_eq!(json["pointsAvailable"], 90);
        assert_eq!(json["timeLimitSeconds"], 900);
        assert!(json.get("minScore").is_none());

        let back: GameConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn validate_catches_zero_limit_built_in_code() {
        let config = GameConfig::new("s", "Snake", GameKind::Snake).with_time_limit(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTimeLimit(0))
        ));
        assert_eq!(
            GameConfig::new("s", "Snake", GameKind::Snake)
                .with_time_limit(2)
                .time_limit_ms(),
            Some(2000)
        );
    }
}
