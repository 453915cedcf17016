//! Score submission contract
//!
//! The core never talks to the network. On game over it hands a
//! `RunSubmission` to whatever `ScoreSubmitter` the host supplies and folds
//! the returned `pointsAwarded` into its points display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::sim::Difficulty;

/// Opaque authenticated-session token
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Completed run as sent to the scoring collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSubmission {
    pub score: u64,
    pub difficulty: Difficulty,
    pub words_typed: Vec<String>,
}

/// Collaborator reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub points_awarded: u64,
}

/// Something that can persist a finished run
pub trait ScoreSubmitter {
    fn submit(&mut self, token: &SessionToken, run: &RunSubmission) -> Result<SubmissionReceipt>;
}

/// Points granted for a final score
pub fn points_for_score(score: u64) -> u64 {
    score / 10
}

/// In-process ledger using the same award rule as the hosted service
#[derive(Debug, Default)]
pub struct LocalLedger {
    balances: HashMap<String, u64>,
    runs: Vec<RunSubmission>,
}

impl LocalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points accumulated for a token
    pub fn balance(&self, token: &SessionToken) -> u64 {
        self.balances.get(token.as_str()).copied().unwrap_or(0)
    }

    /// Every run accepted so far
    pub fn runs(&self) -> &[RunSubmission] {
        &self.runs
    }
}

impl ScoreSubmitter for LocalLedger {
    fn submit(&mut self, token: &SessionToken, run: &RunSubmission) -> Result<SubmissionReceipt> {
        if token.as_str().is_empty() {
            return Err(EngineError::SubmissionFailed("unauthorized".into()));
        }
        let points_awarded = points_for_score(run.score);
        *self.balances.entry(token.as_str().to_string()).or_default() += points_awarded;
        self.runs.push(run.clone());
        log::info!(
            "Ledger: {} pts for {} ({} words)",
            points_awarded,
            run.score,
            run.words_typed.len()
        );
        Ok(SubmissionReceipt { points_awarded })
    }
}
