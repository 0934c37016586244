//! Core types shared across the dispatcher

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregate state of one escrow contract, as read from the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowStatus {
    /// Total tokens currently locked in the contract
    #[serde(rename = "totalEscrowed")]
    pub total_escrowed: i128,
    /// Number of milestones created so far
    #[serde(rename = "milestoneCount")]
    pub milestone_count: u32,
}

/// Result of one expenditure-anchor audit.
///
/// Serialized as pretty-printed JSON in the tool response so the calling
/// agent can re-parse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// True when the recomputed hash matches the on-chain memo exactly
    pub audit_passed: bool,
    /// Hex SHA-256 recomputed from the caller-supplied invoice fields
    pub expected_hash: String,
    /// Hex hash decoded from the transaction memo, empty if absent
    pub on_chain_hash: String,
    /// Complement of `audit_passed`; kept explicit for agent consumers
    pub variance_detected: bool,
}

/// Failures reported by the external SDK gateway or the ledger
#[derive(Debug, Error)]
pub enum SdkError {
    /// Ledger or contract rejection; message is passed through verbatim
    /// (e.g. "already initialized", simulation failures)
    #[error("{0}")]
    Ledger(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("unexpected gateway response: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Failures surfaced to the caller as an error-flagged tool response
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unrecognized tool: {0}")]
    UnrecognizedTool(String),

    #[error("Invalid arguments for tool '{tool}': {}", .violations.join("; "))]
    InvalidArguments {
        tool: String,
        violations: Vec<String>,
    },

    #[error("{0}")]
    Execution(#[from] SdkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_tool_message() {
        let err = DispatchError::UnrecognizedTool("destroy_escrow".to_string());
        assert_eq!(err.to_string(), "Unrecognized tool: destroy_escrow");
    }

    #[test]
    fn test_validation_message_lists_every_violation() {
        let err = DispatchError::InvalidArguments {
            tool: "add_milestone".to_string(),
            violations: vec![
                "missing required field 'admin'".to_string(),
                "field 'targetAmount' must be a positive number".to_string(),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("add_milestone"));
        assert!(text.contains("'admin'"));
        assert!(text.contains("'targetAmount'"));
    }

    #[test]
    fn test_ledger_error_is_verbatim() {
        let err = DispatchError::Execution(SdkError::Ledger("already initialized".to_string()));
        assert_eq!(err.to_string(), "already initialized");
    }

    #[test]
    fn test_audit_report_serializes_snake_case() {
        let report = AuditReport {
            audit_passed: false,
            expected_hash: "ab".to_string(),
            on_chain_hash: String::new(),
            variance_detected: true,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["audit_passed"], false);
        assert_eq!(json["on_chain_hash"], "");
        assert_eq!(json["variance_detected"], true);
    }
}
