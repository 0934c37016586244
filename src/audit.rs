//! Expenditure anchor audit
//!
//! Recomputes the invoice content hash and compares it byte-for-byte against
//! the memo anchored on-ledger. The comparison always completes: a missing or
//! wrong-typed memo becomes the empty string, so the caller gets
//! `variance_detected: true` instead of a hard failure.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::AuditReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditExpenditureArgs {
    pub invoice_number: String,
    pub amount: f64,
    pub supplier_name: String,
    pub donor_ids: Vec<String>,
    pub stellar_tx_hash: String,
}

/// Deterministic SHA-256 over the canonical invoice string
/// `invoiceNumber|amount|supplierName|donorId,donorId,...`, hex-encoded.
pub fn expected_hash(args: &AuditExpenditureArgs) -> String {
    let canonical = format!(
        "{}|{}|{}|{}",
        args.invoice_number,
        args.amount,
        args.supplier_name,
        args.donor_ids.join(",")
    );
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Normalize a hash memo from its base64 transport encoding to lowercase
/// hex. Anything absent or undecodable becomes the empty string.
pub fn normalize_memo(memo: Option<&str>) -> String {
    memo.and_then(|m| STANDARD.decode(m).ok())
        .map(hex::encode)
        .unwrap_or_default()
}

pub fn build_report(expected_hash: String, on_chain_hash: String) -> AuditReport {
    let audit_passed = expected_hash == on_chain_hash;
    AuditReport {
        audit_passed,
        expected_hash,
        on_chain_hash,
        variance_detected: !audit_passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AuditExpenditureArgs {
        AuditExpenditureArgs {
            invoice_number: "INV-2024-001".to_string(),
            amount: 1250.5,
            supplier_name: "Acme Water Supplies".to_string(),
            donor_ids: vec!["D-1".to_string(), "D-2".to_string()],
            stellar_tx_hash: "cc272688eeabb03e".to_string(),
        }
    }

    #[test]
    fn test_expected_hash_is_deterministic() {
        assert_eq!(expected_hash(&args()), expected_hash(&args()));
    }

    #[test]
    fn test_expected_hash_is_hex_sha256() {
        let hash = expected_hash(&args());
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_expected_hash_changes_with_any_field() {
        let mut other = args();
        other.donor_ids.pop();
        assert_ne!(expected_hash(&args()), expected_hash(&other));
    }

    #[test]
    fn test_normalize_memo_decodes_base64_to_hex() {
        // base64 of the bytes [0xde, 0xad, 0xbe, 0xef]
        assert_eq!(normalize_memo(Some("3q2+7w==")), "deadbeef");
    }

    #[test]
    fn test_normalize_memo_absent_or_garbage_is_empty() {
        assert_eq!(normalize_memo(None), "");
        assert_eq!(normalize_memo(Some("not base64!!")), "");
    }

    #[test]
    fn test_missing_memo_reports_variance() {
        let report = build_report(expected_hash(&args()), String::new());
        assert!(!report.audit_passed);
        assert!(report.variance_detected);
        assert_eq!(report.on_chain_hash, "");
    }

    #[test]
    fn test_matching_hashes_pass() {
        let hash = expected_hash(&args());
        let report = build_report(hash.clone(), hash);
        assert!(report.audit_passed);
        assert!(!report.variance_detected);
    }
}
