//! External SDK seam
//!
//! Transaction building, simulation, and signing live outside this process:
//! unsigned XDR envelopes come from the Linkd SDK gateway, and audit memo
//! lookups read the public Horizon API. [`EscrowSdk`] is the seam; the
//! dispatcher only marshals parameters through it, exactly once per request,
//! with no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{EscrowStatus, SdkError};

/// Ledger network selection, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Testnet,
    Mainnet,
}

/// Endpoints for the production client. Constructed once in `main` and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub network: Network,
    /// Linkd SDK gateway performing transaction building and simulation
    pub gateway_url: String,
    /// Horizon API used for the audit memo lookup
    pub horizon_url: String,
}

impl NetworkConfig {
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            gateway_url: "http://127.0.0.1:8787".to_string(),
            horizon_url: "https://horizon-testnet.stellar.org".to_string(),
        }
    }

    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            gateway_url: "http://127.0.0.1:8787".to_string(),
            horizon_url: "https://horizon.stellar.org".to_string(),
        }
    }

    /// Read the network selection and endpoint overrides from the
    /// environment: `LINKD_NETWORK`, `LINKD_SDK_URL`, `LINKD_HORIZON_URL`.
    pub fn from_env() -> Self {
        let mut config = match std::env::var("LINKD_NETWORK").as_deref() {
            Ok("mainnet") => Self::mainnet(),
            _ => Self::testnet(),
        };
        if let Ok(url) = std::env::var("LINKD_SDK_URL") {
            config.gateway_url = url;
        }
        if let Ok(url) = std::env::var("LINKD_HORIZON_URL") {
            config.horizon_url = url;
        }
        config
    }
}

// ----------------------------------------------------------------------------
// Per-tool argument records
// ----------------------------------------------------------------------------
// Deserialized from the validated bundle and serialized unchanged as the
// gateway request body, so the wire field names stay camelCase.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitEscrowArgs {
    pub contract_id: String,
    pub admin: String,
    pub ngo: String,
    pub auditor: String,
    pub beneficiary: String,
    pub token_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMilestoneArgs {
    pub contract_id: String,
    pub admin: String,
    pub target_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositFundsArgs {
    pub contract_id: String,
    pub donor: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProofArgs {
    pub contract_id: String,
    pub ngo: String,
    pub milestone_id: u32,
    pub proof_hash: String,
}

/// Shared by `approve_ngo` and `approve_auditor`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveMilestoneArgs {
    pub contract_id: String,
    pub signer: String,
    pub milestone_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundMilestoneArgs {
    pub contract_id: String,
    pub admin: String,
    pub milestone_id: u32,
    pub refund_address: String,
}

// ----------------------------------------------------------------------------
// The seam
// ----------------------------------------------------------------------------

/// One method per external ledger operation.
///
/// Transaction-producing methods return the unsigned base64 XDR envelope;
/// this process never holds signing material.
#[async_trait]
pub trait EscrowSdk: Send + Sync {
    async fn init_escrow(&self, args: &InitEscrowArgs) -> Result<String, SdkError>;
    async fn add_milestone(&self, args: &AddMilestoneArgs) -> Result<String, SdkError>;
    async fn deposit_funds(&self, args: &DepositFundsArgs) -> Result<String, SdkError>;
    async fn submit_proof(&self, args: &SubmitProofArgs) -> Result<String, SdkError>;
    async fn approve_ngo(&self, args: &ApproveMilestoneArgs) -> Result<String, SdkError>;
    async fn approve_auditor(&self, args: &ApproveMilestoneArgs) -> Result<String, SdkError>;
    async fn refund_milestone(&self, args: &RefundMilestoneArgs) -> Result<String, SdkError>;

    /// Read-only contract state lookup
    async fn escrow_status(&self, contract_id: &str) -> Result<EscrowStatus, SdkError>;

    /// Base64 payload of the hash-type memo attached to `tx_hash`, or `None`
    /// when the transaction is missing or carries a different memo type
    async fn hash_memo(&self, tx_hash: &str) -> Result<Option<String>, SdkError>;
}

// ----------------------------------------------------------------------------
// Production client
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GatewayReply {
    xdr: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HorizonTransaction {
    memo_type: Option<String>,
    memo: Option<String>,
}

/// HTTP client for the Linkd SDK gateway and Horizon
pub struct LinkdSdk {
    client: reqwest::Client,
    config: NetworkConfig,
}

impl LinkdSdk {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// POST one escrow operation to the gateway and unwrap the XDR reply
    async fn prepare<B: Serialize + Sync>(&self, op: &str, body: &B) -> Result<String, SdkError> {
        let url = format!("{}/escrow/{op}", self.config.gateway_url);
        debug!(op, "requesting transaction from gateway");
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let reply: GatewayReply = response
            .json()
            .await
            .map_err(|e| SdkError::Protocol(e.to_string()))?;
        if let Some(message) = reply.error {
            return Err(SdkError::Ledger(message));
        }
        if !status.is_success() {
            return Err(SdkError::Ledger(format!("gateway returned {status}")));
        }
        reply
            .xdr
            .ok_or_else(|| SdkError::Protocol("gateway reply carried no XDR".to_string()))
    }
}

#[async_trait]
impl EscrowSdk for LinkdSdk {
    async fn init_escrow(&self, args: &InitEscrowArgs) -> Result<String, SdkError> {
        self.prepare("initialize", args).await
    }

    async fn add_milestone(&self, args: &AddMilestoneArgs) -> Result<String, SdkError> {
        self.prepare("add_milestone", args).await
    }

    async fn deposit_funds(&self, args: &DepositFundsArgs) -> Result<String, SdkError> {
        self.prepare("lock_donation", args).await
    }

    async fn submit_proof(&self, args: &SubmitProofArgs) -> Result<String, SdkError> {
        self.prepare("submit_proof", args).await
    }

    async fn approve_ngo(&self, args: &ApproveMilestoneArgs) -> Result<String, SdkError> {
        self.prepare("approve_ngo", args).await
    }

    async fn approve_auditor(&self, args: &ApproveMilestoneArgs) -> Result<String, SdkError> {
        self.prepare("approve_auditor", args).await
    }

    async fn refund_milestone(&self, args: &RefundMilestoneArgs) -> Result<String, SdkError> {
        self.prepare("refund_milestone", args).await
    }

    async fn escrow_status(&self, contract_id: &str) -> Result<EscrowStatus, SdkError> {
        let url = format!(
            "{}/escrow/status/{contract_id}",
            self.config.gateway_url
        );
        debug!(contract_id, "reading escrow status");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SdkError::Ledger(format!(
                "status lookup failed for {contract_id}: {}",
                response.status()
            )));
        }
        response
            .json::<EscrowStatus>()
            .await
            .map_err(|e| SdkError::Protocol(e.to_string()))
    }

    async fn hash_memo(&self, tx_hash: &str) -> Result<Option<String>, SdkError> {
        let url = format!("{}/transactions/{tx_hash}", self.config.horizon_url);
        debug!(tx_hash, "fetching transaction memo from horizon");
        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SdkError::Ledger(format!(
                "transaction lookup failed: {}",
                response.status()
            )));
        }
        let tx: HorizonTransaction = response
            .json()
            .await
            .map_err(|e| SdkError::Protocol(e.to_string()))?;
        match tx.memo_type.as_deref() {
            Some("hash") => Ok(tx.memo),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnet_defaults() {
        let config = NetworkConfig::testnet();
        assert_eq!(config.network, Network::Testnet);
        assert!(config.horizon_url.contains("testnet"));
    }

    #[test]
    fn test_args_serialize_camel_case() {
        let args = AddMilestoneArgs {
            contract_id: "C123".to_string(),
            admin: "GADMIN".to_string(),
            target_amount: 1000.0,
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["contractId"], "C123");
        assert_eq!(json["targetAmount"], 1000.0);
    }

    #[test]
    fn test_args_deserialize_from_bundle() {
        let args: RefundMilestoneArgs = serde_json::from_value(serde_json::json!({
            "contractId": "C123",
            "admin": "GADMIN",
            "milestoneId": 2,
            "refundAddress": "GREFUND",
        }))
        .unwrap();
        assert_eq!(args.milestone_id, 2);
    }
}
