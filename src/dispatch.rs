//! The operation invoker
//!
//! Maps each tool name to exactly one external SDK call. No branching
//! business logic, no retries, no state across requests: validation happens
//! before any network traffic, a failed call is surfaced to the caller
//! as-is, and the caller owns the retry decision.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::audit::{self, AuditExpenditureArgs};
use crate::catalog;
use crate::schema::{self, ArgumentBundle};
use crate::sdk::{
    AddMilestoneArgs, ApproveMilestoneArgs, DepositFundsArgs, EscrowSdk, InitEscrowArgs,
    RefundMilestoneArgs, SubmitProofArgs,
};
use crate::types::{DispatchError, SdkError};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusArgs {
    contract_id: String,
}

/// Stateless dispatcher over one SDK client
pub struct EscrowDispatcher<S> {
    sdk: S,
}

impl<S: EscrowSdk> EscrowDispatcher<S> {
    pub fn new(sdk: S) -> Self {
        Self { sdk }
    }

    /// Validate and execute one tool request, returning the response text.
    ///
    /// Errors map 1:1 onto the error-flagged tool response; they never
    /// escape as protocol failures.
    pub async fn dispatch(
        &self,
        name: &str,
        args: &ArgumentBundle,
    ) -> Result<String, DispatchError> {
        let def = catalog::find(name)
            .ok_or_else(|| DispatchError::UnrecognizedTool(name.to_string()))?;

        schema::validate(def, args).map_err(|violations| DispatchError::InvalidArguments {
            tool: name.to_string(),
            violations,
        })?;

        info!(tool = name, "dispatching tool call");

        match name {
            "init_escrow" => {
                let args: InitEscrowArgs = typed(name, args)?;
                let xdr = self.sdk.init_escrow(&args).await?;
                Ok(prepared("Escrow initialization", &xdr))
            }
            "add_milestone" => {
                let args: AddMilestoneArgs = typed(name, args)?;
                let xdr = self.sdk.add_milestone(&args).await?;
                Ok(prepared("Milestone creation", &xdr))
            }
            "deposit_funds" => {
                let args: DepositFundsArgs = typed(name, args)?;
                let xdr = self.sdk.deposit_funds(&args).await?;
                Ok(prepared("Donation lock", &xdr))
            }
            "submit_proof" => {
                let args: SubmitProofArgs = typed(name, args)?;
                let xdr = self.sdk.submit_proof(&args).await?;
                Ok(prepared("Proof submission", &xdr))
            }
            "approve_ngo" => {
                let args: ApproveMilestoneArgs = typed(name, args)?;
                let xdr = self.sdk.approve_ngo(&args).await?;
                Ok(prepared("NGO approval", &xdr))
            }
            "approve_auditor" => {
                let args: ApproveMilestoneArgs = typed(name, args)?;
                let xdr = self.sdk.approve_auditor(&args).await?;
                Ok(prepared("Auditor approval", &xdr))
            }
            "refund_milestone" => {
                let args: RefundMilestoneArgs = typed(name, args)?;
                let xdr = self.sdk.refund_milestone(&args).await?;
                Ok(prepared("Milestone refund", &xdr))
            }
            "get_escrow_status" => {
                let args: StatusArgs = typed(name, args)?;
                let status = self.sdk.escrow_status(&args.contract_id).await?;
                Ok(format!(
                    "Escrow Status for {}:\n- Total Escrowed: {}\n- Milestone Count: {}",
                    args.contract_id, status.total_escrowed, status.milestone_count
                ))
            }
            "audit_expenditure_anchor" => {
                let args: AuditExpenditureArgs = typed(name, args)?;
                let expected = audit::expected_hash(&args);
                // "Always answer" policy: a failed memo lookup degrades to an
                // absent memo so the report still comes back, with variance
                let memo = match self.sdk.hash_memo(&args.stellar_tx_hash).await {
                    Ok(memo) => memo,
                    Err(e) => {
                        warn!(tx_hash = %args.stellar_tx_hash, error = %e,
                              "memo lookup failed, reporting as absent");
                        None
                    }
                };
                let report = audit::build_report(expected, audit::normalize_memo(memo.as_deref()));
                serde_json::to_string_pretty(&report)
                    .map_err(|e| DispatchError::Execution(SdkError::Protocol(e.to_string())))
            }
            _ => Err(DispatchError::UnrecognizedTool(name.to_string())),
        }
    }
}

fn prepared(label: &str, xdr: &str) -> String {
    format!("{label} transaction prepared. Please sign this XDR to proceed:\n\n{xdr}")
}

fn typed<T: DeserializeOwned>(tool: &str, args: &ArgumentBundle) -> Result<T, DispatchError> {
    serde_json::from_value(Value::Object(args.clone())).map_err(|e| {
        DispatchError::InvalidArguments {
            tool: tool.to_string(),
            violations: vec![e.to_string()],
        }
    })
}
