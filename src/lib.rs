//! Linkd Escrow MCP - tool server for the Linkd Fund milestone escrow
//!
//! Exposes the escrow contract's operations as MCP tools over stdio.
//! Each tool call is validated against a static schema, forwarded to exactly
//! one external SDK operation, and answered with a single text response
//! carrying either the unsigned transaction XDR or an error message.
//!
//! The crate never builds or signs transactions itself: the [`sdk::EscrowSdk`]
//! seam delegates transaction construction and simulation to the external
//! Linkd SDK gateway, and audit memo lookups to the public Horizon API.
//!
//! ## Example
//!
//! ```ignore
//! use linkd_escrow_mcp::{EscrowDispatcher, LinkdSdk, NetworkConfig};
//!
//! let sdk = LinkdSdk::new(NetworkConfig::testnet());
//! let dispatcher = EscrowDispatcher::new(sdk);
//! let text = dispatcher
//!     .dispatch("get_escrow_status", &args)
//!     .await?;
//! ```

pub mod audit;
pub mod catalog;
pub mod dispatch;
pub mod mcp;
pub mod schema;
pub mod sdk;
pub mod types;

pub use dispatch::EscrowDispatcher;
pub use schema::{ArgumentBundle, Constraint, FieldSpec, FieldType, ToolDefinition};
pub use sdk::{EscrowSdk, LinkdSdk, Network, NetworkConfig};
pub use types::{AuditReport, DispatchError, EscrowStatus, SdkError};
