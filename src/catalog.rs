//! The fixed tool catalog
//!
//! Defined once at process start and never mutated; listing it has no side
//! effects and cannot fail.

use crate::schema::{Constraint, FieldSpec, FieldType, ToolDefinition};

const fn string_field(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        description,
        ty: FieldType::String,
        required: true,
        constraint: Constraint::NonEmpty,
    }
}

const fn amount_field(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        description,
        ty: FieldType::Number,
        required: true,
        constraint: Constraint::Positive,
    }
}

const MILESTONE_ID: FieldSpec = FieldSpec {
    name: "milestoneId",
    description: "Index of the milestone within the escrow contract",
    ty: FieldType::Integer,
    required: true,
    constraint: Constraint::None,
};

const CONTRACT_ID: FieldSpec = string_field(
    "contractId",
    "Contract ID of the specific escrow",
);

/// Every tool the dispatcher exposes, in listing order
pub const CATALOG: &[ToolDefinition] = &[
    ToolDefinition {
        name: "init_escrow",
        description: "Prepares a transaction XDR to initialize a new Linkd Fund escrow contract.",
        fields: &[
            CONTRACT_ID,
            string_field("admin", "Public key of the administrator"),
            string_field("ngo", "Public key of the NGO"),
            string_field("auditor", "Public key of the Auditor"),
            string_field("beneficiary", "Public key of the target beneficiary"),
            string_field(
                "tokenAddress",
                "SAC Contract ID of the stablecoin (e.g. USDC)",
            ),
        ],
    },
    ToolDefinition {
        name: "add_milestone",
        description: "Prepares a transaction XDR to add a funding milestone to an escrow contract.",
        fields: &[
            CONTRACT_ID,
            string_field("admin", "Public key of the administrator"),
            amount_field("targetAmount", "Funding target for the milestone"),
        ],
    },
    ToolDefinition {
        name: "deposit_funds",
        description: "Prepares a transaction XDR to lock donor funds into an escrow contract.",
        fields: &[
            CONTRACT_ID,
            string_field("donor", "Public key of the donor"),
            amount_field("amount", "Amount of tokens to lock"),
        ],
    },
    ToolDefinition {
        name: "submit_proof",
        description: "Prepares a transaction XDR for the NGO to submit a proof hash for a milestone.",
        fields: &[
            CONTRACT_ID,
            string_field("ngo", "Public key of the NGO"),
            MILESTONE_ID,
            string_field("proofHash", "Hash of the off-chain proof document"),
        ],
    },
    ToolDefinition {
        name: "approve_ngo",
        description: "Prepares a transaction XDR for the NGO-side approval of a milestone.",
        fields: &[
            CONTRACT_ID,
            string_field("signer", "Public key of the approving signer"),
            MILESTONE_ID,
        ],
    },
    ToolDefinition {
        name: "approve_auditor",
        description: "Prepares a transaction XDR for the auditor-side approval of a milestone.",
        fields: &[
            CONTRACT_ID,
            string_field("signer", "Public key of the approving signer"),
            MILESTONE_ID,
        ],
    },
    ToolDefinition {
        name: "refund_milestone",
        description: "Prepares a transaction XDR to refund a milestone to the given address.",
        fields: &[
            CONTRACT_ID,
            string_field("admin", "Public key of the administrator"),
            MILESTONE_ID,
            string_field("refundAddress", "Address receiving the refunded funds"),
        ],
    },
    ToolDefinition {
        name: "get_escrow_status",
        description: "Retrieves the current status (total escrowed, milestone count) of a Linkd Fund escrow contract.",
        fields: &[CONTRACT_ID],
    },
    ToolDefinition {
        name: "audit_expenditure_anchor",
        description: "Recomputes an invoice content hash and compares it against the memo anchored at a Stellar transaction.",
        fields: &[
            string_field("invoiceNumber", "Invoice number as issued by the supplier"),
            amount_field("amount", "Invoice amount"),
            string_field("supplierName", "Legal name of the supplier"),
            FieldSpec {
                name: "donorIds",
                description: "Donor identifiers funding this expenditure",
                ty: FieldType::StringArray,
                required: true,
                constraint: Constraint::MinItems(1),
            },
            string_field("stellarTxHash", "Hash of the anchoring Stellar transaction"),
        ],
    },
];

/// Look up a tool definition by name
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    CATALOG.iter().find(|def| def.name == name)
}
