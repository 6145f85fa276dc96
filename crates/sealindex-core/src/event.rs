//! Contract event model — the closed set of SealEncrypt event kinds and the
//! per-kind attribute tables that drive normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── EventKind ───────────────────────────────────────────────────────────────

/// The SealEncrypt contract events this indexer understands.
///
/// One variant per contract event type. Each variant carries (via
/// [`EventKind::field_map`]) the mapping from the event's emitted parameter
/// names to the normalized attribute names stored on the entity. The same
/// table is used to build the aggregation query, so the write side and the
/// read side cannot disagree on attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    AccessRevoked,
    AdminAdded,
    AdminRemoved,
    DocumentAdded,
    ShareAccess,
    UsernameSetAndCreated,
    UsernameSetAndUpdated,
}

/// One attribute of an event: the parameter name as emitted by the contract
/// and the normalized (lower-camel-case) name it is stored under.
///
/// The contract's emitted casing is inconsistent (`Revokeuser` next to
/// `shareUser`); the field map is the normalization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub source: &'static str,
    pub normalized: &'static str,
}

const fn field(source: &'static str, normalized: &'static str) -> FieldMapping {
    FieldMapping { source, normalized }
}

const ACCESS_REVOKED_FIELDS: &[FieldMapping] = &[
    field("user", "user"),
    field("cid", "cid"),
    field("Revokeuser", "revokeUser"),
    field("RevokeAddr", "revokeAddr"),
];

const ADMIN_FIELDS: &[FieldMapping] = &[field("admin", "admin")];

const DOCUMENT_ADDED_FIELDS: &[FieldMapping] = &[
    field("addedBy", "addedBy"),
    field("cid", "cid"),
    field("user", "user"),
];

const SHARE_ACCESS_FIELDS: &[FieldMapping] = &[
    field("user", "user"),
    field("cid", "cid"),
    field("shareUser", "shareUser"),
    field("shareAddr", "shareAddr"),
];

const USERNAME_FIELDS: &[FieldMapping] = &[
    field("user", "user"),
    field("username", "username"),
];

impl EventKind {
    /// All event kinds, in collection-name order.
    pub const ALL: [EventKind; 7] = [
        EventKind::AccessRevoked,
        EventKind::AdminAdded,
        EventKind::AdminRemoved,
        EventKind::DocumentAdded,
        EventKind::ShareAccess,
        EventKind::UsernameSetAndCreated,
        EventKind::UsernameSetAndUpdated,
    ];

    /// The entity collection name for this kind.
    ///
    /// These names are part of the external interface (the aggregation
    /// backend exposes one collection per name) and must match bit-exact.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::AccessRevoked => "SealEncrypt_AccessRevoked",
            Self::AdminAdded => "SealEncrypt_AdminAdded",
            Self::AdminRemoved => "SealEncrypt_AdminRemoved",
            Self::DocumentAdded => "SealEncrypt_DocumentAdded",
            Self::ShareAccess => "SealEncrypt_ShareAccess",
            Self::UsernameSetAndCreated => "SealEncrypt_UsernameSetAndCreated",
            Self::UsernameSetAndUpdated => "SealEncrypt_UsernameSetAndUpdated",
        }
    }

    /// The attribute table for this kind: emitted parameter name →
    /// normalized attribute name, in stored order.
    pub fn field_map(&self) -> &'static [FieldMapping] {
        match self {
            Self::AccessRevoked => ACCESS_REVOKED_FIELDS,
            Self::AdminAdded | Self::AdminRemoved => ADMIN_FIELDS,
            Self::DocumentAdded => DOCUMENT_ADDED_FIELDS,
            Self::ShareAccess => SHARE_ACCESS_FIELDS,
            Self::UsernameSetAndCreated | Self::UsernameSetAndUpdated => USERNAME_FIELDS,
        }
    }

    /// Look up a kind by its collection name.
    pub fn from_entity_type(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.entity_type() == name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.entity_type())
    }
}

// ─── EventEnvelope ───────────────────────────────────────────────────────────

/// Coordinates of the block a log was emitted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    /// Block number.
    pub number: u64,
}

/// A raw log event as delivered by the indexing runtime.
///
/// The runtime sequences logs in canonical order and invokes the dispatcher
/// once per log; `params` is the event-specific parameter record, kept as
/// raw JSON until normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Numeric chain id (e.g. `1` for Ethereum mainnet).
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    /// The block the log belongs to.
    pub block: BlockRef,
    /// Position of the log within its block.
    #[serde(rename = "logIndex")]
    pub log_index: u32,
    /// Event-specific parameter record, in the contract's emitted casing.
    pub params: Value,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_exact() {
        let names: Vec<&str> = EventKind::ALL.iter().map(|k| k.entity_type()).collect();
        assert_eq!(
            names,
            vec![
                "SealEncrypt_AccessRevoked",
                "SealEncrypt_AdminAdded",
                "SealEncrypt_AdminRemoved",
                "SealEncrypt_DocumentAdded",
                "SealEncrypt_ShareAccess",
                "SealEncrypt_UsernameSetAndCreated",
                "SealEncrypt_UsernameSetAndUpdated",
            ]
        );
    }

    #[test]
    fn from_entity_type_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_entity_type(kind.entity_type()), Some(kind));
        }
        assert_eq!(EventKind::from_entity_type("SealEncrypt_Unknown"), None);
    }

    #[test]
    fn access_revoked_normalizes_casing() {
        let map = EventKind::AccessRevoked.field_map();
        let revoke_user = map.iter().find(|f| f.source == "Revokeuser").unwrap();
        assert_eq!(revoke_user.normalized, "revokeUser");
        let revoke_addr = map.iter().find(|f| f.source == "RevokeAddr").unwrap();
        assert_eq!(revoke_addr.normalized, "revokeAddr");
    }

    #[test]
    fn envelope_deserializes_runtime_shape() {
        let envelope: EventEnvelope = serde_json::from_value(serde_json::json!({
            "chainId": 1,
            "block": { "number": 100 },
            "logIndex": 2,
            "params": { "admin": "0xAA" }
        }))
        .unwrap();
        assert_eq!(envelope.chain_id, 1);
        assert_eq!(envelope.block.number, 100);
        assert_eq!(envelope.log_index, 2);
        assert_eq!(envelope.params["admin"], "0xAA");
    }
}
