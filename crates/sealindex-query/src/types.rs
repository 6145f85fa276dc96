//! Read-side row types and the aggregate snapshot.
//!
//! These mirror the shape served by the aggregation backend: one collection
//! per event kind, each row carrying the entity's normalized attributes.
//! Collection names on the wire are bit-exact (`SealEncrypt_…`).

use serde::{Deserialize, Serialize};

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRevokedRow {
    pub id: String,
    pub user: String,
    pub cid: String,
    pub revoke_user: String,
    pub revoke_addr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRow {
    pub id: String,
    pub admin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAddedRow {
    pub id: String,
    pub added_by: String,
    pub cid: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAccessRow {
    pub id: String,
    pub user: String,
    pub cid: String,
    pub share_user: String,
    pub share_addr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameRow {
    pub id: String,
    pub user: String,
    pub username: String,
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One aggregate fetch's worth of data: all seven collections, each in the
/// order the backend returned it (no sorting, no dedup).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    #[serde(rename = "SealEncrypt_AccessRevoked", default)]
    pub access_revoked: Vec<AccessRevokedRow>,
    #[serde(rename = "SealEncrypt_AdminAdded", default)]
    pub admin_added: Vec<AdminRow>,
    #[serde(rename = "SealEncrypt_AdminRemoved", default)]
    pub admin_removed: Vec<AdminRow>,
    #[serde(rename = "SealEncrypt_DocumentAdded", default)]
    pub document_added: Vec<DocumentAddedRow>,
    #[serde(rename = "SealEncrypt_ShareAccess", default)]
    pub share_access: Vec<ShareAccessRow>,
    #[serde(rename = "SealEncrypt_UsernameSetAndCreated", default)]
    pub username_created: Vec<UsernameRow>,
    #[serde(rename = "SealEncrypt_UsernameSetAndUpdated", default)]
    pub username_updated: Vec<UsernameRow>,
}

impl ActivitySnapshot {
    /// Total rows across all collections.
    pub fn total_rows(&self) -> usize {
        self.access_revoked.len()
            + self.admin_added.len()
            + self.admin_removed.len()
            + self.document_added.len()
            + self.share_access.len()
            + self.username_created.len()
            + self.username_updated.len()
    }

    /// Per-collection `(name, count)` pairs, in collection-name order.
    pub fn counts(&self) -> [(&'static str, usize); 7] {
        [
            ("SealEncrypt_AccessRevoked", self.access_revoked.len()),
            ("SealEncrypt_AdminAdded", self.admin_added.len()),
            ("SealEncrypt_AdminRemoved", self.admin_removed.len()),
            ("SealEncrypt_DocumentAdded", self.document_added.len()),
            ("SealEncrypt_ShareAccess", self.share_access.len()),
            ("SealEncrypt_UsernameSetAndCreated", self.username_created.len()),
            ("SealEncrypt_UsernameSetAndUpdated", self.username_updated.len()),
        ]
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_deserializes_wire_shape() {
        let snapshot: ActivitySnapshot = serde_json::from_value(serde_json::json!({
            "SealEncrypt_AccessRevoked": [{
                "id": "1_100_2",
                "user": "0xAA",
                "cid": "Qm123",
                "revokeUser": "bob",
                "revokeAddr": "0xBB"
            }],
            "SealEncrypt_AdminAdded": [],
            "SealEncrypt_AdminRemoved": [],
            "SealEncrypt_DocumentAdded": [{
                "id": "1_101_0",
                "addedBy": "0xCC",
                "cid": "Qm456",
                "user": "0xDD"
            }],
            "SealEncrypt_ShareAccess": [],
            "SealEncrypt_UsernameSetAndCreated": [],
            "SealEncrypt_UsernameSetAndUpdated": []
        }))
        .unwrap();

        assert_eq!(snapshot.access_revoked[0].revoke_user, "bob");
        assert_eq!(snapshot.document_added[0].added_by, "0xCC");
        assert_eq!(snapshot.total_rows(), 2);
    }

    #[test]
    fn missing_collections_default_empty() {
        let snapshot: ActivitySnapshot = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(snapshot.total_rows(), 0);
    }
}
