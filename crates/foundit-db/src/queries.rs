use foundit_types::api::{ItemSummary, SeekerProfile};
use foundit_types::models::{Claim, Item, ItemStatus, Profile, Question, Role};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    ApplicantRow, CredentialRow, ItemFields, SeekerClaimRow, json_col, opt_uuid_col, parsed_col,
    timestamp_col, uuid_col,
};
use crate::{Database, Result, StoreError};

const ITEM_COLUMNS: &str = "id, title, category, description, image_url, founder_id, questions, status, winning_claim_id, created_at";
const CLAIM_COLUMNS: &str = "c.id, c.item_id, c.seeker_id, c.answers, c.is_winner, c.created_at";

impl Database {
    // -- Accounts & profiles --

    /// Create login credentials and the matching profile in one transaction.
    pub fn create_account(
        &self,
        id: Uuid,
        email: &str,
        password_hash: &str,
        username: &str,
        role: Role,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO users (id, email, password) VALUES (?1, ?2, ?3)",
                params![id.to_string(), email, password_hash],
            )
            .map_err(|e| {
                if StoreError::is_unique_violation(&e) {
                    StoreError::DuplicateEmail
                } else {
                    e.into()
                }
            })?;
            tx.execute(
                "INSERT INTO profiles (id, username, role, email) VALUES (?1, ?2, ?3, ?4)",
                params![id.to_string(), username, role.as_str(), email],
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    pub fn get_credentials_by_email(&self, email: &str) -> Result<Option<CredentialRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, email, password FROM users WHERE email = ?1",
                    [email],
                    |row| {
                        Ok(CredentialRow {
                            id: uuid_col(row, 0)?,
                            email: row.get(1)?,
                            password: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, username, role, avatar_url, email FROM profiles WHERE id = ?1",
                    [id.to_string()],
                    |row| {
                        Ok(Profile {
                            id: uuid_col(row, 0)?,
                            username: row.get(1)?,
                            role: parsed_col(row, 2)?,
                            avatar_url: row.get(3)?,
                            email: row.get(4)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn update_username(&self, id: Uuid, username: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let n = conn.execute(
                "UPDATE profiles SET username = ?1 WHERE id = ?2",
                params![username, id.to_string()],
            )?;
            if n == 0 {
                return Err(StoreError::NotFound("Profile"));
            }
            Ok(())
        })
    }

    pub fn update_avatar(&self, id: Uuid, avatar_url: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let n = conn.execute(
                "UPDATE profiles SET avatar_url = ?1 WHERE id = ?2",
                params![avatar_url, id.to_string()],
            )?;
            if n == 0 {
                return Err(StoreError::NotFound("Profile"));
            }
            Ok(())
        })
    }

    // -- Items --

    pub fn insert_item(&self, id: Uuid, founder_id: Uuid, fields: &ItemFields) -> Result<Item> {
        let questions = serde_json::to_string(&fields.questions)?;
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO items (id, title, category, description, image_url, founder_id, questions, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'found')",
                params![
                    id.to_string(),
                    fields.title,
                    fields.category,
                    fields.description,
                    fields.image_url,
                    founder_id.to_string(),
                    questions,
                ],
            )?;
            query_item(conn, id)?.ok_or(StoreError::NotFound("Item"))
        })
    }

    pub fn get_item(&self, id: Uuid) -> Result<Option<Item>> {
        self.with_conn(|conn| query_item(conn, id))
    }

    /// Overwrite an item's editable fields. Only the owning founder may edit.
    ///
    /// Returns the updated item and the image URL it had before the edit, read
    /// in the same transaction.
    pub fn update_item(
        &self,
        id: Uuid,
        founder_id: Uuid,
        fields: &ItemFields,
    ) -> Result<(Item, Option<String>)> {
        let questions = serde_json::to_string(&fields.questions)?;
        self.with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let previous = query_item(&tx, id)?.ok_or(StoreError::NotFound("Item"))?;
            if previous.founder_id != founder_id {
                return Err(StoreError::NotOwner);
            }
            tx.execute(
                "UPDATE items SET title = ?1, category = ?2, description = ?3, image_url = ?4, questions = ?5
                 WHERE id = ?6",
                params![
                    fields.title,
                    fields.category,
                    fields.description,
                    fields.image_url,
                    questions,
                    id.to_string(),
                ],
            )?;
            let item = query_item(&tx, id)?.ok_or(StoreError::NotFound("Item"))?;
            tx.commit()?;
            Ok((item, previous.image_url))
        })
    }

    pub fn list_items_by_status(&self, status: ItemStatus) -> Result<Vec<Item>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM items WHERE status = ?1 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([status.as_str()], map_item)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    pub fn list_items_by_founder(&self, founder_id: Uuid) -> Result<Vec<Item>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM items WHERE founder_id = ?1 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map([founder_id.to_string()], map_item)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    // -- Claims --

    /// Record a seeker's answers for an item.
    ///
    /// The item must exist and still be `found`; that check runs before the
    /// insert, inside the same write transaction. A second claim by the same
    /// seeker trips the UNIQUE(item_id, seeker_id) constraint and comes back as
    /// `DuplicateClaim`.
    pub fn insert_claim(
        &self,
        id: Uuid,
        item_id: Uuid,
        seeker_id: Uuid,
        answers: &[Option<u8>],
    ) -> Result<Claim> {
        let answers_json = serde_json::to_string(answers)?;
        self.with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let status = query_item_status(&tx, item_id)?.ok_or(StoreError::NotFound("Item"))?;
            if status == ItemStatus::Claimed {
                return Err(StoreError::AlreadyClaimed);
            }

            tx.execute(
                "INSERT INTO claims (id, item_id, seeker_id, answers) VALUES (?1, ?2, ?3, ?4)",
                params![id.to_string(), item_id.to_string(), seeker_id.to_string(), answers_json],
            )
            .map_err(|e| {
                if StoreError::is_unique_violation(&e) {
                    StoreError::DuplicateClaim
                } else {
                    e.into()
                }
            })?;

            let claim = tx.query_row(
                &format!("SELECT {CLAIM_COLUMNS} FROM claims c WHERE c.id = ?1"),
                [id.to_string()],
                map_claim,
            )?;
            tx.commit()?;
            Ok(claim)
        })
    }

    pub fn get_claim_for_seeker(&self, item_id: Uuid, seeker_id: Uuid) -> Result<Option<Claim>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {CLAIM_COLUMNS} FROM claims c WHERE c.item_id = ?1 AND c.seeker_id = ?2"),
                    [item_id.to_string(), seeker_id.to_string()],
                    map_claim,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// All claims on an item with the applicant's profile, newest first.
    pub fn list_claims_for_item(&self, item_id: Uuid) -> Result<Vec<ApplicantRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CLAIM_COLUMNS}, p.id, p.username, p.email, p.avatar_url
                 FROM claims c
                 LEFT JOIN profiles p ON p.id = c.seeker_id
                 WHERE c.item_id = ?1
                 ORDER BY c.created_at DESC, c.rowid DESC"
            ))?;
            let rows = stmt
                .query_map([item_id.to_string()], |row| {
                    let has_profile = row.get::<_, Option<String>>(6)?.is_some();
                    let seeker_profile = if has_profile {
                        Some(SeekerProfile {
                            username: row.get(7)?,
                            email: row.get(8)?,
                            avatar_url: row.get(9)?,
                        })
                    } else {
                        None
                    };
                    Ok(ApplicantRow {
                        claim: map_claim(row)?,
                        seeker_profile,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    /// A seeker's claims joined with the claimed item, newest first.
    pub fn list_claims_for_seeker(&self, seeker_id: Uuid) -> Result<Vec<SeekerClaimRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CLAIM_COLUMNS}, i.id, i.title, i.category, i.image_url, i.status, i.created_at
                 FROM claims c
                 JOIN items i ON i.id = c.item_id
                 WHERE c.seeker_id = ?1
                 ORDER BY c.created_at DESC, c.rowid DESC"
            ))?;
            let rows = stmt
                .query_map([seeker_id.to_string()], |row| {
                    Ok(SeekerClaimRow {
                        claim: map_claim(row)?,
                        item: ItemSummary {
                            id: uuid_col(row, 6)?,
                            title: row.get(7)?,
                            category: row.get(8)?,
                            image_url: row.get(9)?,
                            status: parsed_col(row, 10)?,
                            created_at: timestamp_col(row, 11)?,
                        },
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }

    // -- Winner selection --

    /// Mark `claim_id` as the winner of `item_id` and the item as claimed.
    ///
    /// Runs as one IMMEDIATE transaction: clear every winner flag on the item,
    /// flag the chosen claim, then flip the item to `claimed` guarded on
    /// `status = 'found'`. Any failure rolls the whole thing back, so callers
    /// never observe a half-applied selection. Refuses without writing when
    /// the item is already claimed.
    pub fn select_winner(&self, founder_id: Uuid, item_id: Uuid, claim_id: Uuid) -> Result<Item> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let item_key = item_id.to_string();
            let claim_key = claim_id.to_string();

            let owner = query_item_owner(&tx, item_id)?.ok_or(StoreError::NotFound("Item"))?;
            if owner != founder_id {
                return Err(StoreError::NotOwner);
            }
            if query_item_status(&tx, item_id)? == Some(ItemStatus::Claimed) {
                return Err(StoreError::AlreadyClaimed);
            }

            tx.execute("UPDATE claims SET is_winner = 0 WHERE item_id = ?1", [&item_key])?;

            let flagged = tx.execute(
                "UPDATE claims SET is_winner = 1 WHERE id = ?1 AND item_id = ?2",
                [&claim_key, &item_key],
            )?;
            if flagged != 1 {
                return Err(StoreError::ClaimNotFound);
            }

            let claimed = tx.execute(
                "UPDATE items SET status = 'claimed', winning_claim_id = ?1
                 WHERE id = ?2 AND status = 'found'",
                [&claim_key, &item_key],
            )?;
            if claimed != 1 {
                return Err(StoreError::AlreadyClaimed);
            }

            let winners: Vec<String> = {
                let mut stmt =
                    tx.prepare("SELECT id FROM claims WHERE item_id = ?1 AND is_winner = 1")?;
                let ids = stmt
                    .query_map([&item_key], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                ids
            };
            if winners != [claim_key.as_str()] {
                warn!("Item {} has winners {:?} after selecting {}", item_id, winners, claim_id);
                return Err(StoreError::InconsistentWinner(item_id));
            }

            let item = query_item(&tx, item_id)?.ok_or(StoreError::NotFound("Item"))?;
            tx.commit()?;

            info!("Item {} claimed by claim {}", item_id, claim_id);
            Ok(item)
        })
    }
}

fn map_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    let questions = match row.get::<_, Option<String>>(6)? {
        Some(_) => Some(json_col::<Vec<Question>>(row, 6)?),
        None => None,
    };
    Ok(Item {
        id: uuid_col(row, 0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        image_url: row.get(4)?,
        founder_id: uuid_col(row, 5)?,
        questions,
        status: parsed_col(row, 7)?,
        winning_claim_id: opt_uuid_col(row, 8)?,
        created_at: timestamp_col(row, 9)?,
    })
}

/// Maps the first six columns, laid out as `CLAIM_COLUMNS`.
fn map_claim(row: &rusqlite::Row<'_>) -> rusqlite::Result<Claim> {
    Ok(Claim {
        id: uuid_col(row, 0)?,
        item_id: uuid_col(row, 1)?,
        seeker_id: uuid_col(row, 2)?,
        answers: json_col(row, 3)?,
        is_winner: row.get(4)?,
        created_at: timestamp_col(row, 5)?,
    })
}

fn query_item(conn: &Connection, id: Uuid) -> Result<Option<Item>> {
    let row = conn
        .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            [id.to_string()],
            map_item,
        )
        .optional()?;
    Ok(row)
}

fn query_item_owner(conn: &Connection, id: Uuid) -> Result<Option<Uuid>> {
    let row = conn
        .query_row("SELECT founder_id FROM items WHERE id = ?1", [id.to_string()], |row| {
            uuid_col(row, 0)
        })
        .optional()?;
    Ok(row)
}

fn query_item_status(conn: &Connection, id: Uuid) -> Result<Option<ItemStatus>> {
    let row = conn
        .query_row("SELECT status FROM items WHERE id = ?1", [id.to_string()], |row| {
            parsed_col(row, 0)
        })
        .optional()?;
    Ok(row)
}
