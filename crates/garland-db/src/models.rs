/// Database row types mapping directly to SQLite rows.
/// Distinct from the garland-types API models to keep the DB layer
/// independent; ids and timestamps stay as the TEXT the database holds.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct TreeRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub pin: String,
    pub theme: String,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub tree_id: String,
    pub sender: String,
    pub content: String,
    pub color: String,
    pub created_at: String,
}
