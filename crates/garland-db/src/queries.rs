use crate::Database;
use crate::models::{MessageRow, TreeRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        username: &str,
        password_hash: &str,
        created_at: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password, created_at) VALUES (?1, ?2, ?3, ?4)",
                (id, username, password_hash, created_at),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Trees --

    pub fn insert_tree(&self, tree: &TreeRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO trees (id, owner_id, name, pin, theme, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    tree.id,
                    tree.owner_id,
                    tree.name,
                    tree.pin,
                    tree.theme,
                    tree.created_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_tree(&self, id: &str) -> Result<Option<TreeRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, owner_id, name, pin, theme, created_at
                     FROM trees WHERE id = ?1",
                    [id],
                    tree_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn trees_by_owner(&self, owner_id: &str) -> Result<Vec<TreeRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, name, pin, theme, created_at
                 FROM trees WHERE owner_id = ?1
                 ORDER BY created_at DESC",
            )?;

            let rows = stmt
                .query_map([owner_id], tree_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Messages --

    pub fn insert_message(&self, message: &MessageRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO messages (id, tree_id, sender, content, color, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    message.id,
                    message.tree_id,
                    message.sender,
                    message.content,
                    message.color,
                    message.created_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, tree_id, sender, content, color, created_at
                     FROM messages WHERE id = ?1",
                    [id],
                    message_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn messages_for_tree(&self, tree_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, tree_id, sender, content, color, created_at
                 FROM messages WHERE tree_id = ?1
                 ORDER BY created_at DESC",
            )?;

            let rows = stmt
                .query_map([tree_id], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Returns true when a row was actually removed.
    pub fn delete_message(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn tree_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<TreeRow, rusqlite::Error> {
    Ok(TreeRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        pin: row.get(3)?,
        theme: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn message_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<MessageRow, rusqlite::Error> {
    Ok(MessageRow {
        id: row.get(0)?,
        tree_id: row.get(1)?,
        sender: row.get(2)?,
        content: row.get(3)?,
        color: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}
