//! Guest rows

use chrono::{DateTime, Utc};
use podbrief_common::models::Guest;
use podbrief_common::{InterviewStyle, Result};
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{format_timestamp, parse_timestamp};
use crate::models::GuestSubmission;

/// Insert a guest on an open connection (usually inside a transaction)
pub async fn insert_guest(
    conn: &mut SqliteConnection,
    guest: &GuestSubmission,
    created_at: &DateTime<Utc>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO guests (name, link, topic, interview_style, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guest.name)
    .bind(&guest.link)
    .bind(&guest.topic)
    .bind(guest.interview_style.as_str())
    .bind(format_timestamp(created_at))
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_guest(pool: &SqlitePool, id: i64) -> Result<Option<Guest>> {
    let row = sqlx::query(
        "SELECT id, name, link, topic, interview_style, created_at FROM guests WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let style: Option<String> = row.try_get("interview_style")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Some(Guest {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        link: row.try_get("link")?,
        topic: row.try_get("topic")?,
        interview_style: InterviewStyle::parse_or_default(style.as_deref()),
        created_at: parse_timestamp(&created_at)?,
    }))
}

/// Delete the guest when no brief references it any more
///
/// Returns true when a row was removed.
pub(crate) async fn delete_guest_if_orphaned(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM guests WHERE id = ? AND NOT EXISTS (SELECT 1 FROM briefs WHERE guest_id = ?)",
    )
    .bind(id)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
