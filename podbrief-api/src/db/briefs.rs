//! Brief rows, always read joined with their guest

use chrono::{DateTime, Utc};
use podbrief_common::models::Brief;
use podbrief_common::{Error, InterviewStyle, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::guests::{delete_guest_if_orphaned, insert_guest};
use super::{format_timestamp, now, parse_timestamp};
use crate::models::{GeneratedBrief, GuestSubmission};

const SELECT_BRIEF: &str = r#"
    SELECT b.id, b.guest_id, g.name AS guest_name, g.link AS guest_link,
           g.topic AS guest_topic, g.interview_style, b.bio, b.questions,
           b.intro, b.outro, b.created_at
    FROM briefs b
    JOIN guests g ON g.id = b.guest_id
"#;

/// Insert a brief for an existing guest on an open connection
pub async fn insert_brief(
    conn: &mut SqliteConnection,
    guest_id: i64,
    content: &GeneratedBrief,
    created_at: &DateTime<Utc>,
) -> Result<i64> {
    let questions = serde_json::to_string(&content.questions)
        .map_err(|e| Error::CorruptRecord(format!("questions not serializable: {}", e)))?;

    let result = sqlx::query(
        "INSERT INTO briefs (guest_id, bio, questions, intro, outro, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(guest_id)
    .bind(&content.bio)
    .bind(questions)
    .bind(&content.intro)
    .bind(&content.outro)
    .bind(format_timestamp(created_at))
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Store a new guest and its brief atomically and return the joined record
pub async fn create_brief_with_guest(
    pool: &SqlitePool,
    guest: &GuestSubmission,
    content: &GeneratedBrief,
) -> Result<Brief> {
    let created_at = now();

    let mut tx = pool.begin().await?;
    let guest_id = insert_guest(&mut tx, guest, &created_at).await?;
    let brief_id = insert_brief(&mut tx, guest_id, content, &created_at).await?;
    tx.commit().await?;

    info!(brief_id, guest_id, guest = %guest.name, "Brief stored");

    Ok(Brief {
        id: brief_id,
        guest_id,
        guest_name: guest.name.clone(),
        guest_link: guest.link.clone(),
        guest_topic: guest.topic.clone(),
        interview_style: guest.interview_style,
        bio: content.bio.clone(),
        questions: content.questions.clone(),
        intro: content.intro.clone(),
        outro: content.outro.clone(),
        created_at,
    })
}

pub async fn get_brief(pool: &SqlitePool, id: i64) -> Result<Option<Brief>> {
    let row = sqlx::query(&format!("{} WHERE b.id = ?", SELECT_BRIEF))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(brief_from_row).transpose()
}

/// All briefs, newest first
pub async fn list_briefs(pool: &SqlitePool) -> Result<Vec<Brief>> {
    let rows = sqlx::query(&format!(
        "{} ORDER BY b.created_at DESC, b.id DESC",
        SELECT_BRIEF
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(brief_from_row).collect()
}

/// Delete a brief, and its guest if no other brief references it
///
/// Returns false when the brief does not exist.
pub async fn delete_brief(pool: &SqlitePool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let guest_id: Option<i64> = sqlx::query_scalar("SELECT guest_id FROM briefs WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(guest_id) = guest_id else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM briefs WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let guest_removed = delete_guest_if_orphaned(&mut tx, guest_id).await?;

    tx.commit().await?;

    debug!(brief_id = id, guest_id, guest_removed, "Brief deleted");
    Ok(true)
}

fn brief_from_row(row: &SqliteRow) -> Result<Brief> {
    let id: i64 = row.try_get("id")?;
    let questions: String = row.try_get("questions")?;
    let questions: Vec<String> = serde_json::from_str(&questions)
        .map_err(|e| Error::CorruptRecord(format!("brief {} questions: {}", id, e)))?;
    let style: Option<String> = row.try_get("interview_style")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Brief {
        id,
        guest_id: row.try_get("guest_id")?,
        guest_name: row.try_get("guest_name")?,
        guest_link: row.try_get("guest_link")?,
        guest_topic: row.try_get("guest_topic")?,
        interview_style: InterviewStyle::parse_or_default(style.as_deref()),
        bio: row.try_get("bio")?,
        questions,
        intro: row.try_get("intro")?,
        outro: row.try_get("outro")?,
        created_at: parse_timestamp(&created_at)?,
    })
}
