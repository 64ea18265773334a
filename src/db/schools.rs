use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::domain::{NewSchool, School};
use crate::errors::ServerError;

/// One page of schools, oldest first. `page` starts at 1.
pub fn list_schools(conn: &Connection, page: u32, limit: u32) -> Result<Vec<School>, ServerError> {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);

    let mut stmt = conn.prepare(
        "SELECT id, name, address, city, image FROM schools ORDER BY id ASC LIMIT ?1 OFFSET ?2",
    )?;

    let rows = stmt.query_map(params![limit, offset], school_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Up to `limit` schools with ids above `after_id`, oldest first.
/// Deletes behind `after_id` don't move where this picks up.
pub fn list_schools_after(
    conn: &Connection,
    after_id: i64,
    limit: u32,
) -> Result<Vec<School>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, address, city, image FROM schools WHERE id > ?1 ORDER BY id ASC LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![after_id, limit], school_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn school_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<School> {
    Ok(School {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        image: row.get(4)?,
    })
}

pub fn insert_school(
    conn: &Connection,
    school: &NewSchool,
    image_url: &str,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        INSERT INTO schools (name, address, city, state, contact, image, email_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            school.name.trim(),
            school.address.trim(),
            school.city.trim(),
            school.state.trim(),
            school.contact.trim(),
            image_url,
            school.email_id.trim(),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// `false` when no school had that id.
pub fn delete_school(conn: &Connection, id: i64) -> Result<bool, ServerError> {
    let affected = conn.execute("DELETE FROM schools WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

pub fn count_schools(conn: &Connection) -> Result<i64, ServerError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM schools", [], |r| r.get(0))?)
}
