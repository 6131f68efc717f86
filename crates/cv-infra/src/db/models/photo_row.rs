use diesel::prelude::*;

use crate::db::schema::photos;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = photos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PhotoRow {
    pub id: String,
    pub cv_id: String,
    pub data: Vec<u8>,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_at_ms: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = photos)]
pub struct NewPhotoRow<'a> {
    pub id: &'a str,
    pub cv_id: &'a str,
    pub data: &'a [u8],
    pub mime_type: &'a str,
    pub size_bytes: i64,
    pub uploaded_at_ms: i64,
}

/// Record header without the payload column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = photos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PhotoProjectionRow {
    pub id: String,
    pub cv_id: String,
    pub uploaded_at_ms: i64,
}
