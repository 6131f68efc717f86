use anyhow::Context;
use cv_core::ports::{PhotoRepositoryPort, RepositoryError};
use cv_core::{CvId, PhotoId, PhotoProjection, PhotoRecord};
use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use tracing::debug;

use crate::db::error::classify;
use crate::db::mappers::photo_mapper::PhotoRowMapper;
use crate::db::models::{PhotoProjectionRow, PhotoRow};
use crate::db::ports::{DbExecutor, RowMapper};
use crate::db::schema::photos;

pub struct DieselPhotoRepository<E>
where
    E: DbExecutor,
{
    executor: E,
    mapper: PhotoRowMapper,
}

impl<E> DieselPhotoRepository<E>
where
    E: DbExecutor,
{
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            mapper: PhotoRowMapper,
        }
    }

    fn map_rows(&self, rows: Vec<PhotoRow>) -> anyhow::Result<Vec<PhotoRecord>> {
        rows.iter().map(|row| self.mapper.to_domain(row)).collect()
    }
}

#[async_trait::async_trait]
impl<E> PhotoRepositoryPort for DieselPhotoRepository<E>
where
    E: DbExecutor,
{
    async fn insert(&self, record: &PhotoRecord) -> Result<(), RepositoryError> {
        let new_row = self.mapper.to_row(record);
        self.executor
            .run(|conn| {
                diesel::insert_into(photos::table)
                    .values(&new_row)
                    .execute(conn)
                    .with_context(|| format!("insert photo {}", record.id))?;
                Ok(())
            })
            .map_err(classify)?;

        debug!(photo_id = %record.id, size_bytes = record.blob.size_bytes, "Inserted photo row");
        Ok(())
    }

    async fn find_by_id(&self, id: &PhotoId) -> Result<Option<PhotoRecord>, RepositoryError> {
        let row: Option<PhotoRow> = self
            .executor
            .run(|conn| {
                let row = photos::table
                    .find(id.as_str())
                    .select(PhotoRow::as_select())
                    .first::<PhotoRow>(conn)
                    .optional()?;
                Ok(row)
            })
            .map_err(classify)?;

        row.map(|row| self.mapper.to_domain(&row))
            .transpose()
            .map_err(classify)
    }

    async fn delete(&self, id: &PhotoId) -> Result<(), RepositoryError> {
        let removed = self
            .executor
            .run(|conn| {
                let removed = diesel::delete(photos::table.find(id.as_str())).execute(conn)?;
                Ok(removed)
            })
            .map_err(classify)?;

        debug!(photo_id = %id, removed, "Deleted photo row");
        Ok(())
    }

    async fn find_by_cv_id(&self, cv_id: &CvId) -> Result<Vec<PhotoRecord>, RepositoryError> {
        let rows: Vec<PhotoRow> = self
            .executor
            .run(|conn| {
                let rows = photos::table
                    .filter(photos::cv_id.eq(cv_id.as_str()))
                    .order((photos::uploaded_at_ms.asc(), photos::id.asc()))
                    .select(PhotoRow::as_select())
                    .load::<PhotoRow>(conn)?;
                Ok(rows)
            })
            .map_err(classify)?;

        self.map_rows(rows).map_err(classify)
    }

    async fn delete_by_cv_id(&self, cv_id: &CvId) -> Result<Vec<PhotoId>, RepositoryError> {
        // One transaction: the index lookup and the deletes see the same snapshot.
        let ids: Vec<String> = self
            .executor
            .run(|conn| {
                conn.transaction::<_, anyhow::Error, _>(|conn| {
                    let ids = photos::table
                        .filter(photos::cv_id.eq(cv_id.as_str()))
                        .select(photos::id)
                        .load::<String>(conn)?;
                    diesel::delete(photos::table.filter(photos::cv_id.eq(cv_id.as_str())))
                        .execute(conn)?;
                    Ok(ids)
                })
            })
            .map_err(classify)?;

        debug!(cv_id = %cv_id, count = ids.len(), "Deleted photo rows for CV");
        Ok(ids.into_iter().map(PhotoId::from).collect())
    }

    async fn update_cv_id(&self, id: &PhotoId, new_cv_id: &CvId) -> Result<bool, RepositoryError> {
        let updated = self
            .executor
            .run(|conn| {
                let updated = diesel::update(photos::table.find(id.as_str()))
                    .set(photos::cv_id.eq(new_cv_id.as_str()))
                    .execute(conn)?;
                Ok(updated)
            })
            .map_err(classify)?;

        Ok(updated > 0)
    }

    async fn list_projections(&self) -> Result<Vec<PhotoProjection>, RepositoryError> {
        let rows: Vec<PhotoProjectionRow> = self
            .executor
            .run(|conn| {
                let rows = photos::table
                    .order((photos::uploaded_at_ms.asc(), photos::id.asc()))
                    .select(PhotoProjectionRow::as_select())
                    .load::<PhotoProjectionRow>(conn)?;
                Ok(rows)
            })
            .map_err(classify)?;

        rows.iter()
            .map(|row| self.mapper.to_domain(row))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(classify)
    }
}

#[cfg(test)]
mod tests {
    use cv_core::ports::PhotoRepositoryPort;
    use cv_core::{CvId, MimeType, PhotoBlob, PhotoId, PhotoRecord};

    use crate::db::executor::DieselSqliteExecutor;
    use crate::db::pool::init_db_pool;

    use super::DieselPhotoRepository;

    fn record(id: &str, cv_id: &str, uploaded_at_ms: i64) -> PhotoRecord {
        PhotoRecord::new(
            PhotoId::from(id),
            CvId::from(cv_id),
            PhotoBlob::new(vec![0xFF, 0xD8, 0xFF, 0xE0], MimeType::image_jpeg()),
            uploaded_at_ms,
        )
    }

    #[tokio::test]
    async fn test_photo_repo_insert_and_get() {
        let pool = init_db_pool(":memory:").unwrap();
        let repo = DieselPhotoRepository::new(DieselSqliteExecutor::new(pool));

        let photo = record("photo_cv1_1_aaa", "cv1", 1);
        repo.insert(&photo).await.unwrap();

        let fetched = repo.find_by_id(&photo.id).await.unwrap();
        assert_eq!(fetched, Some(photo));
        assert_eq!(
            repo.find_by_id(&PhotoId::from("missing")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_update_cv_id_keeps_index_current() {
        let pool = init_db_pool(":memory:").unwrap();
        let repo = DieselPhotoRepository::new(DieselSqliteExecutor::new(pool));

        let photo = record("photo_temp_1_aaa", "temp", 1);
        repo.insert(&photo).await.unwrap();

        assert!(repo.update_cv_id(&photo.id, &CvId::from("cv9")).await.unwrap());
        assert!(repo.find_by_cv_id(&CvId::from("temp")).await.unwrap().is_empty());
        assert_eq!(repo.find_by_cv_id(&CvId::from("cv9")).await.unwrap().len(), 1);

        assert!(!repo
            .update_cv_id(&PhotoId::from("missing"), &CvId::from("cv9"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_cv_id_removes_only_that_cv() {
        let pool = init_db_pool(":memory:").unwrap();
        let repo = DieselPhotoRepository::new(DieselSqliteExecutor::new(pool));

        repo.insert(&record("photo_cv1_1_aaa", "cv1", 1)).await.unwrap();
        repo.insert(&record("photo_cv1_2_bbb", "cv1", 2)).await.unwrap();
        repo.insert(&record("photo_cv2_3_ccc", "cv2", 3)).await.unwrap();

        let removed = repo.delete_by_cv_id(&CvId::from("cv1")).await.unwrap();

        assert_eq!(removed.len(), 2);
        assert!(repo.find_by_cv_id(&CvId::from("cv1")).await.unwrap().is_empty());
        let remaining = repo.list_projections().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].cv_id.as_str(), "cv2");
    }
}
