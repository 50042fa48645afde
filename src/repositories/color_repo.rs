//! Color repository for async database operations.
//!
//! Implements [`ColorStore`] over the `colors` table using diesel_async.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::{AsyncDbPool, pool_error};
use crate::error::{AppError, AppResult};
use crate::models::{Color, NewColor, Page, PageRequest, SortField};
use crate::repositories::{ColorSpecification, ColorStore};
use crate::schema::colors;

/// Color repository holding an async connection pool.
///
/// Cloning is cheap: the pool is reference counted internally.
#[derive(Clone)]
pub struct ColorRepository {
    pool: AsyncDbPool,
}

impl ColorRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ColorStore for ColorRepository {
    async fn find_by_id(&self, color_id: i32) -> AppResult<Option<Color>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        colors::table
            .filter(colors::id.eq(color_id))
            .select(Color::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_name(&self, color_name: &str) -> AppResult<Option<Color>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        colors::table
            .filter(colors::name.eq(color_name))
            .order(colors::id.asc())
            .select(Color::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_by_hex(&self, color_hex: &str) -> AppResult<Option<Color>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        colors::table
            .filter(colors::hex.eq(color_hex))
            .select(Color::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Loads one page and the total match count in a single repeatable-read
    /// transaction, so the count always agrees with the content.
    async fn find_page(
        &self,
        spec: &ColorSpecification,
        page_request: &PageRequest,
    ) -> AppResult<Page<Color>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let (content, total) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run(|conn| {
                async move {
                    let mut page_query = colors::table.select(Color::as_select()).into_boxed();
                    if let Some(predicate) = spec.to_filter() {
                        page_query = page_query.filter(predicate);
                    }
                    page_query = sorted(page_query, page_request.sort);

                    let content = page_query
                        .offset(page_request.offset())
                        .limit(page_request.limit())
                        .load::<Color>(conn)
                        .await
                        .map_err(AppError::from)?;

                    let mut count_query = colors::table.into_boxed();
                    if let Some(predicate) = spec.to_filter() {
                        count_query = count_query.filter(predicate);
                    }
                    let total = count_query
                        .count()
                        .get_result::<i64>(conn)
                        .await
                        .map_err(AppError::from)?;

                    Ok::<_, AppError>((content, total))
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            page = page_request.page,
            size = page_request.size,
            sort = %page_request.sort,
            returned = content.len(),
            total,
            "Loaded color page"
        );

        Ok(Page::new(content, page_request, total))
    }

    async fn save(&self, new_color: NewColor) -> AppResult<Color> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(colors::table)
            .values(&new_color)
            .returning(Color::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, color_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(colors::table.filter(colors::id.eq(color_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

/// Ascending on `sort`, then on `id`. Nullable columns put NULLs last.
fn sorted<'a, ST>(
    query: colors::BoxedQuery<'a, Pg, ST>,
    sort: SortField,
) -> colors::BoxedQuery<'a, Pg, ST> {
    match sort {
        SortField::Id => query.order(colors::id.asc()),
        SortField::Name => query.order((colors::name.asc().nulls_last(), colors::id.asc())),
        SortField::Hex => query.order((colors::hex.asc(), colors::id.asc())),
        SortField::Description => {
            query.order((colors::description.asc().nulls_last(), colors::id.asc()))
        }
    }
}
