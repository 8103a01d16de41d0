use std::pin::pin;

use futures::TryStreamExt;
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, TransactionTrait,
};
use tracing::{debug, info};

use crate::{
    entities::movie,
    error::CatalogError,
    models::{IdList, ListParams, MoviePage, MovieSummary, PAGE_SIZE, matches_search},
    stats::RandomStats,
};

/// Handle over the `mac_vod` table. Each call is a standalone round trip;
/// concurrent requests are serialized by the database alone.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.db.ping().await
    }

    /// One page of records, most recently updated first. A page past the end
    /// yields an empty list rather than being clamped.
    pub async fn list(&self, params: &ListParams) -> Result<MoviePage, CatalogError> {
        let page = match params.needle() {
            None => self.list_all(params).await?,
            Some(needle) => self.list_matching(params, &needle).await?,
        };
        debug!(
            page = params.page,
            search = %params.search,
            total = page.total,
            rows = page.movies.len(),
            "listed movies"
        );
        Ok(page)
    }

    async fn list_all(&self, params: &ListParams) -> Result<MoviePage, CatalogError> {
        let total = movie::Entity::find().count(&self.db).await.map_err(CatalogError::Count)?;

        let rows = movie::Entity::find()
            .order_by_desc(movie::Column::VodTime)
            .order_by_desc(movie::Column::VodId)
            .offset(params.offset())
            .limit(PAGE_SIZE)
            .all(&self.db)
            .await
            .map_err(CatalogError::List)?;

        Ok(MoviePage::new(params, total, rows.into_iter().map(MovieSummary::from).collect()))
    }

    /// SQLite's LIKE only folds ASCII, so the name columns are scanned and
    /// matched here with Unicode lowercase; only the page's rows are loaded.
    async fn list_matching(&self, params: &ListParams, needle: &str) -> Result<MoviePage, CatalogError> {
        let ids = self.matching_ids(needle).await.map_err(CatalogError::Count)?;
        let total = ids.len() as u64;

        let page_ids: Vec<i32> = ids
            .into_iter()
            .skip(usize::try_from(params.offset()).unwrap_or(usize::MAX))
            .take(PAGE_SIZE as usize)
            .collect();

        let rows = if page_ids.is_empty() {
            Vec::new()
        } else {
            movie::Entity::find()
                .filter(movie::Column::VodId.is_in(page_ids))
                .order_by_desc(movie::Column::VodTime)
                .order_by_desc(movie::Column::VodId)
                .all(&self.db)
                .await
                .map_err(CatalogError::List)?
        };

        Ok(MoviePage::new(params, total, rows.into_iter().map(MovieSummary::from).collect()))
    }

    /// IDs of every record whose name, slug or English name contains `needle`,
    /// in listing order.
    async fn matching_ids(&self, needle: &str) -> Result<Vec<i32>, DbErr> {
        let stream = movie::Entity::find()
            .select_only()
            .columns([movie::Column::VodId, movie::Column::VodName, movie::Column::VodSub, movie::Column::VodEn])
            .order_by_desc(movie::Column::VodTime)
            .order_by_desc(movie::Column::VodId)
            .into_tuple::<(i32, String, String, String)>()
            .stream(&self.db)
            .await?;
        let mut rows = pin!(stream);

        let mut ids = Vec::new();
        while let Some((id, name, sub, en)) = rows.try_next().await? {
            if matches_search(needle, &[name.as_str(), sub.as_str(), en.as_str()]) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    pub async fn get(&self, id: i32) -> Result<Option<movie::Model>, CatalogError> {
        movie::Entity::find_by_id(id).one(&self.db).await.map_err(CatalogError::Fetch)
    }

    pub async fn delete_one(&self, id: i32) -> Result<u64, CatalogError> {
        let res = movie::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(CatalogError::Delete)?;
        info!(movie_id = id, affected = res.rows_affected, "deleted movie");
        Ok(res.rows_affected)
    }

    pub async fn delete_many(&self, ids: &IdList) -> Result<u64, CatalogError> {
        let res = movie::Entity::delete_many()
            .filter(movie::Column::VodId.is_in(ids.as_slice().iter().copied()))
            .exec(&self.db)
            .await
            .map_err(CatalogError::Delete)?;
        info!(requested = ids.len(), affected = res.rows_affected, "deleted movies");
        Ok(res.rows_affected)
    }

    pub async fn delete_all(&self) -> Result<u64, CatalogError> {
        let res = movie::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(CatalogError::DeleteAll)?;
        info!(affected = res.rows_affected, "deleted all movies");
        Ok(res.rows_affected)
    }

    /// Overwrites the statistics columns of the given records, or of every
    /// record when `ids` is `None`. Prior values are never read.
    pub async fn randomize(&self, ids: Option<&IdList>) -> Result<u64, CatalogError> {
        let affected = self.randomize_inner(ids).await.map_err(CatalogError::Randomize)?;
        let scope = if ids.is_some() { "selected" } else { "all" };
        info!(scope, affected, "randomized movie stats");
        Ok(affected)
    }

    async fn randomize_inner(&self, ids: Option<&IdList>) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        let targets: Vec<i32> = movie::Entity::find()
            .select_only()
            .column(movie::Column::VodId)
            .apply_if(ids, |q, ids| q.filter(movie::Column::VodId.is_in(ids.as_slice().iter().copied())))
            .into_tuple()
            .all(&txn)
            .await?;

        let mut rng = StdRng::from_entropy();
        let draws: Vec<(i32, RandomStats)> =
            targets.into_iter().map(|id| (id, RandomStats::draw(&mut rng))).collect();

        let mut affected = 0;
        for (id, stats) in draws {
            let res = movie::Entity::update_many()
                .set(stats.into_active_model())
                .filter(movie::Column::VodId.eq(id))
                .exec(&txn)
                .await?;
            affected += res.rows_affected;
        }

        txn.commit().await?;
        Ok(affected)
    }
}
