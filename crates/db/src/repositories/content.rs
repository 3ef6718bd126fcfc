//! Content repository for database operations.
//!
//! Implements content persistence and listing using SeaORM.

use std::collections::HashMap;

use chrono::Utc;
use mediashelf_core::content::{
    ContentCategory, ContentDraft, ContentError, ContentFilter, ContentRecord,
    ContentRepository as ContentRepoTrait, Entry, Identity, LIKE_ESCAPE,
};
use mediashelf_shared::Caller;
use mediashelf_shared::types::{ContentId, PageRequest, UserId};
use sea_orm::ActiveValue::{NotSet, Unchanged};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::user::{load_identities, upsert_caller};
use crate::entities::{contents, sea_orm_active_enums::ContentCategory as DbContentCategory};

/// Content repository implementation.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    db: DatabaseConnection,
}

impl ContentRepository {
    /// Create a new content repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn resolve<C: ConnectionTrait>(
        conn: &C,
        models: Vec<contents::Model>,
    ) -> Result<Vec<ContentRecord>, ContentError> {
        let ids = models
            .iter()
            .flat_map(|m| [m.created_by_id, m.last_edited_by_id]);
        let identities: HashMap<Uuid, Identity> = load_identities(conn, ids)
            .await
            .map_err(repo_err)?
            .into_iter()
            .map(|identity| (identity.id.into_inner(), identity))
            .collect();

        models
            .into_iter()
            .map(|model| to_domain(model, &identities))
            .collect()
    }

    async fn resolve_one<C: ConnectionTrait>(
        conn: &C,
        model: contents::Model,
    ) -> Result<ContentRecord, ContentError> {
        Self::resolve(conn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| ContentError::repository("record vanished while resolving"))
    }
}

impl ContentRepoTrait for ContentRepository {
    async fn insert(
        &self,
        id: ContentId,
        draft: ContentDraft,
        caller: &Caller,
    ) -> Result<ContentRecord, ContentError> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(repo_err)?;

        upsert_caller(&txn, caller, now).await.map_err(repo_err)?;

        let active_model = contents::ActiveModel {
            id: Set(id.into_inner()),
            title: Set(draft.title),
            category: Set(to_db_category(draft.category)),
            year: Set(draft.year),
            platform: Set(draft.platform),
            description: Set(draft.description),
            artists: Set(to_json(&draft.artists)?),
            aliases: Set(to_json(&draft.aliases)?),
            tags: Set(to_json(&draft.tags)?),
            image: Set(draft.image),
            created_by_id: Set(caller.id.into_inner()),
            last_edited_by_id: Set(caller.id.into_inner()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model.insert(&txn).await.map_err(repo_err)?;
        let record = Self::resolve_one(&txn, model).await?;

        txn.commit().await.map_err(repo_err)?;
        Ok(record)
    }

    async fn update(
        &self,
        id: ContentId,
        draft: ContentDraft,
        caller: &Caller,
    ) -> Result<Option<ContentRecord>, ContentError> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(repo_err)?;

        upsert_caller(&txn, caller, now).await.map_err(repo_err)?;

        // Single UPDATE ... WHERE id = $1 RETURNING *; zero rows means not found.
        let active_model = contents::ActiveModel {
            id: Unchanged(id.into_inner()),
            title: Set(draft.title),
            category: Set(to_db_category(draft.category)),
            year: Set(draft.year),
            platform: Set(draft.platform),
            description: Set(draft.description),
            artists: Set(to_json(&draft.artists)?),
            aliases: Set(to_json(&draft.aliases)?),
            tags: Set(to_json(&draft.tags)?),
            image: draft.image.map_or(NotSet, |key| Set(Some(key))),
            created_by_id: NotSet,
            last_edited_by_id: Set(caller.id.into_inner()),
            created_at: NotSet,
            updated_at: Set(now.into()),
        };

        let model = match active_model.update(&txn).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => {
                tracing::debug!(content_id = %id, "No content row to update");
                txn.rollback().await.map_err(repo_err)?;
                return Ok(None);
            }
            Err(e) => return Err(repo_err(e)),
        };

        let record = Self::resolve_one(&txn, model).await?;
        txn.commit().await.map_err(repo_err)?;
        Ok(Some(record))
    }

    async fn find_by_id(&self, id: ContentId) -> Result<Option<ContentRecord>, ContentError> {
        let model = contents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        match model {
            Some(model) => Self::resolve_one(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        filter: &ContentFilter,
        page: PageRequest,
    ) -> Result<(Vec<ContentRecord>, u64), ContentError> {
        let condition = filter_condition(filter);

        let total = contents::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        if page.is_past_end(total) {
            return Ok((Vec::new(), total));
        }

        let models = contents::Entity::find()
            .filter(condition)
            .order_by_desc(contents::Column::CreatedAt)
            .order_by_desc(contents::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let records = Self::resolve(&self.db, models).await?;
        Ok((records, total))
    }
}

/// Build the WHERE clause: category AND (title OR description OR platform).
pub(crate) fn filter_condition(filter: &ContentFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(category) = filter.category() {
        condition = condition.add(contents::Column::Category.eq(to_db_category(category)));
    }

    if let Some(pattern) = filter.like_pattern() {
        let matches = |column: contents::Column| {
            Expr::expr(Func::lower(Expr::col((contents::Entity, column))))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE))
        };
        condition = condition.add(
            Condition::any()
                .add(matches(contents::Column::Title))
                .add(matches(contents::Column::Description))
                .add(matches(contents::Column::Platform)),
        );
    }

    condition
}

fn repo_err(e: DbErr) -> ContentError {
    ContentError::repository(e.to_string())
}

fn to_json(entries: &[Entry]) -> Result<serde_json::Value, ContentError> {
    serde_json::to_value(entries).map_err(|e| ContentError::repository(e.to_string()))
}

fn from_json(column: &str, value: serde_json::Value) -> Result<Vec<Entry>, ContentError> {
    serde_json::from_value(value)
        .map_err(|e| ContentError::repository(format!("malformed {column} column: {e}")))
}

fn identity(identities: &HashMap<Uuid, Identity>, id: Uuid) -> Identity {
    identities.get(&id).cloned().unwrap_or_else(|| Identity {
        id: UserId::from_uuid(id),
        name: None,
        image: None,
    })
}

/// Convert database row to domain record.
fn to_domain(
    model: contents::Model,
    identities: &HashMap<Uuid, Identity>,
) -> Result<ContentRecord, ContentError> {
    Ok(ContentRecord {
        id: ContentId::from_uuid(model.id),
        title: model.title,
        category: from_db_category(model.category),
        year: model.year,
        platform: model.platform,
        description: model.description,
        artists: from_json("artists", model.artists)?,
        aliases: from_json("aliases", model.aliases)?,
        tags: from_json("tags", model.tags)?,
        image: model.image,
        image_url: None,
        created_by: identity(identities, model.created_by_id),
        last_edited_by: identity(identities, model.last_edited_by_id),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

/// Convert domain category to database enum.
pub(crate) const fn to_db_category(category: ContentCategory) -> DbContentCategory {
    match category {
        ContentCategory::Novel => DbContentCategory::Novel,
        ContentCategory::Webtoon => DbContentCategory::Webtoon,
        ContentCategory::Comic => DbContentCategory::Comic,
        ContentCategory::Anime => DbContentCategory::Anime,
        ContentCategory::Drama => DbContentCategory::Drama,
        ContentCategory::Movie => DbContentCategory::Movie,
        ContentCategory::Music => DbContentCategory::Music,
        ContentCategory::Book => DbContentCategory::Book,
        ContentCategory::Game => DbContentCategory::Game,
        ContentCategory::Other => DbContentCategory::Other,
    }
}

/// Convert database enum to domain category.
pub(crate) const fn from_db_category(category: DbContentCategory) -> ContentCategory {
    match category {
        DbContentCategory::Novel => ContentCategory::Novel,
        DbContentCategory::Webtoon => ContentCategory::Webtoon,
        DbContentCategory::Comic => ContentCategory::Comic,
        DbContentCategory::Anime => ContentCategory::Anime,
        DbContentCategory::Drama => ContentCategory::Drama,
        DbContentCategory::Movie => ContentCategory::Movie,
        DbContentCategory::Music => ContentCategory::Music,
        DbContentCategory::Book => ContentCategory::Book,
        DbContentCategory::Game => ContentCategory::Game,
        DbContentCategory::Other => ContentCategory::Other,
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
