//! User repository for database operations.
//!
//! Users are mirrored from the identity provider: every mutating call upserts
//! the caller so content references always resolve.

use chrono::{DateTime, Utc};
use mediashelf_core::content::Identity;
use mediashelf_shared::Caller;
use mediashelf_shared::types::UserId;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::users;

/// User repository for identity lookups and upserts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Inserts or refreshes the caller's row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, caller: &Caller) -> Result<(), DbErr> {
        upsert_caller(&self.db, caller, Utc::now()).await
    }
}

/// Insert the caller, or refresh its profile fields if the id exists.
pub(crate) async fn upsert_caller<C: ConnectionTrait>(
    conn: &C,
    caller: &Caller,
    now: DateTime<Utc>,
) -> Result<(), DbErr> {
    let user = users::ActiveModel {
        id: Set(caller.id.into_inner()),
        name: Set(caller.name.clone()),
        email: Set(caller.email.clone()),
        image: Set(caller.image.clone()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    users::Entity::insert(user)
        .on_conflict(
            OnConflict::column(users::Column::Id)
                .update_columns([
                    users::Column::Name,
                    users::Column::Email,
                    users::Column::Image,
                    users::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// Load the identities for `ids`; unknown ids are absent from the result.
pub(crate) async fn load_identities<C: ConnectionTrait>(
    conn: &C,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<Vec<Identity>, DbErr> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let models = users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(models.into_iter().map(to_identity).collect())
}

fn to_identity(model: users::Model) -> Identity {
    Identity {
        id: UserId::from_uuid(model.id),
        name: model.name,
        image: model.image,
    }
}
