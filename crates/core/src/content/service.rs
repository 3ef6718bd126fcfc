//! Content service implementation.

use std::future::Future;
use std::sync::Arc;

use mediashelf_shared::Caller;
use mediashelf_shared::types::{ContentId, PageMeta, PageRequest};

use super::error::ContentError;
use super::filter::{ContentFilter, ContentListQuery};
use super::types::{ContentDraft, ContentInput, ContentPage, ContentRecord, UpdateContentInput};
use crate::storage::{StorageService, validate_upload_key};

/// Repository trait for content persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ContentRepository: Send + Sync {
    /// Insert a new record created by `caller`.
    fn insert(
        &self,
        id: ContentId,
        draft: ContentDraft,
        caller: &Caller,
    ) -> impl Future<Output = Result<ContentRecord, ContentError>> + Send;

    /// Replace the fields of an existing record, stamping `caller` as last editor.
    ///
    /// Returns `None` when no record has that id; nothing is written in that case.
    fn update(
        &self,
        id: ContentId,
        draft: ContentDraft,
        caller: &Caller,
    ) -> impl Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;

    /// Find record by ID.
    fn find_by_id(
        &self,
        id: ContentId,
    ) -> impl Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;

    /// One page of records matching `filter`, newest first, and the total match count.
    fn list(
        &self,
        filter: &ContentFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<(Vec<ContentRecord>, u64), ContentError>> + Send;
}

/// Content service for browsing and editing the catalogue.
pub struct ContentService<R: ContentRepository> {
    repo: Arc<R>,
    storage: Option<Arc<StorageService>>,
    verify_image_keys: bool,
}

impl<R: ContentRepository> ContentService<R> {
    /// Create a content service without object storage.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            storage: None,
            verify_image_keys: false,
        }
    }

    /// Attach object storage; when `verify_image_keys` is set, image keys must exist in the bucket.
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<StorageService>, verify_image_keys: bool) -> Self {
        self.storage = Some(storage);
        self.verify_image_keys = verify_image_keys;
        self
    }

    /// Create a record owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Title is blank or category unknown
    /// - A list entry has no value
    /// - The image key is malformed or was never uploaded
    /// - Repository operation fails
    pub async fn create(
        &self,
        caller: &Caller,
        input: ContentInput,
    ) -> Result<ContentRecord, ContentError> {
        let draft = ContentDraft::try_from(input)?;
        self.check_image(draft.image.as_deref()).await?;

        let id = ContentId::new();
        let record = self.repo.insert(id, draft, caller).await?;

        tracing::info!(
            content_id = %record.id,
            user_id = %caller.id,
            category = %record.category,
            "Content created"
        );

        Ok(self.with_image_url(record))
    }

    /// Replace the fields of an existing record and stamp `caller` as last editor.
    ///
    /// An omitted image keeps the current one.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no record has the id, including ids
    /// that are not valid identifiers. Otherwise fails like [`Self::create`].
    pub async fn update(
        &self,
        caller: &Caller,
        input: UpdateContentInput,
    ) -> Result<ContentRecord, ContentError> {
        let id = parse_id(&input.id)?;
        let draft = ContentDraft::try_from(input.content)?;
        self.check_image(draft.image.as_deref()).await?;

        let record = self
            .repo
            .update(id, draft, caller)
            .await?
            .ok_or_else(|| ContentError::not_found(id.to_string()))?;

        tracing::info!(
            content_id = %record.id,
            user_id = %caller.id,
            "Content updated"
        );

        Ok(self.with_image_url(record))
    }

    /// Get record by ID.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if the record does not exist.
    pub async fn get_by_id(&self, id: &str) -> Result<ContentRecord, ContentError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(|record| self.with_image_url(record))
            .ok_or_else(|| ContentError::not_found(id.to_string()))
    }

    /// One page of records matching the query.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Validation` for bad paging or category, or a repository error.
    pub async fn list(&self, query: ContentListQuery) -> Result<ContentPage, ContentError> {
        let (filter, page) = query.into_parts()?;

        tracing::debug!(
            category = ?filter.category(),
            search = ?filter.search(),
            page = page.page,
            limit = page.limit,
            "Listing content"
        );

        let (records, total) = self.repo.list(&filter, page).await?;

        Ok(ContentPage {
            contents: records
                .into_iter()
                .map(|record| self.with_image_url(record))
                .collect(),
            pagination: PageMeta::new(page, total),
        })
    }

    /// Public URL for a storage key, when storage has a public base.
    #[must_use]
    pub fn image_url(&self, key: &str) -> Option<String> {
        self.storage.as_ref().and_then(|s| s.public_url(key))
    }

    fn with_image_url(&self, mut record: ContentRecord) -> ContentRecord {
        record.image_url = record.image.as_deref().and_then(|key| self.image_url(key));
        record
    }

    async fn check_image(&self, key: Option<&str>) -> Result<(), ContentError> {
        let Some(key) = key else {
            return Ok(());
        };

        validate_upload_key(key).map_err(|e| ContentError::validation(e.to_string()))?;

        let Some(storage) = self.storage.as_ref().filter(|_| self.verify_image_keys) else {
            return Ok(());
        };

        if storage.exists(key).await? {
            Ok(())
        } else {
            Err(ContentError::validation("image has not been uploaded"))
        }
    }
}

fn parse_id(id: &str) -> Result<ContentId, ContentError> {
    id.trim()
        .parse::<ContentId>()
        .map_err(|_| ContentError::not_found(id))
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
