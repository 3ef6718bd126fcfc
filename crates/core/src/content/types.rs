//! Content types and data structures.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mediashelf_shared::types::{ContentId, PageMeta, UserId};
use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// Closed set of content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentCategory {
    /// Prose fiction.
    Novel,
    /// Vertical-scroll web comic.
    Webtoon,
    /// Print comic or manga.
    Comic,
    /// Animated series or film.
    Anime,
    /// Television drama.
    Drama,
    /// Feature film.
    Movie,
    /// Album, single, or soundtrack.
    Music,
    /// Non-fiction or general book.
    Book,
    /// Video or tabletop game.
    Game,
    /// Anything else.
    Other,
}

impl ContentCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::Novel,
        Self::Webtoon,
        Self::Comic,
        Self::Anime,
        Self::Drama,
        Self::Movie,
        Self::Music,
        Self::Book,
        Self::Game,
        Self::Other,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Novel => "NOVEL",
            Self::Webtoon => "WEBTOON",
            Self::Comic => "COMIC",
            Self::Anime => "ANIME",
            Self::Drama => "DRAMA",
            Self::Movie => "MOVIE",
            Self::Music => "MUSIC",
            Self::Book => "BOOK",
            Self::Game => "GAME",
            Self::Other => "OTHER",
        }
    }

    /// Parse from the wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentCategory {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ContentError::validation(format!("unknown category '{s}'")))
    }
}

/// One element of the `artists`, `aliases`, or `tags` lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry text.
    pub value: String,
}

impl Entry {
    /// Creates an entry.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// List entry as submitted; `value` may be missing or null.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryInput {
    /// Entry text.
    #[serde(default)]
    pub value: Option<String>,
}

impl From<&str> for EntryInput {
    fn from(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

/// Resolved reference to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
}

/// A catalogued content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Content ID.
    pub id: ContentId,
    /// Title.
    pub title: String,
    /// Category.
    pub category: ContentCategory,
    /// Release year, free text.
    pub year: Option<String>,
    /// Platform or publisher.
    pub platform: Option<String>,
    /// Description; empty when not supplied.
    pub description: String,
    /// Creator names.
    pub artists: Vec<Entry>,
    /// Alternative titles.
    pub aliases: Vec<Entry>,
    /// Tags.
    pub tags: Vec<Entry>,
    /// Storage key of the cover image.
    pub image: Option<String>,
    /// Public URL of the cover image, when a public base is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creating user.
    pub created_by: Identity,
    /// Last user to edit the record.
    pub last_edited_by: Identity,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Create payload as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Category, wire representation.
    #[serde(default)]
    pub category: String,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Platform or publisher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creator names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<EntryInput>>,
    /// Alternative titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<EntryInput>>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<EntryInput>>,
    /// Storage key of the cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Update payload: the record id plus a full create payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentInput {
    /// Content ID, as submitted.
    pub id: String,
    /// Replacement fields.
    #[serde(flatten)]
    pub content: ContentInput,
}

/// Validated, defaulted fields ready to persist.
///
/// `image == None` means "no image" on insert and "keep the current image" on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Category.
    pub category: ContentCategory,
    /// Release year.
    pub year: Option<String>,
    /// Platform or publisher.
    pub platform: Option<String>,
    /// Description.
    pub description: String,
    /// Creator names.
    pub artists: Vec<Entry>,
    /// Alternative titles.
    pub aliases: Vec<Entry>,
    /// Tags.
    pub tags: Vec<Entry>,
    /// Storage key of the cover image.
    pub image: Option<String>,
}

impl TryFrom<ContentInput> for ContentDraft {
    type Error = ContentError;

    fn try_from(input: ContentInput) -> Result<Self, Self::Error> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ContentError::validation("title is required"));
        }

        let category = input.category.parse::<ContentCategory>()?;

        Ok(Self {
            title: title.to_string(),
            category,
            year: non_blank(input.year),
            platform: non_blank(input.platform),
            description: input.description.unwrap_or_default(),
            artists: entries("artists", input.artists)?,
            aliases: entries("aliases", input.aliases)?,
            tags: entries("tags", input.tags)?,
            image: non_blank(input.image),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn entries(field: &str, input: Option<Vec<EntryInput>>) -> Result<Vec<Entry>, ContentError> {
    input
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .value
                .map(Entry::new)
                .ok_or_else(|| ContentError::validation(format!("{field}[{i}].value is required")))
        })
        .collect()
}

/// One page of content records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPage {
    /// Records on this page, newest first.
    pub contents: Vec<ContentRecord>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}
