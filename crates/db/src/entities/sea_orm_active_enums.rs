//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "content_category")]
pub enum ContentCategory {
    #[sea_orm(string_value = "novel")]
    Novel,
    #[sea_orm(string_value = "webtoon")]
    Webtoon,
    #[sea_orm(string_value = "comic")]
    Comic,
    #[sea_orm(string_value = "anime")]
    Anime,
    #[sea_orm(string_value = "drama")]
    Drama,
    #[sea_orm(string_value = "movie")]
    Movie,
    #[sea_orm(string_value = "music")]
    Music,
    #[sea_orm(string_value = "book")]
    Book,
    #[sea_orm(string_value = "game")]
    Game,
    #[sea_orm(string_value = "other")]
    Other,
}
