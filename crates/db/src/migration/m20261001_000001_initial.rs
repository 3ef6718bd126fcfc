//! Initial database migration.
//!
//! Creates the category enum, users, contents, and the listing indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CONTENTS_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE content_category AS ENUM (
    'novel', 'webtoon', 'comic', 'anime', 'drama',
    'movie', 'music', 'book', 'game', 'other'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    name TEXT,
    email TEXT,
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CONTENTS_SQL: &str = r"
CREATE TABLE contents (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    category content_category NOT NULL,
    year TEXT,
    platform TEXT,
    description TEXT NOT NULL DEFAULT '',
    artists JSONB NOT NULL DEFAULT '[]'::jsonb,
    aliases JSONB NOT NULL DEFAULT '[]'::jsonb,
    tags JSONB NOT NULL DEFAULT '[]'::jsonb,
    image TEXT,
    created_by_id UUID NOT NULL REFERENCES users(id),
    last_edited_by_id UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_contents_title_not_blank CHECK (length(btrim(title)) > 0),
    CONSTRAINT chk_contents_artists_array CHECK (jsonb_typeof(artists) = 'array'),
    CONSTRAINT chk_contents_aliases_array CHECK (jsonb_typeof(aliases) = 'array'),
    CONSTRAINT chk_contents_tags_array CHECK (jsonb_typeof(tags) = 'array')
);

-- Listing order (newest first, id tie-break)
CREATE INDEX idx_contents_created ON contents(created_at DESC, id DESC);

-- Category filter
CREATE INDEX idx_contents_category ON contents(category, created_at DESC);

CREATE INDEX idx_contents_created_by ON contents(created_by_id);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_contents_updated_at
    BEFORE UPDATE ON contents
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS contents CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP FUNCTION IF EXISTS set_updated_at() CASCADE;
DROP TYPE IF EXISTS content_category;
";
