//! Database seeder for Mediashelf development and testing.
//!
//! Seeds a demo user and a handful of catalogue entries across categories.
//! Does nothing if the catalogue already has records.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use mediashelf_core::content::{ContentInput, ContentListQuery, ContentService, EntryInput};
use mediashelf_db::ContentRepository;
use mediashelf_shared::Caller;
use mediashelf_shared::types::UserId;
use uuid::Uuid;

/// Demo user ID (consistent across runs)
const DEMO_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0002);

struct Seed {
    title: &'static str,
    category: &'static str,
    year: &'static str,
    platform: &'static str,
    description: &'static str,
    artists: &'static [&'static str],
    aliases: &'static [&'static str],
    tags: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        title: "Dune",
        category: "NOVEL",
        year: "1965",
        platform: "Chilton Books",
        description: "Desert planet politics and a messiah nobody asked for.",
        artists: &["Frank Herbert"],
        aliases: &[],
        tags: &["sci-fi", "classic"],
    },
    Seed {
        title: "Tower of God",
        category: "WEBTOON",
        year: "2010",
        platform: "Naver Webtoon",
        description: "A boy climbs a tower to find the girl who left him.",
        artists: &["SIU"],
        aliases: &["Sinui Tap"],
        tags: &["fantasy", "action"],
    },
    Seed {
        title: "Spirited Away",
        category: "ANIME",
        year: "2001",
        platform: "Studio Ghibli",
        description: "A girl works in a bathhouse for spirits to save her parents.",
        artists: &["Hayao Miyazaki"],
        aliases: &["Sen to Chihiro no Kamikakushi"],
        tags: &["fantasy"],
    },
    Seed {
        title: "Kind of Blue",
        category: "MUSIC",
        year: "1959",
        platform: "Columbia",
        description: "Modal jazz recorded in two sessions.",
        artists: &["Miles Davis", "John Coltrane", "Bill Evans"],
        aliases: &[],
        tags: &["jazz"],
    },
    Seed {
        title: "Outer Wilds",
        category: "GAME",
        year: "2019",
        platform: "PC",
        description: "A solar system stuck in a twenty-two minute loop.",
        artists: &["Mobius Digital"],
        aliases: &[],
        tags: &["exploration", "mystery"],
    },
];

fn entries(values: &[&str]) -> Option<Vec<EntryInput>> {
    Some(values.iter().copied().map(EntryInput::from).collect())
}

impl Seed {
    fn to_input(&self) -> ContentInput {
        ContentInput {
            title: self.title.to_string(),
            category: self.category.to_string(),
            year: Some(self.year.to_string()),
            platform: Some(self.platform.to_string()),
            description: Some(self.description.to_string()),
            artists: entries(self.artists),
            aliases: entries(self.aliases),
            tags: entries(self.tags),
            image: None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = mediashelf_db::connect(&database_url)
        .await
        .context("failed to connect to database")?;

    let service = ContentService::new(Arc::new(ContentRepository::new(db)));

    let existing = service.list(ContentListQuery::default()).await?;
    if existing.pagination.total > 0 {
        println!(
            "  Catalogue already has {} records, skipping...",
            existing.pagination.total
        );
        return Ok(());
    }

    let caller = Caller {
        id: UserId::from_uuid(DEMO_USER_ID),
        name: Some("Demo User".to_string()),
        email: Some("demo@mediashelf.dev".to_string()),
        image: None,
    };

    println!("Seeding catalogue...");
    for seed in SEEDS {
        let record = service.create(&caller, seed.to_input()).await?;
        println!("  Created {} ({})", record.title, record.category);
    }

    println!("Seeding complete!");
    Ok(())
}
