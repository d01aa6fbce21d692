//! SQLite persistence
//!
//! A single pool backs every repository; the schema is created with
//! idempotent DDL at startup. Repositories are cheap handles over the
//! pool, handed out by accessor methods on [`SqliteRepository`].

mod event_repository;
mod item_repository;
mod race_repository;
mod reference_repository;
mod seed;
mod spell_repository;
mod stat_block_repository;
mod user_repository;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use event_repository::EventRepository;
pub use item_repository::ItemRepository;
pub use race_repository::RaceRepository;
pub use reference_repository::ReferenceRepository;
pub use seed::seed_reference_data;
pub use spell_repository::SpellRepository;
pub use stat_block_repository::StatBlockRepository;
pub use user_repository::UserRepository;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS school_of_magic (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS damage_type (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS coin_type (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    abbreviation TEXT NOT NULL,
    value INTEGER NOT NULL,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ability (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    abbreviation TEXT NOT NULL UNIQUE,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skill (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    default_ability_id INTEGER NOT NULL REFERENCES ability(id),
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS class (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS spell (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    ritual INTEGER NOT NULL,
    level INTEGER NOT NULL,
    school_id INTEGER NOT NULL REFERENCES school_of_magic(id),
    casting_time INTEGER NOT NULL,
    "range" TEXT NOT NULL,
    material_components TEXT,
    description TEXT,
    higher_levels TEXT,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_spell_level ON spell(level);
CREATE INDEX IF NOT EXISTS idx_spell_school ON spell(school_id);

CREATE TABLE IF NOT EXISTS spell_component (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL,
    spell_id INTEGER NOT NULL REFERENCES spell(id) ON DELETE CASCADE,
    UNIQUE (type, spell_id)
);

CREATE TABLE IF NOT EXISTS class_spell_map (
    spell_id INTEGER NOT NULL REFERENCES spell(id) ON DELETE CASCADE,
    class_id INTEGER NOT NULL REFERENCES class(id) ON DELETE CASCADE,
    UNIQUE (spell_id, class_id)
);

CREATE TABLE IF NOT EXISTS damage_type_spell_map (
    damage_type_id INTEGER NOT NULL REFERENCES damage_type(id) ON DELETE CASCADE,
    spell_id INTEGER NOT NULL REFERENCES spell(id) ON DELETE CASCADE,
    UNIQUE (damage_type_id, spell_id)
);

CREATE TABLE IF NOT EXISTS race (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    speed INTEGER NOT NULL DEFAULT 30,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS race_ability_bonus (
    race_id INTEGER NOT NULL REFERENCES race(id) ON DELETE CASCADE,
    ability_id INTEGER NOT NULL REFERENCES ability(id),
    bonus INTEGER NOT NULL,
    UNIQUE (race_id, ability_id)
);

CREATE TABLE IF NOT EXISTS item (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    weight REAL NOT NULL DEFAULT 0,
    cost_amount INTEGER NOT NULL,
    coin_type_id INTEGER NOT NULL REFERENCES coin_type(id),
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stat_block (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    race_id INTEGER REFERENCES race(id),
    armor_bonuses TEXT NOT NULL DEFAULT '[]',
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stat_block_class (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stat_block_id INTEGER NOT NULL REFERENCES stat_block(id) ON DELETE CASCADE,
    class_id INTEGER NOT NULL REFERENCES class(id),
    level INTEGER NOT NULL,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL,
    UNIQUE (stat_block_id, class_id)
);

CREATE TABLE IF NOT EXISTS stat_block_ability (
    stat_block_id INTEGER NOT NULL REFERENCES stat_block(id) ON DELETE CASCADE,
    ability_id INTEGER NOT NULL REFERENCES ability(id),
    base_score INTEGER NOT NULL,
    other_bonuses TEXT NOT NULL DEFAULT '[]',
    UNIQUE (stat_block_id, ability_id)
);

CREATE TABLE IF NOT EXISTS stat_block_skill (
    stat_block_id INTEGER NOT NULL REFERENCES stat_block(id) ON DELETE CASCADE,
    skill_id INTEGER NOT NULL REFERENCES skill(id),
    proficiency TEXT NOT NULL,
    UNIQUE (stat_block_id, skill_id)
);

CREATE TABLE IF NOT EXISTS stat_block_save (
    stat_block_id INTEGER NOT NULL REFERENCES stat_block(id) ON DELETE CASCADE,
    ability_id INTEGER NOT NULL REFERENCES ability(id),
    UNIQUE (stat_block_id, ability_id)
);

CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email_address TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL DEFAULT 'member',
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS event (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    parent_event_id INTEGER REFERENCES event(id),
    start_date TEXT,
    end_date TEXT,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_event_parent ON event(parent_event_id);
"#;

/// Handle over the SQLite pool; hands out per-entity repositories
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open (creating if needed) the database file and apply the schema
    pub async fn connect(path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;
        tracing::info!("Connected to SQLite database: {}", path);

        let repository = Self { pool };
        repository.migrate().await?;
        Ok(repository)
    }

    /// In-memory database for tests. A single connection keeps every
    /// query on the same in-memory store.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        let repository = Self { pool };
        repository.migrate().await?;
        Ok(repository)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to apply database schema")?;
        tracing::debug!("Database schema applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn spells(&self) -> SpellRepository {
        SpellRepository::new(self.pool.clone())
    }

    pub fn stat_blocks(&self) -> StatBlockRepository {
        StatBlockRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn events(&self) -> EventRepository {
        EventRepository::new(self.pool.clone())
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    pub fn races(&self) -> RaceRepository {
        RaceRepository::new(self.pool.clone())
    }

    pub fn reference(&self) -> ReferenceRepository {
        ReferenceRepository::new(self.pool.clone())
    }
}

/// Map a sqlx error into an anyhow error, turning unique-constraint
/// violations into a recognizable "already exists" message the route
/// layer translates to 409.
pub(crate) fn map_insert_error(err: sqlx::Error, what: &str, name: &str) -> anyhow::Error {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return anyhow::anyhow!("{} already exists: {}", what, name);
        }
    }
    anyhow::Error::from(err)
}
