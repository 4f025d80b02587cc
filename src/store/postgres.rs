use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::sql_types::{Integer, Text};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

use super::{NoteStore, StoreError, LATEST_LIMIT};
use crate::{config::Config, models::note::Note, schema::notes::dsl::*};

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

// Both timestamps come from a single server-side now().
const INSERT_NOTE: &str = "INSERT INTO notes (title, content, created, expires) \
     VALUES ($1, $2, now(), now() + $3::integer * interval '1 day') \
     RETURNING id";

#[derive(QueryableByName)]
struct InsertedNote {
    #[diesel(sql_type = Integer, column_name = id)]
    note_id: i32,
}

/// Applies the store deadline to every statement run on a pooled connection.
#[derive(Debug)]
struct StatementTimeout(Duration);

impl r2d2::CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("SET statement_timeout = {}", self.0.as_millis()))
            .execute(connection)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(config: &Config) -> Result<Pool, r2d2::Error> {
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(config.store_timeout)
        .connection_customizer(Box::new(StatementTimeout(config.store_timeout)))
        .build(manager)
}

pub fn run_migrations(pool: &Pool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut connection = pool.get()?;
    let applied = connection.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("applied migration {}", version);
    }
    Ok(())
}

pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    pub fn new(pool: Pool) -> Self {
        PgNoteStore { pool }
    }
}

impl NoteStore for PgNoteStore {
    fn insert(&self, new_title: &str, new_content: &str, ttl_days: &str) -> Result<i32, StoreError> {
        let mut connection = self.pool.get()?;

        let inserted = diesel::sql_query(INSERT_NOTE)
            .bind::<Text, _>(new_title)
            .bind::<Text, _>(new_content)
            .bind::<Text, _>(ttl_days)
            .get_result::<InsertedNote>(&mut connection)?;
        log::debug!("inserted note {}", inserted.note_id);

        Ok(inserted.note_id)
    }

    fn get(&self, note_id: i32) -> Result<Option<Note>, StoreError> {
        let mut connection = self.pool.get()?;

        let note = notes
            .find(note_id)
            .filter(expires.gt(now))
            .first::<Note>(&mut connection)
            .optional()?;

        Ok(note)
    }

    fn latest(&self) -> Result<Vec<Note>, StoreError> {
        let mut connection = self.pool.get()?;

        let rows = notes
            .filter(expires.gt(now))
            .order(created.desc())
            .then_order_by(id.desc())
            .limit(LATEST_LIMIT)
            .load::<Note>(&mut connection)?;

        Ok(rows)
    }
}
