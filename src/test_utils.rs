use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database as SeaDatabase, Set};

use crate::database::Database;
use crate::entities::{self, genres::Genres};

pub async fn test_db() -> Arc<Database> {
    // A single connection keeps every query on the same in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = SeaDatabase::connect(opt).await.unwrap();

    conn.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .unwrap();

    migration::Migrator::up(&conn, None)
        .await
        .unwrap_or_else(|e| panic!("Failed to run migrations: {}", e));

    Arc::new(Database { conn })
}

pub async fn insert_venue(db: &Database, name: &str, city: &str, state: &str) -> entities::venue::Model {
    let venue = entities::venue::ActiveModel {
        name: Set(name.into()),
        city: Set(city.into()),
        state: Set(state.into()),
        address: Set("1015 Folsom Street".into()),
        phone: Set("123-123-1234".into()),
        image_link: Set(String::new()),
        facebook_link: Set(String::new()),
        genres: Set(Genres(vec!["Jazz".into(), "Folk".into()])),
        website: Set(String::new()),
        seeking_talent: Set(false),
        seeking_description: Set(String::new()),
        ..Default::default()
    };
    venue.insert(&db.conn).await.unwrap()
}

pub async fn insert_artist(db: &Database, name: &str) -> entities::artist::Model {
    let artist = entities::artist::ActiveModel {
        name: Set(name.into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        phone: Set("326-123-5000".into()),
        genres: Set(Genres(vec!["Rock n Roll".into()])),
        image_link: Set(format!("https://images.example.com/{}.jpg", name)),
        facebook_link: Set(String::new()),
        website: Set(String::new()),
        seeking_venue: Set(false),
        seeking_description: Set(String::new()),
        ..Default::default()
    };
    artist.insert(&db.conn).await.unwrap()
}

pub async fn insert_show(
    db: &Database,
    venue_id: i64,
    artist_id: i64,
    start_time: DateTime<Utc>,
) -> entities::show::Model {
    let show = entities::show::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
        ..Default::default()
    };
    show.insert(&db.conn).await.unwrap()
}

/// Whole-second timestamp `days` away from now.
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    let time = Utc::now() + Duration::days(days);
    time.with_nanosecond(0).unwrap_or(time)
}
