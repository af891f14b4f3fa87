use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities;
use crate::services::error::{ListingError, ListingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// One row of the shows listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

pub struct ShowService<'a, C> {
    conn: &'a C,
}

impl<'a, C> ShowService<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// All shows ordered by start time.
    pub async fn list(&self) -> ListingResult<Vec<ShowListing>> {
        let shows = entities::show::Entity::find()
            .order_by_asc(entities::show::Column::StartTime)
            .order_by_asc(entities::show::Column::Id)
            .find_also_related(entities::venue::Entity)
            .all(self.conn)
            .await?;

        let artist_ids: Vec<i64> = shows.iter().map(|(show, _)| show.artist_id).collect();
        let artists: HashMap<i64, entities::artist::Model> = entities::artist::Entity::find()
            .filter(entities::artist::Column::Id.is_in(artist_ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(shows
            .into_iter()
            .filter_map(|(show, venue)| {
                let venue = venue?;
                let artist = artists.get(&show.artist_id)?;
                Some(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name,
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect())
    }

    /// Schedule a show. Both sides must already exist.
    pub async fn create(&self, input: ShowInput) -> ListingResult<entities::show::Model> {
        let venue_exists = entities::venue::Entity::find_by_id(input.venue_id)
            .one(self.conn)
            .await?
            .is_some();
        if !venue_exists {
            return Err(ListingError::ConstraintViolation(format!(
                "venue {} does not exist",
                input.venue_id
            )));
        }

        let artist_exists = entities::artist::Entity::find_by_id(input.artist_id)
            .one(self.conn)
            .await?
            .is_some();
        if !artist_exists {
            return Err(ListingError::ConstraintViolation(format!(
                "artist {} does not exist",
                input.artist_id
            )));
        }

        let show = entities::show::ActiveModel {
            venue_id: Set(input.venue_id),
            artist_id: Set(input.artist_id),
            start_time: Set(input.start_time),
            ..Default::default()
        };

        let model = show.insert(self.conn).await?;
        log::info!(
            "Show created: artist {} at venue {} on {} (ID: {})",
            model.artist_id,
            model.venue_id,
            model.start_time,
            model.id
        );
        Ok(model)
    }
}
