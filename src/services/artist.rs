use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{self, genres::Genres};
use crate::services::error::{ListingError, ListingResult};
use crate::services::{
    ListingSummary, NamedOption, SearchResults, ShowCounterpart, name_contains, name_matches,
    schedule,
};

/// Field values accepted when creating or editing an artist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: entities::artist::Model,
    pub past_shows: Vec<ShowCounterpart>,
    pub upcoming_shows: Vec<ShowCounterpart>,
}

pub struct ArtistService<'a, C> {
    conn: &'a C,
}

impl<'a, C> ArtistService<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, artist_id: i64) -> ListingResult<entities::artist::Model> {
        entities::artist::Entity::find_by_id(artist_id)
            .one(self.conn)
            .await?
            .ok_or(ListingError::NotFound {
                entity: "Artist",
                id: artist_id,
            })
    }

    /// Every artist, ordered by name.
    pub async fn list(&self, now: DateTime<Utc>) -> ListingResult<Vec<ListingSummary>> {
        Ok(self.search("", now).await?.data)
    }

    pub async fn search(
        &self,
        search_term: &str,
        now: DateTime<Utc>,
    ) -> ListingResult<SearchResults> {
        let artists = entities::artist::Entity::find()
            .filter(name_contains(entities::artist::Column::Name, search_term))
            .order_by_asc(entities::artist::Column::Name)
            .order_by_asc(entities::artist::Column::Id)
            .find_with_related(entities::show::Entity)
            .all(self.conn)
            .await?;

        let data = artists
            .into_iter()
            .filter(|(artist, _)| name_matches(&artist.name, search_term))
            .map(|(artist, shows)| ListingSummary {
                id: artist.id,
                name: artist.name,
                num_upcoming_shows: schedule::count_upcoming(
                    shows.iter().map(|s| &s.start_time),
                    now,
                ),
            })
            .collect();

        Ok(SearchResults::new(data))
    }

    pub async fn detail(&self, artist_id: i64, now: DateTime<Utc>) -> ListingResult<ArtistDetail> {
        let artist = self.get(artist_id).await?;

        let shows = artist
            .find_related(entities::show::Entity)
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::venue::Entity)
            .all(self.conn)
            .await?;

        let appearances = shows.into_iter().filter_map(|(show, venue)| {
            venue.map(|venue| ShowCounterpart {
                id: venue.id,
                name: venue.name,
                image_link: venue.image_link,
                start_time: show.start_time,
            })
        });
        let split = schedule::partition_by_start(appearances, now, |a| a.start_time);

        Ok(ArtistDetail {
            artist,
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        })
    }

    pub async fn options(&self) -> ListingResult<Vec<NamedOption>> {
        let artists = entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Name)
            .all(self.conn)
            .await?;

        Ok(artists
            .into_iter()
            .map(|a| NamedOption {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    pub async fn create(&self, input: ArtistInput) -> ListingResult<entities::artist::Model> {
        let artist = entities::artist::ActiveModel {
            name: Set(input.name),
            city: Set(input.city),
            state: Set(input.state),
            phone: Set(input.phone),
            genres: Set(Genres(input.genres)),
            image_link: Set(input.image_link),
            facebook_link: Set(input.facebook_link),
            website: Set(input.website),
            seeking_venue: Set(input.seeking_venue),
            seeking_description: Set(input.seeking_description),
            ..Default::default()
        };

        let model = artist.insert(self.conn).await?;
        log::info!("Artist created: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    pub async fn update(
        &self,
        artist_id: i64,
        input: ArtistInput,
    ) -> ListingResult<entities::artist::Model> {
        let mut artist: entities::artist::ActiveModel = self.get(artist_id).await?.into();
        artist.name = Set(input.name);
        artist.city = Set(input.city);
        artist.state = Set(input.state);
        artist.phone = Set(input.phone);
        artist.genres = Set(Genres(input.genres));
        artist.image_link = Set(input.image_link);
        artist.facebook_link = Set(input.facebook_link);
        artist.website = Set(input.website);
        artist.seeking_venue = Set(input.seeking_venue);
        artist.seeking_description = Set(input.seeking_description);

        let model = artist.update(self.conn).await?;
        log::info!("Artist updated: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    /// Delete an artist together with its shows. Returns the removed artist.
    pub async fn delete(&self, artist_id: i64) -> ListingResult<entities::artist::Model> {
        let artist = self.get(artist_id).await?;

        let removed_shows = entities::show::Entity::delete_many()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .exec(self.conn)
            .await?;

        artist.clone().delete(self.conn).await?;
        log::info!(
            "Artist deleted: '{}' (ID: {}, {} shows removed)",
            artist.name,
            artist.id,
            removed_shows.rows_affected
        );
        Ok(artist)
    }
}
