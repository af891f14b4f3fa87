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

/// Field values accepted when creating or editing a venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: entities::venue::Model,
    pub past_shows: Vec<ShowCounterpart>,
    pub upcoming_shows: Vec<ShowCounterpart>,
}

/// Group venues by the (city, state) pairs present in `venues`.
///
/// Input order is kept inside each group and groups appear in order of first occurrence.
pub fn group_by_location(
    venues: impl IntoIterator<Item = (entities::venue::Model, usize)>,
) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();

    for (venue, num_upcoming_shows) in venues {
        let summary = ListingSummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        };

        match groups
            .iter_mut()
            .find(|g| g.city == venue.city && g.state == venue.state)
        {
            Some(group) => group.venues.push(summary),
            None => groups.push(LocationGroup {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }

    groups
}

pub struct VenueService<'a, C> {
    conn: &'a C,
}

impl<'a, C> VenueService<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, venue_id: i64) -> ListingResult<entities::venue::Model> {
        entities::venue::Entity::find_by_id(venue_id)
            .one(self.conn)
            .await?
            .ok_or(ListingError::NotFound {
                entity: "Venue",
                id: venue_id,
            })
    }

    /// Every venue with its upcoming show count, grouped by location.
    pub async fn locations(&self, now: DateTime<Utc>) -> ListingResult<Vec<LocationGroup>> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::State)
            .order_by_asc(entities::venue::Column::City)
            .order_by_asc(entities::venue::Column::Name)
            .order_by_asc(entities::venue::Column::Id)
            .find_with_related(entities::show::Entity)
            .all(self.conn)
            .await?;

        Ok(group_by_location(venues.into_iter().map(|(venue, shows)| {
            let upcoming = schedule::count_upcoming(shows.iter().map(|s| &s.start_time), now);
            (venue, upcoming)
        })))
    }

    pub async fn search(&self, search_term: &str, now: DateTime<Utc>) -> ListingResult<SearchResults> {
        let venues = entities::venue::Entity::find()
            .filter(name_contains(entities::venue::Column::Name, search_term))
            .order_by_asc(entities::venue::Column::Name)
            .order_by_asc(entities::venue::Column::Id)
            .find_with_related(entities::show::Entity)
            .all(self.conn)
            .await?;

        let data = venues
            .into_iter()
            .filter(|(venue, _)| name_matches(&venue.name, search_term))
            .map(|(venue, shows)| ListingSummary {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows: schedule::count_upcoming(
                    shows.iter().map(|s| &s.start_time),
                    now,
                ),
            })
            .collect();

        Ok(SearchResults::new(data))
    }

    pub async fn detail(&self, venue_id: i64, now: DateTime<Utc>) -> ListingResult<VenueDetail> {
        let venue = self.get(venue_id).await?;

        let shows = venue
            .find_related(entities::show::Entity)
            .order_by_asc(entities::show::Column::StartTime)
            .find_also_related(entities::artist::Entity)
            .all(self.conn)
            .await?;

        let appearances = shows.into_iter().filter_map(|(show, artist)| {
            artist.map(|artist| ShowCounterpart {
                id: artist.id,
                name: artist.name,
                image_link: artist.image_link,
                start_time: show.start_time,
            })
        });
        let split = schedule::partition_by_start(appearances, now, |a| a.start_time);

        Ok(VenueDetail {
            venue,
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        })
    }

    pub async fn options(&self) -> ListingResult<Vec<NamedOption>> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::Name)
            .all(self.conn)
            .await?;

        Ok(venues
            .into_iter()
            .map(|v| NamedOption {
                id: v.id,
                name: v.name,
            })
            .collect())
    }

    pub async fn create(&self, input: VenueInput) -> ListingResult<entities::venue::Model> {
        let venue = entities::venue::ActiveModel {
            name: Set(input.name),
            city: Set(input.city),
            state: Set(input.state),
            address: Set(input.address),
            phone: Set(input.phone),
            image_link: Set(input.image_link),
            facebook_link: Set(input.facebook_link),
            genres: Set(Genres(input.genres)),
            website: Set(input.website),
            seeking_talent: Set(input.seeking_talent),
            seeking_description: Set(input.seeking_description),
            ..Default::default()
        };

        let model = venue.insert(self.conn).await?;
        log::info!("Venue created: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    pub async fn update(
        &self,
        venue_id: i64,
        input: VenueInput,
    ) -> ListingResult<entities::venue::Model> {
        let mut venue: entities::venue::ActiveModel = self.get(venue_id).await?.into();
        venue.name = Set(input.name);
        venue.city = Set(input.city);
        venue.state = Set(input.state);
        venue.address = Set(input.address);
        venue.phone = Set(input.phone);
        venue.image_link = Set(input.image_link);
        venue.facebook_link = Set(input.facebook_link);
        venue.genres = Set(Genres(input.genres));
        venue.website = Set(input.website);
        venue.seeking_talent = Set(input.seeking_talent);
        venue.seeking_description = Set(input.seeking_description);

        let model = venue.update(self.conn).await?;
        log::info!("Venue updated: '{}' (ID: {})", model.name, model.id);
        Ok(model)
    }

    /// Delete a venue together with its shows. Returns the removed venue.
    pub async fn delete(&self, venue_id: i64) -> ListingResult<entities::venue::Model> {
        let venue = self.get(venue_id).await?;

        let removed_shows = entities::show::Entity::delete_many()
            .filter(entities::show::Column::VenueId.eq(venue_id))
            .exec(self.conn)
            .await?;

        venue.clone().delete(self.conn).await?;
        log::info!(
            "Venue deleted: '{}' (ID: {}, {} shows removed)",
            venue.name,
            venue.id,
            removed_shows.rows_affected
        );
        Ok(venue)
    }
}
