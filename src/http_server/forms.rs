//! Expected form fields, select choices and server-side validation.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidateUrl, ValidationError};

use crate::entities;
use crate::services::artist::ArtistInput;
use crate::services::error::{ListingError, ListingResult};
use crate::services::show::ShowInput;
use crate::services::venue::VenueInput;

pub const STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

pub const GENRES: [&str; 19] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

fn known_state(state: &str) -> Result<(), ValidationError> {
    if STATES.contains(&state) {
        Ok(())
    } else {
        Err(ValidationError::new("state").with_message(format!("unknown state '{state}'").into()))
    }
}

fn known_genres(genres: &[String]) -> Result<(), ValidationError> {
    match genres.iter().find(|g| !GENRES.contains(&g.as_str())) {
        None => Ok(()),
        Some(genre) => Err(ValidationError::new("genres")
            .with_message(format!("unknown genre '{genre}'").into())),
    }
}

fn optional_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || url.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(format!("'{url}' is not a URL").into()))
    }
}

/// HTML checkboxes are only submitted when ticked.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        value.as_deref(),
        Some("y" | "on" | "true" | "1")
    ))
}

fn invalid(err: validator::ValidationErrors) -> ListingError {
    ListingError::Validation(err.to_string())
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn clean_genres(genres: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        let genre = genre.trim().to_string();
        if !genre.is_empty() && !cleaned.contains(&genre) {
            cleaned.push(genre);
        }
    }
    cleaned
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "city is required"))]
    pub city: String,
    #[validate(custom(function = "known_state"))]
    pub state: String,
    #[validate(length(min = 1, max = 120, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 120, message = "phone is required"))]
    pub phone: String,
    #[validate(length(max = 500), custom(function = "optional_url"))]
    pub image_link: String,
    #[validate(length(max = 120), custom(function = "optional_url"))]
    pub facebook_link: String,
    #[validate(custom(function = "known_genres"))]
    pub genres: Vec<String>,
    #[validate(length(max = 120), custom(function = "optional_url"))]
    pub website: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    #[validate(length(max = 500))]
    pub seeking_description: String,
}

impl VenueForm {
    pub fn into_input(self) -> ListingResult<VenueInput> {
        let form = VenueForm {
            name: trimmed(self.name),
            city: trimmed(self.city),
            state: trimmed(self.state),
            address: trimmed(self.address),
            phone: trimmed(self.phone),
            image_link: trimmed(self.image_link),
            facebook_link: trimmed(self.facebook_link),
            genres: clean_genres(self.genres),
            website: trimmed(self.website),
            ..self
        };
        form.validate().map_err(invalid)?;

        Ok(VenueInput {
            name: form.name,
            city: form.city,
            state: form.state,
            address: form.address,
            phone: form.phone,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            genres: form.genres,
            website: form.website,
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description,
        })
    }
}

impl From<&entities::venue::Model> for VenueInput {
    fn from(venue: &entities::venue::Model) -> Self {
        VenueInput {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            genres: venue.genres.as_slice().to_vec(),
            website: venue.website.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ArtistForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "city is required"))]
    pub city: String,
    #[validate(custom(function = "known_state"))]
    pub state: String,
    #[validate(length(min = 1, max = 120, message = "phone is required"))]
    pub phone: String,
    #[validate(custom(function = "known_genres"))]
    pub genres: Vec<String>,
    #[validate(length(max = 500), custom(function = "optional_url"))]
    pub image_link: String,
    #[validate(length(max = 120), custom(function = "optional_url"))]
    pub facebook_link: String,
    #[validate(length(max = 120), custom(function = "optional_url"))]
    pub website: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    #[validate(length(max = 500))]
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn into_input(self) -> ListingResult<ArtistInput> {
        let form = ArtistForm {
            name: trimmed(self.name),
            city: trimmed(self.city),
            state: trimmed(self.state),
            phone: trimmed(self.phone),
            genres: clean_genres(self.genres),
            image_link: trimmed(self.image_link),
            facebook_link: trimmed(self.facebook_link),
            website: trimmed(self.website),
            ..self
        };
        form.validate().map_err(invalid)?;

        Ok(ArtistInput {
            name: form.name,
            city: form.city,
            state: form.state,
            phone: form.phone,
            genres: form.genres,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            website: form.website,
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description,
        })
    }
}

impl From<&entities::artist::Model> for ArtistInput {
    fn from(artist: &entities::artist::Model) -> Self {
        ArtistInput {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            genres: artist.genres.as_slice().to_vec(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ShowForm {
    #[validate(length(min = 1, message = "artist_id is required"))]
    pub artist_id: String,
    #[validate(length(min = 1, message = "venue_id is required"))]
    pub venue_id: String,
    #[validate(length(min = 1, message = "start_time is required"))]
    pub start_time: String,
}

impl ShowForm {
    pub fn into_input(self) -> ListingResult<ShowInput> {
        self.validate().map_err(invalid)?;

        let parse_id = |field: &str, value: &str| {
            value.trim().parse::<i64>().map_err(|_| {
                ListingError::Validation(format!("{field} must be a number, got '{value}'"))
            })
        };

        Ok(ShowInput {
            artist_id: parse_id("artist_id", &self.artist_id)?,
            venue_id: parse_id("venue_id", &self.venue_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Parse a submitted start time. Times without an offset are taken as UTC.
pub fn parse_start_time(value: &str) -> ListingResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }

    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ListingError::Validation(format!("'{value}' is not a valid start time")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "  The Musical Hop ".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
            genres: vec!["Jazz".into(), "Reggae".into(), "Jazz".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_venue_form_into_input() {
        let input = venue_form().into_input().unwrap();

        assert_eq!(input.name, "The Musical Hop");
        assert_eq!(input.genres, vec!["Jazz".to_string(), "Reggae".to_string()]);
        assert!(!input.seeking_talent);
    }

    #[test]
    fn test_venue_form_requires_name() {
        let form = VenueForm {
            name: String::new(),
            ..venue_form()
        };

        assert!(matches!(
            form.into_input(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let venue = VenueForm {
            name: "   ".into(),
            ..venue_form()
        };
        assert!(matches!(
            venue.into_input(),
            Err(ListingError::Validation(_))
        ));

        let artist = ArtistForm {
            name: " \t ".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            ..Default::default()
        };
        assert!(matches!(
            artist.into_input(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let form = VenueForm {
            state: "XX".into(),
            ..venue_form()
        };

        assert!(matches!(
            form.into_input(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_link_is_rejected() {
        let form = ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            website: "not a url".into(),
            ..Default::default()
        };

        assert!(matches!(
            form.into_input(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_genre_is_rejected() {
        let form = ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            genres: vec!["Polka".into()],
            ..Default::default()
        };

        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_show_form_parses_ids_and_time() {
        let form = ShowForm {
            artist_id: "4".into(),
            venue_id: " 1".into(),
            start_time: "2035-04-01 20:00:00".into(),
        };

        let input = form.into_input().unwrap();

        assert_eq!(input.artist_id, 4);
        assert_eq!(input.venue_id, 1);
        assert_eq!(
            input.start_time,
            Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_show_form_rejects_non_numeric_id() {
        let form = ShowForm {
            artist_id: "four".into(),
            venue_id: "1".into(),
            start_time: "2035-04-01 20:00".into(),
        };

        assert!(matches!(
            form.into_input(),
            Err(ListingError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();

        assert_eq!(parse_start_time("2035-04-01T20:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01 20:00").unwrap(), expected);
        assert_eq!(parse_start_time("2035-04-01T22:00:00+02:00").unwrap(), expected);
        assert!(parse_start_time("tomorrow").is_err());
    }

    #[test]
    fn test_checkbox_field() {
        let form: VenueForm =
            serde_json::from_str(r#"{"name": "Hop", "seeking_talent": "y"}"#).unwrap();
        assert!(form.seeking_talent);

        let form: VenueForm = serde_json::from_str(r#"{"name": "Hop"}"#).unwrap();
        assert!(!form.seeking_talent);
    }
}
