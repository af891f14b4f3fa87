use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
    response::{Html, Redirect},
};
use axum_extra::extract::{Form, cookie::CookieJar};
use chrono::Utc;
use serde_json::{Value, json};

use super::path_id;
use crate::http_server::{
    error::PageError,
    flash,
    forms::{SearchForm, VenueForm},
    state::AppState,
    templates,
};
use crate::services::error::{ListingError, ListingResult};
use crate::services::venue::{VenueInput, VenueService};

type Page = Result<(CookieJar, Html<String>), PageError>;

pub async fn list(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Page {
    let areas = VenueService::new(&app_state.db.conn)
        .locations(Utc::now())
        .await?;

    let (jar, messages) = flash::take(jar);
    Ok((jar, Html(templates::venues::list(&areas, &messages))))
}

pub async fn search_query(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(form): Query<SearchForm>,
) -> Page {
    search(&app_state, jar, form).await
}

pub async fn search_submission(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Page {
    search(&app_state, jar, form).await
}

async fn search(app_state: &AppState, jar: CookieJar, form: SearchForm) -> Page {
    let results = VenueService::new(&app_state.db.conn)
        .search(&form.search_term, Utc::now())
        .await?;

    let (jar, messages) = flash::take(jar);
    Ok((
        jar,
        Html(templates::venues::search(
            &form.search_term,
            &results,
            &messages,
        )),
    ))
}

pub async fn detail(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
) -> Page {
    let venue_id = path_id(path)?;
    let detail = VenueService::new(&app_state.db.conn)
        .detail(venue_id, Utc::now())
        .await?;

    let (jar, messages) = flash::take(jar);
    Ok((jar, Html(templates::venues::detail(&detail, &messages))))
}

pub async fn create_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, messages) = flash::take(jar);
    (
        jar,
        Html(templates::venues::form(None, &VenueInput::default(), &messages)),
    )
}

pub async fn create_submission(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> (CookieJar, Html<String>) {
    let name = form.name.clone();
    let (jar, mut messages) = flash::take(jar);

    match create_venue(&app_state, form).await {
        Ok(venue) => messages.push(format!("Venue {} was successfully listed!", venue.name)),
        Err(err) => {
            log::error!("Failed to create venue '{}': {}", name, err);
            messages.push(format!(
                "An error occurred. Venue {} could not be listed.",
                name
            ));
        }
    }

    (jar, Html(templates::home(&messages)))
}

async fn create_venue(
    app_state: &AppState,
    form: VenueForm,
) -> ListingResult<crate::entities::venue::Model> {
    let input = form.into_input()?;
    app_state
        .db
        .transaction(move |txn| Box::pin(async move { VenueService::new(txn).create(input).await }))
        .await
}

pub async fn edit_form(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
) -> Page {
    let venue_id = path_id(path)?;
    let venue = VenueService::new(&app_state.db.conn).get(venue_id).await?;

    let (jar, messages) = flash::take(jar);
    Ok((
        jar,
        Html(templates::venues::form(
            Some(venue.id),
            &VenueInput::from(&venue),
            &messages,
        )),
    ))
}

pub async fn edit_submission(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    let venue_id = path_id(path)?;
    let name = form.name.clone();

    let result = async {
        let input = form.into_input()?;
        app_state
            .db
            .transaction(move |txn| {
                Box::pin(async move { VenueService::new(txn).update(venue_id, input).await })
            })
            .await
    }
    .await;

    let jar = match result {
        Ok(venue) => flash::push(jar, format!("Venue {} was successfully updated!", venue.name)),
        Err(err) => {
            log::error!("Failed to update venue {} ('{}'): {}", venue_id, name, err);
            flash::push(
                jar,
                format!("An error occurred. Venue {} could not be updated.", name),
            )
        }
    };

    Ok((jar, Redirect::to(&format!("/venues/{venue_id}"))))
}

/// Responds with an empty object either way; the outcome travels as a flash message.
pub async fn delete(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let result = match path {
        Ok(Path(venue_id)) => {
            app_state
                .db
                .transaction(move |txn| {
                    Box::pin(async move { VenueService::new(txn).delete(venue_id).await })
                })
                .await
        }
        Err(rejection) => Err(ListingError::Validation(rejection.body_text())),
    };

    let jar = match result {
        Ok(venue) => flash::push(jar, format!("Venue {} was successfully deleted!", venue.name)),
        Err(err) => {
            log::error!("Failed to delete venue: {}", err);
            flash::push(jar, "Venue couldn't be deleted.")
        }
    };

    (jar, Json(json!({})))
}
