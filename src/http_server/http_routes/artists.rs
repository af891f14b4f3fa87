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
use crate::entities;
use crate::http_server::{
    error::PageError,
    flash,
    forms::{ArtistForm, SearchForm},
    state::AppState,
    templates,
};
use crate::services::artist::{ArtistInput, ArtistService};
use crate::services::error::{ListingError, ListingResult};

type Page = Result<(CookieJar, Html<String>), PageError>;

pub async fn list(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Page {
    let artists = ArtistService::new(&app_state.db.conn)
        .list(Utc::now())
        .await?;

    let (jar, messages) = flash::take(jar);
    Ok((jar, Html(templates::artists::list(&artists, &messages))))
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
    let results = ArtistService::new(&app_state.db.conn)
        .search(&form.search_term, Utc::now())
        .await?;

    let (jar, messages) = flash::take(jar);
    Ok((
        jar,
        Html(templates::artists::search(
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
    let artist_id = path_id(path)?;
    let detail = ArtistService::new(&app_state.db.conn)
        .detail(artist_id, Utc::now())
        .await?;

    let (jar, messages) = flash::take(jar);
    Ok((jar, Html(templates::artists::detail(&detail, &messages))))
}

pub async fn create_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, messages) = flash::take(jar);
    (
        jar,
        Html(templates::artists::form(
            None,
            &ArtistInput::default(),
            &messages,
        )),
    )
}

pub async fn create_submission(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> (CookieJar, Html<String>) {
    let name = form.name.clone();
    let (jar, mut messages) = flash::take(jar);

    match create_artist(&app_state, form).await {
        Ok(artist) => messages.push(format!("Artist {} was successfully listed!", artist.name)),
        Err(err) => {
            log::error!("Failed to create artist '{}': {}", name, err);
            messages.push(format!(
                "An error occurred. Artist {} could not be listed.",
                name
            ));
        }
    }

    (jar, Html(templates::home(&messages)))
}

async fn create_artist(
    app_state: &AppState,
    form: ArtistForm,
) -> ListingResult<entities::artist::Model> {
    let input = form.into_input()?;
    app_state
        .db
        .transaction(move |txn| {
            Box::pin(async move { ArtistService::new(txn).create(input).await })
        })
        .await
}

pub async fn edit_form(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
) -> Page {
    let artist_id = path_id(path)?;
    let artist = ArtistService::new(&app_state.db.conn).get(artist_id).await?;

    let (jar, messages) = flash::take(jar);
    Ok((
        jar,
        Html(templates::artists::form(
            Some(artist.id),
            &ArtistInput::from(&artist),
            &messages,
        )),
    ))
}

pub async fn edit_submission(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    let artist_id = path_id(path)?;
    let name = form.name.clone();

    let result = async {
        let input = form.into_input()?;
        app_state
            .db
            .transaction(move |txn| {
                Box::pin(async move { ArtistService::new(txn).update(artist_id, input).await })
            })
            .await
    }
    .await;

    let jar = match result {
        Ok(artist) => flash::push(
            jar,
            format!("Artist {} was successfully updated!", artist.name),
        ),
        Err(err) => {
            log::error!("Failed to update artist {} ('{}'): {}", artist_id, name, err);
            flash::push(
                jar,
                format!("An error occurred. Artist {} could not be updated.", name),
            )
        }
    };

    Ok((jar, Redirect::to(&format!("/artists/{artist_id}"))))
}

pub async fn delete(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let result = match path {
        Ok(Path(artist_id)) => {
            app_state
                .db
                .transaction(move |txn| {
                    Box::pin(async move { ArtistService::new(txn).delete(artist_id).await })
                })
                .await
        }
        Err(rejection) => Err(ListingError::Validation(rejection.body_text())),
    };

    let jar = match result {
        Ok(artist) => flash::push(
            jar,
            format!("Artist {} was successfully deleted!", artist.name),
        ),
        Err(err) => {
            log::error!("Failed to delete artist: {}", err);
            flash::push(jar, "Artist couldn't be deleted.")
        }
    };

    (jar, Json(json!({})))
}
