use std::sync::Arc;

use axum::{extract::State, response::Html};
use axum_extra::extract::{Form, cookie::CookieJar};

use crate::http_server::{error::PageError, flash, forms::ShowForm, state::AppState, templates};
use crate::services::artist::ArtistService;
use crate::services::error::ListingResult;
use crate::services::show::ShowService;
use crate::services::venue::VenueService;

type Page = Result<(CookieJar, Html<String>), PageError>;

pub async fn list(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Page {
    let shows = ShowService::new(&app_state.db.conn).list().await?;

    let (jar, messages) = flash::take(jar);
    Ok((jar, Html(templates::shows::list(&shows, &messages))))
}

pub async fn create_form(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Page {
    let artists = ArtistService::new(&app_state.db.conn).options().await?;
    let venues = VenueService::new(&app_state.db.conn).options().await?;

    let (jar, messages) = flash::take(jar);
    Ok((
        jar,
        Html(templates::shows::form(&artists, &venues, &messages)),
    ))
}

pub async fn create_submission(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> (CookieJar, Html<String>) {
    let (jar, mut messages) = flash::take(jar);

    match create_show(&app_state, form).await {
        Ok(_) => messages.push("Show was successfully listed!".to_string()),
        Err(err) => {
            log::error!("Failed to create show: {}", err);
            messages.push("An error occurred. Show could not be listed.".to_string());
        }
    }

    (jar, Html(templates::home(&messages)))
}

async fn create_show(app_state: &AppState, form: ShowForm) -> ListingResult<()> {
    let input = form.into_input()?;
    app_state
        .db
        .transaction(move |txn| {
            Box::pin(async move {
                ShowService::new(txn).create(input).await?;
                Ok(())
            })
        })
        .await
}
