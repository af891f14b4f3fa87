use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{
    database::Database,
    http_server::{
        http_routes::{artists, home, shows, venues},
        state::AppState,
        templates,
    },
};

pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub database: Database,
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    log::error!("Request handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(templates::errors::server_error()),
    )
        .into_response()
}

pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/venues", get(venues::list))
        .route(
            "/venues/search",
            get(venues::search_query).post(venues::search_submission),
        )
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create_submission),
        )
        .route(
            "/venues/{venue_id}",
            get(venues::detail).delete(venues::delete),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(venues::edit_form).post(venues::edit_submission),
        )
        .route("/artists", get(artists::list))
        .route(
            "/artists/search",
            get(artists::search_query).post(artists::search_submission),
        )
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create_submission),
        )
        .route(
            "/artists/{artist_id}",
            get(artists::detail).delete(artists::delete),
        )
        .route(
            "/artists/{artist_id}/edit",
            get(artists::edit_form).post(artists::edit_submission),
        )
        .route("/shows", get(shows::list))
        .route(
            "/shows/create",
            get(shows::create_form).post(shows::create_submission),
        )
        .fallback(home::not_found)
        .layer(ServiceBuilder::new().layer(CatchPanicLayer::custom(handle_panic)))
        .with_state(app_state)
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: Arc::new(config.database),
    });
    let app = router(app_state);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| eyre!("Failed to bind to {}", address))?;
    log::info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities;
    use crate::test_utils::{days_from_now, insert_artist, insert_show, insert_venue, test_db};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use sea_orm::EntityTrait;
    use tower::ServiceExt;

    const FORM: &str = "application/x-www-form-urlencoded";

    async fn app() -> (Router, Arc<Database>) {
        let db = test_db().await;
        let app = router(Arc::new(AppState { db: db.clone() }));
        (app, db)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// `Cookie` header replaying the flash cookie set by `response`.
    fn flash_cookie(response: &Response) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with("_flashes="))
            .and_then(|value| value.split(';').next())
            .unwrap()
            .to_string()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_page() {
        let (app, _db) = app().await;

        let response = app.oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Post a venue"));
    }

    #[tokio::test]
    async fn test_unknown_route_renders_not_found_page() {
        let (app, _db) = app().await;

        let response = app.oneshot(get_request("/nowhere")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids_are_not_found() {
        let (app, _db) = app().await;

        for uri in ["/venues/999", "/venues/abc", "/artists/7", "/artists/7/edit"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_create_venue_then_view_it() {
        let (app, db) = app().await;

        let response = app
            .clone()
            .oneshot(form_request(
                "/venues/create",
                "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street\
                 &phone=123-123-1234&genres=Jazz&genres=Reggae&seeking_talent=y\
                 &seeking_description=Looking+for+local+acts",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("Venue The Musical Hop was successfully listed!")
        );

        let venues = entities::venue::Entity::find().all(&db.conn).await.unwrap();
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].genres.as_slice(), &["Jazz", "Reggae"]);
        assert!(venues[0].seeking_talent);

        let response = app
            .oneshot(get_request(&format!("/venues/{}", venues[0].id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("The Musical Hop"));
        assert!(body.contains("1015 Folsom Street"));
        assert!(body.contains("Looking for local acts"));
    }

    #[tokio::test]
    async fn test_invalid_venue_is_not_listed() {
        let (app, db) = app().await;

        let response = app
            .oneshot(form_request(
                "/venues/create",
                "name=Nowhere&city=Springfield&state=XX&address=1+Main&phone=555",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("An error occurred. Venue Nowhere could not be listed.")
        );
        let venues = entities::venue::Entity::find().all(&db.conn).await.unwrap();
        assert!(venues.is_empty());
    }

    #[tokio::test]
    async fn test_venue_search_counts_matches() {
        let (app, db) = app().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

        let response = app
            .oneshot(form_request("/venues/search", "search_term=Hop"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"Number of search results for "Hop": 1"#));
        assert!(body.contains("The Musical Hop"));
    }

    #[tokio::test]
    async fn test_artist_search_by_query_string() {
        let (app, db) = app().await;
        insert_artist(&db, "Guns N Petals").await;
        insert_artist(&db, "Matt Quevedo").await;
        insert_artist(&db, "The Wild Sax Band").await;

        let response = app
            .oneshot(get_request("/artists/search?search_term=A"))
            .await
            .unwrap();

        let body = body_text(response).await;
        assert!(body.contains(r#"Number of search results for "A": 3"#));
    }

    #[tokio::test]
    async fn test_edit_venue_redirects_to_detail() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let response = app
            .oneshot(form_request(
                &format!("/venues/{}/edit", venue.id),
                "name=The+Dueling+Pianos+Bar&city=New+York&state=NY&address=335+Delancey+Street\
                 &phone=914-003-1132&genres=Classical",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            format!("/venues/{}", venue.id).as_str()
        );
        assert!(response.headers().contains_key(header::SET_COOKIE));

        let stored = entities::venue::Entity::find_by_id(venue.id)
            .one(&db.conn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "The Dueling Pianos Bar");
        assert_eq!(stored.state, "NY");
    }

    #[tokio::test]
    async fn test_delete_venue_removes_its_shows() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, venue.id, artist.id, days_from_now(3)).await;

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/venues/{}", venue.id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = flash_cookie(&response);
        assert_eq!(body_text(response).await, "{}");

        let request = Request::builder()
            .uri("/venues")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let body = body_text(app.oneshot(request).await.unwrap()).await;
        assert!(body.contains("Venue The Musical Hop was successfully deleted!"));

        let shows = entities::show::Entity::find().all(&db.conn).await.unwrap();
        assert!(shows.is_empty());
        let artists = entities::artist::Entity::find().all(&db.conn).await.unwrap();
        assert_eq!(artists.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_venue_flashes_failure() {
        let (app, _db) = app().await;

        let request = Request::builder()
            .method("DELETE")
            .uri("/venues/999")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = flash_cookie(&response);
        assert_eq!(body_text(response).await, "{}");

        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let body = body_text(app.oneshot(request).await.unwrap()).await;
        assert!(body.contains("Venue couldn&#x27;t be deleted."));
        assert!(!body.contains("successfully deleted"));
    }

    #[tokio::test]
    async fn test_create_show_and_list_it() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;

        let response = app
            .clone()
            .oneshot(form_request(
                "/shows/create",
                &format!(
                    "artist_id={}&venue_id={}&start_time=2035-06-15T20%3A00",
                    artist.id, venue.id
                ),
            ))
            .await
            .unwrap();
        assert!(
            body_text(response)
                .await
                .contains("Show was successfully listed!")
        );

        let response = app.oneshot(get_request("/shows")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Guns N Petals"));
        assert!(body.contains("The Musical Hop"));
    }

    #[tokio::test]
    async fn test_show_without_ids_is_not_listed() {
        let (app, db) = app().await;

        let response = app
            .oneshot(form_request("/shows/create", "start_time=2035-06-15+20%3A00"))
            .await
            .unwrap();

        assert!(
            body_text(response)
                .await
                .contains("An error occurred. Show could not be listed.")
        );
        let shows = entities::show::Entity::find().all(&db.conn).await.unwrap();
        assert!(shows.is_empty());
    }

    #[tokio::test]
    async fn test_venue_listing_groups_by_city() {
        let (app, db) = app().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

        let response = app.oneshot(get_request("/venues")).await.unwrap();

        let body = body_text(response).await;
        assert!(body.contains("<h3>San Francisco, CA</h3>"));
        assert!(body.contains("<h3>New York, NY</h3>"));
    }
}
