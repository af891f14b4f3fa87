use super::{DateFormat, escape, format_datetime, layout};
use crate::services::NamedOption;
use crate::services::show::ShowListing;

pub fn list(shows: &[ShowListing], messages: &[String]) -> String {
    let items: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"        <li>
            <img src="{image}" alt="" width="48">
            <span class="muted">{start}</span>
            <a href="/artists/{artist_id}">{artist_name}</a> playing at
            <a href="/venues/{venue_id}">{venue_name}</a>
        </li>
"#,
                image = escape(&show.artist_image_link),
                start = format_datetime(&show.start_time, DateFormat::Medium),
                artist_id = show.artist_id,
                artist_name = escape(&show.artist_name),
                venue_id = show.venue_id,
                venue_name = escape(&show.venue_name),
            )
        })
        .collect();

    let content = if items.is_empty() {
        r#"        <p class="muted">No shows scheduled yet.</p>"#.to_string()
    } else {
        format!("        <ul class=\"items\">\n{items}        </ul>")
    };

    layout("Shows", messages, &content)
}

pub fn form(artists: &[NamedOption], venues: &[NamedOption], messages: &[String]) -> String {
    let options = |items: &[NamedOption]| -> String {
        items
            .iter()
            .map(|item| {
                format!(
                    r#"<option value="{}">{} (ID: {})</option>"#,
                    item.id,
                    escape(&item.name),
                    item.id
                )
            })
            .collect()
    };

    let content = format!(
        r#"        <h1>List a new show</h1>
        <form method="post" action="/shows/create">
            <label>Artist <select name="artist_id" required>{artists}</select></label>
            <label>Venue <select name="venue_id" required>{venues}</select></label>
            <label>Start time <input type="datetime-local" name="start_time" required></label>
            <p><input class="button" type="submit" value="Create show"></p>
        </form>"#,
        artists = options(artists),
        venues = options(venues),
    );

    layout("New show", messages, &content)
}
