use super::venues::select_options;
use super::{
    escape, genre_tags, layout, optional_link, search_results, show_section, summary_items,
};
use crate::http_server::forms::{GENRES, STATES};
use crate::services::artist::{ArtistDetail, ArtistInput};
use crate::services::{ListingSummary, SearchResults};

pub fn list(artists: &[ListingSummary], messages: &[String]) -> String {
    let content = if artists.is_empty() {
        r#"        <p class="muted">No artists listed yet.</p>"#.to_string()
    } else {
        format!(
            r#"        <ul class="items">{}</ul>"#,
            summary_items("/artists", artists)
        )
    };

    layout("Artists", messages, &content)
}

pub fn search(search_term: &str, results: &SearchResults, messages: &[String]) -> String {
    search_results("/artists", search_term, results, messages)
}

pub fn detail(detail: &ArtistDetail, messages: &[String]) -> String {
    let artist = &detail.artist;
    let seeking = if artist.seeking_venue {
        format!(
            r#"<p><strong>Currently seeking performance venues</strong><br>{}</p>"#,
            escape(&artist.seeking_description)
        )
    } else {
        r#"<p class="muted">Not currently seeking performance venues</p>"#.to_string()
    };

    let content = format!(
        r#"        <h1>{name}</h1>
        <p class="muted">ID: {id}</p>
        <p>{genres}</p>
        <p>{city}, {state}</p>
        <p>{phone}</p>
        <p>{website}</p>
        <p>{facebook}</p>
        {seeking}
        <img src="{image}" alt="Artist image" width="320">
        <p>
            <a class="button" href="/artists/{id}/edit">Edit</a>
            <button class="button" id="delete-artist" data-id="{id}">Delete</button>
        </p>
        {past}
        {upcoming}
        <script>
            document.getElementById('delete-artist').onclick = function (e) {{
                fetch('/artists/' + e.target.dataset.id, {{ method: 'DELETE' }})
                    .then(function () {{ window.location.href = '/'; }});
            }};
        </script>"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(artist.genres.as_slice()),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(&artist.phone),
        website = optional_link(&artist.website, "No Website"),
        facebook = optional_link(&artist.facebook_link, "No Facebook Link"),
        image = escape(&artist.image_link),
        past = show_section("Past Shows", "/venues", &detail.past_shows),
        upcoming = show_section("Upcoming Shows", "/venues", &detail.upcoming_shows),
    );

    layout(&artist.name, messages, &content)
}

/// New artist form when `artist_id` is `None`, edit form otherwise.
pub fn form(artist_id: Option<i64>, values: &ArtistInput, messages: &[String]) -> String {
    let (title, action) = match artist_id {
        Some(id) => ("Edit artist".to_string(), format!("/artists/{id}/edit")),
        None => ("List a new artist".to_string(), "/artists/create".to_string()),
    };

    let content = format!(
        r#"        <h1>{title}</h1>
        <form method="post" action="{action}">
            <label>Name <input type="text" name="name" value="{name}" required></label>
            <label>City <input type="text" name="city" value="{city}" maxlength="120" required></label>
            <label>State <select name="state" required>{states}</select></label>
            <label>Phone <input type="tel" name="phone" value="{phone}" maxlength="120" required></label>
            <label>Genres <select name="genres" multiple>{genres}</select></label>
            <label>Image link <input type="url" name="image_link" value="{image_link}" maxlength="500"></label>
            <label>Facebook link <input type="url" name="facebook_link" value="{facebook_link}" maxlength="120"></label>
            <label>Website <input type="url" name="website" value="{website}" maxlength="120"></label>
            <label><input type="checkbox" name="seeking_venue" value="y"{seeking}> Seeking venues</label>
            <label>Seeking description <textarea name="seeking_description" maxlength="500">{seeking_description}</textarea></label>
            <p><input class="button" type="submit" value="Save"></p>
        </form>"#,
        title = escape(&title),
        action = escape(&action),
        name = escape(&values.name),
        city = escape(&values.city),
        states = select_options(&STATES, |s| values.state == s),
        phone = escape(&values.phone),
        genres = select_options(&GENRES, |g| values.genres.iter().any(|v| v == g)),
        image_link = escape(&values.image_link),
        facebook_link = escape(&values.facebook_link),
        website = escape(&values.website),
        seeking = if values.seeking_venue { " checked" } else { "" },
        seeking_description = escape(&values.seeking_description),
    );

    layout(&title, messages, &content)
}
