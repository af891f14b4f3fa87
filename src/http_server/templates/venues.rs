use super::{
    escape, genre_tags, layout, optional_link, search_results, show_section, summary_items,
};
use crate::http_server::forms::{GENRES, STATES};
use crate::services::SearchResults;
use crate::services::venue::{LocationGroup, VenueDetail, VenueInput};

pub fn list(areas: &[LocationGroup], messages: &[String]) -> String {
    let content: String = areas
        .iter()
        .map(|area| {
            format!(
                r#"        <h3>{city}, {state}</h3>
        <ul class="items">{venues}</ul>
"#,
                city = escape(&area.city),
                state = escape(&area.state),
                venues = summary_items("/venues", &area.venues),
            )
        })
        .collect();

    let content = if content.is_empty() {
        r#"        <p class="muted">No venues listed yet.</p>"#.to_string()
    } else {
        content
    };

    layout("Venues", messages, &content)
}

pub fn search(search_term: &str, results: &SearchResults, messages: &[String]) -> String {
    search_results("/venues", search_term, results, messages)
}

pub fn detail(detail: &VenueDetail, messages: &[String]) -> String {
    let venue = &detail.venue;
    let seeking = if venue.seeking_talent {
        format!(
            r#"<p><strong>Currently seeking talent</strong><br>{}</p>"#,
            escape(&venue.seeking_description)
        )
    } else {
        r#"<p class="muted">Not currently seeking talent</p>"#.to_string()
    };

    let content = format!(
        r#"        <h1>{name}</h1>
        <p class="muted">ID: {id}</p>
        <p>{genres}</p>
        <p>{address}<br>{city}, {state}</p>
        <p>{phone}</p>
        <p>{website}</p>
        <p>{facebook}</p>
        {seeking}
        <img src="{image}" alt="Venue image" width="320">
        <p>
            <a class="button" href="/venues/{id}/edit">Edit</a>
            <button class="button" id="delete-venue" data-id="{id}">Delete</button>
        </p>
        {past}
        {upcoming}
        <script>
            document.getElementById('delete-venue').onclick = function (e) {{
                fetch('/venues/' + e.target.dataset.id, {{ method: 'DELETE' }})
                    .then(function () {{ window.location.href = '/'; }});
            }};
        </script>"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(venue.genres.as_slice()),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(&venue.phone),
        website = optional_link(&venue.website, "No Website"),
        facebook = optional_link(&venue.facebook_link, "No Facebook Link"),
        image = escape(&venue.image_link),
        past = show_section("Past Shows", "/artists", &detail.past_shows),
        upcoming = show_section("Upcoming Shows", "/artists", &detail.upcoming_shows),
    );

    layout(&venue.name, messages, &content)
}

/// New venue form when `venue_id` is `None`, edit form otherwise.
pub fn form(venue_id: Option<i64>, values: &VenueInput, messages: &[String]) -> String {
    let (title, action) = match venue_id {
        Some(id) => ("Edit venue".to_string(), format!("/venues/{id}/edit")),
        None => ("List a new venue".to_string(), "/venues/create".to_string()),
    };

    let content = format!(
        r#"        <h1>{title}</h1>
        <form method="post" action="{action}">
            <label>Name <input type="text" name="name" value="{name}" required></label>
            <label>City <input type="text" name="city" value="{city}" maxlength="120" required></label>
            <label>State <select name="state" required>{states}</select></label>
            <label>Address <input type="text" name="address" value="{address}" maxlength="120" required></label>
            <label>Phone <input type="tel" name="phone" value="{phone}" maxlength="120" required></label>
            <label>Genres <select name="genres" multiple>{genres}</select></label>
            <label>Image link <input type="url" name="image_link" value="{image_link}" maxlength="500"></label>
            <label>Facebook link <input type="url" name="facebook_link" value="{facebook_link}" maxlength="120"></label>
            <label>Website <input type="url" name="website" value="{website}" maxlength="120"></label>
            <label><input type="checkbox" name="seeking_talent" value="y"{seeking}> Seeking talent</label>
            <label>Seeking description <textarea name="seeking_description" maxlength="500">{seeking_description}</textarea></label>
            <p><input class="button" type="submit" value="Save"></p>
        </form>"#,
        title = escape(&title),
        action = escape(&action),
        name = escape(&values.name),
        city = escape(&values.city),
        states = select_options(&STATES, |s| values.state == s),
        address = escape(&values.address),
        phone = escape(&values.phone),
        genres = select_options(&GENRES, |g| values.genres.iter().any(|v| v == g)),
        image_link = escape(&values.image_link),
        facebook_link = escape(&values.facebook_link),
        website = escape(&values.website),
        seeking = if values.seeking_talent { " checked" } else { "" },
        seeking_description = escape(&values.seeking_description),
    );

    layout(&title, messages, &content)
}

pub(crate) fn select_options(choices: &[&str], selected: impl Fn(&str) -> bool) -> String {
    choices
        .iter()
        .map(|choice| {
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                escape(choice),
                if selected(*choice) { " selected" } else { "" }
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ListingSummary;

    #[test]
    fn test_list_renders_each_area() {
        let areas = vec![
            LocationGroup {
                city: "New York".into(),
                state: "NY".into(),
                venues: vec![
                    ListingSummary {
                        id: 1,
                        name: "The Musical Hop".into(),
                        num_upcoming_shows: 2,
                    },
                    ListingSummary {
                        id: 3,
                        name: "Park Square".into(),
                        num_upcoming_shows: 0,
                    },
                ],
            },
            LocationGroup {
                city: "LA".into(),
                state: "CA".into(),
                venues: vec![],
            },
        ];

        let page = list(&areas, &[]);

        assert!(page.contains("<h3>New York, NY</h3>"));
        assert!(page.contains("<h3>LA, CA</h3>"));
        assert!(page.contains(r#"<a href="/venues/1">The Musical Hop</a>"#));
        assert!(page.contains("2 upcoming shows"));
    }

    #[test]
    fn test_edit_form_preselects_values() {
        let values = VenueInput {
            name: "The Musical Hop".into(),
            state: "CA".into(),
            genres: vec!["Jazz".into(), "R&B".into()],
            seeking_talent: true,
            ..Default::default()
        };

        let page = form(Some(1), &values, &[]);

        assert!(page.contains(r#"action="/venues/1/edit""#));
        assert!(page.contains(r#"<option value="CA" selected>CA</option>"#));
        assert!(page.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(page.contains(r#"<option value="R&amp;B" selected>R&amp;B</option>"#));
        assert!(page.contains(r#"value="y" checked"#));
    }
}
