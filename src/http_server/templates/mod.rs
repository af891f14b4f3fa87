//! Server-side HTML rendering.

pub mod artists;
pub mod errors;
pub mod shows;
pub mod venues;

use chrono::{DateTime, Utc};

use crate::services::{ListingSummary, SearchResults, ShowCounterpart};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

pub fn format_datetime(time: &DateTime<Utc>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    time.format(pattern).to_string()
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Wrap page content with the shared navigation and any pending flash messages.
pub fn layout(title: &str, messages: &[String], content: &str) -> String {
    let flashes: String = messages
        .iter()
        .map(|m| format!(r#"<div class="alert">{}</div>"#, escape(m)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Showbill</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            line-height: 1.5;
        }}
        nav {{
            display: flex;
            gap: 16px;
            align-items: center;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }}
        nav form {{
            margin-left: auto;
        }}
        .alert {{
            background: #e8f1fb;
            border: 1px solid #0066cc;
            padding: 8px 12px;
            margin-bottom: 12px;
        }}
        .items li {{
            margin-bottom: 6px;
        }}
        .muted {{
            color: #777;
        }}
        .button {{
            display: inline-block;
            padding: 8px 16px;
            background: #0066cc;
            color: white;
            text-decoration: none;
            border: none;
            border-radius: 4px;
        }}
        label {{
            display: block;
            margin-top: 10px;
        }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Showbill</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <form method="post" action="/venues/search">
            <input type="search" name="search_term" placeholder="Find a venue">
        </form>
        <form method="post" action="/artists/search">
            <input type="search" name="search_term" placeholder="Find an artist">
        </form>
    </nav>
    {flashes}
    <main>
{content}
    </main>
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn home(messages: &[String]) -> String {
    let content = r#"        <h1>Showbill</h1>
        <p>Book local artists at local venues.</p>
        <p>
            <a class="button" href="/venues/create">Post a venue</a>
            <a class="button" href="/artists/create">Post an artist</a>
            <a class="button" href="/shows/create">Post a show</a>
        </p>"#;
    layout("Home", messages, content)
}

/// `<li>` rows linking to `{base}/{id}` with the upcoming show count.
pub(crate) fn summary_items(base: &str, items: &[ListingSummary]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                r#"<li><a href="{base}/{id}">{name}</a> <span class="muted">{count} upcoming shows</span></li>"#,
                id = item.id,
                name = escape(&item.name),
                count = item.num_upcoming_shows,
            )
        })
        .collect()
}

pub(crate) fn search_results(
    base: &str,
    search_term: &str,
    results: &SearchResults,
    messages: &[String],
) -> String {
    let content = format!(
        r#"        <h3>Number of search results for "{term}": {count}</h3>
        <ul class="items">{items}</ul>"#,
        term = escape(search_term),
        count = results.count,
        items = summary_items(base, &results.data),
    );
    layout("Search", messages, &content)
}

/// Past or upcoming block on a detail page.
pub(crate) fn show_section(
    heading: &str,
    base: &str,
    shows: &[ShowCounterpart],
) -> String {
    let items: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<li><img src="{image}" alt="" width="48"> <a href="{base}/{id}">{name}</a> <span class="muted">{start}</span></li>"#,
                image = escape(&show.image_link),
                id = show.id,
                name = escape(&show.name),
                start = format_datetime(&show.start_time, DateFormat::Full),
            )
        })
        .collect();

    format!(
        r#"<section><h2>{count} {heading}</h2><ul class="items">{items}</ul></section>"#,
        count = shows.len(),
        heading = escape(heading),
    )
}

pub(crate) fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span> "#, escape(g)))
        .collect()
}

/// `http`/`https` link or a muted placeholder when empty.
pub(crate) fn optional_link(url: &str, placeholder: &str) -> String {
    if url.is_empty() {
        format!(r#"<span class="muted">{}</span>"#, escape(placeholder))
    } else {
        format!(r#"<a href="{0}" target="_blank" rel="noopener">{0}</a>"#, escape(url))
    }
}
