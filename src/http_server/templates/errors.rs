use super::layout;

pub fn not_found() -> String {
    layout(
        "Not Found",
        &[],
        r#"        <h1>404</h1>
        <p>Not Found. The page you were looking for doesn't exist.</p>
        <p><a href="/">Back home</a></p>"#,
    )
}

pub fn server_error() -> String {
    layout(
        "Server Error",
        &[],
        r#"        <h1>500</h1>
        <p>Something went wrong on our end. Please try again later.</p>
        <p><a href="/">Back home</a></p>"#,
    )
}
