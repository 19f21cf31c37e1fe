//! Server-rendered home page

use crate::Authentication;

use rnf_core::UserInfo;

use axum::response::Html;
use log::debug;

/// Element id of the embedded user-info JSON read by client scripts
pub const USER_INFO_ELEMENT_ID: &str = "user-info";

/// GET /
pub async fn home(Authentication(auth): Authentication) -> Html<String> {
    Html(render_home(auth.user_info()))
}

pub fn render_home(user_info: Option<&UserInfo>) -> String {
    let greeting = match user_info {
        Some(info) => format!("Hello, {}!", escape_html(&info.email)),
        None => String::from("Hello, world!"),
    };

    let user_info_script = user_info
        .and_then(|info| match serde_json::to_string(info) {
            Ok(json) => Some(json),
            Err(e) => {
                debug!("Failed to serialize user info: {e}");
                None
            }
        })
        .map(|json| {
            format!(
                r#"<script id="{USER_INFO_ELEMENT_ID}" type="application/json">{}</script>"#,
                json.replace('<', "\\u003c")
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Home</title>
    <link rel="stylesheet" href="/app.css" />
</head>
<body>
    <main>
        <h1>{greeting}</h1>
        <p>Welcome to your new app.</p>
    </main>
    {user_info_script}
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
