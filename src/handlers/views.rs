//! Page templates for the reader view.
//!
//! Everything interpolated here is either already-rendered element markup
//! (escaped by [`ContentElement::render`]) or passed through `htmlescape`.
//!
//! [`ContentElement::render`]: crate::extraction::ContentElement::render

use crate::reader::ReadPage;

/// Stylesheet served at `/css/style.css`
pub const STYLESHEET: &str = r#"body {
  max-width: 40rem;
  margin: 2rem auto;
  padding: 0 1rem;
  font: 1.1rem/1.6 Georgia, serif;
  color: #222;
  background: #fdfdf8;
}
header a { color: inherit; text-decoration: none; font-weight: bold; }
.source { font-size: 0.85rem; color: #666; word-break: break-all; }
form { display: flex; gap: 0.5rem; }
input[type=text] { flex: 1; padding: 0.4rem; font: inherit; }
img { max-width: 100%; height: auto; display: block; margin: 1rem auto; }
.notice { color: #666; font-style: italic; }
"#;

fn layout(title: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<header><a href="/">thumbread</a></header>
<main>
{main}
</main>
</body>
</html>
"#,
        title = htmlescape::encode_minimal(title),
        main = main
    )
}

/// Landing page with the URL form
pub fn index_page() -> String {
    layout(
        "thumbread",
        r#"<p>Read any page as plain paragraphs and images.</p>
<form action="/read" method="get">
<input type="text" name="url" placeholder="example.com/article" autofocus>
<button type="submit">Read</button>
</form>"#,
    )
}

/// Reader view of an extracted page
pub fn content_page(page: &ReadPage) -> String {
    let source = htmlescape::encode_minimal(&page.url);
    let body = if page.is_empty() {
        r#"<p class="notice">Nothing readable was found on this page.</p>"#.to_string()
    } else {
        page.render()
    };
    let main = format!(
        "<p class=\"source\"><a href=\"{source}\">{source}</a></p>\n<article>\n{body}\n</article>",
        source = source,
        body = body
    );
    layout(&page.url, &main)
}

/// Generic failure page; carries no detail about the cause
pub fn error_page() -> String {
    layout(
        "thumbread - error",
        r#"<p class="notice">Sorry, that page could not be read.</p>
<p><a href="/">Try another</a></p>"#,
    )
}
