//! Server-rendered HTML pages.
//!
//! Everything coming from the catalog is escaped except the book description,
//! which is sanitized markup by the time it reaches a [`DisplayBook`].

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::models::{DisplayBook, SearchResultItem};
use crate::state::SearchState;

const SITE_TITLE: &str = "Instead of ________";
const SITE_DESCRIPTION: &str = "Find alternative book recommendations";

pub const NO_RESULTS_TEXT: &str = "No books found. Try a different search term.";
pub const NOT_FOUND_TEXT: &str = "Book not found";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <meta name=\"description\" content=\"{}\">\n<title>{}</title>\n</head>\n\
         <body>\n{}</body>\n</html>\n",
        attr(SITE_DESCRIPTION),
        text(title),
        body
    )
}

fn book_href(id: &str) -> String {
    format!("/book/{}", urlencoding::encode(id))
}

pub fn search_page(state: &SearchState) -> String {
    let mut body = String::new();
    let class = if state.has_searched { "searched" } else { "landing" };
    let _ = writeln!(body, "<main class=\"{class}\">");
    let _ = writeln!(body, "<h1>{}</h1>", text(SITE_TITLE));
    let _ = writeln!(
        body,
        "<form method=\"get\" action=\"/\">\n\
         <input type=\"text\" name=\"q\" placeholder=\"Search for books...\" value=\"{}\">\n\
         <button type=\"submit\">Search</button>\n</form>",
        attr(&state.query)
    );

    if state.shows_no_results() {
        let _ = writeln!(body, "<p class=\"empty\">{}</p>", text(NO_RESULTS_TEXT));
    } else if state.has_searched {
        body.push_str("<div class=\"results\">\n");
        for book in &state.books {
            body.push_str(&result_card(book));
        }
        body.push_str("</div>\n");
    }
    body.push_str("</main>\n");
    layout(SITE_TITLE, &body)
}

fn result_card(book: &SearchResultItem) -> String {
    let mut card = String::new();
    let _ = writeln!(card, "<a class=\"card\" href=\"{}\">", attr(&book_href(&book.id)));
    card.push_str(&cover(book.thumbnail.as_deref(), &book.title));
    let _ = writeln!(card, "<h2>{}</h2>", text(&book.title));
    let _ = writeln!(card, "<p class=\"authors\">{}</p>", text(&book.authors.join(", ")));
    if let Some(isbn) = &book.isbn {
        let _ = writeln!(card, "<p class=\"isbn\">ISBN: {}</p>", text(isbn));
    }
    card.push_str("</a>\n");
    card
}

fn cover(url: Option<&str>, alt: &str) -> String {
    match url {
        Some(src) => format!("<img src=\"{}\" alt=\"{}\">\n", attr(src), attr(alt)),
        None => "<div class=\"cover-placeholder\"></div>\n".to_string(),
    }
}

pub fn book_page(book: &DisplayBook) -> String {
    let mut body = String::new();
    body.push_str("<main>\n<a class=\"back\" href=\"/\">Back to Search</a>\n<article>\n");
    body.push_str(&cover(book.cover_url.as_deref(), &book.title));
    let _ = writeln!(body, "<h1>{}</h1>", text(&book.title));
    if let Some(subtitle) = &book.subtitle {
        let _ = writeln!(body, "<p class=\"subtitle\">{}</p>", text(subtitle));
    }
    let _ = writeln!(body, "<p class=\"authors\">By {}</p>", text(&book.authors.join(", ")));
    if let Some(pages) = book.page_count {
        let _ = writeln!(body, "<p class=\"pages\">Pages: {pages}</p>");
    }
    if let Some(isbn) = &book.isbn {
        let _ = writeln!(body, "<p class=\"isbn\">ISBN: {}</p>", text(isbn));
    }
    let _ = writeln!(
        body,
        "<p class=\"published\">Published: {}</p>",
        text(book.publish_date.as_deref().unwrap_or("Unknown"))
    );
    if !book.categories.is_empty() {
        body.push_str("<ul class=\"categories\">\n");
        for category in &book.categories {
            let _ = writeln!(body, "<li>{}</li>", text(category));
        }
        body.push_str("</ul>\n");
    }
    if let Some(description) = &book.description {
        let _ = writeln!(
            body,
            "<section class=\"description\">\n<h2>Description</h2>\n<div>{description}</div>\n</section>"
        );
    }
    body.push_str("</article>\n</main>\n");
    layout(&book.title, &body)
}

pub fn not_found_page() -> String {
    let body = format!(
        "<main class=\"not-found\">\n<h2>{}</h2>\n<a href=\"/\">Back to Search</a>\n</main>\n",
        text(NOT_FOUND_TEXT)
    );
    layout(SITE_TITLE, &body)
}
