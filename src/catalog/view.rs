//! Server-rendered views for the catalog.
//!
//! Pages are built as formatted strings behind `Html`. One form renderer
//! serves both the create and update flows.

use axum::response::Html;

use super::{Book, BookDraft, ListingQuery, ListingResult};
use crate::error::FieldError;

pub(crate) enum FormMode {
    Create,
    Update(i64),
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Create => "/books/new".to_string(),
            FormMode::Update(id) => format!("/books/update/{}", id),
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "New Book",
            FormMode::Update(_) => "Update Book",
        }
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title} | Bookshelf</title>
</head>
<body>
    <h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

pub(crate) fn book_list(result: &ListingResult, query: &ListingQuery) -> Html<String> {
    let term = query.term.as_deref().unwrap_or("");
    let mut body = String::new();

    body.push_str(&format!(
        r#"    <form action="/books" method="get">
        <input class="search" type="text" name="term" value="{}" placeholder="Search the catalog">
        <button type="submit">Search</button>
    </form>
    <p><a href="/books/new">Create new book</a></p>
"#,
        escape(term),
    ));

    if result.items.is_empty() {
        body.push_str("    <p>The catalog has no matching books.</p>\n");
    } else {
        body.push_str(
            "    <table>\n        <tr><th>Title</th><th>Author</th><th>Genre</th><th>Year</th><th></th></tr>\n",
        );
        for book in &result.items {
            body.push_str(&format!(
                "        <tr><td><a href=\"/books/update/{id}\">{title}</a></td><td>{author}</td><td>{genre}</td><td>{year}</td><td><a href=\"/books/{id}/delete\">Delete</a></td></tr>\n",
                id = book.id,
                title = escape(&book.title),
                author = escape(&book.author),
                genre = escape(book.genre.as_deref().unwrap_or("")),
                year = book.year.map(|y| y.to_string()).unwrap_or_default(),
            ));
        }
        body.push_str("    </table>\n");
    }

    if result.total_pages > 1 {
        body.push_str("    <nav class=\"pagination\">\n");
        for page in 0..result.total_pages {
            let mut href = format!("/books?page={}&size={}", page, query.size);
            if !term.is_empty() {
                href.push_str(&format!("&term={}", urlencoding::encode(term)));
            }
            if page == result.current_page {
                body.push_str(&format!(
                    "        <a class=\"current\" href=\"{}\">{}</a>\n",
                    href,
                    page + 1
                ));
            } else {
                body.push_str(&format!("        <a href=\"{}\">{}</a>\n", href, page + 1));
            }
        }
        body.push_str("    </nav>\n");
    }

    body.push_str("    <script src=\"/static/scripts/search.js\"></script>\n");

    layout("Books", &body)
}

pub(crate) fn book_form(mode: FormMode, draft: &BookDraft, errors: &[FieldError]) -> Html<String> {
    let mut body = String::new();

    if !errors.is_empty() {
        body.push_str("    <ul class=\"errors\">\n");
        for error in errors {
            body.push_str(&format!("        <li>{}</li>\n", escape(&error.message)));
        }
        body.push_str("    </ul>\n");
    }

    body.push_str(&format!(
        r#"    <form action="{action}" method="post">
        <label>Title <input type="text" name="title" value="{title}"></label>
        <label>Author <input type="text" name="author" value="{author}"></label>
        <label>Genre <input type="text" name="genre" value="{genre}"></label>
        <label>Year <input type="text" name="year" value="{year}"></label>
        <button type="submit">Save</button>
        <a href="/books">Cancel</a>
    </form>
"#,
        action = mode.action(),
        title = escape(&draft.title),
        author = escape(&draft.author),
        genre = escape(&draft.genre),
        year = escape(&draft.year),
    ));

    layout(mode.heading(), &body)
}

pub(crate) fn book_updated(book: &Book) -> Html<String> {
    let body = format!(
        "    <p>\"{}\" was updated.</p>\n    <p><a href=\"/books\">Back to the catalog</a></p>\n",
        escape(&book.title),
    );
    layout("Book Updated", &body)
}

pub(crate) fn delete_confirm(book: &Book) -> Html<String> {
    let body = format!(
        r#"    <p>This will permanently remove "{title}" by {author} from the catalog.</p>
    <form action="/books/{id}/delete" method="post">
        <button type="submit">Delete</button>
        <a href="/books">Cancel</a>
    </form>
"#,
        title = escape(&book.title),
        author = escape(&book.author),
        id = book.id,
    );
    layout("Delete Book", &body)
}

pub(crate) fn book_deleted(book: &Book) -> Html<String> {
    let body = format!(
        "    <p>\"{}\" was removed from the catalog.</p>\n    <p><a href=\"/books\">Back to the catalog</a></p>\n",
        escape(&book.title),
    );
    layout("Book Deleted", &body)
}

pub(crate) fn page_not_found() -> Html<String> {
    layout(
        "Page Not Found",
        "    <p>That page does not exist.</p>\n    <p><a href=\"/books\">Back to the catalog</a></p>\n",
    )
}

pub(crate) fn server_error() -> Html<String> {
    layout(
        "Server Error",
        "    <p>There was a server error.</p>\n    <p><a href=\"/books\">Back to the catalog</a></p>\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn pagination_links_keep_the_term() {
        let query = ListingQuery {
            page: 0,
            size: 5,
            term: Some("lord of".to_string()),
        };
        let result = ListingResult {
            items: vec![Book {
                id: 1,
                title: "The Lord of the Rings".to_string(),
                author: "J.R.R. Tolkien".to_string(),
                genre: None,
                year: Some(1954),
                created_at: String::new(),
                updated_at: String::new(),
            }],
            current_page: 0,
            total_pages: 2,
        };

        let Html(page) = book_list(&result, &query);
        assert!(page.contains("/books?page=1&size=5&term=lord%20of"));
    }
}
