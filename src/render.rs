//! Server-side HTML pages. Plain string rendering; the markup is small
//! enough that a template engine would be more machinery than page.

use crate::models::{SavedBook, SearchHit};

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - Bookshelf</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}\n\
         .book {{ border-bottom: 1px solid #ddd; padding: 1rem 0; }}\n\
         .book img {{ float: left; margin-right: 1rem; max-height: 8rem; }}\n\
         .book::after {{ content: \"\"; display: block; clear: both; }}\n\
         nav a {{ margin-right: 1rem; }}\n\
         form.inline {{ display: inline; }}\n\
         label {{ display: block; margin-top: 0.5rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">My shelf</a><a href=\"/searches/new\">Search the catalog</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    )
}

pub fn index(books: &[SavedBook]) -> String {
    let mut body = String::from("<h1>Saved books</h1>\n");
    if books.is_empty() {
        body.push_str("<p>Nothing saved yet. Try a catalog search.</p>\n");
    }
    for book in books {
        body.push_str(&format!(
            "<div class=\"book\">{image}\
             <h2><a href=\"/books/{id}\">{title}</a></h2>\
             <p>{author}</p>\
             </div>\n",
            image = image_tag(book.image_url.as_deref(), &book.title),
            id = book.id,
            title = escape(&book.title),
            author = escape(&book.author),
        ));
    }
    page("Saved books", &body)
}

pub fn search_form() -> String {
    let body = "<h1>Search the catalog</h1>\n\
         <form action=\"/searches\" method=\"post\">\n\
         <label>Search for\n\
         <input type=\"text\" name=\"searchQuery\" required>\n\
         </label>\n\
         <label>Search by\n\
         <select name=\"searchBy\">\n\
         <option value=\"title\">Title</option>\n\
         <option value=\"author\">Author</option>\n\
         </select>\n\
         </label>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n";
    page("Search", body)
}

pub fn search_results(hits: &[SearchHit]) -> String {
    let mut body = String::from("<h1>Search results</h1>\n");
    if hits.is_empty() {
        body.push_str("<p>The catalog had no matches.</p>\n");
    }
    for hit in hits {
        body.push_str(&format!(
            "<div class=\"book\">\
             <img src=\"{thumbnail}\" alt=\"{title}\">\
             <h2>{title}</h2>\
             <p>{authors}</p>\
             <p>ISBN: {identifier}</p>\
             <p>{description}</p>\
             <form action=\"/books\" method=\"post\">\
             <input type=\"hidden\" name=\"authors\" value=\"{authors}\">\
             <input type=\"hidden\" name=\"title\" value=\"{title}\">\
             <input type=\"hidden\" name=\"isbn\" value=\"{identifier}\">\
             <input type=\"hidden\" name=\"image\" value=\"{thumbnail}\">\
             <input type=\"hidden\" name=\"description\" value=\"{description}\">\
             <button type=\"submit\">Save to shelf</button>\
             </form>\
             </div>\n",
            thumbnail = escape(&hit.thumbnail),
            title = escape(&hit.title),
            authors = escape(&author_line(&hit.authors)),
            identifier = escape(&hit.identifier),
            description = escape(&hit.description),
        ));
    }
    page("Search results", &body)
}

pub fn detail(book: &SavedBook) -> String {
    let body = format!(
        "<div class=\"book\">{image}\
         <h1>{title}</h1>\
         <p>{author}</p>\
         <p>ISBN: {isbn}</p>\
         <p>{description}</p>\
         </div>\n\
         <h2>Edit</h2>\n\
         <form action=\"/books/{id}?_method=PUT\" method=\"post\">\n\
         <label>Authors <input type=\"text\" name=\"authors\" value=\"{author}\"></label>\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n\
         <label>ISBN <input type=\"text\" name=\"isbn\" value=\"{isbn}\"></label>\n\
         <label>Image URL <input type=\"text\" name=\"image\" value=\"{image_url}\"></label>\n\
         <label>Description <textarea name=\"description\">{description}</textarea></label>\n\
         <button type=\"submit\">Save changes</button>\n\
         </form>\n\
         <form class=\"inline\" action=\"/books/{id}?_method=DELETE\" method=\"post\">\n\
         <button type=\"submit\">Delete from shelf</button>\n\
         </form>\n",
        image = image_tag(book.image_url.as_deref(), &book.title),
        id = book.id,
        title = escape(&book.title),
        author = escape(&book.author),
        isbn = escape(&book.isbn),
        image_url = escape(book.image_url.as_deref().unwrap_or("")),
        description = escape(&book.description),
    );
    page(&book.title, &body)
}

pub fn error_page() -> String {
    page(
        "Something went wrong",
        "<h1>Something went wrong</h1>\n\
         <p>The shelf could not finish that request. Head back and try again.</p>\n",
    )
}

fn image_tag(url: Option<&str>, title: &str) -> String {
    match url {
        Some(url) if !url.is_empty() => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(url),
            escape(title)
        ),
        _ => String::new(),
    }
}

fn author_line(authors: &[String]) -> String {
    if authors.is_empty() {
        "Unknown author".to_string()
    } else {
        authors.join(", ")
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{author_line, escape, index};
    use crate::models::SavedBook;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("hi")</script>"#),
            "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn author_line_joins_or_falls_back() {
        assert_eq!(
            author_line(&["A. One".to_string(), "B. Two".to_string()]),
            "A. One, B. Two"
        );
        assert_eq!(author_line(&[]), "Unknown author");
    }

    #[test]
    fn listing_renders_books_without_an_image() {
        let html = index(&[SavedBook {
            id: 1,
            author: "Anon".to_string(),
            title: "Untitled".to_string(),
            isbn: "none".to_string(),
            image_url: None,
            description: "n/a".to_string(),
        }]);
        assert!(html.contains("Untitled"));
        assert!(!html.contains("<img src=\"\""));
    }
}
