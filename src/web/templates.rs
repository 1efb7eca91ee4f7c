//! Server-rendered HTML pages.
//!
//! Every value that originates from a form or the database goes through
//! `html_escape` before it is interpolated, both in text nodes and in
//! attribute values.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::db::Movie;

/// Per-request data every page needs: header name, nav state, flashes.
pub struct PageContext {
    pub display_name: String,
    pub logged_in: bool,
    pub flashes: Vec<String>,
}

const STYLE: &str = "\
body { margin: auto; max-width: 580px; font-family: sans-serif; } \
.alert { padding: 8px; margin: 8px 0; background: #fff3cd; border: 1px solid #ffeeba; } \
.movie-list li { padding: 4px 0; } \
.inline-form { display: inline; } \
footer { margin-top: 24px; color: #888; font-size: small; }";

fn layout(ctx: &PageContext, body: &str) -> String {
    let name = encode_text(&ctx.display_name);

    let mut flashes = String::new();
    for message in &ctx.flashes {
        let _ = writeln!(
            flashes,
            "<div class=\"alert\">{}</div>",
            encode_text(message)
        );
    }

    let nav = if ctx.logged_in {
        "<a href=\"/\">Home</a>\n\
         <a href=\"/settings\">Settings</a>\n\
         <form class=\"inline-form\" method=\"post\" action=\"/logout\">\
         <button type=\"submit\">Logout</button></form>"
    } else {
        "<a href=\"/\">Home</a>\n<a href=\"/login\">Login</a>"
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{name}'s Watchlist</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         <nav>{nav}</nav>\n\
         {flashes}\
         {body}\n\
         <footer><small>&copy; Watchlist</small></footer>\n\
         </body>\n\
         </html>\n"
    )
}

/// Error pages render without a session, so they skip the flash block.
fn bare_layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

#[must_use]
pub fn index_page(ctx: &PageContext, movies: &[Movie]) -> String {
    let name = encode_text(&ctx.display_name);

    let mut body = format!("<h2>{name}'s Watchlist</h2>\n");
    let _ = writeln!(body, "<p>{} Titles</p>", movies.len());

    if ctx.logged_in {
        body.push_str(
            "<form method=\"post\" action=\"/\">\n\
             <input type=\"text\" name=\"title\" autocomplete=\"off\" required maxlength=\"60\" placeholder=\"Movie title\">\n\
             <input type=\"text\" name=\"year\" autocomplete=\"off\" required maxlength=\"4\" placeholder=\"Year\">\n\
             <button type=\"submit\">Add</button>\n\
             </form>\n",
        );
    }

    body.push_str("<ul class=\"movie-list\">\n");
    for movie in movies {
        let title = encode_text(&movie.title);
        let year = encode_text(&movie.year);

        let _ = write!(body, "<li>{title} ({year})");
        if ctx.logged_in {
            let _ = write!(
                body,
                " <a href=\"/movie/edit/{id}\">Edit</a>\n\
                 <form class=\"inline-form\" method=\"post\" action=\"/movie/delete/{id}\" \
                 onsubmit=\"return confirm('Are you sure?')\">\
                 <button type=\"submit\">Delete</button></form>",
                id = movie.id
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>");

    layout(ctx, &body)
}

#[must_use]
pub fn login_page(ctx: &PageContext) -> String {
    let body = "<h3>Login</h3>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label for=\"username\">Username</label>\n\
         <input type=\"text\" name=\"username\" id=\"username\" autocomplete=\"off\" required>\n\
         <label for=\"password\">Password</label>\n\
         <input type=\"password\" name=\"password\" id=\"password\" required>\n\
         <button type=\"submit\">Login</button>\n\
         </form>";

    layout(ctx, body)
}

#[must_use]
pub fn settings_page(ctx: &PageContext, current_name: &str) -> String {
    let value = encode_double_quoted_attribute(current_name);

    let body = format!(
        "<h3>Settings</h3>\n\
         <form method=\"post\" action=\"/settings\">\n\
         <label for=\"name\">Your Name</label>\n\
         <input type=\"text\" name=\"name\" id=\"name\" autocomplete=\"off\" required maxlength=\"20\" value=\"{value}\">\n\
         <button type=\"submit\">Save</button>\n\
         </form>"
    );

    layout(ctx, &body)
}

#[must_use]
pub fn edit_page(ctx: &PageContext, movie: &Movie) -> String {
    let title = encode_double_quoted_attribute(&movie.title);
    let year = encode_double_quoted_attribute(&movie.year);

    let body = format!(
        "<h3>Edit item</h3>\n\
         <form method=\"post\" action=\"/movie/edit/{id}\">\n\
         <label for=\"title\">Title</label>\n\
         <input type=\"text\" name=\"title\" id=\"title\" autocomplete=\"off\" required maxlength=\"60\" value=\"{title}\">\n\
         <label for=\"year\">Year</label>\n\
         <input type=\"text\" name=\"year\" id=\"year\" autocomplete=\"off\" required maxlength=\"4\" value=\"{year}\">\n\
         <button type=\"submit\">Update</button>\n\
         </form>",
        id = movie.id
    );

    layout(ctx, &body)
}

#[must_use]
pub fn not_found_page(message: &str) -> String {
    let message = encode_text(message);
    let body = format!(
        "<h3>404 Error - Page Not Found</h3>\n\
         <p>{message}</p>\n\
         <p>Go <a href=\"/\">back home</a></p>"
    );

    bare_layout("404 Error", &body)
}

#[must_use]
pub fn internal_error_page() -> String {
    let body = "<h3>500 Error - Internal Server Error</h3>\n\
         <p>Something went wrong on our side.</p>\n\
         <p>Go <a href=\"/\">back home</a></p>";

    bare_layout("500 Error", body)
}
