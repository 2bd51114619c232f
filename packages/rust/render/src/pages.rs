//! HTML assembly for the three user-facing pages.
//!
//! Pages are assembled as plain strings; anything user-controlled goes
//! through [`escape_html`] before interpolation.

use markdrop_shared::DocumentEntry;

/// Shared `<head>` for every page.
fn page_head(title: &str) -> String {
    format!(
        "<head><meta charset=\"utf-8\">\
         <link rel=\"stylesheet\" type=\"text/css\" href=\"/assets/style.css\">\
         <title>{}</title></head>",
        escape_html(title)
    )
}

/// The catalog page: one link per stored document plus the capture widget.
///
/// Zero documents is not an error; the list renders empty and the drop
/// target is still present.
pub fn index_page(entries: &[DocumentEntry]) -> String {
    let mut body = String::from("<h1 id=\"title\">markdrop</h1><div id=\"documents\">");
    for entry in entries {
        let name = escape_html(entry.name.as_str());
        body.push_str(&format!(
            "<a class=\"document-link\" href=\"/md/{name}\">{name}</a>"
        ));
    }
    body.push_str("</div>");
    body.push_str("<div id=\"dropbox\">drop a markdown file here</div>");
    body.push_str("<div id=\"status\" hidden></div>");
    body.push_str("<script src=\"/assets/widget.js\"></script>");

    format!(
        "<!DOCTYPE html><html>{}<body>{body}</body></html>",
        page_head("markdrop")
    )
}

/// A rendered document with a link back to the catalog.
pub fn document_page(name: &str, body_html: &str) -> String {
    format!(
        "<!DOCTYPE html><html>{}<body>\
         <a id=\"back\" href=\"/\">&laquo; back to index</a>\
         <main id=\"document\">{body_html}</main>\
         </body></html>",
        page_head(name)
    )
}

/// A user-facing error page. The message is escaped here, so callers may
/// pass anything displayable.
pub fn error_page(status: u16, message: &str) -> String {
    format!(
        "<!DOCTYPE html><html>{}<body>\
         <a id=\"back\" href=\"/\">&laquo; back to index</a>\
         <main id=\"error\"><h1>{status}</h1><p>{}</p></main>\
         </body></html>",
        page_head("error"),
        escape_html(message)
    )
}

/// Minimal HTML escaping for text interpolated into pages.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
