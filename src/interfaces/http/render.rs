// ============================================================
// HTML RENDERING
// ============================================================
// Pure formatting of tables and pages; no data mutation

use crate::domain::table::Table;

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; }\n\
table { border-collapse: collapse; margin: 1rem 0; }\n\
th, td { border: 1px solid #999; padding: 0.3rem 0.6rem; text-align: left; }\n\
th { background: #eee; }\n\
.notice { color: #555; }";

/// Escape text for embedding in HTML element content
pub fn escape_html(text: &str) -> String {
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

/// Render a table as an HTML fragment: header row from the column names,
/// one body row per data row, missing cells as empty `<td>`s.
pub fn render_table(table: &Table) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>");
    for column in &table.columns {
        html.push_str("<th>");
        html.push_str(&escape_html(column));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(&cell.to_string()));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>dupecheck</title>\n<style>\n{}\n</style>\n</head>\n\
         <body>\n{}\n</body>\n</html>\n",
        PAGE_STYLE, body
    )
}

fn upload_form() -> String {
    "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
     <input type=\"file\" name=\"file\" accept=\".csv,text/csv\">\n\
     <button type=\"submit\">Find duplicates</button>\n</form>"
        .to_string()
}

/// Landing page with the upload form
pub fn index_page() -> String {
    page(&format!(
        "<h1>CSV duplicate finder</h1>\n\
         <p>Upload a CSV file to find rows that repeat across all columns.</p>\n{}",
        upload_form()
    ))
}

/// Results page: the uploaded table, and the duplicate rows with a
/// download link when any exist.
pub fn results_page(table: &Table, duplicates: Option<&Table>) -> String {
    let mut body = String::from("<h1>CSV duplicate finder</h1>\n");
    body.push_str(&upload_form());

    body.push_str(&format!(
        "\n<h2>Uploaded table ({} rows)</h2>\n",
        table.row_count()
    ));
    body.push_str(&render_table(table));

    match duplicates {
        Some(subset) => {
            body.push_str(&format!(
                "\n<h2>Duplicate rows ({} rows)</h2>\n",
                subset.row_count()
            ));
            body.push_str(&render_table(subset));
            body.push_str("\n<p><a href=\"/download\">Download duplicates.csv</a></p>");
        }
        None => {
            body.push_str("\n<p class=\"notice\">No duplicate rows found.</p>");
        }
    }

    page(&body)
}
