//! Server-rendered HTML pages.

use common::utils::html::escape;
use service::catalog::TABLE_COLUMNS;
use service::{ProjectId, ServiceRow};

const FILTERS: [(&str, &str); 3] = [
    ("", "All"),
    ("state:ENABLED", "Enabled"),
    ("state:DISABLED", "Disabled"),
];

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/style.css\">\n</head>\n\
         <body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Project input form, with an optional inline error.
pub fn index(error: Option<&str>) -> String {
    let mut body = String::from("<h1>API Endpoint Status</h1>\n");
    if let Some(msg) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(msg)));
    }
    body.push_str(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"projectId\">Project ID</label>\n\
         <input type=\"text\" id=\"projectId\" name=\"projectId\" required>\n\
         <label for=\"filter\">Show</label>\n<select id=\"filter\" name=\"filter\">\n",
    );
    for (value, label) in FILTERS {
        body.push_str(&format!("<option value=\"{}\">{}</option>\n", escape(value), label));
    }
    body.push_str("</select>\n<button type=\"submit\">List APIs</button>\n</form>\n");
    layout("API Endpoint Status", &body)
}

/// Results table with the fixed four columns, one `<tr>` per row.
pub fn service_table(project_id: &ProjectId, filter: Option<&str>, rows: &[ServiceRow]) -> String {
    let mut body = format!("<h1>APIs for {}</h1>\n", escape(project_id.as_str()));
    if let Some(f) = filter {
        body.push_str(&format!("<p class=\"filter\">Filter: {}</p>\n", escape(f)));
    }
    body.push_str("<table>\n<thead>\n<tr>");
    for col in TABLE_COLUMNS {
        body.push_str(&format!("<th>{col}</th>"));
    }
    body.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        let [title, endpoint, status, url] = row.cells();
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"status-{}\">{}</td><td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></td></tr>\n",
            escape(title),
            escape(endpoint),
            status.to_lowercase(),
            status,
            escape(url),
            escape(url),
        ));
    }
    body.push_str("</tbody>\n</table>\n<p><a href=\"/\">Check another project</a></p>\n");
    layout(&format!("APIs for {}", project_id.as_str()), &body)
}

pub fn failure() -> String {
    layout(
        "Something went wrong",
        "<h1>Something went wrong</h1>\n<p>The request could not be completed. Please try again later.</p>\n\
         <p><a href=\"/\">Back</a></p>\n",
    )
}
