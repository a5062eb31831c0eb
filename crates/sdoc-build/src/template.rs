//! String-built HTML shell around a rendered page.

use std::fmt::Write;

use sdoc_site::HeadingRecord;

pub(crate) struct BreadcrumbData {
    pub title: String,
    /// `None` renders the crumb as plain text.
    pub path: Option<String>,
}

/// Everything one output page is made from.
pub(crate) struct PageData<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub collection: String,
    pub html_content: &'a str,
    pub breadcrumbs: Vec<BreadcrumbData>,
    pub toc: &'a [HeadingRecord],
}

const HEAD: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n";

pub(crate) fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::from(HEAD);
    html.reserve(page.html_content.len() + 1024);
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape(page.title),
        escape(page.site_name)
    );
    html.push_str("</head>\n");
    let _ = writeln!(
        html,
        "<body data-collection=\"{}\">",
        escape(&page.collection)
    );

    render_breadcrumbs(&mut html, &page.breadcrumbs);

    html.push_str("<main>\n<article>\n");
    html.push_str(page.html_content);
    html.push_str("\n</article>\n</main>\n");

    render_toc(&mut html, page.toc);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_breadcrumbs(html: &mut String, breadcrumbs: &[BreadcrumbData]) {
    if breadcrumbs.is_empty() {
        return;
    }
    html.push_str("<nav aria-label=\"breadcrumb\">\n<ol>\n");
    for crumb in breadcrumbs {
        let title = escape(&crumb.title);
        let _ = match &crumb.path {
            Some(path) => writeln!(html, "<li><a href=\"{}\">{title}</a></li>", escape(path)),
            None => writeln!(html, "<li>{title}</li>"),
        };
    }
    html.push_str("</ol>\n</nav>\n");
}

/// Table of contents, skipping the page title.
fn render_toc(html: &mut String, toc: &[HeadingRecord]) {
    let entries: Vec<_> = toc.iter().filter(|h| h.depth > 1).collect();
    if entries.is_empty() {
        return;
    }
    html.push_str("<aside>\n<h3>On this page</h3>\n<ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li data-depth=\"{}\"><a href=\"#{}\">{}</a></li>",
            entry.depth,
            escape(&entry.id),
            escape(&entry.text),
        );
    }
    html.push_str("</ul>\n</aside>\n");
}

fn escape(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(id: &str, text: &str, depth: u8) -> HeadingRecord {
        HeadingRecord {
            id: id.to_owned(),
            text: text.to_owned(),
            depth,
        }
    }

    #[test]
    fn test_page_shell_and_body() {
        let page = PageData {
            site_name: "SurrealDB Docs",
            title: "Functions",
            collection: "doc-surrealql".to_owned(),
            html_content: "<p>Hello world</p>",
            breadcrumbs: vec![],
            toc: &[],
        };
        let html = render_page(&page);
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains("<title>Functions | SurrealDB Docs</title>"));
        assert!(html.contains("data-collection=\"doc-surrealql\""));
        assert!(!html.contains("On this page"));
    }

    #[test]
    fn test_breadcrumb_trail() {
        let page = PageData {
            site_name: "Docs",
            title: "select",
            collection: "doc-sdk-rust".to_owned(),
            html_content: "",
            breadcrumbs: vec![
                BreadcrumbData {
                    title: "Rust".to_owned(),
                    path: Some("/sdk/rust".to_owned()),
                },
                BreadcrumbData {
                    title: "Methods".to_owned(),
                    path: None,
                },
            ],
            toc: &[],
        };
        let html = render_page(&page);
        assert!(html.contains("<li><a href=\"/sdk/rust\">Rust</a></li>"));
        assert!(html.contains("<li>Methods</li>"));
    }

    #[test]
    fn test_toc_skips_page_title() {
        let toc = [
            heading("functions", "Functions", 1),
            heading("stringlen", "string::len", 2),
            heading("examples", "Examples", 3),
        ];
        let page = PageData {
            site_name: "Docs",
            title: "Functions",
            collection: "doc-surrealql".to_owned(),
            html_content: "",
            breadcrumbs: vec![],
            toc: &toc,
        };
        let html = render_page(&page);
        assert!(html.contains("On this page"));
        assert!(html.contains("<a href=\"#stringlen\">string::len</a>"));
        assert!(html.contains("data-depth=\"3\""));
        assert!(!html.contains("#functions"));
    }

    #[test]
    fn test_escape_markup_and_quotes() {
        assert_eq!(
            escape("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
