//! Static detail pages, one HTML file per spot with an id

use spotmap::{constants::SITE_NAME, prelude::*};
use std::fmt::Write as _;

/// Escapes text for HTML element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
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

pub fn render_detail_html(page: &DetailPage) -> String {
    let panel = &page.panel;
    let mut body = String::new();

    // writing into a String cannot fail
    let _ = writeln!(body, "    <h1>{}</h1>", escape_html(&panel.title));
    if let Some(category) = &panel.category {
        let _ = writeln!(body, "    <p class=\"category\">{}</p>", escape_html(category));
    }
    if let Some(area) = &panel.area {
        let _ = writeln!(body, "    <p class=\"area\">{}</p>", escape_html(area));
    }
    if let Some(image) = &panel.image {
        let _ = writeln!(
            body,
            "    <img src=\"{}\" alt=\"{}\">",
            escape_html(image),
            escape_html(&panel.title)
        );
    }
    if let Some(description) = &panel.description {
        let _ = writeln!(body, "    <p class=\"description\">{}</p>", escape_html(description));
    }
    if let Some(route) = &panel.route_url {
        let _ = writeln!(
            body,
            "    <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Google マップで経路を見る</a>",
            escape_html(route)
        );
    }
    if let Some(url) = &panel.external_url {
        let _ = writeln!(
            body,
            "    <a href=\"{}\" target=\"_blank\" rel=\"noopener\">公式サイト</a>",
            escape_html(url)
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n  <meta charset=\"utf-8\">\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  \
         <title>{title}</title>\n  <meta name=\"description\" content=\"{description}\">\n\
         </head>\n<body>\n  <main>\n{body}    <a href=\"../index.html\">{site} に戻る</a>\n  \
         </main>\n</body>\n</html>\n",
        title = escape_html(&page.document_title),
        description = escape_html(&page.meta_description),
        site = escape_html(SITE_NAME),
    )
}

/// Where a spot's page lives on disk, relative to the output directory.
///
/// Links use the percent-encoded id (`detail_page_path`) and static hosts
/// decode them, so the file itself carries the raw id. Ids that would escape
/// `spot/` or cannot be a file name get no page.
pub fn page_file_path(spot_id: &str) -> Option<String> {
    let unsafe_name = matches!(spot_id, "." | "..") || spot_id.contains(&['/', '\\', '\0'][..]);
    (!unsafe_name).then(|| format!("spot/{spot_id}.html"))
}

/// Pages for every spot with an id, as (relative file path, html).
/// When ids repeat the first spot wins.
pub fn render_all(store: &SpotStore) -> Vec<(String, String)> {
    let mut seen = HashSet::default();
    store
        .spots()
        .iter()
        .filter_map(|spot| {
            let id = spot.spot_id()?;
            if !seen.insert(id.to_string()) {
                log::warn!("duplicate spot_id {}, page skipped", id);
                return None;
            }
            let Some(path) = page_file_path(id) else {
                log::warn!("spot_id {:?} is not a usable file name, page skipped", id);
                return None;
            };
            let page = DetailPage::new(Arc::clone(spot));
            Some((path, render_detail_html(&page)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_all() {
        let store = SpotStore::from_json_str(
            r#"[
                {"spot_id":"a b","name":"<Cafe>","lat":33.5,"lng":133.5},
                {"name":"no id","lat":33.6,"lng":133.6},
                {"spot_id":"a b","name":"dup","lat":33.7,"lng":133.7}
            ]"#,
        )
        .unwrap();

        let pages = render_all(&store);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].0, "spot/a b.html");
        assert!(pages[0].1.contains("<h1>&lt;Cafe&gt;</h1>"));
        assert!(pages[0].1.contains("<title>&lt;Cafe&gt;｜四国おすすめスポットマップ</title>"));
    }

    #[test]
    fn test_file_path_is_decoded_link() {
        let store = SpotStore::from_json_str(
            r#"[
                {"spot_id":"桂浜","name":"桂浜","lat":33.497,"lng":133.574},
                {"spot_id":"../etc","name":"bad","lat":33.5,"lng":133.5},
                {"spot_id":"..","name":"bad","lat":33.5,"lng":133.5},
                {"spot_id":"a\\b","name":"bad","lat":33.5,"lng":133.5}
            ]"#,
        )
        .unwrap();

        let pages = render_all(&store);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].0, "spot/桂浜.html");
        // the panel links the encoded form, which hosts decode to the file above
        assert_eq!(detail_page_path("桂浜"), "spot/%E6%A1%82%E6%B5%9C.html");
    }
}
