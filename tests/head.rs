use scraper::{Html, Selector};
use serde_json::{Value, json};
use webpage_head::{
    Breadcrumbs, Crumb, GenerateOptions, IconLink, Icons, OpenGraph, SeoHead, SiteConfig,
    TwitterCard, canonical_url,
};

fn document(head: &str, body: &str) -> Html {
    Html::parse_document(&format!(
        "<!DOCTYPE html><html><head>{head}</head><body>{body}</body></html>"
    ))
}

fn attr(doc: &Html, selector: &str, name: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr(name).map(str::to_string))
}

fn count(doc: &Html, selector: &str) -> usize {
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector).count()
}

fn sample_head() -> SeoHead {
    let site = SiteConfig::new()
        .locale("en_GB")
        .fallback_locale("en_GB")
        .site_name("Example & Co");
    let mut head = SeoHead::new(site);

    head.meta_mut()
        .title("Blue \"Widgets\"", None)
        .description("Widgets <b>everywhere</b>")
        .keywords("widgets, blue")
        .canonical("https://example.com/widgets")
        .og(OpenGraph::new().image("https://example.com/og.png").og_type("product"))
        .twitter(TwitterCard::new().creator("@jane"))
        .icons(
            Icons::new()
                .favicon("/favicon.ico")
                .icon(IconLink::new("/icon-32.png").sizes("32x32").mime_type("image/png"))
                .apple_touch("/apple-touch-icon.png")
                .manifest("/site.webmanifest"),
        );

    head.assets_mut()
        .preload("/fonts/inter.woff2", "font", Some("anonymous"))
        .stylesheet("/app.css", None)
        .lazy_stylesheet("/below-the-fold.css")
        .inline_css(".hero { color: blue }")
        .script("/app.js", true, false, &[("type", "module")])
        .inline_js("window.ready = true;");

    let fallback = head.site().fallback_locale.clone();
    head.hreflang_mut().auto(
        &["en_GB", "pl_PL"],
        fallback.as_deref(),
        |locale| match locale {
            "en_GB" => Some("https://example.com/widgets".to_string()),
            "pl_PL" => Some("https://example.com/pl/widgets".to_string()),
            _ => None,
        },
    );

    head
}

#[test]
fn rendered_head_parses_back() {
    let head = sample_head();
    let doc = document(&head.render_head(Some("https://example.com/widgets?utm=x")), "");

    let title = Selector::parse("title").unwrap();
    assert_eq!(
        doc.select(&title).next().unwrap().text().collect::<String>(),
        "Blue \"Widgets\" | Example & Co"
    );
    assert_eq!(
        attr(&doc, r#"meta[name="description"]"#, "content").as_deref(),
        Some("Widgets <b>everywhere</b>")
    );
    assert_eq!(
        attr(&doc, r#"link[rel="canonical"]"#, "href").as_deref(),
        Some("https://example.com/widgets")
    );
    assert_eq!(
        attr(&doc, r#"meta[property="og:type"]"#, "content").as_deref(),
        Some("product")
    );
    assert_eq!(
        attr(&doc, r#"meta[property="og:url"]"#, "content").as_deref(),
        Some("https://example.com/widgets")
    );
    assert_eq!(
        attr(&doc, r#"meta[property="og:locale"]"#, "content").as_deref(),
        Some("en-GB")
    );
    assert_eq!(
        attr(&doc, r#"meta[name="twitter:image"]"#, "content").as_deref(),
        Some("https://example.com/og.png")
    );
    assert_eq!(
        attr(&doc, r#"meta[name="twitter:creator"]"#, "content").as_deref(),
        Some("@jane")
    );
    assert_eq!(
        attr(&doc, r#"link[rel="icon"][sizes="32x32"]"#, "type").as_deref(),
        Some("image/png")
    );
    assert_eq!(count(&doc, r#"link[rel="apple-touch-icon"]"#), 1);
    assert_eq!(count(&doc, r#"link[rel="manifest"]"#), 1);
}

#[test]
fn rendered_assets_and_alternates() {
    let head = sample_head();
    let doc = document(&head.render_head(None), &head.render_body_end());

    assert_eq!(
        attr(&doc, r#"link[rel="preload"][as="font"]"#, "crossorigin").as_deref(),
        Some("anonymous")
    );
    assert_eq!(
        attr(&doc, r#"link[href="/below-the-fold.css"][media="none"]"#, "onload").as_deref(),
        Some("if(media!='all')media='all'")
    );
    assert_eq!(count(&doc, "style"), 1);

    assert_eq!(
        attr(&doc, r#"link[hreflang="pl-PL"]"#, "href").as_deref(),
        Some("https://example.com/pl/widgets")
    );
    assert_eq!(
        attr(&doc, r#"link[hreflang="x-default"]"#, "href").as_deref(),
        Some("https://example.com/widgets")
    );
    assert_eq!(count(&doc, r#"link[rel="alternate"]"#), 3);

    assert_eq!(attr(&doc, r#"script[src="/app.js"]"#, "type").as_deref(), Some("module"));
    assert!(
        head.render_body_end()
            .ends_with("<script>\nwindow.ready = true;\n</script>")
    );
}

#[test]
fn breadcrumb_html_and_json_ld_agree() {
    let items = vec![
        json!({"name": "Home", "url": "https://example.com/"}),
        json!({"name": "Widgets", "url": "https://example.com/widgets"}),
        json!({"name": "Blue"}),
    ];
    let crumbs: Vec<Crumb> = items
        .iter()
        .map(|i| Crumb::new(i["name"].as_str().unwrap(), i["url"].as_str()))
        .collect();

    let doc = document("", &Breadcrumbs::render(&crumbs));
    assert_eq!(count(&doc, r#"nav[aria-label="breadcrumb"] li.breadcrumb-item"#), 3);
    assert_eq!(count(&doc, "li.breadcrumb-item a"), 2);
    assert_eq!(count(&doc, r#"li.active[aria-current="page"]"#), 1);

    let mut head = SeoHead::new(SiteConfig::new());
    let script = head
        .breadcrumb_json_ld(&items, &GenerateOptions::default())
        .unwrap();
    assert!(head.pull_errors().is_empty());

    let doc = Html::parse_fragment(&script);
    let selector = Selector::parse("script").unwrap();
    let payload: Value =
        serde_json::from_str(&doc.select(&selector).next().unwrap().text().collect::<String>()).unwrap();
    let list = &payload["@graph"][0]["itemListElement"];

    assert_eq!(list.as_array().unwrap().len(), 3);
    assert_eq!(list[1], json!({"@type": "ListItem", "position": 2, "name": "Widgets", "item": "https://example.com/widgets"}));
    assert_eq!(list[2], json!({"@type": "ListItem", "position": 3, "name": "Blue"}));
}

#[test]
fn canonical_url_cleans_tracking() {
    assert_eq!(
        canonical_url("https://www.example.com/widgets?utm_source=x&page=2&sort=asc#reviews", &["page"]).unwrap(),
        "https://example.com/widgets?page=2"
    );
}
