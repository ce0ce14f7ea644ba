use scraper::{Html, Selector};
use serde_json::{Value, json};
use webpage_head::{
    Error, GenerateOptions, OnInvalid, SchemaType, SiteConfig, StructuredData, TypedSchemaBuilder,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn strict() -> GenerateOptions {
    GenerateOptions::new().on_invalid(OnInvalid::Error)
}

/// Extract the JSON-LD payload from a rendered script tag.
fn decode(script: &str) -> Value {
    let doc = Html::parse_fragment(script);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let scripts: Vec<_> = doc.select(&selector).collect();
    assert_eq!(scripts.len(), 1, "expected exactly one JSON-LD script in {script}");

    let payload: Value = serde_json::from_str(&scripts[0].text().collect::<String>()).unwrap();
    assert_eq!(payload["@context"], "https://schema.org");
    assert!(payload["@graph"].is_array());
    payload
}

fn graph(script: &str) -> Vec<Value> {
    decode(script)["@graph"].as_array().cloned().unwrap()
}

fn minimal_input(ty: &SchemaType) -> Value {
    match ty {
        SchemaType::Product => json!({
            "name": "EcoChatka 70",
            "offers": [{"price": "129900", "priceCurrency": "PLN"}]
        }),
        SchemaType::Article | SchemaType::NewsArticle | SchemaType::BlogPosting => {
            json!({"headline": "Title"})
        }
        SchemaType::BreadcrumbList => json!({"items": [{"name": "Start", "item": "https://example.com/"}]}),
        SchemaType::Event => json!({
            "name": "Fair",
            "startDate": "2025-05-01T12:00:00+01:00",
            "location": {"@type": "Place", "name": "Hall"}
        }),
        SchemaType::FaqPage => json!({"faqs": [{"question": "Q?", "answer": "A."}]}),
        SchemaType::HowTo => json!({"name": "Guide", "step": ["Step 1", "Step 2"]}),
        SchemaType::LocalBusiness => json!({"name": "Shop", "address": "Street 1, City"}),
        SchemaType::VideoObject => json!({
            "name": "Film",
            "thumbnailUrl": ["https://example.com/t.jpg"],
            "uploadDate": "2025-01-02",
            "duration": "PT1H2M3S"
        }),
        SchemaType::Recipe => json!({
            "name": "Bread",
            "recipeIngredient": ["1kg flour"],
            "recipeInstructions": ["Mix", "Bake"]
        }),
        SchemaType::SoftwareApplication => json!({"name": "App", "operatingSystem": "Linux"}),
        SchemaType::JobPosting => json!({
            "title": "Engineer",
            "hiringOrganization": "ACME",
            "jobLocation": {"@type": "Place", "address": "Remote"}
        }),
        SchemaType::ItemList => json!({"items": [{"url": "https://example.com/1"}]}),
        SchemaType::ImageObject => json!({"contentUrl": "https://example.com/i.png"}),
        SchemaType::WebSite | SchemaType::WebPage => {
            json!({"url": "https://example.com/", "name": "Example"})
        }
        _ => json!({"name": "Named"}),
    }
}

fn with_type(ty: &SchemaType, mut data: Value) -> Value {
    data["type"] = Value::String(ty.to_string());
    data
}

#[test]
fn minimal_inputs_pass_strict_validation() {
    init_tracing();
    let sd = StructuredData::new(SiteConfig::new());

    for ty in SchemaType::known() {
        let out = sd
            .generate(&with_type(ty, minimal_input(ty)), &strict())
            .unwrap_or_else(|e| panic!("{ty}: {e}"));
        let nodes = graph(&out.script);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["@type"], ty.as_str(), "{ty}");
        for prop in ty.required_properties() {
            assert!(nodes[0].get(*prop).is_some(), "{ty} lost {prop}");
        }
        assert!(out.warnings.is_empty());
    }
}

#[test]
fn missing_required_properties_are_reported() {
    let sd = StructuredData::new(SiteConfig::new());

    for ty in SchemaType::known() {
        let out = sd
            .generate(&with_type(ty, json!({})), &GenerateOptions::default())
            .unwrap();
        let expected: Vec<String> = ty
            .required_properties()
            .iter()
            .map(|p| format!("{ty} missing required property: {p}"))
            .collect();
        assert_eq!(out.warnings, expected, "{ty}");

        if !expected.is_empty() {
            let err = sd.generate(&with_type(ty, json!({})), &strict()).unwrap_err();
            assert!(err.to_string().contains(&expected[0]));
        }
    }
}

#[test]
fn product_scenario_exact_output() {
    let sd = StructuredData::new(SiteConfig::new());
    let out = sd
        .generate(
            &json!({"type": "Product", "name": "X", "offers": [{"price": "10", "priceCurrency": "USD"}]}),
            &strict().attach_language(false),
        )
        .unwrap();

    assert_eq!(
        decode(&out.script),
        json!({
            "@context": "https://schema.org",
            "@graph": [{
                "@type": "Product",
                "name": "X",
                "offers": [{"@type": "Offer", "price": "10", "priceCurrency": "USD"}]
            }]
        })
    );
}

#[test]
fn product_with_rating_and_brand() {
    let sd = StructuredData::new(SiteConfig::new().locale("pl_PL"));
    let out = sd
        .generate(
            &json!({
                "type": "Product",
                "name": "EcoChatka 70",
                "image": ["https://example.com/i.jpg"],
                "brand": "GreenHaus",
                "offers": [{
                    "price": "129900",
                    "priceCurrency": "PLN",
                    "availability": "https://schema.org/InStock",
                    "url": "https://example.com/p"
                }],
                "aggregateRating": {"ratingValue": 4.8, "reviewCount": 37}
            }),
            &strict(),
        )
        .unwrap();
    let node = &graph(&out.script)[0];

    let keys: Vec<&str> = node.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["@type", "name", "image", "brand", "offers", "aggregateRating", "inLanguage"]
    );
    assert_eq!(node["brand"], json!({"@type": "Brand", "name": "GreenHaus"}));
    assert_eq!(node["aggregateRating"]["@type"], "AggregateRating");
    assert_eq!(node["inLanguage"], "pl-PL");
}

#[test]
fn offer_without_price_is_dropped() {
    let sd = StructuredData::new(SiteConfig::new());
    let out = sd
        .generate(
            &json!({"type": "Product", "name": "X", "offers": [{"priceCurrency": "USD"}]}),
            &GenerateOptions::default(),
        )
        .unwrap();

    assert!(graph(&out.script)[0].get("offers").is_none());
    assert_eq!(
        out.warnings,
        vec![
            "Offer missing price/priceCurrency".to_string(),
            "Product missing required property: offers".to_string(),
        ]
    );

    let err = sd
        .generate(
            &json!({"type": "Product", "name": "X", "offers": [{"priceCurrency": "USD"}]}),
            &strict(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Invalid(ref m) if m == "Offer missing price/priceCurrency"));
}

#[test]
fn invalid_url_is_stripped_in_skip_mode() {
    let sd = StructuredData::new(SiteConfig::new());
    let data = json!({"type": "Organization", "name": "ACME", "url": "not a url"});

    let out = sd.generate(&data, &GenerateOptions::default()).unwrap();
    assert!(graph(&out.script)[0].get("url").is_none());
    assert_eq!(out.warnings, vec!["url must be a valid URL".to_string()]);

    assert!(sd.generate(&data, &strict()).is_err());
}

#[test]
fn invalid_formats_are_stripped() {
    let sd = StructuredData::new(SiteConfig::new());
    let out = sd
        .generate(
            &json!({
                "type": "VideoObject",
                "name": "Film",
                "thumbnailUrl": "https://example.com/t.jpg",
                "uploadDate": "2025-01-02",
                "duration": "PT",
                "embedUrl": "example.com/embed"
            }),
            &GenerateOptions::default(),
        )
        .unwrap();
    let node = &graph(&out.script)[0];

    assert!(node.get("duration").is_none());
    assert!(node.get("embedUrl").is_none());
    assert_eq!(node["thumbnailUrl"], json!(["https://example.com/t.jpg"]));
    assert_eq!(
        out.warnings,
        vec![
            "embedUrl must be a valid URL".to_string(),
            "duration must be ISO8601 duration".to_string(),
        ]
    );
}

#[test]
fn raw_graph_round_trip() {
    let sd = StructuredData::new(SiteConfig::new());
    let schemas = json!([
        {"@type": "WebSite", "url": "https://example.com/", "name": "Example", "inLanguage": "en"},
        {"@type": "Organization", "name": "Example", "logo": "bad"}
    ]);
    let out = sd
        .generate(&json!({"schemas": schemas}), &GenerateOptions::default())
        .unwrap();
    let nodes = graph(&out.script);

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0], schemas[0]);
    assert_eq!(nodes[1]["@type"], "Organization");
    assert!(nodes[1].get("logo").is_none());
    assert_eq!(nodes[1]["inLanguage"], "pl-PL");
    assert_eq!(out.warnings, vec!["logo must be a valid URL".to_string()]);
}

#[test]
fn raw_graph_untyped_nodes_get_language() {
    let sd = StructuredData::new(SiteConfig::new());
    let out = sd
        .generate(&json!({"schemas": [{"name": "A"}, {"name": "B"}]}), &GenerateOptions::default())
        .unwrap();

    for node in graph(&out.script) {
        assert_eq!(node["inLanguage"], "pl-PL");
    }
    assert!(out.warnings.is_empty());
}

#[test]
fn empty_schemas_falls_back_to_type() {
    let sd = StructuredData::new(SiteConfig::new());
    let out = sd
        .generate(
            &json!({"schemas": [], "type": "WebPage", "url": "https://e.com/", "title": "Page"}),
            &strict(),
        )
        .unwrap();
    assert_eq!(graph(&out.script)[0]["name"], "Page");
}

#[test]
fn generation_is_idempotent() {
    let sd = StructuredData::new(SiteConfig::new().locale("de_DE"));
    let data = json!({
        "type": "Event",
        "name": "Fair",
        "startDate": "2025-05-01",
        "endDate": "later",
        "location": "Hall"
    });

    let first = sd.generate(&data, &GenerateOptions::default()).unwrap();
    let second = sd.generate(&data, &GenerateOptions::default()).unwrap();
    assert_eq!(first.script, second.script);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.warnings, vec!["endDate must be ISO8601 date/datetime".to_string()]);
}

#[test]
fn typed_strategy_with_core_fallback() {
    let sd = StructuredData::new(SiteConfig::new().site_name("Shop"))
        .with_strategy(TypedSchemaBuilder::new());

    let out = sd
        .generate(&json!({"type": "Product", "offers": {"price": 1, "priceCurrency": "EUR"}}), &strict())
        .unwrap();
    assert_eq!(graph(&out.script)[0]["name"], "Shop");

    // Structured name: the typed builder gives up, the core builder keeps it.
    let out = sd
        .generate(
            &json!({"type": "Product", "name": {"en": "X"}, "offers": {"price": 1, "priceCurrency": "EUR"}}),
            &GenerateOptions::default(),
        )
        .unwrap();
    assert_eq!(graph(&out.script)[0]["name"], json!({"en": "X"}));
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].starts_with("Alternate builder fallback: "));

    // Uncovered type: silent fallthrough.
    let out = sd
        .generate(&json!({"type": "FAQPage", "faqs": [{"question": "Q", "answer": "A"}]}), &strict())
        .unwrap();
    assert_eq!(graph(&out.script)[0]["mainEntity"][0]["@type"], "Question");
    assert!(out.warnings.is_empty());
}
