//! Sub-entity normalization: images, person/organization references, brands,
//! offers, ratings, list items and FAQ entries.

use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::format::{value_is_iso8601_date, value_is_url};
use crate::node::is_blank;
use crate::validate::Reporter;

const SCHEMA_ORG: &str = "https://schema.org/";

const AVAILABILITY: &[&str] = &[
    "InStock",
    "OutOfStock",
    "PreOrder",
    "PreSale",
    "SoldOut",
    "LimitedAvailability",
    "OnlineOnly",
    "InStoreOnly",
    "Discontinued",
];

const ITEM_CONDITION: &[&str] = &[
    "NewCondition",
    "UsedCondition",
    "RefurbishedCondition",
    "DamagedCondition",
];

/// Default `@type` for a person/organization reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Person,
    Organization,
}

impl RefKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
        }
    }
}

/// Wrap a value in a list: arrays as-is, anything else as one element.
pub fn as_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Normalize an image-like property to a list without blank entries.
pub fn images(value: Option<&Value>) -> Value {
    Value::Array(as_list(value).into_iter().filter(|v| !is_blank(v)).collect())
}

/// Object with `@type` first, followed by the non-blank members of `rest`.
fn typed(type_name: &str, rest: &Map<String, Value>) -> Value {
    let mut out = Map::with_capacity(rest.len() + 1);
    out.insert("@type".to_string(), Value::String(type_name.to_string()));
    for (k, v) in rest {
        if k != "@type" {
            out.insert(k.clone(), v.clone());
        }
    }
    Value::Object(out)
}

/// Normalize a person or organization reference.
///
/// - a string becomes `{"@type": <kind>, "name": <string>}`
/// - an object with `@type` passes through unchanged
/// - an object with `name` but no `@type` gets `@type: <kind>` prefixed
/// - a list is normalized element-wise, dropping unusable entries
/// - anything else is dropped
pub fn person_or_org(value: Option<&Value>, kind: RefKind) -> Option<Value> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(json!({
            "@type": kind.as_str(),
            "name": s,
        })),
        Value::Object(obj) if obj.contains_key("@type") => Some(Value::Object(obj.clone())),
        Value::Object(obj) if obj.get("name").is_some_and(|n| !n.is_null()) => {
            Some(typed(kind.as_str(), obj))
        }
        Value::Array(items) => {
            let refs: Vec<Value> = items
                .iter()
                .filter_map(|item| match item {
                    Value::Array(_) => None,
                    other => person_or_org(Some(other), kind),
                })
                .collect();
            (!refs.is_empty()).then_some(Value::Array(refs))
        }
        _ => None,
    }
}

/// Normalize a product brand: a string becomes `{"@type": "Brand", "name": ..}`,
/// an object gets `@type: Brand` unless it already carries a type.
pub fn brand(value: Option<&Value>) -> Option<Value> {
    match value? {
        v if is_blank(v) => None,
        Value::Object(obj) if obj.contains_key("@type") => Some(Value::Object(obj.clone())),
        Value::Object(obj) => Some(typed("Brand", obj)),
        Value::String(s) => Some(json!({"@type": "Brand", "name": s})),
        other => Some(json!({"@type": "Brand", "name": other})),
    }
}

/// Expand a bare enumeration member (`InStock`) to its schema.org URL.
fn expand_enum(value: Value, members: &[&str]) -> Value {
    match value {
        Value::String(s) if members.contains(&s.as_str()) => {
            Value::String(format!("{SCHEMA_ORG}{s}"))
        }
        other => other,
    }
}

fn is_enum_or_url(value: &Value, members: &[&str]) -> bool {
    let is_member = value
        .as_str()
        .and_then(|s| s.strip_prefix(SCHEMA_ORG))
        .is_some_and(|m| members.contains(&m));
    is_member || value_is_url(value)
}

/// Expand a bare availability member (`InStock`) to its schema.org URL.
pub(crate) fn availability(value: Value) -> Value {
    expand_enum(value, AVAILABILITY)
}

/// Whether `value` is a schema.org availability URL or another valid URL.
pub(crate) fn is_availability(value: &Value) -> bool {
    is_enum_or_url(value, AVAILABILITY)
}

/// Normalize `offers` into a list of `Offer` objects.
///
/// An entry without `price` or `priceCurrency` (alias `currency`) is dropped
/// whole. Invalid `url`, `priceValidUntil`, `availability` and
/// `itemCondition` members are stripped individually.
pub(crate) fn offers(value: Option<&Value>, reporter: &mut Reporter) -> Result<Value> {
    let entries: Vec<&Value> = match value {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    };

    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::Object(o) = entry else {
            continue;
        };

        let currency = o
            .get("priceCurrency")
            .filter(|v| !v.is_null())
            .or_else(|| o.get("currency"));

        let members = [
            ("price", o.get("price").cloned()),
            ("priceCurrency", currency.cloned()),
            (
                "availability",
                o.get("availability").cloned().map(availability),
            ),
            ("url", o.get("url").cloned()),
            ("priceValidUntil", o.get("priceValidUntil").cloned()),
            (
                "itemCondition",
                o.get("itemCondition").cloned().map(|v| expand_enum(v, ITEM_CONDITION)),
            ),
            (
                "seller",
                person_or_org(o.get("seller"), RefKind::Organization),
            ),
        ];

        let mut offer = Map::new();
        offer.insert("@type".to_string(), Value::String("Offer".to_string()));
        for (key, value) in members {
            if let Some(v) = value
                && !is_blank(&v)
            {
                offer.insert(key.to_string(), v);
            }
        }

        if !offer.contains_key("price") || !offer.contains_key("priceCurrency") {
            reporter.reject("Offer missing price/priceCurrency".to_string())?;
            continue;
        }

        if offer.get("url").is_some_and(|v| !value_is_url(v)) {
            reporter.reject("Offer.url must be a valid URL".to_string())?;
            offer.shift_remove("url");
        }
        if offer.get("priceValidUntil").is_some_and(|v| !value_is_iso8601_date(v)) {
            reporter.reject("Offer.priceValidUntil must be ISO8601 date/datetime".to_string())?;
            offer.shift_remove("priceValidUntil");
        }
        if offer.get("availability").is_some_and(|v| !is_availability(v)) {
            reporter
                .reject("Offer.availability must be schema.org URL enum or valid URL".to_string())?;
            offer.shift_remove("availability");
        }
        if offer.get("itemCondition").is_some_and(|v| !is_enum_or_url(v, ITEM_CONDITION)) {
            reporter
                .reject("Offer.itemCondition must be schema.org URL enum or valid URL".to_string())?;
            offer.shift_remove("itemCondition");
        }

        out.push(Value::Object(offer));
    }

    Ok(Value::Array(out))
}

/// Normalize an `AggregateRating`. Without `ratingValue` the rating is dropped.
pub(crate) fn aggregate_rating(
    value: Option<&Value>,
    reporter: &mut Reporter,
) -> Result<Option<Value>> {
    let Some(Value::Object(r)) = value else {
        return Ok(None);
    };

    let review_count = r
        .get("reviewCount")
        .filter(|v| !v.is_null())
        .or_else(|| r.get("ratingCount"));

    let members = [
        ("ratingValue", r.get("ratingValue")),
        ("reviewCount", review_count),
        ("bestRating", r.get("bestRating")),
        ("worstRating", r.get("worstRating")),
    ];

    let mut rating = Map::new();
    rating.insert(
        "@type".to_string(),
        Value::String("AggregateRating".to_string()),
    );
    for (key, value) in members {
        if let Some(v) = value
            && !is_blank(v)
        {
            rating.insert(key.to_string(), v.clone());
        }
    }

    if !rating.contains_key("ratingValue") {
        reporter.reject("AggregateRating missing ratingValue".to_string())?;
        return Ok(None);
    }

    Ok(Some(Value::Object(rating)))
}

/// Which link property a list item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLink {
    /// BreadcrumbList: `name` then `item`, falling back to `url`
    Item,
    /// ItemList: `url` falling back to `item`, then `name`
    Url,
}

/// Build `ListItem` entries with 1-based positions.
///
/// An explicit `position` wins; otherwise the entry's index + 1 is used.
/// Entries that are not objects are skipped without renumbering the rest.
pub fn list_items(items: &[&Value], link: ListLink) -> Value {
    let mut out = Vec::with_capacity(items.len());
    for (i, entry) in items.iter().enumerate() {
        let Value::Object(it) = entry else {
            continue;
        };
        let given = |key: &str| it.get(key).filter(|v| !v.is_null());

        let position = given("position")
            .cloned()
            .unwrap_or_else(|| Value::from(i as u64 + 1));
        let item_link = given("item").or_else(|| given("url")).cloned();
        let url_link = given("url").or_else(|| given("item")).cloned();
        let name = given("name").cloned();

        let members = match link {
            ListLink::Item => [("position", Some(position)), ("name", name), ("item", item_link)],
            ListLink::Url => [("position", Some(position)), ("url", url_link), ("name", name)],
        };

        let mut li = Map::new();
        li.insert("@type".to_string(), Value::String("ListItem".to_string()));
        for (key, value) in members {
            if let Some(v) = value
                && !is_blank(&v)
            {
                li.insert(key.to_string(), v);
            }
        }
        out.push(Value::Object(li));
    }
    Value::Array(out)
}

/// Build FAQ `Question` entries from `{question, answer}` objects.
pub fn faq_entries(items: &[&Value]) -> Value {
    let questions = items
        .iter()
        .filter_map(|entry| entry.as_object())
        .map(|f| {
            let mut answer = Map::new();
            answer.insert("@type".to_string(), Value::String("Answer".to_string()));
            if let Some(text) = f.get("answer").filter(|v| !is_blank(v)) {
                answer.insert("text".to_string(), text.clone());
            }

            let mut question = Map::new();
            question.insert("@type".to_string(), Value::String("Question".to_string()));
            if let Some(name) = f.get("question").filter(|v| !is_blank(v)) {
                question.insert("name".to_string(), name.clone());
            }
            question.insert("acceptedAnswer".to_string(), Value::Object(answer));
            Value::Object(question)
        })
        .collect();
    Value::Array(questions)
}
