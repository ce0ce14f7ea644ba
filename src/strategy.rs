//! Alternate node construction
//!
//! A [`NodeStrategy`] gets the first shot at building a node when
//! [`GenerateOptions::use_alternate`](crate::GenerateOptions::use_alternate)
//! is set. [`TypedSchemaBuilder`] is the built-in one: it maps input onto
//! strongly typed schema structs and lets serde produce the node.

use serde::Serialize;
use serde_json::Value;

use crate::config::SiteConfig;
use crate::error::StrategyError;
use crate::fields::Fields;
use crate::format::{is_iso8601_date, is_url};
use crate::input::{
    ArticleInput, EventInput, ListInput, LocalBusinessInput, ProductInput, RecipeInput, VideoInput,
};
use crate::node::{Node, is_blank};
use crate::normalize::{self, RefKind};
use crate::schema_type::SchemaType;

/// Pluggable node construction.
///
/// Return `Ok(None)` for types the strategy does not cover; the core builder
/// then takes over without a warning. An `Err` is recorded as
/// `"Alternate builder fallback: <message>"` and the core builder takes over
/// as well. A produced node still goes through validation.
///
/// `site` is the configuration of the calling
/// [`StructuredData`](crate::StructuredData), so site-wide fallbacks match
/// the core builder.
pub trait NodeStrategy: Send + Sync {
    fn build_node(
        &self,
        ty: &SchemaType,
        fields: &Fields<'_>,
        site: &SiteConfig,
    ) -> Result<Option<Node>, StrategyError>;
}

impl<F> NodeStrategy for F
where
    F: Fn(&SchemaType, &Fields<'_>, &SiteConfig) -> Result<Option<Node>, StrategyError> + Send + Sync,
{
    fn build_node(
        &self,
        ty: &SchemaType,
        fields: &Fields<'_>,
        site: &SiteConfig,
    ) -> Result<Option<Node>, StrategyError> {
        self(ty, fields, site)
    }
}

type StrategyResult<T> = Result<T, StrategyError>;

/// Builds Product, Article family, BreadcrumbList, LocalBusiness, Event,
/// VideoObject and Recipe nodes from typed structs.
///
/// Stricter than the core builder: text properties must be scalars and
/// offers must be complete and well-formed, otherwise the strategy fails and
/// the core builder handles the input. Product and LocalBusiness fall back
/// to the site name like the core builder does.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedSchemaBuilder;

impl TypedSchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    fn product(&self, d: ProductInput<'_>, site: &SiteConfig) -> StrategyResult<ProductSchema> {
        Ok(ProductSchema {
            schema_type: "Product",
            name: name_or_site(d.name, site)?,
            description: text(d.description, "description")?,
            image: text_list(d.image, "image")?,
            sku: text(d.sku, "sku")?,
            brand: normalize::brand(d.brand),
            offers: offers(d.offers)?,
            aggregate_rating: rating(d.aggregate_rating)?,
        })
    }

    fn local_business(
        &self,
        d: LocalBusinessInput<'_>,
        site: &SiteConfig,
    ) -> StrategyResult<LocalBusinessSchema> {
        Ok(LocalBusinessSchema {
            schema_type: "LocalBusiness",
            name: name_or_site(d.name, site)?,
            image: text_list(d.image, "image")?,
            url: text(d.url, "url")?,
            telephone: text(d.telephone, "telephone")?,
            address: given(d.address),
            geo: given(d.geo),
            opening_hours: given(d.opening_hours),
            same_as: text_list(d.same_as, "sameAs")?,
        })
    }
}

impl NodeStrategy for TypedSchemaBuilder {
    fn build_node(
        &self,
        ty: &SchemaType,
        fields: &Fields<'_>,
        site: &SiteConfig,
    ) -> StrategyResult<Option<Node>> {
        let node = match ty {
            SchemaType::Product => to_node(&self.product(ProductInput::from_fields(fields), site)?)?,
            t if t.is_article() => to_node(&article(t, ArticleInput::from_fields(fields))?)?,
            SchemaType::BreadcrumbList => to_node(&breadcrumbs(ListInput::from_fields(fields))?)?,
            SchemaType::LocalBusiness => {
                to_node(&self.local_business(LocalBusinessInput::from_fields(fields), site)?)?
            }
            SchemaType::Event => to_node(&event(EventInput::from_fields(fields))?)?,
            SchemaType::VideoObject => to_node(&video(VideoInput::from_fields(fields))?)?,
            SchemaType::Recipe => to_node(&recipe(RecipeInput::from_fields(fields))?)?,
            _ => return Ok(None),
        };
        Ok(Some(node))
    }
}

fn to_node<T: Serialize>(schema: &T) -> StrategyResult<Node> {
    match serde_json::to_value(schema)? {
        Value::Object(map) => Ok(Node::from_map(map)),
        other => Err(StrategyError::Other(format!(
            "typed schema serialized to a non-object: {other}"
        ))),
    }
}

fn given(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !is_blank(v)).cloned()
}

/// A scalar rendered as text. Blank values are `None`; structured values
/// are unsupported.
fn text(value: Option<&Value>, field: &'static str) -> StrategyResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) if is_blank(v) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(_) => Err(StrategyError::UnsupportedValue {
            field,
            reason: "expected a scalar".to_string(),
        }),
    }
}

fn name_or_site(value: Option<&Value>, site: &SiteConfig) -> StrategyResult<Option<String>> {
    Ok(text(value, "name")?.or_else(|| site.site_name.clone()))
}

/// A scalar or a list of scalars as a list of text, blank entries dropped.
fn text_list(value: Option<&Value>, field: &'static str) -> StrategyResult<Vec<String>> {
    let mut out = Vec::new();
    for item in normalize::as_list(value) {
        if let Some(s) = text(Some(&item), field)? {
            out.push(s);
        }
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OfferSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    price: Value,
    price_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    availability: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_valid_until: Option<String>,
}

fn invalid_offer(reason: &str) -> StrategyError {
    StrategyError::UnsupportedValue {
        field: "offers",
        reason: reason.to_string(),
    }
}

fn offers(value: Option<&Value>) -> StrategyResult<Vec<OfferSchema>> {
    let mut out = Vec::new();
    for entry in normalize::as_list(value) {
        let Value::Object(o) = &entry else {
            return Err(StrategyError::UnsupportedValue {
                field: "offers",
                reason: "offer must be an object".to_string(),
            });
        };
        let price = given(o.get("price"));
        let currency = o
            .get("priceCurrency")
            .filter(|v| !v.is_null())
            .or_else(|| o.get("currency"));
        let currency = text(currency, "priceCurrency")?;
        let (Some(price), Some(price_currency)) = (price, currency) else {
            return Err(invalid_offer("offer without price/priceCurrency"));
        };

        let availability = text(o.get("availability"), "availability")?
            .map(|a| normalize::availability(Value::String(a)));
        if availability.as_ref().is_some_and(|a| !normalize::is_availability(a)) {
            return Err(invalid_offer("availability is not a schema.org enum or URL"));
        }
        let url = text(o.get("url"), "url")?;
        if url.as_deref().is_some_and(|u| !is_url(u)) {
            return Err(invalid_offer("url is not a valid URL"));
        }
        let price_valid_until = text(o.get("priceValidUntil"), "priceValidUntil")?;
        if price_valid_until.as_deref().is_some_and(|d| !is_iso8601_date(d)) {
            return Err(invalid_offer("priceValidUntil is not an ISO8601 date"));
        }

        out.push(OfferSchema {
            schema_type: "Offer",
            price,
            price_currency,
            availability,
            url,
            price_valid_until,
        });
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    rating_value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    review_count: Option<Value>,
}

fn rating(value: Option<&Value>) -> StrategyResult<Option<RatingSchema>> {
    let Some(Value::Object(r)) = value else {
        return Ok(None);
    };
    let Some(rating_value) = given(r.get("ratingValue")) else {
        return Err(StrategyError::UnsupportedValue {
            field: "aggregateRating",
            reason: "missing ratingValue".to_string(),
        });
    };
    Ok(Some(RatingSchema {
        schema_type: "AggregateRating",
        rating_value,
        review_count: given(r.get("reviewCount")).or_else(|| given(r.get("ratingCount"))),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    image: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    offers: Vec<OfferSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate_rating: Option<RatingSchema>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleSchema {
    #[serde(rename = "@type")]
    schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    image: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_entity_of_page: Option<String>,
}

fn article(ty: &SchemaType, d: ArticleInput<'_>) -> StrategyResult<ArticleSchema> {
    Ok(ArticleSchema {
        schema_type: ty.to_string(),
        headline: text(d.headline, "headline")?,
        description: text(d.description, "description")?,
        image: text_list(d.image, "image")?,
        date_published: text(d.date_published, "datePublished")?,
        date_modified: text(d.date_modified, "dateModified")?,
        author: normalize::person_or_org(d.author, RefKind::Person),
        publisher: normalize::person_or_org(d.publisher, RefKind::Organization),
        main_entity_of_page: text(d.main_entity_of_page, "mainEntityOfPage")?,
    })
}

#[derive(Debug, Serialize)]
struct ListItemSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    position: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BreadcrumbListSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    item_list_element: Vec<ListItemSchema>,
}

fn breadcrumbs(d: ListInput<'_>) -> StrategyResult<BreadcrumbListSchema> {
    let mut items = Vec::with_capacity(d.items.len());
    for (i, entry) in d.items.iter().enumerate() {
        let Value::Object(it) = entry else {
            continue;
        };
        let position = match it.get("position").filter(|v| !v.is_null()) {
            None => i as u64 + 1,
            Some(p) => p.as_u64().ok_or_else(|| StrategyError::UnsupportedValue {
                field: "position",
                reason: format!("expected a positive integer, got {p}"),
            })?,
        };
        items.push(ListItemSchema {
            schema_type: "ListItem",
            position,
            name: text(it.get("name"), "name")?,
            item: text(it.get("item").or_else(|| it.get("url")), "item")?,
        });
    }
    Ok(BreadcrumbListSchema {
        schema_type: "BreadcrumbList",
        item_list_element: items,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalBusinessSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    image: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geo: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opening_hours: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    same_as: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_attendance_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    image: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    offers: Vec<OfferSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    performer: Option<Value>,
}

fn event(d: EventInput<'_>) -> StrategyResult<EventSchema> {
    Ok(EventSchema {
        schema_type: "Event",
        name: text(d.name, "name")?,
        start_date: text(d.start_date, "startDate")?,
        end_date: text(d.end_date, "endDate")?,
        event_status: text(d.event_status, "eventStatus")?,
        event_attendance_mode: text(d.event_attendance_mode, "eventAttendanceMode")?,
        location: given(d.location),
        image: text_list(d.image, "image")?,
        description: text(d.description, "description")?,
        offers: offers(d.offers)?,
        organizer: normalize::person_or_org(d.organizer, RefKind::Organization),
        performer: normalize::person_or_org(d.performer, RefKind::Person),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    thumbnail_url: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upload_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<Value>,
}

fn video(d: VideoInput<'_>) -> StrategyResult<VideoSchema> {
    Ok(VideoSchema {
        schema_type: "VideoObject",
        name: text(d.name, "name")?,
        description: text(d.description, "description")?,
        thumbnail_url: text_list(d.thumbnail_url, "thumbnailUrl")?,
        upload_date: text(d.upload_date, "uploadDate")?,
        duration: text(d.duration, "duration")?,
        content_url: text(d.content_url, "contentUrl")?,
        embed_url: text(d.embed_url, "embedUrl")?,
        publisher: normalize::person_or_org(d.publisher, RefKind::Organization),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeSchema {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    image: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    recipe_ingredient: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    recipe_instructions: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate_rating: Option<RatingSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_time: Option<String>,
}

fn recipe(d: RecipeInput<'_>) -> StrategyResult<RecipeSchema> {
    Ok(RecipeSchema {
        schema_type: "Recipe",
        name: text(d.name, "name")?,
        description: text(d.description, "description")?,
        image: text_list(d.image, "image")?,
        recipe_ingredient: text_list(d.recipe_ingredient, "recipeIngredient")?,
        recipe_instructions: normalize::as_list(d.recipe_instructions)
            .into_iter()
            .filter(|v| !is_blank(v))
            .collect(),
        aggregate_rating: rating(d.aggregate_rating)?,
        author: normalize::person_or_org(d.author, RefKind::Person),
        total_time: text(d.total_time, "totalTime")?,
    })
}
