//! Core JSON-LD node builder
//!
//! [`NodeBuilder::build`] maps loosely-shaped input onto one node per call:
//! per-type extraction, `inLanguage` attachment, then validation. Each
//! [`SchemaType`] variant has its own extraction function below; types
//! without one share the Organization shape.

use serde_json::{Value, json};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::fields::Fields;
use crate::input::*;
use crate::node::{Node, NodeWriter, is_blank};
use crate::normalize::{self, ListLink, RefKind};
use crate::schema_type::SchemaType;
use crate::validate::{self, Diagnostics, OnInvalid, Reporter};

/// Builds validated JSON-LD nodes from loosely-shaped input.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use webpage_head::{Diagnostics, Fields, NodeBuilder, SchemaType, SiteConfig};
///
/// let site = SiteConfig::new().locale("en_US");
/// let data = json!({"title": "Hello", "author": "Jane"});
/// let mut diag = Diagnostics::new();
///
/// let node = NodeBuilder::new(&site)
///     .build(&SchemaType::Article, &Fields::from_value(&data), &mut diag)
///     .unwrap();
///
/// assert_eq!(node.get_str("headline"), Some("Hello"));
/// assert_eq!(node.get_str("inLanguage"), Some("en-US"));
/// assert!(diag.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NodeBuilder<'s> {
    site: &'s SiteConfig,
    on_invalid: OnInvalid,
    attach_language: bool,
}

impl<'s> NodeBuilder<'s> {
    /// Create a builder in `Skip` mode that attaches `inLanguage`.
    pub fn new(site: &'s SiteConfig) -> Self {
        Self {
            site,
            on_invalid: OnInvalid::Skip,
            attach_language: true,
        }
    }

    /// Set the validation failure policy.
    pub fn on_invalid(mut self, on_invalid: OnInvalid) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    /// Set whether to attach `inLanguage`.
    pub fn attach_language(mut self, attach: bool) -> Self {
        self.attach_language = attach;
        self
    }

    /// Build a node of type `ty` from `fields`.
    ///
    /// In `Error` mode the first failed check aborts with
    /// [`Error::Invalid`](crate::Error::Invalid). In `Skip` mode offending
    /// properties are stripped and one message per failure lands in `diag`.
    pub fn build(&self, ty: &SchemaType, fields: &Fields<'_>, diag: &mut Diagnostics) -> Result<Node> {
        tracing::debug!(schema_type = %ty, "building structured data node");

        let mut reporter = Reporter::new(self.on_invalid, diag);
        let mut node = self.extract(ty, fields, &mut reporter)?;
        self.add_language(&mut node);
        validate::validate(&mut node, ty, &mut reporter)?;
        Ok(node)
    }

    /// Validate an already-assembled node without re-normalizing it.
    ///
    /// Attaches `inLanguage` when enabled, then runs the required-property
    /// and format checks for the node's `@type`. Nodes without a usable
    /// `@type` are left alone apart from the language tag.
    pub fn check(&self, node: &mut Node, diag: &mut Diagnostics) -> Result<()> {
        self.add_language(node);

        let Some(ty) = node.type_name().map(SchemaType::parse) else {
            return Ok(());
        };
        let mut reporter = Reporter::new(self.on_invalid, diag);
        validate::validate(node, &ty, &mut reporter)
    }

    fn add_language(&self, node: &mut Node) {
        if self.attach_language && node.get("inLanguage").is_none_or(Value::is_null) {
            node.insert("inLanguage", Value::String(self.site.language_tag()));
        }
    }

    fn site_name(&self) -> Option<Value> {
        self.site.site_name.clone().map(Value::String)
    }

    /// Dispatch to the extraction function of `ty`.
    fn extract(&self, ty: &SchemaType, f: &Fields<'_>, r: &mut Reporter) -> Result<Node> {
        let mut w = NodeWriter::new(ty);
        let site_name = self.site_name();

        match ty {
            SchemaType::Product => product(&mut w, ProductInput::from_fields(f), site_name, r)?,
            SchemaType::Article | SchemaType::NewsArticle | SchemaType::BlogPosting => {
                article(&mut w, ArticleInput::from_fields(f))
            }
            SchemaType::BreadcrumbList => breadcrumb_list(&mut w, ListInput::from_fields(f)),
            SchemaType::Event => event(&mut w, EventInput::from_fields(f), r)?,
            SchemaType::FaqPage => faq_page(&mut w, FaqInput::from_fields(f)),
            SchemaType::HowTo => how_to(&mut w, HowToInput::from_fields(f)),
            SchemaType::LocalBusiness => {
                local_business(&mut w, LocalBusinessInput::from_fields(f), site_name)
            }
            SchemaType::VideoObject => video_object(&mut w, VideoInput::from_fields(f)),
            SchemaType::Recipe => recipe(&mut w, RecipeInput::from_fields(f), r)?,
            SchemaType::SoftwareApplication => {
                software_application(&mut w, SoftwareInput::from_fields(f), r)?
            }
            SchemaType::JobPosting => job_posting(&mut w, JobPostingInput::from_fields(f)),
            SchemaType::ItemList => item_list(&mut w, ListInput::from_fields(f)),
            SchemaType::ImageObject => image_object(&mut w, ImageInput::from_fields(f)),
            SchemaType::WebSite => web_site(&mut w, WebSiteInput::from_fields(f), site_name),
            SchemaType::WebPage => web_page(&mut w, WebPageInput::from_fields(f)),
            SchemaType::Organization
            | SchemaType::Person
            | SchemaType::Course
            | SchemaType::Review
            | SchemaType::AudioObject
            | SchemaType::Book
            | SchemaType::Dataset
            | SchemaType::Service
            | SchemaType::Other(_) => {
                organization(&mut w, OrganizationInput::from_fields(f), site_name)
            }
        }

        Ok(w.finish())
    }
}

fn cloned(v: Option<&Value>) -> Option<Value> {
    v.cloned()
}

fn product(
    w: &mut NodeWriter,
    d: ProductInput<'_>,
    site_name: Option<Value>,
    r: &mut Reporter,
) -> Result<()> {
    w.add("name", cloned(d.name).or(site_name))
        .add("description", cloned(d.description))
        .add("image", Some(normalize::images(d.image)))
        .add("sku", cloned(d.sku))
        .add("brand", normalize::brand(d.brand));
    if d.offers.is_some_and(|o| !is_blank(o)) {
        w.add("offers", Some(normalize::offers(d.offers, r)?));
    }
    if d.aggregate_rating.is_some_and(|a| !is_blank(a)) {
        w.add("aggregateRating", normalize::aggregate_rating(d.aggregate_rating, r)?);
    }
    Ok(())
}

fn article(w: &mut NodeWriter, d: ArticleInput<'_>) {
    w.add("headline", cloned(d.headline))
        .add("description", cloned(d.description))
        .add("image", Some(normalize::images(d.image)))
        .add("datePublished", cloned(d.date_published))
        .add("dateModified", cloned(d.date_modified))
        .add("author", normalize::person_or_org(d.author, RefKind::Person))
        .add(
            "publisher",
            normalize::person_or_org(d.publisher, RefKind::Organization),
        )
        .add("mainEntityOfPage", cloned(d.main_entity_of_page));
}

fn breadcrumb_list(w: &mut NodeWriter, d: ListInput<'_>) {
    w.add(
        "itemListElement",
        Some(normalize::list_items(&d.items, ListLink::Item)),
    );
}

fn event(w: &mut NodeWriter, d: EventInput<'_>, r: &mut Reporter) -> Result<()> {
    w.add("name", cloned(d.name))
        .add("startDate", cloned(d.start_date))
        .add("endDate", cloned(d.end_date))
        .add("eventStatus", cloned(d.event_status))
        .add("eventAttendanceMode", cloned(d.event_attendance_mode))
        .add("location", cloned(d.location))
        .add("image", Some(normalize::images(d.image)))
        .add("description", cloned(d.description));
    if d.offers.is_some_and(|o| !is_blank(o)) {
        w.add("offers", Some(normalize::offers(d.offers, r)?));
    }
    w.add(
        "organizer",
        normalize::person_or_org(d.organizer, RefKind::Organization),
    )
    .add(
        "performer",
        normalize::person_or_org(d.performer, RefKind::Person),
    );
    Ok(())
}

fn faq_page(w: &mut NodeWriter, d: FaqInput<'_>) {
    w.add("mainEntity", Some(normalize::faq_entries(&d.faqs)));
}

fn how_to(w: &mut NodeWriter, d: HowToInput<'_>) {
    w.add("name", cloned(d.name))
        .add("description", cloned(d.description))
        .add("image", Some(normalize::images(d.image)))
        .add("totalTime", cloned(d.total_time))
        .add("tool", cloned(d.tool))
        .add("supply", cloned(d.supply))
        .add("step", cloned(d.step));
}

fn local_business(w: &mut NodeWriter, d: LocalBusinessInput<'_>, site_name: Option<Value>) {
    w.add("name", cloned(d.name).or(site_name))
        .add("image", Some(normalize::images(d.image)))
        .add("url", cloned(d.url))
        .add("telephone", cloned(d.telephone))
        .add("address", cloned(d.address))
        .add("geo", cloned(d.geo))
        .add("openingHours", cloned(d.opening_hours))
        .add("sameAs", cloned(d.same_as));
}

fn video_object(w: &mut NodeWriter, d: VideoInput<'_>) {
    w.add("name", cloned(d.name))
        .add("description", cloned(d.description))
        .add("thumbnailUrl", Some(normalize::images(d.thumbnail_url)))
        .add("uploadDate", cloned(d.upload_date))
        .add("duration", cloned(d.duration))
        .add("contentUrl", cloned(d.content_url))
        .add("embedUrl", cloned(d.embed_url))
        .add(
            "publisher",
            normalize::person_or_org(d.publisher, RefKind::Organization),
        );
}

fn recipe(w: &mut NodeWriter, d: RecipeInput<'_>, r: &mut Reporter) -> Result<()> {
    w.add("name", cloned(d.name))
        .add("description", cloned(d.description))
        .add("image", Some(normalize::images(d.image)))
        .add(
            "recipeIngredient",
            Some(Value::Array(normalize::as_list(d.recipe_ingredient))),
        )
        .add(
            "recipeInstructions",
            Some(Value::Array(normalize::as_list(d.recipe_instructions))),
        );
    if d.aggregate_rating.is_some_and(|a| !is_blank(a)) {
        w.add("aggregateRating", normalize::aggregate_rating(d.aggregate_rating, r)?);
    }
    w.add("author", normalize::person_or_org(d.author, RefKind::Person))
        .add("totalTime", cloned(d.total_time));
    Ok(())
}

fn software_application(w: &mut NodeWriter, d: SoftwareInput<'_>, r: &mut Reporter) -> Result<()> {
    w.add("name", cloned(d.name))
        .add("operatingSystem", cloned(d.operating_system))
        .add("applicationCategory", cloned(d.application_category));
    if d.offers.is_some_and(|o| !is_blank(o)) {
        w.add("offers", Some(normalize::offers(d.offers, r)?));
    }
    if d.aggregate_rating.is_some_and(|a| !is_blank(a)) {
        w.add("aggregateRating", normalize::aggregate_rating(d.aggregate_rating, r)?);
    }
    Ok(())
}

fn job_posting(w: &mut NodeWriter, d: JobPostingInput<'_>) {
    w.add("title", cloned(d.title))
        .add("description", cloned(d.description))
        .add("datePosted", cloned(d.date_posted))
        .add("validThrough", cloned(d.valid_through))
        .add("employmentType", cloned(d.employment_type))
        .add(
            "hiringOrganization",
            normalize::person_or_org(d.hiring_organization, RefKind::Organization),
        )
        .add("jobLocation", cloned(d.job_location))
        .add("baseSalary", cloned(d.base_salary));
}

fn item_list(w: &mut NodeWriter, d: ListInput<'_>) {
    w.add(
        "itemListElement",
        Some(normalize::list_items(&d.items, ListLink::Url)),
    );
}

fn image_object(w: &mut NodeWriter, d: ImageInput<'_>) {
    w.add("contentUrl", cloned(d.content_url))
        .add("caption", cloned(d.caption))
        .add("width", cloned(d.width))
        .add("height", cloned(d.height));
}

fn web_site(w: &mut NodeWriter, d: WebSiteInput<'_>, site_name: Option<Value>) {
    w.add("url", cloned(d.url))
        .add("name", cloned(d.name).or(site_name));
    if let Some(target) = d.search_url.filter(|s| !is_blank(s)) {
        w.add(
            "potentialAction",
            Some(json!([{
                "@type": "SearchAction",
                "target": target,
                "query-input": "required name=query",
            }])),
        );
    }
}

fn web_page(w: &mut NodeWriter, d: WebPageInput<'_>) {
    w.add("url", cloned(d.url))
        .add("name", cloned(d.name))
        .add("isPartOf", cloned(d.is_part_of))
        .add("breadcrumb", cloned(d.breadcrumb))
        .add("primaryImageOfPage", cloned(d.primary_image_of_page));
}

fn organization(w: &mut NodeWriter, d: OrganizationInput<'_>, site_name: Option<Value>) {
    w.add("name", cloned(d.name).or(site_name))
        .add("url", cloned(d.url))
        .add("logo", cloned(d.logo))
        .add("sameAs", cloned(d.same_as))
        .add("contactPoint", cloned(d.contact_point));
}
