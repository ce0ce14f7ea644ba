//! Lenient per-type input structs
//!
//! Each struct resolves the fallback chain of every property once, at the
//! boundary, so the builders never look at raw keys. A property is `None`
//! when none of its keys is given (see [`Fields`]). Values keep whatever
//! shape the caller supplied; the builders normalize them.

use serde_json::Value;

use crate::fields::Fields;

type Field<'a> = Option<&'a Value>;

/// Product input.
///
/// `name` falls back to the configured site name in the builder.
#[derive(Debug, Default)]
pub struct ProductInput<'a> {
    pub name: Field<'a>,
    pub description: Field<'a>,
    pub image: Field<'a>,
    pub sku: Field<'a>,
    pub brand: Field<'a>,
    pub offers: Field<'a>,
    pub aggregate_rating: Field<'a>,
}

impl<'a> ProductInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            description: f.get("description"),
            image: f.get("image"),
            sku: f.get("sku"),
            brand: f.get("brand"),
            offers: f.get("offers"),
            aggregate_rating: f.get("aggregateRating"),
        }
    }
}

/// Article, NewsArticle and BlogPosting input.
///
/// - `headline`: `headline`, then `title`
/// - `main_entity_of_page`: `url`, then `mainEntityOfPage`
#[derive(Debug, Default)]
pub struct ArticleInput<'a> {
    pub headline: Field<'a>,
    pub description: Field<'a>,
    pub image: Field<'a>,
    pub date_published: Field<'a>,
    pub date_modified: Field<'a>,
    pub author: Field<'a>,
    pub publisher: Field<'a>,
    pub main_entity_of_page: Field<'a>,
}

impl<'a> ArticleInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            headline: f.first(&["headline", "title"]),
            description: f.get("description"),
            image: f.get("image"),
            date_published: f.get("datePublished"),
            date_modified: f.get("dateModified"),
            author: f.get("author"),
            publisher: f.get("publisher"),
            main_entity_of_page: f.first(&["url", "mainEntityOfPage"]),
        }
    }
}

/// BreadcrumbList and ItemList input: the `items` list.
#[derive(Debug, Default)]
pub struct ListInput<'a> {
    pub items: Vec<&'a Value>,
}

impl<'a> ListInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            items: f.list("items"),
        }
    }
}

/// Event input.
#[derive(Debug, Default)]
pub struct EventInput<'a> {
    pub name: Field<'a>,
    pub start_date: Field<'a>,
    pub end_date: Field<'a>,
    pub event_status: Field<'a>,
    pub event_attendance_mode: Field<'a>,
    pub location: Field<'a>,
    pub image: Field<'a>,
    pub description: Field<'a>,
    pub offers: Field<'a>,
    pub organizer: Field<'a>,
    pub performer: Field<'a>,
}

impl<'a> EventInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            start_date: f.get("startDate"),
            end_date: f.get("endDate"),
            event_status: f.get("eventStatus"),
            event_attendance_mode: f.get("eventAttendanceMode"),
            location: f.get("location"),
            image: f.get("image"),
            description: f.get("description"),
            offers: f.get("offers"),
            organizer: f.get("organizer"),
            performer: f.get("performer"),
        }
    }
}

/// FAQPage input: the `faqs` list of `{question, answer}` objects.
#[derive(Debug, Default)]
pub struct FaqInput<'a> {
    pub faqs: Vec<&'a Value>,
}

impl<'a> FaqInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            faqs: f.list("faqs"),
        }
    }
}

/// HowTo input.
#[derive(Debug, Default)]
pub struct HowToInput<'a> {
    pub name: Field<'a>,
    pub description: Field<'a>,
    pub image: Field<'a>,
    pub total_time: Field<'a>,
    pub tool: Field<'a>,
    pub supply: Field<'a>,
    pub step: Field<'a>,
}

impl<'a> HowToInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            description: f.get("description"),
            image: f.get("image"),
            total_time: f.get("totalTime"),
            tool: f.get("tool"),
            supply: f.get("supply"),
            step: f.get("step"),
        }
    }
}

/// LocalBusiness input. `name` falls back to the site name.
#[derive(Debug, Default)]
pub struct LocalBusinessInput<'a> {
    pub name: Field<'a>,
    pub image: Field<'a>,
    pub url: Field<'a>,
    pub telephone: Field<'a>,
    pub address: Field<'a>,
    pub geo: Field<'a>,
    pub opening_hours: Field<'a>,
    pub same_as: Field<'a>,
}

impl<'a> LocalBusinessInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            image: f.get("image"),
            url: f.get("url"),
            telephone: f.get("telephone"),
            address: f.get("address"),
            geo: f.get("geo"),
            opening_hours: f.get("openingHours"),
            same_as: f.get("sameAs"),
        }
    }
}

/// VideoObject input.
#[derive(Debug, Default)]
pub struct VideoInput<'a> {
    pub name: Field<'a>,
    pub description: Field<'a>,
    pub thumbnail_url: Field<'a>,
    pub upload_date: Field<'a>,
    pub duration: Field<'a>,
    pub content_url: Field<'a>,
    pub embed_url: Field<'a>,
    pub publisher: Field<'a>,
}

impl<'a> VideoInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            description: f.get("description"),
            thumbnail_url: f.get("thumbnailUrl"),
            upload_date: f.get("uploadDate"),
            duration: f.get("duration"),
            content_url: f.get("contentUrl"),
            embed_url: f.get("embedUrl"),
            publisher: f.get("publisher"),
        }
    }
}

/// Recipe input.
#[derive(Debug, Default)]
pub struct RecipeInput<'a> {
    pub name: Field<'a>,
    pub description: Field<'a>,
    pub image: Field<'a>,
    pub recipe_ingredient: Field<'a>,
    pub recipe_instructions: Field<'a>,
    pub aggregate_rating: Field<'a>,
    pub author: Field<'a>,
    pub total_time: Field<'a>,
}

impl<'a> RecipeInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            description: f.get("description"),
            image: f.get("image"),
            recipe_ingredient: f.get("recipeIngredient"),
            recipe_instructions: f.get("recipeInstructions"),
            aggregate_rating: f.get("aggregateRating"),
            author: f.get("author"),
            total_time: f.get("totalTime"),
        }
    }
}

/// SoftwareApplication input.
#[derive(Debug, Default)]
pub struct SoftwareInput<'a> {
    pub name: Field<'a>,
    pub operating_system: Field<'a>,
    pub application_category: Field<'a>,
    pub offers: Field<'a>,
    pub aggregate_rating: Field<'a>,
}

impl<'a> SoftwareInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            operating_system: f.get("operatingSystem"),
            application_category: f.get("applicationCategory"),
            offers: f.get("offers"),
            aggregate_rating: f.get("aggregateRating"),
        }
    }
}

/// JobPosting input.
#[derive(Debug, Default)]
pub struct JobPostingInput<'a> {
    pub title: Field<'a>,
    pub description: Field<'a>,
    pub date_posted: Field<'a>,
    pub valid_through: Field<'a>,
    pub employment_type: Field<'a>,
    pub hiring_organization: Field<'a>,
    pub job_location: Field<'a>,
    pub base_salary: Field<'a>,
}

impl<'a> JobPostingInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            title: f.get("title"),
            description: f.get("description"),
            date_posted: f.get("datePosted"),
            valid_through: f.get("validThrough"),
            employment_type: f.get("employmentType"),
            hiring_organization: f.get("hiringOrganization"),
            job_location: f.get("jobLocation"),
            base_salary: f.get("baseSalary"),
        }
    }
}

/// ImageObject input. `content_url`: `contentUrl`, then `url`.
#[derive(Debug, Default)]
pub struct ImageInput<'a> {
    pub content_url: Field<'a>,
    pub caption: Field<'a>,
    pub width: Field<'a>,
    pub height: Field<'a>,
}

impl<'a> ImageInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            content_url: f.first(&["contentUrl", "url"]),
            caption: f.get("caption"),
            width: f.get("width"),
            height: f.get("height"),
        }
    }
}

/// WebSite input. `name` falls back to the site name.
#[derive(Debug, Default)]
pub struct WebSiteInput<'a> {
    pub url: Field<'a>,
    pub name: Field<'a>,
    pub search_url: Field<'a>,
}

impl<'a> WebSiteInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            url: f.get("url"),
            name: f.get("name"),
            search_url: f.get("searchUrl"),
        }
    }
}

/// WebPage input. `name`: `name`, then `title`.
#[derive(Debug, Default)]
pub struct WebPageInput<'a> {
    pub url: Field<'a>,
    pub name: Field<'a>,
    pub is_part_of: Field<'a>,
    pub breadcrumb: Field<'a>,
    pub primary_image_of_page: Field<'a>,
}

impl<'a> WebPageInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            url: f.get("url"),
            name: f.first(&["name", "title"]),
            is_part_of: f.get("isPartOf"),
            breadcrumb: f.get("breadcrumb"),
            primary_image_of_page: f.get("primaryImageOfPage"),
        }
    }
}

/// Organization input, also used for every type without its own shape.
/// `name` falls back to the site name.
#[derive(Debug, Default)]
pub struct OrganizationInput<'a> {
    pub name: Field<'a>,
    pub url: Field<'a>,
    pub logo: Field<'a>,
    pub same_as: Field<'a>,
    pub contact_point: Field<'a>,
}

impl<'a> OrganizationInput<'a> {
    pub fn from_fields(f: &Fields<'a>) -> Self {
        Self {
            name: f.get("name"),
            url: f.get("url"),
            logo: f.get("logo"),
            same_as: f.get("sameAs"),
            contact_point: f.get("contactPoint"),
        }
    }
}
