//! Schema.org type registry

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A Schema.org type understood by the structured-data builder.
///
/// Parsing never fails: names outside the registry become [`SchemaType::Other`]
/// and are built with the Organization-like default shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SchemaType {
    #[default]
    Organization,
    LocalBusiness,
    Person,
    Product,
    Article,
    NewsArticle,
    BlogPosting,
    BreadcrumbList,
    Event,
    Recipe,
    VideoObject,
    FaqPage,
    HowTo,
    WebSite,
    WebPage,
    SoftwareApplication,
    JobPosting,
    Course,
    Review,
    ItemList,
    ImageObject,
    AudioObject,
    Book,
    Dataset,
    Service,
    /// Any other type name, emitted verbatim as `@type`
    Other(String),
}

static KNOWN: [SchemaType; 25] = [
    SchemaType::Organization,
    SchemaType::LocalBusiness,
    SchemaType::Person,
    SchemaType::Product,
    SchemaType::Article,
    SchemaType::NewsArticle,
    SchemaType::BlogPosting,
    SchemaType::BreadcrumbList,
    SchemaType::Event,
    SchemaType::Recipe,
    SchemaType::VideoObject,
    SchemaType::FaqPage,
    SchemaType::HowTo,
    SchemaType::WebSite,
    SchemaType::WebPage,
    SchemaType::SoftwareApplication,
    SchemaType::JobPosting,
    SchemaType::Course,
    SchemaType::Review,
    SchemaType::ItemList,
    SchemaType::ImageObject,
    SchemaType::AudioObject,
    SchemaType::Book,
    SchemaType::Dataset,
    SchemaType::Service,
];

impl SchemaType {
    /// All registered types, excluding [`SchemaType::Other`].
    pub fn known() -> &'static [SchemaType] {
        &KNOWN
    }

    /// Parse a type name. Unknown names become [`SchemaType::Other`].
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        KNOWN
            .iter()
            .find(|t| t.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Self::Other(name.to_string()))
    }

    /// The Schema.org name used as `@type`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Organization => "Organization",
            Self::LocalBusiness => "LocalBusiness",
            Self::Person => "Person",
            Self::Product => "Product",
            Self::Article => "Article",
            Self::NewsArticle => "NewsArticle",
            Self::BlogPosting => "BlogPosting",
            Self::BreadcrumbList => "BreadcrumbList",
            Self::Event => "Event",
            Self::Recipe => "Recipe",
            Self::VideoObject => "VideoObject",
            Self::FaqPage => "FAQPage",
            Self::HowTo => "HowTo",
            Self::WebSite => "WebSite",
            Self::WebPage => "WebPage",
            Self::SoftwareApplication => "SoftwareApplication",
            Self::JobPosting => "JobPosting",
            Self::Course => "Course",
            Self::Review => "Review",
            Self::ItemList => "ItemList",
            Self::ImageObject => "ImageObject",
            Self::AudioObject => "AudioObject",
            Self::Book => "Book",
            Self::Dataset => "Dataset",
            Self::Service => "Service",
            Self::Other(name) => name,
        }
    }

    /// Properties a node of this type must carry.
    pub fn required_properties(&self) -> &'static [&'static str] {
        match self {
            Self::Product => &["name", "offers"],
            Self::Article | Self::NewsArticle | Self::BlogPosting => &["headline"],
            Self::BreadcrumbList | Self::ItemList => &["itemListElement"],
            Self::Event => &["name", "startDate", "location"],
            Self::FaqPage => &["mainEntity"],
            Self::HowTo => &["name", "step"],
            Self::LocalBusiness => &["name", "address"],
            Self::VideoObject => &["name", "thumbnailUrl", "uploadDate"],
            Self::Recipe => &["name", "recipeIngredient", "recipeInstructions"],
            Self::SoftwareApplication => &["name", "operatingSystem"],
            Self::JobPosting => &["title", "hiringOrganization", "jobLocation"],
            Self::ImageObject => &["contentUrl"],
            Self::WebSite | Self::WebPage => &["url", "name"],
            Self::Organization => &["name"],
            _ => &[],
        }
    }

    /// Whether this is one of the article family (Article, NewsArticle, BlogPosting).
    pub fn is_article(&self) -> bool {
        matches!(self, Self::Article | Self::NewsArticle | Self::BlogPosting)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SchemaType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for SchemaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchemaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
