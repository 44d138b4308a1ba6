//! Settings containers: one serializable document per configurable page section

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::content::{ClientLogo, FaqItem, ProductImage, Stat, Step, Testimonial};

/// Storage key of the homepage document
pub const HOMEPAGE_SETTINGS_KEY: &str = "homepageSettings";

/// Storage key of the FAQ document
pub const FAQ_SETTINGS_KEY: &str = "faqSettings";

/// Prefix of per-product gallery keys
pub const PRODUCT_GALLERY_KEY_PREFIX: &str = "productGallery:";

/// Storage key of one product's image gallery (format: `productGallery:<product_id>`)
#[must_use]
pub fn product_gallery_key(product_id: &str) -> String {
    format!("{PRODUCT_GALLERY_KEY_PREFIX}{product_id}")
}

/// Anything that can be stored as a whole settings document
///
/// Containers are replaced wholesale on every change, never mutated in place.
pub trait SettingsContainer:
    Serialize + DeserializeOwned + Clone + Default + fmt::Debug + PartialEq + Send + Sync + 'static
{
}

impl<T> SettingsContainer for T where
    T: Serialize
        + DeserializeOwned
        + Clone
        + Default
        + fmt::Debug
        + PartialEq
        + Send
        + Sync
        + 'static
{
}

/// Names one record list inside a container
///
/// `replace` returns a new container with only that list swapped; every other field is
/// carried over from the previous value.
pub struct ListBinding<S, R> {
    pub name: &'static str,
    get: fn(&S) -> &[R],
    replace: fn(&S, Vec<R>) -> S,
}

impl<S, R> ListBinding<S, R> {
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&S) -> &[R], replace: fn(&S, Vec<R>) -> S) -> Self {
        Self { name, get, replace }
    }

    /// Records of the list, in stored (not necessarily display) order
    pub fn records<'a>(&self, settings: &'a S) -> &'a [R] {
        (self.get)(settings)
    }

    /// New container with the list replaced
    #[must_use]
    pub fn replace(&self, settings: &S, records: Vec<R>) -> S {
        (self.replace)(settings, records)
    }
}

impl<S, R> Clone for ListBinding<S, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, R> Copy for ListBinding<S, R> {}

impl<S, R> fmt::Debug for ListBinding<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBinding").field("name", &self.name).finish()
    }
}

/// Names one `enabled` gate inside a container
pub struct SectionToggle<S> {
    pub name: &'static str,
    get: fn(&S) -> bool,
    set: fn(&S, bool) -> S,
}

impl<S> SectionToggle<S> {
    #[must_use]
    pub const fn new(name: &'static str, get: fn(&S) -> bool, set: fn(&S, bool) -> S) -> Self {
        Self { name, get, set }
    }

    pub fn is_enabled(&self, settings: &S) -> bool {
        (self.get)(settings)
    }

    #[must_use]
    pub fn set(&self, settings: &S, enabled: bool) -> S {
        (self.set)(settings, enabled)
    }
}

impl<S> Clone for SectionToggle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SectionToggle<S> {}

impl<S> fmt::Debug for SectionToggle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionToggle")
            .field("name", &self.name)
            .finish()
    }
}

// ===== Homepage =====

/// Hero banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSection {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_link: String,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: String::new(),
            subtitle: String::new(),
            cta_text: String::new(),
            cta_link: String::new(),
        }
    }
}

/// "How it works" section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepsSection {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub steps: Vec<Step>,
}

impl Default for StepsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "How it works".to_string(),
            subtitle: String::new(),
            steps: Vec::new(),
        }
    }
}

/// Testimonials carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialsSection {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub items: Vec<Testimonial>,
}

impl Default for TestimonialsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "What our clients say".to_string(),
            subtitle: String::new(),
            items: Vec::new(),
        }
    }
}

/// Headline numbers strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSection {
    pub enabled: bool,
    pub title: String,
    pub items: Vec<Stat>,
}

impl Default for StatsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: String::new(),
            items: Vec::new(),
        }
    }
}

/// Client logo strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogosSection {
    pub enabled: bool,
    pub title: String,
    pub logos: Vec<ClientLogo>,
}

impl Default for LogosSection {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Trusted by".to_string(),
            logos: Vec::new(),
        }
    }
}

/// Whole homepage configuration, stored under `homepageSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomepageSettings {
    pub hero: HeroSection,
    pub how_it_works: StepsSection,
    pub testimonials: TestimonialsSection,
    pub stats: StatsSection,
    pub clients: LogosSection,
}

fn homepage_steps(s: &HomepageSettings) -> &[Step] {
    &s.how_it_works.steps
}

fn replace_homepage_steps(s: &HomepageSettings, steps: Vec<Step>) -> HomepageSettings {
    let mut next = s.clone();
    next.how_it_works.steps = steps;
    next
}

fn homepage_testimonials(s: &HomepageSettings) -> &[Testimonial] {
    &s.testimonials.items
}

fn replace_homepage_testimonials(
    s: &HomepageSettings,
    items: Vec<Testimonial>,
) -> HomepageSettings {
    let mut next = s.clone();
    next.testimonials.items = items;
    next
}

fn homepage_stats(s: &HomepageSettings) -> &[Stat] {
    &s.stats.items
}

fn replace_homepage_stats(s: &HomepageSettings, items: Vec<Stat>) -> HomepageSettings {
    let mut next = s.clone();
    next.stats.items = items;
    next
}

fn homepage_logos(s: &HomepageSettings) -> &[ClientLogo] {
    &s.clients.logos
}

fn replace_homepage_logos(s: &HomepageSettings, logos: Vec<ClientLogo>) -> HomepageSettings {
    let mut next = s.clone();
    next.clients.logos = logos;
    next
}

impl HomepageSettings {
    pub const STEPS: ListBinding<Self, Step> =
        ListBinding::new("howItWorks.steps", homepage_steps, replace_homepage_steps);
    pub const TESTIMONIALS: ListBinding<Self, Testimonial> = ListBinding::new(
        "testimonials.items",
        homepage_testimonials,
        replace_homepage_testimonials,
    );
    pub const STATS: ListBinding<Self, Stat> =
        ListBinding::new("stats.items", homepage_stats, replace_homepage_stats);
    pub const LOGOS: ListBinding<Self, ClientLogo> =
        ListBinding::new("clients.logos", homepage_logos, replace_homepage_logos);

    pub const HERO_ENABLED: SectionToggle<Self> = SectionToggle::new(
        "hero",
        |s| s.hero.enabled,
        |s, enabled| {
            let mut next = s.clone();
            next.hero.enabled = enabled;
            next
        },
    );
    pub const STEPS_ENABLED: SectionToggle<Self> = SectionToggle::new(
        "howItWorks",
        |s| s.how_it_works.enabled,
        |s, enabled| {
            let mut next = s.clone();
            next.how_it_works.enabled = enabled;
            next
        },
    );
    pub const TESTIMONIALS_ENABLED: SectionToggle<Self> = SectionToggle::new(
        "testimonials",
        |s| s.testimonials.enabled,
        |s, enabled| {
            let mut next = s.clone();
            next.testimonials.enabled = enabled;
            next
        },
    );
    pub const STATS_ENABLED: SectionToggle<Self> = SectionToggle::new(
        "stats",
        |s| s.stats.enabled,
        |s, enabled| {
            let mut next = s.clone();
            next.stats.enabled = enabled;
            next
        },
    );
    pub const CLIENTS_ENABLED: SectionToggle<Self> = SectionToggle::new(
        "clients",
        |s| s.clients.enabled,
        |s, enabled| {
            let mut next = s.clone();
            next.clients.enabled = enabled;
            next
        },
    );

    /// All section gates, in page order
    #[must_use]
    pub fn toggles() -> [SectionToggle<Self>; 5] {
        [
            Self::HERO_ENABLED,
            Self::STEPS_ENABLED,
            Self::TESTIMONIALS_ENABLED,
            Self::STATS_ENABLED,
            Self::CLIENTS_ENABLED,
        ]
    }
}

// ===== FAQ =====

/// FAQ page configuration, stored under `faqSettings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqSettings {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub contact_email: String,
    pub items: Vec<FaqItem>,
}

impl Default for FaqSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Frequently asked questions".to_string(),
            subtitle: String::new(),
            contact_email: String::new(),
            items: Vec::new(),
        }
    }
}

fn faq_items(s: &FaqSettings) -> &[FaqItem] {
    &s.items
}

fn replace_faq_items(s: &FaqSettings, items: Vec<FaqItem>) -> FaqSettings {
    FaqSettings {
        items,
        ..s.clone()
    }
}

impl FaqSettings {
    pub const ITEMS: ListBinding<Self, FaqItem> =
        ListBinding::new("items", faq_items, replace_faq_items);

    pub const ENABLED: SectionToggle<Self> = SectionToggle::new(
        "faq",
        |s| s.enabled,
        |s, enabled| FaqSettings {
            enabled,
            ..s.clone()
        },
    );
}

// ===== Product gallery =====

/// Image list of one product, stored under `productGallery:<product_id>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductGallery {
    pub product_id: String,
    pub images: Vec<ProductImage>,
}

fn gallery_images(s: &ProductGallery) -> &[ProductImage] {
    &s.images
}

fn replace_gallery_images(s: &ProductGallery, images: Vec<ProductImage>) -> ProductGallery {
    ProductGallery {
        product_id: s.product_id.clone(),
        images,
    }
}

impl ProductGallery {
    pub const IMAGES: ListBinding<Self, ProductImage> =
        ListBinding::new("images", gallery_images, replace_gallery_images);

    #[must_use]
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            images: Vec::new(),
        }
    }

    /// The image flagged primary, falling back to the first in display order
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.iter().min_by_key(|img| img.order))
    }
}
