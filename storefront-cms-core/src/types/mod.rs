//! 类型定义模块

mod content;
mod record;
mod settings;

pub use content::{ClientLogo, FaqItem, ProductImage, Stat, Step, Testimonial};
pub use record::{FieldValue, OrderedRecord};
pub use settings::{
    product_gallery_key, FaqSettings, HeroSection, HomepageSettings, ListBinding, LogosSection,
    ProductGallery, SectionToggle, SettingsContainer, StatsSection, StepsSection,
    TestimonialsSection, FAQ_SETTINGS_KEY, HOMEPAGE_SETTINGS_KEY, PRODUCT_GALLERY_KEY_PREFIX,
};
