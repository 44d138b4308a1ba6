//! Concrete record kinds edited in the back office

use serde::{Deserialize, Serialize};

use super::record::{unknown_field, FieldValue, OrderedRecord};
use crate::error::CoreResult;

fn default_true() -> bool {
    true
}

// ===== Step =====

/// "How it works" step on the homepage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Icon identifier from the site's icon set
    #[serde(default)]
    pub icon: String,
}

impl OrderedRecord for Step {
    fn kind() -> &'static str {
        "step"
    }

    fn create(id: String, order: u32) -> Self {
        Self {
            id,
            order,
            title: "New step".to_string(),
            description: String::new(),
            icon: "sparkles".to_string(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn field_names() -> &'static [&'static str] {
        &["title", "description", "icon"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some(self.title.clone().into()),
            "description" => Some(self.description.clone().into()),
            "icon" => Some(self.icon.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()> {
        match name {
            "title" => self.title = value.into_text(),
            "description" => self.description = value.into_text(),
            "icon" => self.icon = value.into_text(),
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

// ===== Testimonial =====

/// Customer quote shown in the testimonials carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub quote: String,
    /// Image reference (URL or media library path)
    #[serde(default)]
    pub avatar: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl OrderedRecord for Testimonial {
    fn kind() -> &'static str {
        "testimonial"
    }

    fn create(id: String, order: u32) -> Self {
        Self {
            id,
            order,
            name: "New testimonial".to_string(),
            role: String::new(),
            company: String::new(),
            quote: String::new(),
            avatar: String::new(),
            enabled: true,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn field_names() -> &'static [&'static str] {
        &["name", "role", "company", "quote", "avatar", "enabled"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(self.name.clone().into()),
            "role" => Some(self.role.clone().into()),
            "company" => Some(self.company.clone().into()),
            "quote" => Some(self.quote.clone().into()),
            "avatar" => Some(self.avatar.clone().into()),
            "enabled" => Some(self.enabled.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()> {
        match name {
            "name" => self.name = value.into_text(),
            "role" => self.role = value.into_text(),
            "company" => self.company = value.into_text(),
            "quote" => self.quote = value.into_text(),
            "avatar" => self.avatar = value.into_text(),
            "enabled" => self.enabled = value.into_flag(name)?,
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        if self.company.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.company)
        }
    }
}

// ===== Stat =====

/// Headline number ("500+ clients")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub id: String,
    pub order: u32,
    /// Kept as text so values like "24/7" survive
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub suffix: String,
}

impl OrderedRecord for Stat {
    fn kind() -> &'static str {
        "stat"
    }

    fn create(id: String, order: u32) -> Self {
        Self {
            id,
            order,
            value: "0".to_string(),
            label: "New stat".to_string(),
            suffix: String::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn field_names() -> &'static [&'static str] {
        &["value", "label", "suffix"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "value" => Some(self.value.clone().into()),
            "label" => Some(self.label.clone().into()),
            "suffix" => Some(self.suffix.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()> {
        match name {
            "value" => self.value = value.into_text(),
            "label" => self.label = value.into_text(),
            "suffix" => self.suffix = value.into_text(),
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        format!("{}{} {}", self.value, self.suffix, self.label)
    }
}

// ===== ClientLogo =====

/// Partner / client logo strip entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLogo {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub url: String,
}

impl OrderedRecord for ClientLogo {
    fn kind() -> &'static str {
        "clientLogo"
    }

    fn create(id: String, order: u32) -> Self {
        Self {
            id,
            order,
            name: "New client".to_string(),
            image: String::new(),
            url: String::new(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn field_names() -> &'static [&'static str] {
        &["name", "image", "url"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(self.name.clone().into()),
            "image" => Some(self.image.clone().into()),
            "url" => Some(self.url.clone().into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()> {
        match name {
            "name" => self.name = value.into_text(),
            "image" => self.image = value.into_text(),
            "url" => self.url = value.into_text(),
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

// ===== FaqItem =====

/// One question/answer pair on the FAQ page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl OrderedRecord for FaqItem {
    fn kind() -> &'static str {
        "faqItem"
    }

    fn create(id: String, order: u32) -> Self {
        Self {
            id,
            order,
            question: "New question".to_string(),
            answer: String::new(),
            category: "general".to_string(),
            enabled: true,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn field_names() -> &'static [&'static str] {
        &["question", "answer", "category", "enabled"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "question" => Some(self.question.clone().into()),
            "answer" => Some(self.answer.clone().into()),
            "category" => Some(self.category.clone().into()),
            "enabled" => Some(self.enabled.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()> {
        match name {
            "question" => self.question = value.into_text(),
            "answer" => self.answer = value.into_text(),
            "category" => self.category = value.into_text(),
            "enabled" => self.enabled = value.into_flag(name)?,
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        self.question.clone()
    }
}

// ===== ProductImage =====

/// Entry of a product's image gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl OrderedRecord for ProductImage {
    fn kind() -> &'static str {
        "productImage"
    }

    fn create(id: String, order: u32) -> Self {
        Self {
            id,
            order,
            url: String::new(),
            alt: String::new(),
            is_primary: false,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn field_names() -> &'static [&'static str] {
        &["url", "alt", "isPrimary"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "url" => Some(self.url.clone().into()),
            "alt" => Some(self.alt.clone().into()),
            "isPrimary" => Some(self.is_primary.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()> {
        match name {
            "url" => self.url = value.into_text(),
            "alt" => self.alt = value.into_text(),
            "isPrimary" => self.is_primary = value.into_flag(name)?,
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        if self.alt.is_empty() {
            self.url.clone()
        } else {
            self.alt.clone()
        }
    }
}
