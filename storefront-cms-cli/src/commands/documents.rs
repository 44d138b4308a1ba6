//! Whole-document commands

use anyhow::bail;
use storefront_cms_app::AppState;
use storefront_cms_core::types::{FaqSettings, HomepageSettings, OrderedRecord};

use crate::{DocumentTarget, OutputFormat};

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub async fn show(state: &AppState, target: &DocumentTarget, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let value = match target {
            DocumentTarget::Homepage => serde_json::to_value(&*state.homepage.current())?,
            DocumentTarget::Faq => serde_json::to_value(&*state.faq.current())?,
            DocumentTarget::Gallery(id) => serde_json::to_value(&*state.gallery(id).await.current())?,
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match target {
        DocumentTarget::Homepage => {
            let homepage = state.homepage.current();
            println!("Homepage");
            for toggle in HomepageSettings::toggles() {
                println!("  {:<14} {}", toggle.name, on_off(toggle.is_enabled(&homepage)));
            }
            println!("  steps          {}", homepage.how_it_works.steps.len());
            println!("  testimonials   {}", homepage.testimonials.items.len());
            println!("  stats          {}", homepage.stats.items.len());
            println!("  logos          {}", homepage.clients.logos.len());
        }
        DocumentTarget::Faq => {
            let faq = state.faq.current();
            println!("FAQ: {} ({})", faq.title, on_off(faq.enabled));
            if !faq.contact_email.is_empty() {
                println!("  contact        {}", faq.contact_email);
            }
            let published = faq.items.iter().filter(|item| item.enabled).count();
            println!("  items          {} ({published} published)", faq.items.len());
        }
        DocumentTarget::Gallery(id) => {
            let gallery = state.gallery(id).await.current();
            println!("Gallery for product {id}");
            println!("  images         {}", gallery.images.len());
            if let Some(primary) = gallery.primary_image() {
                println!("  primary        {} [{}]", primary.label(), primary.id);
            }
        }
    }
    Ok(())
}

pub async fn keys(state: &AppState, format: OutputFormat) -> anyhow::Result<()> {
    let keys = state.persistence.keys().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&keys)?),
        OutputFormat::Text => {
            for key in keys {
                println!("{key}");
            }
        }
    }
    Ok(())
}

pub async fn toggle(state: &AppState, section: &str, enabled: bool) -> anyhow::Result<()> {
    let changed = if let Some(toggle) = HomepageSettings::toggles()
        .into_iter()
        .find(|toggle| toggle.name == section)
    {
        state
            .homepage
            .update(|current| Ok(toggle.set(current, enabled)))
            .await?
    } else if section == FaqSettings::ENABLED.name {
        state
            .faq
            .update(|current| Ok(FaqSettings::ENABLED.set(current, enabled)))
            .await?
    } else {
        let known: Vec<&str> = HomepageSettings::toggles()
            .iter()
            .map(|toggle| toggle.name)
            .chain(std::iter::once(FaqSettings::ENABLED.name))
            .collect();
        bail!("Unknown section '{section}' (expected one of: {})", known.join(", "))
    };

    if !changed {
        eprintln!("Section '{section}' is already {}", on_off(enabled));
    }
    Ok(())
}
