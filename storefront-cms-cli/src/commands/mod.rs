//! Command implementations

pub mod documents;
pub mod records;

use storefront_cms_app::AppState;
use storefront_cms_core::types::HomepageSettings;

use crate::{Commands, ListTarget, OutputFormat};

/// Bind `$editor` to the `SectionEditor` for `$target` and evaluate `$body`
macro_rules! with_editor {
    ($state:expr, $target:expr, |$editor:ident| $body:expr) => {
        match $target {
            ListTarget::Steps => {
                let $editor = $state.homepage_editor(HomepageSettings::STEPS);
                $body
            }
            ListTarget::Testimonials => {
                let $editor = $state.homepage_editor(HomepageSettings::TESTIMONIALS);
                $body
            }
            ListTarget::Stats => {
                let $editor = $state.homepage_editor(HomepageSettings::STATS);
                $body
            }
            ListTarget::Logos => {
                let $editor = $state.homepage_editor(HomepageSettings::LOGOS);
                $body
            }
            ListTarget::FaqItems => {
                let $editor = $state.faq_editor();
                $body
            }
            ListTarget::Gallery(product_id) => {
                let $editor = $state.gallery_editor(product_id).await;
                $body
            }
        }
    };
}

/// Run one subcommand against an opened `AppState`
pub async fn execute(command: Commands, state: &AppState, format: OutputFormat) -> anyhow::Result<()> {
    match command {
        Commands::Show { document } => documents::show(state, &document, format).await,
        Commands::Keys => documents::keys(state, format).await,
        Commands::Toggle { section, state: switch } => {
            documents::toggle(state, &section, switch.enabled()).await
        }
        Commands::List { list } => {
            with_editor!(state, &list, |editor| records::list(&editor, &list, format))
        }
        Commands::Fields { list } => with_editor!(state, &list, |editor| {
            records::fields(&editor);
            Ok(())
        }),
        Commands::Add { list, fields } => {
            with_editor!(state, &list, |editor| records::add(editor, &fields).await)
        }
        Commands::Set {
            list,
            id,
            field,
            value,
        } => with_editor!(state, &list, |editor| {
            records::set(editor, &list, &id, &field, &value).await
        }),
        Commands::Delete { list, id, yes } => with_editor!(state, &list, |editor| {
            records::delete(editor, &list, &id, yes).await
        }),
        Commands::Move {
            list,
            id,
            direction,
        } => with_editor!(state, &list, |editor| {
            records::move_record(editor, &list, &id, direction).await
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront_cms_app::AppStateBuilder;
    use storefront_cms_core::traits::{InMemoryKeyValueStore, KeyValueStore};
    use storefront_cms_core::types::FAQ_SETTINGS_KEY;
    use storefront_cms_core::MoveDirection;

    use super::*;
    use crate::{DocumentTarget, Switch};

    fn memory_state() -> (AppState, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let state = AppStateBuilder::new()
            .key_value_store(store.clone())
            .build()
            .unwrap();
        (state, store)
    }

    async fn run(state: &AppState, command: Commands) -> anyhow::Result<()> {
        execute(command, state, OutputFormat::Text).await
    }

    async fn add(state: &AppState, list: ListTarget, fields: &[&str]) -> String {
        run(
            state,
            Commands::Add {
                list,
                fields: fields.iter().map(|f| (*f).to_string()).collect(),
            },
        )
        .await
        .unwrap();
        state.faq.current().items.last().map(|item| item.id.clone()).unwrap_or_default()
    }

    #[tokio::test]
    async fn list_on_empty_list_succeeds() {
        let (state, _) = memory_state();
        run(&state, Commands::List { list: ListTarget::FaqItems }).await.unwrap();
        run(&state, Commands::Fields { list: ListTarget::Logos }).await.unwrap();
        execute(
            Commands::List { list: ListTarget::Gallery("p1".to_string()) },
            &state,
            OutputFormat::Json,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn add_with_fields_then_set() {
        let (state, _) = memory_state();
        let id = add(&state, ListTarget::FaqItems, &["question=Why?", "enabled=false"]).await;

        run(
            &state,
            Commands::Set {
                list: ListTarget::FaqItems,
                id: id.clone(),
                field: "answer".to_string(),
                value: "Because.".to_string(),
            },
        )
        .await
        .unwrap();

        let faq = state.faq.current();
        assert_eq!(faq.items.len(), 1);
        assert_eq!(faq.items[0].question, "Why?");
        assert_eq!(faq.items[0].answer, "Because.");
        assert!(!faq.items[0].enabled);
        assert_eq!(state.faq.revision(), 2);
    }

    #[tokio::test]
    async fn add_with_rejected_field_leaves_store_untouched() {
        let (state, store) = memory_state();

        let result = run(
            &state,
            Commands::Add {
                list: ListTarget::FaqItems,
                fields: vec!["question=Why?".to_string(), "enabled=yes".to_string()],
            },
        )
        .await;

        assert!(result.is_err());
        assert!(state.faq.current().items.is_empty());
        assert!(store.get(FAQ_SETTINGS_KEY).await.unwrap().is_none());

        let result = run(
            &state,
            Commands::Add {
                list: ListTarget::FaqItems,
                fields: vec!["colour=red".to_string()],
            },
        )
        .await;
        assert!(result.is_err());
        assert!(state.faq.current().items.is_empty());
    }

    #[tokio::test]
    async fn add_dispatches_to_each_list() {
        let (state, _) = memory_state();
        for list in [
            ListTarget::Steps,
            ListTarget::Testimonials,
            ListTarget::Stats,
            ListTarget::Logos,
        ] {
            run(&state, Commands::Add { list, fields: Vec::new() }).await.unwrap();
        }
        run(
            &state,
            Commands::Add {
                list: ListTarget::Gallery("sku-1".to_string()),
                fields: vec!["alt=Front".to_string()],
            },
        )
        .await
        .unwrap();

        let homepage = state.homepage.current();
        assert_eq!(homepage.how_it_works.steps.len(), 1);
        assert_eq!(homepage.testimonials.items.len(), 1);
        assert_eq!(homepage.stats.items.len(), 1);
        assert_eq!(homepage.clients.logos.len(), 1);
        assert!(state.faq.current().items.is_empty());

        let gallery = state.gallery("sku-1").await.current();
        assert_eq!(gallery.images.len(), 1);
        assert_eq!(gallery.images[0].alt, "Front");
    }

    #[tokio::test]
    async fn set_and_move_reject_unknown_id() {
        let (state, _) = memory_state();
        add(&state, ListTarget::FaqItems, &[]).await;

        let err = run(
            &state,
            Commands::Set {
                list: ListTarget::FaqItems,
                id: "missing".to_string(),
                field: "question".to_string(),
                value: "x".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("missing"));

        let err = run(
            &state,
            Commands::Move {
                list: ListTarget::FaqItems,
                id: "missing".to_string(),
                direction: MoveDirection::Up,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("faq.items"));
        assert_eq!(state.faq.revision(), 1);
    }

    #[tokio::test]
    async fn move_reorders_records() {
        let (state, _) = memory_state();
        let first = add(&state, ListTarget::FaqItems, &["question=First"]).await;
        let second = add(&state, ListTarget::FaqItems, &["question=Second"]).await;

        run(
            &state,
            Commands::Move {
                list: ListTarget::FaqItems,
                id: second.clone(),
                direction: MoveDirection::Up,
            },
        )
        .await
        .unwrap();

        let editor = state.faq_editor();
        let ids: Vec<String> = editor.rows().into_iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn delete_with_yes_skips_prompt() {
        let (state, _) = memory_state();
        let keep = add(&state, ListTarget::FaqItems, &["question=Keep"]).await;
        let gone = add(&state, ListTarget::FaqItems, &["question=Drop"]).await;

        run(
            &state,
            Commands::Delete {
                list: ListTarget::FaqItems,
                id: gone.clone(),
                yes: true,
            },
        )
        .await
        .unwrap();

        let items = &state.faq.current().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keep);

        let err = run(
            &state,
            Commands::Delete {
                list: ListTarget::FaqItems,
                id: gone,
                yes: true,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("No record"));
    }

    #[tokio::test]
    async fn toggle_sections() {
        let (state, _) = memory_state();

        run(
            &state,
            Commands::Toggle {
                section: "stats".to_string(),
                state: Switch::Off,
            },
        )
        .await
        .unwrap();
        assert!(!state.homepage.current().stats.enabled);
        assert_eq!(state.homepage.revision(), 1);

        // same state again writes nothing
        run(
            &state,
            Commands::Toggle {
                section: "stats".to_string(),
                state: Switch::Off,
            },
        )
        .await
        .unwrap();
        assert_eq!(state.homepage.revision(), 1);

        run(
            &state,
            Commands::Toggle {
                section: "faq".to_string(),
                state: Switch::Off,
            },
        )
        .await
        .unwrap();
        assert!(!state.faq.current().enabled);
    }

    #[tokio::test]
    async fn toggle_unknown_section_fails() {
        let (state, store) = memory_state();

        let err = run(
            &state,
            Commands::Toggle {
                section: "footer".to_string(),
                state: Switch::On,
            },
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("footer"));
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn show_and_keys() {
        let (state, _) = memory_state();
        add(&state, ListTarget::FaqItems, &[]).await;

        run(&state, Commands::Show { document: DocumentTarget::Homepage }).await.unwrap();
        run(&state, Commands::Show { document: DocumentTarget::Faq }).await.unwrap();
        execute(
            Commands::Show { document: DocumentTarget::Gallery("p1".to_string()) },
            &state,
            OutputFormat::Json,
        )
        .await
        .unwrap();
        run(&state, Commands::Keys).await.unwrap();
    }
}
