//! Record list commands

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use storefront_cms_app::SectionEditor;
use storefront_cms_core::types::{FieldValue, OrderedRecord, SettingsContainer};
use storefront_cms_core::MoveDirection;

use crate::{ListTarget, OutputFormat};

pub fn list<S, R>(
    editor: &SectionEditor<S, R>,
    target: &ListTarget,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    let rows = editor.rows();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text if rows.is_empty() => {
            println!("No records in {target}. Use `add {target}` to create one.");
        }
        OutputFormat::Text => {
            for row in rows {
                println!("{:>3}. {}  [{}] order={}", row.index + 1, row.label, row.id, row.order);
            }
        }
    }
    Ok(())
}

pub fn fields<S, R>(_editor: &SectionEditor<S, R>)
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    for name in R::field_names() {
        println!("{name}");
    }
}

pub async fn add<S, R>(mut editor: SectionEditor<S, R>, assignments: &[String]) -> anyhow::Result<()>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    let fields = assignments
        .iter()
        .map(|raw| {
            parse_assignment(raw).map(|(field, value)| (field.to_string(), FieldValue::parse(value)))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let id = editor
        .add_with(fields)
        .await
        .context("Record was not added")?;
    println!("{id}");
    Ok(())
}

pub async fn set<S, R>(
    mut editor: SectionEditor<S, R>,
    target: &ListTarget,
    id: &str,
    field: &str,
    value: &str,
) -> anyhow::Result<()>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    ensure_exists(&editor, target, id)?;
    editor.update_field(id, field, FieldValue::parse(value)).await?;
    Ok(())
}

pub async fn delete<S, R>(
    mut editor: SectionEditor<S, R>,
    target: &ListTarget,
    id: &str,
    yes: bool,
) -> anyhow::Result<()>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    if !editor.request_delete(id) {
        bail!("No record '{id}' in {target}");
    }

    if !yes {
        let label = editor
            .rows()
            .into_iter()
            .find(|row| row.id == id)
            .map(|row| row.label)
            .unwrap_or_default();
        if !confirm(&format!("Delete \"{label}\" from {target}?"))? {
            editor.cancel_delete();
            eprintln!("Cancelled");
            return Ok(());
        }
    }

    editor.confirm_delete(id).await?;
    Ok(())
}

pub async fn move_record<S, R>(
    mut editor: SectionEditor<S, R>,
    target: &ListTarget,
    id: &str,
    direction: MoveDirection,
) -> anyhow::Result<()>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    ensure_exists(&editor, target, id)?;
    editor.move_by_id(id, direction).await?;
    Ok(())
}

fn ensure_exists<S, R>(editor: &SectionEditor<S, R>, target: &ListTarget, id: &str) -> anyhow::Result<()>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    if editor.records().iter().any(|record| record.id() == id) {
        Ok(())
    } else {
        bail!("No record '{id}' in {target}")
    }
}

fn parse_assignment(raw: &str) -> anyhow::Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field, value)),
        _ => bail!("Expected FIELD=VALUE, got '{raw}'"),
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments() {
        assert_eq!(parse_assignment("title=Hi").unwrap(), ("title", "Hi"));
        assert_eq!(parse_assignment("answer=a=b").unwrap(), ("answer", "a=b"));
        assert_eq!(parse_assignment("subtitle=").unwrap(), ("subtitle", ""));
        assert!(parse_assignment("=x").is_err());
        assert!(parse_assignment("title").is_err());
    }
}
