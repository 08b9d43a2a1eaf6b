//! Reflection journal commands.

use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, ReflectCommands};
use crate::error::QuasarError;
use crate::features::reflection::prompt_for;
use crate::output::{format_reflections, to_json};
use crate::storage::PlanStore;

/// Execute reflect subcommands.
///
/// # Errors
///
/// Returns an error for blank entries or when the store cannot be read or
/// written.
pub fn reflect(
    store: &PlanStore,
    cmd: ReflectCommands,
    today: NaiveDate,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, QuasarError> {
    match cmd {
        ReflectCommands::Add { text, image } => {
            let entry = store.add_reflection(&text.join(" "), image.as_deref(), now)?;
            match format {
                OutputFormat::Json => to_json(&entry),
                OutputFormat::Pretty => Ok(format!("Saved reflection {}", entry.id.dimmed())),
            }
        }
        ReflectCommands::List => format_reflections(&store.reflections()?, format),
        ReflectCommands::Prompt => {
            let prompt = prompt_for(today);
            match format {
                OutputFormat::Json => to_json(&json!({ "date": today, "prompt": prompt })),
                OutputFormat::Pretty => Ok(format!(
                    "{}\n  {}",
                    "Question of the day".bold(),
                    prompt.italic()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_reflect_add_joins_words() {
        let store = PlanStore::in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 21, 0, 0).unwrap();
        reflect(
            &store,
            ReflectCommands::Add { text: vec!["good".to_string(), "day".to_string()], image: None },
            day("2024-02-01"),
            now,
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(store.reflections().unwrap()[0].content, "good day");
    }

    #[test]
    fn test_reflect_add_with_image_lists_it() {
        let store = PlanStore::in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 21, 0, 0).unwrap();
        let out = reflect(
            &store,
            ReflectCommands::Add {
                text: vec!["summit".to_string()],
                image: Some("https://example.org/top.jpg".to_string()),
            },
            day("2024-02-01"),
            now,
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["imageUrl"], "https://example.org/top.jpg");

        let listed =
            reflect(&store, ReflectCommands::List, day("2024-02-01"), now, OutputFormat::Pretty).unwrap();
        assert!(listed.contains("https://example.org/top.jpg"));
    }

    #[test]
    fn test_reflect_add_blank_is_rejected() {
        let store = PlanStore::in_memory().unwrap();
        let err = reflect(
            &store,
            ReflectCommands::Add { text: vec!["  ".to_string()], image: None },
            day("2024-02-01"),
            Utc::now(),
            OutputFormat::Pretty,
        )
        .unwrap_err();
        assert!(matches!(err, QuasarError::InvalidInput(_)));
    }

    #[test]
    fn test_reflect_prompt_is_stable_for_a_day() {
        let store = PlanStore::in_memory().unwrap();
        let first = reflect(&store, ReflectCommands::Prompt, day("2024-02-01"), Utc::now(), OutputFormat::Json)
            .unwrap();
        let second = reflect(&store, ReflectCommands::Prompt, day("2024-02-01"), Utc::now(), OutputFormat::Json)
            .unwrap();
        assert_eq!(first, second);
        assert!(first.contains(prompt_for(day("2024-02-01"))));
    }
}
