//! Single- and multi-choice selection over metadata-derived options
//!
//! The [`Prompter`] trait is the seam to the interactive front end. The
//! functions in this module wrap it and guarantee that whatever comes back
//! is one of the options that was offered.

use crate::error::{Error, Result};
use crate::metadata::{check_compatibility, DependencyCatalog, SingleSelect, VersionRange};
use regex::Regex;
use std::sync::LazyLock;

static GROUP_ID_PATTERN: LazyLock<InputPattern> = LazyLock::new(|| {
    InputPattern::new(
        r"^[a-zA-Z_][\w]*(\.[a-zA-Z_][\w]*)*$",
        "Group must be dot-separated identifiers, e.g. com.example",
    )
    .expect("group id pattern is valid")
});

static ARTIFACT_ID_PATTERN: LazyLock<InputPattern> = LazyLock::new(|| {
    InputPattern::new(
        r"^[a-zA-Z_][\w-]*$",
        "Artifact must start with a letter and contain only letters, digits, '_' or '-'",
    )
    .expect("artifact id pattern is valid")
});

/// One entry in a select prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Identifier returned when this option is chosen
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Originating dependency group (display only)
    pub group: Option<String>,

    /// Extra text shown next to the label
    pub hint: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group: None,
            hint: String::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// A validation pattern for free-text input
#[derive(Debug, Clone)]
pub struct InputPattern {
    regex: Regex,
    message: &'static str,
}

impl InputPattern {
    pub fn new(pattern: &str, message: &'static str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message,
        })
    }

    /// Maven group id: dot-separated identifiers
    pub fn group_id() -> &'static InputPattern {
        &GROUP_ID_PATTERN
    }

    /// Maven artifact id
    pub fn artifact_id() -> &'static InputPattern {
        &ARTIFACT_ID_PATTERN
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Message shown when input does not match
    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// Interactive prompt provider.
///
/// Implementations return `Error::SelectionAborted` when the user cancels.
/// `input` re-prompts until the value matches `pattern`.
pub trait Prompter {
    fn select_one(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
        initial: Option<&str>,
    ) -> Result<String>;

    fn select_many(&mut self, prompt: &str, options: &[SelectOption]) -> Result<Vec<String>>;

    fn input(&mut self, prompt: &str, default: &str, pattern: Option<&InputPattern>)
        -> Result<String>;
}

fn ensure_offered(prompt: &str, options: &[SelectOption], id: &str) -> Result<()> {
    if options.iter().any(|option| option.id == id) {
        Ok(())
    } else {
        Err(Error::InvalidSelection {
            prompt: prompt.to_string(),
            id: id.to_string(),
        })
    }
}

/// Ask for exactly one of `options`
pub fn select_single<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    options: &[SelectOption],
    initial: Option<&str>,
) -> Result<String> {
    if options.is_empty() {
        return Err(Error::NoOptions {
            prompt: prompt.to_string(),
        });
    }

    let initial = initial.filter(|id| options.iter().any(|option| option.id == *id));
    let id = prompter.select_one(prompt, options, initial)?;
    ensure_offered(prompt, options, &id)?;

    tracing::debug!(prompt, id = %id, "single selection");
    Ok(id)
}

/// Ask for zero or more of `options`.
///
/// Ids come back in the order the user picked them; repeated ids keep their
/// first position.
pub fn select_multiple<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    options: &[SelectOption],
) -> Result<Vec<String>> {
    if options.is_empty() {
        return Ok(Vec::new());
    }

    let mut selected: Vec<String> = Vec::new();
    for id in prompter.select_many(prompt, options)? {
        ensure_offered(prompt, options, &id)?;
        if !selected.contains(&id) {
            selected.push(id);
        }
    }

    tracing::debug!(prompt, count = selected.len(), "multiple selection");
    Ok(selected)
}

/// Build a multi-selection one pick at a time, so the result follows pick order.
///
/// `pick` is shown the options not chosen yet along with the ids chosen so
/// far, and returns the index of the next pick or `None` once the user is done.
pub fn collect_picks<F>(
    prompt: &str,
    options: &[SelectOption],
    mut pick: F,
) -> Result<Vec<String>>
where
    F: FnMut(&[&SelectOption], &[String]) -> Result<Option<usize>>,
{
    let mut chosen: Vec<String> = Vec::new();
    loop {
        let remaining: Vec<&SelectOption> = options
            .iter()
            .filter(|option| !chosen.contains(&option.id))
            .collect();
        if remaining.is_empty() {
            break;
        }

        let Some(idx) = pick(&remaining, &chosen)? else {
            break;
        };
        let option = remaining.get(idx).ok_or_else(|| Error::InvalidSelection {
            prompt: prompt.to_string(),
            id: idx.to_string(),
        })?;
        chosen.push(option.id.clone());
    }
    Ok(chosen)
}

/// Ask for free text. Blank input falls back to `default`.
pub fn input_text<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    default: &str,
    pattern: Option<&InputPattern>,
) -> Result<String> {
    let value = prompter.input(prompt, default, pattern)?;
    let value = if value.trim().is_empty() {
        default.to_string()
    } else {
        value.trim().to_string()
    };

    if let Some(pattern) = pattern {
        if !pattern.is_match(&value) {
            return Err(Error::InvalidSelection {
                prompt: prompt.to_string(),
                id: value,
            });
        }
    }
    Ok(value)
}

/// Options for a single-select metadata list
pub fn choice_options(list: &SingleSelect) -> Vec<SelectOption> {
    list.values
        .iter()
        .map(|choice| {
            SelectOption::new(&choice.id, &choice.name)
                .with_hint(choice.description.clone().unwrap_or_default())
        })
        .collect()
}

/// Flat dependency options without group tags
pub fn dependency_options(catalog: &DependencyCatalog) -> Vec<SelectOption> {
    catalog
        .entries()
        .map(|(_, entry)| SelectOption::new(&entry.id, &entry.name))
        .collect()
}

/// Flat dependency options tagged with their group.
///
/// With a boot version, entries whose `versionRange` excludes it stay in
/// the list but carry the required range as their hint.
pub fn grouped_dependency_options(
    catalog: &DependencyCatalog,
    boot_version: Option<&str>,
) -> Vec<SelectOption> {
    catalog
        .entries()
        .map(|(group, entry)| {
            let option = SelectOption::new(&entry.id, &entry.name).with_group(&group.name);
            match (entry.version_range.as_deref(), boot_version) {
                (Some(range), Some(version)) => {
                    if check_compatibility(range, version) == Some(false) {
                        let required = VersionRange::parse(range)
                            .map(|r| r.to_string())
                            .unwrap_or_else(|| range.to_string());
                        option.with_hint(format!("requires Spring Boot {}", required))
                    } else {
                        option
                    }
                }
                _ => option,
            }
        })
        .collect()
}
