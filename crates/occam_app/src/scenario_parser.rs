use std::path::Path;

use anyhow::Context as _;
use occam_domain::{Error, Scenario};
use serde_json::{Map, Value};
use tracing::debug;

/// Key under which task configurations carry their Gherkin scenario.
const GHERKIN_KEY: &str = "gherkin";

/// Fields a flat scenario record must provide.
const SCENARIO_FIELDS: [&str; 5] = ["feature", "scenario", "given", "when", "then"];

/// The Given/When/Then section continuation lines attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    None,
    Given,
    When,
    Then,
}

/// Parses Gherkin scenario text.
///
/// Recognizes `Feature:`, `Scenario:`, `Given `, `When ` and `Then ` line
/// prefixes; `And ` / `But ` lines continue the most recently opened
/// Given/When/Then section. Every other line, and any continuation seen before
/// a section was opened, is ignored. Parsing is lenient and never fails:
/// unrecognized input yields a scenario with empty sections.
///
/// ```text
/// Feature: Search functionality
/// Scenario: Search for Python programming
///   Given I am on Google homepage
///   When I search for "Python programming"
///   And I click on the first result
///   Then I should see Python documentation
/// ```
pub fn parse_text(text: &str) -> Scenario {
    let mut scenario = Scenario::default();
    let mut section = Section::None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        section = parse_line(line, section, &mut scenario);
    }

    scenario
}

/// Applies one trimmed line to `scenario` and returns the section that is
/// current afterwards.
fn parse_line(line: &str, section: Section, scenario: &mut Scenario) -> Section {
    if let Some(rest) = line.strip_prefix("Feature:") {
        scenario.feature = rest.trim().to_string();
        return section;
    }

    if let Some(rest) = line.strip_prefix("Scenario:") {
        scenario.scenario = rest.trim().to_string();
        return section;
    }

    let (section, clause) = if let Some(rest) = line.strip_prefix("Given ") {
        (Section::Given, rest)
    } else if let Some(rest) = line.strip_prefix("When ") {
        (Section::When, rest)
    } else if let Some(rest) = line.strip_prefix("Then ") {
        (Section::Then, rest)
    } else if let Some(rest) = line
        .strip_prefix("And ")
        .or_else(|| line.strip_prefix("But "))
    {
        (section, rest)
    } else {
        return section;
    };

    let clause = clause.trim().to_string();
    match section {
        Section::Given => scenario.given.push(clause),
        Section::When => scenario.when.push(clause),
        Section::Then => scenario.then.push(clause),
        Section::None => debug!(line, "Dropping continuation line outside of any section"),
    }

    section
}

/// Builds a scenario from a structured task record.
///
/// Two shapes are accepted:
/// 1. `{"gherkin": "<scenario text>"}` or `{"gherkin": {"feature": .., "given":
///    .., ...}}`
/// 2. a flat record carrying all of `feature`, `scenario`, `given`, `when` and
///    `then`
///
/// A `given`, `when` or `then` holding a single string is read as a
/// one-element list.
///
/// # Errors
///
/// Returns [`Error::InvalidScenarioFormat`] when the record matches neither
/// shape.
pub fn parse_structured(record: &Value) -> Result<Scenario, Error> {
    let record = record.as_object().ok_or(Error::InvalidScenarioFormat)?;

    if let Some(gherkin) = record.get(GHERKIN_KEY) {
        return match gherkin {
            Value::String(text) => Ok(parse_text(text)),
            Value::Object(fields) => Ok(read_fields(fields)),
            _ => Err(Error::InvalidScenarioFormat),
        };
    }

    if SCENARIO_FIELDS.iter().all(|field| record.contains_key(*field)) {
        return Ok(read_fields(record));
    }

    Err(Error::InvalidScenarioFormat)
}

fn read_fields(fields: &Map<String, Value>) -> Scenario {
    Scenario {
        feature: read_label(fields.get("feature")),
        scenario: read_label(fields.get("scenario")),
        given: read_clauses(fields.get("given")),
        when: read_clauses(fields.get("when")),
        then: read_clauses(fields.get("then")),
    }
}

fn read_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn read_clauses(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(|item| read_label(Some(item))).collect(),
        Some(single) => vec![read_label(Some(single))],
    }
}

/// Parses either scenario text (a JSON string) or a structured record (a JSON
/// object).
///
/// # Errors
///
/// Returns [`Error::InvalidScenarioFormat`] for any other JSON value or for an
/// object [`parse_structured`] rejects.
pub fn parse_value(value: &Value) -> Result<Scenario, Error> {
    match value {
        Value::String(text) => Ok(parse_text(text)),
        Value::Object(_) => parse_structured(value),
        _ => Err(Error::InvalidScenarioFormat),
    }
}

/// Parses `value` and phrases it as the objective handed to the agent.
pub fn objective_for(value: &Value) -> Result<String, Error> {
    Ok(parse_value(value)?.objective())
}

/// Returns true when `text` parses into a scenario with at least one `When`
/// and one `Then` clause.
pub fn validate(text: &str) -> bool {
    let scenario = parse_text(text);
    !scenario.when.is_empty() && !scenario.then.is_empty()
}

/// Reads a JSON task file and parses the scenario it describes.
pub async fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read task file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse task file {}", path.display()))?;

    parse_value(&value).with_context(|| format!("Invalid scenario in {}", path.display()))
}
