use handlebars::{Handlebars, no_escape};
use lazy_static::lazy_static;
use serde::Serialize;

pub const ELEMENT_EXISTENCE_TEMPLATE: &str = include_str!("prompts/element-existence.md");
pub const CRITERION_JUDGMENT_TEMPLATE: &str = include_str!("prompts/criterion-judgment.md");
pub const FUZZY_MATCH_TEMPLATE: &str = include_str!("prompts/fuzzy-match.md");

pub const PAGE_ANALYST_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that analyzes web page content.";
pub const CRITERION_JUDGE_SYSTEM_PROMPT: &str =
    "You are an expert at evaluating web automation test results against acceptance criteria.";
pub const FUZZY_MATCH_SYSTEM_PROMPT: &str = "You are a helpful assistant";

fn create_handlebar() -> Handlebars<'static> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_escape_fn(no_escape);
    hb
}

lazy_static! {
    /// Shared strict, non-escaping template engine. Page content is inserted
    /// verbatim.
    static ref HANDLEBARS: Handlebars<'static> = create_handlebar();
}

/// Renders one of the prompt templates above with `data`.
pub fn render<V: Serialize>(template: &str, data: &V) -> anyhow::Result<String> {
    Ok(HANDLEBARS.render_template(template, data)?)
}

#[derive(Debug, Serialize)]
pub struct ElementExistencePrompt<'a> {
    pub element: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CriterionJudgmentPrompt<'a> {
    pub criterion: &'a str,
    pub url: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub content_chars: usize,
}

#[derive(Debug, Serialize)]
pub struct FuzzyMatchPrompt<'a> {
    pub question: &'a str,
    pub reference: &'a str,
    pub observed: &'a str,
}
