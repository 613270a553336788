use std::sync::Arc;

use occam_app::{CriterionEvaluator, LlmFuzzyJudge, parse_structured, parse_text, validate};
use occam_config::EvaluatorConfig;
use occam_domain::{
    ChatMessage, CompletionOptions, Intent, PageSnapshot, PageStateProvider, TextGenerationService,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Answers each kind of prompt the evaluator sends with a fixed reply.
struct ScriptedModel;

#[async_trait::async_trait]
impl TextGenerationService for ScriptedModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> anyhow::Result<String> {
        let prompt = &messages[1].content;
        if prompt.contains("Conclude the judgement") {
            Ok("The answer is correct".to_string())
        } else if prompt.contains("Answer with just \"YES\" or \"NO\"") {
            Ok("YES".to_string())
        } else {
            Ok("0.4".to_string())
        }
    }
}

struct BrowserPage;

#[async_trait::async_trait]
impl PageStateProvider for BrowserPage {
    async fn current_url(&self) -> anyhow::Result<String> {
        Ok("https://www.python.org/doc/".to_string())
    }

    async fn current_title(&self) -> anyhow::Result<String> {
        Ok("Our Documentation | Python.org".to_string())
    }

    async fn visible_text(&self) -> anyhow::Result<String> {
        Ok("Python 3.13 documentation. Tutorial. Library Reference. Search".to_string())
    }
}

fn fixture_evaluator() -> CriterionEvaluator<ScriptedModel, LlmFuzzyJudge<ScriptedModel>> {
    let config = EvaluatorConfig::default();
    let model = Arc::new(ScriptedModel);
    let judge = Arc::new(LlmFuzzyJudge::new(model.clone(), &config));
    CriterionEvaluator::new(model, judge, config)
}

const SCENARIO: &str = r#"
Feature: Search functionality
Scenario: Find the Python docs
  Given I am on the Python homepage
  When I open the documentation menu
  And I click "Docs"
  Then the url should contain "/doc"
  And the title should contain "Documentation"
  And I should see "Library Reference"
  And the page should have a search box
  And the docs look up to date
"#;

#[tokio::test]
async fn test_parse_and_evaluate_scenario() {
    assert!(validate(SCENARIO));
    let scenario = parse_text(SCENARIO);
    let evaluator = fixture_evaluator();

    let actual = evaluator
        .evaluate_page(&scenario.acceptance_criteria(), &BrowserPage)
        .await;

    let intents: Vec<Intent> = actual.outcomes.iter().map(|o| o.intent).collect();
    assert_eq!(
        intents,
        vec![
            Intent::Url,
            Intent::Title,
            Intent::Content,
            Intent::Element,
            Intent::Judgment
        ]
    );
    let scores: Vec<f64> = actual.outcomes.iter().map(|o| o.score.value()).collect();
    assert_eq!(scores, vec![1.0, 1.0, 1.0, 1.0, 0.4]);
    assert_eq!(actual.score(), 4.4 / 5.0);
}

#[tokio::test]
async fn test_structured_record_evaluates_like_text() {
    let record = json!({
        "task_id": 12,
        "gherkin": {
            "feature": "Search functionality",
            "given": "I am on the Python homepage",
            "when": ["I open the documentation menu"],
            "then": "The title should be \"Welcome to Python.org\""
        }
    });
    let scenario = parse_structured(&record).unwrap();
    let evaluator = fixture_evaluator();
    let snapshot = PageSnapshot::capture(&BrowserPage).await;

    let actual = evaluator.evaluate_scenario(&scenario, &snapshot).await;

    assert_eq!(actual.score(), 0.0);
    assert_eq!(
        scenario.objective(),
        "Starting from I am on the Python homepage, perform the following: I open the documentation menu, so that The title should be \"Welcome to Python.org\"."
    );
}
