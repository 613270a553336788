use std::sync::Arc;

use futures::future::join_all;
use occam_config::EvaluatorConfig;
use occam_domain::{
    ChatMessage, CompletionOptions, CriterionOutcome, CriterionScore, EvaluationResult,
    FuzzyMatchJudge, Intent, PageSnapshot, PageStateProvider, Scenario, TextGenerationService,
};
use tracing::{debug, info, warn};

use crate::extract::{expected_fragment, first_number, text_after_keyword, truncate_chars};
use crate::prompt::{
    self, CRITERION_JUDGE_SYSTEM_PROMPT, CRITERION_JUDGMENT_TEMPLATE, CriterionJudgmentPrompt,
    ELEMENT_EXISTENCE_TEMPLATE, ElementExistencePrompt, PAGE_ANALYST_SYSTEM_PROMPT,
};

/// Scores Gherkin acceptance criteria against a snapshot of the page an agent
/// left behind.
///
/// Each criterion is classified by [`Intent::classify`] and handled by the
/// rule for that intent only. Url and title assertions are decided locally;
/// content assertions go to the fuzzy match judge; element assertions and
/// everything unrecognized are put to the text generation service. A rule that
/// cannot extract what it is looking for hands the criterion to the open-ended
/// judgment instead.
///
/// Evaluation never fails: any error from a collaborator scores the criterion
/// as [`CriterionScore::NEUTRAL`].
pub struct CriterionEvaluator<T, J> {
    text_generation: Arc<T>,
    judge: Arc<J>,
    config: EvaluatorConfig,
    options: CompletionOptions,
}

impl<T: TextGenerationService, J: FuzzyMatchJudge> CriterionEvaluator<T, J> {
    pub fn new(text_generation: Arc<T>, judge: Arc<J>, config: EvaluatorConfig) -> Self {
        let options = CompletionOptions::new(config.model.as_str())
            .temperature(config.temperature)
            .max_tokens(config.max_tokens);
        Self { text_generation, judge, config, options }
    }

    /// Scores every criterion and aggregates them. The criteria are scored
    /// concurrently and independently of each other.
    pub async fn evaluate(&self, criteria: &[String], snapshot: &PageSnapshot) -> EvaluationResult {
        if criteria.is_empty() {
            return EvaluationResult::default();
        }

        let outcomes = join_all(
            criteria
                .iter()
                .map(|criterion| self.evaluate_outcome(criterion, snapshot)),
        )
        .await;
        let result = EvaluationResult::new(outcomes);

        info!(
            criteria = result.outcomes.len(),
            score = result.score(),
            url = %snapshot.url,
            "Evaluated acceptance criteria"
        );
        result
    }

    /// Scores the acceptance criteria of `scenario`.
    pub async fn evaluate_scenario(
        &self,
        scenario: &Scenario,
        snapshot: &PageSnapshot,
    ) -> EvaluationResult {
        self.evaluate(&scenario.then, snapshot).await
    }

    /// Captures the current state of `page` and scores `criteria` against it.
    pub async fn evaluate_page<P: PageStateProvider + ?Sized>(
        &self,
        criteria: &[String],
        page: &P,
    ) -> EvaluationResult {
        let snapshot = PageSnapshot::capture(page).await;
        self.evaluate(criteria, &snapshot).await
    }

    pub async fn evaluate_one(&self, criterion: &str, snapshot: &PageSnapshot) -> CriterionScore {
        self.evaluate_outcome(criterion, snapshot).await.score
    }

    async fn evaluate_outcome(&self, criterion: &str, snapshot: &PageSnapshot) -> CriterionOutcome {
        let intent = Intent::classify(criterion);
        let decided = match intent {
            Intent::Url => check_url(criterion, snapshot),
            Intent::Title => check_title(criterion, snapshot),
            Intent::Content => self.check_content(criterion, snapshot).await,
            Intent::Element => self.check_element(criterion, snapshot).await,
            Intent::Judgment => None,
        };

        let (intent, score) = match decided {
            Some(score) => (intent, score),
            None => (Intent::Judgment, self.judge_criterion(criterion, snapshot).await),
        };

        debug!(criterion, intent = %intent, score = score.value(), "Scored acceptance criterion");
        CriterionOutcome { criterion: criterion.to_string(), intent, score }
    }

    async fn check_content(&self, criterion: &str, snapshot: &PageSnapshot) -> Option<CriterionScore> {
        let expected = expected_fragment(criterion, Intent::Content);
        if expected.is_empty() {
            return None;
        }

        let observed = truncate_chars(&snapshot.content, self.config.content_match_chars);
        let question = format!("Check if page contains: {expected}");

        let score = match self.judge.score(observed, &expected, &question).await {
            Ok(score) => CriterionScore::new(score),
            Err(error) => {
                warn!(error = ?error, criterion, "Fuzzy match failed, scoring as neutral");
                CriterionScore::NEUTRAL
            }
        };
        Some(score)
    }

    async fn check_element(&self, criterion: &str, snapshot: &PageSnapshot) -> Option<CriterionScore> {
        let element = text_after_keyword(criterion, Intent::Element);
        if element.is_empty() {
            return None;
        }

        let prompt = prompt::render(
            ELEMENT_EXISTENCE_TEMPLATE,
            &ElementExistencePrompt {
                element: &element,
                content: truncate_chars(&snapshot.content, self.config.judgment_content_chars),
            },
        );
        let response = match prompt {
            Ok(prompt) => self.ask(PAGE_ANALYST_SYSTEM_PROMPT, prompt).await,
            Err(error) => Err(error),
        };

        let score = match response {
            Ok(response) => {
                let response = response.to_lowercase();
                if response.contains("yes") {
                    CriterionScore::PASS
                } else if response.contains("no") {
                    CriterionScore::FAIL
                } else {
                    CriterionScore::NEUTRAL
                }
            }
            Err(error) => {
                warn!(error = ?error, criterion, "Element existence check failed, scoring as neutral");
                CriterionScore::NEUTRAL
            }
        };
        Some(score)
    }

    /// Asks the text generation service to rate the criterion from 0.0 to 1.0.
    async fn judge_criterion(&self, criterion: &str, snapshot: &PageSnapshot) -> CriterionScore {
        let prompt = prompt::render(
            CRITERION_JUDGMENT_TEMPLATE,
            &CriterionJudgmentPrompt {
                criterion,
                url: &snapshot.url,
                title: &snapshot.title,
                content: truncate_chars(&snapshot.content, self.config.judgment_content_chars),
                content_chars: self.config.judgment_content_chars,
            },
        );
        let response = match prompt {
            Ok(prompt) => self.ask(CRITERION_JUDGE_SYSTEM_PROMPT, prompt).await,
            Err(error) => Err(error),
        };

        match response {
            Ok(response) => match first_number(&response) {
                Some(score) => CriterionScore::new(score),
                None => {
                    warn!(criterion, response = %response, "Judgment has no numeric score, scoring as neutral");
                    CriterionScore::NEUTRAL
                }
            },
            Err(error) => {
                warn!(error = ?error, criterion, "Criterion judgment failed, scoring as neutral");
                CriterionScore::NEUTRAL
            }
        }
    }

    async fn ask(&self, system_prompt: &str, prompt: String) -> anyhow::Result<String> {
        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(prompt)];
        self.text_generation.complete(&messages, &self.options).await
    }
}

fn check_url(criterion: &str, snapshot: &PageSnapshot) -> Option<CriterionScore> {
    let expected = expected_fragment(criterion, Intent::Url);
    if expected.is_empty() {
        return None;
    }

    // "should be" matches by containment, same as "should contain"
    let url = snapshot.url.to_lowercase();
    Some(CriterionScore::from_bool(url.contains(&expected.to_lowercase())))
}

fn check_title(criterion: &str, snapshot: &PageSnapshot) -> Option<CriterionScore> {
    let expected = expected_fragment(criterion, Intent::Title).to_lowercase();
    if expected.is_empty() {
        return None;
    }

    let phrasing = criterion.to_lowercase();
    let title = snapshot.title.to_lowercase();

    if phrasing.contains("should contain") {
        // A miss is uncertain, not a failure
        Some(if title.contains(&expected) {
            CriterionScore::PASS
        } else {
            CriterionScore::NEUTRAL
        })
    } else if phrasing.contains("should be") {
        Some(CriterionScore::from_bool(title == expected))
    } else {
        None
    }
}
