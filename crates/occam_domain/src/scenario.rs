use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// A behavioral specification normalized from Gherkin text or a structured
/// task record.
///
/// Only `then` drives scoring. `given` and `when` describe the starting point
/// and the actions the agent is asked to perform, and are used solely to
/// phrase the objective handed to the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(into)]
pub struct Scenario {
    pub feature: String,
    pub scenario: String,
    pub given: Vec<String>,
    pub when: Vec<String>,
    pub then: Vec<String>,
}

impl Scenario {
    /// Phrases the scenario as a single natural-language objective.
    ///
    /// Clauses whose source list is empty are left out together with their
    /// connector, e.g. a scenario without `given` starts with "perform the
    /// following: ...".
    pub fn objective(&self) -> String {
        let mut parts = Vec::with_capacity(3);

        if !self.given.is_empty() {
            parts.push(format!("Starting from {}", self.given.join(" and ")));
        }

        if !self.when.is_empty() {
            parts.push(format!(
                "perform the following: {}",
                self.when.join(" and then ")
            ));
        }

        if !self.then.is_empty() {
            parts.push(format!("so that {}", self.then.join(" and ")));
        }

        format!("{}.", parts.join(", "))
    }

    /// The `then` clauses, each of which is scored on its own.
    pub fn acceptance_criteria(&self) -> Vec<String> {
        self.then.clone()
    }

    pub fn to_record(&self) -> ScenarioRecord {
        ScenarioRecord {
            feature: self.feature.clone(),
            scenario: self.scenario.clone(),
            given: self.given.clone(),
            when: self.when.clone(),
            then: self.then.clone(),
            objective: self.objective(),
            acceptance_criteria: self.acceptance_criteria(),
        }
    }
}

/// Serializable view of a [`Scenario`] including its derived objective and
/// acceptance criteria, as written into task configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub feature: String,
    pub scenario: String,
    pub given: Vec<String>,
    pub when: Vec<String>,
    pub then: Vec<String>,
    pub objective: String,
    pub acceptance_criteria: Vec<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fixture_scenario() -> Scenario {
        Scenario::default()
            .feature("Search functionality")
            .scenario("Search for Python programming")
            .given(vec!["I am on Google homepage".to_string()])
            .when(vec![
                "I search for \"Python programming\"".to_string(),
                "I click on the first result".to_string(),
            ])
            .then(vec![
                "I should see Python documentation".to_string(),
                "the url should contain \"python\"".to_string(),
            ])
    }

    #[test]
    fn test_objective_with_all_clauses() {
        let actual = fixture_scenario().objective();
        let expected = "Starting from I am on Google homepage, perform the following: I search for \"Python programming\" and then I click on the first result, so that I should see Python documentation and the url should contain \"python\".";

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_objective_omits_empty_given() {
        let fixture = fixture_scenario().given(Vec::<String>::new());

        let actual = fixture.objective();
        let expected = "perform the following: I search for \"Python programming\" and then I click on the first result, so that I should see Python documentation and the url should contain \"python\".";

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_objective_only_then() {
        let fixture = Scenario::default().then(vec!["the title should be \"Login\"".to_string()]);

        let actual = fixture.objective();
        let expected = "so that the title should be \"Login\".";

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_objective_without_when() {
        let fixture = Scenario::default()
            .given(vec!["A".to_string(), "B".to_string()])
            .then(vec!["C".to_string()]);

        let actual = fixture.objective();
        let expected = "Starting from A and B, so that C.";

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_objective_empty_scenario() {
        assert_eq!(Scenario::default().objective(), ".");
    }

    #[test]
    fn test_acceptance_criteria_are_then_clauses() {
        let fixture = fixture_scenario();

        assert_eq!(fixture.acceptance_criteria(), fixture.then);
    }

    #[test]
    fn test_to_record_serializes_derived_fields() {
        let fixture = Scenario::default()
            .feature("Login")
            .when(vec!["I sign in".to_string()])
            .then(vec!["I should see \"Welcome\"".to_string()]);

        let actual = serde_json::to_value(fixture.to_record()).unwrap();
        let expected = json!({
            "feature": "Login",
            "scenario": "",
            "given": [],
            "when": ["I sign in"],
            "then": ["I should see \"Welcome\""],
            "objective": "perform the following: I sign in, so that I should see \"Welcome\".",
            "acceptance_criteria": ["I should see \"Welcome\""],
        });

        assert_eq!(actual, expected);
    }
}
