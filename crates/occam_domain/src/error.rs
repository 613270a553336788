#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error(
        "Invalid Gherkin data format. Must contain 'gherkin' field (string or object) or structured fields (feature, scenario, given, when, then)"
    )]
    InvalidScenarioFormat,
}
