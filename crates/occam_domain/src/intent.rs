use serde::{Deserialize, Serialize};

/// The kind of assertion an acceptance criterion expresses, detected from its
/// phrasing.
///
/// Intents form a priority ladder: [`Intent::classify`] walks
/// [`Intent::LADDER`] top to bottom and stops at the first intent whose
/// trigger phrase occurs in the criterion. [`Intent::Judgment`] has no
/// trigger and catches everything else.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    /// "The url should be/contain ..."
    Url,
    /// "The title should be/contain ..."
    Title,
    /// "I should see ..." / "The page should contain ..."
    Content,
    /// "The page should have ..." / "A login form should exist"
    Element,
    /// Anything not matched above, rated by an open-ended LLM judgment
    Judgment,
}

impl Intent {
    /// Intents with trigger phrases, in the order they are tried.
    pub const LADDER: [Intent; 4] = [Intent::Url, Intent::Title, Intent::Content, Intent::Element];

    /// Lower-case phrases that select this intent.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            Intent::Url => &["url should"],
            Intent::Title => &["title should"],
            Intent::Content => &["should see", "should contain"],
            Intent::Element => &["should have", "should exist"],
            Intent::Judgment => &[],
        }
    }

    /// Phrases after which the expected fragment is read when the criterion
    /// quotes nothing.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Url => &["url should be", "url should contain"],
            Intent::Title => &["title should contain", "title should be"],
            Intent::Content => &["should see", "should contain"],
            Intent::Element => &["should have", "should exist"],
            Intent::Judgment => &[],
        }
    }

    /// Detects the intent of a criterion, case-insensitively.
    pub fn classify(criterion: &str) -> Intent {
        let criterion = criterion.to_lowercase();
        Self::LADDER
            .into_iter()
            .find(|intent| intent.triggers().iter().any(|t| criterion.contains(t)))
            .unwrap_or(Intent::Judgment)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_classify_url() {
        assert_eq!(
            Intent::classify("The URL should contain \"search\""),
            Intent::Url
        );
    }

    #[test]
    fn test_classify_title() {
        assert_eq!(Intent::classify("The title should be Login"), Intent::Title);
    }

    #[test]
    fn test_classify_content() {
        assert_eq!(
            Intent::classify("I should see Python documentation"),
            Intent::Content
        );
        assert_eq!(
            Intent::classify("The page should contain 'Results'"),
            Intent::Content
        );
    }

    #[test]
    fn test_classify_element() {
        assert_eq!(
            Intent::classify("The page should have a search button"),
            Intent::Element
        );
        assert_eq!(
            Intent::classify("A login form should exist"),
            Intent::Element
        );
    }

    #[test]
    fn test_classify_first_match_wins() {
        // Every criterion below also carries a trigger of a later intent
        assert_eq!(
            Intent::classify("The url should contain \"cart\""),
            Intent::Url
        );
        assert_eq!(
            Intent::classify("The title should be \"Cart\" and I should see \"Checkout\""),
            Intent::Title
        );
        assert_eq!(
            Intent::classify("I should see a banner and the page should have a footer"),
            Intent::Content
        );
        assert_eq!(
            Intent::classify("The url should be /cart and the title should be Cart"),
            Intent::Url
        );
    }

    #[test]
    fn test_classify_falls_back_to_judgment() {
        assert_eq!(
            Intent::classify("The page loads quickly"),
            Intent::Judgment
        );
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::Judgment.to_string(), "judgment");
    }
}
