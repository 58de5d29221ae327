use std::fmt;

use drill_core::OrderingPolicy;
use drill_core::model::TopicName;

const RULE_WIDTH: usize = 50;

/// End-of-topic recap.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub topic: TopicName,
    pub title: String,
    pub question_count: usize,
    pub progress_percent: f64,
    /// `None` while the questions are still in catalog order.
    pub ordering: Option<OrderingPolicy>,
}

impl fmt::Display for TopicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "    TOPIC SUMMARY: {}", self.title.to_uppercase())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Questions in topic: {}", self.question_count)?;
        writeln!(f, "Progress: {:.1}%", self.progress_percent)?;
        match self.ordering {
            Some(policy) => writeln!(f, "Ordering: {policy} ({})", policy.description())?,
            None => writeln!(f, "Ordering: catalog order")?,
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_recap() {
        let summary = TopicSummary {
            topic: TopicName::new("inheritance").unwrap(),
            title: "Inheritance".into(),
            question_count: 8,
            progress_percent: 100.0,
            ordering: Some(OrderingPolicy::Ascending),
        };
        let text = summary.to_string();
        assert!(text.contains("TOPIC SUMMARY: INHERITANCE"));
        assert!(text.contains("Questions in topic: 8"));
        assert!(text.contains("Progress: 100.0%"));
        assert!(text.contains("Ordering: ascending (easy to hard)"));
    }
}
