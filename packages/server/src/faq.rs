//! Fixed FAQ content for the dashboard.

use stress_map_server_models::FaqEntry;

const FAQ: &[(&str, &str)] = &[
    (
        "What does \"High Stress\" mean?",
        "High Stress wards have ESI > 0.65, indicating environmental challenges requiring immediate intervention.",
    ),
    (
        "How is ESI calculated?",
        "Environmental Stress Index = 40% PM2.5 + 20% Heat + 25% Density + 15% Green Deficit",
    ),
    (
        "Which wards need priority?",
        "High Stress wards with high population density should get priority.",
    ),
    (
        "How can ESI be reduced?",
        "1) Plant trees (green cover) → 25-30% reduction\n2) Reduce emissions → 15-20% reduction\n3) Improve monitoring",
    ),
    (
        "What is PM2.5?",
        "Particulate matter < 2.5µm. WHO safe limit: 15 µg/m³. High PM2.5 causes respiratory problems.",
    ),
];

/// Returns the FAQ entries in display order.
#[must_use]
pub fn entries() -> Vec<FaqEntry> {
    FAQ.iter()
        .map(|(question, answer)| FaqEntry {
            question: (*question).to_string(),
            answer: (*answer).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_entries_with_content() {
        let entries = entries();
        assert_eq!(entries.len(), 5);
        assert!(
            entries
                .iter()
                .all(|e| !e.question.is_empty() && !e.answer.is_empty())
        );
        assert_eq!(entries[4].question, "What is PM2.5?");
    }
}
