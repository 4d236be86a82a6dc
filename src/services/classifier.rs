const IMPORTANT_KEYWORDS: [&str; 6] = [
    "urgent", "invoice", "payment", "proposal", "meeting", "contract",
];

/// Keyword-based relevance signal for incoming email. Deterministic, no
/// configuration.
pub fn is_important(from: &str, subject: &str, snippet: &str) -> bool {
    let text = format!("{from} {subject} {snippet}").to_lowercase();
    IMPORTANT_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}
