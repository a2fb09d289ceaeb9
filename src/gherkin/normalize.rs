/// Re-indent Gherkin text: `Feature` at column 0, `Scenario`/`Background` at 2,
/// steps and `Examples` at 4, table rows at 6. Other lines keep the indent of
/// the line before them; blank lines stay blank.
pub fn normalize(content: &str) -> String {
    let mut indent = 0;
    let mut out = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            out.push(String::new());
            continue;
        }

        indent = if line.starts_with("Feature") {
            0
        } else if line.starts_with("Scenario") || line.starts_with("Background") {
            2
        } else if super::STEP_KEYWORDS.iter().any(|kw| line.starts_with(kw)) || line.starts_with("Examples") {
            4
        } else if line.starts_with('|') {
            6
        } else {
            indent
        };
        out.push(format!("{}{}", " ".repeat(indent), line));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reindents_every_level() {
        let messy = "Feature: Pay\nScenario Outline: card\nGiven I pay <\"amount\">\n        Examples:\n|amount|\n   | 5 |";
        assert_eq!(
            normalize(messy),
            "Feature: Pay\n  Scenario Outline: card\n    Given I pay <\"amount\">\n    Examples:\n      |amount|\n      | 5 |"
        );
    }

    #[test]
    fn free_text_inherits_previous_indent() {
        let text = "Feature: Pay\n  As a shopper\n\n  Background:\nGiven a cart";
        assert_eq!(normalize(text), "Feature: Pay\nAs a shopper\n\n  Background:\n    Given a cart");
    }
}
