//! Context and prompt assembly.
//!
//! Both functions are pure: identical inputs always yield identical strings.
//! Passage texts pass through verbatim, in retriever order.

use super::store::ScoredPassage;

/// Separator between passages in the assembled context block.
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Concatenate passage texts in the order given, joined by the fixed separator.
pub fn build_context(passages: &[ScoredPassage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR)
}

/// Fill the fixed two-slot prompt template with the context block and the
/// original question text.
pub fn render_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question based only on the following context:\n\n{context}\n\n---\n\nAnswer the question based on the above context: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str, score: f32) -> ScoredPassage {
        ScoredPassage {
            text: text.to_string(),
            score,
        }
    }

    #[test]
    fn context_preserves_order_and_separator() {
        let passages = vec![
            passage("lforge is a deployment tool.", 0.91),
            passage("lforge uses AWS.", 0.85),
        ];

        assert_eq!(
            build_context(&passages),
            "lforge is a deployment tool.\n\n---\n\nlforge uses AWS."
        );
    }

    #[test]
    fn context_of_three_keeps_relative_positions() {
        let passages = vec![passage("P1", 0.9), passage("P2", 0.8), passage("P3", 0.7)];
        let context = build_context(&passages);

        let p1 = context.find("P1").unwrap();
        let p2 = context.find("P2").unwrap();
        let p3 = context.find("P3").unwrap();
        assert!(p1 < p2 && p2 < p3);
        assert_eq!(context.matches(PASSAGE_SEPARATOR).count(), 2);
    }

    #[test]
    fn single_passage_has_no_separator() {
        let context = build_context(&[passage("only", 1.0)]);
        assert_eq!(context, "only");
    }

    #[test]
    fn prompt_is_deterministic_and_verbatim() {
        let a = render_prompt("some context", "a question?");
        let b = render_prompt("some context", "a question?");
        assert_eq!(a, b);
        assert!(a.starts_with("Answer the question based only on the following context:\n\nsome context"));
        assert!(a.ends_with("Answer the question based on the above context: a question?"));
    }
}
