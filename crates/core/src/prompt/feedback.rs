use crate::prompt::schema::output_schema;

/// Renders a refinement request from a prior result and operator feedback.
///
/// Both texts are embedded verbatim; no state is carried between rounds.
pub fn build_refine_prompt(prior_result: &str, feedback: &str) -> String {
    format!(
        "You are a Taobao ad-placement expert. The operator has reviewed the previous strategy \
and left feedback. Revise the strategy accordingly.\n\n\
## Previous strategy\n{prior_result}\n\n\
## Operator feedback\n{feedback}\n\n\
Return the revised strategy, still as JSON.\n{schema}\n",
        schema = output_schema("revised strategy name"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_prior_and_feedback_under_headings() {
        let prior = "{\"strategy_name\": \"East coast push\", \"expected_roi\": 9.1}";
        let feedback = "Drop Harbin; too cold in March.";
        let prompt = build_refine_prompt(prior, feedback);

        let prior_at = prompt.find("## Previous strategy").unwrap();
        let feedback_at = prompt.find("## Operator feedback").unwrap();
        assert!(prior_at < feedback_at);
        assert!(prompt[prior_at..feedback_at].contains(prior));
        assert!(prompt[feedback_at..].contains(feedback));
        assert!(prompt.contains("optimization_tips"));
    }

    #[test]
    fn is_a_pure_function_of_inputs() {
        assert_eq!(build_refine_prompt("a", "b"), build_refine_prompt("a", "b"));
        assert_ne!(build_refine_prompt("a", "b"), build_refine_prompt("a", "c"));
    }
}
