//! Prompt building for summaries and context-grounded questions.

/// Prompt asking the model to summarize a chat transcript.
pub fn build_summary_prompt(transcript: &str) -> String {
    format!(
        "Below are messages from a chat conversation.\n\
         Please provide a brief, clear summary of the main discussion points:\n\n\
         {transcript}\n"
    )
}

/// Prompt asking a question against the accumulated context block.
pub fn build_context_prompt(context_block: &str, question: &str) -> String {
    format!(
        "Previous context:\n\
         {context_block}\n\n\
         User question:\n\
         {question}\n\n\
         Please provide a response taking into account the context above."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_embeds_transcript() {
        let prompt = build_summary_prompt("alice: lunch?\nbob: yes");
        assert!(prompt.contains("summary"));
        assert!(prompt.contains("alice: lunch?"));
        assert!(prompt.contains("bob: yes"));
    }

    #[test]
    fn test_context_prompt_orders_context_before_question() {
        let prompt = build_context_prompt("[ctx] alice: hi", "what did alice say?");
        let ctx_pos = prompt.find("[ctx] alice: hi").unwrap();
        let q_pos = prompt.find("what did alice say?").unwrap();
        assert!(ctx_pos < q_pos);
        assert!(prompt.contains("User question:"));
    }

    #[test]
    fn test_context_prompt_with_empty_context() {
        let prompt = build_context_prompt("", "hello?");
        assert!(prompt.contains("hello?"));
    }
}
