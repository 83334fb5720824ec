//! Prompt construction for the advice request.
//!
//! One template: state the assistant's role, embed the literal symptom
//! text, and instruct the four fixed response aims.

/// Build the user prompt for a symptom description.
pub fn build_advice_prompt(symptom_text: &str) -> String {
    format!(
        "You are a medical assistant helping people understand their symptoms. \
A user reports the following symptoms: {symptom_text}.

Your task is to:
1. Explain possible conditions in simple layman-friendly language.
2. Suggest basic home remedies or OTC medications if applicable.
3. Mention any red flags that require immediate doctor attention.
4. If serious, suggest seeking a doctor's opinion with reasoning."
    )
}
