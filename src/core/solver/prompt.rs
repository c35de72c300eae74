//! Instruction templates and request bodies for the solver.

use serde_json::{Value, json};

use crate::core::image::ImagePayload;

/// Sampling temperature for every solver call.
pub const TEMPERATURE: f64 = 0.3;

/// Formatting rules shared by both modes. Replies that follow them segment cleanly.
const FORMATTING_RULES: &str = "\
- Wrap ALL mathematical expressions, equations, and fractions in display-style LaTeX using $$...$$ only.
- Do NOT use inline math ($...$), \\[...\\], or \\(...\\).
- Each equation should be on its own line inside $$...$$.
- Explanations must be plain text only (no LaTeX).
- Do not include code fences, markdown, or backticks.";

const VISION_USER_TEXT: &str = "Solve the math problem in this image step by step.";

/// Text mode: the question embedded in the instructions, sent as one user message.
pub fn text_prompt(question: &str) -> String {
    format!(
        "Solve the following math problem step by step:\n\n{}\n\nFormatting rules you must follow:\n{}",
        question, FORMATTING_RULES
    )
}

/// Image mode: the instructions go in a system message.
pub fn vision_system_prompt() -> String {
    format!(
        "You are a math solver. Always solve equations step-by-step and follow strict formatting rules:\n{}",
        FORMATTING_RULES
    )
}

/// Streaming request body for a (normalized) text question.
pub fn text_request(model: &str, question: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": text_prompt(question) }
        ],
        "temperature": TEMPERATURE,
        "stream": true,
        "stream_options": { "include_usage": true },
    })
}

/// Streaming request body for an image question.
pub fn image_request(model: &str, image: &ImagePayload) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": vision_system_prompt() },
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": VISION_USER_TEXT },
                    { "type": "image_url", "image_url": { "url": image.data_url() } }
                ]
            }
        ],
        "temperature": TEMPERATURE,
        "stream": true,
        "stream_options": { "include_usage": true },
    })
}
