// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every structured-output prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON. \
    Do not include markdown formatting like ```json. \
    Do not include explanations.";

/// Keeps the model from inventing facts that are not on the document.
pub const FIDELITY_INSTRUCTION: &str = "Only use facts present in the document. \
    Leave a field empty rather than guessing names, dates, or numbers.";
