use crate::domain::repositories::chunk_repository::ScoredChunk;

/// Appended to every bot's base instruction, with or without retrieved
/// context.
pub const FORMATTING_INSTRUCTIONS: &str = "\n\nFormat your responses using markdown for better readability:\n- Use **bold** for important terms\n- Use *italics* for emphasis\n- Use `code` for technical terms\n- Use ## headings for sections\n- Use bullet points or numbered lists when appropriate\n- Use code blocks for longer code examples";

pub const CONTEXT_HEADER: &str = "Context information:";

/// Builds the retrieved-context section, or `None` when there is nothing to
/// include. With no chunks the assembled prompt must be indistinguishable
/// from a no-retrieval configuration, so the header is omitted too.
pub fn context_block(chunks: &[&ScoredChunk]) -> Option<String> {
    if chunks.is_empty() {
        return None;
    }

    let entries: Vec<String> = chunks
        .iter()
        .map(|chunk| format!("From {}: {}", chunk.document_filename, chunk.chunk_text))
        .collect();

    Some(format!("\n\n{}\n{}", CONTEXT_HEADER, entries.join("\n\n")))
}

/// Composes the final generation prompt from the bot's base instruction,
/// the static formatting block, and the optional context section. Pure:
/// testable without any network call.
pub fn assemble(base_instruction: &str, chunks: &[&ScoredChunk]) -> String {
    let mut prompt = format!("{}{}", base_instruction, FORMATTING_INSTRUCTIONS);

    if let Some(block) = context_block(chunks) {
        prompt.push_str(&block);
    }

    prompt
}
