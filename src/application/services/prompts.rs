use crate::domain::{BulletRange, Chunk, PartialSummary};

pub const TRUNCATION_MARKER: &str = "... [truncated]";
pub const UNKNOWN_ANSWER: &str = "I don't know based on this podcast.";

pub fn chunk_prompt(chunk: &Chunk) -> String {
    format!(
        "You are a podcast summarizer.\n\
         Summarize the following transcript chunk in exactly 2-3 concise bullet points.\n\
         Focus only on the most important topics and key insights.\n\
         Keep each point brief and specific.\n\
         \n\
         Transcript Chunk {number}:\n\
         {text}\n\
         \n\
         Summary (2-3 bullet points only):",
        number = chunk.number(),
        text = chunk.text,
    )
}

/// Lists the partial summaries in the order given, labelled by chunk position.
pub fn combine_sections(partials: &[PartialSummary]) -> String {
    partials
        .iter()
        .filter_map(|p| {
            p.text()
                .map(|text| format!("Section {}:\n{}", p.chunk_index + 1, text))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn reduce_prompt(sections: &str, bullets: BulletRange) -> String {
    format!(
        "You are an expert content summarizer.\n\
         Below are summaries from different sections of a podcast/video transcript.\n\
         Create a final summary in EXACTLY {bullets} bullet points that captures the main themes and key insights.\n\
         \n\
         IMPORTANT INSTRUCTIONS:\n\
         - Use exactly {bullets} bullet points, no more, no less\n\
         - Keep each bullet point concise (1-2 sentences maximum)\n\
         - Focus on the most important and unique insights\n\
         - Avoid repetition between points\n\
         - Prioritize actionable insights and key takeaways\n\
         \n\
         Section Summaries:\n\
         {sections}\n\
         \n\
         Final Summary ({bullets} bullet points):",
    )
}

pub fn fallback_prompt(text: &str, bullets: BulletRange) -> String {
    format!(
        "You are a podcast summarizer.\n\
         Summarize the following transcript in exactly {bullets} clear bullet points.\n\
         Keep each point concise and focus on key insights only.\n\
         \n\
         Transcript:\n\
         {text}\n\
         \n\
         Summary ({bullets} bullet points):",
    )
}

pub fn question_prompt(summary: &str, question: &str) -> String {
    format!(
        "You are an assistant that answers questions only using the provided podcast summary.\n\
         \n\
         Podcast Summary:\n\
         {summary}\n\
         \n\
         User Question:\n\
         {question}\n\
         \n\
         Rules:\n\
         - Respond clearly, simply, and concisely.\n\
         - Always reply in English.\n\
         - Only answer questions that can be answered using the podcast summary.\n\
         - Do not add external knowledge, assumptions, or interpretations.\n\
         - If the answer is not present in the podcast summary, reply exactly with: \"{UNKNOWN_ANSWER}\"\n\
         - If the user greets you, respond politely and briefly.",
    )
}

/// Cuts `text` to at most `max_chars` chars, marking the cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
