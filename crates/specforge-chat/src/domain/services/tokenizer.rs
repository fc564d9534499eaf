#[cfg(test)]
#[path = "tokenizer_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::ContentBlock;

pub const DEFAULT_CODE_LANGUAGE: &str = "text";

// Opening fence, optional ASCII word language tag, newline, shortest body, closing fence.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"```([A-Za-z0-9_]*)\n((?s:.*?))```").unwrap();
});

fn push_text(blocks: &mut Vec<ContentBlock>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        blocks.push(ContentBlock::text(trimmed));
    }
}

/// Splits message content into an ordered sequence of prose and fenced code blocks.
///
/// Fences are matched left to right without overlap. An opening fence with no
/// closing marker is left as literal text. Blank blocks are dropped, so blank input
/// yields an empty sequence.
pub fn tokenize(content: &str) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = vec![];
    let mut last_index = 0;
    let mut matched_fence = false;

    for caps in FENCE_RE.captures_iter(content) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        matched_fence = true;

        push_text(&mut blocks, &content[last_index..whole.start()]);

        let code = body.as_str().trim();
        if !code.is_empty() {
            let language = caps
                .get(1)
                .map(|lang| lang.as_str())
                .filter(|lang| !lang.is_empty())
                .unwrap_or(DEFAULT_CODE_LANGUAGE);
            blocks.push(ContentBlock::code(language, code));
        }

        last_index = whole.end();
    }

    if !matched_fence {
        push_text(&mut blocks, content);
        return blocks;
    }

    push_text(&mut blocks, &content[last_index..]);
    return blocks;
}

/// Returns only the code blocks of `content`, in order.
pub fn code_blocks(content: &str) -> Vec<ContentBlock> {
    return tokenize(content)
        .into_iter()
        .filter(|block| block.is_code())
        .collect();
}
