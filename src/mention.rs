/// Outcome of checking a message for `@bot_name [keyword]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionResult {
    pub is_mentioned: bool,
    pub keyword: Option<String>,
    pub remainder: String,
}

impl MentionResult {
    fn miss(keyword: Option<&str>) -> Self {
        Self {
            is_mentioned: false,
            keyword: keyword.map(str::to_string),
            remainder: String::new(),
        }
    }
}

/// Case-insensitive prefix match of `@bot_name` (plus ` keyword` when given).
///
/// Both sides are uppercased before comparing. The remainder is the original
/// text starting one character past the uppercased prefix, so
/// `"@Bot storytime hello"` yields `"hello"`. Nothing else is trimmed.
pub fn parse_mention(text: &str, bot_name: &str, keyword: Option<&str>) -> MentionResult {
    let prefix = match keyword {
        Some(keyword) => format!("@{bot_name} {keyword}"),
        None => format!("@{bot_name}"),
    }
    .to_uppercase();

    if !text.to_uppercase().starts_with(&prefix) {
        return MentionResult::miss(keyword);
    }

    let skip = prefix.chars().count() + 1;
    let remainder = text
        .char_indices()
        .nth(skip)
        .map(|(offset, _)| &text[offset..])
        .unwrap_or("");

    MentionResult {
        is_mentioned: true,
        keyword: keyword.map(str::to_string),
        remainder: remainder.to_string(),
    }
}
