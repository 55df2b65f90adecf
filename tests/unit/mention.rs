use etabot::mention::parse_mention;

#[test]
fn test_storytime_keyword_remainder() {
    let result = parse_mention("@Bot storytime hello world", "Bot", Some("storytime"));
    assert!(result.is_mentioned);
    assert_eq!(result.keyword.as_deref(), Some("storytime"));
    assert_eq!(result.remainder, "hello world");
}

#[test]
fn test_bare_mention_uppercase() {
    let result = parse_mention("@BOT", "Bot", None);
    assert!(result.is_mentioned);
    assert_eq!(result.remainder, "");
}

#[test]
fn test_not_mentioned_when_prefix_absent() {
    for text in ["hello @Bot", "Bot hi", "", "@Bo", "@Bxt hi", " @Bot hi"] {
        let result = parse_mention(text, "Bot", None);
        assert!(!result.is_mentioned, "{text:?} should not mention");
        assert_eq!(result.remainder, "");
    }
}

#[test]
fn test_keyword_must_follow_single_space() {
    assert!(!parse_mention("@Bot  storytime x", "Bot", Some("storytime")).is_mentioned);
    assert!(!parse_mention("@Botstorytime x", "Bot", Some("storytime")).is_mentioned);
    assert!(!parse_mention("@Bot story", "Bot", Some("storytime")).is_mentioned);
}

#[test]
fn test_keyword_mismatch_but_plain_mention_matches() {
    let text = "@Bot tell me a joke";
    assert!(!parse_mention(text, "Bot", Some("storytime")).is_mentioned);
    let plain = parse_mention(text, "Bot", None);
    assert!(plain.is_mentioned);
    assert_eq!(plain.remainder, "tell me a joke");
}

#[test]
fn test_remainder_is_original_case() {
    let result = parse_mention("@bot IDENTIFY What Is This", "Bot", Some("identify"));
    assert!(result.is_mentioned);
    assert_eq!(result.remainder, "What Is This");
}

#[test]
fn test_multi_word_bot_name() {
    let result = parse_mention("@Frat GPT image please", "Frat GPT", Some("image"));
    assert!(result.is_mentioned);
    assert_eq!(result.remainder, "please");
}

#[test]
fn test_keyword_exact_length_has_empty_remainder() {
    let result = parse_mention("@Bot monkey", "Bot", Some("monkey"));
    assert!(result.is_mentioned);
    assert_eq!(result.remainder, "");
}

#[test]
fn test_uppercase_expansion_matches() {
    let result = parse_mention("@STRASSE hi", "Straße", None);
    assert!(result.is_mentioned);
    assert_eq!(result.remainder, "hi");
}
