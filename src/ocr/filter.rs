use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::TextBlock;
use super::geom::is_well_formed;
use super::script::{Script, detect_script};
use super::text::{TextStats, text_stats, word_count};

/// Thresholds for separating translatable text from OCR noise.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub min_text_chars: usize,
    pub min_width: i32,
    pub min_height: i32,
    pub max_symbol_ratio: f32,
    pub min_vowel_ratio: f32,
    pub max_vowel_ratio: f32,
    /// Longest tolerated run of non-vowel, non-space characters.
    pub max_consonant_run: usize,
    pub caps_ratio: f32,
    /// Blocks must score strictly above this.
    pub min_quality: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 3,
            min_width: 30,
            min_height: 15,
            max_symbol_ratio: 0.3,
            min_vowel_ratio: 0.15,
            max_vowel_ratio: 0.75,
            max_consonant_run: 4,
            caps_ratio: 0.8,
            min_quality: 0.5,
        }
    }
}

struct CodePattern {
    name: &'static str,
    regex: Regex,
}

const WORD: &str = "[A-Za-z0-9_]";

static CODE_PATTERNS: LazyLock<Vec<CodePattern>> = LazyLock::new(|| {
    [
        ("member access", format!(r"{WORD}+\.{WORD}+")),
        ("namespace access", format!(r"{WORD}+::{WORD}+")),
        ("camel case", r"[a-z][A-Z]".to_string()),
        ("snake case", r"_[a-z]+_".to_string()),
        ("source file", format!(r"{WORD}+\.(kt|java|xml)")),
        ("keyword", r"fun |class |val |var |import ".to_string()),
        ("brackets", r"[{}\[\]<>;]".to_string()),
        ("annotation", format!(r"@{WORD}+")),
        ("call", format!(r"{WORD}+\(\)")),
    ]
    .into_iter()
    .map(|(name, pattern)| CodePattern {
        name,
        regex: Regex::new(&pattern).expect("valid code pattern regex"),
    })
    .collect()
});

pub fn filter_blocks(blocks: Vec<TextBlock>, config: &FilterConfig) -> Vec<TextBlock> {
    blocks
        .into_iter()
        .filter(|block| should_keep(block, config))
        .collect()
}

/// Decides whether a block reads as natural language worth translating.
pub fn should_keep(block: &TextBlock, config: &FilterConfig) -> bool {
    match rejection_reason(block, config) {
        Some(reason) => {
            debug!("dropping OCR block {:?}: {}", block.text.trim(), reason);
            false
        }
        None => true,
    }
}

fn rejection_reason(block: &TextBlock, config: &FilterConfig) -> Option<&'static str> {
    let text = block.text.trim();
    let bbox = &block.bounding_box;
    if text.chars().count() < config.min_text_chars {
        return Some("too short");
    }
    if !is_well_formed(bbox) {
        return Some("malformed bounding box");
    }
    if bbox.width() < i64::from(config.min_width)
        || bbox.height() < i64::from(config.min_height)
    {
        return Some("region too small");
    }

    let stats = text_stats(text);
    if !stats.has_language_chars() {
        return Some("no letters");
    }

    match detect_script(text) {
        Script::Cjk | Script::Devanagari => {
            if stats.script_symbol_ratio() > config.max_symbol_ratio {
                return Some("too many symbols");
            }
            None
        }
        Script::Latin | Script::Other => latin_rejection_reason(text, &stats, config),
    }
}

fn latin_rejection_reason(
    text: &str,
    stats: &TextStats,
    config: &FilterConfig,
) -> Option<&'static str> {
    if let Some(pattern) = CODE_PATTERNS
        .iter()
        .find(|pattern| pattern.regex.is_match(text))
    {
        return Some(pattern.name);
    }
    if is_gibberish(stats, config) {
        return Some("gibberish");
    }
    if stats.symbol_ratio() > config.max_symbol_ratio {
        return Some("too many symbols");
    }
    if is_all_caps_noise(text, stats, config) {
        return Some("all caps");
    }
    if quality_score(text, stats) <= config.min_quality {
        return Some("low quality");
    }
    None
}

fn is_gibberish(stats: &TextStats, config: &FilterConfig) -> bool {
    if stats.letters == 0 {
        return true;
    }
    let vowel_ratio = stats.letter_vowel_ratio();
    if vowel_ratio < config.min_vowel_ratio || vowel_ratio > config.max_vowel_ratio {
        return true;
    }
    stats.longest_consonant_run > config.max_consonant_run
}

fn is_all_caps_noise(text: &str, stats: &TextStats, config: &FilterConfig) -> bool {
    if stats.letters == 0 || stats.upper_ratio() <= config.caps_ratio {
        return false;
    }
    if (2..=4).contains(&stats.letters) {
        return false;
    }
    word_count(text) < 3
}

/// Heuristic in [0, 1]; higher means more sentence-like.
fn quality_score(text: &str, stats: &TextStats) -> f32 {
    let mut score = 0.5f32;

    if stats.chars > 50 {
        score += 0.2;
    } else if stats.chars > 20 {
        score += 0.1;
    } else if stats.chars < 5 {
        score -= 0.2;
    }

    match word_count(text) {
        n if n >= 4 => score += 0.15,
        n if n >= 2 => score += 0.05,
        1 => score -= 0.1,
        _ => {}
    }

    if text.trim_end().ends_with(['.', '!', '?']) {
        score += 0.1;
    }
    if text.contains(',') {
        score += 0.05;
    }
    if stats.letters > 0 && (0.05..=0.3).contains(&stats.upper_ratio()) {
        score += 0.1;
    }
    if text.contains(' ') {
        score += 0.1;
    }
    if (0.25..=0.45).contains(&stats.text_vowel_ratio()) {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::block;

    fn keep(text: &str) -> bool {
        should_keep(&block(text, 0, 0, 200, 50), &FilterConfig::default())
    }

    #[test]
    fn rejects_short_text() {
        assert!(!keep("Hi"));
        assert!(!keep("  a  "));
    }

    #[test]
    fn rejects_small_regions() {
        let config = FilterConfig::default();
        assert!(!should_keep(&block("Hello World", 0, 0, 29, 50), &config));
        assert!(!should_keep(&block("Hello World", 0, 0, 200, 14), &config));
        assert!(should_keep(&block("Hello World", 0, 0, 30, 15), &config));
    }

    #[test]
    fn rejects_inverted_boxes() {
        let config = FilterConfig::default();
        assert!(!should_keep(&block("Hello World", 200, 0, 0, 50), &config));
    }

    #[test]
    fn rejects_text_without_letters() {
        assert!(!keep("@#$%^&*()"));
        assert!(!keep("12345"));
    }

    #[test]
    fn rejects_code_patterns() {
        for text in [
            "MainActivity.kt",
            "std::vec",
            "onCreate here",
            "my _snake_ case",
            "fun main",
            "class Foo",
            "list [a]",
            "@Override",
            "init()",
            "a; b; c",
        ] {
            assert!(!keep(text), "{text} should be treated as code");
        }
    }

    #[test]
    fn rejects_gibberish() {
        assert!(!keep("xyzpqr"));
        assert!(!keep("aeiou eau"));
        assert!(!keep("Great strengths"));
    }

    #[test]
    fn rejects_symbol_heavy_latin_text() {
        assert!(!keep("Hi!!! ??? !!"));
    }

    #[test]
    fn all_caps_needs_three_words() {
        assert!(!keep("VARIABLENAME"));
        assert!(!keep("WELCOME HOME"));
        assert!(keep("WELCOME HOME TODAY"));
    }

    #[test]
    fn short_acronyms_are_not_caps_noise() {
        let config = FilterConfig::default();
        for text in ["NATO", "USA", "OK!"] {
            assert!(!is_all_caps_noise(text, &text_stats(text), &config), "{text}");
        }
        assert!(is_all_caps_noise("UNESCO", &text_stats("UNESCO"), &config));
    }

    #[test]
    fn acronym_survives_with_relaxed_quality_gate() {
        let config = FilterConfig {
            min_quality: 0.1,
            ..FilterConfig::default()
        };
        assert!(should_keep(&block("NATO", 0, 0, 200, 50), &config));
        assert!(!keep("NATO"));
    }

    #[test]
    fn mixed_script_without_majority_uses_latin_checks() {
        assert_eq!(detect_script("東京駅 xyz"), Script::Other);
        // Would pass the relaxed CJK branch, but has no vowels.
        assert!(!keep("東京駅 xyz"));
        assert!(keep("東京駅 abc"));
    }

    #[test]
    fn keeps_natural_sentences() {
        assert!(keep("Hello World"));
        assert!(keep("Hello"));
        assert!(keep("Hello!"));
        assert!(keep("Please keep your ticket, thank you!"));
    }

    #[test]
    fn quality_gate_rejects_bare_lowercase_word() {
        // Passes every earlier check but scores exactly 0.5.
        assert!(!keep("hello"));
    }

    #[test]
    fn cjk_and_devanagari_skip_latin_heuristics() {
        assert!(keep("博物馆入口"));
        assert!(keep("出口です"));
        assert!(keep("नमस्ते दुनिया"));
        assert!(!keep("出口!!!!"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let config = FilterConfig::default();
        let blocks = vec![
            block("Hi", 0, 0, 100, 50),
            block("Hello World", 0, 60, 200, 110),
            block("MainActivity.kt", 0, 120, 200, 170),
            block("博物馆入口", 0, 180, 200, 230),
        ];
        let once = filter_blocks(blocks, &config);
        let twice = filter_blocks(once.clone(), &config);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn thresholds_come_from_config() {
        let config = FilterConfig {
            min_width: 300,
            ..FilterConfig::default()
        };
        assert!(!should_keep(&block("Hello World", 0, 0, 200, 50), &config));
    }
}
