use super::script::{is_cjk, is_devanagari};

const VOWELS: &str = "aeiouAEIOU";

pub(super) struct TextStats {
    pub(super) chars: usize,
    pub(super) letters: usize,
    pub(super) uppercase: usize,
    pub(super) vowels: usize,
    /// Neither alphanumeric nor whitespace.
    pub(super) symbols: usize,
    /// Symbols that are not CJK or Devanagari either.
    pub(super) script_symbols: usize,
    pub(super) script_chars: usize,
    pub(super) longest_consonant_run: usize,
}

impl TextStats {
    pub(super) fn has_language_chars(&self) -> bool {
        self.letters > 0 || self.script_chars > 0
    }

    pub(super) fn upper_ratio(&self) -> f32 {
        ratio(self.uppercase, self.letters)
    }

    pub(super) fn letter_vowel_ratio(&self) -> f32 {
        ratio(self.vowels, self.letters)
    }

    pub(super) fn text_vowel_ratio(&self) -> f32 {
        ratio(self.vowels, self.chars)
    }

    pub(super) fn symbol_ratio(&self) -> f32 {
        ratio(self.symbols, self.chars)
    }

    pub(super) fn script_symbol_ratio(&self) -> f32 {
        ratio(self.script_symbols, self.chars)
    }
}

pub(super) fn text_stats(text: &str) -> TextStats {
    let mut stats = TextStats {
        chars: 0,
        letters: 0,
        uppercase: 0,
        vowels: 0,
        symbols: 0,
        script_symbols: 0,
        script_chars: 0,
        longest_consonant_run: 0,
    };
    let mut run = 0usize;
    for ch in text.chars() {
        stats.chars += 1;
        let script_char = is_cjk(ch) || is_devanagari(ch);
        if script_char {
            stats.script_chars += 1;
        }
        if ch.is_alphabetic() {
            stats.letters += 1;
            if ch.is_uppercase() {
                stats.uppercase += 1;
            }
        }
        if !ch.is_alphanumeric() && !ch.is_whitespace() {
            stats.symbols += 1;
            if !script_char {
                stats.script_symbols += 1;
            }
        }

        let is_vowel = VOWELS.contains(ch);
        if is_vowel {
            stats.vowels += 1;
        }
        // Digits and punctuation extend a run the same way consonants do.
        if is_vowel || ch.is_whitespace() {
            run = 0;
        } else {
            run += 1;
            stats.longest_consonant_run = stats.longest_consonant_run.max(run);
        }
    }
    stats
}

pub(super) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}
