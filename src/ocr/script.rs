/// Dominant writing system of a text region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    /// Han, kana and Hangul.
    Cjk,
    /// Devanagari and Bengali.
    Devanagari,
    Other,
}

/// Majority vote over classified characters. A script wins only when it
/// holds more than half of them; ties and empty input fall back to `Other`.
pub fn detect_script(text: &str) -> Script {
    let mut cjk = 0usize;
    let mut devanagari = 0usize;
    let mut latin = 0usize;
    for ch in text.chars() {
        if is_cjk(ch) {
            cjk += 1;
        } else if is_devanagari(ch) {
            devanagari += 1;
        } else if ch.is_alphabetic() {
            latin += 1;
        }
    }

    let total = cjk + devanagari + latin;
    if total == 0 {
        return Script::Other;
    }
    if cjk * 2 > total {
        Script::Cjk
    } else if devanagari * 2 > total {
        Script::Devanagari
    } else if latin * 2 > total {
        Script::Latin
    } else {
        Script::Other
    }
}

pub(super) fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x3040..=0x309F
            | 0x30A0..=0x30FF
            | 0xAC00..=0xD7AF
    )
}

pub(super) fn is_devanagari(ch: char) -> bool {
    matches!(ch as u32, 0x0900..=0x097F | 0x0980..=0x09FF)
}
