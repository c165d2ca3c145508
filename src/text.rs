//! Script-insensitive text normalization.
//!
//! Every string that takes part in matching (the query and each candidate
//! title or URL) goes through [`normalize`], so width, case and kana script
//! differences never affect whether something matches:
//!
//! ```text
//! "  ＧｉｔＨｕｂ  "  -> "github"
//! "ｶﾞｲﾄﾞ"           -> "がいど"
//! "ガイド"           -> "がいど"
//! ```

/// Half-width katakana U+FF66..=U+FF9D mapped to their full-width forms.
const HALF_WIDTH_KATAKANA: &str =
    "ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン";

/// Bases that take a dakuten by advancing one code point (カ -> ガ).
const VOICEABLE: &str = "カキクケコサシスセソタチツテトハヒフヘホ";

/// Bases that take a handakuten by advancing two code points (ハ -> パ).
const SEMI_VOICEABLE: &str = "ハヒフヘホ";

const HALF_WIDTH_DAKUTEN: char = '\u{FF9E}';
const HALF_WIDTH_HANDAKUTEN: char = '\u{FF9F}';

/// Offset between full-width ASCII variants (U+FF01..=U+FF5E) and ASCII.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Offset between katakana (U+30A1..=U+30F6) and hiragana (U+3041..=U+3096).
const KATAKANA_OFFSET: u32 = 0x60;

/// Canonicalize text for matching.
///
/// Trims, lowercases, folds full-width alphanumerics and symbols to ASCII,
/// widens half-width katakana and finally folds katakana to hiragana.
/// The function is pure and idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let ascii = fold_full_width_ascii(&lowered);
    let katakana = widen_half_width_katakana(&ascii);
    katakana_to_hiragana(&katakana)
}

/// Split already-normalized text into search keywords.
///
/// Splits on single spaces and drops empty tokens, so repeated spaces never
/// produce an empty keyword.
pub fn keywords(normalized: &str) -> Vec<String> {
    normalized
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn fold_full_width_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - FULL_WIDTH_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

fn half_width_katakana(c: char) -> Option<char> {
    match c {
        '\u{FF61}' => Some('。'),
        '\u{FF62}' => Some('「'),
        '\u{FF63}' => Some('」'),
        '\u{FF64}' => Some('、'),
        '\u{FF65}' => Some('・'),
        '\u{FF66}'..='\u{FF9D}' => HALF_WIDTH_KATAKANA.chars().nth((c as u32 - 0xFF66) as usize),
        HALF_WIDTH_DAKUTEN => Some('゛'),
        HALF_WIDTH_HANDAKUTEN => Some('゜'),
        _ => None,
    }
}

fn voiced(base: char) -> Option<char> {
    match base {
        'ウ' => Some('ヴ'),
        'ワ' => Some('ヷ'),
        'ヲ' => Some('ヺ'),
        _ if VOICEABLE.contains(base) => char::from_u32(base as u32 + 1),
        _ => None,
    }
}

fn semi_voiced(base: char) -> Option<char> {
    if SEMI_VOICEABLE.contains(base) {
        char::from_u32(base as u32 + 2)
    } else {
        None
    }
}

fn widen_half_width_katakana(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let Some(full) = half_width_katakana(c) else {
            out.push(c);
            continue;
        };

        // A trailing sound mark composes with the preceding kana when possible
        let composed = match chars.peek() {
            Some(&HALF_WIDTH_DAKUTEN) => voiced(full),
            Some(&HALF_WIDTH_HANDAKUTEN) => semi_voiced(full),
            _ => None,
        };

        match composed {
            Some(mark) => {
                chars.next();
                out.push(mark);
            }
            None => out.push(full),
        }
    }

    out
}

fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - KATAKANA_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}
