/// Canonical comparison form: diacritics and non-letters removed, whitespace
/// collapsed to single spaces, no leading/trailing space.
pub fn normalize(text: &str) -> String {
    normalize_with(text, false)
}

/// Like [`normalize`], optionally folding hamza/wasla alef forms, alef maqsura
/// and ta marbuta onto their bare letters.
pub fn normalize_with(text: &str, fold_letter_variants: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if is_diacritic(c) || !is_script_letter(c) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(if fold_letter_variants {
            fold_letter(c)
        } else {
            c
        });
    }
    out
}

fn is_diacritic(c: char) -> bool {
    matches!(c,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}')
}

fn is_script_letter(c: char) -> bool {
    matches!(c,
        '\u{0621}'..='\u{063A}'
        | '\u{0641}'..='\u{064A}'
        | '\u{066E}'..='\u{066F}'
        | '\u{0671}'..='\u{06D3}'
        | '\u{06D5}'
        | '\u{06EE}'..='\u{06EF}'
        | '\u{06FA}'..='\u{06FC}'
        | '\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08C9}'
        | '\u{FB50}'..='\u{FDFB}'
        | '\u{FE70}'..='\u{FEFC}')
}

fn fold_letter(c: char) -> char {
    match c {
        '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' => '\u{0627}',
        '\u{0649}' => '\u{064A}',
        '\u{0629}' => '\u{0647}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_harakat_and_superscript_alef() {
        assert_eq!(normalize("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ"), "بسم ٱلله ٱلرحمن");
    }

    #[test]
    fn strips_quranic_annotation_marks() {
        // small high meem (U+06E2) and end-of-ayah pause mark (U+06D7)
        assert_eq!(normalize("عَلِيمٌۢ ۗ"), "عليم");
    }

    #[test]
    fn removes_latin_digits_and_punctuation() {
        assert_eq!(normalize("الحمد، لله! (1) abc"), "الحمد لله");
    }

    #[test]
    fn removes_tatweel_without_splitting_word() {
        assert_eq!(normalize("الـلـه"), "الله");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize("  الله \n\t  اكبر  "), "الله اكبر");
    }

    #[test]
    fn empty_and_non_script_input_yield_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("hello world 123"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "بِسْمِ ٱللَّهِ",
            " ،  الحمد  لله ",
            "mixed الله text اكبر",
            "",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input={input:?}");
        }
    }

    #[test]
    fn folding_is_opt_in() {
        assert_eq!(normalize("إِنَّ ٱلصَّلَوٰةَ"), "إن ٱلصلوة");
        assert_eq!(normalize_with("إِنَّ ٱلصَّلَوٰةَ", true), "ان الصلوه");
        assert_eq!(normalize_with("عَلَىٰ", true), "علي");
    }
}
