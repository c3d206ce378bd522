use super::{align_words, word_cost, DpOptions};
use crate::error::AlignmentError;
use crate::types::{Token, Verse};

fn verse(number: u32, text: &str) -> Verse {
    Verse::new(1, number, "", text, "", Vec::new())
}

fn tokens(words: &[&str]) -> Vec<Token> {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| Token::new(*w, i as f64, i as f64 + 1.0))
        .collect()
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn no_penalty() -> DpOptions {
    DpOptions {
        continuity_penalty: 0,
        ..DpOptions::default()
    }
}

#[test]
fn word_cost_uses_threshold() {
    assert_eq!(word_cost(&chars("الله"), &chars("الله"), 0.7), 0);
    // similarity 0.75
    assert_eq!(word_cost(&chars("الله"), &chars("اله"), 0.7), 0);
    assert_eq!(word_cost(&chars("الله"), &chars("اله"), 0.8), 1);
    assert_eq!(word_cost(&chars(""), &chars("اله"), 0.0), 1);
    assert_eq!(word_cost(&chars("الله"), &chars(""), 0.0), 1);
}

#[test]
fn exact_copy_maps_every_word_at_zero_cost() {
    let verses = vec![
        verse(1, "بسم الله الرحمن الرحيم"),
        verse(2, "الحمد لله رب العالمين"),
    ];
    let words: Vec<&str> = verses
        .iter()
        .flat_map(|v| v.words.iter().map(String::as_str))
        .collect();
    let path = align_words(&tokens(&words), &verses, &DpOptions::default()).unwrap();

    assert_eq!(path.cost, 0);
    assert_eq!(path.mappings.len(), 8);
    let placed: Vec<(u32, Option<usize>)> = path
        .mappings
        .iter()
        .map(|m| (m.verse_number, m.canonical_word_index))
        .collect();
    assert_eq!(
        placed,
        [
            (1, Some(0)),
            (1, Some(1)),
            (1, Some(2)),
            (1, Some(3)),
            (2, Some(0)),
            (2, Some(1)),
            (2, Some(2)),
            (2, Some(3)),
        ]
    );
}

#[test]
fn substituted_word_keeps_diagonal_mapping() {
    let verses = vec![verse(1, "الحمد لله رب")];
    let path = align_words(&tokens(&["الحمد", "لكم", "رب"]), &verses, &DpOptions::default())
        .unwrap();
    assert_eq!(path.cost, 1);
    let indices: Vec<Option<usize>> = path
        .mappings
        .iter()
        .map(|m| m.canonical_word_index)
        .collect();
    assert_eq!(indices, [Some(0), Some(1), Some(2)]);
}

#[test]
fn diacritics_do_not_affect_matching() {
    let verses = vec![verse(1, "بِسْمِ ٱللَّهِ")];
    let path = align_words(&tokens(&["بسم", "ٱلله"]), &verses, &DpOptions::default()).unwrap();
    assert_eq!(path.cost, 0);
}

#[test]
fn leading_noise_word_is_fallback_assigned() {
    let verses = vec![verse(1, "الله")];
    let path = align_words(&tokens(&["سبحان", "الله"]), &verses, &DpOptions::default()).unwrap();

    assert_eq!(path.mappings.len(), 2);
    assert_eq!(path.mappings[0].canonical_word_index, None);
    assert_eq!(path.mappings[0].verse_number, 1);
    assert_eq!(path.mappings[1].canonical_word_index, Some(0));
    assert_eq!(path.mappings[1].recognized.text, "الله");
}

#[test]
fn continuity_penalty_charges_consecutive_short_verses() {
    // One-word verses 1, 2, 3: the word two back from "سبحان" sits in verse 1.
    let verses = vec![verse(1, "الله"), verse(2, "اكبر"), verse(3, "سبحان")];
    let recognized = tokens(&["الله", "اكبر", "سبحان"]);

    let plain = align_words(&recognized, &verses, &no_penalty()).unwrap();
    let penalized = align_words(&recognized, &verses, &DpOptions::default()).unwrap();

    assert_eq!(plain.cost, 0);
    assert_eq!(penalized.cost, 1);
    let verses_hit: Vec<u32> = penalized.mappings.iter().map(|m| m.verse_number).collect();
    assert_eq!(verses_hit, [1, 2, 3]);
    assert!(penalized
        .mappings
        .iter()
        .all(|m| m.canonical_word_index == Some(0)));
}

#[test]
fn continuity_penalty_ignores_adjacent_word_gap() {
    // Only two canonical words: nothing sits two positions back.
    let verses = vec![verse(1, "الله"), verse(3, "اكبر")];
    let path = align_words(&tokens(&["الله", "اكبر"]), &verses, &DpOptions::default()).unwrap();
    assert_eq!(path.cost, 0);
}

#[test]
fn continuity_penalty_skips_multi_word_verses() {
    // Two words per verse keep every word within one verse of the word two back.
    let verses = vec![
        verse(1, "قل هو"),
        verse(2, "الله احد"),
        verse(3, "الله الصمد"),
    ];
    let words: Vec<&str> = verses
        .iter()
        .flat_map(|v| v.words.iter().map(String::as_str))
        .collect();
    let path = align_words(&tokens(&words), &verses, &DpOptions::default()).unwrap();
    assert_eq!(path.cost, 0);
}

#[test]
fn continuity_penalty_never_lowers_cost() {
    // Recognized stream matches v1w1 and v2w2 but neither middle word.
    let recognized = tokens(&["قل", "الصمد"]);
    for second_verse in [2u32, 3, 7] {
        let verses = vec![verse(1, "قل هو"), verse(second_verse, "الله الصمد")];
        let plain = align_words(&recognized, &verses, &no_penalty()).unwrap();
        let penalized = align_words(&recognized, &verses, &DpOptions::default()).unwrap();
        assert!(
            penalized.cost >= plain.cost,
            "second_verse={second_verse}: {} < {}",
            penalized.cost,
            plain.cost
        );
    }
}

#[test]
fn invocation_to_first_verse_is_contiguous() {
    let verses = vec![verse(0, "بسم الله"), verse(1, "الحمد لله")];
    let path = align_words(
        &tokens(&["بسم", "الله", "الحمد", "لله"]),
        &verses,
        &DpOptions::default(),
    )
    .unwrap();
    assert_eq!(path.cost, 0);
    assert_eq!(path.mappings[2].verse_number, 1);
}

#[test]
fn letter_folding_turns_near_miss_into_match() {
    let verses = vec![verse(1, "ٱلصَّلَوٰةَ")];
    let recognized = tokens(&["الصلاه"]);

    let strict = align_words(&recognized, &verses, &DpOptions::default()).unwrap();
    let folded = align_words(
        &recognized,
        &verses,
        &DpOptions {
            fold_letter_variants: true,
            ..DpOptions::default()
        },
    )
    .unwrap();
    assert_eq!(strict.cost, 1);
    assert_eq!(folded.cost, 0);
}

#[test]
fn empty_recognized_stream_is_rejected() {
    let result = align_words(&[], &[verse(1, "الله")], &DpOptions::default());
    assert!(matches!(result, Err(AlignmentError::EmptyInput)));
}

#[test]
fn verses_without_words_are_degenerate() {
    let verses = vec![Verse::new(5, 1, "", "   ", "", Vec::new())];
    let result = align_words(&tokens(&["الله"]), &verses, &DpOptions::default());
    assert!(matches!(
        result,
        Err(AlignmentError::DegenerateAlignment { section_id: 5 })
    ));
}
