use loupe_core::stopwords::load_stopwords;
use loupe_core::Normalizer;

const CALIBRATION_INPUT: &str = "Document will describe marketing strategies carried out by U.S. \
    companies for their agricultural chemicals, report predictions for market share of such \
    chemicals, or report market statistics for agrochemicals, pesticide, herbicide, fungicide, \
    insecticide, fertilizer, predicted sales, market share, stimulate demand, price cut, volume \
    of sales.";

const CALIBRATION_OUTPUT: &str = "document describ market strategi carri compani agricultur \
    chemic report predict market share chemic report market statist agrochem pesticid herbicid \
    fungicid insecticid fertil predict sale market share stimul demand price cut volum sale";

fn calibration_output() -> Vec<String> {
    CALIBRATION_OUTPUT
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn calibration_phrase_normalizes_exactly() {
    let normalizer = Normalizer::with_default_stopwords();
    assert_eq!(
        normalizer.normalize_line(CALIBRATION_INPUT),
        calibration_output()
    );
}

#[test]
fn normalization_is_idempotent() {
    let normalizer = Normalizer::with_default_stopwords();
    let once = normalizer.normalize_line(CALIBRATION_INPUT);
    let again = normalizer.normalize_line(&once.join(" "));
    assert_eq!(once, again);
}

#[test]
fn emitted_terms_are_in_normal_form() {
    let normalizer = Normalizer::with_default_stopwords();
    let terms = normalizer.normalize_line(CALIBRATION_INPUT);
    assert!(!terms.is_empty());
    for term in terms {
        assert!(term.len() >= 2, "short term {term:?}");
        assert!(
            term.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
            "non-normalized term {term:?}"
        );
    }
}

#[test]
fn drops_short_tokens_and_stopwords() {
    let normalizer = Normalizer::with_default_stopwords();
    assert!(normalizer.normalize_line("a I x of the to 9").is_empty());
}

#[test]
fn degenerate_input_yields_no_terms() {
    let normalizer = Normalizer::with_default_stopwords();
    assert!(normalizer.normalize_line("").is_empty());
    assert!(normalizer.normalize_line("... !!! --- ??? ,,,").is_empty());
}

#[test]
fn missing_stopword_file_yields_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let set = load_stopwords(&dir.path().join("absent.txt")).unwrap();
    assert!(set.is_empty());
}

#[test]
fn stopword_file_is_trimmed_lowercased_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stop.txt");
    std::fs::write(&path, "The\n  and \nthe\n\nOR\n").unwrap();
    let set = load_stopwords(&path).unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains("the"));
    assert!(set.contains("and"));
    assert!(set.contains("or"));
}

#[test]
fn stopword_filtering_follows_the_supplied_set() {
    // An empty set keeps everything the tokenizer emits.
    let keep_all = Normalizer::new(Default::default());
    assert_eq!(
        keep_all.normalize_line("the market"),
        vec!["the".to_string(), "market".to_string()]
    );
}
