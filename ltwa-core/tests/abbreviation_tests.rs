//! End-to-end abbreviation scenarios over a miniature LTWA corpus.

use ltwa_core::TitleAbbreviator;

const LTWA: &str = "PATTERN\tREPLACEMENT\tLANGUAGES\n\
international\tInt.\teng\n\
journal\tJ.\tmul\n\
geographical\tGeogr.\teng\n\
geographie\tGéogr.\tfre,ger\n\
information\tInf.\teng\n\
science\tSci.\teng\n\
zeitschrift\tZ.\tger\n\
deutsch-\tdtsch.\tger\n\
altertum\tAltert.\tger\n\
literatur\tLit.\tger\n\
quarterly\tQ.\teng\n\
operation-\tOper.\teng\n\
research\tRes.\teng\n\
american\tAm.\teng\n\
chemical\tChem.\teng\n\
society\tSoc.\teng\n\
proceedings\tProc.\tmul\n\
nature\tn.a.\teng\n\
acta\tn.a.\tlat\n\
oecologia\tOecol.\tlat\n\
zhurnal\tZh.\trus\n\
khimiya\tKhim.\trus\n\
bulletin\tBull.\tmul\n\
's-gravenhage\t's-Gravenh.\tdut\n\
future\tFutur.\teng\n\
futur-\tFut.\teng\n\
review\tRev.\teng\n\
physics\tPhys.\teng\n";

const SHORT_WORDS: &str = "of\nand\nfür\nund\nde\nthe\na\nan\non\nin\n";

fn engine() -> TitleAbbreviator {
    TitleAbbreviator::new(LTWA, SHORT_WORDS).expect("corpus parses")
}

#[test]
fn abbreviates_a_long_english_title() {
    let engine = engine();
    assert_eq!(
        engine.abbreviate("International Journal of Geographical Information Science"),
        "Int. J. Geogr. Inf. Sci."
    );
}

#[test]
fn abbreviates_a_german_title_with_flection() {
    let engine = engine();
    assert_eq!(
        engine.abbreviate("Zeitschrift für deutsches Altertum und deutsche Literatur"),
        "Z. dtsch. Altert. dtsch. Lit."
    );
}

#[test]
fn handles_leading_initialisms_and_embedded_articles() {
    let engine = engine();
    assert_eq!(
        engine.abbreviate("4OR-A Quarterly Journal of Operations Research"),
        "4OR-Q. J. Oper. Res."
    );
}

#[test]
fn preserves_single_word_titles() {
    let engine = engine();
    assert_eq!(engine.abbreviate("Nature"), "Nature");
    assert_eq!(engine.abbreviate("Science"), "Science");
    assert_eq!(engine.abbreviate("A&A"), "A&A");
    assert_eq!(engine.abbreviate("Baha'i"), "Baha'i");
}

#[test]
fn removes_articles_and_short_words() {
    let engine = engine();
    assert_eq!(
        engine.abbreviate("Journal of the American Chemical Society"),
        "J. Am. Chem. Soc."
    );
}

#[test]
fn elides_dependent_title_separators() {
    let engine = engine();
    assert_eq!(engine.abbreviate("Proceedings, Series A"), "Proc. A");
}

#[test]
fn preserves_diacritics_from_the_title() {
    let engine = engine();
    assert_eq!(
        engine.abbreviate("Géographie Internationale"),
        "Géogr. Int."
    );
}

#[test]
fn expands_ligatures_against_the_dictionary() {
    let engine = engine();
    // The sentinel keeps "Acta" as-is; the ligature title character maps
    // onto two dictionary characters and survives into the output.
    assert_eq!(engine.abbreviate("Acta Œcologia"), "Acta Œcol.");
}

#[test]
fn promiscuous_index_still_finds_h_heavy_words() {
    let engine = engine();
    assert_eq!(engine.abbreviate("Zhurnal Khimiya"), "Zh. Khim.");
}

#[test]
fn bad_patterns_match_without_the_index() {
    let engine = engine();
    assert_eq!(
        engine.abbreviate("Bulletin 's-Gravenhage"),
        "Bull. 's-Gravenh."
    );
}

#[test]
fn shorter_appendix_beats_open_ended_flection() {
    let engine = engine();
    // Both `future` and `futur-` cover "Futures"; the whole-word pattern
    // with its one-letter appendix must win the overlap.
    assert_eq!(engine.abbreviate("Futures Research"), "Futur. Res.");
}

#[test]
fn empty_and_whitespace_titles_pass_through() {
    let engine = engine();
    assert_eq!(engine.abbreviate(""), "");
    assert_eq!(engine.abbreviate("   "), "");
    assert_eq!(engine.abbreviate("  Nature  "), "Nature");
}

#[test]
fn abbreviation_is_idempotent_on_stable_titles() {
    let engine = engine();
    for title in ["Nature", "A&A", "Blue Yellow Gazette", "4OR"] {
        let once = engine.abbreviate(title);
        let twice = engine.abbreviate(&once);
        assert_eq!(twice, once, "second pass must not change {title:?}");
    }
}

#[test]
fn output_never_exceeds_the_prepared_title() {
    let engine = engine();
    for title in [
        "International Journal of Geographical Information Science",
        "Zeitschrift für deutsches Altertum und deutsche Literatur",
        "Journal of the American Chemical Society",
        "Proceedings, Series A",
    ] {
        let out = engine.abbreviate(title);
        assert!(
            out.chars().count() <= title.chars().count(),
            "{title:?} grew to {out:?}"
        );
    }
}

#[test]
fn matching_patterns_cover_the_emitted_abbreviations() {
    let engine = engine();
    let cases: [(&str, &[&str]); 3] = [
        (
            "International Journal of Geographical Information Science",
            &["international", "journal", "geographical", "information", "science"],
        ),
        (
            "Journal of the American Chemical Society",
            &["journal", "american", "chemical", "society"],
        ),
        ("Proceedings, Series A", &["proceedings"]),
    ];
    for (title, expected) in cases {
        let matched = engine.matching_patterns(title, None, false, None);
        let names: Vec<&str> = matched.iter().map(|p| p.pattern()).collect();
        for pattern in expected {
            assert!(
                names.contains(pattern),
                "{title:?}: expected {pattern:?} among {names:?}"
            );
        }
    }
}
