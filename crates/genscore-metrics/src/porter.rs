//! Porter stemmer over lowercase ASCII tokens, in the NLTK-extended variant
//! that `nltk.stem.PorterStemmer()` uses by default.
//!
//! Departures from the 1980 paper:
//! - an irregular-forms pool (`dying -> die`, `skies -> sky`)
//! - four-letter `-ies` / `-ied` words keep their `ie`
//! - step 1c turns a final `y` into `i` only after a consonant
//! - `alli` is reduced first in step 2, which also gains `fulli` and `logi`
//! - a two-letter vowel-consonant stem counts as `*o`

/// Rule condition, evaluated on the word with the rule's suffix removed.
#[derive(Clone, Copy)]
enum Cond {
    Always,
    /// m > 0
    Positive,
    /// m > 1
    Above1,
    /// m > 1 and the stem ends in `s` or `t`
    Ion,
    /// m > 0, counting the `l` of `logi` as part of the stem
    Logi,
    /// m > 1 measured on the word minus one `l`
    DoubleL,
}

impl Cond {
    fn holds(self, stem: &str) -> bool {
        match self {
            Cond::Always => true,
            Cond::Positive => measure(stem) > 0,
            Cond::Above1 => measure(stem) > 1,
            Cond::Ion => measure(stem) > 1 && matches!(stem.as_bytes().last(), Some(b's' | b't')),
            Cond::Logi => measure(&format!("{stem}l")) > 0,
            Cond::DoubleL => measure(&format!("{stem}l")) > 1,
        }
    }
}

type Rule = (&'static str, &'static str, Cond);

const IRREGULAR: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

const STEP1A: &[Rule] = &[
    ("sses", "ss", Cond::Always),
    ("ies", "i", Cond::Always),
    ("ss", "ss", Cond::Always),
    ("s", "", Cond::Always),
];

const STEP2: &[Rule] = &[
    ("ational", "ate", Cond::Positive),
    ("tional", "tion", Cond::Positive),
    ("enci", "ence", Cond::Positive),
    ("anci", "ance", Cond::Positive),
    ("izer", "ize", Cond::Positive),
    ("bli", "ble", Cond::Positive),
    ("alli", "al", Cond::Positive),
    ("entli", "ent", Cond::Positive),
    ("eli", "e", Cond::Positive),
    ("ousli", "ous", Cond::Positive),
    ("ization", "ize", Cond::Positive),
    ("ation", "ate", Cond::Positive),
    ("ator", "ate", Cond::Positive),
    ("alism", "al", Cond::Positive),
    ("iveness", "ive", Cond::Positive),
    ("fulness", "ful", Cond::Positive),
    ("ousness", "ous", Cond::Positive),
    ("aliti", "al", Cond::Positive),
    ("iviti", "ive", Cond::Positive),
    ("biliti", "ble", Cond::Positive),
    ("fulli", "ful", Cond::Positive),
    ("logi", "log", Cond::Logi),
];

const STEP3: &[Rule] = &[
    ("icate", "ic", Cond::Positive),
    ("ative", "", Cond::Positive),
    ("alize", "al", Cond::Positive),
    ("iciti", "ic", Cond::Positive),
    ("ical", "ic", Cond::Positive),
    ("ful", "", Cond::Positive),
    ("ness", "", Cond::Positive),
];

const STEP4: &[Rule] = &[
    ("al", "", Cond::Above1),
    ("ance", "", Cond::Above1),
    ("ence", "", Cond::Above1),
    ("er", "", Cond::Above1),
    ("ic", "", Cond::Above1),
    ("able", "", Cond::Above1),
    ("ible", "", Cond::Above1),
    ("ant", "", Cond::Above1),
    ("ement", "", Cond::Above1),
    ("ment", "", Cond::Above1),
    ("ent", "", Cond::Above1),
    ("ion", "", Cond::Ion),
    ("ou", "", Cond::Above1),
    ("ism", "", Cond::Above1),
    ("ate", "", Cond::Above1),
    ("iti", "", Cond::Above1),
    ("ous", "", Cond::Above1),
    ("ive", "", Cond::Above1),
    ("ize", "", Cond::Above1),
];

const STEP5B: &[Rule] = &[("ll", "l", Cond::DoubleL)];

pub fn stem(word: &str) -> String {
    if let Some(&(_, base)) = IRREGULAR.iter().find(|(form, _)| *form == word) {
        return base.to_string();
    }
    if word.len() <= 2 || !word.is_ascii() {
        return word.to_string();
    }
    let steps: [fn(String) -> String; 8] = [
        step1a, step1b, step1c, step2, step3, step4, step5a, step5b,
    ];
    steps.into_iter().fold(word.to_string(), |w, step| step(w))
}

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// `m` in `[C](VC)^m[V]`: the number of vowel-to-consonant transitions.
fn measure(stem: &str) -> usize {
    let b = stem.as_bytes();
    (1..b.len())
        .filter(|&i| !is_consonant(b, i - 1) && is_consonant(b, i))
        .count()
}

fn contains_vowel(stem: &str) -> bool {
    let b = stem.as_bytes();
    (0..b.len()).any(|i| !is_consonant(b, i))
}

fn ends_double_consonant(w: &str) -> bool {
    let b = w.as_bytes();
    let n = b.len();
    n >= 2 && b[n - 1] == b[n - 2] && is_consonant(b, n - 1)
}

/// `*o`: consonant-vowel-consonant, the last not w, x or y. Also a bare `vc`.
fn ends_cvc(w: &str) -> bool {
    let b = w.as_bytes();
    let n = b.len();
    (n >= 3
        && is_consonant(b, n - 3)
        && !is_consonant(b, n - 2)
        && is_consonant(b, n - 1)
        && !matches!(b[n - 1], b'w' | b'x' | b'y'))
        || (n == 2 && !is_consonant(b, 0) && is_consonant(b, 1))
}

/// The first rule whose suffix matches decides; a failed condition leaves the word alone.
fn apply_rules(word: String, rules: &[Rule]) -> String {
    for &(suffix, replacement, cond) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            return if cond.holds(stem) {
                format!("{stem}{replacement}")
            } else {
                word
            };
        }
    }
    word
}

fn step1a(word: String) -> String {
    if word.len() == 4 && word.ends_with("ies") {
        return format!("{}ie", &word[..1]);
    }
    apply_rules(word, STEP1A)
}

fn step1b(word: String) -> String {
    if let Some(stem) = word.strip_suffix("ied") {
        let tail = if word.len() == 4 { "ie" } else { "i" };
        return format!("{stem}{tail}");
    }
    if let Some(stem) = word.strip_suffix("eed") {
        return if measure(stem) > 0 {
            format!("{stem}ee")
        } else {
            word
        };
    }

    let stem_len = ["ed", "ing"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .filter(|stem| contains_vowel(stem))
        .map(str::len);
    let Some(len) = stem_len else {
        return word;
    };
    let stem = &word[..len];

    for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
        if let Some(base) = stem.strip_suffix(suffix) {
            return format!("{base}{replacement}");
        }
    }
    if ends_double_consonant(stem) {
        return match stem.as_bytes()[len - 1] {
            b'l' | b's' | b'z' => stem.to_string(),
            _ => stem[..len - 1].to_string(),
        };
    }
    if measure(stem) == 1 && ends_cvc(stem) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn step1c(word: String) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        if stem.len() > 1 && is_consonant(stem.as_bytes(), stem.len() - 1) {
            return format!("{stem}i");
        }
    }
    word
}

fn step2(word: String) -> String {
    if let Some(stem) = word.strip_suffix("alli") {
        if measure(stem) > 0 {
            return step2(format!("{stem}al"));
        }
    }
    apply_rules(word, STEP2)
}

fn step3(word: String) -> String {
    apply_rules(word, STEP3)
}

fn step4(word: String) -> String {
    apply_rules(word, STEP4)
}

fn step5a(word: String) -> String {
    if let Some(stem) = word.strip_suffix('e') {
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_string();
        }
    }
    word
}

fn step5b(word: String) -> String {
    apply_rules(word, STEP5B)
}
