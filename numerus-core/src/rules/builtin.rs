//! Built-in rule families
//!
//! Each family is a hand-written selection function over
//! [`PluralOperands`] together with the locales that share it and, per
//! keyword, the condition text and whether the keyword is finite for
//! integers and decimals. The conditions are documentation only; selection
//! never parses them.

use super::{PluralRules, RuleKind, SampleKind, OTHER};
use crate::sample::{NumericSample, PluralOperands};

/// One keyword of a rule family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Category keyword
    pub keyword: &'static str,
    /// Condition as written in rule syntax, empty for the catch-all
    pub condition: &'static str,
    /// Finitely many integers match
    pub limited_integer: bool,
    /// Finitely many decimals match
    pub limited_decimal: bool,
}

impl KeywordRule {
    const fn new(
        keyword: &'static str,
        condition: &'static str,
        limited_integer: bool,
        limited_decimal: bool,
    ) -> Self {
        Self {
            keyword,
            condition,
            limited_integer,
            limited_decimal,
        }
    }

    const fn other() -> Self {
        Self::new(OTHER, "", false, false)
    }
}

/// Selection function of a family
pub type SelectFn = fn(&PluralOperands) -> &'static str;

/// A plural rule shared by a group of locales
#[derive(Debug, Clone, Copy)]
pub struct RuleFamily {
    /// Cardinal or ordinal
    pub kind: RuleKind,
    /// Locales using this rule, representative first
    pub locales: &'static [&'static str],
    /// Keywords in presentation order, catch-all last
    pub keywords: &'static [KeywordRule],
    /// Keyword selection
    pub select: SelectFn,
}

impl RuleFamily {
    /// First listed locale
    pub fn representative(&self) -> &'static str {
        self.locales.first().copied().unwrap_or("root")
    }

    fn keyword_rule(&self, keyword: &str) -> Option<&KeywordRule> {
        self.keywords.iter().find(|rule| rule.keyword == keyword)
    }
}

impl PluralRules for RuleFamily {
    fn kind(&self) -> RuleKind {
        self.kind
    }

    fn keywords(&self) -> Vec<&str> {
        self.keywords.iter().map(|rule| rule.keyword).collect()
    }

    fn select(&self, sample: &NumericSample) -> &str {
        (self.select)(&sample.operands())
    }

    fn is_limited(&self, keyword: &str, kind: SampleKind) -> bool {
        self.keyword_rule(keyword).is_some_and(|rule| match kind {
            SampleKind::Integer => rule.limited_integer,
            SampleKind::Decimal => rule.limited_decimal,
        })
    }

    fn rule_text(&self, keyword: &str) -> Option<&str> {
        self.keyword_rule(keyword)
            .map(|rule| rule.condition)
            .filter(|condition| !condition.is_empty())
    }
}

/// `n = value`
fn n_is(op: &PluralOperands, value: u64) -> bool {
    op.is_integral() && op.i == value
}

/// `n % modulus = low..high`
fn n_mod_in(op: &PluralOperands, modulus: u64, low: u64, high: u64) -> bool {
    op.integral_mod(modulus)
        .is_some_and(|rest| (low..=high).contains(&rest))
}

/// `e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5`
fn romance_many(op: &PluralOperands) -> bool {
    (op.e == 0 && op.i != 0 && op.i % 1_000_000 == 0 && op.v == 0) || op.e > 5
}

const ROMANCE_MANY: &str = "e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5";

fn select_one_integer(op: &PluralOperands) -> &'static str {
    if op.i == 1 && op.v == 0 {
        "one"
    } else {
        OTHER
    }
}

fn select_spanish(op: &PluralOperands) -> &'static str {
    if n_is(op, 1) {
        "one"
    } else if romance_many(op) {
        "many"
    } else {
        OTHER
    }
}

fn select_french(op: &PluralOperands) -> &'static str {
    if op.i <= 1 {
        "one"
    } else if romance_many(op) {
        "many"
    } else {
        OTHER
    }
}

fn select_italian(op: &PluralOperands) -> &'static str {
    if op.i == 1 && op.v == 0 {
        "one"
    } else if romance_many(op) {
        "many"
    } else {
        OTHER
    }
}

fn select_breton(op: &PluralOperands) -> &'static str {
    let excluded = |values: &[u64]| {
        op.integral_mod(100)
            .is_some_and(|rest| values.contains(&rest))
    };
    if n_mod_in(op, 10, 1, 1) && !excluded(&[11, 71, 91]) {
        "one"
    } else if n_mod_in(op, 10, 2, 2) && !excluded(&[12, 72, 92]) {
        "two"
    } else if (n_mod_in(op, 10, 3, 4) || n_mod_in(op, 10, 9, 9))
        && !(n_mod_in(op, 100, 10, 19) || n_mod_in(op, 100, 70, 79) || n_mod_in(op, 100, 90, 99))
    {
        "few"
    } else if !n_is(op, 0) && n_mod_in(op, 1_000_000, 0, 0) {
        "many"
    } else {
        OTHER
    }
}

fn select_east_slavic(op: &PluralOperands) -> &'static str {
    if op.v != 0 {
        return OTHER;
    }
    let (last, last_two) = (op.i % 10, op.i % 100);
    if last == 1 && last_two != 11 {
        "one"
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        "few"
    } else {
        "many"
    }
}

fn select_arabic(op: &PluralOperands) -> &'static str {
    if n_is(op, 0) {
        "zero"
    } else if n_is(op, 1) {
        "one"
    } else if n_is(op, 2) {
        "two"
    } else if n_mod_in(op, 100, 3, 10) {
        "few"
    } else if n_mod_in(op, 100, 11, 99) {
        "many"
    } else {
        OTHER
    }
}

fn select_other(_: &PluralOperands) -> &'static str {
    OTHER
}

fn select_english_ordinal(op: &PluralOperands) -> &'static str {
    let last_two = |value| n_mod_in(op, 100, value, value);
    if n_mod_in(op, 10, 1, 1) && !last_two(11) {
        "one"
    } else if n_mod_in(op, 10, 2, 2) && !last_two(12) {
        "two"
    } else if n_mod_in(op, 10, 3, 3) && !last_two(13) {
        "few"
    } else {
        OTHER
    }
}

fn select_one_exactly(op: &PluralOperands) -> &'static str {
    if n_is(op, 1) {
        "one"
    } else {
        OTHER
    }
}

/// Every built-in family, cardinal families first
pub static FAMILIES: &[RuleFamily] = &[
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["ja", "ko", "th", "zh"],
        keywords: &[KeywordRule::other()],
        select: select_other,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["en", "de", "et", "fi", "nl", "sv"],
        keywords: &[
            KeywordRule::new("one", "i = 1 and v = 0", true, true),
            KeywordRule::other(),
        ],
        select: select_one_integer,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["es"],
        keywords: &[
            KeywordRule::new("one", "n = 1", true, true),
            KeywordRule::new("many", ROMANCE_MANY, false, false),
            KeywordRule::other(),
        ],
        select: select_spanish,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["fr", "pt"],
        keywords: &[
            KeywordRule::new("one", "i = 0,1", true, false),
            KeywordRule::new("many", ROMANCE_MANY, false, false),
            KeywordRule::other(),
        ],
        select: select_french,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["it", "ca"],
        keywords: &[
            KeywordRule::new("one", "i = 1 and v = 0", true, true),
            KeywordRule::new("many", ROMANCE_MANY, false, false),
            KeywordRule::other(),
        ],
        select: select_italian,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["br"],
        keywords: &[
            KeywordRule::new("one", "n % 10 = 1 and n % 100 != 11,71,91", false, false),
            KeywordRule::new("two", "n % 10 = 2 and n % 100 != 12,72,92", false, false),
            KeywordRule::new(
                "few",
                "n % 10 = 3..4,9 and n % 100 != 10..19,70..79,90..99",
                false,
                false,
            ),
            KeywordRule::new("many", "n != 0 and n % 1000000 = 0", false, false),
            KeywordRule::other(),
        ],
        select: select_breton,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["ru", "uk"],
        keywords: &[
            KeywordRule::new("one", "v = 0 and i % 10 = 1 and i % 100 != 11", false, true),
            KeywordRule::new(
                "few",
                "v = 0 and i % 10 = 2..4 and i % 100 != 12..14",
                false,
                true,
            ),
            KeywordRule::new(
                "many",
                "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
                false,
                true,
            ),
            KeywordRule::other(),
        ],
        select: select_east_slavic,
    },
    RuleFamily {
        kind: RuleKind::Cardinal,
        locales: &["ar", "ars"],
        keywords: &[
            KeywordRule::new("zero", "n = 0", true, true),
            KeywordRule::new("one", "n = 1", true, true),
            KeywordRule::new("two", "n = 2", true, true),
            KeywordRule::new("few", "n % 100 = 3..10", false, false),
            KeywordRule::new("many", "n % 100 = 11..99", false, false),
            KeywordRule::other(),
        ],
        select: select_arabic,
    },
    RuleFamily {
        kind: RuleKind::Ordinal,
        locales: &["de", "ja", "ko", "zh"],
        keywords: &[KeywordRule::other()],
        select: select_other,
    },
    RuleFamily {
        kind: RuleKind::Ordinal,
        locales: &["en"],
        keywords: &[
            KeywordRule::new("one", "n % 10 = 1 and n % 100 != 11", false, false),
            KeywordRule::new("two", "n % 10 = 2 and n % 100 != 12", false, false),
            KeywordRule::new("few", "n % 10 = 3 and n % 100 != 13", false, false),
            KeywordRule::other(),
        ],
        select: select_english_ordinal,
    },
    RuleFamily {
        kind: RuleKind::Ordinal,
        locales: &["fr", "ms", "vi"],
        keywords: &[
            KeywordRule::new("one", "n = 1", true, true),
            KeywordRule::other(),
        ],
        select: select_one_exactly,
    },
];

/// Families of one kind, in table order
pub fn families(kind: RuleKind) -> impl Iterator<Item = &'static RuleFamily> {
    FAMILIES.iter().filter(move |family| family.kind == kind)
}

/// The family of `kind` listing `locale`
pub fn family_for_locale(kind: RuleKind, locale: &str) -> Option<&'static RuleFamily> {
    families(kind).find(|family| family.locales.contains(&locale))
}
