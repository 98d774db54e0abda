//! CLDR plural category resolution.
//!
//! [`get_rules`] answers "which categories can a plural selector for this
//! locale and these formatting options ever produce". The answer is computed
//! by formatting a fixed set of sample values the way `Intl.PluralRules`
//! does and selecting each formatted value with the CLDR rules of
//! `intl_pluralrules`.

mod format;

use std::fmt;

use intl_pluralrules::{PluralRuleType, PluralRules};
use unic_langid::LanguageIdentifier;

use crate::core::scanner::{Argument, Literal, Property};

use format::format_decimal;

/// The six CLDR plural categories, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl From<intl_pluralrules::PluralCategory> for PluralCategory {
    fn from(category: intl_pluralrules::PluralCategory) -> Self {
        use intl_pluralrules::PluralCategory as Cldr;
        match category {
            Cldr::ZERO => PluralCategory::Zero,
            Cldr::ONE => PluralCategory::One,
            Cldr::TWO => PluralCategory::Two,
            Cldr::FEW => PluralCategory::Few,
            Cldr::MANY => PluralCategory::Many,
            Cldr::OTHER => PluralCategory::Other,
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluralType {
    #[default]
    Cardinal,
    Ordinal,
}

/// Options accepted by a plural selector, mirroring `Intl.PluralRules`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralOptions {
    pub plural_type: PluralType,
    pub minimum_integer_digits: Option<u32>,
    pub minimum_fraction_digits: Option<u32>,
    pub maximum_fraction_digits: Option<u32>,
    pub minimum_significant_digits: Option<u32>,
    pub maximum_significant_digits: Option<u32>,
}

/// Convert the properties of an options object argument.
///
/// Properties whose value is not a literal are skipped, as are unknown
/// property names.
pub fn get_options(properties: &[Property]) -> PluralOptions {
    let mut options = PluralOptions::default();
    for property in properties {
        let Argument::Literal(literal) = &property.value else {
            continue;
        };
        match (property.key.as_str(), literal) {
            ("type", Literal::String(value)) => {
                options.plural_type = match value.as_str() {
                    "ordinal" => PluralType::Ordinal,
                    _ => PluralType::Cardinal,
                };
            }
            (name, Literal::Number(value)) => {
                let digits = digit_option(*value);
                match name {
                    "minimumIntegerDigits" => options.minimum_integer_digits = digits,
                    "minimumFractionDigits" => options.minimum_fraction_digits = digits,
                    "maximumFractionDigits" => options.maximum_fraction_digits = digits,
                    "minimumSignificantDigits" => options.minimum_significant_digits = digits,
                    "maximumSignificantDigits" => options.maximum_significant_digits = digits,
                    _ => {}
                }
            }
            _ => {}
        }
    }
    options
}

fn digit_option(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc().min(u32::MAX as f64) as u32)
}

/// Distinct categories a selector for `locale` with `options` can produce.
///
/// Always contains [`PluralCategory::Other`], which is always last. A locale
/// without CLDR plural data only produces "other".
pub fn get_rules(locale: &str, options: &PluralOptions) -> Vec<PluralCategory> {
    let mut found = [false; 6];
    if let Some(rules) = plural_rules(locale, options.plural_type) {
        for sample in sample_values() {
            let text = format_decimal(sample, options);
            if let Ok(category) = rules.select(text.as_str()) {
                found[PluralCategory::from(category) as usize] = true;
            }
        }
    }
    found[PluralCategory::Other as usize] = true;

    PluralCategory::ALL
        .into_iter()
        .filter(|category| found[*category as usize])
        .collect()
}

/// CLDR rules for `locale`, falling back from the full tag to its language.
fn plural_rules(locale: &str, plural_type: PluralType) -> Option<PluralRules> {
    let rule_type = || match plural_type {
        PluralType::Cardinal => PluralRuleType::CARDINAL,
        PluralType::Ordinal => PluralRuleType::ORDINAL,
    };
    let id = locale.replace('_', "-").parse::<LanguageIdentifier>().ok()?;

    PluralRules::create(id.clone(), rule_type())
        .or_else(|_| {
            let mut language = id;
            language.script = None;
            language.region = None;
            language.clear_variants();
            PluralRules::create(language, rule_type())
        })
        .ok()
}

/// Values exercising every category of every rule table.
fn sample_values() -> Vec<f64> {
    let mut values: Vec<f64> = (0..=200).map(f64::from).collect();
    values.extend([1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0]);
    for whole in 0..=20 {
        for tenth in 1..=9 {
            values.push(f64::from(whole) + f64::from(tenth) / 10.0);
        }
    }
    values.extend([0.01, 0.02, 0.03, 0.05, 0.11, 0.12, 1.01, 1.02, 1.11, 1.21, 2.11]);
    values
}
