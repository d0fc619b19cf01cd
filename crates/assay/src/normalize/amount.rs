//! Monetary amount cleaning.
//!
//! Raw amounts arrive in both European ("1.234.567,89") and US
//! ("1,234,567.89") conventions, often with currency symbols or other noise.
//! Cleaning strips the noise, removes thousands grouping, normalizes the
//! decimal marker, and parses the result as an exact [`Decimal`].

use rust_decimal::Decimal;

/// Separator heuristics for amount cleaning.
#[derive(Debug, Clone)]
pub struct AmountRules {
    /// Characters that can act as either grouping or decimal separators.
    pub separators: Vec<char>,
    /// Digit count of one thousands group.
    pub group_size: usize,
}

impl Default for AmountRules {
    fn default() -> Self {
        Self {
            separators: vec!['.', ','],
            group_size: 3,
        }
    }
}

/// Outcome of cleaning one raw amount string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountOutcome {
    /// No digits present; the zero amount stands in silently.
    Empty,
    /// Cleanly parsed.
    Parsed(Decimal),
    /// Malformed numeral; the zero amount stands in and a warning is due.
    Fallback,
}

impl AmountOutcome {
    /// The amount carried by this outcome.
    pub fn value(&self) -> Decimal {
        match self {
            AmountOutcome::Parsed(v) => *v,
            AmountOutcome::Empty | AmountOutcome::Fallback => zero(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AmountOutcome::Fallback)
    }
}

/// The zero amount, `0.00`.
pub fn zero() -> Decimal {
    Decimal::new(0, 2)
}

/// Clean a raw amount string into a decimal value.
///
/// Steps, in order: digit-free input yields zero; a `-` anywhere marks the
/// value negative; everything but digits and separators is stripped;
/// separators in thousands-grouping position are deleted; remaining
/// separators become the decimal point; the sign is re-attached and the
/// result parsed. A parse failure at the last step degrades to
/// [`AmountOutcome::Fallback`] rather than erroring.
pub fn clean_amount(raw: &str, rules: &AmountRules) -> AmountOutcome {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return AmountOutcome::Empty;
    }

    let negative = raw.contains('-');

    let kept: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || rules.separators.contains(c))
        .collect();

    let mut normalized = String::with_capacity(kept.len() + 1);
    if negative {
        normalized.push('-');
    }
    for (i, &c) in kept.iter().enumerate() {
        if rules.separators.contains(&c) {
            if is_grouping(&kept, i, rules) {
                continue;
            }
            normalized.push('.');
        } else {
            normalized.push(c);
        }
    }

    match normalized.parse::<Decimal>() {
        Ok(value) => AmountOutcome::Parsed(value),
        Err(_) => AmountOutcome::Fallback,
    }
}

/// A separator is thousands grouping when a digit precedes it and exactly
/// one group of digits follows, terminated by another separator or the end
/// of the input. This is what tells "1.234.567" apart from "1234.56".
fn is_grouping(chars: &[char], at: usize, rules: &AmountRules) -> bool {
    if at == 0 || !chars[at - 1].is_ascii_digit() {
        return false;
    }

    let mut digits = 0;
    let mut next = at + 1;
    while next < chars.len() && chars[next].is_ascii_digit() {
        digits += 1;
        next += 1;
    }

    digits == rules.group_size
        && (next == chars.len() || rules.separators.contains(&chars[next]))
}
