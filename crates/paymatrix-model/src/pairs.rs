//! Raw scale/amount rows and their validation
//!
//! Dialog rows arrive as text. Parsing is lenient in the way form inputs
//! usually are: surrounding whitespace is ignored and a valid numeric prefix
//! is accepted (`"12px"` → 12). Rows that still fail are dropped and reported
//! in [`PairValidation::dropped`]; [`ValidationPolicy::Strict`] turns any
//! dropped row into a rejection of the whole submission.

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::level::Pair;
use crate::scale::Scale;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One editable row, as typed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawPair {
    /// Scale cell text
    pub scale: String,
    /// Amount cell text
    pub amount: String,
}

impl RawPair {
    /// Create raw row
    #[inline]
    #[must_use]
    pub fn new(scale: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            scale: scale.into(),
            amount: amount.into(),
        }
    }

    /// Both cells empty (an untouched new row)
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.scale.trim().is_empty() && self.amount.trim().is_empty()
    }
}

impl From<Pair> for RawPair {
    fn from(pair: Pair) -> Self {
        Self::new(pair.scale.to_string(), pair.amount.to_string())
    }
}

/// How malformed rows are treated on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Drop malformed rows, keep the rest
    #[default]
    Lenient,
    /// Reject the submission if any row is malformed
    Strict,
}

/// Why a row was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Scale has no leading integer, or does not fit
    UnparsableScale,
    /// Scale parsed to zero
    ZeroScale,
    /// Scale parsed below zero
    NegativeScale,
    /// Amount has no leading number
    UnparsableAmount,
    /// Amount parsed below zero
    NegativeAmount,
    /// Scale already used by an earlier row
    DuplicateScale,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::UnparsableScale => "scale is not a number",
            DropReason::ZeroScale => "scale is zero",
            DropReason::NegativeScale => "scale is negative",
            DropReason::UnparsableAmount => "amount is not a number",
            DropReason::NegativeAmount => "amount is negative",
            DropReason::DuplicateScale => "scale already used",
        };
        f.write_str(text)
    }
}

/// A row removed during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// Zero-based row position in the submission
    pub index: usize,
    /// Row as typed
    pub raw: RawPair,
    /// Reason
    pub reason: DropReason,
}

/// Result of validating a submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairValidation {
    /// Pairs that survived, in submission order
    pub pairs: Vec<Pair>,
    /// Rows that did not
    pub dropped: Vec<DroppedRow>,
}

/// Parse a scale cell
///
/// # Errors
/// The [`DropReason`] the row would be dropped for.
pub fn parse_scale(raw: &str) -> Result<Scale, DropReason> {
    let text = raw.trim();
    let (negative, rest) = split_sign(text);
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(DropReason::UnparsableScale);
    }

    let magnitude: u64 = rest[..digits_len]
        .parse()
        .map_err(|_| DropReason::UnparsableScale)?;
    if magnitude == 0 {
        return Err(DropReason::ZeroScale);
    }
    if negative {
        return Err(DropReason::NegativeScale);
    }

    u32::try_from(magnitude)
        .ok()
        .and_then(|v| Scale::new(v).ok())
        .ok_or(DropReason::UnparsableScale)
}

/// Parse an amount cell
///
/// Accepts the longest prefix of the form `[+-]?(d+[.d*]|.d+)([eE][+-]?d+)?`.
///
/// # Errors
/// The [`DropReason`] the row would be dropped for.
pub fn parse_amount(raw: &str) -> Result<Amount, DropReason> {
    let text = raw.trim();
    let (negative, rest) = split_sign(text);
    let bytes = rest.as_bytes();

    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_len > 0 || frac_len > 0 {
            end += 1 + frac_len;
        }
    }
    if int_len == 0 && frac_len == 0 {
        return Err(DropReason::UnparsableAmount);
    }

    let mut exponent: Option<&str> = None;
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign_len = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = bytes[end + 1 + sign_len..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            exponent = Some(&rest[end + 1..end + 1 + sign_len + exp_digits]);
        }
    }

    let mut mantissa = String::with_capacity(end + 2);
    if negative {
        mantissa.push('-');
    }
    if int_len == 0 {
        mantissa.push('0');
    }
    mantissa.push_str(&rest[..int_len]);
    if frac_len > 0 {
        mantissa.push('.');
        mantissa.push_str(&rest[int_len + 1..int_len + 1 + frac_len]);
    }

    let value = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{mantissa}e{exp}")),
        None => Decimal::from_str(&mantissa),
    }
    .map_err(|_| DropReason::UnparsableAmount)?;

    Amount::new(value).map_err(|_| DropReason::NegativeAmount)
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

/// Validate a submission
///
/// Blank rows are skipped without being reported. The first row for a scale
/// wins; later rows for the same scale are dropped.
///
/// # Errors
/// - `ValidationError::RowsRejected` under [`ValidationPolicy::Strict`] when
///   any row was dropped
/// - `ValidationError::NoPairs` when nothing survives
pub fn validate_pairs(
    raw: &[RawPair],
    policy: ValidationPolicy,
) -> Result<PairValidation, ValidationError> {
    let mut result = PairValidation::default();
    let mut seen = BTreeSet::new();

    for (index, row) in raw.iter().enumerate() {
        if row.is_blank() {
            continue;
        }
        let parsed = parse_scale(&row.scale).and_then(|scale| {
            let amount = parse_amount(&row.amount)?;
            if seen.insert(scale) {
                Ok(Pair::new(scale, amount))
            } else {
                Err(DropReason::DuplicateScale)
            }
        });
        match parsed {
            Ok(pair) => result.pairs.push(pair),
            Err(reason) => result.dropped.push(DroppedRow {
                index,
                raw: row.clone(),
                reason,
            }),
        }
    }

    if policy == ValidationPolicy::Strict && !result.dropped.is_empty() {
        return Err(ValidationError::RowsRejected {
            dropped: result.dropped,
        });
    }
    if result.pairs.is_empty() {
        return Err(ValidationError::NoPairs);
    }
    Ok(result)
}
