//! Mapping between on-disk measurement identifiers and figure text.
//!
//! Measurement tables encode the floating-point format as the significand
//! width in bits (11, 24, 53) and label homomorphic series by accumulator
//! generation (`HEAR0`..`HEAR2`). The figure shows format names (`FP16`..)
//! and reduction factors (`HEAR γ=2`..) instead, so every identifier is
//! rewritten exactly once, here.

use std::fmt;

use crate::error::{FigureError, Result};

/// Floating-point format of one measurement column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Half,
    Single,
    Double,
}

impl Precision {
    /// Column order of the figure, narrowest format first.
    pub const ALL: [Precision; 3] = [Precision::Half, Precision::Single, Precision::Double];

    /// Maps a significand-width code from a table file name.
    ///
    /// Codes outside the three known formats abort the run: an unknown code
    /// means the input directory holds tables this figure cannot describe.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            11 => Ok(Precision::Half),
            24 => Ok(Precision::Single),
            53 => Ok(Precision::Double),
            other => Err(FigureError::UnknownPrecision(other)),
        }
    }

    /// Significand width in bits, as used in table file names.
    pub fn code(&self) -> u32 {
        match self {
            Precision::Half => 11,
            Precision::Single => 24,
            Precision::Double => 53,
        }
    }

    /// Format name shown under the bottom row of panels.
    pub fn label(&self) -> &'static str {
        match self {
            Precision::Half => "FP16",
            Precision::Single => "FP32",
            Precision::Double => "FP64",
        }
    }

    /// Grid column of this precision; same order as [`Precision::ALL`].
    pub fn col_index(&self) -> usize {
        match self {
            Precision::Half => 0,
            Precision::Single => 1,
            Precision::Double => 2,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Arithmetic operation measured by one row of panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Addition,
    Multiplication,
}

impl Operation {
    /// Row order of the figure.
    pub const ALL: [Operation; 2] = [Operation::Addition, Operation::Multiplication];

    /// Row title drawn along the right edge of the figure.
    pub fn title(&self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Multiplication => "Multiplication",
        }
    }

    /// Grid row of this operation; same order as [`Operation::ALL`].
    pub fn row_index(&self) -> usize {
        match self {
            Operation::Addition => 0,
            Operation::Multiplication => 1,
        }
    }

    /// Stem of the measurement table file names for this operation.
    pub fn table_stem(&self) -> &'static str {
        match self {
            Operation::Addition => "addition_combined",
            Operation::Multiplication => "multiplication_new",
        }
    }

    /// Series identifiers this operation's tables carry, in drawing order.
    ///
    /// The addition harness distinguishes accumulator generations; the
    /// multiplication harness only records native vs. homomorphic.
    pub fn series_order(&self) -> &'static [&'static str] {
        match self {
            Operation::Addition => &["native", "HEAR0", "HEAR1", "HEAR2"],
            Operation::Multiplication => &["Native", "HEAR"],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Rewrites a raw series identifier into its legend form.
///
/// The accumulator generations map to their reduction factor γ. Identifiers
/// without a known rewrite pass through unchanged, so the multiplication
/// series (`Native`, `HEAR`) keep their on-disk names.
pub fn display_series(raw: &str) -> &str {
    match raw {
        "native" => "Native",
        "HEAR0" => "HEAR γ=2",
        "HEAR1" => "HEAR γ=1",
        "HEAR2" => "HEAR γ=0",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_from_code() {
        assert_eq!(Precision::from_code(11).unwrap(), Precision::Half);
        assert_eq!(Precision::from_code(24).unwrap(), Precision::Single);
        assert_eq!(Precision::from_code(53).unwrap(), Precision::Double);
    }

    #[test]
    fn test_precision_from_unknown_code() {
        let err = Precision::from_code(32).unwrap_err();
        match err {
            FigureError::UnknownPrecision(code) => assert_eq!(code, 32),
            other => panic!("expected UnknownPrecision, got {other:?}"),
        }
    }

    #[test]
    fn test_precision_code_round_trip() {
        for precision in Precision::ALL {
            assert_eq!(Precision::from_code(precision.code()).unwrap(), precision);
        }
    }

    #[test]
    fn test_precision_labels() {
        let labels: Vec<&str> = Precision::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["FP16", "FP32", "FP64"]);
    }

    #[test]
    fn test_operation_table_stems() {
        assert_eq!(Operation::Addition.table_stem(), "addition_combined");
        assert_eq!(Operation::Multiplication.table_stem(), "multiplication_new");
    }

    #[test]
    fn test_grid_indices_match_declared_order() {
        for (i, precision) in Precision::ALL.iter().enumerate() {
            assert_eq!(precision.col_index(), i);
        }
        for (i, operation) in Operation::ALL.iter().enumerate() {
            assert_eq!(operation.row_index(), i);
        }
    }

    #[test]
    fn test_series_order_per_operation() {
        assert_eq!(
            Operation::Addition.series_order(),
            &["native", "HEAR0", "HEAR1", "HEAR2"]
        );
        assert_eq!(Operation::Multiplication.series_order(), &["Native", "HEAR"]);
    }

    #[test]
    fn test_display_series_rewrites() {
        assert_eq!(display_series("native"), "Native");
        assert_eq!(display_series("HEAR0"), "HEAR γ=2");
        assert_eq!(display_series("HEAR1"), "HEAR γ=1");
        assert_eq!(display_series("HEAR2"), "HEAR γ=0");
    }

    #[test]
    fn test_display_series_passthrough() {
        assert_eq!(display_series("Native"), "Native");
        assert_eq!(display_series("HEAR"), "HEAR");
        assert_eq!(display_series("unheard-of"), "unheard-of");
    }
}
