//! Formula evaluation tests
//!
//! Tests for the restricted expression language including:
//! - Arithmetic, precedence and cell references
//! - Error handling without panics
//! - Passthrough of plain text input

use proptest::prelude::*;

use shared::grid::{
    evaluate_formula, evaluate_or_error, CellPatch, CellValue, FormulaError, Grid, ERROR_VALUE,
};

fn grid_with(values: &[(&str, &str)]) -> Grid {
    let mut grid = Grid::new();
    for (id, value) in values {
        grid.set(
            id,
            CellPatch {
                value: Some(value.to_string()),
                style: None,
            },
        );
    }
    grid
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The four operators with standard precedence
    #[test]
    fn test_arithmetic() {
        let grid = Grid::new();
        for (formula, expected) in [
            ("=1+2*3", 7.0),
            ("=(1+2)*3", 9.0),
            ("=10-4/2", 8.0),
            ("=2*3+4*5", 26.0),
            ("=-(2+3)", -5.0),
        ] {
            assert_eq!(
                evaluate_formula(formula, &grid),
                Ok(CellValue::Number(expected)),
                "{formula}"
            );
        }
    }

    /// References pick up stored cell values
    #[test]
    fn test_references() {
        let grid = grid_with(&[("A1", "10"), ("B12", "2.5")]);
        assert_eq!(
            evaluate_formula("=A1*B12", &grid),
            Ok(CellValue::Number(25.0))
        );
    }

    /// Absent and non-numeric cells count as zero
    #[test]
    fn test_missing_and_text_cells_are_zero() {
        let grid = grid_with(&[("A1", "hello")]);
        assert_eq!(
            evaluate_formula("=A1+Z99+5", &grid),
            Ok(CellValue::Number(5.0))
        );
    }

    /// Input without a leading = is text, returned untouched
    #[test]
    fn test_plain_text_passthrough() {
        let grid = Grid::new();
        for text in ["hello", "3+4", "  padded  ", ""] {
            assert_eq!(
                evaluate_formula(text, &grid),
                Ok(CellValue::Text(text.to_string()))
            );
        }
    }

    /// Division by zero is an error, never infinity
    #[test]
    fn test_division_by_zero() {
        let grid = grid_with(&[("A1", "0")]);
        assert_eq!(
            evaluate_formula("=1/0", &grid),
            Err(FormulaError::DivisionByZero)
        );
        assert_eq!(
            evaluate_formula("=1/A1", &grid),
            Err(FormulaError::DivisionByZero)
        );
    }

    /// Anything outside the language is rejected, including function names
    #[test]
    fn test_rejected_input() {
        let grid = Grid::new();
        for bad in [
            "=",
            "=1+",
            "=(1",
            "=1)",
            "=foo",
            "=SUM(A1:B2)",
            "=a1",
            "=1;2",
            "=1 2",
        ] {
            assert!(evaluate_formula(bad, &grid).is_err(), "{bad} should fail");
            assert_eq!(evaluate_or_error(bad, &grid), ERROR_VALUE);
        }
    }

    /// A failed formula leaves the target cell exactly as it was
    #[test]
    fn test_error_leaves_grid_untouched() {
        let mut grid = grid_with(&[("C1", "kept")]);
        assert!(grid.enter("C1", "=1+*2").is_err());
        assert_eq!(grid.value("C1"), "kept");
    }

    /// Successful entry stores the display value and remembers the formula
    #[test]
    fn test_enter_records_formula() {
        let mut grid = grid_with(&[("A1", "6"), ("A2", "7")]);
        grid.enter("A3", "=A1*A2").unwrap();

        let cell = grid.get("A3");
        assert_eq!(cell.value, "42");
        assert_eq!(cell.formula.as_deref(), Some("=A1*A2"));

        // Overwriting with plain input drops the formula
        grid.enter("A3", "99").unwrap();
        assert!(grid.get("A3").formula.is_none());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Evaluation never panics, whatever the input
        #[test]
        fn prop_never_panics(input in ".*") {
            let grid = Grid::new();
            let _ = evaluate_formula(&input, &grid);
            let _ = evaluate_or_error(&input, &grid);
        }

        /// Literal addition matches f64 addition
        #[test]
        fn prop_addition_matches(a in 0u32..100_000, b in 0u32..100_000) {
            let grid = Grid::new();
            let result = evaluate_formula(&format!("={a}+{b}"), &grid);
            prop_assert_eq!(result, Ok(CellValue::Number(f64::from(a) + f64::from(b))));
        }

        /// Non-formula input always comes back verbatim
        #[test]
        fn prop_text_passthrough(input in "[^=].*") {
            let grid = Grid::new();
            prop_assert_eq!(
                evaluate_formula(&input, &grid),
                Ok(CellValue::Text(input.clone()))
            );
        }

        /// Referencing a stored number reproduces it
        #[test]
        fn prop_reference_round_trip(n in 0i64..1_000_000) {
            let grid = grid_with(&[("A1", &n.to_string())]);
            prop_assert_eq!(
                evaluate_formula("=A1", &grid),
                Ok(CellValue::Number(n as f64))
            );
        }
    }
}
