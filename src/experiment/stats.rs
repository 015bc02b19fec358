//! Pearson's chi-square test of independence for 2x2 tables, with Yates'
//! continuity correction.

use crate::experiment::contingency::ContingencyTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub p_value: f64,
}

/// Yates-corrected chi-square over a 2x2 table.
///
/// Uses the closed 2x2 form: n * (|ad - bc| - n/2)^2 / (r1 r2 c1 c2), with
/// the correction clamped at zero so near-independent tables produce a
/// statistic of 0 rather than a negative corrected deviation.
///
/// The caller is responsible for rejecting tables with zero cells first; a
/// zero marginal would divide by zero here.
pub fn chi_square_with_yates(table: &ContingencyTable) -> ChiSquareTest {
    let a = table.cells[0][0] as f64;
    let b = table.cells[0][1] as f64;
    let c = table.cells[1][0] as f64;
    let d = table.cells[1][1] as f64;

    let n = table.grand_total() as f64;
    let [r1, r2] = table.row_totals().map(|t| t as f64);
    let [c1, c2] = table.column_totals().map(|t| t as f64);

    let deviation = ((a * d - b * c).abs() - n / 2.0).max(0.0);
    let statistic = n * deviation * deviation / (r1 * r2 * c1 * c2);

    ChiSquareTest {
        statistic,
        p_value: chi_square_sf_1df(statistic),
    }
}

/// Survival function of the chi-square distribution with one degree of
/// freedom: P(X >= x) = erfc(sqrt(x / 2)).
fn chi_square_sf_1df(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    erfc((x / 2.0).sqrt())
}

/// Complementary error function, Abramowitz & Stegun 7.1.26 rational
/// approximation (|error| < 1.5e-7), extended to negative arguments by
/// erfc(-x) = 2 - erfc(x).
fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }

    const P: f64 = 0.327_591_1;
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;

    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    poly * (-x * x).exp()
}
