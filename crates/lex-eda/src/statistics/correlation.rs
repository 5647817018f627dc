//! Pairwise correlation coefficients.
//!
//! Inputs are complete pairs: both slices have equal length and no missing
//! values. Every function returns `Ok(None)` when the coefficient is undefined
//! (fewer than two pairs, or a constant side).
//!
//! Pearson and Spearman run through polars' correlation expressions. Polars
//! has no Kendall expression, so tau-b is counted here.

use polars::prelude::*;

use crate::error::Result;

pub(crate) fn pearson(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    evaluate(x, y, pearson_corr)
}

/// Spearman's rho: Pearson over average ranks, ties sharing their mean rank.
pub(crate) fn spearman(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    evaluate(x, y, |a, b| spearman_rank_corr(a, b, false))
}

fn evaluate(
    x: &[f64],
    y: &[f64],
    corr: impl FnOnce(Expr, Expr) -> Expr,
) -> Result<Option<f64>> {
    if x.len() != y.len() || x.len() < 2 {
        return Ok(None);
    }

    let pairs = df![
        "x" => x,
        "y" => y,
    ]?;
    let out = pairs
        .lazy()
        .select([corr(col("x"), col("y")).alias("r")])
        .collect()?;

    // constant input comes back as NaN
    let r = out.column("r")?.f64()?.get(0);
    Ok(r.filter(|r| r.is_finite()).map(|r| r.clamp(-1.0, 1.0)))
}

/// Kendall's tau-b, which corrects for ties on either side.
pub(crate) fn kendall(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }

    let (mut concordant, mut discordant) = (0i64, 0i64);
    let (mut tied_x, mut tied_y) = (0i64, 0i64);
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            if dx == 0.0 && dy == 0.0 {
                tied_x += 1;
                tied_y += 1;
            } else if dx == 0.0 {
                tied_x += 1;
            } else if dy == 0.0 {
                tied_y += 1;
            } else if (dx > 0.0) == (dy > 0.0) {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as i64;
    let denominator = (((pairs - tied_x) * (pairs - tied_y)) as f64).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some(((concordant - discordant) as f64 / denominator).clamp(-1.0, 1.0))
}
