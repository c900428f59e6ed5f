use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Box-plot summary of a set of PnL values.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers reach
/// the most extreme values within 1.5 × IQR of the box; anything beyond is
/// an outlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub count: usize,
    pub min: Decimal,
    pub q1: Decimal,
    pub median: Decimal,
    pub q3: Decimal,
    pub max: Decimal,
    pub lower_whisker: Decimal,
    pub upper_whisker: Decimal,
    /// Outlying values in ascending order.
    pub outliers: Vec<Decimal>,
}

impl Distribution {
    /// Summarizes `values`. Returns `None` for an empty slice.
    pub fn from_values(values: &[Decimal]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort();

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let q1 = quartile(&sorted, 1);
        let median = quartile(&sorted, 2);
        let q3 = quartile(&sorted, 3);

        let reach = (q3 - q1) * Decimal::new(15, 1);
        let lower_fence = q1 - reach;
        let upper_fence = q3 + reach;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= lower_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= upper_fence)
            .unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_fence || *v > upper_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// The `k`-th quartile (k in 1..=3) of a non-empty, sorted slice.
fn quartile(sorted: &[Decimal], k: usize) -> Decimal {
    let scaled = k * (sorted.len() - 1);
    let lo = scaled / 4;
    let rem = scaled % 4;
    if rem == 0 {
        return sorted[lo];
    }
    let frac = Decimal::from(rem) / Decimal::from(4);
    sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac
}
