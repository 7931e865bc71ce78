//! Elementwise column operators. Every operator maps a column to a column of
//! the same length, so frame invariants survive any combination of them.
//! Fixed application order when several are enabled: smoothing, then percent
//! rebase, then z-score, with the lag shift applied to the anchor column last.

/// Trailing simple moving average with a window capped at `window` samples.
///
/// The window grows from 1 sample at the head of the series instead of waiting
/// for `window` full samples, so the leading edge is kept. Absent inputs do not
/// contribute to the average but still advance the window. `window` is clamped
/// to at least 2.
pub fn rolling_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(2);
    let mut out = Vec::with_capacity(values.len());

    let mut sum = 0.0;
    let mut count: usize = 0;

    for i in 0..values.len() {
        if let Some(v) = values[i] {
            sum += v;
            count += 1;
        }
        // Drop the sample falling out of the trailing window.
        if i >= window {
            if let Some(v) = values[i - window] {
                sum -= v;
                count -= 1;
            }
        }
        out.push(if count > 0 { Some(sum / count as f64) } else { None });
    }

    out
}

/// Normalize a column to 100 at its first observed value.
///
/// The baseline is the first non-absent value of this column alone. A column
/// with no observations, or a zero baseline, rebases to all-absent rather than
/// erroring.
pub fn percent_rebase(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let baseline = values.iter().flatten().next().copied();

    match baseline {
        Some(base) if base != 0.0 => values
            .iter()
            .map(|v| v.map(|x| x / base * 100.0))
            .collect(),
        _ => vec![None; values.len()],
    }
}

/// Standardize a column against its own mean and sample standard deviation.
///
/// The denominator is `count - 1`, clamped to 1. A constant column (zero
/// standard deviation) maps every observation to 0. Absent stays absent.
pub fn zscore(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return values.to_vec();
    }

    let n = present.len();
    let mean = present.iter().sum::<f64>() / n as f64;
    let variance = present
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1).max(1) as f64;
    let std_dev = variance.sqrt();

    values
        .iter()
        .map(|v| {
            v.map(|x| {
                if std_dev == 0.0 {
                    0.0
                } else {
                    (x - mean) / std_dev
                }
            })
        })
        .collect()
}

/// Shift a column by `lag` positions along the date axis.
///
/// This is a row-index shift, not a calendar-day shift: it matches the original
/// dashboard's behavior and only approximates a day offset when the axis has
/// irregular spacing (missing weekends etc.). The value at position `i` moves
/// to `i + lag`; vacated positions become absent and values shifted past either
/// edge are dropped.
pub fn lag_shift(values: &[Option<f64>], lag: i64) -> Vec<Option<f64>> {
    if lag == 0 {
        return values.to_vec();
    }

    let len = values.len();
    let mut out = vec![None; len];
    for (i, v) in values.iter().enumerate() {
        let target = i as i64 + lag;
        if target >= 0 && (target as usize) < len {
            out[target as usize] = *v;
        }
    }
    out
}
