/// Calculate the Pearson correlation coefficient between two positionally
/// aligned columns. Returns (correlation, count of paired non-absent samples).
///
/// Only positions where both columns carry a value participate. Fewer than 3
/// paired samples, or a degenerate denominator (either side constant), yields
/// `None` for the coefficient — never NaN.
pub fn pearson_correlation(a: &[Option<f64>], b: &[Option<f64>]) -> (Option<f64>, usize) {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (va, vb) in a.iter().zip(b.iter()) {
        if let (Some(va), Some(vb)) = (va, vb) {
            x.push(*va);
            y.push(*vb);
        }
    }

    let n = x.len();
    if n < 3 {
        return (None, n);
    }

    let nf = n as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|v| v * v).sum();
    let sum_yy: f64 = y.iter().map(|v| v * v).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let denominator = ((nf * sum_xx - sum_x * sum_x) * (nf * sum_yy - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        return (None, n);
    }

    // Clamp to [-1, 1] to absorb floating point error.
    let r = (numerator / denominator).clamp(-1.0, 1.0);
    (Some(r), n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_correlation_is_one() {
        let x = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(8.0)];
        let (r, n) = pearson_correlation(&x, &x);
        assert_eq!(n, 4);
        assert!((r.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let x = vec![Some(1.0), Some(2.0), Some(3.0)];
        let y = vec![Some(3.0), Some(2.0), Some(1.0)];
        let (r, n) = pearson_correlation(&x, &y);
        assert_eq!(n, 3);
        assert!((r.unwrap() - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_pairs_undefined() {
        let x = vec![Some(1.0), Some(2.0), None];
        let y = vec![Some(2.0), None, Some(3.0)];
        let (r, n) = pearson_correlation(&x, &y);
        assert_eq!(n, 1);
        assert!(r.is_none());
    }

    #[test]
    fn test_constant_side_undefined() {
        let x = vec![Some(5.0), Some(5.0), Some(5.0), Some(5.0)];
        let y = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let (r, n) = pearson_correlation(&x, &y);
        assert_eq!(n, 4);
        assert!(r.is_none());
    }

    #[test]
    fn test_only_paired_positions_count() {
        let x = vec![Some(1.0), None, Some(2.0), Some(3.0), Some(4.0)];
        let y = vec![None, Some(9.0), Some(2.0), Some(3.0), Some(4.0)];
        let (r, n) = pearson_correlation(&x, &y);
        assert_eq!(n, 3);
        assert!((r.unwrap() - 1.0).abs() < 1e-9);
    }
}
