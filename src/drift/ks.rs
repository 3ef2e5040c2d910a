//! Two-sample Kolmogorov-Smirnov test with the asymptotic p-value.

use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsResult {
    /// Largest gap between the two empirical CDFs, in [0, 1].
    pub statistic: f64,
    pub p_value: f64,
}

/// Runs the test over two samples; `None` when either sample is empty.
pub fn ks_two_sample(baseline: &[f64], current: &[f64]) -> Option<KsResult> {
    if baseline.is_empty() || current.is_empty() {
        return None;
    }

    let mut a = baseline.to_vec();
    let mut b = current.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let statistic = ks_statistic(&a, &b);
    let n = a.len() as f64;
    let m = b.len() as f64;
    let effective_n = n * m / (n + m);
    let p_value = kolmogorov_sf(effective_n.sqrt() * statistic);

    Some(KsResult { statistic, p_value })
}

fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    let (n, m) = (a.len(), b.len());
    let (mut i, mut j) = (0, 0);
    let mut d: f64 = 0.0;

    while i < n && j < m {
        let x = a[i].min(b[j]);
        while i < n && a[i] <= x {
            i += 1;
        }
        while j < m && b[j] <= x {
            j += 1;
        }
        let gap = (i as f64 / n as f64 - j as f64 / m as f64).abs();
        d = d.max(gap);
    }

    d
}

/// Survival function of the Kolmogorov distribution, P(K > lambda).
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if !lambda.is_finite() {
        return if lambda > 0.0 { 0.0 } else { 1.0 };
    }
    if lambda <= 0.0 {
        return 1.0;
    }

    let p = if lambda < 1.18 {
        // Jacobi theta form converges fast for small lambda.
        let w = (2.0 * PI).sqrt() / lambda;
        let z = -(PI * PI) / (8.0 * lambda * lambda);
        let s: f64 = (1..=6)
            .map(|k| {
                let odd = (2 * k - 1) as f64;
                (odd * odd * z).exp()
            })
            .sum();
        1.0 - w * s
    } else {
        let mut sum = 0.0;
        for k in 1..=100u32 {
            let kf = f64::from(k);
            let term = (-2.0 * kf * kf * lambda * lambda).exp();
            sum += if k % 2 == 1 { term } else { -term };
            if term < 1e-16 {
                break;
            }
        }
        2.0 * sum
    };

    p.clamp(0.0, 1.0)
}
