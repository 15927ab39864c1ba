// lcstats-math/src/normality/mod.rs
//! Distribution-shape statistics used as generic non-Gaussianity indicators.
//!
//! Only the raw test statistics are produced; no p-values or thresholds.

extern crate alloc;
use alloc::vec::Vec;
use libm::{erfc, fabs, log, sqrt};

const FRAC_1_SQRT_2: f64 = core::f64::consts::FRAC_1_SQRT_2;

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z * FRAC_1_SQRT_2)
}

/// Beyond this |z| the `erfc` tail is too close to underflow to take its log.
const LOG_TAIL_CUTOFF: f64 = 37.0;

/// Asymptotic expansion of `ln(1 - Φ(z))` for large positive `z`.
fn log_upper_tail_asymptotic(z: f64) -> f64 {
    let inv_z2 = 1.0 / (z * z);
    let series = 1.0 - inv_z2 + 3.0 * inv_z2 * inv_z2 - 15.0 * inv_z2 * inv_z2 * inv_z2;
    -0.5 * z * z - log(z) - 0.5 * log(2.0 * core::f64::consts::PI) + log(series)
}

/// `ln Φ(z)`, finite for every finite `z`.
pub fn normal_log_cdf(z: f64) -> f64 {
    if z < -LOG_TAIL_CUTOFF {
        log_upper_tail_asymptotic(-z)
    } else {
        log(normal_cdf(z))
    }
}

/// `ln(1 - Φ(z))`, evaluated through `erfc` and switching to the asymptotic
/// series in the far upper tail.
pub fn normal_log_sf(z: f64) -> f64 {
    if z > LOG_TAIL_CUTOFF {
        log_upper_tail_asymptotic(z)
    } else {
        log(0.5 * erfc(z * FRAC_1_SQRT_2))
    }
}

fn poly(coefficients: &[f64; 8], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Inverse of the standard normal CDF (Wichura, algorithm AS241, PPND16).
///
/// Accurate to about 1e-16 relative error. Returns ∓inf at 0 and 1, NaN outside.
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 8] = [
        3.387_132_872_796_366_608,
        1.331_416_678_917_843_774_5e2,
        1.971_590_950_306_551_442_7e3,
        1.373_169_376_550_946_112_5e4,
        4.592_195_393_154_987_145_7e4,
        6.726_577_092_700_870_085_3e4,
        3.343_057_558_358_812_810_5e4,
        2.509_080_928_730_122_672_7e3,
    ];
    const B: [f64; 8] = [
        1.0,
        4.231_333_070_160_091_125_2e1,
        6.871_870_074_920_579_083e2,
        5.394_196_021_424_751_107_7e3,
        2.121_379_430_158_659_586_7e4,
        3.930_789_580_009_271_061e4,
        2.872_908_573_572_194_267_4e4,
        5.226_495_278_852_854_561e3,
    ];
    const C: [f64; 8] = [
        1.423_437_110_749_683_577_34,
        4.630_337_846_156_545_295_9,
        5.769_497_221_460_691_405_5,
        3.647_848_324_763_204_605_04,
        1.270_458_252_452_368_382_58,
        2.417_807_251_774_506_117_7e-1,
        2.272_384_498_926_918_458_33e-2,
        7.745_450_142_783_414_076_4e-4,
    ];
    const D: [f64; 8] = [
        1.0,
        2.053_191_626_637_758_821_87,
        1.676_384_830_183_803_849_4,
        6.897_673_349_851_000_045_5e-1,
        1.481_039_764_274_800_745_9e-1,
        1.519_866_656_361_645_719_66e-2,
        5.475_938_084_995_344_946e-4,
        1.050_750_071_644_416_843_24e-9,
    ];
    const E: [f64; 8] = [
        6.657_904_643_501_103_777_2,
        5.463_784_911_164_114_369_9,
        1.784_826_539_917_291_335_8,
        2.965_605_718_285_048_912_3e-1,
        2.653_218_952_657_612_309_3e-2,
        1.242_660_947_388_078_438_6e-3,
        2.711_555_568_743_487_578_15e-5,
        2.010_334_399_292_288_132_65e-7,
    ];
    const F: [f64; 8] = [
        1.0,
        5.998_322_065_558_879_376_9e-1,
        1.369_298_809_227_358_053_1e-1,
        1.487_536_129_085_061_485_25e-2,
        7.868_691_311_456_132_591e-4,
        1.846_318_317_510_054_681_8e-5,
        1.421_511_758_316_445_888_7e-7,
        2.044_263_103_389_939_785_64e-15,
    ];

    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let q = p - 0.5;
    if fabs(q) <= 0.425 {
        let r = 0.180625 - q * q;
        return q * poly(&A, r) / poly(&B, r);
    }

    let tail = if q < 0.0 { p } else { 1.0 - p };
    let mut r = sqrt(-log(tail));
    let value = if r <= 5.0 {
        r -= 1.6;
        poly(&C, r) / poly(&D, r)
    } else {
        r -= 5.0;
        poly(&E, r) / poly(&F, r)
    };

    if q < 0.0 {
        -value
    } else {
        value
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Anderson-Darling A² statistic against a normal distribution with the
/// sample mean and (`ddof = 1`) standard deviation.
pub fn anderson_darling(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sorted = sorted_copy(values);

    let mean = sorted.iter().sum::<f64>() / n;
    let std = sqrt(
        sorted
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / (n - 1.0),
    );

    let z: Vec<f64> = sorted.iter().map(|v| (v - mean) / std).collect();
    let len = z.len();

    let s: f64 = (0..len)
        .map(|i| {
            let weight = (2.0 * (i as f64 + 1.0) - 1.0) / n;
            weight * (normal_log_cdf(z[i]) + normal_log_sf(z[len - 1 - i]))
        })
        .sum();

    -n - s
}

/// Royston's polynomial corrections for the two most extreme coefficients.
const SW_C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const SW_C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];

fn poly6(coefficients: &[f64; 6], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Shapiro-Wilk coefficients `a_i` for a sample of size `n` (Royston 1992).
fn shapiro_wilk_coefficients(n: usize) -> Vec<f64> {
    let mut a = alloc::vec![0.0; n];
    if n == 3 {
        a[0] = -FRAC_1_SQRT_2;
        a[2] = FRAC_1_SQRT_2;
        return a;
    }

    let nf = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| normal_quantile((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2: f64 = m.iter().map(|x| x * x).sum();
    let ssumm2 = sqrt(summ2);
    let u = 1.0 / sqrt(nf);

    let a_n = m[n - 1] / ssumm2 + poly6(&SW_C1, u);

    // Number of extreme coefficients on each side taken from the polynomial fit.
    let (tails, phi) = if n > 5 {
        let a_n1 = m[n - 2] / ssumm2 + poly6(&SW_C2, u);
        a[n - 2] = a_n1;
        a[1] = -a_n1;
        let phi = (summ2 - 2.0 * m[n - 1] * m[n - 1] - 2.0 * m[n - 2] * m[n - 2])
            / (1.0 - 2.0 * a_n * a_n - 2.0 * a_n1 * a_n1);
        (2, phi)
    } else {
        let phi = (summ2 - 2.0 * m[n - 1] * m[n - 1]) / (1.0 - 2.0 * a_n * a_n);
        (1, phi)
    };
    a[n - 1] = a_n;
    a[0] = -a_n;

    let scale = sqrt(phi);
    for i in tails..(n - tails) {
        a[i] = m[i] / scale;
    }
    a
}

/// Shapiro-Wilk W statistic.
///
/// Returns NaN for fewer than three values and 1.0 when the sample has zero range.
pub fn shapiro_wilk(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }

    let sorted = sorted_copy(values);
    if sorted[n - 1] - sorted[0] == 0.0 {
        return 1.0;
    }

    let a = shapiro_wilk_coefficients(n);
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ss: f64 = sorted.iter().map(|x| (x - mean) * (x - mean)).sum();
    let b: f64 = a.iter().zip(&sorted).map(|(a, x)| a * x).sum();

    b * b / ss
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::vec::Vec;

    #[test]
    fn test_normal_cdf_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((normal_cdf(1.959963984540054) - 0.975).abs() < 1e-12);
        assert!((normal_log_sf(0.0) - log(0.5)).abs() < 1e-15);
        // Upper tail stays finite long after 1 - Φ(z) would round to zero.
        assert!(normal_log_sf(30.0).is_finite());
    }

    #[test]
    fn test_normal_quantile_inverts_cdf() {
        for &p in &[1e-10, 0.001, 0.025, 0.2, 0.5, 0.7, 0.975, 0.999] {
            let z = normal_quantile(p);
            assert!((normal_cdf(z) - p).abs() < 1e-12 * p.max(1e-3), "p = {}", p);
        }
        assert!((normal_quantile(0.975) - 1.959963984540054).abs() < 1e-12);
        assert_eq!(normal_quantile(0.5), 0.0);
    }

    #[test]
    fn test_normal_quantile_edges() {
        assert_eq!(normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(normal_quantile(1.0), f64::INFINITY);
        assert!(normal_quantile(1.5).is_nan());
        assert!(normal_quantile(f64::NAN).is_nan());
    }

    #[test]
    fn test_shapiro_wilk_coefficients_match_table() {
        // Shapiro & Wilk (1965) tabulate a_20 = 0.4734; Royston's approximation
        // lands within a few thousandths.
        let a = shapiro_wilk_coefficients(20);
        assert!((a[19] - 0.4734).abs() < 0.01);
        assert!((a[0] + a[19]).abs() < 1e-15);
        let norm: f64 = a.iter().map(|x| x * x).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shapiro_wilk_three_points() {
        // Equally spaced points are as normal as three points get.
        let w = shapiro_wilk(&[1.0, 2.0, 3.0]);
        assert!((w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shapiro_wilk_normal_scores_near_one() {
        let n = 50;
        let scores: Vec<f64> = (1..=n)
            .map(|i| normal_quantile((i as f64 - 0.375) / (n as f64 + 0.25)))
            .collect();
        let w = shapiro_wilk(&scores);
        assert!(w > 0.98 && w <= 1.0, "w = {}", w);
    }

    #[test]
    fn test_shapiro_wilk_detects_outlier() {
        let mut values: Vec<f64> = (0..30).map(|i| (i % 5) as f64).collect();
        values.push(100.0);
        let w = shapiro_wilk(&values);
        assert!(w < 0.5, "w = {}", w);
    }

    #[test]
    fn test_shapiro_wilk_edges() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_nan());
        assert_eq!(shapiro_wilk(&[4.0; 10]), 1.0);
    }

    #[test]
    fn test_anderson_darling_small_for_normal_scores() {
        let n = 100;
        let scores: Vec<f64> = (1..=n)
            .map(|i| normal_quantile((i as f64 - 0.5) / n as f64))
            .collect();
        let a2 = anderson_darling(&scores);
        assert!(a2 >= 0.0 && a2 < 0.2, "a2 = {}", a2);
    }

    #[test]
    fn test_anderson_darling_large_for_skewed_sample() {
        let values: Vec<f64> = (0..100).map(|i| libm::exp(i as f64 / 10.0)).collect();
        assert!(anderson_darling(&values) > 3.0);
    }

    #[test]
    fn test_seeded_gaussian_sample_passes_both_tests() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(2024);
        let gaussian: Vec<f64> = (0..200)
            .map(|_| {
                let u1: f64 = 1.0 - rng.random::<f64>();
                let u2: f64 = rng.random::<f64>();
                sqrt(-2.0 * log(u1)) * libm::cos(2.0 * core::f64::consts::PI * u2)
            })
            .collect();
        let uniform: Vec<f64> = (0..500).map(|_| rng.random::<f64>()).collect();

        assert!(shapiro_wilk(&gaussian) > 0.95);
        assert!(anderson_darling(&gaussian) < 3.0);
        assert!(shapiro_wilk(&uniform) < shapiro_wilk(&gaussian));
        assert!(anderson_darling(&uniform) > 3.0);
    }

    #[test]
    fn test_log_tails_stay_finite_far_from_the_mean() {
        let sf40 = normal_log_sf(40.0);
        assert!((sf40 - (-804.608)).abs() < 1e-2, "ln sf(40) = {}", sf40);
        assert_eq!(normal_log_cdf(-40.0), sf40);
        // Both sides of the cutoff agree.
        assert!((normal_log_sf(36.999) - normal_log_sf(37.001)).abs() < 0.1);
        assert!((normal_log_sf(37.0) - log_upper_tail_asymptotic(37.0)).abs() < 1e-6);
    }

    #[test]
    fn test_anderson_darling_finite_with_single_flare() {
        let mut values: Vec<f64> = (0..2499)
            .map(|i| if i % 2 == 0 { 999.0 } else { 1001.0 })
            .collect();
        values.push(6000.0);
        let a2 = anderson_darling(&values);
        assert!(a2.is_finite(), "a2 = {}", a2);
        assert!(a2 > 3.0);
    }

    #[test]
    fn test_anderson_darling_degenerate_is_nan() {
        assert!(anderson_darling(&[2.0]).is_nan());
        assert!(anderson_darling(&[2.0, 2.0, 2.0]).is_nan());
    }
}
