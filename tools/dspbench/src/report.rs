//! Result formatting.

use dspbench::BenchStats;

/// Significant digits in the printed result.
const PRECISION: i32 = 6;

/// Format the single result line: `<program> <milliseconds> ms`.
pub fn result_line(program: &str, seconds: f64) -> String {
    format!("{program} {} ms", general(seconds * 1000.0))
}

/// Render `x` with [`PRECISION`] significant digits, in `%g` style: fixed
/// notation for moderate exponents, scientific otherwise, trailing zeros
/// removed.
fn general(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }

    // Take the exponent after rounding, so 999999.7 becomes 1e+06.
    let digits = (PRECISION - 1).unsigned_abs() as usize;
    let sci = format!("{x:.digits$e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..PRECISION).contains(&exp) {
        let decimals = (PRECISION - 1 - exp).unsigned_abs() as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_owned()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.unsigned_abs())
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Log the full distribution at debug level, in milliseconds.
pub fn log_summary(stats: &BenchStats, trimmed: f64) {
    let ms = |s: f64| s * 1000.0;
    tracing::debug!(
        samples = stats.count,
        min_ms = ms(stats.min),
        median_ms = ms(stats.median),
        mean_ms = ms(stats.mean),
        max_ms = ms(stats.max),
        stddev_ms = ms(stats.stddev),
        trimmed_ms = ms(trimmed),
        "sample summary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        assert_eq!(result_line("./reverb", 0.0025), "./reverb 2.5 ms");
        assert_eq!(result_line("dspbench", 0.0), "dspbench 0 ms");
        assert_eq!(result_line("dspbench", 1.0), "dspbench 1000 ms");
    }

    #[test]
    fn six_significant_digits() {
        assert_eq!(result_line("p", 1.28e-7), "p 0.000128 ms");
        assert_eq!(result_line("p", 1.234_567_89e-3), "p 1.23457 ms");
        assert_eq!(result_line("p", 0.123_456_7), "p 123.457 ms");
    }

    #[test]
    fn scientific_outside_fixed_range() {
        assert_eq!(general(1e-5), "1e-05");
        assert_eq!(general(1_234_567.8), "1.23457e+06");
        assert_eq!(general(999_999.7), "1e+06");
        assert_eq!(general(0.0001), "0.0001");
        assert_eq!(general(123_456.0), "123456");
    }
}
