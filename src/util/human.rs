/// Whole percent: "42%"
pub fn fmt_used(pct: u64) -> String {
    format!("{}%", pct)
}

/// Throughput with two decimals: "12.50 MiB/s"
pub fn fmt_mibs(mibs: f64) -> String {
    format!("{:.2} MiB/s", mibs)
}

/// Average service time with one decimal: "3.2 ms"
pub fn fmt_await(ms: f64) -> String {
    format!("{:.1} ms", ms)
}

/// Utilisation with one decimal: "84.5%"
pub fn fmt_util(pct: f64) -> String {
    format!("{:.1}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(fmt_used(7), "7%");
        assert_eq!(fmt_mibs(1.0 / 3.0), "0.33 MiB/s");
        assert_eq!(fmt_await(2.26), "2.3 ms");
        assert_eq!(fmt_util(50.0), "50.0%");
    }
}
