/// Bytes below this are shown in kB.
const KB_DISPLAY_LIMIT: u64 = 10_000_000;

pub fn ceil(value: f64) -> i64 {
    value.ceil() as i64
}

/// Human "time ago" for elapsed seconds. Hours are never singularised, so
/// one hour reads "1 hours".
pub fn format_elapsed(seconds: i64) -> String {
    if seconds < 60 {
        "< 1 minute".to_string()
    } else if seconds < 120 {
        "1 minute".to_string()
    } else if seconds < 3600 {
        format!("{} minutes", seconds / 60)
    } else {
        format!("{} hours", seconds / 3600)
    }
}

/// Mempool size for the summary bar, in decimal kB or MB rounded up.
pub fn format_mempool_size(bytes: u64) -> String {
    if bytes < KB_DISPLAY_LIMIT {
        format!("{}kB", ceil(bytes as f64 / 1000.0))
    } else {
        format!("{}MB", ceil(bytes as f64 / (1000.0 * 1000.0)))
    }
}

pub fn format_block_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1000.0 * 1000.0))
}
