/// Format a number with a K/M suffix for display.
pub fn format_number(num: f64, decimals: usize) -> String {
    if num >= 1_000_000.0 {
        format!("{:.*}M", decimals, num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.*}K", decimals, num / 1_000.0)
    } else {
        format!("{:.*}", decimals, num)
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Bytes to human readable, B through PB.
pub fn format_bytes(bytes_size: u64) -> String {
    let mut size = bytes_size as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} PB")
}
