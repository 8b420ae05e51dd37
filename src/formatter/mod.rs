use std::time::SystemTime;

use chrono::{DateTime, Local};

pub struct Formatter {}

impl Formatter {
    pub fn format_size(size: u64, precision: u8) -> String {
        let mut size_float = size as f64;
        let mut size_unit = "B";

        if size_float > 1024.0 {
            size_float /= 1024.0;
            size_unit = "KB";
        }
        if size_float > 1024.0 {
            size_float /= 1024.0;
            size_unit = "MB";
        }
        if size_float > 1024.0 {
            size_float /= 1024.0;
            size_unit = "GB";
        }
        if size_float > 1024.0 {
            size_float /= 1024.0;
            size_unit = "TB";
        }

        format!(
            "{number:.prec$} {unit}",
            number = size_float,
            prec = precision as usize,
            unit = size_unit
        )
    }

    /// Always in kilobytes with two decimals, e.g. `2.93 KB`.
    pub fn format_kilobytes(size: u64) -> String {
        format!("{:.2} KB", size as f64 / 1024.0)
    }

    /// Local time with microseconds, e.g. `2026-10-04 09:15:02.000310`.
    pub fn format_timestamp(time: SystemTime) -> String {
        let local: DateTime<Local> = time.into();
        local.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn size_scales_to_largest_unit() {
        assert_eq!(Formatter::format_size(512, 2), "512.00 B");
        assert_eq!(Formatter::format_size(1536, 1), "1.5 KB");
        assert_eq!(Formatter::format_size(5 * 1024 * 1024 + 1, 0), "5 MB");
    }

    #[test]
    fn kilobytes_keep_two_decimals() {
        assert_eq!(Formatter::format_kilobytes(3000), "2.93 KB");
        assert_eq!(Formatter::format_kilobytes(0), "0.00 KB");
        assert_eq!(Formatter::format_kilobytes(1024 * 1024), "1024.00 KB");
    }

    #[test]
    fn timestamp_has_microseconds() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_micros(1_700_000_000_123_456);
        let formatted = Formatter::format_timestamp(time);
        assert!(formatted.ends_with(".123456"), "got {}", formatted);
        assert_eq!(formatted.len(), "2023-11-14 22:13:20.123456".len());
    }
}
