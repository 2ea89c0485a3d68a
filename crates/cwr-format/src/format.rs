//! Value normalization for CWR fields.
//!
//! Every function here is total: bad input yields the documented default
//! (`"00000"` for shares, `"000000"` for durations, empty for dates and
//! IPIs), never an error.

use chrono::NaiveDate;

/// Width of every share field.
pub const SHARE_WIDTH: usize = 5;

const ZERO_SHARE: &str = "00000";
const ZERO_DURATION: &str = "000000";
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

/// Strip and uppercase a value before it is written into a field.
///
/// Control characters become spaces, so a value can never break a record
/// across lines.
pub fn normalize_value(raw: &str) -> String {
    let flattened: String = raw
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    flattened.trim().to_uppercase()
}

/// A percentage with two implied decimals (`16.5%` is `Share(1650)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Share(u32);

impl Share {
    pub const ZERO: Share = Share(0);
    pub const FULL: Share = Share(10_000);
    /// Largest value a 5-digit field can carry.
    pub const MAX: Share = Share(99_999);

    /// `round(percent * 100)`; `None` for negative, non-finite or
    /// unrepresentable values.
    pub fn from_percent(percent: f64) -> Option<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return None;
        }
        let hundredths = (percent * 100.0).round();
        if hundredths > f64::from(Self::MAX.0) {
            return None;
        }
        Some(Self(hundredths as u32))
    }

    /// Parse `"16.5"`, `"33%"` or `" 50.00 % "`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        if number.is_empty() {
            return None;
        }
        number.parse::<f64>().ok().and_then(Self::from_percent)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// The 5-digit field text.
    pub fn to_field(self) -> String {
        format!("{:0width$}", self.0, width = SHARE_WIDTH)
    }

    /// Read field text back: digits in hundredths, `"01650"` is 16.5%.
    pub fn from_field(raw: &str) -> Option<Self> {
        let digits = raw.trim();
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }
}

/// Anything a share can be read from.
pub trait ShareInput {
    fn to_share(&self) -> Option<Share>;
}

impl ShareInput for Share {
    fn to_share(&self) -> Option<Share> {
        Some(*self)
    }
}

impl ShareInput for f64 {
    fn to_share(&self) -> Option<Share> {
        Share::from_percent(*self)
    }
}

impl ShareInput for f32 {
    fn to_share(&self) -> Option<Share> {
        Share::from_percent(f64::from(*self))
    }
}

impl ShareInput for u32 {
    fn to_share(&self) -> Option<Share> {
        Share::from_percent(f64::from(*self))
    }
}

impl ShareInput for &str {
    fn to_share(&self) -> Option<Share> {
        Share::parse(self)
    }
}

impl ShareInput for String {
    fn to_share(&self) -> Option<Share> {
        Share::parse(self)
    }
}

impl ShareInput for &String {
    fn to_share(&self) -> Option<Share> {
        Share::parse(self)
    }
}

impl<T: ShareInput> ShareInput for Option<T> {
    fn to_share(&self) -> Option<Share> {
        self.as_ref().and_then(ShareInput::to_share)
    }
}

/// Format a percentage as a 5-digit share field.
///
/// ```
/// use cwr_format::format_share;
///
/// assert_eq!(format_share(16.5), "01650");
/// assert_eq!(format_share("33%"), "03300");
/// assert_eq!(format_share(None::<f64>), "00000");
/// ```
pub fn format_share(value: impl ShareInput) -> String {
    value
        .to_share()
        .map_or_else(|| ZERO_SHARE.to_string(), Share::to_field)
}

/// Total seconds of `MM:SS`, `HH:MM:SS` or a raw seconds count.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [seconds] => (0, 0, parse_seconds(seconds)?),
        [minutes, seconds] => (0, parse_unit(minutes)?, parse_seconds(seconds)?),
        [hours, minutes, seconds] => (
            parse_unit(hours)?,
            parse_unit(minutes)?,
            parse_seconds(seconds)?,
        ),
        _ => return None,
    };
    if parts.len() > 1 && seconds >= 60 {
        return None;
    }
    if parts.len() == 3 && minutes >= 60 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

fn parse_unit(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Whole seconds; fractional seconds are dropped.
fn parse_seconds(raw: &str) -> Option<u64> {
    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc() as u64)
}

/// Normalize a duration to `HHMMSS`; `"000000"` when absent or unparsable.
///
/// ```
/// use cwr_format::format_duration;
///
/// assert_eq!(format_duration(Some("3:45")), "000345");
/// assert_eq!(format_duration(Some("1:02:03")), "010203");
/// assert_eq!(format_duration(Some("215")), "000335");
/// assert_eq!(format_duration(Some("n/a")), "000000");
/// ```
pub fn format_duration(raw: Option<&str>) -> String {
    let Some(total) = raw.and_then(parse_duration_seconds) else {
        return ZERO_DURATION.to_string();
    };
    let hours = total / 3600;
    if hours > 99 {
        return ZERO_DURATION.to_string();
    }
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}{minutes:02}{seconds:02}")
}

/// Digits of an IPI number.
///
/// Spreadsheet exports often carry IPIs as floats (`356296239.0`) or in
/// scientific notation (`3.56296239E8`); both are read back as whole
/// numbers. Anything else that is not digits yields an empty string, which a
/// zero-padded field renders as all zeros.
pub fn format_ipi(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    if trimmed.contains(['e', 'E']) {
        return scientific_ipi(trimmed).unwrap_or_default();
    }
    let integral = trimmed
        .strip_suffix(".0")
        .or_else(|| trimmed.strip_suffix(".00"))
        .unwrap_or(trimmed);
    if integral.is_empty() || !integral.chars().all(|ch| ch.is_ascii_digit()) {
        return String::new();
    }
    integral.to_string()
}

/// A whole number written as `3.56296239E8`. Fractions, negatives and
/// values wider than 11 digits are rejected.
fn scientific_ipi(text: &str) -> Option<String> {
    const LIMIT: f64 = 1e11;
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value >= LIMIT || value.fract() != 0.0 {
        return None;
    }
    Some(format!("{value:.0}"))
}

/// Normalize a date to `YYYYMMDD`; `None` when it cannot be read.
pub fn format_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.format("%Y%m%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_rounds_to_hundredths() {
        assert_eq!(format_share(16.5), "01650");
        assert_eq!(format_share(50.0), "05000");
        assert_eq!(format_share(100.0), "10000");
        assert_eq!(format_share(33.333), "03333");
        assert_eq!(format_share(0.004), "00000");
    }

    #[test]
    fn share_accepts_percent_strings() {
        assert_eq!(format_share("33%"), "03300");
        assert_eq!(format_share(" 12.5 % "), "01250");
        assert_eq!(format_share("100"), "10000");
    }

    #[test]
    fn share_defaults_to_zero() {
        assert_eq!(format_share(None::<f64>), "00000");
        assert_eq!(format_share(""), "00000");
        assert_eq!(format_share("abc"), "00000");
        assert_eq!(format_share("%"), "00000");
        assert_eq!(format_share(-5.0), "00000");
        assert_eq!(format_share(f64::NAN), "00000");
        assert_eq!(format_share(f64::INFINITY), "00000");
        assert_eq!(format_share(1000.0), "00000");
    }

    #[test]
    fn share_constants() {
        assert_eq!(Share::FULL.to_field(), "10000");
        assert_eq!(Share::parse("16.5").map(Share::hundredths), Some(1650));
        assert!((Share::FULL.as_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn share_reads_field_text() {
        assert_eq!(Share::from_field("01650").map(Share::hundredths), Some(1650));
        assert_eq!(Share::from_field("10000"), Some(Share::FULL));
        assert_eq!(Share::from_field(""), None);
        assert_eq!(Share::from_field("16.5"), None);
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(Some("03:45")), "000345");
        assert_eq!(format_duration(Some("75:00")), "011500");
        assert_eq!(format_duration(Some("01:02:03")), "010203");
        assert_eq!(format_duration(Some("215.9")), "000335");
        assert_eq!(format_duration(Some("3:45.5")), "000345");
    }

    #[test]
    fn duration_defaults() {
        assert_eq!(format_duration(None), "000000");
        assert_eq!(format_duration(Some("")), "000000");
        assert_eq!(format_duration(Some("3:75")), "000000");
        assert_eq!(format_duration(Some("1:2:3:4")), "000000");
        assert_eq!(format_duration(Some("-12")), "000000");
        assert_eq!(format_duration(Some("1:-5")), "000000");
        assert_eq!(format_duration(Some("400000")), "000000");
    }

    #[test]
    fn ipi_drops_float_suffix() {
        assert_eq!(format_ipi(Some("356296239.0")), "356296239");
        assert_eq!(format_ipi(Some(" 00356296239 ")), "00356296239");
        assert_eq!(format_ipi(Some("IPI-123")), "");
        assert_eq!(format_ipi(None), "");
    }

    #[test]
    fn ipi_reads_scientific_notation() {
        assert_eq!(format_ipi(Some("3.56296239E8")), "356296239");
        assert_eq!(format_ipi(Some("3.56296239e+08")), "356296239");
        assert_eq!(format_ipi(Some("1.5E0")), "");
        assert_eq!(format_ipi(Some("-3.5E8")), "");
        assert_eq!(format_ipi(Some("1E12")), "");
        assert_eq!(format_ipi(Some("E8")), "");
    }

    #[test]
    fn dates_normalize() {
        assert_eq!(format_date("2021-05-14").as_deref(), Some("20210514"));
        assert_eq!(format_date("20210514").as_deref(), Some("20210514"));
        assert_eq!(format_date("14/05/2021").as_deref(), Some("20210514"));
        assert_eq!(format_date("May 2021"), None);
    }

    #[test]
    fn normalize_strips_and_uppercases() {
        assert_eq!(normalize_value("  Dust Mites "), "DUST MITES");
    }

    #[test]
    fn normalize_flattens_control_characters() {
        assert_eq!(normalize_value("Dust\nMites"), "DUST MITES");
        assert_eq!(normalize_value("Dust\r\nMites\t"), "DUST  MITES");
        assert_eq!(normalize_value("\u{1b}[0m"), "[0M");
    }
}
