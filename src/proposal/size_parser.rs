//! Parsing of the `size` attribute of `<partition>` sections.

use crate::settings::ProposalSettings;
use disk_types::{DiskSize, DiskSizeError};

/// The result of parsing a size expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeInfo {
    /// An absolute range, where `min <= max`. `max` may be unlimited.
    Range { min: DiskSize, max: DiskSize },
    /// A percentage of the space of the container, in `(0, 100]`.
    Percentage(f64),
}

impl SizeInfo {
    /// True if the device is allowed to grow without limit.
    pub fn is_unlimited(&self) -> bool {
        match *self {
            SizeInfo::Range { max, .. } => max.is_unlimited(),
            SizeInfo::Percentage(_) => false,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Fail, PartialEq)]
pub enum SizeError {
    #[fail(display = "invalid size '{}': {}", value, why)]
    InvalidSize { value: String, why: DiskSizeError },
    #[fail(display = "percentage '{}' is not in the (0, 100] range", value)]
    InvalidPercentage { value: String },
    #[fail(display = "size range '{}' has a minimum greater than its maximum", value)]
    InvalidRange { value: String },
}

/// Interprets size expressions, falling back to the product settings for `auto`.
pub struct SizeParser<'a> {
    settings: &'a ProposalSettings,
}

impl<'a> SizeParser<'a> {
    pub fn new(settings: &'a ProposalSettings) -> SizeParser<'a> { SizeParser { settings } }

    /// Parses a size expression.
    ///
    /// Accepted values are a missing or empty value, `max` and `unlimited`
    /// (grow as much as possible), `auto` (the default of the product for the
    /// mount point), a percentage such as `40%`, a range such as `1G-10G`, or
    /// an absolute size. Absolute sizes are kept within `[min, max]`, although
    /// an unlimited size is never limited to `max`.
    pub fn parse(
        &self,
        expression: Option<&str>,
        mount_point: Option<&str>,
        min: DiskSize,
        max: DiskSize,
    ) -> Result<SizeInfo, SizeError> {
        let expression = expression.map_or("", str::trim);

        match expression {
            "" | "max" | "unlimited" => {
                return Ok(SizeInfo::Range { min, max: DiskSize::unlimited() })
            }
            "auto" => return Ok(self.auto_size(mount_point, min, max)),
            _ => (),
        }

        if let Some(percent) = expression.strip_suffix('%') {
            return parse_percentage(percent.trim())
                .map(SizeInfo::Percentage)
                .ok_or_else(|| SizeError::InvalidPercentage { value: expression.into() });
        }

        let (lower, upper) = match split_range(expression) {
            Some((lower, upper)) => (parse_size(lower)?, parse_bound(upper)?),
            None => {
                let size = parse_size(expression)?;
                (size, size)
            }
        };

        if lower > upper || lower.is_unlimited() {
            return Err(SizeError::InvalidRange { value: expression.into() });
        }

        Ok(clamped_range(lower, upper, min, max))
    }

    fn auto_size(&self, mount_point: Option<&str>, min: DiskSize, max: DiskSize) -> SizeInfo {
        match mount_point.and_then(|mount| self.settings.volume_for(mount)) {
            Some(volume) => clamped_range(volume.min_size, volume.max_size, min, max),
            None => SizeInfo::Range { min, max: DiskSize::unlimited() },
        }
    }
}

/// Keeps both ends of a range within `[min, max]`. When the container is
/// smaller than `min`, the lower end never exceeds the upper one.
fn clamped_range(lower: DiskSize, upper: DiskSize, min: DiskSize, max: DiskSize) -> SizeInfo {
    let upper = clamp(upper, min, max);
    SizeInfo::Range { min: clamp(lower, min, max).min(upper), max: upper }
}

fn clamp(size: DiskSize, min: DiskSize, max: DiskSize) -> DiskSize {
    if size.is_unlimited() {
        size
    } else {
        size.clamp_to(min, max)
    }
}

fn parse_percentage(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|&percent| percent > 0.0 && percent <= 100.0)
}

/// Splits `1G-10G` into its bounds. A leading `-` is never a separator.
fn split_range(expression: &str) -> Option<(&str, &str)> {
    let position = expression.char_indices().skip(1).find(|&(_, c)| c == '-')?.0;
    Some((expression[..position].trim(), expression[position + 1..].trim()))
}

fn parse_bound(value: &str) -> Result<DiskSize, SizeError> {
    if value == "max" {
        Ok(DiskSize::unlimited())
    } else {
        parse_size(value)
    }
}

fn parse_size(value: &str) -> Result<DiskSize, SizeError> {
    DiskSize::parse(value, true).map_err(|why| SizeError::InvalidSize { value: value.into(), why })
}
