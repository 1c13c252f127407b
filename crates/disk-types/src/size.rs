use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

pub const KIB: u64 = 1024;
pub const MIB: u64 = KIB * 1024;
pub const GIB: u64 = MIB * 1024;
pub const TIB: u64 = GIB * 1024;
pub const PIB: u64 = TIB * 1024;

/// A possible error when parsing a size from a string.
#[derive(Debug, Fail, PartialEq)]
pub enum DiskSizeError {
    #[fail(display = "size value is empty")]
    Empty,
    #[fail(display = "'{}' is not a valid number", value)]
    InvalidNumber { value: String },
    #[fail(display = "'{}' is not a known size unit", unit)]
    InvalidUnit { unit: String },
    #[fail(display = "size '{}' does not fit in 64 bits", value)]
    Overflow { value: String },
}

/// The size of a block device, in bytes, or the `Unlimited` sentinel.
///
/// `Unlimited` is always greater than any finite size, and arithmetic that
/// involves it stays unlimited.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DiskSize {
    Bytes(u64),
    Unlimited,
}

impl DiskSize {
    pub const fn zero() -> DiskSize { DiskSize::Bytes(0) }

    pub const fn unlimited() -> DiskSize { DiskSize::Unlimited }

    pub const fn b(bytes: u64) -> DiskSize { DiskSize::Bytes(bytes) }

    pub const fn kib(value: u64) -> DiskSize { DiskSize::Bytes(value * KIB) }

    pub const fn mib(value: u64) -> DiskSize { DiskSize::Bytes(value * MIB) }

    pub const fn gib(value: u64) -> DiskSize { DiskSize::Bytes(value * GIB) }

    pub const fn tib(value: u64) -> DiskSize { DiskSize::Bytes(value * TIB) }

    pub fn is_unlimited(self) -> bool { self == DiskSize::Unlimited }

    pub fn is_zero(self) -> bool { self == DiskSize::Bytes(0) }

    /// The number of bytes, or `None` if the size is unlimited.
    pub fn to_bytes(self) -> Option<u64> {
        match self {
            DiskSize::Bytes(bytes) => Some(bytes),
            DiskSize::Unlimited => None,
        }
    }

    /// The given percentage of this size. A percentage of an unlimited size is unlimited.
    pub fn percent(self, percent: f64) -> DiskSize {
        match self {
            DiskSize::Bytes(bytes) => DiskSize::Bytes((bytes as f64 * percent / 100.0) as u64),
            DiskSize::Unlimited => DiskSize::Unlimited,
        }
    }

    /// Restrict this size to the `[min, max]` range.
    pub fn clamp_to(self, min: DiskSize, max: DiskSize) -> DiskSize {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }

    /// Parses a size, such as `10G`, `512 MiB` or `1.5TB`.
    ///
    /// A number without unit is a number of bytes. `K`, `M`, `G`, `T` and `P`
    /// are always binary units. With `legacy_units`, the decimal spellings
    /// (`KB`, `MB`, ...) are also considered binary, which is how AutoYaST
    /// profiles have always been read.
    pub fn parse(input: &str, legacy_units: bool) -> Result<DiskSize, DiskSizeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DiskSizeError::Empty);
        }

        if input.eq_ignore_ascii_case("unlimited") {
            return Ok(DiskSize::Unlimited);
        }

        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or_else(|| input.len());
        let (number, unit) = input.split_at(split);

        let number = number
            .parse::<f64>()
            .map_err(|_| DiskSizeError::InvalidNumber { value: input.into() })?;

        let multiplier = unit_multiplier(unit.trim(), legacy_units)
            .ok_or_else(|| DiskSizeError::InvalidUnit { unit: unit.trim().into() })?;

        let bytes = (number * multiplier as f64).round();
        if bytes >= u64::max_value() as f64 {
            return Err(DiskSizeError::Overflow { value: input.into() });
        }

        Ok(DiskSize::Bytes(bytes as u64))
    }
}

fn unit_multiplier(unit: &str, legacy_units: bool) -> Option<u64> {
    let decimal = |binary: u64, power: u32| if legacy_units { binary } else { 1000u64.pow(power) };

    let multiplier = match unit.to_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kib" => KIB,
        "m" | "mib" => MIB,
        "g" | "gib" => GIB,
        "t" | "tib" => TIB,
        "p" | "pib" => PIB,
        "kb" => decimal(KIB, 1),
        "mb" => decimal(MIB, 2),
        "gb" => decimal(GIB, 3),
        "tb" => decimal(TIB, 4),
        "pb" => decimal(PIB, 5),
        _ => return None,
    };

    Some(multiplier)
}

impl Default for DiskSize {
    fn default() -> DiskSize { DiskSize::zero() }
}

impl PartialOrd for DiskSize {
    fn partial_cmp(&self, other: &DiskSize) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for DiskSize {
    fn cmp(&self, other: &DiskSize) -> Ordering {
        match (*self, *other) {
            (DiskSize::Bytes(a), DiskSize::Bytes(b)) => a.cmp(&b),
            (DiskSize::Bytes(_), DiskSize::Unlimited) => Ordering::Less,
            (DiskSize::Unlimited, DiskSize::Bytes(_)) => Ordering::Greater,
            (DiskSize::Unlimited, DiskSize::Unlimited) => Ordering::Equal,
        }
    }
}

impl Add for DiskSize {
    type Output = DiskSize;

    fn add(self, other: DiskSize) -> DiskSize {
        match (self, other) {
            (DiskSize::Bytes(a), DiskSize::Bytes(b)) => {
                a.checked_add(b).map_or(DiskSize::Unlimited, DiskSize::Bytes)
            }
            _ => DiskSize::Unlimited,
        }
    }
}

impl Sub for DiskSize {
    type Output = DiskSize;

    /// Saturates at zero. Subtracting from an unlimited size leaves it unlimited.
    fn sub(self, other: DiskSize) -> DiskSize {
        match (self, other) {
            (DiskSize::Bytes(a), DiskSize::Bytes(b)) => DiskSize::Bytes(a.saturating_sub(b)),
            (DiskSize::Bytes(_), DiskSize::Unlimited) => DiskSize::zero(),
            (DiskSize::Unlimited, _) => DiskSize::Unlimited,
        }
    }
}

impl From<u64> for DiskSize {
    fn from(bytes: u64) -> DiskSize { DiskSize::Bytes(bytes) }
}

impl FromStr for DiskSize {
    type Err = DiskSizeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> { DiskSize::parse(input, false) }
}

impl fmt::Display for DiskSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes = match *self {
            DiskSize::Unlimited => return f.write_str("unlimited"),
            DiskSize::Bytes(bytes) => bytes,
        };

        const UNITS: [(u64, &str); 5] =
            [(PIB, "PiB"), (TIB, "TiB"), (GIB, "GiB"), (MIB, "MiB"), (KIB, "KiB")];

        for &(size, unit) in UNITS.iter() {
            if bytes >= size {
                return write!(f, "{:.2} {}", bytes as f64 / size as f64, unit);
            }
        }

        write!(f, "{} B", bytes)
    }
}
