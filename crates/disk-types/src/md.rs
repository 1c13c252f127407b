use std::{fmt, str::FromStr};

/// The RAID level of a software RAID array.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MdLevel {
    Raid0,
    Raid1,
    Raid4,
    Raid5,
    Raid6,
    Raid10,
}

impl FromStr for MdLevel {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let level = match string.to_lowercase().as_str() {
            "raid0" => MdLevel::Raid0,
            "raid1" => MdLevel::Raid1,
            "raid4" => MdLevel::Raid4,
            "raid5" => MdLevel::Raid5,
            "raid6" => MdLevel::Raid6,
            "raid10" => MdLevel::Raid10,
            _ => return Err("invalid RAID level"),
        };
        Ok(level)
    }
}

impl fmt::Display for MdLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            MdLevel::Raid0 => "raid0",
            MdLevel::Raid1 => "raid1",
            MdLevel::Raid4 => "raid4",
            MdLevel::Raid5 => "raid5",
            MdLevel::Raid6 => "raid6",
            MdLevel::Raid10 => "raid10",
        })
    }
}
