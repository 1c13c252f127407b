use std::{fmt, str::FromStr};

/// Specifies the type of partition table on a disk.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PartitionTable {
    Msdos,
    Gpt,
    Dasd,
}

impl FromStr for PartitionTable {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let table = match string.to_lowercase().as_str() {
            "msdos" => PartitionTable::Msdos,
            "gpt" => PartitionTable::Gpt,
            "dasd" => PartitionTable::Dasd,
            _ => return Err("invalid partition table type"),
        };
        Ok(table)
    }
}

impl fmt::Display for PartitionTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            PartitionTable::Msdos => "msdos",
            PartitionTable::Gpt => "gpt",
            PartitionTable::Dasd => "dasd",
        })
    }
}
