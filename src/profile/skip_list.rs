use crate::devicegraph::Disk;
use disk_types::BlockDeviceExt;
use std::str::FromStr;

/// The disk attribute that a skip rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKey {
    /// The kernel name, IE: _/dev/sda_.
    Device,
    /// The kernel name without directory, IE: _sda_.
    Name,
    /// The size of the disk, in KiB.
    SizeK,
    /// The kernel driver.
    Driver,
    /// The type of the partition table.
    Label,
    /// Any of the _/dev/disk/by-id_ names.
    UdevId,
}

impl FromStr for SkipKey {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let key = match string {
            "device" => SkipKey::Device,
            "name" => SkipKey::Name,
            "size_k" => SkipKey::SizeK,
            "driver" => SkipKey::Driver,
            "label" => SkipKey::Label,
            "udev_id" => SkipKey::UdevId,
            _ => return Err("invalid skip list key"),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipPredicate {
    EqualTo,
    LessThan,
    MoreThan,
}

impl FromStr for SkipPredicate {
    type Err = &'static str;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let predicate = match string {
            "equal_to" => SkipPredicate::EqualTo,
            "less_than" => SkipPredicate::LessThan,
            "more_than" => SkipPredicate::MoreThan,
            _ => return Err("invalid skip list predicate"),
        };
        Ok(predicate)
    }
}

/// A single `<skip_list>` entry.
#[derive(Debug, Clone, PartialEq, new)]
pub struct SkipRule {
    pub key:       SkipKey,
    pub predicate: SkipPredicate,
    pub value:     String,
}

impl SkipRule {
    /// True if the disk must be skipped according to this rule.
    pub fn matches(&self, disk: &Disk) -> bool {
        let values: Vec<String> = match self.key {
            SkipKey::Device => vec![disk.name.clone()],
            SkipKey::Name => vec![disk.get_basename().to_owned()],
            SkipKey::SizeK => {
                disk.size.to_bytes().map(|bytes| (bytes / 1024).to_string()).into_iter().collect()
            }
            SkipKey::Driver => disk.driver.iter().cloned().collect(),
            SkipKey::Label => disk.table.iter().map(|table| table.to_string()).collect(),
            SkipKey::UdevId => disk.udev_ids.clone(),
        };

        values.iter().any(|value| self.compare(value))
    }

    fn compare(&self, value: &str) -> bool {
        match self.predicate {
            SkipPredicate::EqualTo => value == self.value,
            SkipPredicate::LessThan | SkipPredicate::MoreThan => {
                let (value, reference) = match (value.parse::<u64>(), self.value.parse::<u64>()) {
                    (Ok(value), Ok(reference)) => (value, reference),
                    _ => return false,
                };

                if self.predicate == SkipPredicate::LessThan {
                    value < reference
                } else {
                    value > reference
                }
            }
        }
    }
}

/// A collection of rules to exclude disks when a drive does not name one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SkipList {
    pub rules: Vec<SkipRule>,
}

impl SkipList {
    pub fn new(rules: Vec<SkipRule>) -> SkipList { SkipList { rules } }

    /// True if any of the rules matches the disk.
    pub fn matches(&self, disk: &Disk) -> bool { self.rules.iter().any(|rule| rule.matches(disk)) }

    pub fn is_empty(&self) -> bool { self.rules.is_empty() }
}
