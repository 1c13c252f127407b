use crate::{device::BlockDeviceExt, fs::FileSystem};

bitflags! {
    /// Flags set on a partition table entry.
    pub struct PartitionFlags: u8 {
        const BOOT        = 0b001;
        const LEGACY_BOOT = 0b010;
        const HIDDEN      = 0b100;
    }
}

impl Default for PartitionFlags {
    fn default() -> PartitionFlags { PartitionFlags::empty() }
}

/// Defines whether the partition is a primary, logical, or extended partition.
///
/// # Note
///
/// This only applies for MBR partition tables.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PartitionType {
    Primary,
    Logical,
    Extended,
}

/// The partition id, independent of the partition table type.
///
/// Ids are written in the profile with the legacy MBR numbering (`131` for
/// Linux, `142` for LVM, ...), so that numbering is kept as the conversion
/// format.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PartitionId {
    Linux,
    Swap,
    Lvm,
    Raid,
    Esp,
    Prep,
    BiosBoot,
    Dos12,
    Dos16,
    Dos32,
    Ntfs,
    WindowsBasicData,
    Extended,
    Unknown(u32),
}

impl PartitionId {
    pub fn from_legacy(id: u32) -> PartitionId {
        match id {
            0x01 => PartitionId::Dos12,
            0x04 | 0x06 | 0x0e => PartitionId::Dos16,
            0x05 | 0x0f | 0x85 => PartitionId::Extended,
            0x07 => PartitionId::Ntfs,
            0x0b | 0x0c => PartitionId::Dos32,
            0x41 => PartitionId::Prep,
            0x82 => PartitionId::Swap,
            0x83 => PartitionId::Linux,
            0x8e => PartitionId::Lvm,
            0xef | 259 => PartitionId::Esp,
            0xfd => PartitionId::Raid,
            257 => PartitionId::BiosBoot,
            261 => PartitionId::WindowsBasicData,
            other => PartitionId::Unknown(other),
        }
    }

    pub fn to_legacy(self) -> u32 {
        match self {
            PartitionId::Linux => 0x83,
            PartitionId::Swap => 0x82,
            PartitionId::Lvm => 0x8e,
            PartitionId::Raid => 0xfd,
            PartitionId::Esp => 259,
            PartitionId::Prep => 0x41,
            PartitionId::BiosBoot => 257,
            PartitionId::Dos12 => 0x01,
            PartitionId::Dos16 => 0x06,
            PartitionId::Dos32 => 0x0c,
            PartitionId::Ntfs => 0x07,
            PartitionId::WindowsBasicData => 261,
            PartitionId::Extended => 0x0f,
            PartitionId::Unknown(id) => id,
        }
    }

    /// Ids that are typically used by a Windows system.
    pub fn is_windows_system(self) -> bool {
        match self {
            PartitionId::Dos12
            | PartitionId::Dos16
            | PartitionId::Dos32
            | PartitionId::Ntfs
            | PartitionId::WindowsBasicData => true,
            _ => false,
        }
    }
}

impl Default for PartitionId {
    fn default() -> PartitionId { PartitionId::Linux }
}

/// Trait to provide methods for interacting with partition-based block device.
pub trait PartitionExt: BlockDeviceExt {
    /// The number that follows the disk's device name, IE: _/dev/sda1_.
    fn get_partition_number(&self) -> u32;

    /// The partition id.
    fn get_partition_id(&self) -> PartitionId;

    /// Whether this partition is primary, logical, or extended.
    fn get_partition_type(&self) -> PartitionType;

    /// Flags that this partition has been assigned.
    fn get_partition_flags(&self) -> PartitionFlags;

    /// The sector where this partition begins on the parent block device.
    fn get_sector_start(&self) -> u64;

    /// Defines the file system that this partition is formatted with.
    fn get_file_system(&self) -> Option<FileSystem>;

    /// The label of the file system, if it has one.
    fn get_file_system_label(&self) -> Option<&str>;

    fn is_extended(&self) -> bool { self.get_partition_type() == PartitionType::Extended }

    /// True if the boot flag is set on the partition.
    fn is_boot(&self) -> bool { self.get_partition_flags().contains(PartitionFlags::BOOT) }

    /// True if the partition is a swap partition.
    fn is_swap(&self) -> bool { self.get_file_system().map_or(false, |fs| fs == FileSystem::Swap) }
}
