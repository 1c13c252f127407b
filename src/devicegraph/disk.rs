use super::filesystem::{filesystem_links, Filesystem};
use disk_types::{
    BlockDeviceExt, DiskSize, FileSystem, PartitionExt, PartitionFlags, PartitionId,
    PartitionTable, PartitionType,
};

/// Contains relevant information about an existing partition.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Partition {
    /// The kernel name, IE: _/dev/sda1_.
    pub name:            String,
    /// The partition number is the numeric value that follows the disk's device name.
    pub number:          u32,
    pub size:            DiskSize,
    #[new(default)]
    pub id:              PartitionId,
    #[new(value = "PartitionType::Primary")]
    pub part_type:       PartitionType,
    /// The sector where the partition begins.
    #[new(default)]
    pub start_sector:    u64,
    #[new(default)]
    pub flags:           PartitionFlags,
    /// Names of the links in _/dev/disk/by-id_.
    #[new(default)]
    pub udev_ids:        Vec<String>,
    #[new(default)]
    pub filesystem:      Option<Filesystem>,
    /// The volume group this partition is a physical volume of.
    #[new(default)]
    pub lvm_pv:          Option<String>,
    /// The software RAID this partition is a member of.
    #[new(default)]
    pub md_member:       Option<String>,
    /// Reasons reported by the storage layer which forbid resizing.
    #[new(default)]
    pub resize_blockers: Vec<String>,
}

impl BlockDeviceExt for Partition {
    fn get_device_name(&self) -> &str { &self.name }

    fn get_size(&self) -> DiskSize { self.size }

    fn get_aliases(&self) -> Vec<String> {
        self.udev_ids
            .iter()
            .map(|id| ["/dev/disk/by-id/", id].concat())
            .chain(filesystem_links(self.filesystem.as_ref()))
            .collect()
    }
}

impl PartitionExt for Partition {
    fn get_partition_number(&self) -> u32 { self.number }

    fn get_partition_id(&self) -> PartitionId { self.id }

    fn get_partition_type(&self) -> PartitionType { self.part_type }

    fn get_partition_flags(&self) -> PartitionFlags { self.flags }

    fn get_sector_start(&self) -> u64 { self.start_sector }

    fn get_file_system(&self) -> Option<FileSystem> {
        self.filesystem.as_ref().map(|fs| fs.fs_type)
    }

    fn get_file_system_label(&self) -> Option<&str> {
        self.filesystem.as_ref().and_then(|fs| fs.label.as_deref())
    }
}

impl Partition {
    /// The mount point of the file system on this partition, if any.
    pub fn mount_point(&self) -> Option<&str> {
        self.filesystem.as_ref().and_then(|fs| fs.mount_point.as_deref())
    }

    /// True if the partition is used as a building block of an LVM VG or a RAID.
    pub fn is_lvm_or_md_member(&self) -> bool { self.lvm_pv.is_some() || self.md_member.is_some() }
}

/// A disk device of the devicegraph.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Disk {
    /// The kernel name, IE: _/dev/sda_.
    pub name:       String,
    pub size:       DiskSize,
    #[new(default)]
    pub table:      Option<PartitionTable>,
    /// Names of the links in _/dev/disk/by-id_.
    #[new(default)]
    pub udev_ids:   Vec<String>,
    /// Names of the links in _/dev/disk/by-path_.
    #[new(default)]
    pub udev_paths: Vec<String>,
    #[new(default)]
    pub driver:     Option<String>,
    #[new(default)]
    pub partitions: Vec<Partition>,
    /// A file system placed directly on the disk, without partition table.
    #[new(default)]
    pub filesystem: Option<Filesystem>,
}

impl BlockDeviceExt for Disk {
    fn get_device_name(&self) -> &str { &self.name }

    fn get_size(&self) -> DiskSize { self.size }

    fn get_aliases(&self) -> Vec<String> {
        let ids = self.udev_ids.iter().map(|id| ["/dev/disk/by-id/", id].concat());
        let paths = self.udev_paths.iter().map(|path| ["/dev/disk/by-path/", path].concat());
        ids.chain(paths).chain(filesystem_links(self.filesystem.as_ref())).collect()
    }
}

impl Disk {
    /// Adds a partition to the disk, returning the disk.
    pub fn with_partition(mut self, partition: Partition) -> Disk {
        self.partitions.push(partition);
        self
    }

    /// Obtains a partition by its number.
    pub fn get_partition(&self, number: u32) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.number == number)
    }

    /// Obtains a partition by the label of its file system.
    pub fn get_partition_by_label(&self, label: &str) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.get_file_system_label() == Some(label))
    }

    /// Full paths of the udev by-path links.
    pub fn udev_full_paths(&self) -> Vec<String> {
        self.udev_paths.iter().map(|path| ["/dev/disk/by-path/", path].concat()).collect()
    }
}
