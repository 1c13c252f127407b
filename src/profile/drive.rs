use super::{partition::PartitionSpec, skip_list::SkipList};
use crate::devicegraph::{DeviceRef, Disk, Filesystem, LvmVg, Md, Partition};
use disk_types::{PartitionExt, PartitionTable};
use std::str::FromStr;

/// The kind of device a `<drive>` section describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveType {
    Disk,
    Lvm,
    Md,
}

/// The strategy to follow with the existing partitions of a disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveUse {
    All,
    Linux,
    Free,
    /// Only the partitions with the given numbers may be removed.
    Partitions(Vec<u32>),
    Other(String),
}

impl FromStr for DriveUse {
    type Err = ();

    /// Any value with a number in it is read as a comma separated list of
    /// partition numbers; elements lacking a number are dropped.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.chars().any(|c| c.is_ascii_digit()) {
            let numbers = value
                .split(',')
                .filter(|part| part.chars().any(|c| c.is_ascii_digit()))
                .map(|part| leading_number(part.trim()))
                .collect();
            return Ok(DriveUse::Partitions(numbers));
        }

        Ok(match value {
            "all" => DriveUse::All,
            "linux" => DriveUse::Linux,
            "free" => DriveUse::Free,
            other => DriveUse::Other(other.into()),
        })
    }
}

fn leading_number(value: &str) -> u32 {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// A `<drive>` section of the profile.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DriveSpec {
    pub device:           Option<String>,
    pub disklabel:        Option<PartitionTable>,
    pub enable_snapshots: Option<bool>,
    pub initialize:       Option<bool>,
    /// Whether logical volumes that are not mentioned in the profile are kept.
    pub keep_unknown_lv:  Option<bool>,
    /// Explicit drive type. When missing, it is derived from the device.
    pub kind:             Option<DriveType>,
    pub partitions:       Vec<PartitionSpec>,
    /// Unparsed physical extent size, such as `4M`.
    pub pesize:           Option<String>,
    pub skip_list:        SkipList,
    pub use_:             Option<DriveUse>,
}

impl DriveSpec {
    pub fn drive_type(&self) -> DriveType {
        self.kind.unwrap_or_else(|| match self.device.as_deref() {
            Some("/dev/md") => DriveType::Md,
            _ => DriveType::Disk,
        })
    }

    /// The device name of the software RAID this drive describes.
    ///
    /// Only the first `<partition>` section is considered, as a RAID drive
    /// cannot be partitioned.
    pub fn name_for_md(&self) -> Option<String> {
        self.partitions.first().map(PartitionSpec::name_for_md)
    }

    /// Clones a device of the devicegraph into a `<drive>` section.
    ///
    /// Returns `None` when there is nothing worth exporting. `arch` is the
    /// architecture of the system, as in `std::env::consts::ARCH`.
    pub fn new_from_storage(device: DeviceRef, arch: &str) -> Option<DriveSpec> {
        match device {
            DeviceRef::Disk(disk) => DriveSpec::new_from_disk(disk, arch),
            DeviceRef::LvmVg(vg) => DriveSpec::new_from_vg(vg),
            DeviceRef::Md(md) => Some(DriveSpec::new_from_md(md)),
            DeviceRef::Partition(..) | DeviceRef::LvmLv(..) => None,
        }
    }

    pub fn new_from_disk(disk: &Disk, arch: &str) -> Option<DriveSpec> {
        if disk.partitions.is_empty() {
            return None;
        }

        let mut exported: Vec<&Partition> =
            disk.partitions.iter().filter(|p| !skip_partition(p)).collect();
        exported.sort_by_key(|p| p.number);

        let mut partitions: Vec<PartitionSpec> =
            exported.iter().map(|p| PartitionSpec::new_from_partition(p)).collect();
        if partitions.is_empty() {
            return None;
        }

        if reuse_partitions(disk) {
            partitions.iter_mut().for_each(|p| p.create = Some(false));
        }

        let use_ = if disk.partitions.iter().any(is_windows) {
            DriveUse::Partitions(exported.iter().map(|p| p.number).collect())
        } else {
            DriveUse::All
        };

        Some(DriveSpec {
            kind: Some(DriveType::Disk),
            device: Some(exported_disk_name(disk, arch)),
            disklabel: disk.table,
            enable_snapshots: Some(enabled_snapshots(
                disk.partitions.iter().map(|p| p.filesystem.as_ref()),
            )),
            partitions,
            use_: Some(use_),
            ..Default::default()
        })
    }

    pub fn new_from_vg(vg: &LvmVg) -> Option<DriveSpec> {
        if vg.lvs.is_empty() {
            return None;
        }

        Some(DriveSpec {
            kind: Some(DriveType::Lvm),
            device: Some(vg.device_name()),
            enable_snapshots: Some(enabled_snapshots(
                vg.lvs.iter().map(|lv| lv.filesystem.as_ref()),
            )),
            partitions: vg.lvs.iter().map(PartitionSpec::new_from_lv).collect(),
            pesize: vg.extent_size.to_bytes().map(|bytes| bytes.to_string()),
            ..Default::default()
        })
    }

    pub fn new_from_md(md: &Md) -> DriveSpec {
        DriveSpec {
            kind: Some(DriveType::Md),
            device: Some("/dev/md".into()),
            enable_snapshots: Some(enabled_snapshots(Some(md.filesystem.as_ref()))),
            partitions: vec![PartitionSpec::new_from_md(md)],
            ..Default::default()
        }
    }
}

/// Whether a partition is considered to be part of a Windows installation,
/// and therefore not relevant for the system being cloned.
///
/// This is the rule the AutoYaST exporter has always followed. Partitions
/// with the boot flag are never considered Windows partitions: that check was
/// meant for PPC boot partitions whose id was switched to FAT16, but it has
/// affected every Windows id for so long that it is kept as is.
pub fn is_windows(partition: &Partition) -> bool {
    if !partition.get_partition_id().is_windows_system() {
        return false;
    }

    // Mounted in /boot*, so it is also relevant for the current system.
    if partition.mount_point().map_or(false, |mount| mount.contains("/boot")) {
        return false;
    }

    !partition.is_boot()
}

/// Kernel names of s390 disks are not stable across boots, so those disks are
/// exported by their first by-path link.
fn exported_disk_name(disk: &Disk, arch: &str) -> String {
    if arch == "s390x" {
        if let Some(path) = disk.udev_full_paths().into_iter().next() {
            return path;
        }
    }

    disk.name.clone()
}

fn skip_partition(partition: &Partition) -> bool {
    partition.is_extended() || is_windows(partition)
}

/// True if a Windows partition is placed after any non-Windows one, in which
/// case no partition is recreated on the cloned system.
fn reuse_partitions(disk: &Disk) -> bool {
    let mut partitions: Vec<&Partition> = disk.partitions.iter().collect();
    partitions.sort_by_key(|p| p.start_sector);

    let mut linux_already_found = false;
    for part in partitions.into_iter().filter(|p| !p.is_extended()) {
        if is_windows(part) {
            if linux_already_found {
                return true;
            }
        } else {
            linux_already_found = true;
        }
    }

    false
}

fn enabled_snapshots<'a, I: IntoIterator<Item = Option<&'a Filesystem>>>(filesystems: I) -> bool {
    filesystems.into_iter().flatten().any(|fs| fs.fs_type.supports_snapshots() && fs.snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devicegraph::testing::{fs, partition, sample_devicegraph};
    use disk_types::{DiskSize, FileSystem, PartitionFlags, PartitionId, PartitionType};

    fn windows_partition(number: u32, start_sector: u64) -> Partition {
        let mut part = partition(
            &format!("/dev/sda{}", number),
            number,
            DiskSize::gib(10),
            fs(FileSystem::Ntfs, "win"),
        );
        part.id = PartitionId::Ntfs;
        part.start_sector = start_sector;
        part
    }

    fn linux_partition(number: u32, start_sector: u64) -> Partition {
        let mut part = partition(
            &format!("/dev/sda{}", number),
            number,
            DiskSize::gib(10),
            fs(FileSystem::Ext4, "linux"),
        );
        part.start_sector = start_sector;
        part
    }

    #[test]
    fn drive_types() {
        let mut drive = DriveSpec::default();
        assert_eq!(drive.drive_type(), DriveType::Disk);

        drive.device = Some("/dev/md".into());
        assert_eq!(drive.drive_type(), DriveType::Md);

        drive.kind = Some(DriveType::Lvm);
        assert_eq!(drive.drive_type(), DriveType::Lvm);
    }

    #[test]
    fn use_values() {
        assert_eq!("all".parse::<DriveUse>(), Ok(DriveUse::All));
        assert_eq!("free".parse::<DriveUse>(), Ok(DriveUse::Free));
        assert_eq!("1,3".parse::<DriveUse>(), Ok(DriveUse::Partitions(vec![1, 3])));
        assert_eq!("2, x,5".parse::<DriveUse>(), Ok(DriveUse::Partitions(vec![2, 5])));
        assert_eq!("some".parse::<DriveUse>(), Ok(DriveUse::Other("some".into())));
    }

    #[test]
    fn windows_heuristic() {
        let mut part = windows_partition(1, 2048);
        assert!(is_windows(&part));

        part.flags = PartitionFlags::BOOT;
        assert!(!is_windows(&part));

        part.flags = PartitionFlags::LEGACY_BOOT;
        assert!(is_windows(&part));

        part.filesystem = part.filesystem.take().map(|fs| fs.with_mount_point("/boot/efi"));
        assert!(!is_windows(&part));

        assert!(!is_windows(&linux_partition(2, 4096)));
    }

    #[test]
    fn clone_disk_with_windows_first() {
        let graph = sample_devicegraph();
        let drive = DriveSpec::new_from_disk(&graph.disks[0], "x86_64").unwrap();

        assert_eq!(drive.device.as_deref(), Some("/dev/sda"));
        assert_eq!(drive.disklabel, Some(PartitionTable::Gpt));
        assert_eq!(drive.enable_snapshots, Some(false));
        let numbers: Vec<Option<u32>> = drive.partitions.iter().map(|p| p.partition_nr).collect();
        assert_eq!(numbers, vec![Some(2), Some(3)]);
        assert_eq!(drive.use_, Some(DriveUse::Partitions(vec![2, 3])));
        // Windows is placed before Linux, so partitions are recreated.
        assert!(drive.partitions.iter().all(|p| p.create == Some(true)));
    }

    #[test]
    fn clone_disk_with_windows_after_linux() {
        let disk = Disk::new("/dev/sda".into(), DiskSize::gib(100))
            .with_partition(linux_partition(1, 2048))
            .with_partition(windows_partition(2, 40_000_000));

        let drive = DriveSpec::new_from_disk(&disk, "x86_64").unwrap();
        assert_eq!(drive.partitions.len(), 1);
        assert_eq!(drive.partitions[0].create, Some(false));
        assert_eq!(drive.use_, Some(DriveUse::Partitions(vec![1])));
    }

    #[test]
    fn clone_disk_name_on_s390() {
        let graph = sample_devicegraph();
        let drive = DriveSpec::new_from_disk(&graph.disks[0], "s390x").unwrap();
        assert_eq!(drive.device.as_deref(), Some("/dev/disk/by-path/pci-0000:00:1f.2-ata-1"));

        // Without by-path links, the kernel name is the only choice.
        let disk = Disk::new("/dev/dasda".into(), DiskSize::gib(20))
            .with_partition(linux_partition(1, 2048));
        let drive = DriveSpec::new_from_storage(DeviceRef::Disk(&disk), "s390x").unwrap();
        assert_eq!(drive.device.as_deref(), Some("/dev/dasda"));
    }

    #[test]
    fn clone_disk_skips_extended() {
        let mut extended = linux_partition(2, 4096);
        extended.part_type = PartitionType::Extended;
        extended.filesystem = None;

        let disk = Disk::new("/dev/sda".into(), DiskSize::gib(100))
            .with_partition(linux_partition(1, 2048))
            .with_partition(extended);

        let drive = DriveSpec::new_from_disk(&disk, "x86_64").unwrap();
        assert_eq!(drive.partitions.len(), 1);
        assert_eq!(drive.use_, Some(DriveUse::All));
    }

    #[test]
    fn clone_empty_devices() {
        let graph = sample_devicegraph();
        assert!(DriveSpec::new_from_disk(&graph.disks[2], "x86_64").is_none());
        assert!(DriveSpec::new_from_vg(&LvmVg::new("empty".into(), DiskSize::gib(1))).is_none());

        let only_windows = Disk::new("/dev/sda".into(), DiskSize::gib(100))
            .with_partition(windows_partition(1, 2048));
        assert!(DriveSpec::new_from_disk(&only_windows, "x86_64").is_none());
    }

    #[test]
    fn clone_vg_and_md() {
        let graph = sample_devicegraph();
        let arch = "x86_64";

        let vg = DriveSpec::new_from_storage(DeviceRef::LvmVg(&graph.lvm_vgs[0]), arch).unwrap();
        assert_eq!(vg.drive_type(), DriveType::Lvm);
        assert_eq!(vg.device.as_deref(), Some("/dev/vg0"));
        assert_eq!(vg.pesize.as_deref(), Some("4194304"));
        assert_eq!(vg.partitions.len(), 2);

        let md = DriveSpec::new_from_storage(DeviceRef::Md(&graph.mds[0]), arch).unwrap();
        assert_eq!(md.drive_type(), DriveType::Md);
        assert_eq!(md.name_for_md().as_deref(), Some("/dev/md0"));
    }

    #[test]
    fn clone_snapshots() {
        let mut graph = sample_devicegraph();
        if let Some(fs) = graph.lvm_vgs[0].lvs[0].filesystem.as_mut() {
            fs.snapshots = true;
        }

        let vg = DriveSpec::new_from_vg(&graph.lvm_vgs[0]).unwrap();
        assert_eq!(vg.enable_snapshots, Some(true));
    }
}
