//! Fictional devicegraphs shared by the unit tests.

use super::*;
use disk_types::{DiskSize, FileSystem, MdLevel, PartitionId, PartitionTable};

pub fn partition(name: &str, number: u32, size: DiskSize, fs: Option<Filesystem>) -> Partition {
    let mut part = Partition::new(name.into(), number, size);
    part.start_sector = 2048 * u64::from(number);
    part.filesystem = fs;
    part
}

pub fn fs(fs_type: FileSystem, label: &str) -> Option<Filesystem> {
    Some(Filesystem::new(fs_type).with_label(label))
}

/// Three disks, a volume group and a RAID:
///
/// - `/dev/sda` (500 GiB): Windows NTFS, ext4 root, swap
/// - `/dev/sdb` (1 TiB): a single xfs partition labeled `data`
/// - `/dev/sdc` (100 GiB): empty, attached through USB
/// - `vg0`: `root` and `home` logical volumes
/// - `/dev/md0`: RAID1 formatted as xfs
pub fn sample_devicegraph() -> Devicegraph {
    let mut windows =
        partition("/dev/sda1", 1, DiskSize::gib(100), fs(FileSystem::Ntfs, "windows"));
    windows.id = PartitionId::Ntfs;
    windows.udev_ids = vec!["ata-DISK_A-part1".into()];

    let root = partition("/dev/sda2", 2, DiskSize::gib(50), fs(FileSystem::Ext4, "root"));

    let mut swap = partition("/dev/sda3", 3, DiskSize::gib(2), fs(FileSystem::Swap, "swap"));
    swap.id = PartitionId::Swap;

    let mut sda = Disk::new("/dev/sda".into(), DiskSize::gib(500))
        .with_partition(windows)
        .with_partition(root)
        .with_partition(swap);
    sda.table = Some(PartitionTable::Gpt);
    sda.udev_ids = vec!["ata-DISK_A".into()];
    sda.udev_paths = vec!["pci-0000:00:1f.2-ata-1".into()];
    sda.driver = Some("ahci".into());

    let mut sdb = Disk::new("/dev/sdb".into(), DiskSize::tib(1))
        .with_partition(partition("/dev/sdb1", 1, DiskSize::tib(1), fs(FileSystem::Xfs, "data")));
    sdb.table = Some(PartitionTable::Msdos);
    sdb.udev_ids = vec!["ata-DISK_B".into()];
    sdb.udev_paths = vec!["pci-0000:00:1f.2-ata-2".into()];
    sdb.driver = Some("ahci".into());

    let mut sdc = Disk::new("/dev/sdc".into(), DiskSize::gib(100));
    sdc.driver = Some("usb-storage".into());

    let mut vg0 = LvmVg::new("vg0".into(), DiskSize::gib(200))
        .with_lv("root", DiskSize::gib(40), fs(FileSystem::Btrfs, "lvroot"))
        .with_lv("home", DiskSize::gib(100), fs(FileSystem::Ext4, "lvhome"));
    vg0.pvs = vec!["/dev/sdd1".into()];

    let mut md0 = Md::new("/dev/md0".into(), DiskSize::gib(20));
    md0.level = Some(MdLevel::Raid1);
    md0.filesystem = fs(FileSystem::Xfs, "mirror");

    Devicegraph { disks: vec![sda, sdb, sdc], lvm_vgs: vec![vg0], mds: vec![md0] }
}

/// A single empty disk of the given size.
pub fn empty_disk_devicegraph(size: DiskSize) -> Devicegraph {
    Devicegraph { disks: vec![Disk::new("/dev/sda".into(), size)], ..Default::default() }
}
