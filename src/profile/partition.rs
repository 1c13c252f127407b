use crate::{
    devicegraph::{DeviceRef, Filesystem, LvmLv, Md, Partition},
    subvol::SubvolSpec,
};
use disk_types::{
    BlockDeviceExt, FileSystem, MdLevel, MountBy, PartitionExt, PartitionId, PartitionType,
};

/// RAID settings of a `<partition>` section that describes a software RAID.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RaidOptions {
    /// The name of the array, IE: _/dev/md/data_.
    pub raid_name:        Option<String>,
    pub raid_type:        Option<MdLevel>,
    /// Unparsed chunk size, such as `64K`.
    pub chunk_size:       Option<String>,
    pub parity_algorithm: Option<String>,
    pub device_order:     Vec<String>,
}

/// A `<partition>` section of the profile, which may describe a partition, a
/// logical volume or a software RAID.
///
/// Every attribute that was missing in the profile is `None`, which is never
/// the same as an explicit `false`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartitionSpec {
    pub create:            Option<bool>,
    pub crypt_fs:          Option<bool>,
    pub crypt_key:         Option<String>,
    pub filesystem:        Option<FileSystem>,
    pub format:            Option<bool>,
    pub fstab_options:     Option<String>,
    pub label:             Option<String>,
    pub lv_name:           Option<String>,
    /// The volume group this partition will be a physical volume of.
    pub lvm_group:         Option<String>,
    pub mkfs_options:      Option<String>,
    pub mount:             Option<String>,
    pub mount_by:          Option<MountBy>,
    /// Legacy numeric partition id, IE: `131` for Linux.
    pub partition_id:      Option<u32>,
    pub partition_nr:      Option<u32>,
    pub partition_type:    Option<PartitionType>,
    /// The software RAID this partition will be a member of.
    pub raid_name:         Option<String>,
    pub raid_options:      Option<RaidOptions>,
    pub resize:            Option<bool>,
    /// Unparsed size expression, such as `10G`, `50%` or `auto`.
    pub size:              Option<String>,
    pub subvolumes:        Option<Vec<SubvolSpec>>,
    pub subvolumes_prefix: Option<String>,
    pub uuid:              Option<String>,
}

impl PartitionSpec {
    /// True if the profile asks to reuse an existing device instead of creating one.
    pub fn is_reuse(&self) -> bool { self.create == Some(false) }

    /// The password, only when the device is marked as encrypted.
    pub fn encryption_password(&self) -> Option<&str> {
        if self.crypt_fs == Some(true) {
            self.crypt_key.as_deref()
        } else {
            None
        }
    }

    /// The partition id to use for a new partition.
    pub fn id_for_partition(&self) -> PartitionId {
        if let Some(id) = self.partition_id {
            return PartitionId::from_legacy(id);
        }

        if self.filesystem == Some(FileSystem::Swap) {
            PartitionId::Swap
        } else if self.raid_name.is_some() {
            PartitionId::Raid
        } else if self.lvm_group.is_some() {
            PartitionId::Lvm
        } else {
            PartitionId::Linux
        }
    }

    /// The device name of the software RAID this section describes.
    pub fn name_for_md(&self) -> String {
        let name = self.raid_options.as_ref().and_then(|opts| opts.raid_name.as_ref());
        match name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("/dev/md{}", self.partition_nr.unwrap_or(0)),
        }
    }

    /// Clones a partition, logical volume or RAID into a `<partition>` section.
    pub fn new_from_storage(device: DeviceRef) -> Option<PartitionSpec> {
        match device {
            DeviceRef::Partition(_, part) => Some(PartitionSpec::new_from_partition(part)),
            DeviceRef::LvmLv(_, lv) => Some(PartitionSpec::new_from_lv(lv)),
            DeviceRef::Md(md) => Some(PartitionSpec::new_from_md(md)),
            DeviceRef::Disk(_) | DeviceRef::LvmVg(_) => None,
        }
    }

    /// Clones an existing partition into a `<partition>` section.
    pub fn new_from_partition(partition: &Partition) -> PartitionSpec {
        let mut spec = PartitionSpec::new_from_block(partition, partition.filesystem.as_ref());
        spec.partition_nr = Some(partition.number);
        spec.partition_id = Some(partition.id.to_legacy());
        spec.partition_type = match partition.get_partition_type() {
            PartitionType::Primary => Some(PartitionType::Primary),
            _ => None,
        };
        spec.lvm_group = partition.lvm_pv.clone();
        spec.raid_name = partition.md_member.clone();
        spec
    }

    /// Clones an existing logical volume into a `<partition>` section.
    pub fn new_from_lv(lv: &LvmLv) -> PartitionSpec {
        let mut spec = PartitionSpec::new_from_block(lv, lv.filesystem.as_ref());
        spec.lv_name = Some(lv.lv_name.clone());
        spec
    }

    /// Clones an existing software RAID into a `<partition>` section.
    pub fn new_from_md(md: &Md) -> PartitionSpec {
        let mut spec = PartitionSpec::new_from_block(md, md.filesystem.as_ref());
        spec.lvm_group = md.lvm_pv.clone();
        spec.raid_options = Some(RaidOptions {
            raid_name: Some(md.name.clone()),
            raid_type: md.level,
            chunk_size: md.chunk_size.and_then(|size| size.to_bytes()).map(|b| b.to_string()),
            device_order: md.devices.clone(),
            ..Default::default()
        });
        spec
    }

    fn new_from_block<B: BlockDeviceExt>(device: &B, fs: Option<&Filesystem>) -> PartitionSpec {
        let mut spec = PartitionSpec {
            create: Some(true),
            resize: Some(false),
            size: device.get_size().to_bytes().map(|bytes| bytes.to_string()),
            ..Default::default()
        };

        if let Some(fs) = fs {
            spec.init_filesystem(fs);
        }

        spec
    }

    fn init_filesystem(&mut self, fs: &Filesystem) {
        self.format = Some(false);
        self.filesystem = Some(fs.fs_type);
        self.label = fs.label.clone().filter(|label| !label.is_empty());
        self.uuid = fs.uuid.clone().filter(|uuid| !uuid.is_empty());
        self.mount = fs.mount_point.clone();
        self.mount_by = fs.mount_point.as_ref().and(fs.mount_by);

        if !fs.fstab_options.is_empty() {
            self.fstab_options = Some(fs.fstab_options.join(","));
        }

        if fs.fs_type.is_btrfs() {
            self.subvolumes_prefix = fs.default_subvolume.clone();
            self.subvolumes = Some(fs.subvolumes.iter().map(SubvolSpec::new).collect());
        }
    }
}
