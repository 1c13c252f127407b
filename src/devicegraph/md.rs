use super::filesystem::{filesystem_links, Filesystem};
use disk_types::{BlockDeviceExt, DiskSize, MdLevel};

/// An existing software RAID array.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Md {
    /// The device name, IE: _/dev/md0_ or _/dev/md/data_.
    pub name:       String,
    pub size:       DiskSize,
    #[new(default)]
    pub level:      Option<MdLevel>,
    #[new(default)]
    pub chunk_size: Option<DiskSize>,
    /// Device names of the members of the array.
    #[new(default)]
    pub devices:    Vec<String>,
    #[new(default)]
    pub filesystem: Option<Filesystem>,
    /// The volume group this array is a physical volume of.
    #[new(default)]
    pub lvm_pv:     Option<String>,
}

impl BlockDeviceExt for Md {
    fn get_device_name(&self) -> &str { &self.name }

    fn get_size(&self) -> DiskSize { self.size }

    fn get_aliases(&self) -> Vec<String> { filesystem_links(self.filesystem.as_ref()) }
}
