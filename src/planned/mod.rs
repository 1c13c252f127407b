//! Devices planned from the profile, to be handed to the allocation engine.

mod attrs;
mod lvm;
mod md;
mod partition;

pub use self::{
    attrs::DeviceAttrs,
    lvm::{LvBuilder, MakeSpacePolicy, PlannedLogicalVolume, PlannedVolumeGroup, VgBuilder},
    md::{MdBuilder, PlannedMd},
    partition::{PartitionBuilder, PlannedPartition},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PlannedDevice {
    Partition(PlannedPartition),
    VolumeGroup(PlannedVolumeGroup),
    Md(PlannedMd),
}

impl PlannedDevice {
    /// Attributes of every device that may hold a file system. For a volume
    /// group, those are the attributes of its logical volumes.
    pub fn filesystems(&self) -> Vec<&DeviceAttrs> {
        match self {
            PlannedDevice::Partition(partition) => vec![&partition.attrs],
            PlannedDevice::VolumeGroup(vg) => vg.lvs.iter().map(|lv| &lv.attrs).collect(),
            PlannedDevice::Md(md) => vec![&md.attrs],
        }
    }

    pub fn filesystems_mut(&mut self) -> Vec<&mut DeviceAttrs> {
        match self {
            PlannedDevice::Partition(partition) => vec![&mut partition.attrs],
            PlannedDevice::VolumeGroup(vg) => vg.lvs.iter_mut().map(|lv| &mut lv.attrs).collect(),
            PlannedDevice::Md(md) => vec![&mut md.attrs],
        }
    }

    pub fn as_partition(&self) -> Option<&PlannedPartition> {
        match self {
            PlannedDevice::Partition(partition) => Some(partition),
            _ => None,
        }
    }

    pub fn as_volume_group(&self) -> Option<&PlannedVolumeGroup> {
        match self {
            PlannedDevice::VolumeGroup(vg) => Some(vg),
            _ => None,
        }
    }

    pub fn as_md(&self) -> Option<&PlannedMd> {
        match self {
            PlannedDevice::Md(md) => Some(md),
            _ => None,
        }
    }
}

impl From<PlannedPartition> for PlannedDevice {
    fn from(partition: PlannedPartition) -> PlannedDevice { PlannedDevice::Partition(partition) }
}

impl From<PlannedVolumeGroup> for PlannedDevice {
    fn from(vg: PlannedVolumeGroup) -> PlannedDevice { PlannedDevice::VolumeGroup(vg) }
}

impl From<PlannedMd> for PlannedDevice {
    fn from(md: PlannedMd) -> PlannedDevice { PlannedDevice::Md(md) }
}
