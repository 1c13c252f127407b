//! A read-only snapshot of the storage devices found on the system.
//!
//! The planners never modify the devicegraph: they only query it to find the
//! disks that drive sections refer to, and the existing devices that a profile
//! asks to reuse.

mod disk;
mod filesystem;
mod lvm;
mod md;
#[cfg(test)]
pub(crate) mod testing;

pub use self::{
    disk::{Disk, Partition},
    filesystem::Filesystem,
    lvm::{LvmLv, LvmVg, DEFAULT_EXTENT_SIZE},
    md::Md,
};

use disk_types::BlockDeviceExt;
use std::iter;

/// A configuration of storage devices, both physical and logical.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Devicegraph {
    pub disks:   Vec<Disk>,
    pub lvm_vgs: Vec<LvmVg>,
    pub mds:     Vec<Md>,
}

/// A shared reference to any device of a devicegraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceRef<'a> {
    Disk(&'a Disk),
    Partition(&'a Disk, &'a Partition),
    LvmVg(&'a LvmVg),
    LvmLv(&'a LvmVg, &'a LvmLv),
    Md(&'a Md),
}

impl<'a> DeviceRef<'a> {
    /// The kernel name of the device.
    pub fn name(&self) -> String {
        match *self {
            DeviceRef::Disk(disk) => disk.name.clone(),
            DeviceRef::Partition(_, part) => part.name.clone(),
            DeviceRef::LvmVg(vg) => vg.device_name(),
            DeviceRef::LvmLv(_, lv) => lv.name.clone(),
            DeviceRef::Md(md) => md.name.clone(),
        }
    }

    /// True if the name is the kernel name or any other known name of the device.
    pub fn is_named(&self, name: &str) -> bool {
        match *self {
            DeviceRef::Disk(disk) => disk.is_named(name),
            DeviceRef::Partition(_, part) => part.is_named(name),
            DeviceRef::LvmVg(vg) => vg.device_name() == name,
            DeviceRef::LvmLv(_, lv) => lv.is_named(name),
            DeviceRef::Md(md) => md.is_named(name),
        }
    }

    pub fn filesystem(&self) -> Option<&'a Filesystem> {
        match *self {
            DeviceRef::Disk(disk) => disk.filesystem.as_ref(),
            DeviceRef::Partition(_, part) => part.filesystem.as_ref(),
            DeviceRef::LvmVg(_) => None,
            DeviceRef::LvmLv(_, lv) => lv.filesystem.as_ref(),
            DeviceRef::Md(md) => md.filesystem.as_ref(),
        }
    }

    /// The devices this device is built on top of, nearest first.
    pub fn ancestors(&self) -> Vec<DeviceRef<'a>> {
        match *self {
            DeviceRef::Partition(disk, _) => vec![DeviceRef::Disk(disk)],
            DeviceRef::LvmLv(vg, _) => vec![DeviceRef::LvmVg(vg)],
            _ => Vec::new(),
        }
    }

    pub fn as_disk(&self) -> Option<&'a Disk> {
        match *self {
            DeviceRef::Disk(disk) => Some(disk),
            _ => None,
        }
    }
}

impl Devicegraph {
    /// All disk devices, in the order in which they were detected.
    pub fn disk_devices(&self) -> &[Disk] { &self.disks }

    /// Every partition of every disk.
    pub fn partitions<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Partition> + 'a> {
        Box::new(self.disks.iter().flat_map(|disk| disk.partitions.iter()))
    }

    pub fn lvm_vgs(&self) -> &[LvmVg] { &self.lvm_vgs }

    pub fn mds(&self) -> &[Md] { &self.mds }

    /// Searches for a volume group by its name (not its device name).
    pub fn find_lvm_vg(&self, vg_name: &str) -> Option<&LvmVg> {
        self.lvm_vgs().iter().find(|vg| vg.vg_name == vg_name)
    }

    pub fn find_md(&self, name: &str) -> Option<&Md> {
        self.mds().iter().find(|md| md.name == name)
    }

    /// Every device of the devicegraph, parents before their children.
    pub fn devices<'a>(&'a self) -> Box<dyn Iterator<Item = DeviceRef<'a>> + 'a> {
        let disks = self.disks.iter().flat_map(|disk| {
            iter::once(DeviceRef::Disk(disk))
                .chain(disk.partitions.iter().map(move |part| DeviceRef::Partition(disk, part)))
        });

        let vgs = self.lvm_vgs.iter().flat_map(|vg| {
            iter::once(DeviceRef::LvmVg(vg))
                .chain(vg.lvs.iter().map(move |lv| DeviceRef::LvmLv(vg, lv)))
        });

        Box::new(disks.chain(vgs).chain(self.mds.iter().map(DeviceRef::Md)))
    }

    /// Finds a device by its kernel name, or by any of its udev links.
    pub fn find_by_any_name(&self, name: &str) -> Option<DeviceRef> {
        self.devices().find(|device| device.is_named(name))
    }

    /// Finds the disk with the given name. If the name belongs to a device
    /// built on top of a disk, such as a partition, the disk is returned.
    pub fn find_disk_by_any_name(&self, name: &str) -> Option<&Disk> {
        let device = self.find_by_any_name(name)?;
        iter::once(device).chain(device.ancestors()).find_map(|d| d.as_disk())
    }
}
