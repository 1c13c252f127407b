use super::DeviceAttrs;
use disk_types::{DiskSize, MdLevel};

/// A software RAID to be created, or reused.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMd {
    /// The device name, IE: _/dev/md0_ or _/dev/md/data_.
    pub name:                  String,
    pub md_level:              Option<MdLevel>,
    pub chunk_size:            Option<DiskSize>,
    pub parity_algorithm:      Option<String>,
    /// Names of the member devices, in the order they should be added.
    pub device_order:          Vec<String>,
    /// The volume group this array will be a physical volume of.
    pub lvm_volume_group_name: Option<String>,
    pub attrs:                 DeviceAttrs,
}

pub struct MdBuilder {
    name:             String,
    md_level:         Option<MdLevel>,
    chunk_size:       Option<DiskSize>,
    parity_algorithm: Option<String>,
    device_order:     Vec<String>,
    lvm_vg:           Option<String>,
    attrs:            DeviceAttrs,
}

impl MdBuilder {
    pub fn new<S: Into<String>>(name: S, attrs: DeviceAttrs) -> MdBuilder {
        MdBuilder {
            name: name.into(),
            md_level: None,
            chunk_size: None,
            parity_algorithm: None,
            device_order: Vec::new(),
            lvm_vg: None,
            attrs,
        }
    }

    pub fn level(mut self, level: Option<MdLevel>) -> MdBuilder {
        self.md_level = level;
        self
    }

    pub fn chunk_size(mut self, chunk_size: Option<DiskSize>) -> MdBuilder {
        self.chunk_size = chunk_size;
        self
    }

    pub fn parity_algorithm(mut self, parity: Option<String>) -> MdBuilder {
        self.parity_algorithm = parity;
        self
    }

    pub fn device_order(mut self, devices: Vec<String>) -> MdBuilder {
        self.device_order = devices;
        self
    }

    /// Assigns the array to a LVM volume group.
    pub fn logical_volume(mut self, group: Option<String>) -> MdBuilder {
        self.lvm_vg = group;
        self
    }

    pub fn build(self) -> PlannedMd {
        PlannedMd {
            name:                  self.name,
            md_level:              self.md_level,
            chunk_size:            self.chunk_size,
            parity_algorithm:      self.parity_algorithm,
            device_order:          self.device_order,
            lvm_volume_group_name: self.lvm_vg,
            attrs:                 self.attrs,
        }
    }
}
