use super::DeviceAttrs;
use disk_types::{DiskSize, PartitionId};

/// A partition to be created, or reused, on a disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPartition {
    /// The kernel name of the disk, IE: _/dev/sda_.
    pub disk:                  String,
    pub partition_id:          PartitionId,
    pub min_size:              DiskSize,
    pub max_size:              DiskSize,
    /// Share of the free space the partition grows into, relative to the others.
    pub weight:                u32,
    /// The volume group this partition will be a physical volume of.
    pub lvm_volume_group_name: Option<String>,
    /// The software RAID this partition will be a member of.
    pub raid_name:             Option<String>,
    pub attrs:                 DeviceAttrs,
}

/// Partition builders are used by the disk planner to assemble a `PlannedPartition`.
pub struct PartitionBuilder {
    disk:         String,
    partition_id: PartitionId,
    min_size:     DiskSize,
    max_size:     DiskSize,
    weight:       u32,
    lvm_vg:       Option<String>,
    raid_name:    Option<String>,
    attrs:        DeviceAttrs,
}

impl PartitionBuilder {
    /// Creates a new partition builder for a partition of the given disk.
    pub fn new<S: Into<String>>(disk: S, attrs: DeviceAttrs) -> PartitionBuilder {
        PartitionBuilder {
            disk: disk.into(),
            partition_id: PartitionId::default(),
            min_size: DiskSize::zero(),
            max_size: DiskSize::unlimited(),
            weight: 0,
            lvm_vg: None,
            raid_name: None,
            attrs,
        }
    }

    pub fn partition_id(mut self, id: PartitionId) -> PartitionBuilder {
        self.partition_id = id;
        self
    }

    /// Defines the size range. An unlimited partition also gets a weight, so
    /// that it grows into the free space.
    pub fn size(mut self, min: DiskSize, max: DiskSize) -> PartitionBuilder {
        self.min_size = min;
        self.max_size = max;
        if max.is_unlimited() {
            self.weight = 1;
        }
        self
    }

    /// Assigns the new partition to a LVM volume group.
    pub fn logical_volume<S: Into<Option<String>>>(mut self, group: S) -> PartitionBuilder {
        self.lvm_vg = group.into();
        self
    }

    /// Assigns the new partition to a software RAID.
    pub fn raid<S: Into<Option<String>>>(mut self, raid_name: S) -> PartitionBuilder {
        self.raid_name = raid_name.into();
        self
    }

    pub fn build(self) -> PlannedPartition {
        PlannedPartition {
            disk:                  self.disk,
            partition_id:          self.partition_id,
            min_size:              self.min_size,
            max_size:              self.max_size,
            weight:                self.weight,
            lvm_volume_group_name: self.lvm_vg,
            raid_name:             self.raid_name,
            attrs:                 self.attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_builder() {
        let fixed = PartitionBuilder::new("/dev/sda", DeviceAttrs::default())
            .size(DiskSize::gib(1), DiskSize::gib(1))
            .partition_id(PartitionId::Swap)
            .build();
        assert_eq!(fixed.weight, 0);
        assert_eq!(fixed.partition_id, PartitionId::Swap);

        let growing = PartitionBuilder::new("/dev/sda", DeviceAttrs::default())
            .size(DiskSize::b(1), DiskSize::unlimited())
            .logical_volume(Some("system".to_owned()))
            .build();
        assert_eq!(growing.weight, 1);
        assert_eq!(growing.lvm_volume_group_name.as_deref(), Some("system"));
        assert_eq!(growing.raid_name, None);
    }
}
