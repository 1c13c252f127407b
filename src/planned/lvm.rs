use super::DeviceAttrs;
use crate::devicegraph::DEFAULT_EXTENT_SIZE;
use disk_types::DiskSize;
use std::fmt::{self, Display, Formatter};

/// What to do with the logical volumes of a reused volume group that are not
/// mentioned in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakeSpacePolicy {
    Keep,
    Remove,
}

impl Display for MakeSpacePolicy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            MakeSpacePolicy::Keep => "keep",
            MakeSpacePolicy::Remove => "remove",
        })
    }
}

/// A logical volume to be created, or reused, in a volume group.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedLogicalVolume {
    pub logical_volume_name: Option<String>,
    pub min_size:            DiskSize,
    pub max_size:            DiskSize,
    /// Size as a percentage of the volume group, resolved by the allocation engine.
    pub percent_size:        Option<f64>,
    pub weight:              u32,
    pub attrs:               DeviceAttrs,
}

impl PlannedLogicalVolume {
    pub fn is_reuse(&self) -> bool { self.attrs.reuse.is_some() }
}

pub struct LvBuilder {
    lv_name:      Option<String>,
    min_size:     DiskSize,
    max_size:     DiskSize,
    percent_size: Option<f64>,
    weight:       u32,
    attrs:        DeviceAttrs,
}

impl LvBuilder {
    pub fn new(lv_name: Option<String>, attrs: DeviceAttrs) -> LvBuilder {
        LvBuilder {
            lv_name,
            min_size: DiskSize::zero(),
            max_size: DiskSize::unlimited(),
            percent_size: None,
            weight: 0,
            attrs,
        }
    }

    /// Defines an absolute size range. Unlimited volumes get a weight.
    pub fn size(mut self, min: DiskSize, max: DiskSize) -> LvBuilder {
        self.min_size = min;
        self.max_size = max;
        self.percent_size = None;
        if max.is_unlimited() {
            self.weight = 1;
        }
        self
    }

    /// Defines the size as a percentage of the volume group.
    pub fn percent_size(mut self, percent: f64) -> LvBuilder {
        self.percent_size = Some(percent);
        self
    }

    pub fn build(self) -> PlannedLogicalVolume {
        PlannedLogicalVolume {
            logical_volume_name: self.lv_name,
            min_size:            self.min_size,
            max_size:            self.max_size,
            percent_size:        self.percent_size,
            weight:              self.weight,
            attrs:               self.attrs,
        }
    }
}

/// A volume group to be created, or reused, along with its logical volumes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedVolumeGroup {
    pub volume_group_name: String,
    pub extent_size:       DiskSize,
    pub make_space_policy: MakeSpacePolicy,
    /// The name of the existing volume group to reuse.
    pub reuse:             Option<String>,
    pub lvs:               Vec<PlannedLogicalVolume>,
}

pub struct VgBuilder {
    name:        String,
    extent_size: DiskSize,
    policy:      MakeSpacePolicy,
    reuse:       Option<String>,
    lvs:         Vec<PlannedLogicalVolume>,
}

impl VgBuilder {
    pub fn new<S: Into<String>>(name: S) -> VgBuilder {
        VgBuilder {
            name:        name.into(),
            extent_size: DEFAULT_EXTENT_SIZE,
            policy:      MakeSpacePolicy::Remove,
            reuse:       None,
            lvs:         Vec::new(),
        }
    }

    pub fn extent_size(mut self, extent_size: DiskSize) -> VgBuilder {
        self.extent_size = extent_size;
        self
    }

    pub fn make_space_policy(mut self, policy: MakeSpacePolicy) -> VgBuilder {
        self.policy = policy;
        self
    }

    pub fn reuse<S: Into<Option<String>>>(mut self, vg_name: S) -> VgBuilder {
        self.reuse = vg_name.into();
        self
    }

    pub fn lv(mut self, lv: PlannedLogicalVolume) -> VgBuilder {
        self.lvs.push(lv);
        self
    }

    pub fn build(self) -> PlannedVolumeGroup {
        PlannedVolumeGroup {
            volume_group_name: self.name,
            extent_size:       self.extent_size,
            make_space_policy: self.policy,
            reuse:             self.reuse,
            lvs:               self.lvs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lv_sizes() {
        let fixed = LvBuilder::new(Some("root".into()), DeviceAttrs::default())
            .size(DiskSize::gib(10), DiskSize::gib(10))
            .build();
        assert_eq!(fixed.weight, 0);
        assert_eq!(fixed.percent_size, None);

        let percent = LvBuilder::new(None, DeviceAttrs::default()).percent_size(40.0).build();
        assert_eq!(percent.percent_size, Some(40.0));
        assert_eq!(percent.max_size, DiskSize::unlimited());
        assert_eq!(percent.weight, 0);
    }

    #[test]
    fn vg_builder() {
        let vg = VgBuilder::new("system")
            .lv(LvBuilder::new(Some("home".into()), DeviceAttrs::default()).build())
            .build();
        assert_eq!(vg.extent_size, DiskSize::mib(4));
        assert_eq!(vg.make_space_policy, MakeSpacePolicy::Remove);
        assert_eq!(vg.make_space_policy.to_string(), "remove");
        assert_eq!(vg.lvs.len(), 1);
        assert!(!vg.lvs[0].is_reuse());
    }
}
