use super::{
    base_planner::{add_device_reuse, drive_ref, partition_ref, PlannerExt, Reusable},
    size_parser::SizeInfo,
};
use crate::{
    devicegraph::{Devicegraph, LvmLv, LvmVg, DEFAULT_EXTENT_SIZE},
    issues::{IssueKind, IssuesList},
    planned::{LvBuilder, MakeSpacePolicy, PlannedLogicalVolume, PlannedVolumeGroup, VgBuilder},
    profile::{DriveSpec, PartitionSpec},
    settings::ProposalSettings,
};
use disk_types::DiskSize;

/// Plans a volume group and its logical volumes from a LVM drive.
pub struct VgPlanner<'a> {
    devicegraph: &'a Devicegraph,
    settings:    &'a ProposalSettings,
}

impl<'a> PlannerExt for VgPlanner<'a> {
    fn devicegraph(&self) -> &Devicegraph { self.devicegraph }

    fn settings(&self) -> &ProposalSettings { self.settings }
}

impl<'a> VgPlanner<'a> {
    pub fn new(devicegraph: &'a Devicegraph, settings: &'a ProposalSettings) -> VgPlanner<'a> {
        VgPlanner { devicegraph, settings }
    }

    /// Plans the volume group described by the drive, whose device is `device`
    /// (IE: _/dev/system_).
    pub fn planned_for_vg(
        &self,
        device: &str,
        drive: &DriveSpec,
        issues: &mut IssuesList,
    ) -> PlannedVolumeGroup {
        let vg_name = device.rsplit('/').next().unwrap_or(device);
        let extent_size = self.extent_size(drive, issues);

        let lvs: Vec<PlannedLogicalVolume> = drive
            .partitions
            .iter()
            .enumerate()
            .filter_map(|(index, section)| {
                self.planned_for_lv(vg_name, extent_size, drive, index, section, issues)
            })
            .collect();

        let policy = if drive.keep_unknown_lv == Some(true) {
            MakeSpacePolicy::Keep
        } else {
            MakeSpacePolicy::Remove
        };

        let reuse = if policy == MakeSpacePolicy::Keep || lvs.iter().any(|lv| lv.is_reuse()) {
            match self.devicegraph().find_lvm_vg(vg_name) {
                Some(vg) => Some(vg.vg_name.clone()),
                None => {
                    issues.add(IssueKind::MissingReusableDevice, drive_ref(drive));
                    None
                }
            }
        } else {
            None
        };

        info!("planned volume group {} ({} unknown volumes)", vg_name, policy);
        lvs.into_iter()
            .fold(VgBuilder::new(vg_name), VgBuilder::lv)
            .extent_size(extent_size)
            .make_space_policy(policy)
            .reuse(reuse)
            .build()
    }

    fn extent_size(&self, drive: &DriveSpec, issues: &mut IssuesList) -> DiskSize {
        let pesize = match drive.pesize.as_deref() {
            Some(pesize) => pesize,
            None => return DEFAULT_EXTENT_SIZE,
        };

        match DiskSize::parse(pesize, true) {
            Ok(size) if !size.is_zero() && !size.is_unlimited() => size,
            _ => {
                warn!("invalid extent size '{}': using {}", pesize, DEFAULT_EXTENT_SIZE);
                issues.add_with_attr(IssueKind::InvalidValue, drive_ref(drive), "pesize");
                DEFAULT_EXTENT_SIZE
            }
        }
    }

    fn planned_for_lv(
        &self,
        vg_name: &str,
        extent_size: DiskSize,
        drive: &DriveSpec,
        index: usize,
        section: &PartitionSpec,
        issues: &mut IssuesList,
    ) -> Option<PlannedLogicalVolume> {
        let section_ref = partition_ref(drive, index, section);
        let mut lv_name = section.lv_name.clone();
        let mut attrs = self.device_config(section, drive);

        if section.is_reuse() {
            attrs = match self.find_lv_to_reuse(vg_name, section) {
                Reusable::Found(lv) => {
                    lv_name = lv_name.or_else(|| Some(lv.lv_name.clone()));
                    let fs = lv.filesystem.as_ref().map(|fs| fs.fs_type);
                    add_device_reuse(attrs, &lv.name, fs, section, true)
                }
                Reusable::NotFound => {
                    issues.add(IssueKind::MissingReusableDevice, section_ref.clone());
                    attrs
                }
                Reusable::MissingInfo => {
                    issues.add(IssueKind::MissingReuseInfo, section_ref);
                    return None;
                }
            };
        }

        let max = DiskSize::unlimited();
        let size = self.parse_size(section, extent_size, max, issues, &section_ref)?;
        let builder = LvBuilder::new(lv_name, attrs);
        let lv = match size {
            SizeInfo::Range { min, max } => builder.size(min, max),
            SizeInfo::Percentage(percent) => builder.percent_size(percent),
        };

        Some(lv.build())
    }

    /// Looks for the logical volume to reuse by name or, failing that, by label.
    /// Only the volume group with the given name is searched.
    fn find_lv_to_reuse(&self, vg_name: &str, section: &PartitionSpec) -> Reusable<&'a LvmLv> {
        let vg: Option<&'a LvmVg> = self.devicegraph.find_lvm_vg(vg_name);

        if let Some(ref lv_name) = section.lv_name {
            vg.and_then(|vg| vg.get_lv(lv_name)).into()
        } else if let Some(ref label) = section.label {
            vg.and_then(|vg| vg.get_lv_by_label(label)).into()
        } else {
            Reusable::MissingInfo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devicegraph::testing::sample_devicegraph;
    use disk_types::FileSystem;

    fn plan(drive: &DriveSpec) -> (PlannedVolumeGroup, IssuesList) {
        let graph = sample_devicegraph();
        let settings = ProposalSettings::default();
        let mut issues = IssuesList::new();
        let device = drive.device.as_deref().unwrap_or("/dev/system");
        let vg = VgPlanner::new(&graph, &settings).planned_for_vg(device, drive, &mut issues);
        (vg, issues)
    }

    fn lv(lv_name: &str, mount: &str, size: &str) -> PartitionSpec {
        PartitionSpec {
            lv_name: Some(lv_name.into()),
            mount: Some(mount.into()),
            size: Some(size.into()),
            filesystem: Some(FileSystem::Xfs),
            ..Default::default()
        }
    }

    fn lvm_drive(device: &str, partitions: Vec<PartitionSpec>) -> DriveSpec {
        DriveSpec { device: Some(device.into()), partitions, ..Default::default() }
    }

    #[test]
    fn new_volume_group() {
        let drive = lvm_drive("/dev/system", vec![
            lv("root", "/", "20G"),
            lv("home", "/home", "40%"),
            lv("srv", "/srv", "max"),
        ]);

        let (vg, issues) = plan(&drive);
        assert!(issues.is_empty());
        assert_eq!(vg.volume_group_name, "system");
        assert_eq!(vg.extent_size, DiskSize::mib(4));
        assert_eq!(vg.make_space_policy, MakeSpacePolicy::Remove);
        assert_eq!(vg.reuse, None);

        assert_eq!(vg.lvs[0].min_size, DiskSize::gib(20));
        assert_eq!(vg.lvs[0].max_size, DiskSize::gib(20));
        assert_eq!(vg.lvs[1].percent_size, Some(40.0));
        assert_eq!(vg.lvs[1].weight, 0);
        assert_eq!(vg.lvs[2].min_size, DiskSize::mib(4));
        assert_eq!(vg.lvs[2].weight, 1);
    }

    #[test]
    fn no_reuse_lookup_when_removing() {
        // There is no vg named "system", but nothing has to be reused.
        let (vg, issues) = plan(&lvm_drive("/dev/system", vec![lv("root", "/", "10G")]));
        assert_eq!(vg.make_space_policy, MakeSpacePolicy::Remove);
        assert_eq!(vg.reuse, None);
        assert!(issues.is_empty());
    }

    #[test]
    fn keep_unknown_volumes() {
        let mut drive = lvm_drive("/dev/vg0", vec![lv("data", "/data", "10G")]);
        drive.keep_unknown_lv = Some(true);
        drive.pesize = Some("8M".into());

        let (vg, issues) = plan(&drive);
        assert_eq!(vg.make_space_policy, MakeSpacePolicy::Keep);
        assert_eq!(vg.reuse.as_deref(), Some("vg0"));
        assert_eq!(vg.extent_size, DiskSize::mib(8));
        assert!(issues.is_empty());

        drive.device = Some("/dev/missing".into());
        let (vg, issues) = plan(&drive);
        assert_eq!(vg.reuse, None);
        assert_eq!(vg.lvs.len(), 1);
        assert_eq!(issues.count(IssueKind::MissingReusableDevice), 1);
    }

    #[test]
    fn reuse_logical_volumes() {
        let by_name = PartitionSpec {
            create: Some(false),
            lv_name: Some("home".into()),
            mount: Some("/home".into()),
            ..Default::default()
        };
        let by_label = PartitionSpec {
            create: Some(false),
            label: Some("lvroot".into()),
            mount: Some("/".into()),
            format: Some(true),
            ..Default::default()
        };

        let (vg, issues) = plan(&lvm_drive("/dev/vg0", vec![by_name, by_label]));
        assert!(issues.is_empty());
        assert_eq!(vg.reuse.as_deref(), Some("vg0"));

        assert_eq!(vg.lvs[0].attrs.reuse.as_deref(), Some("/dev/vg0/home"));
        assert_eq!(vg.lvs[0].attrs.filesystem_type, Some(FileSystem::Ext4));

        assert_eq!(vg.lvs[1].logical_volume_name.as_deref(), Some("root"));
        assert_eq!(vg.lvs[1].attrs.reuse.as_deref(), Some("/dev/vg0/root"));
        assert_eq!(vg.lvs[1].attrs.filesystem_type, Some(FileSystem::Btrfs));
        assert!(vg.lvs[1].attrs.reformat);
    }

    #[test]
    fn reuse_unknown_label() {
        let section = PartitionSpec {
            create: Some(false),
            label: Some("nothing".into()),
            mount: Some("/srv".into()),
            ..Default::default()
        };

        let (vg, issues) = plan(&lvm_drive("/dev/vg0", vec![section]));
        assert_eq!(issues.count(IssueKind::MissingReusableDevice), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(vg.lvs.len(), 1);
        assert_eq!(vg.lvs[0].attrs.reuse, None);
        assert_eq!(vg.reuse, None);
    }

    #[test]
    fn reuse_without_information() {
        let section = PartitionSpec { create: Some(false), ..Default::default() };
        let (vg, issues) = plan(&lvm_drive("/dev/vg0", vec![section, lv("srv", "/srv", "1G")]));
        assert_eq!(issues.count(IssueKind::MissingReuseInfo), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(vg.lvs.len(), 1);
    }

    #[test]
    fn reuse_reported_before_size() {
        let section =
            PartitionSpec { create: Some(false), size: Some("lots".into()), ..Default::default() };
        let (vg, issues) = plan(&lvm_drive("/dev/vg0", vec![section]));
        assert!(vg.lvs.is_empty());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.count(IssueKind::MissingReuseInfo), 1);
    }

    #[test]
    fn invalid_sizes() {
        let sections = vec![lv("root", "/", "ten"), lv("srv", "/srv", "1G")];
        let mut drive = lvm_drive("/dev/system", sections);
        drive.pesize = Some("4X".into());

        let (vg, issues) = plan(&drive);
        assert_eq!(vg.lvs.len(), 1);
        assert_eq!(vg.extent_size, DiskSize::mib(4));
        let attrs: Vec<_> = issues.iter().map(|issue| issue.attr).collect();
        assert_eq!(attrs, vec![Some("pesize"), Some("size")]);
    }
}
