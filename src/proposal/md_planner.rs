use super::base_planner::{add_device_reuse, drive_ref, partition_ref, PlannerExt};
use crate::{
    devicegraph::Devicegraph,
    issues::{IssueKind, IssuesList},
    planned::{MdBuilder, PlannedMd},
    profile::{DriveSpec, RaidOptions},
    settings::ProposalSettings,
};
use disk_types::{BlockDeviceExt, DiskSize};

/// Plans a software RAID from a RAID drive.
///
/// A RAID drive cannot be partitioned, so its only `<partition>` section
/// describes the whole array.
pub struct MdPlanner<'a> {
    devicegraph: &'a Devicegraph,
    settings:    &'a ProposalSettings,
}

impl<'a> PlannerExt for MdPlanner<'a> {
    fn devicegraph(&self) -> &Devicegraph { self.devicegraph }

    fn settings(&self) -> &ProposalSettings { self.settings }
}

impl<'a> MdPlanner<'a> {
    pub fn new(devicegraph: &'a Devicegraph, settings: &'a ProposalSettings) -> MdPlanner<'a> {
        MdPlanner { devicegraph, settings }
    }

    /// Plans the RAID named `name`. Returns `None` if the drive has no section.
    pub fn planned_for_md(
        &self,
        name: &str,
        drive: &DriveSpec,
        issues: &mut IssuesList,
    ) -> Option<PlannedMd> {
        let section = match drive.partitions.first() {
            Some(section) => section,
            None => {
                issues.add(IssueKind::NoDisk, drive_ref(drive));
                return None;
            }
        };

        if drive.partitions.len() > 1 {
            warn!("{}: only the first section of a RAID drive is used", name);
        }

        let section_ref = partition_ref(drive, 0, section);
        let mut attrs = self.device_config(section, drive);

        if section.is_reuse() {
            attrs = match self.devicegraph().find_md(name) {
                Some(md) => {
                    let fs = md.filesystem.as_ref().map(|fs| fs.fs_type);
                    add_device_reuse(attrs, md.get_device_name(), fs, section, false)
                }
                None => {
                    issues.add(IssueKind::MissingReusableDevice, section_ref.clone());
                    attrs
                }
            };
        }

        let default_options = RaidOptions::default();
        let options = section.raid_options.as_ref().unwrap_or(&default_options);

        let chunk_size = options.chunk_size.as_deref().and_then(|chunk_size| {
            match DiskSize::parse(chunk_size, true) {
                Ok(size) if !size.is_unlimited() => Some(size),
                _ => {
                    warn!("{}: ignoring invalid chunk size '{}'", name, chunk_size);
                    let section_ref = section_ref.clone();
                    issues.add_with_attr(IssueKind::InvalidValue, section_ref, "chunk_size");
                    None
                }
            }
        });

        let md = MdBuilder::new(name, attrs)
            .level(options.raid_type)
            .chunk_size(chunk_size)
            .parity_algorithm(options.parity_algorithm.clone())
            .device_order(options.device_order.clone())
            .logical_volume(section.lvm_group.clone())
            .build();

        info!("planned RAID {} ({:?})", md.name, md.md_level);
        Some(md)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{devicegraph::testing::sample_devicegraph, profile::PartitionSpec};
    use disk_types::{FileSystem, MdLevel};

    fn plan(name: &str, drive: &DriveSpec) -> (Option<PlannedMd>, IssuesList) {
        let graph = sample_devicegraph();
        let settings = ProposalSettings::default();
        let mut issues = IssuesList::new();
        let md = MdPlanner::new(&graph, &settings).planned_for_md(name, drive, &mut issues);
        (md, issues)
    }

    fn md_drive(section: PartitionSpec) -> DriveSpec {
        let device = Some("/dev/md".into());
        DriveSpec { device, partitions: vec![section], ..Default::default() }
    }

    fn raid_section(chunk_size: &str) -> PartitionSpec {
        PartitionSpec {
            mount: Some("/srv".into()),
            filesystem: Some(FileSystem::Ext4),
            raid_options: Some(RaidOptions {
                raid_type: Some(MdLevel::Raid5),
                chunk_size: Some(chunk_size.into()),
                parity_algorithm: Some("left_symmetric".into()),
                device_order: vec!["/dev/sdb1".into(), "/dev/sda1".into()],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn new_md() {
        let mut section = raid_section("64K");
        section.lvm_group = Some("system".into());
        let (md, issues) = plan("/dev/md1", &md_drive(section));
        let md = md.unwrap();

        assert!(issues.is_empty());
        assert_eq!(md.name, "/dev/md1");
        assert_eq!(md.md_level, Some(MdLevel::Raid5));
        assert_eq!(md.chunk_size, Some(DiskSize::kib(64)));
        assert_eq!(md.parity_algorithm.as_deref(), Some("left_symmetric"));
        assert_eq!(md.device_order, vec!["/dev/sdb1", "/dev/sda1"]);
        assert_eq!(md.attrs.mount_point.as_deref(), Some("/srv"));
        assert_eq!(md.attrs.reuse, None);
        assert_eq!(md.lvm_volume_group_name.as_deref(), Some("system"));
    }

    #[test]
    fn invalid_chunk_size() {
        let (md, issues) = plan("/dev/md1", &md_drive(raid_section("big")));
        assert_eq!(md.unwrap().chunk_size, None);
        assert_eq!(issues.iter().next().and_then(|issue| issue.attr), Some("chunk_size"));
    }

    #[test]
    fn reuse_md() {
        let section = PartitionSpec {
            create: Some(false),
            resize: Some(true),
            mount: Some("/data".into()),
            ..Default::default()
        };

        let (md, issues) = plan("/dev/md0", &md_drive(section.clone()));
        let md = md.unwrap();
        assert!(issues.is_empty());
        assert_eq!(md.attrs.reuse.as_deref(), Some("/dev/md0"));
        assert_eq!(md.attrs.filesystem_type, Some(FileSystem::Xfs));
        assert!(!md.attrs.resize);

        let (md, issues) = plan("/dev/md7", &md_drive(section));
        assert_eq!(md.unwrap().attrs.reuse, None);
        assert_eq!(issues.count(IssueKind::MissingReusableDevice), 1);
    }

    #[test]
    fn only_first_section() {
        let mut drive = md_drive(raid_section("64K"));
        drive.partitions.push(PartitionSpec { mount: Some("/other".into()), ..Default::default() });

        let (md, _) = plan("/dev/md1", &drive);
        assert_eq!(md.unwrap().attrs.mount_point.as_deref(), Some("/srv"));

        let (md, issues) = plan("/dev/md1", &DriveSpec::default());
        assert!(md.is_none());
        assert_eq!(issues.count(IssueKind::NoDisk), 1);
    }
}
