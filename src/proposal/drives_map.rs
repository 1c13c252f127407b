use crate::{
    devicegraph::{Devicegraph, Disk},
    issues::{IssueKind, IssuesList, SectionRef},
    profile::{DriveSpec, DriveType},
};
use itertools::Itertools;

/// Associates every drive section of the profile to the name of the device it
/// describes.
///
/// Disks are resolved against the devicegraph, while volume groups and RAIDs
/// are keyed by the name they will have. Drives are kept in the order in which
/// they are going to be processed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrivesMap<'a> {
    drives: Vec<(String, &'a DriveSpec)>,
}

impl<'a> DrivesMap<'a> {
    pub fn new(
        devicegraph: &Devicegraph,
        drives: &'a [DriveSpec],
        issues: &mut IssuesList,
    ) -> DrivesMap<'a> {
        let mut map = DrivesMap::default();

        map.add_disks(devicegraph, drives_of_type(drives, DriveType::Disk), issues);
        map.add_vgs(drives_of_type(drives, DriveType::Lvm), issues);
        map.add_mds(drives_of_type(drives, DriveType::Md), issues);

        debug!("drives map: {}", map.drives.iter().map(|(name, _)| name).join(", "));
        map
    }

    /// Drives and the names of their devices, in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a DriveSpec)> {
        self.drives.iter().map(|(name, drive)| (name.as_str(), *drive))
    }

    pub fn disk_names(&self) -> Vec<&str> {
        self.drives.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&'a DriveSpec> {
        self.drives.iter().find(|(key, _)| key == name).map(|&(_, drive)| drive)
    }

    pub fn len(&self) -> usize { self.drives.len() }

    pub fn is_empty(&self) -> bool { self.drives.is_empty() }

    /// True if any drive describes at least one partition.
    pub fn has_partitions(&self) -> bool {
        self.drives.iter().any(|(_, drive)| !drive.partitions.is_empty())
    }

    /// True unless every drive explicitly disables snapshots.
    pub fn use_snapshots(&self) -> bool {
        self.drives.is_empty()
            || self.drives.iter().any(|(_, drive)| drive.enable_snapshots != Some(false))
    }

    fn contains(&self, name: &str) -> bool { self.drives.iter().any(|(key, _)| key == name) }

    /// Inserts a drive. A drive for a device which was already present
    /// replaces the former one, keeping its position.
    fn insert(&mut self, name: String, drive: &'a DriveSpec) {
        match self.drives.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => {
                warn!("drive for {} is defined more than once: using the last one", name);
                entry.1 = drive;
            }
            None => self.drives.push((name, drive)),
        }
    }

    fn add_disks<I>(&mut self, devicegraph: &Devicegraph, drives: I, issues: &mut IssuesList)
    where
        I: Iterator<Item = &'a DriveSpec>,
    {
        // Drives naming a device are placed first, so that drives without one
        // never take a disk that is explicitly requested.
        let (fixed, flexible): (Vec<&DriveSpec>, Vec<&DriveSpec>) =
            drives.partition(|drive| drive.device.is_some());

        for drive in fixed {
            let name = drive.device.as_deref();
            match name.and_then(|name| devicegraph.find_disk_by_any_name(name)) {
                Some(disk) => self.insert(disk.name.clone(), drive),
                None => no_disk(issues, drive),
            }
        }

        for drive in flexible {
            match self.first_usable_disk(devicegraph, drive) {
                Some(disk) => {
                    info!("assigning {} to a drive without device", disk.name);
                    self.insert(disk.name.clone(), drive);
                }
                None => no_disk(issues, drive),
            }
        }
    }

    fn first_usable_disk<'b>(
        &self,
        devicegraph: &'b Devicegraph,
        drive: &DriveSpec,
    ) -> Option<&'b Disk> {
        devicegraph
            .disk_devices()
            .iter()
            .filter(|disk| !self.contains(&disk.name))
            .find(|disk| !drive.skip_list.matches(disk))
    }

    fn add_vgs<I: Iterator<Item = &'a DriveSpec>>(&mut self, drives: I, issues: &mut IssuesList) {
        for drive in drives {
            match drive.device.as_ref() {
                Some(device) => self.insert(device.clone(), drive),
                None => no_disk(issues, drive),
            }
        }
    }

    fn add_mds<I: Iterator<Item = &'a DriveSpec>>(&mut self, drives: I, issues: &mut IssuesList) {
        for drive in drives {
            match drive.name_for_md() {
                Some(name) => self.insert(name, drive),
                None => no_disk(issues, drive),
            }
        }
    }
}

fn drives_of_type(drives: &[DriveSpec], kind: DriveType) -> impl Iterator<Item = &DriveSpec> {
    drives.iter().filter(move |drive| drive.drive_type() == kind)
}

fn no_disk(issues: &mut IssuesList, drive: &DriveSpec) {
    info!("dropping drive {:?}: no device found", drive.device);
    issues.add(IssueKind::NoDisk, SectionRef::Drive { device: drive.device.clone() });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        devicegraph::testing::sample_devicegraph,
        profile::{PartitionSpec, RaidOptions, SkipKey, SkipList, SkipPredicate, SkipRule},
    };

    fn disk_drive(device: Option<&str>) -> DriveSpec {
        DriveSpec {
            device: device.map(String::from),
            partitions: vec![PartitionSpec::default()],
            ..Default::default()
        }
    }

    fn build(drives: &[DriveSpec]) -> (Vec<String>, IssuesList) {
        let graph = sample_devicegraph();
        let mut issues = IssuesList::new();
        let names = DrivesMap::new(&graph, drives, &mut issues)
            .disk_names()
            .into_iter()
            .map(String::from)
            .collect();
        (names, issues)
    }

    #[test]
    fn explicit_drives_before_flexible_ones() {
        let drives = vec![disk_drive(None), disk_drive(Some("/dev/sda"))];
        let (names, issues) = build(&drives);
        assert_eq!(names, vec!["/dev/sda", "/dev/sdb"]);
        assert!(issues.is_empty());
    }

    #[test]
    fn resolve_aliases() {
        let drives = vec![
            disk_drive(Some("/dev/disk/by-id/ata-DISK_B")),
            disk_drive(Some("/dev/disk/by-label/windows")),
        ];
        let (names, _) = build(&drives);
        assert_eq!(names, vec!["/dev/sdb", "/dev/sda"]);
    }

    #[test]
    fn missing_disks() {
        let drives = vec![
            disk_drive(Some("/dev/sdx")),
            disk_drive(None),
            disk_drive(None),
            disk_drive(None),
            disk_drive(None),
        ];
        let (names, issues) = build(&drives);
        assert_eq!(names, vec!["/dev/sda", "/dev/sdb", "/dev/sdc"]);
        assert_eq!(issues.count(IssueKind::NoDisk), 2);
    }

    #[test]
    fn flexible_drive_with_skip_list() {
        let mut drive = disk_drive(None);
        drive.skip_list = SkipList::new(vec![SkipRule::new(
            SkipKey::Driver,
            SkipPredicate::EqualTo,
            "ahci".into(),
        )]);

        let (names, _) = build(&[drive]);
        assert_eq!(names, vec!["/dev/sdc"]);
    }

    #[test]
    fn duplicated_drives() {
        let mut second = disk_drive(Some("/dev/sda1"));
        second.initialize = Some(true);
        let drives = vec![disk_drive(Some("/dev/sda")), disk_drive(Some("/dev/sdb")), second];

        let graph = sample_devicegraph();
        let mut issues = IssuesList::new();
        let map = DrivesMap::new(&graph, &drives, &mut issues);
        assert_eq!(map.disk_names(), vec!["/dev/sda", "/dev/sdb"]);
        assert_eq!(map.get("/dev/sda").and_then(|drive| drive.initialize), Some(true));
    }

    #[test]
    fn vgs_and_mds() {
        let vg = DriveSpec {
            kind: Some(DriveType::Lvm),
            device: Some("/dev/system".into()),
            ..Default::default()
        };
        let nameless_vg = DriveSpec { kind: Some(DriveType::Lvm), ..Default::default() };
        let md = DriveSpec {
            device: Some("/dev/md".into()),
            partitions: vec![PartitionSpec {
                raid_options: Some(RaidOptions {
                    raid_name: Some("/dev/md/data".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let empty_md = DriveSpec { device: Some("/dev/md".into()), ..Default::default() };

        let (names, issues) = build(&[md, vg, empty_md, nameless_vg, disk_drive(None)]);
        assert_eq!(names, vec!["/dev/sda", "/dev/system", "/dev/md/data"]);
        assert_eq!(issues.count(IssueKind::NoDisk), 2);
    }

    #[test]
    fn snapshots_and_partitions() {
        let graph = sample_devicegraph();
        let mut issues = IssuesList::new();

        let empty = DrivesMap::new(&graph, &[], &mut issues);
        assert!(empty.use_snapshots());
        assert!(!empty.has_partitions());

        let mut no_snapshots = disk_drive(None);
        no_snapshots.enable_snapshots = Some(false);
        let drives = vec![no_snapshots.clone(), no_snapshots];
        let map = DrivesMap::new(&graph, &drives, &mut issues);
        assert!(!map.use_snapshots());
        assert!(map.has_partitions());

        let drives = vec![disk_drive(None), drives[0].clone()];
        assert!(DrivesMap::new(&graph, &drives, &mut issues).use_snapshots());
    }
}
