//! Product settings consulted by the planners when a profile omits information.

use crate::subvol::SubvolSpec;
use disk_types::DiskSize;
use std::env::consts::ARCH;

/// The default size range of a volume, for sizes given as `auto`.
#[derive(Debug, Clone, PartialEq, new)]
pub struct VolumeSpec {
    pub mount_point: String,
    pub min_size:    DiskSize,
    pub max_size:    DiskSize,
}

/// Settings which are shared with the guided proposal, so that AutoYaST
/// installations end up with the same defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalSettings {
    /// Subvolumes created in `/` when the profile does not list any.
    pub subvolumes: Vec<SubvolSpec>,
    /// Default subvolume prefix, used when the profile does not set one.
    pub legacy_btrfs_default_subvolume: String,
    pub volumes: Vec<VolumeSpec>,
}

impl Default for ProposalSettings {
    fn default() -> ProposalSettings {
        ProposalSettings {
            subvolumes: default_subvolumes(ARCH),
            legacy_btrfs_default_subvolume: "@".into(),
            volumes: vec![
                VolumeSpec::new("/".into(), DiskSize::gib(3), DiskSize::gib(10)),
                VolumeSpec::new("/home".into(), DiskSize::gib(10), DiskSize::unlimited()),
                VolumeSpec::new("swap".into(), DiskSize::gib(1), DiskSize::gib(2)),
            ],
        }
    }
}

impl ProposalSettings {
    /// The volume defaults for a mount point, if the product defines any.
    pub fn volume_for(&self, mount_point: &str) -> Option<&VolumeSpec> {
        self.volumes.iter().find(|volume| volume.mount_point == mount_point)
    }
}

/// The product list of subvolumes, including those only relevant for the given
/// architecture.
pub fn default_subvolumes(arch: &str) -> Vec<SubvolSpec> {
    let mut subvolumes: Vec<SubvolSpec> = [
        "home",
        "opt",
        "srv",
        "tmp",
        "usr/local",
        "var/cache",
        "var/crash",
        "var/lib/mailman",
        "var/lib/named",
        "var/log",
        "var/opt",
        "var/spool",
        "var/tmp",
    ]
    .iter()
    .map(|path| SubvolSpec::new(*path))
    .collect();

    subvolumes.extend(
        ["var/lib/libvirt/images", "var/lib/mariadb", "var/lib/mysql", "var/lib/pgsql"]
            .iter()
            .map(|path| SubvolSpec::no_cow(*path)),
    );

    let grub: &[&str] = match arch {
        "x86_64" | "x86" => &["boot/grub2/i386-pc", "boot/grub2/x86_64-efi"],
        "aarch64" => &["boot/grub2/arm64-efi"],
        "powerpc64" => &["boot/grub2/powerpc-ieee1275"],
        "s390x" => &["boot/grub2/s390x-emu"],
        _ => &[],
    };
    subvolumes.extend(grub.iter().map(|path| SubvolSpec::new(*path)));

    subvolumes.sort_by(|a, b| a.path.cmp(&b.path));
    subvolumes
}
