//! Btrfs subvolume specifications, and the rules that decide when a subvolume
//! would be hidden by another mounted file system.

/// A Btrfs subvolume to be created, relative to the default subvolume.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubvolSpec {
    /// Path relative to the root of the file system, IE: _var/log_.
    pub path:          String,
    pub copy_on_write: bool,
}

impl SubvolSpec {
    pub fn new<S: Into<String>>(path: S) -> SubvolSpec {
        SubvolSpec { path: normalize(path.into()), copy_on_write: true }
    }

    /// A subvolume with copy-on-write disabled, as used for databases and VM images.
    pub fn no_cow<S: Into<String>>(path: S) -> SubvolSpec {
        SubvolSpec { copy_on_write: false, ..SubvolSpec::new(path) }
    }

    /// Where this subvolume is mounted, given where its file system is mounted.
    pub fn mount_point(&self, fs_mount_point: &str) -> String {
        if fs_mount_point.ends_with('/') {
            [fs_mount_point, &self.path].concat()
        } else {
            [fs_mount_point, "/", &self.path].concat()
        }
    }

    /// True if any of the other mount points would make this subvolume unreachable.
    pub fn is_shadowed<'a, I>(&self, fs_mount_point: &str, other_mount_points: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mount_point = self.mount_point(fs_mount_point);
        other_mount_points.into_iter().any(|other| is_shadowing(other, &mount_point))
    }
}

/// True if mounting a file system at `mount_point` hides whatever is at `path`.
///
/// A plain prefix check is not enough, as _/bootinger_ is not below _/boot_,
/// so only complete path components are compared.
pub fn is_shadowing(mount_point: &str, path: &str) -> bool {
    let path = [path.trim_end_matches('/'), "/"].concat();
    let mount_point = [mount_point.trim_end_matches('/'), "/"].concat();
    mount_point != "/" && path.starts_with(&mount_point)
}

fn normalize(path: String) -> String { path.trim_matches('/').to_owned() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subvolume_mount_points() {
        assert_eq!(SubvolSpec::new("var/log").mount_point("/"), "/var/log");
        assert_eq!(SubvolSpec::new("/srv/").mount_point("/data"), "/data/srv");
        assert!(!SubvolSpec::no_cow("var/lib/mysql").copy_on_write);
    }

    #[test]
    fn shadowing_rules() {
        assert!(is_shadowing("/home", "/home"));
        assert!(is_shadowing("/var", "/var/lib/mysql"));
        assert!(!is_shadowing("/boot", "/bootinger"));
        assert!(!is_shadowing("/var/lib", "/var"));
        assert!(!is_shadowing("/", "/home"));
    }

    #[test]
    fn shadowed_subvolume() {
        let subvol = SubvolSpec::new("var/lib/mysql");
        assert!(subvol.is_shadowed("/", vec!["/home", "/var"]));
        assert!(!subvol.is_shadowed("/", vec!["/home", "/var/lib/mysqlx"]));
        assert!(!subvol.is_shadowed("/", Vec::new()));
    }
}
