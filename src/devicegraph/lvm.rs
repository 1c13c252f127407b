use super::filesystem::{filesystem_links, Filesystem};
use disk_types::{BlockDeviceExt, DiskSize};

/// The default size of a physical extent.
pub const DEFAULT_EXTENT_SIZE: DiskSize = DiskSize::mib(4);

/// An existing LVM logical volume.
#[derive(Debug, Clone, PartialEq, new)]
pub struct LvmLv {
    /// The name of the logical volume inside of its volume group.
    pub lv_name:         String,
    /// The device name, IE: _/dev/system/root_.
    pub name:            String,
    pub size:            DiskSize,
    #[new(default)]
    pub filesystem:      Option<Filesystem>,
    #[new(default)]
    pub resize_blockers: Vec<String>,
}

impl BlockDeviceExt for LvmLv {
    fn get_device_name(&self) -> &str { &self.name }

    fn get_size(&self) -> DiskSize { self.size }

    fn get_aliases(&self) -> Vec<String> {
        let dm_name = self.name.trim_start_matches("/dev/").replace('-', "--").replace('/', "-");
        let mut aliases = vec![["/dev/mapper/", &dm_name].concat()];
        aliases.extend(filesystem_links(self.filesystem.as_ref()));
        aliases
    }
}

impl LvmLv {
    pub fn filesystem_label(&self) -> Option<&str> {
        self.filesystem.as_ref().and_then(|fs| fs.label.as_deref())
    }
}

/// An existing LVM volume group.
#[derive(Debug, Clone, PartialEq, new)]
pub struct LvmVg {
    pub vg_name:     String,
    pub size:        DiskSize,
    #[new(value = "DEFAULT_EXTENT_SIZE")]
    pub extent_size: DiskSize,
    /// Device names of the physical volumes.
    #[new(default)]
    pub pvs:         Vec<String>,
    #[new(default)]
    pub lvs:         Vec<LvmLv>,
}

impl LvmVg {
    /// The device name of the volume group, IE: _/dev/system_.
    pub fn device_name(&self) -> String { ["/dev/", &self.vg_name].concat() }

    /// Adds a logical volume of the given size, returning the volume group.
    pub fn with_lv(mut self, lv_name: &str, size: DiskSize, fs: Option<Filesystem>) -> LvmVg {
        let name = format!("/dev/{}/{}", self.vg_name, lv_name);
        let mut lv = LvmLv::new(lv_name.into(), name, size);
        lv.filesystem = fs;
        self.lvs.push(lv);
        self
    }

    /// Obtains a logical volume by its name.
    pub fn get_lv(&self, lv_name: &str) -> Option<&LvmLv> {
        self.lvs.iter().find(|lv| lv.lv_name == lv_name)
    }

    /// Obtains a logical volume by the label of its file system.
    pub fn get_lv_by_label(&self, label: &str) -> Option<&LvmLv> {
        self.lvs.iter().find(|lv| lv.filesystem_label() == Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lv_mapper_alias() {
        let vg = LvmVg::new("vg-data".into(), DiskSize::gib(10))
            .with_lv("home", DiskSize::gib(5), None);
        let lv = vg.get_lv("home").unwrap();
        assert_eq!(lv.name, "/dev/vg-data/home");
        assert!(lv.is_named("/dev/mapper/vg--data-home"));
        assert_eq!(vg.device_name(), "/dev/vg-data");
        assert_eq!(vg.extent_size, DiskSize::mib(4));
    }
}
