use crate::size::DiskSize;

/// Methods shared by every block device of a devicegraph.
pub trait BlockDeviceExt {
    /// The kernel name of the device, IE: _/dev/sda_.
    fn get_device_name(&self) -> &str;

    /// The size of the device.
    fn get_size(&self) -> DiskSize;

    /// Alternative names under which the device can be found, such as the
    /// udev links in _/dev/disk/by-id_.
    fn get_aliases(&self) -> Vec<String> { Vec::new() }

    /// The device name without its directory, IE: _sda_.
    fn get_basename(&self) -> &str {
        let name = self.get_device_name();
        name.rsplit('/').next().unwrap_or(name)
    }

    /// True if the given name is the kernel name or any alias of this device.
    fn is_named(&self, name: &str) -> bool {
        self.get_device_name() == name || self.get_aliases().iter().any(|alias| alias == name)
    }
}
