use std::{num::NonZeroUsize, fmt::Display, str::FromStr};
use super::*;

/// Environment variable overriding the number of compute units of [`Device::host`]
pub const ENV_COMPUTE_UNITS : &str = "EMBER_COMPUTE_UNITS";
/// Environment variable overriding the maximum work-group size of [`Device::host`]
pub const ENV_MAX_WORK_GROUP_SIZE : &str = "EMBER_MAX_WORK_GROUP_SIZE";
/// Environment variable overriding the local memory size (in bytes) of [`Device::host`]
pub const ENV_LOCAL_MEM_SIZE : &str = "EMBER_LOCAL_MEM_SIZE";

pub const DEFAULT_DEVICE_NAME : &str = "ember host device";
pub const DEFAULT_MAX_WORK_GROUP_SIZE : usize = 256;
pub const DEFAULT_LOCAL_MEM_SIZE : usize = 32 * 1024;

/// Host compute device.\
/// Work groups are mapped onto compute units, and every work item of a running group gets its own thread,
/// so that group barriers behave like they do on real hardware.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    name: String,
    compute_units: NonZeroUsize,
    max_work_group_size: NonZeroUsize,
    local_mem_size: usize
}

impl Device {
    /// Default host device, honoring the `EMBER_*` environment overrides.
    #[inline(always)]
    pub fn host () -> Result<Self> {
        DeviceConfig::from_env()?.build()
    }

    #[inline(always)]
    pub fn builder () -> DeviceConfig {
        DeviceConfig::new()
    }

    /// Device name.
    #[inline(always)]
    pub fn name (&self) -> &str {
        &self.name
    }

    /// Number of work groups that may run at the same time.
    #[inline(always)]
    pub fn compute_units (&self) -> NonZeroUsize {
        self.compute_units
    }

    /// Maximum number of work items in a work group.
    #[inline(always)]
    pub fn max_work_group_size (&self) -> NonZeroUsize {
        self.max_work_group_size
    }

    /// Size of the group-local memory arena, in bytes.
    #[inline(always)]
    pub fn local_mem_size (&self) -> usize {
        self.local_mem_size
    }

    /// Checks that a launch with the given group size and group-local request fits the device.
    pub fn check_launch (&self, work_group_size: usize, local_bytes: usize) -> Result<()> {
        if work_group_size > self.max_work_group_size.get() {
            return Err(Error::new(
                ErrorType::InvalidWorkGroupSize,
                format!("work-group size {work_group_size} exceeds the device maximum of {}", self.max_work_group_size)
            ));
        }

        if local_bytes > self.local_mem_size {
            return Err(Error::new(
                ErrorType::OutOfResources,
                format!("kernel requests {local_bytes} bytes of local memory, but the device only has {}", self.local_mem_size)
            ));
        }

        Ok(())
    }
}

impl Display for Device {
    #[inline(always)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Device`]s. Unset values take the host defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceConfig {
    pub name: Option<String>,
    pub compute_units: Option<usize>,
    pub max_work_group_size: Option<usize>,
    pub local_mem_size: Option<usize>
}

impl DeviceConfig {
    #[inline(always)]
    pub const fn new () -> Self {
        Self { name: None, compute_units: None, max_work_group_size: None, local_mem_size: None }
    }

    /// Reads the `EMBER_*` environment overrides.
    pub fn from_env () -> Result<Self> {
        Ok(Self {
            name: None,
            compute_units: env_var(ENV_COMPUTE_UNITS)?,
            max_work_group_size: env_var(ENV_MAX_WORK_GROUP_SIZE)?,
            local_mem_size: env_var(ENV_LOCAL_MEM_SIZE)?
        })
    }

    #[inline(always)]
    pub fn name (mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline(always)]
    pub fn compute_units (mut self, compute_units: usize) -> Self {
        self.compute_units = Some(compute_units);
        self
    }

    #[inline(always)]
    pub fn max_work_group_size (mut self, max_work_group_size: usize) -> Self {
        self.max_work_group_size = Some(max_work_group_size);
        self
    }

    #[inline(always)]
    pub fn local_mem_size (mut self, local_mem_size: usize) -> Self {
        self.local_mem_size = Some(local_mem_size);
        self
    }

    pub fn build (self) -> Result<Device> {
        let compute_units = match self.compute_units {
            Some(x) => NonZeroUsize::new(x).ok_or_else(|| Error::new(ErrorType::InvalidDevice, "a device needs at least one compute unit"))?,
            None => std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
        };

        let max_work_group_size = self.max_work_group_size.unwrap_or(DEFAULT_MAX_WORK_GROUP_SIZE);
        let max_work_group_size = NonZeroUsize::new(max_work_group_size)
            .ok_or_else(|| Error::new(ErrorType::InvalidDevice, "maximum work-group size must be non-zero"))?;

        let device = Device {
            name: self.name.unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            compute_units,
            max_work_group_size,
            local_mem_size: self.local_mem_size.unwrap_or(DEFAULT_LOCAL_MEM_SIZE)
        };

        log::info!(
            "created device '{}' ({} compute units, max work-group size {}, {} bytes of local memory)",
            device.name, device.compute_units, device.max_work_group_size, device.local_mem_size
        );

        Ok(device)
    }
}

fn env_var<T: FromStr> (key: &str) -> Result<Option<T>> where T::Err: Display {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>()
            .map(Some)
            .map_err(|e| Error::new(ErrorType::InvalidValue, format!("{key}={v:?}: {e}"))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::new(ErrorType::InvalidValue, format!("{key}: {e}")))
    }
}
