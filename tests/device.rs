use std::env;
use ember_rs::{prelude::*, core::device::*};

#[test]
fn builder () -> Result<()> {
    let device = Device::builder()
        .name("tiny")
        .compute_units(3)
        .max_work_group_size(16)
        .local_mem_size(128)
        .build()?;

    assert_eq!(device.name(), "tiny");
    assert_eq!(device.to_string(), "tiny");
    assert_eq!(device.compute_units().get(), 3);
    assert_eq!(device.max_work_group_size().get(), 16);
    assert_eq!(device.local_mem_size(), 128);

    assert_eq!(Device::builder().compute_units(0).build().unwrap_err().ty, ErrorType::InvalidDevice);
    assert_eq!(Device::builder().max_work_group_size(0).build().unwrap_err().ty, ErrorType::InvalidDevice);
    Ok(())
}

#[test]
fn environment () -> Result<()> {
    env::set_var(ENV_COMPUTE_UNITS, "3");
    env::set_var(ENV_MAX_WORK_GROUP_SIZE, " 64 ");
    env::remove_var(ENV_LOCAL_MEM_SIZE);

    let device = Device::host()?;
    assert_eq!(device.name(), DEFAULT_DEVICE_NAME);
    assert_eq!(device.compute_units().get(), 3);
    assert_eq!(device.max_work_group_size().get(), 64);
    assert_eq!(device.local_mem_size(), DEFAULT_LOCAL_MEM_SIZE);

    env::set_var(ENV_LOCAL_MEM_SIZE, "lots");
    assert_eq!(Device::host().unwrap_err().ty, ErrorType::InvalidValue);

    env::remove_var(ENV_COMPUTE_UNITS);
    env::remove_var(ENV_MAX_WORK_GROUP_SIZE);
    env::remove_var(ENV_LOCAL_MEM_SIZE);

    let device = Device::host()?;
    assert_eq!(device.max_work_group_size().get(), DEFAULT_MAX_WORK_GROUP_SIZE);
    assert_eq!(device.local_mem_size(), DEFAULT_LOCAL_MEM_SIZE);
    Ok(())
}
