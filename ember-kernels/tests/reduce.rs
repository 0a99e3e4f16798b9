use std::sync::Arc;
use ember_rs::prelude::*;
use ember_kernels::reduce::*;
use rand::{thread_rng, Rng};

fn queue (props: QueueProperties) -> Result<Queue> {
    let device = Device::builder()
        .compute_units(4)
        .max_work_group_size(64)
        .build()?;

    return Ok(Queue::with_properties(device, props))
}

#[test]
fn sample () -> Result<()> {
    let mut host = [3f32, 2., 3., 4., 5., 6., 7., 8.];

    {
        let mut buffer = Buffer::from_host(&mut host);
        assert_eq!(reduce_sum(&queue(QueueProperties::empty())?, &mut buffer, 4)?, 1);
    }

    assert_eq!(host, [38., 2., 3., 4., 5., 6., 7., 8.]);
    Ok(())
}

#[test]
fn single_item_groups () -> Result<()> {
    let mut buffer = buffer![1, 2, 3, 4, 5, 6];
    assert_eq!(reduce_sum(&queue(QueueProperties::empty())?, &mut buffer, 1)?, 3);
    assert_eq!(buffer.to_vec(), vec![3, 7, 11, 4, 5, 6]);
    Ok(())
}

#[test]
fn multiple_groups () -> Result<()> {
    let values = (1..=16).collect::<Vec<u32>>();

    for props in [QueueProperties::empty(), QueueProperties::SEQUENTIAL_GROUPS] {
        let mut buffer = Buffer::new(&values);
        assert_eq!(reduce_sum(&queue(props)?, &mut buffer, 4)?, 2);
        assert_eq!(buffer.read(..2)?, vec![36, 100]);
        assert_eq!(buffer.read(2..)?, values[2..]);
    }

    Ok(())
}

#[test]
fn random_groups () -> Result<()> {
    let mut rng = thread_rng();
    let parallel = queue(QueueProperties::empty())?;
    let sequential = queue(QueueProperties::SEQUENTIAL_GROUPS)?;

    for wgs in [1, 2, 4, 8, 16, 32] {
        let groups = rng.gen_range(1..=5);
        let values = (0..2 * wgs * groups).map(|_| rng.gen_range(-1000..1000)).collect::<Vec<i64>>();

        let mut buffer = Buffer::new(&values);
        assert_eq!(reduce_sum(&parallel, &mut buffer, wgs)?, groups);

        let expected = values.chunks(2 * wgs).map(|chunk| chunk.iter().sum()).collect::<Vec<i64>>();
        assert_eq!(buffer.read(..groups)?, expected);
        assert_eq!(expected.iter().sum::<i64>(), values.iter().sum::<i64>());

        let mut other = Buffer::new(&values);
        reduce_sum(&sequential, &mut other, wgs)?;
        assert_eq!(buffer, other);
    }

    Ok(())
}

#[test]
fn prefix () -> Result<()> {
    let queue = queue(QueueProperties::empty())?;
    let mut buffer = buffer![1u64, 2, 3, 4, 5, 6, 7, 8, 9];

    assert_eq!(reduce_sum_prefix(&queue, &mut buffer, 8, 2)?, 2);
    assert_eq!(buffer.to_vec(), vec![10, 26, 3, 4, 5, 6, 7, 8, 9]);

    let err = reduce_sum_prefix(&queue, &mut buffer, 10, 1).unwrap_err();
    assert_eq!(err.ty, ErrorType::InvalidValue);
    Ok(())
}

#[test]
fn invalid_geometry () -> Result<()> {
    let queue = queue(QueueProperties::empty())?;

    let mut buffer = Buffer::<f32>::zeroed(12);
    assert_eq!(reduce_sum(&queue, &mut buffer, 3).unwrap_err().ty, ErrorType::InvalidWorkGroupSize);
    assert_eq!(reduce_sum(&queue, &mut buffer, 0).unwrap_err().ty, ErrorType::InvalidWorkGroupSize);
    assert_eq!(reduce_sum(&queue, &mut buffer, 4).unwrap_err().ty, ErrorType::InvalidGlobalWorkSize);

    let mut empty = Buffer::<f32>::zeroed(0);
    assert_eq!(reduce_sum(&queue, &mut empty, 4).unwrap_err().ty, ErrorType::InvalidGlobalWorkSize);

    // above the device maximum
    let mut buffer = Buffer::<f32>::zeroed(256);
    assert_eq!(reduce_sum(&queue, &mut buffer, 128).unwrap_err().ty, ErrorType::InvalidWorkGroupSize);

    assert_eq!(reduction_range(16, 4)?, NdRange::new(8, 4)?);
    Ok(())
}

#[test]
fn group_sizes () {
    assert_eq!(work_group_size_for(8, 256), Some(4));
    assert_eq!(work_group_size_for(16, 256), Some(8));
    assert_eq!(work_group_size_for(6, 256), Some(1));
    assert_eq!(work_group_size_for(1024, 100), Some(64));
    assert_eq!(work_group_size_for(2, 1), Some(1));
    assert_eq!(work_group_size_for(7, 256), None);
    assert_eq!(work_group_size_for(1, 256), None);
    assert_eq!(work_group_size_for(0, 256), None);
    assert_eq!(work_group_size_for(4, 0), None);
}

#[test]
fn total () -> Result<()> {
    let mut rng = thread_rng();
    let queue = queue(QueueProperties::empty())?;

    for len in [0, 1, 2, 3, 8, 100, 1000, 1536, 4096] {
        let values = (0..len).map(|_| rng.gen_range(0..1000)).collect::<Vec<u64>>();
        let mut buffer = Buffer::new(&values);
        assert_eq!(sum(&queue, &mut buffer)?, values.iter().sum::<u64>());
    }

    Ok(())
}

#[test]
fn total_with_little_local_memory () -> Result<()> {
    let device = Device::builder()
        .compute_units(2)
        .local_mem_size(16)
        .build()?;

    let values = (1..=64).map(|x| x as f64).collect::<Vec<_>>();
    let mut buffer = Buffer::new(&values);
    assert_eq!(sum(&Queue::new(device), &mut buffer)?, 2080.);
    Ok(())
}

#[test]
fn debug_output () -> Result<()> {
    let stream = Arc::new(Stream::new(1024, 128, Vec::new()));
    let queue = queue(QueueProperties::empty())?.with_sink(stream.clone());

    let mut buffer = buffer![3f32, 2., 3., 4., 5., 6., 7., 8.];
    reduce_sum(&queue, &mut buffer, 4)?;

    let output = String::from_utf8(stream.writer().clone()).unwrap();
    let mut lines = output.lines().collect::<Vec<_>>();
    lines.sort_unstable();

    assert_eq!(lines, vec![
        "global_id: 0", "global_id: 1", "global_id: 2", "global_id: 3",
        "local id: 0", "local id: 1", "local id: 2", "local id: 3"
    ]);

    Ok(())
}
