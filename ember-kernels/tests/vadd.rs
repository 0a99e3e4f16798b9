use ember_rs::{prelude::*, event::CommandType};
use ember_kernels::vadd::vector_add;
use rand::{thread_rng, Rng};

#[test]
fn sample () -> Result<()> {
    let mut c = [0f32; 4];

    {
        let mut a = buffer![1f32, 2., 3., 4.];
        let mut b = buffer![5f32, 6., 7., 8.];
        let mut out = Buffer::from_host(&mut c);

        let evt = vector_add(Queue::global()?, &mut a, &mut b, &mut out)?;
        assert_eq!(evt.name(), "vector_add");
        assert_eq!(evt.command_type(), CommandType::Kernel);
        assert_eq!(evt.global_size(), 4);
    }

    assert_eq!(c, [6., 8., 10., 12.]);
    Ok(())
}

#[test]
fn random () -> Result<()> {
    let mut rng = thread_rng();
    let device = Device::builder().compute_units(4).build()?;
    let queue = Queue::new(device);

    let a = (0..10_000).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect::<Vec<i32>>();
    let b = (0..10_000).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect::<Vec<i32>>();

    let mut c = Buffer::zeroed(a.len());
    vector_add(&queue, &mut Buffer::new(&a), &mut Buffer::new(&b), &mut c)?;

    let expected = a.iter().zip(&b).map(|(x, y)| x + y).collect::<Vec<_>>();
    assert_eq!(c.to_vec(), expected);
    Ok(())
}

#[test]
fn length_mismatch () -> Result<()> {
    let mut a = buffer![1u8, 2, 3];
    let mut b = buffer![1u8, 2];
    let mut c = Buffer::zeroed(3);

    let err = vector_add(Queue::global()?, &mut a, &mut b, &mut c).unwrap_err();
    assert_eq!(err.ty, ErrorType::InvalidKernelArgs);
    Ok(())
}
