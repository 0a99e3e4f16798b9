use ember_rs::prelude::*;
use ember_kernels::vadd::vector_add;

const ARRAY_SIZE : usize = 4;

fn main () -> Result<()> {
    env_logger::init();

    let vec_a = [1f32, 2., 3., 4.];
    let vec_b = [5f32, 6., 7., 8.];
    let mut vec_c = [0f32; ARRAY_SIZE];

    let queue = Queue::global()?;
    println!("Running on {}", queue.device());

    {
        let mut a = Buffer::new(&vec_a);
        let mut b = Buffer::new(&vec_b);
        let mut c = Buffer::from_host(&mut vec_c);
        vector_add(queue, &mut a, &mut b, &mut c)?;
    }

    for i in 0..ARRAY_SIZE {
        println!("{} + {} = {}", vec_a[i], vec_b[i], vec_c[i]);
    }

    Ok(())
}
