use ember_rs::prelude::*;
use ember_kernels::reduce::reduce_sum;

const WORK_GROUP_SIZE : usize = 4;

fn main () -> Result<()> {
    env_logger::init();

    let mut vec_nums = [3f32, 2., 3., 4., 5., 6., 7., 8.];

    let queue = Queue::global()?
        .clone()
        .with_sink(Stream::stdout(1024, 128));

    println!("Running on {}", queue.device());

    {
        let mut buffer = Buffer::from_host(&mut vec_nums);
        reduce_sum(&queue, &mut buffer, WORK_GROUP_SIZE)?;
    }

    println!("Sum: {}", vec_nums[0]);
    Ok(())
}
