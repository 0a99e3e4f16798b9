use ember_rs::prelude::*;
use rand::{thread_rng, Rng};

fn queue () -> Result<Queue> {
    let device = Device::builder().compute_units(2).build()?;
    return Ok(Queue::new(device))
}

/// Every item reads the value its right-hand neighbour stored before the barrier
struct Rotate<'a> {
    input: Accessor<'a, i32, Read>,
    output: Accessor<'a, i32, DiscardWrite>
}

impl Kernel for Rotate<'_> {
    type Local = i32;

    fn local_len (&self, range: &NdRange) -> usize {
        range.local_size()
    }

    fn run (&self, item: &NdItem<'_, i32>) {
        let scratch = item.local_mem();
        scratch.set(item.local_id(), self.input.get(item.global_id()));
        item.barrier();

        let next = (item.local_id() + 1) % item.local_range();
        self.output.set(item.global_id(), scratch.get(next));
    }
}

#[test]
fn neighbours () -> Result<()> {
    const WGS : usize = 8;

    let queue = queue()?;
    let values = (0..32).map(|_| thread_rng().gen_range(-100..100)).collect::<Vec<i32>>();

    for _ in 0..10 {
        let mut input = Buffer::new(&values);
        let mut output = Buffer::zeroed(values.len());

        let kernel = Rotate { input: input.access(), output: output.access() };
        queue.submit(NdRange::new(values.len(), WGS)?, &kernel)?;

        let expected = (0..values.len())
            .map(|i| values[i - i % WGS + (i + 1) % WGS])
            .collect::<Vec<_>>();

        assert_eq!(output.to_vec(), expected);
    }

    Ok(())
}

/// Inclusive per-group scan, with two barriers per round
struct Scan<'a> {
    data: Accessor<'a, u32, ReadWrite>
}

impl Kernel for Scan<'_> {
    type Local = u32;

    fn local_len (&self, range: &NdRange) -> usize {
        range.local_size()
    }

    fn run (&self, item: &NdItem<'_, u32>) {
        let lid = item.local_id();
        let scratch = item.local_mem();

        scratch.set(lid, self.data.get(item.global_id()));
        item.barrier();

        let mut offset = 1;
        while offset < item.local_range() {
            let add = match lid >= offset {
                true => scratch.get(lid - offset),
                false => 0
            };

            item.barrier();
            scratch.set(lid, scratch.get(lid) + add);
            item.barrier();
            offset *= 2;
        }

        self.data.set(item.global_id(), scratch.get(lid));
    }
}

#[test]
fn scan () -> Result<()> {
    const WGS : usize = 16;

    let values = (0..64).map(|_| thread_rng().gen_range(0..1000)).collect::<Vec<u32>>();
    let mut buffer = Buffer::new(&values);

    let kernel = Scan { data: buffer.access() };
    queue()?.submit(NdRange::new(values.len(), WGS)?, &kernel)?;

    let expected = values.chunks(WGS)
        .flat_map(|chunk| chunk.iter().scan(0, |acc, &x| { *acc += x; Some(*acc) }))
        .collect::<Vec<_>>();

    assert_eq!(buffer.to_vec(), expected);
    Ok(())
}

struct Faulty;

impl Kernel for Faulty {
    type Local = u8;

    fn local_len (&self, _: &NdRange) -> usize {
        0
    }

    fn run (&self, item: &NdItem<'_, u8>) {
        if item.group_id() == 1 && item.local_id() == 3 {
            panic!("faulty item");
        }

        item.barrier();
        item.barrier();
    }
}

#[test]
fn panic_releases_group () -> Result<()> {
    let err = queue()?.submit(NdRange::new(32, 8)?, &Faulty).unwrap_err();

    assert_eq!(err.ty, ErrorType::WorkItemPanic);
    let desc = err.desc.unwrap();
    assert!(desc.contains("faulty item"));
    assert!(desc.contains("work item 11"));
    Ok(())
}

/// The first item of every group returns without reaching the barrier
struct EarlyExit<'a> {
    output: Accessor<'a, usize, DiscardWrite>
}

impl Kernel for EarlyExit<'_> {
    type Local = usize;

    fn local_len (&self, range: &NdRange) -> usize {
        range.local_size()
    }

    fn run (&self, item: &NdItem<'_, usize>) {
        let scratch = item.local_mem();
        if item.local_id() == 0 {
            return;
        }

        scratch.set(item.local_id(), 1);
        item.barrier();

        let total = (0..scratch.len()).map(|i| scratch.get(i)).sum();
        self.output.set(item.global_id(), total);
    }
}

#[test]
fn early_exit () -> Result<()> {
    let mut output = Buffer::zeroed(16);
    let kernel = EarlyExit { output: output.access() };
    let result = queue()?.submit(NdRange::new(16, 4)?, &kernel);

    cfg_if::cfg_if! {
        if #[cfg(feature = "strict")] {
            assert_eq!(result.unwrap_err().ty, ErrorType::BarrierDivergence);
        } else {
            result?;
            let expected = (0..16).map(|i| if i % 4 == 0 { 0 } else { 3 }).collect::<Vec<_>>();
            assert_eq!(output.to_vec(), expected);
        }
    }

    Ok(())
}

#[test]
fn single_item_groups () -> Result<()> {
    let mut buffer = buffer![5u32, 1, 4, 2];
    let kernel = Scan { data: buffer.access() };
    queue()?.submit(NdRange::new(4, 1)?, &kernel)?;

    assert_eq!(buffer.to_vec(), vec![5, 1, 4, 2]);
    Ok(())
}
