use std::{fmt::Display, ops::Add};
use ember_rs::Element;
use num_traits::Zero;

/// Numeric element types the kernels of this crate operate on
pub trait Real: Element + Zero + Add<Output = Self> + PartialEq + Display {
    /// OpenCL C name of the type
    const NAME : &'static str;
}

macro_rules! impl_real {
    ($($i:ty as $name:ident),+) => {
        $(
            impl Real for $i {
                const NAME : &'static str = stringify!($name);
            }
        )+
    };
}

impl_real! {
    u8 as uchar,
    u16 as ushort,
    u32 as uint,
    u64 as ulong,
    i8 as char,
    i16 as short,
    i32 as int,
    i64 as long,
    f32 as float,
    f64 as double
}
