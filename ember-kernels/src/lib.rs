macro_rules! flat_mod {
    ($($i:ident),+) => {
        $(
            mod $i;
            pub use $i::*;
        )+
    };
}

flat_mod!(r#trait);

/// Group-wise tree reduction
pub mod reduce;
/// Element-wise vector addition
pub mod vadd;
