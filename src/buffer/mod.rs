flat_mod!(regular, access);

/// Creates a [`Buffer`] with a copy of the listed elements
/// ```rust
/// use ember_rs::buffer;
///
/// let buffer = buffer![1, 2, 3, 4, 5];
/// assert_eq!(buffer.to_vec(), vec![1, 2, 3, 4, 5]);
/// ```
#[macro_export]
macro_rules! buffer {
    ($($v:expr),* $(,)?) => {
        $crate::buffer::Buffer::new(&[$($v),*])
    };

    ($v:expr; $len:expr) => {
        $crate::buffer::Buffer::new(&::std::vec![$v; $len])
    };
}
