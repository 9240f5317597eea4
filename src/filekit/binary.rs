use crate::utils::error::{KitError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

/// Fixed width integers that `pack` and `unpack` understand.
pub trait Packable: Sized + Copy {
    const WIDTH: usize;

    fn write_to(self, order: ByteOrder, out: &mut Vec<u8>);
    fn read_from(order: ByteOrder, bytes: &[u8]) -> Self;
}

macro_rules! impl_packable {
    ($($t:ty),*) => {
        $(
            impl Packable for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn write_to(self, order: ByteOrder, out: &mut Vec<u8>) {
                    match order {
                        ByteOrder::Big => out.extend_from_slice(&self.to_be_bytes()),
                        ByteOrder::Little => out.extend_from_slice(&self.to_le_bytes()),
                    }
                }

                fn read_from(order: ByteOrder, bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    match order {
                        ByteOrder::Big => <$t>::from_be_bytes(raw),
                        ByteOrder::Little => <$t>::from_le_bytes(raw),
                    }
                }
            }
        )*
    };
}

impl_packable!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Pack values into a byte string.
pub fn pack<T: Packable>(order: ByteOrder, values: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * T::WIDTH);
    for value in values {
        value.write_to(order, &mut out);
    }
    out
}

pub fn unpack<T: Packable>(order: ByteOrder, bytes: &[u8]) -> Result<Vec<T>> {
    if bytes.len() % T::WIDTH != 0 {
        return Err(KitError::invalid_argument(format!(
            "{} bytes is not a multiple of the {}-byte width",
            bytes.len(),
            T::WIDTH
        )));
    }
    Ok(bytes
        .chunks_exact(T::WIDTH)
        .map(|chunk| T::read_from(order, chunk))
        .collect())
}
