#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use gauss_iir_core as filter;

#[doc(inline)]
pub use gauss_iir_array as array;

#[doc(inline)]
pub use gauss_iir_io as io;
