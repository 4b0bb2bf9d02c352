//! LZW compression over arbitrary symbol alphabets.
//!
//! This crate compresses a stream of symbols drawn from one alphabet into a
//! stream of symbols drawn from another. Both alphabets are piecewise unions
//! of inclusive ordinal ranges, so the packed output can be constrained to
//! whatever symbol set the destination tolerates: raw bytes, ASCII, the
//! URI-safe alphanumerics, or printable UTF-16 code units.
//!
//! A [`Codec`] pairs the two alphabets. Encoding grows the usual LZW phrase
//! dictionary, serializes every code at one uniform bit width chosen after
//! the fact, and densely packs that bitstream into pack-alphabet symbols
//! behind a two-symbol header. Decoding reverses each step losslessly.
//!
//! # Examples
//!
//! ```
//! use zeichen::codec::TEXT_TO_URI;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let packed = TEXT_TO_URI.encode_to_vec("TOBEORNOTTOBEORTOBEORNOT".bytes())?;
//!
//!     // Safe to splice into a query string as-is.
//!     assert!(packed.iter().all(u8::is_ascii_alphanumeric));
//!
//!     let restored = TEXT_TO_URI.decode_to_vec(&packed)?;
//!     assert_eq!(restored, b"TOBEORNOTTOBEORTOBEORNOT");
//!     Ok(())
//! }
//! ```
//!
//! Custom alphabets are `const`-constructible, and so are codecs over them:
//!
//! ```
//! use zeichen::{Alphabet, Codec, SymbolRange};
//!
//! // DNA bases in, binary out.
//! const BASES: Alphabet<u8> = Alphabet::new(&[
//!     SymbolRange::new(b'A' as u32, b'A' as u32),
//!     SymbolRange::new(b'C' as u32, b'C' as u32),
//!     SymbolRange::new(b'G' as u32, b'G' as u32),
//!     SymbolRange::new(b'T' as u32, b'T' as u32),
//! ]);
//! const BYTES: Alphabet<u8> = Alphabet::new(&[SymbolRange::new(0, 255)]);
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let codec = Codec::new(BASES, BYTES)?;
//!
//!     let packed = codec.encode_to_vec("GATTACAGATTACA".bytes())?;
//!     assert_eq!(codec.decode_to_vec(&packed)?, b"GATTACAGATTACA");
//!     Ok(())
//! }
//! ```

pub mod alphabet;
pub mod codec;
pub mod decoder;
pub mod encoder;
mod math;
mod pack;

pub use alphabet::{Alphabet, Symbol, SymbolRange};
pub use codec::{Codec, CodecError};
pub use decoder::DecodeError;
pub use encoder::EncodeError;
