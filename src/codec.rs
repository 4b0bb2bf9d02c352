//! Binding an input alphabet and a pack alphabet into a ready-to-use codec.

use std::fmt::Display;

use crate::alphabet::{Alphabet, Symbol, ASCII_128, BINARY_256, URI_PACK, UTF16_PACK};
use crate::decoder::{self, DecodeError};
use crate::encoder::{self, EncodeError};
use crate::math::log2_ceil;

/// The error type for codec construction.
#[derive(Debug, PartialEq, Eq)]
pub enum CodecError {
    /// Pack symbols would carry more payload bits than a machine word.
    PackTooWide { bit_capacity: u32 },
    /// The pack alphabet cannot hold even the header for the singleton-only
    /// code range of the input alphabet.
    PackTooNarrow { pack_len: usize, required: usize },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::PackTooWide { bit_capacity } => f.write_fmt(format_args!(
                "Pack symbols carry {bit_capacity} bits, more than a machine word.",
            )),
            CodecError::PackTooNarrow { pack_len, required } => f.write_fmt(format_args!(
                "Pack alphabet has {pack_len} symbols, fewer than the {required} the input alphabet needs.",
            )),
        }
    }
}

impl std::error::Error for CodecError {}

/// An LZW codec over a fixed pair of alphabets.
///
/// Encoding and decoding are pure, single-pass computations; a codec holds
/// no mutable state and can be shared freely, including as a `const` item.
#[derive(Debug, Clone, Copy)]
pub struct Codec<I: Symbol, P: Symbol> {
    input: Alphabet<I>,
    pack: Alphabet<P>,
}

impl<I: Symbol, P: Symbol> Codec<I, P> {
    /// Binds the two alphabets, rejecting pairs whose widths cannot work:
    /// the pack alphabet must fit a machine word and must be able to name at
    /// least the code width of the singleton-only dictionary.
    ///
    /// For `const` codecs both checks run at compile time.
    pub const fn new(input: Alphabet<I>, pack: Alphabet<P>) -> Result<Self, CodecError> {
        let bit_capacity = pack.bit_capacity();
        if bit_capacity > usize::BITS {
            return Err(CodecError::PackTooWide { bit_capacity });
        }

        let required = log2_ceil(input.len()) as usize;
        if pack.len() < required {
            return Err(CodecError::PackTooNarrow {
                pack_len: pack.len(),
                required,
            });
        }

        Ok(Self { input, pack })
    }

    pub const fn input_alphabet(&self) -> &Alphabet<I> {
        &self.input
    }

    pub const fn pack_alphabet(&self) -> &Alphabet<P> {
        &self.pack
    }

    /// Compresses `data`, appending pack symbols onto `into`.
    ///
    /// The input is consumed in a single forward pass; its `size_hint` is
    /// used to pre-size the code buffer when the length is cheaply known.
    ///
    /// # Errors
    ///
    /// Fails when a symbol lies outside the input alphabet or the resulting
    /// code width exceeds what the pack alphabet can carry.
    ///
    /// # Examples
    ///
    /// ```
    /// use zeichen::{codec::TEXT_TO_URI, EncodeError};
    ///
    /// fn main() -> Result<(), EncodeError> {
    ///     let mut packed = vec![];
    ///     TEXT_TO_URI.encode("ABABABAB".bytes(), &mut packed)?;
    ///
    ///     assert!(packed.iter().all(u8::is_ascii_alphanumeric));
    ///     Ok(())
    /// }
    /// ```
    pub fn encode<It>(&self, data: It, into: &mut Vec<P>) -> Result<(), EncodeError>
    where
        It: IntoIterator<Item = I>,
    {
        encoder::encode(data, &self.input, &self.pack, into)
    }

    /// Compresses `data` into a fresh `Vec`.
    pub fn encode_to_vec<It>(&self, data: It) -> Result<Vec<P>, EncodeError>
    where
        It: IntoIterator<Item = I>,
    {
        let mut packed = vec![];
        self.encode(data, &mut packed)?;
        Ok(packed)
    }

    /// Decompresses a packed stream, appending input symbols onto `into`.
    ///
    /// # Errors
    ///
    /// Fails when the stream is truncated, contains symbols outside the pack
    /// alphabet, or is internally inconsistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use zeichen::{codec::TEXT_TO_URI, DecodeError};
    ///
    /// fn main() -> Result<(), DecodeError> {
    ///     let packed = TEXT_TO_URI
    ///         .encode_to_vec("ABABABAB".bytes())
    ///         .expect("plain ASCII input");
    ///
    ///     let mut decoded = vec![];
    ///     TEXT_TO_URI.decode(&packed, &mut decoded)?;
    ///
    ///     assert_eq!(decoded, b"ABABABAB");
    ///     Ok(())
    /// }
    /// ```
    pub fn decode(&self, data: &[P], into: &mut Vec<I>) -> Result<(), DecodeError> {
        decoder::decode(data, &self.input, &self.pack, into)
    }

    /// Decompresses a packed stream into a fresh `Vec`.
    pub fn decode_to_vec(&self, data: &[P]) -> Result<Vec<I>, DecodeError> {
        let mut decoded = vec![];
        self.decode(data, &mut decoded)?;
        Ok(decoded)
    }
}

const fn validated<I: Symbol, P: Symbol>(codec: Result<Codec<I, P>, CodecError>) -> Codec<I, P> {
    match codec {
        Ok(codec) => codec,
        Err(_) => panic!("predefined codec fails the pack-alphabet width checks"),
    }
}

/// Bytes in, bytes out.
pub const BINARY_TO_BINARY: Codec<u8, u8> = validated(Codec::new(BINARY_256, BINARY_256));

/// ASCII text in, ASCII text out.
pub const TEXT_TO_TEXT: Codec<u8, u8> = validated(Codec::new(ASCII_128, ASCII_128));

/// ASCII text packed into well-formed UTF-16 code units.
pub const TEXT_TO_UTF16: Codec<u8, u16> = validated(Codec::new(ASCII_128, UTF16_PACK));

/// ASCII text packed into URI-safe alphanumerics.
pub const TEXT_TO_URI: Codec<u8, u8> = validated(Codec::new(ASCII_128, URI_PACK));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::SymbolRange;

    #[test]
    fn narrow_pack_alphabet_is_rejected() {
        // 256 input symbols need 8-bit codes; 7 pack symbols cannot name
        // a width of 8 in the header.
        const TINY: Alphabet<u8> = Alphabet::new(&[SymbolRange::new(0, 6)]);

        assert_eq!(
            Codec::new(BINARY_256, TINY).unwrap_err(),
            CodecError::PackTooNarrow {
                pack_len: 7,
                required: 8,
            }
        );
    }

    #[test]
    fn minimal_pack_alphabet_is_accepted() {
        const EIGHT: Alphabet<u8> = Alphabet::new(&[SymbolRange::new(0, 7)]);

        assert!(Codec::new(BINARY_256, EIGHT).is_ok());
    }

    #[test]
    fn accessors_expose_the_alphabets() {
        assert_eq!(TEXT_TO_URI.input_alphabet().len(), 128);
        assert_eq!(TEXT_TO_URI.pack_alphabet().len(), 62);
    }
}
