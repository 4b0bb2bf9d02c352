//! LZW compression: input symbols to a packed symbol stream.

use std::fmt::Display;

use indexmap::IndexSet;

use crate::alphabet::{Alphabet, Symbol};
use crate::math::log2_ceil;
use crate::pack;

/// The error type for encoding operations.
#[derive(Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// An input symbol lies outside the input alphabet.
    UnexpectedSymbol { ordinal: u32 },
    /// The code width needed for this message cannot be represented: it
    /// exceeds a machine word, or the pack alphabet has no symbol for it.
    CapacityExceeded { bit_depth: u32, pack_len: usize },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::UnexpectedSymbol { ordinal } => f.write_fmt(format_args!(
                "Symbol with ordinal {ordinal} is not part of the input alphabet.",
            )),
            EncodeError::CapacityExceeded {
                bit_depth,
                pack_len,
            } => f.write_fmt(format_args!(
                "Code width {bit_depth} cannot be packed into an alphabet of {pack_len} symbols.",
            )),
        }
    }
}

impl std::error::Error for EncodeError {}

/// A dictionary phrase: its leading part named by code, plus one symbol.
/// Singletons have no prefix.
#[derive(Debug, PartialEq, Eq, Hash)]
struct Word<S> {
    prefix: Option<usize>,
    suffix: S,
}

/// The encode dictionary. The position of a word in the set is its code, so
/// insertion order alone assigns codes sequentially, singletons first.
struct PrefixTable<S: Symbol> {
    words: IndexSet<Word<S>>,
}

impl<S: Symbol> PrefixTable<S> {
    fn with_singletons(alphabet: &Alphabet<S>) -> Self {
        let mut words = IndexSet::with_capacity(alphabet.len() * 2);
        words.extend(alphabet.symbols().map(|suffix| Word {
            prefix: None,
            suffix,
        }));

        Self { words }
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn find(&self, word: &Word<S>) -> Option<usize> {
        self.words.get_index_of(word)
    }

    fn add(&mut self, word: Word<S>) {
        self.words.insert(word);
    }
}

/// Compresses `data` and packs the resulting codes onto `into`.
///
/// Empty input produces no output at all, not even the packed header.
pub(crate) fn encode<I, P, It>(
    data: It,
    input: &Alphabet<I>,
    pack_alphabet: &Alphabet<P>,
    into: &mut Vec<P>,
) -> Result<(), EncodeError>
where
    I: Symbol,
    P: Symbol,
    It: IntoIterator<Item = I>,
{
    let mut symbols = data.into_iter();
    let first = match symbols.next() {
        Some(symbol) => symbol,
        None => return Ok(()),
    };

    let mut table = PrefixTable::with_singletons(input);
    let mut max_code = table.len() - 1;

    let (hint, _) = symbols.size_hint();
    let mut codes = Vec::with_capacity(hint.saturating_add(1).saturating_mul(3) / 2);

    let mut current = index_of(input, first)?;
    for symbol in symbols {
        let extended = Word {
            prefix: Some(current),
            suffix: symbol,
        };

        if let Some(code) = table.find(&extended) {
            current = code;
        } else {
            table.add(extended);
            codes.push(current);
            max_code = max_code.max(current);
            current = index_of(input, symbol)?;
        }
    }

    codes.push(current);
    max_code = max_code.max(current);

    let bit_depth = log2_ceil(max_code + 1);
    pack::pack(&codes, bit_depth, pack_alphabet, into)
}

fn index_of<S: Symbol>(alphabet: &Alphabet<S>, symbol: S) -> Result<usize, EncodeError> {
    alphabet.index_of(symbol).ok_or(EncodeError::UnexpectedSymbol {
        ordinal: symbol.ordinal(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{SymbolRange, ASCII_128, BINARY_256};
    use crate::pack::unpack;

    const AB: Alphabet<u8> = Alphabet::new(&[SymbolRange::new(b'A' as u32, b'B' as u32)]);

    fn encode_to_codes<I: Symbol>(data: &[I], input: &Alphabet<I>) -> Vec<usize> {
        let mut packed = vec![];
        encode(data.iter().copied(), input, &BINARY_256, &mut packed).unwrap();
        unpack(&packed, &BINARY_256).unwrap()
    }

    #[test]
    fn empty_input_produces_no_output() {
        let mut packed: Vec<u8> = vec![];
        encode([].iter().copied(), &ASCII_128, &BINARY_256, &mut packed).unwrap();
        assert!(packed.is_empty());
    }

    #[test]
    fn classic_lzw_code_stream() {
        // The textbook run: singletons for the first pass over the phrase,
        // then two-symbol and three-symbol dictionary hits.
        let codes = encode_to_codes(b"TOBEORNOTTOBEORTOBEORNOT", &ASCII_128);
        assert_eq!(
            codes,
            [84, 79, 66, 69, 79, 82, 78, 79, 84, 128, 130, 132, 137, 131, 133, 135]
        );
    }

    #[test]
    fn repeated_pair_reuses_growing_phrases() {
        assert_eq!(encode_to_codes(b"ABABABAB", &AB), [0, 1, 2, 4, 1]);
    }

    #[test]
    fn single_symbol_emits_its_singleton_code() {
        assert_eq!(encode_to_codes(b"A", &AB), [0]);
        assert_eq!(encode_to_codes(b"B", &AB), [1]);
    }

    #[test]
    fn foreign_symbol_is_reported() {
        let mut packed: Vec<u8> = vec![];
        let result = encode(b"AXB".iter().copied(), &AB, &BINARY_256, &mut packed);
        assert_eq!(
            result,
            Err(EncodeError::UnexpectedSymbol {
                ordinal: b'X' as u32
            })
        );
    }

    #[test]
    fn leading_foreign_symbol_is_reported() {
        let mut packed: Vec<u8> = vec![];
        let result = encode(b"XAB".iter().copied(), &AB, &BINARY_256, &mut packed);
        assert_eq!(
            result,
            Err(EncodeError::UnexpectedSymbol {
                ordinal: b'X' as u32
            })
        );
    }

    #[test]
    fn bit_depth_follows_the_largest_emitted_code() {
        // Two symbols over a two-symbol alphabet: max_code stays at 1,
        // but one bit still needs a full header to say so.
        let mut packed = vec![];
        encode(b"AB".iter().copied(), &AB, &BINARY_256, &mut packed).unwrap();
        assert_eq!(packed[0], 1, "two singleton codes fit in one bit each");
        assert_eq!(unpack(&packed, &BINARY_256).unwrap(), [0, 1]);
    }
}
