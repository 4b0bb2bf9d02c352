//! LZW decompression: a packed symbol stream back to input symbols.

use std::fmt::Display;

use crate::alphabet::{Alphabet, Symbol};
use crate::pack;

/// The error type for decoding operations.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A packed symbol lies outside the pack alphabet.
    UnexpectedSymbol { ordinal: u32 },
    /// The packed stream ends inside the two-symbol header.
    Truncated,
    /// The header or payload is internally inconsistent.
    Corrupt(&'static str),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnexpectedSymbol { ordinal } => f.write_fmt(format_args!(
                "Symbol with ordinal {ordinal} is not part of the pack alphabet.",
            )),
            DecodeError::Truncated => f.write_str("Packed stream ends inside the header."),
            DecodeError::Corrupt(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for DecodeError {}

/// One phrase of the decode dictionary, stored as a link to its prefix
/// phrase plus the final symbol. `first` caches the phrase's leading symbol,
/// which seeds every dictionary extension.
#[derive(Debug, Clone, Copy)]
struct Phrase<S> {
    prefix: Option<usize>,
    suffix: S,
    first: S,
}

/// The decode dictionary: phrases indexed by code, plus a scratch stack for
/// writing a phrase front-to-back while the links run back-to-front.
struct PhraseTable<S: Symbol> {
    phrases: Vec<Phrase<S>>,
    stack: Vec<S>,
}

impl<S: Symbol> PhraseTable<S> {
    fn with_singletons(alphabet: &Alphabet<S>) -> Self {
        let phrases = alphabet
            .symbols()
            .map(|symbol| Phrase {
                prefix: None,
                suffix: symbol,
                first: symbol,
            })
            .collect();

        Self {
            phrases,
            stack: vec![],
        }
    }

    fn len(&self) -> usize {
        self.phrases.len()
    }

    fn first_symbol(&self, code: usize) -> S {
        self.phrases[code].first
    }

    fn add(&mut self, phrase: Phrase<S>) {
        self.phrases.push(phrase);
    }

    fn write_phrase(&mut self, code: usize, into: &mut Vec<S>) {
        self.stack.clear();

        let mut cursor = Some(code);
        while let Some(index) = cursor {
            let phrase = &self.phrases[index];
            self.stack.push(phrase.suffix);
            cursor = phrase.prefix;
        }

        into.extend(self.stack.iter().rev().copied());
    }
}

/// Unpacks `data` and rebuilds the dictionary the encoder grew, appending
/// the original symbols onto `into`.
pub(crate) fn decode<I, P>(
    data: &[P],
    input: &Alphabet<I>,
    pack_alphabet: &Alphabet<P>,
    into: &mut Vec<I>,
) -> Result<(), DecodeError>
where
    I: Symbol,
    P: Symbol,
{
    let codes = pack::unpack(data, pack_alphabet)?;
    let (first, rest) = match codes.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    let mut table = PhraseTable::with_singletons(input);
    if *first >= table.len() {
        return Err(DecodeError::Corrupt(
            "leading code does not name a single symbol",
        ));
    }
    table.write_phrase(*first, into);

    let mut previous = *first;
    for &code in rest {
        let next = table.len();
        if code < next {
            table.add(Phrase {
                prefix: Some(previous),
                suffix: table.first_symbol(code),
                first: table.first_symbol(previous),
            });
            table.write_phrase(code, into);
        } else if code == next {
            // The phrase this code names is the one being built right now:
            // the previous phrase extended by its own first symbol.
            let first_symbol = table.first_symbol(previous);
            table.add(Phrase {
                prefix: Some(previous),
                suffix: first_symbol,
                first: first_symbol,
            });
            table.write_phrase(code, into);
        } else {
            return Err(DecodeError::Corrupt("code skips past the phrase table"));
        }

        previous = code;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{SymbolRange, ASCII_128, BINARY_256};
    use crate::pack;

    const AB: Alphabet<u8> = Alphabet::new(&[SymbolRange::new(b'A' as u32, b'B' as u32)]);

    fn decode_codes<I: Symbol>(
        codes: &[usize],
        bit_depth: u32,
        input: &Alphabet<I>,
    ) -> Result<Vec<I>, DecodeError> {
        let mut packed = vec![];
        pack::pack(codes, bit_depth, &BINARY_256, &mut packed).unwrap();

        let mut decoded = vec![];
        decode(&packed, input, &BINARY_256, &mut decoded)?;
        Ok(decoded)
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        let mut decoded: Vec<u8> = vec![];
        decode(&[], &ASCII_128, &BINARY_256, &mut decoded).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn header_only_stream_decodes_to_nothing() {
        let mut decoded: Vec<u8> = vec![];
        decode(&[7, 0], &ASCII_128, &BINARY_256, &mut decoded).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn classic_lzw_code_stream() {
        let decoded = decode_codes(
            &[84, 79, 66, 69, 79, 82, 78, 79, 84, 128, 130, 132, 137, 131, 133, 135],
            8,
            &ASCII_128,
        )
        .unwrap();
        assert_eq!(decoded, b"TOBEORNOTTOBEORTOBEORNOT");
    }

    #[test]
    fn first_repeat_code_names_the_phrase_being_built() {
        // Code 4 arrives while the table holds codes 0..=3.
        let decoded = decode_codes(&[0, 1, 2, 4, 1], 3, &AB).unwrap();
        assert_eq!(decoded, b"ABABABAB");
    }

    #[test]
    fn leading_code_outside_the_singletons_is_corrupt() {
        assert!(matches!(
            decode_codes(&[5], 3, &AB),
            Err(DecodeError::Corrupt(_))
        ));
    }

    #[test]
    fn code_gap_is_corrupt() {
        // After the first code the table still holds its two singletons;
        // code 7 skips ahead of the next assignment.
        assert!(matches!(
            decode_codes(&[0, 7], 3, &AB),
            Err(DecodeError::Corrupt(_))
        ));
    }
}
