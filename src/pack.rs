//! Dense bit packing of LZW codes into pack-alphabet symbols.
//!
//! Every symbol of a pack alphabet of `L` symbols carries `C = log2_floor(L)`
//! payload bits; its logical index is the payload value. A packed stream is
//! two header symbols (code width, then dead-bit count) followed by the code
//! bitstream chopped into `C`-bit chunks. Codes and chunks are both laid down
//! least-significant-bit first, and a code wider than `C` simply straddles
//! several payload symbols.

use crate::alphabet::{Alphabet, Symbol};
use crate::decoder::DecodeError;
use crate::encoder::EncodeError;

/// A mask covering the low `count` bits of a word.
const fn low_bits(count: u32) -> usize {
    if count >= usize::BITS {
        usize::MAX
    } else {
        (1 << count) - 1
    }
}

fn pack_symbol<P: Symbol>(alphabet: &Alphabet<P>, value: usize) -> P {
    alphabet
        .symbol_at(value)
        .expect("pack alphabet covers every value below 2^bit_capacity")
}

/// Packs `codes`, each `bit_depth` bits wide, appending onto `into`.
///
/// An empty code list still produces the two header symbols.
pub(crate) fn pack<P: Symbol>(
    codes: &[usize],
    bit_depth: u32,
    alphabet: &Alphabet<P>,
    into: &mut Vec<P>,
) -> Result<(), EncodeError> {
    let pack_len = alphabet.len();
    if bit_depth == 0 || bit_depth > usize::BITS || bit_depth as usize >= pack_len {
        return Err(EncodeError::CapacityExceeded {
            bit_depth,
            pack_len,
        });
    }

    let capacity = alphabet.bit_capacity();
    let bits_needed = bit_depth as usize * codes.len();
    let payload_symbols = bits_needed.div_ceil(capacity as usize);
    let dead_bits = payload_symbols * capacity as usize - bits_needed;

    into.reserve(payload_symbols + 2);
    into.push(pack_symbol(alphabet, bit_depth as usize));
    into.push(pack_symbol(alphabet, dead_bits));

    let mut accumulator = 0;
    let mut filled = 0;

    for &code in codes {
        debug_assert!((code & !low_bits(bit_depth)) == 0, "code wider than bit_depth");

        let mut written = 0;
        while written < bit_depth {
            let take = (capacity - filled).min(bit_depth - written);
            let chunk = (code >> written) & low_bits(take);
            accumulator |= chunk << filled;
            written += take;
            filled += take;

            if filled == capacity {
                into.push(pack_symbol(alphabet, accumulator));
                accumulator = 0;
                filled = 0;
            }
        }
    }

    // The dead bits of a partially filled last symbol stay zero.
    if filled > 0 {
        into.push(pack_symbol(alphabet, accumulator));
    }

    Ok(())
}

/// Inverse of [`pack`]: reads the two header symbols, then extracts exactly
/// `(payload_bits - dead_bits) / bit_depth` codes from the payload.
pub(crate) fn unpack<P: Symbol>(
    packed: &[P],
    alphabet: &Alphabet<P>,
) -> Result<Vec<usize>, DecodeError> {
    let (depth_symbol, dead_symbol, payload) = match packed {
        [] => return Ok(vec![]),
        [_] => return Err(DecodeError::Truncated),
        [depth_symbol, dead_symbol, payload @ ..] => (depth_symbol, dead_symbol, payload),
    };

    let bit_depth = index_of(alphabet, *depth_symbol)?;
    let dead_bits = index_of(alphabet, *dead_symbol)?;
    let capacity = alphabet.bit_capacity();

    if bit_depth == 0 || bit_depth > usize::BITS as usize {
        return Err(DecodeError::Corrupt("unusable code width in the header"));
    }
    if dead_bits >= capacity as usize {
        return Err(DecodeError::Corrupt(
            "dead-bit count exceeds the payload symbol width",
        ));
    }
    if payload.is_empty() {
        return if dead_bits == 0 {
            Ok(vec![])
        } else {
            Err(DecodeError::Corrupt("dead bits declared without payload"))
        };
    }

    let payload_bits = payload.len() * capacity as usize;
    let code_bits = payload_bits - dead_bits;
    if code_bits % bit_depth != 0 {
        return Err(DecodeError::Corrupt(
            "payload length does not match the code width",
        ));
    }
    let code_count = code_bits / bit_depth;
    if code_count == 0 {
        return Err(DecodeError::Corrupt("payload shorter than a single code"));
    }

    let bit_depth = bit_depth as u32;
    let mut codes = Vec::with_capacity(code_count);
    let mut accumulator = 0;
    let mut filled = 0;

    'payload: for symbol in payload {
        // Indices outside the 2^capacity window only contribute their low
        // bits, same as any other value; the packer never emits them.
        let value = index_of(alphabet, *symbol)?;

        let mut consumed = 0;
        while consumed < capacity {
            if codes.len() == code_count {
                break 'payload;
            }

            let take = (capacity - consumed).min(bit_depth - filled);
            let chunk = (value >> consumed) & low_bits(take);
            accumulator |= chunk << filled;
            consumed += take;
            filled += take;

            if filled == bit_depth {
                codes.push(accumulator);
                accumulator = 0;
                filled = 0;
            }
        }
    }

    debug_assert_eq!(codes.len(), code_count);
    Ok(codes)
}

fn index_of<P: Symbol>(alphabet: &Alphabet<P>, symbol: P) -> Result<usize, DecodeError> {
    alphabet.index_of(symbol).ok_or(DecodeError::UnexpectedSymbol {
        ordinal: symbol.ordinal(),
    })
}
