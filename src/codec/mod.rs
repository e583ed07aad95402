//! 2-bit sequence packing.
//!
//! Pure functions converting between symbolic [`Sequence`]s and the packed
//! byte runs the store writes to disk. Four bases fit in one byte, first
//! base in the two most-significant bits. A final partial byte is padded
//! with A's code (0b00) in its unused low slots, which is why decoding
//! needs the true base count from the caller: packed bytes alone cannot
//! distinguish real trailing A's from padding.
//!
//! No I/O and no state live here.

use std::error;
use std::fmt;

use crate::base::{Base, Sequence};

/// Bases stored per packed byte.
pub const BASES_PER_BYTE: usize = 4;

/// Bytes required to pack `base_count` bases. Rounds up, so a 5-base
/// sequence takes 2 bytes.
#[inline]
pub const fn packed_len(base_count: usize) -> usize {
    base_count.div_ceil(BASES_PER_BYTE)
}

/// Pack bases into bytes, 4 per byte, most-significant base first.
///
/// Infallible: every `Base` already carries a valid 2-bit code. Symbol
/// validation happens when a [`Sequence`] is parsed.
pub fn pack(bases: &[Base]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(packed_len(bases.len()));

    let mut byte: u8 = 0;
    for (i, base) in bases.iter().enumerate() {
        let shift = 2 * (3 - (i % BASES_PER_BYTE));
        byte |= base.code() << shift;
        if (i + 1) % BASES_PER_BYTE == 0 {
            packed.push(byte);
            byte = 0;
        }
    }
    // Trailing partial byte: low slots are still zero, i.e. padded with A.
    if bases.len() % BASES_PER_BYTE != 0 {
        packed.push(byte);
    }

    packed
}

/// Unpack exactly `base_count` bases from `bytes`, ignoring any padding in
/// the final byte.
///
/// Fails with [`TruncatedRecord`] when `bytes` is too short to hold
/// `base_count` bases. There is no other failure: every 2-bit code is a
/// valid base.
pub fn unpack(bytes: &[u8], base_count: usize) -> Result<Sequence, TruncatedRecord> {
    if bytes.len() < packed_len(base_count) {
        return Err(TruncatedRecord {
            base_count,
            byte_len: bytes.len(),
        });
    }

    let mut seq = Sequence::with_capacity(base_count);
    for i in 0..base_count {
        let byte = bytes[i / BASES_PER_BYTE];
        let shift = 2 * (3 - (i % BASES_PER_BYTE));
        seq.push(Base::from_code(byte >> shift));
    }

    Ok(seq)
}

/// Error returned when a byte run is too short for the base count it is
/// claimed to hold. Reaching this from store operations means the caller
/// presented a malformed handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedRecord {
    /// Bases the caller asked to decode.
    pub base_count: usize,
    /// Bytes actually available.
    pub byte_len: usize,
}

impl fmt::Display for TruncatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record of {} byte(s) cannot hold {} base(s) ({} needed)",
            self.byte_len,
            self.base_count,
            packed_len(self.base_count)
        )
    }
}

impl error::Error for TruncatedRecord {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn seq(s: &str) -> Sequence {
        s.parse().expect("test sequence must parse")
    }

    #[test]
    fn test_packed_len_rounds_up() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(4), 1);
        assert_eq!(packed_len(5), 2);
        assert_eq!(packed_len(8), 2);
        assert_eq!(packed_len(9), 3);
    }

    #[test]
    fn test_pack_acgt_is_0x1b() {
        // A=00 C=01 G=10 T=11 -> 0b00_01_10_11
        assert_eq!(pack(seq("ACGT").bases()), vec![0x1B]);
    }

    #[test]
    fn test_pack_pads_partial_byte_with_a() {
        // "ACGTA": second byte is A in the top slot, A-padding below.
        let packed = pack(seq("ACGTA").bases());
        assert_eq!(packed, vec![0x1B, 0x00]);

        // "TT": 11_11_00_00
        assert_eq!(pack(seq("TT").bases()), vec![0b1111_0000]);
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack(&[]).is_empty());
    }

    #[test]
    fn test_unpack_distinguishes_padding_from_real_a() {
        let five = seq("ACGTA");
        let packed = pack(five.bases());

        // Same bytes decode to different sequences depending on count.
        assert_eq!(unpack(&packed, 5).unwrap(), five);
        assert_eq!(unpack(&packed, 4).unwrap(), seq("ACGT"));
        assert_eq!(unpack(&packed, 8).unwrap(), seq("ACGTAAAA"));
    }

    #[test]
    fn test_unpack_empty() {
        assert_eq!(unpack(&[], 0).unwrap(), Sequence::new());
    }

    #[test]
    fn test_unpack_truncated() {
        let err = unpack(&[0x1B], 5).unwrap_err();
        assert_eq!(
            err,
            TruncatedRecord {
                base_count: 5,
                byte_len: 1
            }
        );
        assert!(err.to_string().contains("5 base(s)"));

        assert!(unpack(&[], 1).is_err());
    }

    #[test]
    fn test_round_trip_all_lengths_to_two_bytes() {
        for s in ["", "A", "AC", "ACG", "ACGT", "ACGTA", "ACGTAC", "ACGTACG", "ACGTACGT"] {
            let original = seq(s);
            let packed = pack(original.bases());
            assert_eq!(packed.len(), packed_len(original.len()));
            assert_eq!(unpack(&packed, original.len()).unwrap(), original, "len {}", s.len());
        }
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let len = rng.gen_range(0..1000);
            let original: Sequence = (0..len)
                .map(|_| Base::from_code(rng.gen_range(0..4)))
                .collect();
            let packed = pack(original.bases());
            let decoded = unpack(&packed, len).expect("round trip must decode");
            assert_eq!(decoded, original);
        }
    }
}
