//! Nucleotide helpers shared by the encoder and the seed heuristic.
//!
//! Sequences are DNA-alphabet strings over {A, C, G, T}; input is
//! case-insensitive and `U` is read as `T`.

use crate::{MirbenchError, Result};

/// Canonicalise a single base: upper-case, with `U` mapped to `T`.
#[inline]
pub fn canonical_base(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        b'U' => b'T',
        other => other,
    }
}

/// Canonicalise a whole sequence (see [`canonical_base`]).
pub fn canonical(seq: &str) -> Vec<u8> {
    seq.bytes().map(canonical_base).collect()
}

/// True iff `a` and `b` form a Watson–Crick pair (A-T, T-A, G-C, C-G).
/// Inputs are expected to be canonical bases.
#[inline]
pub fn is_watson_crick(a: u8, b: u8) -> bool {
    matches!(
        (a, b),
        (b'A', b'T') | (b'T', b'A') | (b'G', b'C') | (b'C', b'G')
    )
}

/// Complement of a canonical base, or `None` for anything outside {A,C,G,T}.
#[inline]
pub fn complement(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(b'T'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'T' => Some(b'A'),
        _ => None,
    }
}

/// Reverse complement of a canonical sequence.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>> {
    seq.iter()
        .rev()
        .map(|&b| {
            complement(b).ok_or_else(|| {
                MirbenchError::InvalidSequence(format!(
                    "non-ACGT base '{}' in {}",
                    b as char,
                    String::from_utf8_lossy(seq)
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_uppercases_and_maps_uracil() {
        assert_eq!(canonical("acgu"), b"ACGT".to_vec());
    }

    #[test]
    fn test_watson_crick_pairs() {
        assert!(is_watson_crick(b'A', b'T'));
        assert!(is_watson_crick(b'T', b'A'));
        assert!(is_watson_crick(b'G', b'C'));
        assert!(is_watson_crick(b'C', b'G'));
        assert!(!is_watson_crick(b'G', b'T')); // wobble pairs do not count
        assert!(!is_watson_crick(b'A', b'A'));
        assert!(!is_watson_crick(b'N', b'T'));
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"CGTGTA").unwrap(), b"TACACG".to_vec());
        assert!(reverse_complement(b"ACNG").is_err());
    }
}
