//! Nucleotide utilities
//!
//! Complement table used when flipping region sequences. Sequences in a
//! library structure may carry placeholder symbols (`N` for onlist
//! positions, `X` for random positions) next to IUPAC codes.

/// Complement a single nucleotide
///
/// Input is upper-cased first. Standard bases and IUPAC ambiguity codes map
/// to their complements, `N` and `X` map to themselves and anything else
/// collapses to `N`.
///
/// # Examples
/// ```
/// use seqspec::core::dna::complement_nucleotide;
///
/// assert_eq!(complement_nucleotide('A'), 'T');
/// assert_eq!(complement_nucleotide('r'), 'Y');
/// assert_eq!(complement_nucleotide('X'), 'X');
/// assert_eq!(complement_nucleotide('?'), 'N');
/// ```
#[inline]
pub fn complement_nucleotide(nucleotide: char) -> char {
    match nucleotide.to_ascii_uppercase() {
        // Standard bases
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        // IUPAC ambiguity codes
        'R' => 'Y', // R = A or G -> Y = T or C
        'Y' => 'R',
        'S' => 'S', // self-complementary
        'W' => 'W', // self-complementary
        'K' => 'M', // K = G or T -> M = A or C
        'M' => 'K',
        'B' => 'V', // B = C, G, or T -> V = A, C, or G
        'V' => 'B',
        'D' => 'H', // D = A, G, or T -> H = A, C, or T
        'H' => 'D',
        // Placeholders
        'N' => 'N',
        'X' => 'X',
        _ => 'N',
    }
}

/// Complement every nucleotide of a sequence (no reversal)
///
/// # Examples
/// ```
/// use seqspec::core::dna::complement_sequence;
///
/// assert_eq!(complement_sequence("ATCG"), "TAGC");
/// assert_eq!(complement_sequence("NNNN"), "NNNN");
/// assert_eq!(complement_sequence(""), "");
/// ```
pub fn complement_sequence(sequence: &str) -> String {
    sequence.chars().map(complement_nucleotide).collect()
}

/// Reverse complement of a sequence
///
/// # Examples
/// ```
/// use seqspec::core::dna::revcomp;
///
/// assert_eq!(revcomp("AACGT"), "ACGTT");
/// assert_eq!(revcomp("ATGC"), "GCAT");
/// ```
pub fn revcomp(sequence: &str) -> String {
    sequence.chars().rev().map(complement_nucleotide).collect()
}
