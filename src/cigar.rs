/// CIGAR operations and the operation-string tokenizer
use crate::error::Error;
use std::fmt;

/// CIGAR operation
///
/// Only the operations that occur in gapped viral RNA alignments are
/// modelled. Anything else is rejected by [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOp {
    /// M: match/mismatch
    Match(u32),
    /// N: skipped reference region (junction)
    Skip(u32),
    /// D: deletion from reference
    Del(u32),
    /// I: insertion to reference
    Ins(u32),
    /// S: soft clip (clipped sequence present in read)
    SoftClip(u32),
}

impl CigarOp {
    /// Build an operation from its SAM letter
    pub fn from_char(op: char, len: u32) -> Option<Self> {
        match op {
            'M' => Some(CigarOp::Match(len)),
            'N' => Some(CigarOp::Skip(len)),
            'D' => Some(CigarOp::Del(len)),
            'I' => Some(CigarOp::Ins(len)),
            'S' => Some(CigarOp::SoftClip(len)),
            _ => None,
        }
    }

    /// Get the operation character
    pub fn op_char(&self) -> char {
        match self {
            CigarOp::Match(_) => 'M',
            CigarOp::Skip(_) => 'N',
            CigarOp::Del(_) => 'D',
            CigarOp::Ins(_) => 'I',
            CigarOp::SoftClip(_) => 'S',
        }
    }

    /// Get the operation length
    pub fn len(&self) -> u32 {
        match self {
            CigarOp::Match(n)
            | CigarOp::Skip(n)
            | CigarOp::Del(n)
            | CigarOp::Ins(n)
            | CigarOp::SoftClip(n) => *n,
        }
    }

    /// Check if operation is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if operation consumes reference bases
    pub fn consumes_reference(&self) -> bool {
        matches!(self, CigarOp::Match(_) | CigarOp::Del(_) | CigarOp::Skip(_))
    }

    /// Check if operation counts towards a block's effective length
    pub fn counts_in_block(&self) -> bool {
        matches!(self, CigarOp::Match(_) | CigarOp::Del(_) | CigarOp::Ins(_))
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len(), self.op_char())
    }
}

/// Parse a CIGAR string such as `10S50M1200N40M` into operations.
///
/// Every failure is reported as [`Error::Format`]: empty or `*` strings,
/// a missing, zero, non-numeric or overflowing length, an unknown operation
/// letter, a trailing length with no letter, and soft clips that are not at
/// either end of the string.
pub fn parse(cigar: &str) -> Result<Vec<CigarOp>, Error> {
    if cigar.is_empty() || cigar == "*" {
        return Err(Error::Format(format!("empty CIGAR '{cigar}'")));
    }

    let mut ops = Vec::new();
    let mut len: Option<u32> = None;

    for c in cigar.chars() {
        if let Some(digit) = c.to_digit(10) {
            let next = len
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| Error::Format(format!("length overflow in CIGAR '{cigar}'")))?;
            len = Some(next);
            continue;
        }

        let n = len
            .take()
            .ok_or_else(|| Error::Format(format!("missing length before '{c}' in '{cigar}'")))?;
        if n == 0 {
            return Err(Error::Format(format!(
                "zero-length '{c}' operation in '{cigar}'"
            )));
        }
        let op = CigarOp::from_char(c, n).ok_or_else(|| {
            Error::Format(format!("unrecognized operation '{c}' in '{cigar}'"))
        })?;
        ops.push(op);
    }

    if len.is_some() {
        return Err(Error::Format(format!(
            "dangling length without operation in '{cigar}'"
        )));
    }

    let last = ops.len() - 1;
    if let Some(pos) = ops
        .iter()
        .enumerate()
        .position(|(i, op)| matches!(op, CigarOp::SoftClip(_)) && i != 0 && i != last)
    {
        return Err(Error::Format(format!(
            "soft clip at interior position {pos} in '{cigar}'"
        )));
    }

    Ok(ops)
}

/// Format operations back into a CIGAR string
pub fn to_string(ops: &[CigarOp]) -> String {
    ops.iter().map(|op| op.to_string()).collect()
}

/// Operation letters only, e.g. `SMNMDM`
pub fn pattern(ops: &[CigarOp]) -> String {
    ops.iter().map(|op| op.op_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_err(cigar: &str) -> String {
        match parse(cigar) {
            Err(Error::Format(msg)) => msg,
            other => panic!("expected format error for {cigar:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_cigar_op_display() {
        assert_eq!(CigarOp::Match(50).to_string(), "50M");
        assert_eq!(CigarOp::Ins(3).to_string(), "3I");
        assert_eq!(CigarOp::Del(2).to_string(), "2D");
        assert_eq!(CigarOp::Skip(1000).to_string(), "1000N");
        assert_eq!(CigarOp::SoftClip(5).to_string(), "5S");
    }

    #[test]
    fn test_parse_simple_junction() {
        let ops = parse("20M5N30M").unwrap();
        assert_eq!(
            ops,
            vec![CigarOp::Match(20), CigarOp::Skip(5), CigarOp::Match(30)]
        );
    }

    #[test]
    fn test_parse_clipped_with_indels() {
        let ops = parse("3S10M2D15M1I4M700N20M5S").unwrap();
        assert_eq!(ops.len(), 9);
        assert_eq!(ops[0], CigarOp::SoftClip(3));
        assert_eq!(ops[2], CigarOp::Del(2));
        assert_eq!(ops[4], CigarOp::Ins(1));
        assert_eq!(ops[6], CigarOp::Skip(700));
        assert_eq!(ops[8], CigarOp::SoftClip(5));
        assert_eq!(to_string(&ops), "3S10M2D15M1I4M700N20M5S");
        assert_eq!(pattern(&ops), "SMDMIMNMS");
    }

    #[test]
    fn test_parse_multi_digit_lengths() {
        let ops = parse("2275M").unwrap();
        assert_eq!(ops, vec![CigarOp::Match(2275)]);
    }

    #[test]
    fn test_unrecognized_operation() {
        assert!(format_err("10X5M").contains("'X'"));
        assert!(format_err("10H5M").contains("'H'"));
        assert!(format_err("10=5M").contains("'='"));
        assert!(format_err("10m").contains("'m'"));
    }

    #[test]
    fn test_missing_and_zero_length() {
        assert!(format_err("M10N5M").contains("missing length"));
        assert!(format_err("10M0N5M").contains("zero-length"));
    }

    #[test]
    fn test_dangling_length() {
        assert!(format_err("10M5N30").contains("dangling"));
    }

    #[test]
    fn test_empty_and_star() {
        format_err("");
        format_err("*");
    }

    #[test]
    fn test_overflow() {
        assert!(format_err("99999999999M").contains("overflow"));
    }

    #[test]
    fn test_interior_soft_clip() {
        assert!(format_err("10M5S10N5M").contains("interior"));
        assert!(parse("5S10M").is_ok());
        assert!(parse("10M5S").is_ok());
        assert!(parse("5S").is_ok());
    }

    #[test]
    fn test_cigar_consumes() {
        assert!(CigarOp::Match(10).consumes_reference());
        assert!(CigarOp::Del(3).consumes_reference());
        assert!(CigarOp::Skip(1000).consumes_reference());
        assert!(!CigarOp::Ins(5).consumes_reference());
        assert!(!CigarOp::SoftClip(5).consumes_reference());

        assert!(CigarOp::Ins(5).counts_in_block());
        assert!(!CigarOp::Skip(5).counts_in_block());
        assert!(!CigarOp::SoftClip(5).counts_in_block());
    }
}
