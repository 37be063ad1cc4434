//! Control sequence parameter parsing
//!
//! The buffered parameter string of a CSI sequence is split on `;` into
//! non-negative integers. Empty fields count as zero, so `""` yields a single
//! zero parameter and `"5;"` yields `[5, 0]`.

/// Maximum number of parameters kept per sequence
pub const MAX_PARAMS: usize = 16;

/// CSI parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Parameter values (0 means default/unspecified)
    values: Vec<u16>,
}

impl Params {
    /// Create empty params
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create params from a slice
    pub fn from_slice(values: &[u16]) -> Self {
        Self {
            values: values.iter().copied().take(MAX_PARAMS).collect(),
        }
    }

    /// Parse parameters from the bytes collected between the introducer
    /// and the final byte (private marker already stripped).
    ///
    /// Each field contributes its leading decimal digits; anything after
    /// them is ignored. Values saturate at `u16::MAX`.
    pub fn parse(bytes: &[u8]) -> Self {
        let values = bytes
            .split(|&b| b == b';')
            .take(MAX_PARAMS)
            .map(|field| {
                field
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .fold(0u16, |acc, &b| {
                        acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                    })
            })
            .collect();
        Self { values }
    }

    /// Get raw value at index (0 if not present)
    pub fn get(&self, index: usize) -> u16 {
        self.values.get(index).copied().unwrap_or(0)
    }

    /// Get a count parameter: 0 or absent means 1
    pub fn count(&self, index: usize) -> u16 {
        match self.get(index) {
            0 => 1,
            n => n,
        }
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over parameters
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.values.iter().copied()
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_empty_is_single_zero() {
        let params = Params::parse(b"");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get(0), 0);
    }

    #[test]
    fn test_params_single() {
        let params = Params::parse(b"42");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get(0), 42);
    }

    #[test]
    fn test_params_multiple() {
        let params = Params::parse(b"1;2;3");
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_params_empty_fields() {
        let params = Params::parse(b";5;");
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![0, 5, 0]);
    }

    #[test]
    fn test_params_trailing_semicolon() {
        let params = Params::parse(b"7;");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(1), 0);
    }

    #[test]
    fn test_params_count_defaults_to_one() {
        let params = Params::parse(b"0;3");
        assert_eq!(params.count(0), 1);
        assert_eq!(params.count(1), 3);
        assert_eq!(params.count(9), 1);
    }

    #[test]
    fn test_params_overflow_saturates() {
        let params = Params::parse(b"99999999");
        assert_eq!(params.get(0), u16::MAX);
    }

    #[test]
    fn test_params_capped() {
        let input = "1;".repeat(40);
        let params = Params::parse(input.as_bytes());
        assert_eq!(params.len(), MAX_PARAMS);
    }

    #[test]
    fn test_params_garbage_in_field() {
        let params = Params::parse(b"12x;3");
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![12, 3]);
    }
}
