use rcf_core::RcfError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided payload using canonical JSON ordering.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, RcfError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

#[cfg(test)]
mod tests {
    use rcf_core::complex;
    use rcf_core::LinearRecurrenceSpec;

    use super::*;

    #[test]
    fn equal_specs_hash_equal() {
        let a = LinearRecurrenceSpec::partial_sum(Vec::new());
        let b = LinearRecurrenceSpec::partial_sum(Vec::new());
        assert_eq!(stable_hash_string(&a).unwrap(), stable_hash_string(&b).unwrap());
        let mut c = a.clone();
        c.initial_values[0] = complex::ONE;
        assert_ne!(stable_hash_string(&a).unwrap(), stable_hash_string(&c).unwrap());
        assert_eq!(stable_hash_string(&a).unwrap().len(), 64);
    }
}
