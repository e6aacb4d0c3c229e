// src/common/ids.rs

use uuid::Uuid;

/// Gera um ID opaco no formato `<prefixo>-<8 hex>`, ex: `cust-1a2b3c4d`.
pub fn new_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &raw[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_has_prefix_and_eight_hex_chars() {
        let id = new_id("cust");
        let (prefix, suffix) = id.split_once('-').unwrap();
        assert_eq!(prefix, "cust");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(new_id("job"), new_id("job"));
    }
}
