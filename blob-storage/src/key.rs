use md5::{Digest, Md5};

/// Largest blob the service accepts, in bytes.
pub const MAX_PASTE_SIZE: usize = 16 * 1024;

/// Derives the storage key for a blob: the lowercase hex MD5 digest of its bytes.
pub fn derive_key(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_is_deterministic() {
        let data = b"hello paste";
        assert_eq!(derive_key(data), derive_key(data));
    }

    #[test]
    fn test_derive_key_known_values() {
        assert_eq!(derive_key(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(derive_key(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_derive_key_shape() {
        let big = vec![0xabu8; MAX_PASTE_SIZE];
        for data in [&b""[..], &b"x"[..], &big[..]] {
            let key = derive_key(data);
            assert_eq!(key.len(), 32);
            assert!(key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')), "{key}");
        }
    }

    #[test]
    fn test_different_bytes_different_keys() {
        assert_ne!(derive_key(b"data one"), derive_key(b"data two"));
    }
}
