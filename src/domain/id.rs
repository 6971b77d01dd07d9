// src/domain/id.rs
use rand::Rng;
use uuid::Uuid;

/// Pad id alphabet. Leaves out characters that are easy to confuse (g, l, o, 0, 1).
pub const PAD_ID_ALPHABET: &[u8] = b"abcdefhijkmnpqrstuvwxyz23456789";

/// Short random pad id of 3, 4 or 5 characters.
///
/// Half of the ids have 3 characters, 40% have 4 and 10% have 5. Collisions
/// are possible and accepted: two visitors who draw the same id share a pad.
pub fn generate_pad_id() -> String {
    let mut rng = rand::thread_rng();
    let len = if rng.gen_bool(0.5) {
        3
    } else if rng.gen_bool(0.8) {
        4
    } else {
        5
    };

    (0..len)
        .map(|_| PAD_ID_ALPHABET[rng.gen_range(0..PAD_ID_ALPHABET.len())] as char)
        .collect()
}

pub fn generate_note_id() -> String {
    Uuid::new_v4().to_string()
}

/// Whether a path segment may be served as a pad.
///
/// Anything with a dot looks like a static file request and is refused.
pub fn is_servable_pad_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('.') && id != "favicon.ico"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn given_many_generated_ids_when_checking_then_all_use_alphabet_and_length_range() {
        for _ in 0..2000 {
            let id = generate_pad_id();
            assert!((3..=5).contains(&id.len()), "unexpected length: {id}");
            assert!(id.bytes().all(|b| PAD_ID_ALPHABET.contains(&b)), "bad char in {id}");
        }
    }

    #[test]
    fn given_many_generated_ids_when_collecting_lengths_then_every_length_occurs() {
        let lengths: HashSet<usize> = (0..2000).map(|_| generate_pad_id().len()).collect();
        assert_eq!(lengths, HashSet::from([3, 4, 5]));
    }

    #[test]
    fn given_two_note_ids_when_generating_then_they_differ() {
        assert_ne!(generate_note_id(), generate_note_id());
    }

    #[rstest]
    #[case("abc", true)]
    #[case("hello%20world", true)]
    #[case("", false)]
    #[case("favicon.ico", false)]
    #[case("robots.txt", false)]
    #[case("a.b", false)]
    fn test_is_servable_pad_id(#[case] id: &str, #[case] expected: bool) {
        assert_eq!(is_servable_pad_id(id), expected);
    }
}
