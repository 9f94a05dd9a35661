//! Fixed-capacity line breaking.

/// Split `text` into lines of exactly `capacity` characters, the last line
/// holding the remainder.
///
/// Characters are Unicode scalar values. Text no longer than `capacity`
/// (including the empty string) comes back as a single line. No whitespace
/// or width awareness: a line is only ever a count of characters. A zero
/// capacity is treated as one.
pub fn wrap(text: &str, capacity: usize) -> Vec<&str> {
    let capacity = capacity.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == capacity {
            lines.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    lines.push(&text[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_exact_capacity_is_one_line() {
        assert_eq!(wrap("abcdefghij", 10), vec!["abcdefghij"]);
        assert_eq!(wrap("abcdefghijk", 10), vec!["abcdefghij", "k"]);
    }

    #[test]
    fn test_counts_scalar_values() {
        assert_eq!(wrap("喜报喜报喜", 2), vec!["喜报", "喜报", "喜"]);
        assert_eq!(wrap("😀😀😀", 2), vec!["😀😀", "😀"]);
    }

    #[test]
    fn test_whitespace_is_not_special() {
        assert_eq!(wrap("ab cd ef", 3), vec!["ab ", "cd ", "ef"]);
    }

    #[test]
    fn test_partition_properties() {
        let text = "The quick brown fox 跳过 the lazy dog 🐕!";
        for capacity in 1..=12 {
            let lines = wrap(text, capacity);
            assert_eq!(lines.concat(), text);
            let (last, rest) = lines.split_last().unwrap();
            assert!(rest.iter().all(|l| l.chars().count() == capacity));
            assert!((1..=capacity).contains(&last.chars().count()));
        }
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(wrap("abc", 0), vec!["a", "b", "c"]);
    }
}
