//! Word counts and reading time estimates.

/// Default reading speed, in words per minute
pub const READING_SPEED_WPM: u32 = 200;

/// Number of whitespace-separated tokens.
///
/// Text without spaces (e.g. a CJK sentence) counts as a single token.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Minutes needed to read `content` at 200 words per minute, rounded up.
/// Empty or whitespace-only content takes zero minutes.
pub fn calculate_reading_time(content: &str) -> u32 {
    reading_time_with_speed(content, READING_SPEED_WPM)
}

/// Like [`calculate_reading_time`] with a custom speed. A speed of zero is
/// treated as one word per minute.
pub fn reading_time_with_speed(content: &str, words_per_minute: u32) -> u32 {
    let words = word_count(content) as u64;
    let speed = u64::from(words_per_minute.max(1));
    u32::try_from(words.div_ceil(speed)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(calculate_reading_time(""), 0);
        assert_eq!(calculate_reading_time(" \n\t "), 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(calculate_reading_time("one"), 1);
        assert_eq!(calculate_reading_time(&"w ".repeat(200)), 1);
        assert_eq!(calculate_reading_time(&"w ".repeat(201)), 2);
        assert_eq!(calculate_reading_time(&"w ".repeat(450)), 3);
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count("  a \n\n b\tc  "), 3);
        assert_eq!(word_count("机器学习是人工智能"), 1);
    }

    #[test]
    fn test_custom_speed() {
        assert_eq!(reading_time_with_speed(&"w ".repeat(100), 50), 2);
        assert_eq!(reading_time_with_speed("a b c", 0), 3);
    }
}
