//! Regex layers over markdown bodies: cross-references, tags, headings,
//! summaries and reading time.

pub(crate) mod links;
mod reading_time;
mod summary;
mod tags;
mod toc;

pub use self::links::{find_backlinks, parse_links, render_links, rendered_link_targets};
pub use self::reading_time::{
    READING_SPEED_WPM, calculate_reading_time, reading_time_with_speed, word_count,
};
pub use self::summary::{DEFAULT_SUMMARY_LENGTH, extract_summary, strip_markdown};
pub use self::tags::{extract_tags, merge_tags};
pub use self::toc::{generate_toc, heading_anchor};
