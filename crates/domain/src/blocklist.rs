//! Static set of denied domain names.
//!
//! Built once at startup from a newline-delimited source and never mutated
//! afterwards, so it can be shared between query handlers without locking.

use std::collections::HashSet;
use std::io::{self, BufRead};

/// A set of blocked domains for exact-match lookup.
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    domains: HashSet<String>,
}

impl Blocklist {
    /// Parse a blocklist from any buffered reader.
    ///
    /// Lines are trimmed; empty lines and lines starting with `#` are skipped.
    /// Every other line is stored verbatim. Bytes that are not valid UTF-8
    /// are replaced rather than rejected, so only I/O failures are errors.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut domains = HashSet::new();

        for line in reader.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            domains.insert(line.to_string());
        }

        Ok(Self { domains })
    }

    /// Parse a blocklist held in memory.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    /// Exact membership test. Callers pass the name without its trailing dot.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Returns the number of domains in the blocklist.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl FromIterator<String> for Blocklist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# ad networks
ads.example.com
  tracker.example.net  

# duplicates are absorbed
ads.example.com
";

    #[test]
    fn from_reader_skips_comments_and_blank_lines() {
        let blocklist = Blocklist::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(blocklist.len(), 2);
        assert!(blocklist.contains("ads.example.com"));
        assert!(blocklist.contains("tracker.example.net"));
    }

    #[test]
    fn from_reader_tolerates_non_utf8_lines() {
        let source: &[u8] = b"# caf\xe9 trackers\nads.example.com\r\nbad\xff.example\n";
        let blocklist = Blocklist::from_reader(source).unwrap();

        assert_eq!(blocklist.len(), 2);
        assert!(blocklist.contains("ads.example.com"));
        assert!(blocklist.contains("bad\u{FFFD}.example"));
    }

    #[test]
    fn parse_matches_from_reader() {
        let parsed = Blocklist::parse(SAMPLE);
        let read = Blocklist::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(parsed.len(), read.len());
        assert!(parsed.contains("tracker.example.net"));
    }

    #[test]
    fn contains_is_exact_match() {
        let blocklist = Blocklist::parse("ads.example.com");

        assert!(!blocklist.contains("ads.example.com."));
        assert!(!blocklist.contains("sub.ads.example.com"));
        assert!(!blocklist.contains("example.com"));
    }

    #[test]
    fn comment_prefix_only_applies_at_line_start() {
        let blocklist = Blocklist::parse("   # indented comment\nsite#1.example");

        assert_eq!(blocklist.len(), 1);
        assert!(blocklist.contains("site#1.example"));
    }

    #[test]
    fn empty_source_yields_empty_blocklist() {
        let blocklist = Blocklist::parse("");
        assert!(blocklist.is_empty());
        assert!(!blocklist.contains(""));
    }
}
