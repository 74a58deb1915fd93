#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooShort,
    Comment,
}

#[derive(Debug, Clone)]
pub struct LineFilter {
    min_len: usize,
}

impl LineFilter {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    /// Returns the trimmed line to process, or why it was skipped.
    pub fn check<'a>(&self, raw: &'a str) -> Result<&'a str, SkipReason> {
        let line = raw.trim_end_matches('\r').trim();
        if line.starts_with('#') {
            return Err(SkipReason::Comment);
        }
        if line.chars().count() < self.min_len {
            return Err(SkipReason::TooShort);
        }
        Ok(line)
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new(5)
    }
}
