//! The fixed set of response headers every audit checks.

/// Points awarded for each checklist header present.
pub const POINTS_PER_HEADER: u32 = 20;

const STANDARD_HEADERS: [&str; 5] = [
    "content-security-policy",
    "strict-transport-security",
    "x-content-type-options",
    "x-frame-options",
    "referrer-policy",
];

/// Ordered, immutable list of header names scored by the auditor.
///
/// Built once at startup and shared read-only; the order determines the
/// order of `missing` and `headersFound` in every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    headers: &'static [&'static str],
}

impl Checklist {
    /// The five security headers audited by this service.
    pub fn standard() -> Self {
        Self {
            headers: &STANDARD_HEADERS,
        }
    }

    pub fn headers(&self) -> &[&'static str] {
        self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Highest score an audit can reach.
    pub fn max_score(&self) -> u32 {
        POINTS_PER_HEADER * self.headers.len() as u32
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_checklist() {
        let checklist = Checklist::standard();
        assert_eq!(checklist.len(), 5);
        assert_eq!(checklist.headers()[0], "content-security-policy");
        assert_eq!(checklist.headers()[4], "referrer-policy");
        assert_eq!(checklist.max_score(), 100);
    }
}
