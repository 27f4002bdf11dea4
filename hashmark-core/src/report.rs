use std::fmt;

/// Classification of one manifest entry against the file system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyStatus {
    /// Digest recomputed and equal.
    Match,
    /// File present, digest differs.
    Mismatch,
    /// In the manifest, absent on disk.
    MissingFile,
    /// On disk, absent from the manifest (strict mode only).
    ExtraFile,
    /// File present but unreadable.
    IoError,
}

impl VerifyStatus {
    /// Tag as it appears in the XML report's `status` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Match => "MATCH",
            Self::Mismatch => "MISMATCH",
            Self::MissingFile => "MISSING_FILE",
            Self::ExtraFile => "EXTRA_FILE",
            Self::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    pub rel_path: String,
    pub status: VerifyStatus,
}

/// Ordered verification outcomes, one per checked path, in manifest order
/// with strict-mode extras appended. Populated during verification and read
/// back afterwards; serialization never omits or reorders an entry.
#[derive(Clone, Debug, Default)]
pub struct HashReport {
    entries: Vec<ReportEntry>,
}

/// Character set the XML serialization declares and uses.
const REPORT_CHARSET: &str = "utf-8";

impl HashReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rel_path: impl Into<String>, status: VerifyStatus) {
        self.entries.push(ReportEntry { rel_path: rel_path.into(), status });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn charset(&self) -> &'static str {
        REPORT_CHARSET
    }

    /// True iff any entry is not MATCH.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.status != VerifyStatus::Match)
    }

    /// Deterministic XML rendering: a root element carrying the charset, one
    /// child per entry with `path` and `status` attributes, entry order
    /// preserved.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"");
        out.push_str(REPORT_CHARSET);
        out.push_str("\"?>\n");
        out.push_str("<hashreport charset=\"");
        out.push_str(REPORT_CHARSET);
        out.push_str("\">\n");
        for entry in &self.entries {
            out.push_str("  <entry path=\"");
            push_escaped(&mut out, &entry.rel_path);
            out.push_str("\" status=\"");
            out.push_str(entry.status.tag());
            out.push_str("\"/>\n");
        }
        out.push_str("</hashreport>\n");
        out
    }
}

// The five characters XML reserves in attribute values.
fn push_escaped(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_no_errors() {
        let report = HashReport::new();
        assert!(!report.has_errors());
        assert_eq!(report.entries().len(), 0);
    }

    #[test]
    fn xml_escapes_reserved_characters() {
        let mut report = HashReport::new();
        report.push("a&b<c>\"d'.txt", VerifyStatus::Match);
        let xml = report.to_xml();
        assert!(xml.contains("path=\"a&amp;b&lt;c&gt;&quot;d&apos;.txt\""));
    }
}
