//! # Headers
//!
//! The header of a text graph file consists of two lines, each a single keyword:
//! the orientation (`oriented` / `unoriented`) followed by the weighting (`suspended` / `unsuspended`).
//! Together they determine the [`GraphKind`] of the graph that is read.

use super::*;

/// Header keyword of directed graphs
pub const ORIENTED: &str = "oriented";
/// Header keyword of undirected graphs
pub const UNORIENTED: &str = "unoriented";
/// Header keyword of weighted graphs
pub const SUSPENDED: &str = "suspended";
/// Header keyword of unweighted graphs
pub const UNSUSPENDED: &str = "unsuspended";

/// Defining a single line of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderToken {
    /// Directed or undirected
    Orientation,
    /// Weighted or unweighted
    Weighting,
}

impl HeaderToken {
    /// Keywords accepted for this line as `(true-keyword, false-keyword)`
    fn keywords(&self) -> (&'static str, &'static str) {
        match self {
            HeaderToken::Orientation => (ORIENTED, UNORIENTED),
            HeaderToken::Weighting => (SUSPENDED, UNSUSPENDED),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            HeaderToken::Orientation => "`oriented` or `unoriented`",
            HeaderToken::Weighting => "`suspended` or `unsuspended`",
        }
    }

    /// Parses a header line (surrounding whitespace is ignored).
    /// `None` signals a missing line, which is reported as well.
    pub fn parse(&self, line_number: usize, line: Option<&str>) -> Result<bool> {
        let found = line.map(str::trim).unwrap_or_default();
        let (yes, no) = self.keywords();

        raise_error_unless!(
            found == yes || found == no,
            GraphError::Validation {
                line: line_number,
                expected: self.expected(),
                found: found.to_string(),
            }
        );
        Ok(found == yes)
    }

    /// Returns the keyword representing `value`
    pub fn keyword(&self, value: bool) -> &'static str {
        let (yes, no) = self.keywords();
        if value { yes } else { no }
    }
}

/// The two-line header of the text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub kind: GraphKind,
}

impl Header {
    /// Creates a header describing graphs of the given kind
    pub fn new(kind: GraphKind) -> Self {
        Self { kind }
    }

    /// Parses the orientation and weighting lines, given as `(line number, content)`
    pub fn parse_header(
        orientation: (usize, Option<&str>),
        weighting: (usize, Option<&str>),
    ) -> Result<Self> {
        let directed = HeaderToken::Orientation.parse(orientation.0, orientation.1)?;
        let weighted = HeaderToken::Weighting.parse(weighting.0, weighting.1)?;
        Ok(Self::new(GraphKind::new(directed, weighted)))
    }

    /// Writes both header lines
    pub fn write_header<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", HeaderToken::Orientation.keyword(self.kind.directed))?;
        writeln!(writer, "{}", HeaderToken::Weighting.keyword(self.kind.weighted))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header() {
        let header = Header::parse_header((1, Some("unoriented")), (2, Some(" suspended "))).unwrap();
        assert_eq!(header.kind, GraphKind::undirected_weighted());

        let header = Header::parse_header((1, Some("oriented")), (2, Some("unsuspended"))).unwrap();
        assert_eq!(header.kind, GraphKind::directed_unweighted());
    }

    #[test]
    fn invalid_header() {
        assert!(matches!(
            Header::parse_header((1, Some("directed")), (2, Some("suspended"))),
            Err(GraphError::Validation { line: 1, .. })
        ));
        assert!(matches!(
            Header::parse_header((1, Some("oriented")), (2, Some("oriented"))),
            Err(GraphError::Validation { line: 2, .. })
        ));
        assert!(matches!(
            Header::parse_header((1, Some("oriented")), (2, None)),
            Err(GraphError::Validation { line: 2, found, .. }) if found.is_empty()
        ));
    }

    #[test]
    fn write_header() {
        let mut buffer = Vec::new();
        Header::new(GraphKind::undirected_unweighted())
            .write_header(&mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "unoriented\nunsuspended\n");
    }
}
