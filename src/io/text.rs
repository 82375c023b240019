//! # Text
//!
//! Reader and writer for the two-line-header text format described in [`crate::io`].

use std::io::Lines;

use itertools::Itertools;
use log::debug;

use super::*;

/// A GraphReader for the text format
#[derive(Debug, Clone, Default)]
pub struct TextReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: Option<String>,
}

impl TextReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> TextReader {
        self.comment_identifier = Some(c.into());
        self
    }
}

impl<G> GraphReader<G> for TextReader
where
    G: GraphNew + GraphLabelEditing + GraphEdgeOrder,
{
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<G> {
        let mut lines = TextLinesReader::new(reader, self.comment_identifier.as_deref());

        let orientation = lines.next_line()?;
        let orientation_line = lines.line_number;
        let weighting = lines.next_line()?;
        let header = Header::parse_header(
            (orientation_line, orientation.as_deref()),
            (lines.line_number, weighting.as_deref()),
        )?;

        let mut graph = G::new(header.kind);
        while let Some(line) = lines.next_line()? {
            if line.trim().is_empty() {
                continue;
            }

            let (u, v, w) = lines.parse_edge(&line)?;
            graph.add_edge(u, v, w);
        }

        debug!(
            "read {:?} graph with {} vertices and {} edges",
            header.kind,
            graph.number_of_nodes(),
            graph.number_of_edges()
        );
        Ok(graph)
    }
}

/// Trait for creating graphs from a TextReader.
/// Used as shorthand for default TextReader settings
pub trait TextRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_text(BufReader::new(File::open(path)?))
    }
}

impl<G> TextRead for G
where
    G: GraphNew + GraphLabelEditing + GraphEdgeOrder,
{
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self> {
        TextReader::default().try_read_graph(reader)
    }
}

/// Line source that skips comments and keeps track of the current line number
struct TextLinesReader<'a, R> {
    lines: Lines<R>,
    comment_identifier: Option<&'a str>,
    line_number: usize,
}

impl<'a, R: BufRead> TextLinesReader<'a, R> {
    fn new(reader: R, comment_identifier: Option<&'a str>) -> Self {
        Self {
            lines: reader.lines(),
            comment_identifier,
            line_number: 0,
        }
    }

    /// Returns the next non-comment-line if it exists or propagates an error.
    /// On exhaustion, `line_number` points one past the last line.
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            self.line_number += 1;
            match self.lines.next() {
                None => return Ok(None),
                Some(Err(x)) => return Err(x.into()),
                Some(Ok(line))
                    if self
                        .comment_identifier
                        .is_some_and(|c| line.starts_with(c)) =>
                {
                    continue;
                }
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    /// Splits a data line into `(label, label, weight)`
    fn parse_edge<'l>(&self, line: &'l str) -> Result<(&'l str, &'l str, Weight)> {
        let malformed = || GraphError::MalformedLine {
            line: self.line_number,
            found: line.to_string(),
        };

        let Some((u, v, w)) = line.split_whitespace().collect_tuple() else {
            return Err(malformed());
        };

        let weight = w.parse().map_err(|_| GraphError::Parse {
            line: self.line_number,
            found: w.to_string(),
        })?;

        Ok((u, v, weight))
    }
}

/// A writer for the text format
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    /// Sort entries by labels instead of writing them in vertex order
    sorted: bool,
}

impl TextWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates whether entries are sorted by their labels
    pub fn sorted(mut self, sorted: bool) -> TextWriter {
        self.sorted = sorted;
        self
    }
}

impl<G> GraphWriter<G> for TextWriter
where
    G: AdjacencyList + Labelled,
{
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        Header::new(graph.kind()).write_header(&mut writer)?;

        let mut entries = graph
            .weighted_edges(false)
            .map(|WeightedEdge(u, v, w)| {
                let w = if graph.is_weighted() { w } else { UNWEIGHTED };
                (graph.label_of(u), graph.label_of(v), w)
            })
            .collect_vec();

        if self.sorted {
            entries.sort_unstable();
        }

        for (u, v, w) in entries {
            writeln!(writer, "{u} {v} {w}")?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Trait for writing graphs with a TextWriter.
/// Used as shorthand for default TextWriter settings
pub trait TextWrite {
    /// Tries to write the graph to a given writer
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a given file
    fn try_write_text_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.try_write_text(BufWriter::new(File::create(path)?))
    }
}

impl<G> TextWrite for G
where
    G: AdjacencyList + Labelled,
{
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()> {
        TextWriter::default().try_write_graph(self, writer)
    }
}
