/*!
# IO

Utilities for reading and writing graphs from and to the plain text format.

## Format

```text
oriented
suspended
A B 5
B C 3
```

- The first line is the [`header`]'s orientation: `oriented` (directed) or `unoriented` (undirected).
- The second line is the weighting: `suspended` (weighted) or `unsuspended` (unweighted).
- Every further line is one stored adjacency entry `<label> <label> <weight>`.
  Undirected graphs list both mirrored entries; unweighted graphs always carry the weight `-1`.

Labels must not contain whitespace and vertices without edges are not representable.

## Traits

Readers and writers come in two flavours:
- [`GraphReader`] and [`GraphWriter`] are implemented by configurable readers and writers.
- [`TextRead`] and [`TextWrite`] are shorthands implemented on graphs using the default settings.
*/

pub mod header;
pub mod text;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    error::{GraphError, Result},
    prelude::*,
};

pub use header::*;
pub use text::*;

/// A configured reader producing graphs of type `G`.
pub trait GraphReader<G> {
    /// Reads one graph from `reader`.
    ///
    /// # Errors
    /// [`GraphError::Validation`] for a bad header, [`GraphError::Parse`] and
    /// [`GraphError::MalformedLine`] for bad edge lines and [`GraphError::Io`] if reading fails.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Opens `path` and reads one graph from it, see [`GraphReader::try_read_graph`]
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.try_read_graph(BufReader::new(file))
    }
}

/// A configured writer for graphs of type `G`.
pub trait GraphWriter<G> {
    /// Writes `graph` to `writer`; only IO failures are reported.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Creates (or truncates) `path` and writes `graph` into it
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        self.try_write_graph(graph, BufWriter::new(file))
    }
}

/// Shorthand for returning `Err(GraphError)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $err : expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

use raise_error_unless;
