//! Observing decoded values.
//!
//! Decoding itself doesn’t have any side effects. If something should
//! happen for each decoded value, e.g., printing it, decode the data first
//! and then hand the result together with an [`Observer`] to [`observe`].
//!
//! Two observers are provided: [`HexDump`] writes a line per value to an
//! `io::Write`, while [`LogObserver`] emits a log record per value.

use std::{fmt, io};
use std::convert::Infallible;
use crate::node::{Node, Value};
use crate::tag::Tag;


//------------ Observer ------------------------------------------------------

/// A type that wants to look at each decoded value.
pub trait Observer {
    /// The error the observer may produce.
    type Error;

    /// Called for each constructed value.
    ///
    /// The nested values are observed after this call.
    fn constructed(
        &mut self, _level: usize, _tag: Tag
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each primitive value with its content octets.
    fn primitive(
        &mut self, level: usize, tag: Tag, value: &[u8]
    ) -> Result<(), Self::Error>;
}

impl<O: Observer + ?Sized> Observer for &mut O {
    type Error = O::Error;

    fn constructed(
        &mut self, level: usize, tag: Tag
    ) -> Result<(), Self::Error> {
        (**self).constructed(level, tag)
    }

    fn primitive(
        &mut self, level: usize, tag: Tag, value: &[u8]
    ) -> Result<(), Self::Error> {
        (**self).primitive(level, tag, value)
    }
}


//------------ observe -------------------------------------------------------

/// Presents a forest of decoded values to an observer.
///
/// The values are presented in the order they appeared in the encoded
/// data. The level is zero for the given nodes and increases by one for
/// each constructed value a node is nested in. Stops at the first error
/// returned by the observer.
pub fn observe<O: Observer + ?Sized>(
    nodes: &[Node], observer: &mut O
) -> Result<(), O::Error> {
    for (level, node) in Node::walk(nodes) {
        match node.value() {
            Value::Primitive(value) => {
                observer.primitive(level, node.tag(), value)?
            }
            Value::Constructed(_) => {
                observer.constructed(level, node.tag())?
            }
        }
    }
    Ok(())
}


//------------ HexDump -------------------------------------------------------

/// An observer writing one line per value.
///
/// Each line contains the level, the raw tag number in hex, and whether
/// the value is constructed. Lines for primitive values also contain the
/// content in hex:
///
/// ```text
/// level=0 tag=e1 constructed=true
/// level=1 tag=9f1e constructed=false value=3136303231343337
/// ```
pub struct HexDump<W> {
    target: W,
}

impl<W: io::Write> HexDump<W> {
    /// Creates a new hex dump writing to `target`.
    pub fn new(target: W) -> Self {
        HexDump { target }
    }

    /// Converts the hex dump into the underlying writer.
    pub fn into_inner(self) -> W {
        self.target
    }
}

impl<W: io::Write> Observer for HexDump<W> {
    type Error = io::Error;

    fn constructed(&mut self, level: usize, tag: Tag) -> Result<(), io::Error> {
        writeln!(self.target, "level={} tag={:x} constructed=true", level, tag)
    }

    fn primitive(
        &mut self, level: usize, tag: Tag, value: &[u8]
    ) -> Result<(), io::Error> {
        writeln!(
            self.target, "level={} tag={:x} constructed=false value={}",
            level, tag, Hex(value)
        )
    }
}


//------------ LogObserver ---------------------------------------------------

/// An observer emitting a log record for each value.
///
/// By default, records are logged at debug level with the target
/// `"bertlv"`.
#[derive(Clone, Copy, Debug)]
pub struct LogObserver {
    target: &'static str,
    level: log::Level,
}

impl LogObserver {
    /// Creates a new log observer with the default target and level.
    pub fn new() -> Self {
        LogObserver { target: "bertlv", level: log::Level::Debug }
    }

    /// Changes the target of the log records.
    pub fn with_target(self, target: &'static str) -> Self {
        LogObserver { target, ..self }
    }

    /// Changes the level of the log records.
    pub fn with_level(self, level: log::Level) -> Self {
        LogObserver { level, ..self }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for LogObserver {
    type Error = Infallible;

    fn constructed(&mut self, level: usize, tag: Tag) -> Result<(), Infallible> {
        log::log!(
            target: self.target, self.level,
            "level {}: tag {:x} ({}), constructed", level, tag, tag
        );
        Ok(())
    }

    fn primitive(
        &mut self, level: usize, tag: Tag, value: &[u8]
    ) -> Result<(), Infallible> {
        log::log!(
            target: self.target, self.level,
            "level {}: tag {:x} ({}), {} octets: {}",
            level, tag, tag, value.len(), Hex(value)
        );
        Ok(())
    }
}


//------------ Hex -----------------------------------------------------------

/// Displays a slice as contiguous lowercase hex digits.
struct Hex<'a>(&'a [u8]);

impl<'a> fmt::Display for Hex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for octet in self.0 {
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}


//============ Tests =========================================================
