//! Opt-in check that start/end events nest properly.
//!
//! [`Nesting`] sits between an [`EventEmitter`](crate::EventEmitter) and the
//! real handler. Every event is forwarded unchanged; the checker only keeps
//! a stack of open nodes and remembers the first violation.

use thiserror::Error;

use crate::event::{Handler, MarkupNode, ParsingData, ParsingEvent};

/// A start/end pairing violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestingError {
    /// An end event that does not match the innermost open node.
    #[error("event {index}: END_NODE {found} {found_value:?} closes START_NODE {expected} {expected_value:?}")]
    Mismatched {
        index: usize,
        expected: MarkupNode,
        expected_value: String,
        found: MarkupNode,
        found_value: String,
    },
    /// An end event with nothing open.
    #[error("event {index}: END_NODE {node} {value:?} without START_NODE")]
    Unopened {
        index: usize,
        node: MarkupNode,
        value: String,
    },
    /// Nodes still open when the event stream finished.
    #[error("{open} node(s) left open, innermost {node} {value:?}")]
    Unclosed {
        open: usize,
        node: MarkupNode,
        value: String,
    },
}

/// Handler adapter that validates nesting while forwarding events.
#[derive(Debug)]
pub struct Nesting<H> {
    inner: H,
    open: Vec<(MarkupNode, String)>,
    seen: usize,
    violation: Option<NestingError>,
}

impl<H: Handler> Nesting<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            open: Vec::new(),
            seen: 0,
            violation: None,
        }
    }

    /// Number of currently open nodes.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// First violation seen so far, if any.
    pub fn violation(&self) -> Option<&NestingError> {
        self.violation.as_ref()
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// End the stream: hand back the inner handler, or the first violation.
    pub fn finish(self) -> Result<H, NestingError> {
        if let Some(violation) = self.violation {
            return Err(violation);
        }
        match self.open.last() {
            Some((node, value)) => Err(NestingError::Unclosed {
                open: self.open.len(),
                node: *node,
                value: value.clone(),
            }),
            None => Ok(self.inner),
        }
    }

    fn check(&mut self, data: &ParsingData<'_>) -> Option<NestingError> {
        let index = self.seen;
        match data.event() {
            ParsingEvent::StartNode => {
                self.open.push((data.node(), data.value().to_owned()));
                None
            }
            ParsingEvent::EndNode => match self.open.pop() {
                Some((node, value)) if node == data.node() && value == data.value() => None,
                Some((expected, expected_value)) => Some(NestingError::Mismatched {
                    index,
                    expected,
                    expected_value,
                    found: data.node(),
                    found_value: data.value().to_owned(),
                }),
                None => Some(NestingError::Unopened {
                    index,
                    node: data.node(),
                    value: data.value().to_owned(),
                }),
            },
        }
    }
}

impl<H: Handler> Handler for Nesting<H> {
    fn handle_event(&mut self, data: &ParsingData<'_>) {
        let violation = self.check(data);
        if self.violation.is_none() {
            self.violation = violation;
        }
        self.seen += 1;
        self.inner.handle_event(data);
    }
}
