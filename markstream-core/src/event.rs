//! Parsing events - the structural output of grammars built on the tokenizer.
//!
//! This is a SAX-style event model: events are delivered to a [`Handler`]
//! as soon as they are emitted, with no accumulation. Structure is
//! represented by start/end event pairs.
//!
//! Leaf constructs are a start immediately followed by its end:
//! ```text
//! StartNode Text "hello"
//! EndNode   Text "hello"
//! ```
//!
//! Composite constructs enclose their children:
//! ```text
//! StartNode Map  "config"
//! StartNode Text "key"
//! EndNode   Text "key"
//! EndNode   Map  "config"
//! ```
//!
//! The emitter does not check that pairs match; wrap the handler in
//! [`Nesting`](crate::nesting::Nesting) for that.

use std::borrow::Cow;
use std::fmt;

use tracing::trace;

/// Start or end of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParsingEvent {
    StartNode,
    EndNode,
}

impl ParsingEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::StartNode => "START_NODE",
            Self::EndNode => "END_NODE",
        }
    }
}

impl fmt::Display for ParsingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural role of a node.
///
/// `Text`, `Comment` and `Type` are leaves; `List`, `Map` and `Tag` enclose
/// other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkupNode {
    /// Text content
    Text,
    /// Comment content
    Comment,
    /// Type annotation of the enclosing node
    Type,
    /// Ordered sequence of children
    List,
    /// Keyed children
    Map,
    /// Named element
    Tag,
}

impl MarkupNode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Comment => "COMMENT",
            Self::Type => "TYPE",
            Self::List => "LIST",
            Self::Map => "MAP",
            Self::Tag => "TAG",
        }
    }

    /// Check if this kind encloses other nodes.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Tag)
    }
}

impl fmt::Display for MarkupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One emitted event: who emitted it, what happened, to which kind of
/// node, with what text.
///
/// Borrows from the emitter while being delivered; use
/// [`into_owned`](Self::into_owned) to keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingData<'a> {
    source: Cow<'a, str>,
    event: ParsingEvent,
    node: MarkupNode,
    value: Cow<'a, str>,
}

impl<'a> ParsingData<'a> {
    pub fn new(
        source: impl Into<Cow<'a, str>>,
        event: ParsingEvent,
        node: MarkupNode,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            source: source.into(),
            event,
            node,
            value: value.into(),
        }
    }

    /// Identifier of the emitting parser.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn event(&self) -> ParsingEvent {
        self.event
    }

    #[inline]
    pub fn node(&self) -> MarkupNode {
        self.node
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Detach from the emitter's borrowed data.
    pub fn into_owned(self) -> ParsingData<'static> {
        ParsingData {
            source: Cow::Owned(self.source.into_owned()),
            event: self.event,
            node: self.node,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

impl fmt::Display for ParsingData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.event, self.node, self.value)
    }
}

/// Receives events synchronously, in emission order.
pub trait Handler {
    fn handle_event(&mut self, data: &ParsingData<'_>);
}

impl<F> Handler for F
where
    F: FnMut(&ParsingData<'_>),
{
    #[inline]
    fn handle_event(&mut self, data: &ParsingData<'_>) {
        self(data)
    }
}

/// Handler that records every event it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<ParsingData<'static>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ParsingData<'static>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events rendered as `"START_NODE TEXT value"` lines.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn into_events(self) -> Vec<ParsingData<'static>> {
        self.events
    }
}

impl Handler for EventLog {
    fn handle_event(&mut self, data: &ParsingData<'_>) {
        self.events.push(data.clone().into_owned());
    }
}

/// Builds event records and delivers them to a handler.
#[derive(Debug)]
pub struct EventEmitter<H> {
    /// Identifier of the parser this emitter speaks for.
    source: String,
    handler: H,
}

impl<H: Handler> EventEmitter<H> {
    pub fn new(source: impl Into<String>, handler: H) -> Self {
        Self {
            source: source.into(),
            handler,
        }
    }

    /// Deliver one event.
    pub fn emit(&mut self, event: ParsingEvent, node: MarkupNode, value: &str) {
        trace!(parser = %self.source, %event, %node, value, "emit");
        let data = ParsingData::new(self.source.as_str(), event, node, value);
        self.handler.handle_event(&data);
    }

    /// Open a composite node.
    #[inline]
    pub fn start(&mut self, node: MarkupNode, value: &str) {
        self.emit(ParsingEvent::StartNode, node, value);
    }

    /// Close a composite node opened with the same kind and value.
    #[inline]
    pub fn end(&mut self, node: MarkupNode, value: &str) {
        self.emit(ParsingEvent::EndNode, node, value);
    }

    fn leaf(&mut self, node: MarkupNode, value: &str) {
        self.start(node, value);
        self.end(node, value);
    }

    pub fn text(&mut self, value: &str) {
        self.leaf(MarkupNode::Text, value);
    }

    pub fn comment(&mut self, value: &str) {
        self.leaf(MarkupNode::Comment, value);
    }

    pub fn type_name(&mut self, value: &str) {
        self.leaf(MarkupNode::Type, value);
    }

    /// Identifier stamped on every emitted record.
    pub fn identifier(&self) -> &str {
        &self.source
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
