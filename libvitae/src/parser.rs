//! Phase 2: Indentation Stack Parser
//!
//! Walks scan lines once, keeping a stack of frames. A frame is a container
//! that is still open plus the indent of the line that opened it; the root
//! mapping sits at the bottom with indent -1. Before a line is placed, every
//! frame (other than the root) whose indent is at least the line's indent is
//! popped, so the container left on top is the nearest one opened by a
//! shallower line.
//!
//! - `- key: value` appends a new mapping to the sequence being filled and
//!   opens it as a frame at the dash's indent.
//! - `- value` appends a string.
//! - `key: value` sets a leaf, unless the next line is deeper, in which case
//!   `key` gets a fresh sequence (next line starts with `-`) or mapping and
//!   that container is opened as a frame at the key's indent.
//!
//! Containers live in an arena while parsing so that frames can name them by
//! index; the arena is folded into a [`Value`] tree at the end.

use crate::error::{DiagnosticKind, Diagnostics, ParseContext};
use crate::inline::{is_inline_array, parse_inline_array};
use crate::options::{ParseOptions, QuotedScalars};
use crate::scalar::{coerce, find_key_colon, has_mismatched_quotes, strip_quotes, Token};
use crate::scanner::{scan, ScanLine};
use crate::value::{Mapping, Value};
use tracing::trace;

type NodeId = usize;

const ROOT: NodeId = 0;
const ROOT_INDENT: isize = -1;

/// A child of a container: a finished value or another container.
enum Slot {
    Leaf(Value),
    Node(NodeId),
}

enum Container {
    Mapping(Vec<(String, Slot)>),
    Sequence(Vec<Slot>),
}

/// Outcome of setting a key on a container.
enum Insert {
    New,
    Replaced,
    /// The container is a sequence; the entry was dropped.
    Rejected,
}

struct Arena {
    nodes: Vec<Container>,
}

impl Arena {
    fn new() -> Self {
        Self {
            nodes: vec![Container::Mapping(Vec::new())],
        }
    }

    fn alloc(&mut self, container: Container) -> NodeId {
        self.nodes.push(container);
        self.nodes.len() - 1
    }

    fn is_sequence(&self, id: NodeId) -> bool {
        matches!(self.nodes[id], Container::Sequence(_))
    }

    fn insert(&mut self, id: NodeId, key: String, slot: Slot) -> Insert {
        match &mut self.nodes[id] {
            Container::Mapping(entries) => match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => {
                    entry.1 = slot;
                    Insert::Replaced
                }
                None => {
                    entries.push((key, slot));
                    Insert::New
                }
            },
            Container::Sequence(_) => Insert::Rejected,
        }
    }

    fn push(&mut self, id: NodeId, slot: Slot) {
        if let Container::Sequence(items) = &mut self.nodes[id] {
            items.push(slot);
        }
    }

    /// The sequence held by the most recently inserted key of a mapping.
    fn last_sequence_entry(&self, id: NodeId) -> Option<NodeId> {
        match &self.nodes[id] {
            Container::Mapping(entries) => match entries.last() {
                Some((_, Slot::Node(child))) if self.is_sequence(*child) => Some(*child),
                _ => None,
            },
            Container::Sequence(_) => None,
        }
    }

    fn into_mapping(mut self) -> Mapping {
        match self.fold(ROOT) {
            Value::Mapping(map) => map,
            _ => Mapping::new(),
        }
    }

    fn fold(&mut self, id: NodeId) -> Value {
        match std::mem::replace(&mut self.nodes[id], Container::Sequence(Vec::new())) {
            Container::Mapping(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(key, slot)| (key, self.fold_slot(slot)))
                    .collect(),
            ),
            Container::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|slot| self.fold_slot(slot))
                    .collect(),
            ),
        }
    }

    fn fold_slot(&mut self, slot: Slot) -> Value {
        match slot {
            Slot::Leaf(value) => value,
            Slot::Node(id) => self.fold(id),
        }
    }
}

/// An open container and the indent of the line that opened it.
#[derive(Debug, Clone, Copy)]
struct Frame {
    container: NodeId,
    indent: isize,
}

struct Parser<'a> {
    arena: Arena,
    stack: Vec<Frame>,
    options: &'a ParseOptions,
    ctx: &'a ParseContext,
    diagnostics: &'a mut Diagnostics,
}

/// Parse a YAML-subset block into its root mapping.
pub(crate) fn parse_block(
    block: &str,
    options: &ParseOptions,
    ctx: &ParseContext,
    diagnostics: &mut Diagnostics,
) -> Mapping {
    let lines = scan(block);
    let mut parser = Parser {
        arena: Arena::new(),
        stack: vec![Frame {
            container: ROOT,
            indent: ROOT_INDENT,
        }],
        options,
        ctx,
        diagnostics,
    };

    for (i, line) in lines.iter().enumerate() {
        parser.parse_line(line, lines.get(i + 1));
    }

    parser.arena.into_mapping()
}

impl Parser<'_> {
    fn parse_line(&mut self, line: &ScanLine<'_>, next: Option<&ScanLine<'_>>) {
        let indent = line.indent as isize;
        while self.stack.len() > 1 && self.top().indent >= indent {
            self.stack.pop();
        }
        trace!(line = line.line_num, depth = self.stack.len(), "{}", line.text);

        match line.text.strip_prefix('-') {
            Some(content) => self.parse_sequence_item(line, content.trim()),
            None => self.parse_key_value(line, next),
        }
    }

    fn top(&self) -> Frame {
        self.stack[self.stack.len() - 1]
    }

    fn report(&mut self, line: &ScanLine<'_>, kind: DiagnosticKind) {
        self.diagnostics.report(self.ctx, line.line_num, kind);
    }

    /// The sequence a `-` line appends to.
    ///
    /// Normally the top frame. When the top frame is a mapping, fall back to
    /// the sequence held by the last key of the frame below it.
    fn sequence_target(&self) -> Option<NodeId> {
        let current = self.top().container;
        if self.arena.is_sequence(current) {
            return Some(current);
        }
        let parent = self.stack.len().checked_sub(2).map(|i| self.stack[i])?;
        self.arena.last_sequence_entry(parent.container)
    }

    fn parse_sequence_item(&mut self, line: &ScanLine<'_>, item: &str) {
        let Some(target) = self.sequence_target() else {
            self.report(line, DiagnosticKind::OrphanSequenceItem);
            return;
        };

        match find_key_colon(item) {
            Some(colon) => {
                let map = self.arena.alloc(Container::Mapping(Vec::new()));
                self.arena.push(target, Slot::Node(map));
                self.stack.push(Frame {
                    container: map,
                    indent: line.indent as isize,
                });

                let key = item[..colon].trim().to_string();
                let token = self.unquote(line, item[colon + 1..].trim());
                let value = coerce(token, self.options.quoted_scalars);
                self.arena.insert(map, key, Slot::Leaf(value));
            }
            None => {
                let token = self.unquote(line, item);
                self.arena
                    .push(target, Slot::Leaf(Value::String(token.text.to_string())));
            }
        }
    }

    fn parse_key_value(&mut self, line: &ScanLine<'_>, next: Option<&ScanLine<'_>>) {
        let Some(colon) = find_key_colon(line.text) else {
            self.report(line, DiagnosticKind::UnrecognizedLine);
            return;
        };
        let key = line.text[..colon].trim().to_string();
        let raw = line.text[colon + 1..].trim();
        let current = self.top().container;

        match next.filter(|next| next.indent > line.indent) {
            Some(next) => {
                if !raw.is_empty() {
                    self.report(line, DiagnosticKind::DiscardedInlineValue(key.clone()));
                }
                let container = if next.is_item() {
                    Container::Sequence(Vec::new())
                } else {
                    Container::Mapping(Vec::new())
                };
                let child = self.arena.alloc(container);
                self.set(line, current, key, Slot::Node(child));
                self.stack.push(Frame {
                    container: child,
                    indent: line.indent as isize,
                });
            }
            None => {
                let value = self.leaf_value(line, raw);
                self.set(line, current, key, Slot::Leaf(value));
            }
        }
    }

    /// Value of a `key: value` line with nothing nested under it.
    fn leaf_value(&mut self, line: &ScanLine<'_>, raw: &str) -> Value {
        let token = self.unquote(line, raw);
        let protected = token.quoted && self.options.quoted_scalars == QuotedScalars::Preserve;
        if !protected && is_inline_array(token.text) {
            return Value::Sequence(parse_inline_array(token.text));
        }
        coerce(token, self.options.quoted_scalars)
    }

    fn unquote<'t>(&mut self, line: &ScanLine<'_>, raw: &'t str) -> Token<'t> {
        let token = strip_quotes(raw);
        if has_mismatched_quotes(raw, token) {
            self.report(line, DiagnosticKind::MismatchedQuotes);
        }
        token
    }

    fn set(&mut self, line: &ScanLine<'_>, container: NodeId, key: String, slot: Slot) {
        match self.arena.insert(container, key.clone(), slot) {
            Insert::New => {}
            Insert::Replaced => self.report(line, DiagnosticKind::DuplicateKey(key)),
            Insert::Rejected => self.report(line, DiagnosticKind::KeyInSequence(key)),
        }
    }
}
