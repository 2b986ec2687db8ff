//! The four node kinds and the [`Node`] tagged variant.
//!
//! Each kind is its own [`Behavior`] implementation; [`Node`] wraps
//! them so the graph can store a homogeneous table without boxing.

use std::fmt;

use indexmap::IndexMap;
use pulse_core::{DeliveryError, Event, KindMarker, Level, NodeId};

use crate::behavior::Behavior;

// ── Broadcast ──────────────────────────────────────────────────────

/// Stateless fan-out: re-emits whatever it receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Broadcast;

impl Behavior for Broadcast {
    fn deliver(&mut self, event: &Event) -> Result<Option<Level>, DeliveryError> {
        Ok(Some(event.level))
    }

    fn reset_default(&mut self) {}
}

// ── Toggle ─────────────────────────────────────────────────────────

/// One bit of state, flipped by LOW pulses.
///
/// HIGH pulses are ignored entirely. A LOW pulse flips the bit and the
/// node emits HIGH if it just turned on, LOW if it just turned off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toggle {
    on: bool,
}

impl Toggle {
    /// Whether the toggle is currently on.
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Behavior for Toggle {
    fn deliver(&mut self, event: &Event) -> Result<Option<Level>, DeliveryError> {
        if event.level.is_high() {
            return Ok(None);
        }
        self.on = !self.on;
        Ok(Some(Level::from(self.on)))
    }

    fn reset_default(&mut self) {
        self.on = false;
    }
}

// ── Memory ─────────────────────────────────────────────────────────

/// Remembers the most recent level from each of its inputs.
///
/// Emits LOW when every remembered level is HIGH, HIGH otherwise. The
/// input set is fixed when the graph is wired and every input starts
/// out remembered as LOW.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    inputs: IndexMap<NodeId, Level>,
}

impl Memory {
    /// A standalone Memory node with the given inputs, all LOW.
    ///
    /// Repeated inputs collapse into one entry.
    pub fn with_inputs(inputs: impl IntoIterator<Item = NodeId>) -> Self {
        let mut memory = Self::default();
        for source in inputs {
            memory.register_input(source);
        }
        memory
    }

    /// Add `source` to the input set. Only the graph wiring pass calls
    /// this; after construction the set never changes.
    pub(crate) fn register_input(&mut self, source: NodeId) {
        self.inputs.entry(source).or_insert(Level::Low);
    }

    /// Registered inputs, in registration order.
    pub fn inputs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.keys().copied()
    }

    /// Number of registered inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// The level last received from `source`, or `None` if `source` is
    /// not an input of this node.
    pub fn remembered(&self, source: NodeId) -> Option<Level> {
        self.inputs.get(&source).copied()
    }

    /// Whether every input last sent HIGH.
    pub fn all_high(&self) -> bool {
        self.inputs.values().all(|level| level.is_high())
    }
}

impl Behavior for Memory {
    fn deliver(&mut self, event: &Event) -> Result<Option<Level>, DeliveryError> {
        let slot = event
            .source
            .node()
            .and_then(|source| self.inputs.get_mut(&source))
            .ok_or(DeliveryError::UndeclaredInput {
                node: event.destination,
                source: event.source,
            })?;
        *slot = event.level;
        Ok(Some(if self.all_high() {
            Level::Low
        } else {
            Level::High
        }))
    }

    fn reset_default(&mut self) {
        for level in self.inputs.values_mut() {
            *level = Level::Low;
        }
    }
}

// ── Sink ───────────────────────────────────────────────────────────

/// Terminal observation point. Receives, never emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sink;

impl Behavior for Sink {
    fn deliver(&mut self, _event: &Event) -> Result<Option<Level>, DeliveryError> {
        Ok(None)
    }

    fn reset_default(&mut self) {}
}

// ── Node ───────────────────────────────────────────────────────────

/// Discriminant of a [`Node`], without its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// See [`Broadcast`].
    Broadcast,
    /// See [`Toggle`].
    Toggle,
    /// See [`Memory`].
    Memory,
    /// See [`Sink`].
    Sink,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => write!(f, "broadcast"),
            Self::Toggle => write!(f, "toggle"),
            Self::Memory => write!(f, "memory"),
            Self::Sink => write!(f, "sink"),
        }
    }
}

/// A node of the closed kind set, with its state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Stateless fan-out.
    Broadcast(Broadcast),
    /// Flip-on-LOW bit.
    Toggle(Toggle),
    /// Per-input level memory.
    Memory(Memory),
    /// Silent terminal.
    Sink(Sink),
}

impl Node {
    /// A fresh node for a declared kind. Memory nodes start with no
    /// inputs; the graph registers them during wiring.
    pub fn from_marker(marker: KindMarker) -> Self {
        match marker {
            KindMarker::Broadcast => Self::Broadcast(Broadcast),
            KindMarker::Toggle => Self::Toggle(Toggle::default()),
            KindMarker::Memory => Self::Memory(Memory::default()),
        }
    }

    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Broadcast(_) => NodeKind::Broadcast,
            Self::Toggle(_) => NodeKind::Toggle,
            Self::Memory(_) => NodeKind::Memory,
            Self::Sink(_) => NodeKind::Sink,
        }
    }

    /// The Toggle state, if this is a Toggle node.
    pub fn as_toggle(&self) -> Option<&Toggle> {
        match self {
            Self::Toggle(t) => Some(t),
            _ => None,
        }
    }

    /// The Memory state, if this is a Memory node.
    pub fn as_memory(&self) -> Option<&Memory> {
        match self {
            Self::Memory(m) => Some(m),
            _ => None,
        }
    }

    pub(crate) fn as_memory_mut(&mut self) -> Option<&mut Memory> {
        match self {
            Self::Memory(m) => Some(m),
            _ => None,
        }
    }
}

impl Behavior for Node {
    fn deliver(&mut self, event: &Event) -> Result<Option<Level>, DeliveryError> {
        match self {
            Self::Broadcast(b) => b.deliver(event),
            Self::Toggle(t) => t.deliver(event),
            Self::Memory(m) => m.deliver(event),
            Self::Sink(s) => s.deliver(event),
        }
    }

    fn reset_default(&mut self) {
        match self {
            Self::Broadcast(b) => b.reset_default(),
            Self::Toggle(t) => t.reset_default(),
            Self::Memory(m) => m.reset_default(),
            Self::Sink(s) => s.reset_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::Origin;

    const ME: NodeId = NodeId(99);

    fn from(source: u32, level: Level) -> Event {
        Event::emitted(NodeId(source), level, ME)
    }

    #[test]
    fn broadcast_echoes_level() {
        let mut b = Broadcast;
        assert_eq!(b.deliver(&Event::seed(ME)).unwrap(), Some(Level::Low));
        assert_eq!(b.deliver(&from(1, Level::High)).unwrap(), Some(Level::High));
    }

    #[test]
    fn toggle_ignores_high() {
        let mut t = Toggle::default();
        assert_eq!(t.deliver(&from(1, Level::High)).unwrap(), None);
        assert!(!t.is_on());
    }

    #[test]
    fn toggle_two_lows_restore_state() {
        let mut t = Toggle::default();
        assert_eq!(t.deliver(&from(1, Level::Low)).unwrap(), Some(Level::High));
        assert!(t.is_on());
        assert_eq!(t.deliver(&from(1, Level::Low)).unwrap(), Some(Level::Low));
        assert!(!t.is_on());
    }

    #[test]
    fn memory_emits_low_only_when_all_inputs_high() {
        let mut m = Memory::with_inputs([NodeId(1), NodeId(2)]);
        assert_eq!(m.deliver(&from(1, Level::High)).unwrap(), Some(Level::High));
        assert_eq!(m.deliver(&from(2, Level::High)).unwrap(), Some(Level::Low));
        assert_eq!(m.deliver(&from(1, Level::Low)).unwrap(), Some(Level::High));
    }

    #[test]
    fn single_input_memory_inverts() {
        let mut m = Memory::with_inputs([NodeId(1)]);
        assert_eq!(m.deliver(&from(1, Level::High)).unwrap(), Some(Level::Low));
        assert_eq!(m.deliver(&from(1, Level::Low)).unwrap(), Some(Level::High));
    }

    #[test]
    fn memory_rejects_undeclared_input() {
        let mut m = Memory::with_inputs([NodeId(1)]);
        let err = m.deliver(&from(7, Level::High)).unwrap_err();
        assert_eq!(
            err,
            DeliveryError::UndeclaredInput {
                node: ME,
                source: Origin::Node(NodeId(7)),
            }
        );
        // State untouched by the rejected pulse.
        assert_eq!(m.remembered(NodeId(1)), Some(Level::Low));
        assert_eq!(m.remembered(NodeId(7)), None);
    }

    #[test]
    fn memory_rejects_button_seed() {
        let mut m = Memory::with_inputs([NodeId(1)]);
        assert!(matches!(
            m.deliver(&Event::seed(ME)),
            Err(DeliveryError::UndeclaredInput {
                source: Origin::Button,
                ..
            })
        ));
    }

    #[test]
    fn memory_duplicate_inputs_collapse() {
        let m = Memory::with_inputs([NodeId(1), NodeId(1), NodeId(2)]);
        assert_eq!(m.input_count(), 2);
        assert_eq!(m.inputs().collect::<Vec<_>>(), vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn memory_reset_keeps_inputs() {
        let mut m = Memory::with_inputs([NodeId(1), NodeId(2)]);
        m.deliver(&from(1, Level::High)).unwrap();
        m.deliver(&from(2, Level::High)).unwrap();
        m.reset_default();
        assert_eq!(m.input_count(), 2);
        assert_eq!(m.remembered(NodeId(1)), Some(Level::Low));
        assert_eq!(m.remembered(NodeId(2)), Some(Level::Low));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut node = Node::Toggle(Toggle::default());
        node.deliver(&from(1, Level::Low)).unwrap();
        node.reset_default();
        let once = node.clone();
        node.reset_default();
        assert_eq!(node, once);
        assert_eq!(node, Node::from_marker(KindMarker::Toggle));
    }

    #[test]
    fn sink_is_silent() {
        let mut s = Node::Sink(Sink);
        assert_eq!(s.deliver(&from(1, Level::Low)).unwrap(), None);
        assert_eq!(s.kind(), NodeKind::Sink);
    }

    #[test]
    fn from_marker_kinds() {
        assert_eq!(
            Node::from_marker(KindMarker::Broadcast).kind(),
            NodeKind::Broadcast
        );
        assert_eq!(Node::from_marker(KindMarker::Toggle).kind(), NodeKind::Toggle);
        let memory = Node::from_marker(KindMarker::Memory);
        assert_eq!(memory.kind(), NodeKind::Memory);
        assert_eq!(memory.as_memory().map(Memory::input_count), Some(0));
    }

    // ── proptest ───────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_level() -> impl Strategy<Value = Level> {
            prop_oneof![Just(Level::Low), Just(Level::High)]
        }

        proptest! {
            #[test]
            fn toggle_state_is_parity_of_lows(levels in prop::collection::vec(arb_level(), 0..64)) {
                let mut t = Toggle::default();
                let mut lows = 0usize;
                for level in levels {
                    let out = t.deliver(&from(1, level)).unwrap();
                    if level.is_low() {
                        lows += 1;
                        prop_assert_eq!(out, Some(Level::from(t.is_on())));
                    } else {
                        prop_assert_eq!(out, None);
                    }
                    prop_assert_eq!(t.is_on(), lows % 2 == 1);
                }
            }

            #[test]
            fn toggle_double_low_is_identity(start_on in any::<bool>()) {
                let mut t = Toggle::default();
                if start_on {
                    t.deliver(&from(1, Level::Low)).unwrap();
                }
                let before = t;
                let first = t.deliver(&from(1, Level::Low)).unwrap();
                let second = t.deliver(&from(1, Level::Low)).unwrap();
                prop_assert_eq!(t, before);
                prop_assert_eq!(first.map(|l| !l), second);
            }

            #[test]
            fn memory_matches_model(
                width in 1usize..6,
                steps in prop::collection::vec((0usize..6, arb_level()), 0..64),
            ) {
                let ids: Vec<NodeId> = (0..width as u32).map(NodeId).collect();
                let mut m = Memory::with_inputs(ids.iter().copied());
                let mut model = vec![Level::Low; width];
                for (which, level) in steps {
                    let which = which % width;
                    model[which] = level;
                    let out = m.deliver(&from(ids[which].0, level)).unwrap();
                    let expected = if model.iter().all(|l| l.is_high()) {
                        Level::Low
                    } else {
                        Level::High
                    };
                    prop_assert_eq!(out, Some(expected));
                }
            }
        }
    }
}
