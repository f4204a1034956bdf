//! The spatial scene model.
//!
//! A [`Scene`] holds the elements of a canvas in registration order,
//! together with the wires connecting their ports. Elements are opaque to
//! the engine apart from their rectangle and capability flags; membership
//! of an element in a group is overlap-based, not structural — an element
//! is "on" a group whenever its rectangle overlaps the group's rectangle
//! at computation time.
//!
//! The scene is owned by the host; the engine only queries it and reports
//! deltas back. Stale identifiers are answered with `None` or empty
//! iterators rather than errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Identity of a scene element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an identifier from its raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of element categories the engine distinguishes.
///
/// Capability queries on [`Element`] are preferred over matching on the
/// kind directly; the kind exists so aggregation logic stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A positioned node with optional ports.
    Node,
    /// A container whose rectangle carries overlapping elements when moved.
    Group,
    /// A connection between ports; has no position of its own.
    Wire,
}

/// A connection anchor on an element.
///
/// The anchor is an offset from the owning element's rectangle origin;
/// the port's live position follows the element as it moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Port {
    anchor: Point,
}

impl Port {
    /// Creates a port with the given anchor offset
    pub fn new(anchor: Point) -> Self {
        Self { anchor }
    }

    /// Returns the anchor offset from the element origin
    pub fn anchor(self) -> Point {
        self.anchor
    }
}

/// Addresses one port on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRef {
    pub element: ElementId,
    pub port: usize,
}

impl PortRef {
    pub fn new(element: ElementId, port: usize) -> Self {
        Self { element, port }
    }
}

/// The direction a wire runs between its two ports.
///
/// Orientation is inherited from the ports a wire connects; a horizontal
/// wire aligns its endpoints vertically and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A connection between two ports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    from: PortRef,
    to: PortRef,
    orientation: Orientation,
}

impl Wire {
    /// Creates a wire between two ports
    pub fn new(from: PortRef, to: PortRef, orientation: Orientation) -> Self {
        Self {
            from,
            to,
            orientation,
        }
    }

    /// Returns the originating port
    pub fn from_port(self) -> PortRef {
        self.from
    }

    /// Returns the destination port
    pub fn to_port(self) -> PortRef {
        self.to
    }

    /// Returns the wire's orientation
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Checks whether either end of the wire attaches to the given element
    pub fn touches(self, element: ElementId) -> bool {
        self.from.element == element || self.to.element == element
    }

    /// Returns the endpoint on the given element and its counterpart,
    /// or `None` if the wire does not touch the element.
    pub fn ends_for(self, element: ElementId) -> Option<(PortRef, PortRef)> {
        if self.from.element == element {
            Some((self.from, self.to))
        } else if self.to.element == element {
            Some((self.to, self.from))
        } else {
            None
        }
    }
}

/// A positioned scene element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    #[serde(default)]
    rect: Rect,
    #[serde(default = "default_true")]
    movable: bool,
    #[serde(default = "default_true")]
    selectable: bool,
    #[serde(default)]
    ports: Vec<Port>,
}

fn default_true() -> bool {
    true
}

impl Element {
    /// Creates a movable, selectable element with no ports
    pub fn new(id: ElementId, kind: ElementKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            rect,
            movable: true,
            selectable: true,
            ports: Vec::new(),
        }
    }

    /// Sets the movable capability, returning the element
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Sets the selectable capability, returning the element
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Adds a port, returning the element
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Returns the element's identity
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the element's kind
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns the element's rectangle
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Replaces the element's rectangle
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Whether the element can be moved by a gesture
    pub fn is_movable(&self) -> bool {
        self.movable
    }

    /// Whether the element can participate in a selection
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether the element is a group container
    pub fn is_group_container(&self) -> bool {
        self.kind == ElementKind::Group
    }

    /// Whether the element is a wire rather than a positioned node
    pub fn is_wire(&self) -> bool {
        self.kind == ElementKind::Wire
    }

    /// Returns the element's ports
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }
}

/// An ordered collection of elements and the wires connecting them.
///
/// Iteration order is registration (insertion) order everywhere; the
/// engine's results are deterministic because no hashed iteration is
/// exposed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    wires: Vec<Wire>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element at the end of the registration order.
    ///
    /// A duplicate identifier replaces the existing element in place so the
    /// registration order is preserved.
    pub fn insert(&mut self, element: Element) {
        if let Some(existing) = self.elements.iter_mut().find(|e| e.id == element.id) {
            *existing = element;
        } else {
            self.elements.push(element);
        }
    }

    /// Adds a wire
    pub fn insert_wire(&mut self, wire: Wire) {
        self.wires.push(wire);
    }

    /// Looks up an element by identity
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Iterates over all elements in registration order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Checks whether the scene has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replaces an element's rectangle.
    ///
    /// Returns false for a stale identifier; the caller treats that as a
    /// skip, not a failure.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.set_rect(rect);
                true
            }
            None => false,
        }
    }

    /// Moves an element's rectangle by the given delta.
    ///
    /// Returns false for a stale identifier.
    pub fn translate_element(&mut self, id: ElementId, delta: Point) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.set_rect(element.rect().translate(delta));
                true
            }
            None => false,
        }
    }

    /// Returns the live position of a port: the owning element's origin
    /// plus the port's anchor offset. `None` if either reference is stale.
    pub fn port_position(&self, port: PortRef) -> Option<Point> {
        let element = self.element(port.element)?;
        let anchor = element.ports().get(port.port)?.anchor();
        Some(element.rect().origin().add(anchor))
    }

    /// Iterates over all wires
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter()
    }

    /// Iterates over the wires touching the given element
    pub fn wires_connected_to(&self, id: ElementId) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(move |wire| wire.touches(id))
    }

    /// Returns the elements carried by a group: every other element whose
    /// rectangle overlaps the group's rectangle right now.
    ///
    /// An empty vec is returned for a stale identifier or a non-group
    /// element.
    pub fn overlapping_members(&self, group: ElementId) -> Vec<ElementId> {
        let Some(container) = self.element(group) else {
            return Vec::new();
        };
        if !container.is_group_container() {
            return Vec::new();
        }
        let group_rect = container.rect();
        self.elements
            .iter()
            .filter(|e| e.id != group && !e.is_wire() && e.rect().overlaps(group_rect))
            .map(|e| e.id)
            .collect()
    }
}
