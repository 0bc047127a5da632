//! Global pointer-down hub.
//!
//! Widgets that need "click outside closes me" behaviour subscribe here while
//! mounted. A subscription is a guard: dropping it removes the listener, so
//! unmounting a widget can never leave a dangling handler behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// A cell position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// The rectangle a widget last rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && (point.x as u32) < self.x as u32 + self.width as u32
            && (point.y as u32) < self.y as u32 + self.height as u32
    }
}

type Listener = Box<dyn FnMut(Point)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Broadcasts pointer-down events to every live subscription.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    pub fn subscribe(&self, listener: impl FnMut(Point) + 'static) -> PointerSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Box::new(listener));
        PointerSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn pointer_down(&self, point: Point) {
        let mut inner = self.inner.borrow_mut();
        for listener in inner.listeners.values_mut() {
            listener(point);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Live registration on a [`PointerHub`].
pub struct PointerSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().listeners.remove(&self.id);
        }
    }
}
