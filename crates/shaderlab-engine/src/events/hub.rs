use std::cell::RefCell;
use std::rc::Rc;

use crate::input::{HostSignal, PointerEvent};
use crate::viewport::Viewport;

use super::subscription::Subscription;

/// Signal channels a subscriber can attach to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SignalKind {
    Resize,
    PointerMove,
}

type Callback<E> = Box<dyn FnMut(&E)>;

struct Slot<E> {
    id: u64,
    /// `None` while the callback is being invoked.
    callback: Option<Callback<E>>,
}

#[derive(Default)]
pub(super) struct Registry {
    next_id: u64,
    resize: Vec<Slot<Viewport>>,
    pointer: Vec<Slot<PointerEvent>>,
}

impl Registry {
    pub(super) fn remove(&mut self, kind: SignalKind, id: u64) -> bool {
        let before = self.len(kind);
        match kind {
            SignalKind::Resize => self.resize.retain(|s| s.id != id),
            SignalKind::PointerMove => self.pointer.retain(|s| s.id != id),
        }
        before != self.len(kind)
    }

    fn len(&self, kind: SignalKind) -> usize {
        match kind {
            SignalKind::Resize => self.resize.len(),
            SignalKind::PointerMove => self.pointer.len(),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Host-side signal hub (viewport resize + pointer move).
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct HostEvents {
    registry: Rc<RefCell<Registry>>,
}

impl HostEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_resize(&self, callback: impl FnMut(&Viewport) + 'static) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.allocate_id();
        reg.resize.push(Slot {
            id,
            callback: Some(Box::new(callback)),
        });
        log::trace!("resize listener {id} attached");
        Subscription::new(Rc::downgrade(&self.registry), SignalKind::Resize, id)
    }

    pub fn subscribe_pointer(
        &self,
        callback: impl FnMut(&PointerEvent) + 'static,
    ) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.allocate_id();
        reg.pointer.push(Slot {
            id,
            callback: Some(Box::new(callback)),
        });
        log::trace!("pointer listener {id} attached");
        Subscription::new(Rc::downgrade(&self.registry), SignalKind::PointerMove, id)
    }

    pub fn emit_resize(&self, viewport: Viewport) {
        dispatch(&self.registry, |r| &mut r.resize, &viewport);
    }

    pub fn emit_pointer(&self, event: PointerEvent) {
        dispatch(&self.registry, |r| &mut r.pointer, &event);
    }

    /// Routes a translated platform signal to its channel.
    pub fn emit(&self, signal: HostSignal) {
        match signal {
            HostSignal::Resized(vp) => self.emit_resize(vp),
            HostSignal::PointerMoved(ev) => self.emit_pointer(ev),
        }
    }

    /// Number of attached listeners on `kind`.
    pub fn listener_count(&self, kind: SignalKind) -> usize {
        self.registry.borrow().len(kind)
    }

    /// Number of attached listeners across all channels.
    pub fn total_listeners(&self) -> usize {
        let reg = self.registry.borrow();
        reg.resize.len() + reg.pointer.len()
    }
}

fn dispatch<E>(
    registry: &Rc<RefCell<Registry>>,
    channel: fn(&mut Registry) -> &mut Vec<Slot<E>>,
    event: &E,
) {
    // Snapshot ids so listeners attached during dispatch wait for the next emit.
    let ids: Vec<u64> = channel(&mut registry.borrow_mut())
        .iter()
        .map(|s| s.id)
        .collect();

    for id in ids {
        let taken = {
            let mut reg = registry.borrow_mut();
            channel(&mut reg)
                .iter_mut()
                .find(|s| s.id == id)
                .and_then(|s| s.callback.take())
        };
        let Some(mut callback) = taken else { continue };

        callback(event);

        // The slot is gone if the callback unsubscribed itself.
        let mut reg = registry.borrow_mut();
        if let Some(slot) = channel(&mut reg).iter_mut().find(|s| s.id == id) {
            slot.callback = Some(callback);
        }
    }
}
