//! Observers that can take over a child's transition.
//!
//! Each registered handler is offered every child first. The first handler
//! that returns `true` from [`CollapseHandler::on_collapse_transition`] owns
//! that child's transform for this update and the engine skips it. Every
//! handler then receives [`CollapseHandler::after_collapse_transition`],
//! whoever did the work.
//!
//! Handlers are offered children in registration order. When two handlers
//! would both claim a child, only the earlier one sees the offer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::child::ChildView;
use crate::transition::BarMetrics;

pub trait CollapseHandler {
    /// Return true to take over `child`'s transform at `percent`
    fn on_collapse_transition(
        &mut self,
        bar: &BarMetrics,
        child: &mut dyn ChildView,
        percent: f32,
    ) -> bool;

    fn after_collapse_transition(&mut self, bar: &BarMetrics, child: &dyn ChildView, percent: f32);
}

/// Handle returned on registration, used to unregister
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HandlerId(u64);

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<(HandlerId, Rc<RefCell<dyn CollapseHandler>>)>,
    next_id: u64,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Registering the same handler twice is a no-op and
    /// returns its existing id.
    pub fn add(&mut self, handler: Rc<RefCell<dyn CollapseHandler>>) -> HandlerId {
        if let Some((id, _)) = self.handlers.iter().find(|(_, h)| same_handler(h, &handler)) {
            return *id;
        }
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub fn remove(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Offer `child` to each handler until one claims it.
    ///
    /// A handler the host is still borrowing is skipped for this update.
    pub fn offer(&self, bar: &BarMetrics, child: &mut dyn ChildView, percent: f32) -> bool {
        self.handlers.iter().any(|(id, h)| match h.try_borrow_mut() {
            Ok(mut handler) => handler.on_collapse_transition(bar, child, percent),
            Err(_) => {
                log::warn!("Handler {id:?} is borrowed elsewhere, skipping its offer");
                false
            }
        })
    }

    pub fn notify_after(&self, bar: &BarMetrics, child: &dyn ChildView, percent: f32) {
        for (id, handler) in &self.handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => handler.after_collapse_transition(bar, child, percent),
                Err(_) => log::warn!("Handler {id:?} is borrowed elsewhere, skipping its notification"),
            }
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

fn same_handler(a: &Rc<RefCell<dyn CollapseHandler>>, b: &Rc<RefCell<dyn CollapseHandler>>) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
