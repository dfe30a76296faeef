use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use carousel::{InputEvent, InputOutcome};

use crate::{Controller, FrameSummary, RenderHost, Subscription, Ticker};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// The controller is already borrowed, e.g. an input handler re-entered from inside a
    /// frame or from inside [`Mounted::with`].
    #[error("carousel controller is busy")]
    Busy,
}

/// A controller mounted on a [`Ticker`]: it runs one [`Controller::frame`] per tick until it
/// is dropped.
///
/// Dropping it (or calling [`Mounted::unmount`]) cancels the frame callback and releases every
/// live render handle. If the controller is busy at that point (the `Mounted` is dropped from
/// inside a frame, e.g. by the render host), the release runs on the next tick instead; it is
/// skipped if the ticker itself is gone by then.
pub struct Mounted<T: 'static, H: RenderHost<T> + 'static> {
    controller: Rc<RefCell<Controller<T, H>>>,
    ticker: Ticker,
    last_frame: Rc<Cell<Option<FrameSummary>>>,
    subscription: Option<Subscription>,
}

impl<T: 'static, H: RenderHost<T> + 'static> fmt::Debug for Mounted<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted")
            .field("last_frame", &self.last_frame.get())
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl<T: 'static, H: RenderHost<T> + 'static> Mounted<T, H> {
    pub fn mount(ticker: &Ticker, controller: Controller<T, H>) -> Self {
        let controller = Rc::new(RefCell::new(controller));
        let last_frame = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&controller);
        let sink = Rc::clone(&last_frame);
        let subscription = ticker.subscribe(move |now_ms| {
            let Some(controller) = weak.upgrade() else {
                return Ok(());
            };
            let mut controller = controller
                .try_borrow_mut()
                .map_err(|_| MountError::Busy)?;
            sink.set(Some(controller.frame(now_ms)));
            Ok(())
        });
        adebug!(id = subscription.id(), "mounted");

        Self {
            controller,
            ticker: ticker.clone(),
            last_frame,
            subscription: Some(subscription),
        }
    }

    /// Forwards one input event to the engine.
    pub fn dispatch(&self, event: InputEvent, now_ms: u64) -> Result<InputOutcome, MountError> {
        self.with(|controller| controller.handle_input(event, now_ms))
    }

    /// Runs `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller<T, H>) -> R) -> Result<R, MountError> {
        let mut controller = self
            .controller
            .try_borrow_mut()
            .map_err(|_| MountError::Busy)?;
        Ok(f(&mut controller))
    }

    /// What the most recent frame did, if one has run.
    pub fn last_frame(&self) -> Option<FrameSummary> {
        self.last_frame.get()
    }

    /// Stops the frame loop and releases all render handles. Returns the number released, which
    /// is 0 when the release was deferred to the next tick.
    pub fn unmount(mut self) -> usize {
        self.shutdown()
    }

    fn shutdown(&mut self) -> usize {
        let Some(subscription) = self.subscription.take() else {
            return 0;
        };
        subscription.cancel();
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.teardown(),
            Err(_) => {
                awarn!("controller busy at unmount; releasing render handles on the next tick");
                self.defer_teardown();
                0
            }
        }
    }

    /// Schedules a one-shot callback that tears the controller down once it is free.
    fn defer_teardown(&self) {
        let controller = Rc::clone(&self.controller);
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let own = Rc::clone(&slot);
        let subscription = self.ticker.subscribe(move |_| {
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return Err(MountError::Busy.into());
            };
            controller.teardown();
            drop(controller);
            own.borrow_mut().take();
            Ok(())
        });
        *slot.borrow_mut() = Some(subscription);
    }
}

impl<T: 'static, H: RenderHost<T> + 'static> Drop for Mounted<T, H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
