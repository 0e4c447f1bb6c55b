use crossbeam_channel::{unbounded, Receiver, Sender};

/// Event queue from modules to the app.
///
/// Producers are modules (via `ModuleCtx::bus`); the app drains it once per frame.
pub struct Bus<E: 'static> {
    tx: Sender<E>,
    rx: Receiver<E>,
}

impl<E: 'static> Bus<E> {
    #[inline]
    pub fn new(tx: Sender<E>, rx: Receiver<E>) -> Self {
        Self { tx, rx }
    }

    #[inline]
    pub fn unbounded() -> Self {
        let (tx, rx) = unbounded();
        Self::new(tx, rx)
    }

    /// Cloned sender for producers living outside the engine.
    #[inline]
    pub fn sender(&self) -> Sender<E> {
        self.tx.clone()
    }

    /// Queues an event. Dropped silently if the receiver is gone.
    #[inline]
    pub fn send(&self, ev: E) {
        let _ = self.tx.send(ev);
    }

    #[inline]
    pub fn try_recv(&self) -> Option<E> {
        self.rx.try_recv().ok()
    }

    #[inline]
    pub fn drain_into(&self, out: &mut Vec<E>) -> usize {
        let before = out.len();
        out.extend(self.rx.try_iter());
        out.len() - before
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
