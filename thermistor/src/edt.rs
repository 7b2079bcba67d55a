use no_std_compat::cell::{Cell, RefCell};
use no_std_compat::vec::Vec;

/// A message waiting in the queue. [order] breaks ties between messages due at the same time.
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Msg<T: Sized> {
    pub when: u64,
    pub order: u32,
    pub payload: T,
}

/// Event dispatch thread: a single-threaded queue of delayed messages with its own clock.
///
/// The owner of the EDT drives it with [EDT::poll] and decides how to wait,
/// a timer on the device or a simulated clock in tests.
pub struct EDT<T> {
    now: Cell<u64>,
    next_order: Cell<u32>,
    queue: RefCell<Vec<Msg<T>>>,
}

pub enum Event<T> {
    Execute { msg: T },
    Wait { ms: u64 },
    Halt,
}

impl<T: Copy> EDT<T> {
    pub fn create() -> EDT<T> {
        EDT {
            now: Cell::new(0),
            next_order: Cell::new(0),
            queue: RefCell::new(Vec::new()),
        }
    }

    /// Milliseconds since the EDT was created
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// When the next message is due, if there is one
    pub fn next_deadline(&self) -> Option<u64> {
        self.peek_head().map(|head| head.when)
    }

    /// Returns the next thing the owner has to do.
    ///
    /// [Event::Wait] moves the clock to the deadline of the head message, the caller
    /// is expected to actually wait that long before polling again.
    pub fn poll(&self) -> Event<T> {
        match self.peek_head() {
            None => Event::Halt,
            Some(head) if head.when > self.now.get() => {
                let to_wait = head.when - self.now.get();
                self.now.set(head.when);
                Event::Wait { ms: to_wait }
            }
            Some(head) => {
                self.queue
                    .borrow_mut()
                    .retain(|it| !(it.when == head.when && it.order == head.order));
                Event::Execute { msg: head.payload }
            }
        }
    }

    /// Advances the time by the given value and feeds messages to the handler.
    /// Messages due exactly at the end of the window are handled too.
    pub fn advance_time_by(&self, time: u64, handler: &dyn Fn(T)) {
        let target = self.now.get() + time;
        loop {
            match self.next_deadline() {
                Some(when) if when <= target => {
                    if let Event::Execute { msg } = self.poll() {
                        handler(msg);
                    }
                }
                _ => {
                    self.now.set(target);
                    break;
                }
            }
        }
    }

    pub fn schedule(&self, delay: u64, payload: T) {
        let order = self.next_order.get();
        self.next_order.set(order.wrapping_add(1));
        self.queue.borrow_mut().push(Msg {
            when: self.now.get() + delay,
            order,
            payload,
        });
    }

    pub fn remove<F>(&self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.queue.borrow_mut().retain(|it| !predicate(&it.payload));
    }

    /// Drops everything, the next [EDT::poll] returns [Event::Halt]
    pub fn exit(&self) {
        self.queue.borrow_mut().clear();
    }

    pub fn queue_len(&self) -> usize {
        self.queue.borrow().len()
    }

    fn peek_head(&self) -> Option<Msg<T>> {
        self.queue
            .borrow()
            .iter()
            .min_by(|lhs, rhs| lhs.when.cmp(&rhs.when).then(lhs.order.cmp(&rhs.order)))
            .cloned()
    }
}
