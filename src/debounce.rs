// Trailing-edge coalescing for bursts of events (window resizes).
//
// Every `schedule` supersedes the previous ticket. When a delayed callback
// fires with its ticket, only the latest one gets the value; earlier ones
// find nothing.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay_ms: u32,
    latest: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u32) -> Debouncer<T> {
        Debouncer {
            delay_ms,
            latest: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn schedule(&mut self, value: T) -> Ticket {
        self.latest += 1;
        self.pending = Some(value);
        Ticket(self.latest)
    }

    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.latest {
            self.pending.take()
        } else {
            None
        }
    }
}
