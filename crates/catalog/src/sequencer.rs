//! Last-issued-wins ordering for catalog requests.
//!
//! Responses may arrive in any order. Each request carries a [`Ticket`]; a
//! response is applied only if its ticket is still the latest one issued.

/// Identity of one issued request. Strictly increasing per sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw sequence number, for logging.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tickets and decides which response may be applied.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issue a ticket, superseding every earlier one.
    pub const fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Whether a response carrying `ticket` may still be applied.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Most recently issued ticket, if any.
    #[must_use]
    pub const fn latest(&self) -> Option<Ticket> {
        if self.latest == 0 {
            None
        } else {
            Some(Ticket(self.latest))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let mut sequencer = RequestSequencer::new();
        assert_eq!(sequencer.latest(), None);

        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert_eq!(sequencer.latest(), Some(second));
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_out_of_order_arrival() {
        let mut sequencer = RequestSequencer::new();
        let a = sequencer.issue();
        let b = sequencer.issue();

        // B answers first and is applied; A's late answer is dropped.
        assert!(sequencer.is_current(b));
        assert!(!sequencer.is_current(a));
    }

    #[test]
    fn test_ticket_display() {
        let mut sequencer = RequestSequencer::new();
        assert_eq!(sequencer.issue().to_string(), "#1");
    }
}
