//! Last-request-wins bookkeeping.

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Sequence number, starting at 1.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for one query slot.
///
/// A response may update the view only while its ticket is still the latest
/// one issued; anything older is stale, whatever order responses arrive in.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    /// Counter with no ticket issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding every earlier one.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// The most recently issued ticket, if any.
    pub fn latest(&self) -> Option<RequestTicket> {
        (self.latest > 0).then_some(RequestTicket(self.latest))
    }
}
