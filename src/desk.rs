use std::sync::Arc;

use crate::clock::Clock;
use crate::history::OrderHistory;
use crate::state::Store;
use crate::storage::Storage;

/// The two independent stores plus the clock, handed to every command.
pub struct Desk {
    pub store: Store,
    pub history: OrderHistory,
    pub clock: Arc<dyn Clock>,
}

impl Desk {
    pub fn load(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Desk {
            store: Store::load(storage.clone()),
            history: OrderHistory::load(storage, clock.clone()),
            clock,
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }
}
