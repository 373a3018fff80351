pub mod hash_index;
pub mod recency_list;
pub mod set_selector;
pub mod slot_arena;

pub use hash_index::{DEFAULT_BUCKETS, HashIndex, LOAD_FACTOR_THRESHOLD};
pub use recency_list::RecencyList;
pub use set_selector::SetSelector;
pub use slot_arena::{SlotArena, SlotId};
