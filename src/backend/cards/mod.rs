//! Cards Module
//!
//! Photo cards posted by accounts, with likes. Only the owner of a card can
//! delete it.
//!
//! - **`model`** - `Card`, `NewCard` and the `CardStore` trait
//! - **`pg_store`** - PostgreSQL `CardStore`
//! - **`memory_store`** - In-memory `CardStore` for development and tests
//! - **`handlers`** - `/cards` endpoints

pub mod model;

pub mod pg_store;

pub mod memory_store;

pub mod handlers;

pub use handlers::{create_card, delete_card, like_card, list_cards, unlike_card};
pub use handlers::{CardResponse, CreateCardRequest};
pub use memory_store::MemoryCardStore;
pub use model::{Card, CardDeletion, CardStore, NewCard};
pub use pg_store::PgCardStore;
