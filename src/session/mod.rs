//! Session state subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap steps
//!     → store.rs (set_provider / set_network / set_account /
//!                 set_token_contract / set_amm_contract)
//!     → state.rs (Session snapshot + phase)
//!     → http handlers read snapshots
//! ```

pub mod state;
pub mod store;

pub use state::{BootstrapPhase, BootstrapStep, Session, StoreAction, TransitionError};
pub use store::SessionStore;
