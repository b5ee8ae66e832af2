// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! promptlog-ledger: numbered conversation turns for promptlog
//!
//! This library crate manages two parallel sequences of text files, one for
//! assistant turns and one for user turns, stored side by side in a ledger
//! directory (`.assistant/` by default).
//!
//! # Example
//!
//! ```no_run
//! use promptlog_ledger::{Ledger, TurnRole};
//!
//! let ledger = Ledger::new(".assistant");
//! let next = ledger.next_number(TurnRole::User).expect("scan ledger");
//! ledger.create_turn(TurnRole::User, next, "").expect("create turn");
//!
//! if let Some(latest) = ledger.latest_turn(TurnRole::Assistant).expect("scan ledger") {
//!     println!("{}", Ledger::read_turn(&latest.path));
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod ledger;
pub mod turn;

pub use error::LedgerError;
pub use ledger::{Ledger, TurnEntry};
pub use turn::{TurnFileName, TurnRole, format_turn_file_name, parse_turn_file_name};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LedgerError;
    pub use crate::ledger::{Ledger, TurnEntry};
    pub use crate::turn::{TurnFileName, TurnRole};
}
