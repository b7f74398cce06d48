//! Administrative operations behind the `authgate-cli` binary.

pub mod accounts;
