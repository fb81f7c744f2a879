//! FRB bridge crate for the SideDock desktop host.

pub mod api;
