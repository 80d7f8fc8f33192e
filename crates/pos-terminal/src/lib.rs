//! Operator-facing terminal shell: draft-file loading for the `record`
//! command lives here so it can be unit tested; wiring stays in main.

pub mod draft_file;
