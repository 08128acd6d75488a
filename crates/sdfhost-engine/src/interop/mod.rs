//! Shared-memory interop.
//!
//! The compute module's linear memory is split into two sections:
//! - fixed: starts at byte 0, written once (the host's 16-byte header leads it)
//! - variable: starts right after the fixed section, rewritten by every `compute()`
//!
//! Section sizes always come from the module. All offset arithmetic lives in
//! [`SectionSizes`]; nothing else indexes the shared memory.

mod header;
mod layout;
mod upload;

pub use header::{initialize_fixed_region, FixedHeader, HEADER_LEN};
pub use layout::{query_section_sizes, SectionSizes};
pub use upload::{upload_fixed, write_variable};
