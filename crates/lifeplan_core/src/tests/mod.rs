//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `builder` - Year-sequence seeding from configuration
//! - `transition` - Single-year state machine behavior
//! - `projection` - Full multi-year runs
//! - `withdrawal_search` - Lump-sum handling and the sustainable-withdrawal search
//! - `presenter_contract` - The flat JSON input/output contract

mod transition;
