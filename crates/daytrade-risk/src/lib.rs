//! Trade costs and position sizing.
//!
//! Provides the per-trade commission schedule and the whole-share sizer
//! that spends as much cash as the schedule allows.

mod commission;
mod position_sizer;

pub use commission::CommissionSchedule;
pub use position_sizer::PositionSizer;
