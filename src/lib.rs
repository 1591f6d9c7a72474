//! Financial projection engine: compound growth with monthly contributions,
//! inflation-adjusted growth, retirement corpus planning, loan amortization
//! and savings-goal solvers, plus the HTTP and command-line front ends that
//! call it.

pub mod api;
pub mod core;
