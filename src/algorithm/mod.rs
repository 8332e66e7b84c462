/// Connected-component labeling of undecided cells
pub mod labeling;
/// Grass, tent and tree deduction rules
pub mod rules;
/// Bit-packed grid state used for progress detection
pub mod snapshot;
/// Fixed-point solve loop and its reports
pub mod solver;
/// Disjoint sets of component labels
pub mod union_find;
