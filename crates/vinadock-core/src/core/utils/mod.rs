pub mod geometry;
pub mod graph;
pub mod naming;
pub mod rmsd;
