// Common module: generic helpers shared by the search algorithms

// ======================== MODULE DECLARATIONS ========================
pub mod partition;


// ======================== UNION-FIND ========================
pub use partition::{
    Partition,                      // struct - union-find over hashable values (index arena + hash map)
    LabelledPartition,              // struct - union-find whose classes carry combinable labels
};
// Partition impl methods:
//   find(&mut self, x: &T) -> usize             - slot of the class representative
//   same_class(&mut self, x: &T, y: &T) -> bool - true if both values share a class
//   union(&mut self, x: &T, y: &T)              - merges two classes
//   classes(&mut self) -> Vec<Vec<T>>           - all classes in first-insertion order
