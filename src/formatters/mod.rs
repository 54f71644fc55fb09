pub mod flat;
pub mod notebook;

pub use flat::{EmissionState, FlatFormatter};
pub use notebook::{Cell, Notebook, NotebookFormatter};
