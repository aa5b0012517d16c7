mod explorer;
pub use explorer::{Explorer, SharedData};

mod gate;
pub use gate::{access_granted, AccessGate};
