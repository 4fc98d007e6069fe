pub mod prober;
pub mod reconcile;
pub mod talos;
