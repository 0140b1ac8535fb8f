pub mod combat;
pub mod death;
pub mod hostile;
