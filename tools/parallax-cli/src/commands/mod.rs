pub mod check;
pub mod record;
pub mod replay;
pub mod simulate;
pub mod transform;
