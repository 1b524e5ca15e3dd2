pub mod envelope;
pub mod lookup;
pub mod tenant;
pub mod text;
