pub mod render;
pub mod run;
pub mod simulate;
pub mod sum;
