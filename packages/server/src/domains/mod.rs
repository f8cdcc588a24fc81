// Business domains
pub mod classification;
