pub mod coset_fft;
pub mod cosets;
pub mod domain;
mod fft;
pub mod poly_coeff;
